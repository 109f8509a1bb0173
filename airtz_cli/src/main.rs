use std::io::{ErrorKind, Read, Write};
use std::path::PathBuf;

use airtz::prelude::*;
use airtz::{query_text, AirportIcaoQuery, IanaTimezoneQuery};
use airtz::{WIKIDATA_ENTITY_PREFIX, WIKIDATA_SPARQL_ENDPOINT};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "airtz",
    about = "Airport ICAO codes and IANA time zones from Wikidata",
    version,
    author
)]
struct Cli {
    #[arg(
        short,
        long,
        env = "AIRTZ_SPARQL_URL",
        help = "SPARQL endpoint, or a file:// prefix of canned responses",
        default_value = WIKIDATA_SPARQL_ENDPOINT
    )]
    url: String,

    #[arg(
        long,
        env = "AIRTZ_ENTITY_PREFIX",
        help = "Prefix stripped from entity URIs",
        default_value = WIKIDATA_ENTITY_PREFIX
    )]
    entity_prefix: String,

    #[arg(
        long,
        env = "AIRTZ_TIMEOUT",
        help = "Request timeout in seconds",
        default_value_t = 60
    )]
    timeout: u64,

    #[arg(long, env = "AIRTZ_LIMIT", help = "Append a LIMIT to the queries")]
    limit: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch airports with their ICAO codes and time zones, one JSON object per line
    Airports {
        #[arg(long, help = "Keep only the first row per ICAO code")]
        dedup: bool,
    },

    /// List the Wikidata items standing for IANA time zones
    Timezones,

    /// Propose "located in time zone" statements for airports without one
    Plan {
        #[arg(
            value_name = "ICAO_TO_TIMEZONE",
            help = "File of `<ICAO> <IANA zone>` lines"
        )]
        mapping: PathBuf,
    },

    /// Resolve airport directory entries to IANA zones from their UTC offsets
    ///
    /// Reads text already extracted from the directory (one entry per line)
    /// and prints `<ICAO> <zone>` lines, or `<ICAO> ?` when no definition
    /// matches. The output is what `plan` reads.
    Resolve {
        #[arg(
            short,
            long,
            default_value = "time_zones.toml",
            help = "TOML table of zone definitions"
        )]
        time_zones: PathBuf,

        #[arg(long, help = "Accept common typesetting slips in the offsets")]
        lenient: bool,

        #[arg(value_name = "TEXT", help = "Directory text files; stdin when absent")]
        inputs: Vec<PathBuf>,
    },

    /// Print the query text without sending it
    Query {
        #[arg(long, help = "Print the time zone query instead of the airport query")]
        timezones: bool,
    },
}

impl Cli {
    fn endpoint_config(&self) -> EndpointConfig {
        EndpointConfig {
            url: self.url.clone(),
            entity_prefix: self.entity_prefix.clone(),
            timeout_secs: self.timeout,
            limit: self.limit,
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        // The reader went away, e.g. `airtz airports | head`
        Err(e) if is_broken_pipe(&e) => Ok(()),
        result => result,
    }
}

fn is_broken_pipe(error: &anyhow::Error) -> bool {
    error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<std::io::Error>())
        .any(|e| e.kind() == ErrorKind::BrokenPipe)
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.endpoint_config();

    match cli.command {
        Commands::Query { timezones } => {
            let text = if timezones {
                query_text::<IanaTimezoneQuery>(config.limit)?
            } else {
                query_text::<AirportIcaoQuery>(config.limit)?
            };
            writeln!(std::io::stdout().lock(), "{}", text)?;
        }
        Commands::Resolve {
            time_zones,
            lenient,
            inputs,
        } => {
            let table = std::fs::read_to_string(&time_zones)
                .with_context(|| format!("Failed to read {}", time_zones.display()))?;
            let table = TimeZoneTable::from_toml(&table)
                .with_context(|| format!("Failed to load {}", time_zones.display()))?;
            let syntax = if lenient {
                EntrySyntax::Lenient
            } else {
                EntrySyntax::Strict
            };

            let mut texts = Vec::new();
            if inputs.is_empty() {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read stdin")?;
                texts.push(text);
            }
            for input in &inputs {
                texts.push(
                    std::fs::read_to_string(input)
                        .with_context(|| format!("Failed to read {}", input.display()))?,
                );
            }

            let mut out = std::io::stdout().lock();
            let (mut resolved, mut unknown) = (0, 0);
            for text in &texts {
                for resolution in resolve_directory(text, &table, syntax) {
                    match resolution.zone {
                        Some(_) => resolved += 1,
                        None => unknown += 1,
                    }
                    writeln!(out, "{}", resolution)?;
                }
            }
            info!(definitions = table.len(), resolved, unknown, "resolved directory");
        }
        Commands::Airports { dedup } => {
            let client = connect(config)?;
            let records = fetch_airports(&client)
                .await
                .context("Failed to fetch airports")?;

            let mut out = std::io::stdout().lock();
            if dedup {
                let index = IcaoIndex::from_records(&records, &client.config().entity_prefix);
                for airport in &index {
                    writeln!(out, "{}", serde_json::to_string(airport)?)?;
                }
            } else {
                for record in &records {
                    writeln!(out, "{}", serde_json::to_string(record)?)?;
                }
            }
            log_metrics(&client);
        }
        Commands::Timezones => {
            let client = connect(config)?;
            let records = fetch_timezones(&client)
                .await
                .context("Failed to fetch time zones")?;
            let catalog = TimezoneCatalog::from_records(&records, &client.config().entity_prefix);

            let mut out = std::io::stdout().lock();
            for (zone_name, entity) in catalog.iter() {
                writeln!(out, "{}\t{}", zone_name, entity)?;
            }
            log_metrics(&client);
        }
        Commands::Plan { mapping } => {
            let text = std::fs::read_to_string(&mapping)
                .with_context(|| format!("Failed to read {}", mapping.display()))?;
            let mapping = parse_icao_timezones(&text);

            let client = connect(config)?;
            let prefix = client.config().entity_prefix.clone();
            let catalog = TimezoneCatalog::from_records(
                &fetch_timezones(&client)
                    .await
                    .context("Failed to fetch time zones")?,
                &prefix,
            );
            let index = IcaoIndex::from_records(
                &fetch_airports(&client)
                    .await
                    .context("Failed to fetch airports")?,
                &prefix,
            );

            let proposals = plan_claims(&index, &mapping, &catalog)?;
            let mut out = std::io::stdout().lock();
            for proposal in &proposals {
                let mut line = serde_json::to_value(proposal)?;
                line["value"] = proposal.value();
                writeln!(out, "{}", line)?;
            }
            info!(
                airports = index.len(),
                mapped = mapping.len(),
                proposals = proposals.len(),
                "planned claims"
            );
            log_metrics(&client);
        }
    }

    Ok(())
}

fn connect(config: EndpointConfig) -> Result<SparqlClient> {
    SparqlClient::new(config).context("Failed to set up SPARQL client")
}

fn log_metrics(client: &SparqlClient) {
    let metrics = client.metrics();
    info!(
        queries = metrics.total_queries(),
        failed = metrics.failed(),
        success_rate = metrics.success_rate(),
        rows = metrics.rows(),
        avg = ?metrics.average_query_duration(),
        "endpoint statistics"
    );
}
