use airtz_db::SparqlClient;
use airtz_query::{AirportIcaoQuery, FixedQuery, IanaTimezoneQuery};
use serde::de::DeserializeOwned;
use tracing::{info, instrument, warn};

use crate::record::{AirportRecord, TimezoneRecord};
use crate::{AirtzError, Result};

/// Text of `Q` as sent to the endpoint, with the configured row limit.
pub fn query_text<Q: FixedQuery>(limit: Option<usize>) -> Result<String> {
    Q::statement()
        .with_limit(limit)
        .build()
        .map_err(|e| AirtzError::Query(e.to_string()))
}

async fn run<Q, T>(client: &SparqlClient) -> Result<Vec<T>>
where
    Q: FixedQuery,
    T: DeserializeOwned,
{
    let query = query_text::<Q>(client.config().limit)?;
    let rows = client
        .execute_projecting(Q::NAME, &query, Q::VARS)
        .await?;
    Ok(rows)
}

/// Fetches every airport with an ICAO code, one record per result row.
#[instrument(skip(client), fields(endpoint = %client.config().url))]
pub async fn fetch_airports(client: &SparqlClient) -> Result<Vec<AirportRecord>> {
    let records: Vec<AirportRecord> = run::<AirportIcaoQuery, _>(client).await?;
    for record in &records {
        if let Err(e) = record.validate() {
            warn!(error = %e, "rejecting result set");
            return Err(e);
        }
    }
    let with_zone = records.iter().filter(|r| r.time_zone().is_some()).count();
    info!(rows = records.len(), with_zone, "fetched airports");
    Ok(records)
}

/// Fetches every item standing for an IANA time zone.
#[instrument(skip(client), fields(endpoint = %client.config().url))]
pub async fn fetch_timezones(client: &SparqlClient) -> Result<Vec<TimezoneRecord>> {
    let records: Vec<TimezoneRecord> = run::<IanaTimezoneQuery, _>(client).await?;
    info!(rows = records.len(), "fetched time zones");
    Ok(records)
}
