use std::fs;
use std::path::Path;

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

const AIRPORTS: &str = r#"{
  "head": { "vars": ["airport", "airportLabel", "icaoCode", "timezone", "zoneName"] },
  "results": { "bindings": [
    {
      "airport": { "type": "uri", "value": "http://www.wikidata.org/entity/Q8688" },
      "airportLabel": { "xml:lang": "en", "type": "literal", "value": "San Francisco International Airport" },
      "icaoCode": { "type": "literal", "value": "KSFO" },
      "timezone": { "type": "uri", "value": "http://www.wikidata.org/entity/Q1145939" },
      "zoneName": { "type": "literal", "value": "America/Los_Angeles" }
    },
    {
      "airport": { "type": "uri", "value": "http://www.wikidata.org/entity/Q8688" },
      "airportLabel": { "xml:lang": "en", "type": "literal", "value": "San Francisco International Airport" },
      "icaoCode": { "type": "literal", "value": "KSFO" },
      "timezone": { "type": "uri", "value": "http://www.wikidata.org/entity/Q7" },
      "zoneName": { "type": "literal", "value": "America/Los_Angeles" }
    },
    {
      "airport": { "type": "uri", "value": "http://www.wikidata.org/entity/Q999" },
      "airportLabel": { "xml:lang": "en", "type": "literal", "value": "Nowhere Field" },
      "icaoCode": { "type": "literal", "value": "ZZZZ" }
    }
  ] }
}"#;

const TIMEZONES: &str = r#"{
  "head": { "vars": ["timezone", "zoneName"] },
  "results": { "bindings": [
    {
      "timezone": { "type": "uri", "value": "http://www.wikidata.org/entity/Q1145939" },
      "zoneName": { "type": "literal", "value": "America/Los_Angeles" }
    },
    {
      "timezone": { "type": "uri", "value": "http://www.wikidata.org/entity/Q30894" },
      "zoneName": { "type": "literal", "value": "America/New_York" }
    }
  ] }
}"#;

// Helper to create a test command
fn airtz_cmd() -> Command {
    let mut cmd = Command::cargo_bin("airtz").unwrap();
    cmd.env_remove("AIRTZ_SPARQL_URL")
        .env_remove("AIRTZ_LIMIT")
        .env_remove("RUST_LOG");
    cmd
}

fn fixture_dir() -> Result<TempDir> {
    let temp = tempdir()?;
    fs::write(temp.path().join("wikidata_airport_icao.json"), AIRPORTS)?;
    fs::write(temp.path().join("wikidata_iana_timezone.json"), TIMEZONES)?;
    Ok(temp)
}

fn fixture_url(dir: &Path) -> String {
    format!("file://{}/", dir.display())
}

#[test]
fn test_query_command() -> Result<()> {
    airtz_cmd()
        .arg("query")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "SELECT ?airport ?airportLabel ?icaoCode ?timezone ?zoneName\n",
        ))
        .stdout(predicate::str::contains("  { ?airport wdt:P31 wd:Q1248784. }\n  UNION\n"))
        .stdout(predicate::str::contains("LIMIT").not());

    airtz_cmd()
        .args(["--limit", "25", "query", "--timezones"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("SELECT ?timezone ?zoneName\n"))
        .stdout(predicate::str::ends_with("}\nLIMIT 25\n"));

    Ok(())
}

#[test]
fn test_airports_command() -> Result<()> {
    let temp = fixture_dir()?;

    let output = airtz_cmd()
        .arg("--url")
        .arg(fixture_url(temp.path()))
        .arg("airports")
        .output()?;
    assert!(output.status.success());

    let lines: Vec<serde_json::Value> = String::from_utf8(output.stdout)?
        .lines()
        .map(serde_json::from_str)
        .collect::<std::result::Result<_, _>>()?;
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        serde_json::json!({
            "airport": "http://www.wikidata.org/entity/Q8688",
            "airportLabel": "San Francisco International Airport",
            "icaoCode": "KSFO",
            "timezone": "http://www.wikidata.org/entity/Q1145939",
            "zoneName": "America/Los_Angeles",
        })
    );
    assert!(lines[2].get("timezone").is_none());
    assert!(lines[2].get("zoneName").is_none());

    Ok(())
}

#[test]
fn test_airports_dedup() -> Result<()> {
    let temp = fixture_dir()?;

    airtz_cmd()
        .env("AIRTZ_SPARQL_URL", fixture_url(temp.path()))
        .args(["airports", "--dedup"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""icao":"KSFO""#).count(1))
        .stdout(predicate::str::contains(r#""timezone_entity":"Q1145939""#))
        .stdout(predicate::str::contains(r#""entity":"Q999""#));

    Ok(())
}

#[test]
fn test_timezones_command() -> Result<()> {
    let temp = fixture_dir()?;

    airtz_cmd()
        .arg("-u")
        .arg(fixture_url(temp.path()))
        .arg("timezones")
        .assert()
        .success()
        .stdout("America/Los_Angeles\tQ1145939\nAmerica/New_York\tQ30894\n");

    Ok(())
}

#[test]
fn test_plan_command() -> Result<()> {
    let temp = fixture_dir()?;
    let mapping = temp.path().join("icao_to_timezone.txt");
    fs::write(&mapping, "KSFO America/Los_Angeles\nZZZZ America/New_York\nEDDF ?\n")?;

    let output = airtz_cmd()
        .arg("--url")
        .arg(fixture_url(temp.path()))
        .arg("plan")
        .arg(&mapping)
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);
    let proposal: serde_json::Value = serde_json::from_str(lines[0])?;
    assert_eq!(
        proposal,
        serde_json::json!({
            "entity": "Q999",
            "icao": "ZZZZ",
            "property": "P421",
            "zone_name": "America/New_York",
            "timezone_entity": "Q30894",
            "value": { "entity-type": "item", "numeric-id": 30894 },
        })
    );

    Ok(())
}

#[test]
fn test_plan_unknown_zone_fails() -> Result<()> {
    let temp = fixture_dir()?;
    let mapping = temp.path().join("icao_to_timezone.txt");
    fs::write(&mapping, "ZZZZ Europe/Atlantis\n")?;

    airtz_cmd()
        .arg("--url")
        .arg(fixture_url(temp.path()))
        .arg("plan")
        .arg(&mapping)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Europe/Atlantis"));

    Ok(())
}

#[test]
fn test_missing_fixture_fails() -> Result<()> {
    let temp = tempdir()?;

    airtz_cmd()
        .arg("--url")
        .arg(fixture_url(temp.path()))
        .arg("airports")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to fetch airports"))
        .stderr(predicate::str::contains("wikidata_airport_icao.json"));

    Ok(())
}

#[test]
fn test_malformed_fixture_fails() -> Result<()> {
    let temp = tempdir()?;
    fs::write(temp.path().join("wikidata_airport_icao.json"), "{\"head\": ")?;

    airtz_cmd()
        .arg("--url")
        .arg(fixture_url(temp.path()))
        .arg("airports")
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed response"));

    Ok(())
}

const TIME_ZONES_TOML: &str = r#"
[pacific]
iana = "America/Los_Angeles"
utc_standard = -8
utc_daylight = -7

[eastern]
iana = "America/New_York"
utc_standard = -5
utc_daylight = -4
"#;

const DIRECTORY: &str = "\
SAN FRANCISCO INTL  (KSFO)  8 SE  UTC-8(-7DT)
NOWHERE FIELD  (ZZZZ)  2 N  UTC-5(-4DT)
  RWY 01-19: H9000X150 (ASPH)
HONOLULU INTL  (PHNL)  3 NW  UTC-10
ATLANTA INTL  (KATL)  7 S  UTC-5( 4DT)
";

#[test]
fn test_resolve_command() -> Result<()> {
    let temp = tempdir()?;
    let time_zones = temp.path().join("time_zones.toml");
    fs::write(&time_zones, TIME_ZONES_TOML)?;
    let directory = temp.path().join("directory.txt");
    fs::write(&directory, DIRECTORY)?;

    airtz_cmd()
        .arg("resolve")
        .arg("--time-zones")
        .arg(&time_zones)
        .arg(&directory)
        .assert()
        .success()
        .stdout("KSFO America/Los_Angeles\nZZZZ America/New_York\nPHNL ?\nKATL ?\n");

    airtz_cmd()
        .arg("resolve")
        .arg("-t")
        .arg(&time_zones)
        .arg("--lenient")
        .write_stdin(DIRECTORY)
        .assert()
        .success()
        .stdout(predicate::str::ends_with("KATL America/New_York\n"));

    Ok(())
}

#[test]
fn test_resolve_output_feeds_plan() -> Result<()> {
    let temp = fixture_dir()?;
    let time_zones = temp.path().join("time_zones.toml");
    fs::write(&time_zones, TIME_ZONES_TOML)?;

    let resolved = airtz_cmd()
        .arg("resolve")
        .arg("--time-zones")
        .arg(&time_zones)
        .write_stdin(DIRECTORY)
        .output()?;
    assert!(resolved.status.success());
    let mapping = temp.path().join("icao_to_timezone.txt");
    fs::write(&mapping, &resolved.stdout)?;

    airtz_cmd()
        .arg("--url")
        .arg(fixture_url(temp.path()))
        .arg("plan")
        .arg(&mapping)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""entity":"Q999""#).count(1))
        .stdout(predicate::str::contains(r#""timezone_entity":"Q30894""#));

    Ok(())
}

#[test]
fn test_resolve_bad_time_zone_table_fails() -> Result<()> {
    let temp = tempdir()?;
    let time_zones = temp.path().join("time_zones.toml");
    fs::write(&time_zones, "[pacific]\niana = \"America/Los_Angeles\"\n")?;

    airtz_cmd()
        .arg("resolve")
        .arg("--time-zones")
        .arg(&time_zones)
        .write_stdin(DIRECTORY)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to load"));

    airtz_cmd()
        .current_dir(temp.path())
        .args(["resolve", "--time-zones", "missing.toml"])
        .write_stdin(DIRECTORY)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.toml"));

    Ok(())
}

#[test]
fn test_closed_stdout_is_not_an_error() -> Result<()> {
    let temp = tempdir()?;
    let rows: Vec<String> = (0..5000)
        .map(|i| {
            format!(
                r#"{{"airport":{{"type":"uri","value":"http://www.wikidata.org/entity/Q{i}"}},
                    "airportLabel":{{"type":"literal","value":"Airfield number {i}"}},
                    "icaoCode":{{"type":"literal","value":"X{i:03}"}}}}"#
            )
        })
        .collect();
    fs::write(
        temp.path().join("wikidata_airport_icao.json"),
        format!(
            r#"{{"head":{{"vars":["airport","airportLabel","icaoCode","timezone","zoneName"]}},
                "results":{{"bindings":[{}]}}}}"#,
            rows.join(",")
        ),
    )?;

    // Far more output than a pipe buffers, so writes fail once the reader is gone
    let mut child = std::process::Command::new(assert_cmd::cargo::cargo_bin("airtz"))
        .env_remove("RUST_LOG")
        .arg("--url")
        .arg(fixture_url(temp.path()))
        .arg("airports")
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()?;
    drop(child.stdout.take());
    let output = child.wait_with_output()?;

    assert!(output.status.success(), "{:?}", output.status);
    let stderr = String::from_utf8(output.stderr)?;
    assert!(!stderr.contains("Broken pipe"), "{stderr}");

    Ok(())
}
