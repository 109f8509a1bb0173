use airtz_core::SparqlResults;

use crate::record::{AirportRecord, TimezoneRecord};

pub const ENTITY_PREFIX: &str = "http://www.wikidata.org/entity/";

/// Airport query response: KSFO with a time zone, ZZZZ without, LFPG linked
/// to two time zone items.
pub const AIRPORTS_JSON: &str = r#"{
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
      "airport": { "type": "uri", "value": "http://www.wikidata.org/entity/Q999" },
      "airportLabel": { "xml:lang": "en", "type": "literal", "value": "Nowhere Field" },
      "icaoCode": { "type": "literal", "value": "ZZZZ" }
    },
    {
      "airport": { "type": "uri", "value": "http://www.wikidata.org/entity/Q46185" },
      "airportLabel": { "xml:lang": "en", "type": "literal", "value": "Paris Charles de Gaulle Airport" },
      "icaoCode": { "type": "literal", "value": "LFPG" },
      "timezone": { "type": "uri", "value": "http://www.wikidata.org/entity/Q1048" },
      "zoneName": { "type": "literal", "value": "Europe/Paris" }
    },
    {
      "airport": { "type": "uri", "value": "http://www.wikidata.org/entity/Q46185" },
      "airportLabel": { "xml:lang": "en", "type": "literal", "value": "Paris Charles de Gaulle Airport" },
      "icaoCode": { "type": "literal", "value": "LFPG" },
      "timezone": { "type": "uri", "value": "http://www.wikidata.org/entity/Q5410014" },
      "zoneName": { "type": "literal", "value": "Europe/Paris" }
    },
    {
      "airport": { "type": "uri", "value": "http://www.wikidata.org/entity/Q8685" },
      "airportLabel": { "type": "literal", "value": "Q8685" },
      "icaoCode": { "type": "literal", "value": "KJFK" }
    }
  ] }
}"#;

pub const TIMEZONES_JSON: &str = r#"{
  "head": { "vars": ["timezone", "zoneName"] },
  "results": { "bindings": [
    {
      "timezone": { "type": "uri", "value": "http://www.wikidata.org/entity/Q1145939" },
      "zoneName": { "type": "literal", "value": "America/Los_Angeles" }
    },
    {
      "timezone": { "type": "uri", "value": "http://www.wikidata.org/entity/Q1048" },
      "zoneName": { "type": "literal", "value": "Europe/Paris" }
    },
    {
      "timezone": { "type": "uri", "value": "http://www.wikidata.org/entity/Q30894" },
      "zoneName": { "type": "literal", "value": "America/New_York" }
    }
  ] }
}"#;

fn rows<T: serde::de::DeserializeOwned>(body: &str) -> Vec<T> {
    let results: SparqlResults = serde_json::from_str(body).unwrap();
    results
        .into_rows()
        .into_iter()
        .map(|row| serde_json::from_value(row).unwrap())
        .collect()
}

pub fn airport_records() -> Vec<AirportRecord> {
    rows(AIRPORTS_JSON)
}

pub fn timezone_records() -> Vec<TimezoneRecord> {
    rows(TIMEZONES_JSON)
}

pub fn ksfo() -> AirportRecord {
    AirportRecord {
        airport: "http://www.wikidata.org/entity/Q8688".into(),
        airport_label: "San Francisco International Airport".into(),
        icao_code: "KSFO".into(),
        timezone: Some("http://www.wikidata.org/entity/Q1145939".into()),
        zone_name: Some("America/Los_Angeles".into()),
    }
}
