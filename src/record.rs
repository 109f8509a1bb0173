use serde::{Deserialize, Serialize};

use crate::{AirtzError, Result};

/// One row of the airport query.
///
/// Rows are not unique: an airport with two ICAO codes, or linked to two
/// time zone items, comes back once per combination.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportRecord {
    /// Entity URI
    pub airport: String,
    /// English label, or the entity id when the item has none
    pub airport_label: String,
    pub icao_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_name: Option<String>,
}

impl AirportRecord {
    /// Checks the guarantees the query makes about every row.
    pub fn validate(&self) -> Result<()> {
        if self.icao_code.is_empty() {
            return Err(AirtzError::Record(format!(
                "{} has an empty ICAO code",
                self.airport
            )));
        }
        if self.timezone.is_some() != self.zone_name.is_some() {
            return Err(AirtzError::Record(format!(
                "{} ({}) has a time zone item without a zone name or vice versa",
                self.airport, self.icao_code
            )));
        }
        Ok(())
    }

    /// Time zone item and IANA zone name, when the airport has both.
    pub fn time_zone(&self) -> Option<(&str, &str)> {
        match (&self.timezone, &self.zone_name) {
            (Some(item), Some(name)) => Some((item.as_str(), name.as_str())),
            _ => None,
        }
    }
}

/// One row of the IANA time zone query.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneRecord {
    pub timezone: String,
    pub zone_name: String,
}
