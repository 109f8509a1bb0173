use std::collections::btree_map::{self, BTreeMap};

use airtz_core::strip_entity_prefix;
use serde::Serialize;

use crate::record::AirportRecord;

/// An airport as kept by [`IcaoIndex`], ids stripped to their `Q` form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Airport {
    pub entity: String,
    pub icao: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone_entity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone_name: Option<String>,
}

impl Airport {
    pub fn from_record(record: &AirportRecord, entity_prefix: &str) -> Self {
        Airport {
            entity: strip_entity_prefix(&record.airport, entity_prefix).to_string(),
            icao: record.icao_code.clone(),
            name: record.airport_label.clone(),
            timezone_entity: record
                .timezone
                .as_deref()
                .map(|tz| strip_entity_prefix(tz, entity_prefix).to_string()),
            timezone_name: record.zone_name.clone(),
        }
    }
}

/// One airport per ICAO code, ordered by code.
///
/// When the query returns several rows for a code, the first row wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IcaoIndex {
    airports: BTreeMap<String, Airport>,
}

impl IcaoIndex {
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a AirportRecord>,
        entity_prefix: &str,
    ) -> Self {
        let mut airports = BTreeMap::new();
        for record in records {
            airports
                .entry(record.icao_code.clone())
                .or_insert_with(|| Airport::from_record(record, entity_prefix));
        }
        IcaoIndex { airports }
    }

    pub fn get(&self, icao: &str) -> Option<&Airport> {
        self.airports.get(icao)
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    pub fn iter(&self) -> btree_map::Values<'_, String, Airport> {
        self.airports.values()
    }

    /// Airports with no time zone item, in ICAO order.
    pub fn without_time_zone(&self) -> impl Iterator<Item = &Airport> {
        self.iter().filter(|a| a.timezone_entity.is_none())
    }
}

impl<'a> IntoIterator for &'a IcaoIndex {
    type Item = &'a Airport;
    type IntoIter = btree_map::Values<'a, String, Airport>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
