use std::collections::BTreeMap;

use airtz_core::strip_entity_prefix;

use crate::record::TimezoneRecord;

/// IANA zone name to the Wikidata item standing for it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimezoneCatalog {
    zones: BTreeMap<String, String>,
}

impl TimezoneCatalog {
    /// Later rows for the same zone name replace earlier ones.
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a TimezoneRecord>,
        entity_prefix: &str,
    ) -> Self {
        let zones = records
            .into_iter()
            .map(|r| {
                (
                    r.zone_name.clone(),
                    strip_entity_prefix(&r.timezone, entity_prefix).to_string(),
                )
            })
            .collect();
        TimezoneCatalog { zones }
    }

    pub fn get(&self, zone_name: &str) -> Option<&str> {
        self.zones.get(zone_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// `(zone name, entity)` pairs sorted by zone name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.zones.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
