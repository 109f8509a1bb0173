//! "Located in time zone" statements for airports that lack one.
//!
//! The ICAO -> zone mapping comes from an external file, one
//! `<ICAO> <zone>` pair per line. Proposals are only computed here; writing
//! them to the wiki is left to whoever reviews them.

use std::collections::BTreeMap;

use airtz_core::{EntityId, Property};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::catalog::TimezoneCatalog;
use crate::index::IcaoIndex;
use crate::{AirtzError, Result};

/// Zone written in a mapping file when the zone of an airport is not known.
pub const UNKNOWN_ZONE: &str = "?";

/// Parses `<ICAO> <zone>` lines. Lines without a space and lines whose zone
/// is `?` are skipped; a later line for the same code replaces an earlier
/// one.
pub fn parse_icao_timezones(text: &str) -> BTreeMap<String, String> {
    let mut mapping = BTreeMap::new();
    for line in text.lines() {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some((icao, zone)) = line.split_once(' ') else {
            continue;
        };
        if zone == UNKNOWN_ZONE {
            continue;
        }
        mapping.insert(icao.to_string(), zone.to_string());
    }
    mapping
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClaimProposal {
    /// Airport item the statement is added to
    pub entity: String,
    pub icao: String,
    pub property: String,
    pub zone_name: String,
    pub timezone_entity: EntityId,
}

impl ClaimProposal {
    /// Statement value in the shape the Wikibase API expects for an item.
    pub fn value(&self) -> Value {
        json!({
            "entity-type": "item",
            "numeric-id": self.timezone_entity.numeric_id(),
        })
    }
}

/// Proposes a time zone statement for every airport in `index` without one
/// whose zone `mapping` knows.
///
/// Fails if a mapped zone has no item in `catalog`, or if its item is not a
/// `Q` id.
pub fn plan_claims(
    index: &IcaoIndex,
    mapping: &BTreeMap<String, String>,
    catalog: &TimezoneCatalog,
) -> Result<Vec<ClaimProposal>> {
    let mut proposals = Vec::new();
    for airport in index.without_time_zone() {
        let Some(zone) = mapping.get(&airport.icao) else {
            debug!(icao = %airport.icao, "no zone known");
            continue;
        };
        let entity = catalog
            .get(zone)
            .ok_or_else(|| AirtzError::UnknownTimezone(zone.clone()))?;
        let timezone_entity: EntityId = entity.parse()?;
        proposals.push(ClaimProposal {
            entity: airport.entity.clone(),
            icao: airport.icao.clone(),
            property: Property::LocatedInTimeZone.as_ref().to_string(),
            zone_name: zone.clone(),
            timezone_entity,
        });
    }
    Ok(proposals)
}
