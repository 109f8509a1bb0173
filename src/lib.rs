//! airtz - airports, their ICAO codes and IANA time zones from Wikidata
//!
//! [`fetch_airports`] sends one fixed SPARQL query to the configured endpoint
//! and returns one [`AirportRecord`] per result row. The rest of the crate
//! reshapes those rows: [`IcaoIndex`] keeps one airport per ICAO code,
//! [`TimezoneCatalog`] maps IANA zone names to their Wikidata items and
//! [`plan_claims`] proposes "located in time zone" statements for airports
//! that lack one. The zones it proposes come from an `<ICAO> <zone>` file,
//! which [`resolve_directory`] derives from the UTC offsets listed in an
//! airport directory.

pub mod catalog;
pub mod claims;
pub mod fetch;
pub mod index;
pub mod prelude;
pub mod record;
pub mod resolve;
#[cfg(test)]
mod test_util;

pub use catalog::TimezoneCatalog;
pub use claims::{parse_icao_timezones, plan_claims, ClaimProposal};
pub use fetch::{fetch_airports, fetch_timezones, query_text};
pub use index::{Airport, IcaoIndex};
pub use record::{AirportRecord, TimezoneRecord};
pub use resolve::{resolve_directory, EntrySyntax, Resolution, TimeZoneTable};

pub use airtz_core::{
    EntityId, EntityIdFromStrErr, Item, Property, WIKIDATA_ENTITY_PREFIX, WIKIDATA_SPARQL_ENDPOINT,
};
pub use airtz_db::{EndpointConfig, EndpointError, SparqlClient};
pub use airtz_query::{AirportIcaoQuery, FixedQuery, IanaTimezoneQuery};

/// Error type for airtz operations
#[derive(Debug, thiserror::Error)]
pub enum AirtzError {
    #[error(transparent)]
    Db(#[from] airtz_db::Error),

    #[error("Invalid query: {0}")]
    Query(String),

    #[error("Invalid record: {0}")]
    Record(String),

    #[error("IANA time zone {0:?} unknown to Wikibase")]
    UnknownTimezone(String),

    #[error("Invalid time zone entity: {0}")]
    InvalidEntity(#[from] EntityIdFromStrErr),

    #[error("Invalid time zone table: {0}")]
    TimeZoneTable(#[from] toml::de::Error),
}

impl AirtzError {
    /// The endpoint failed or answered with something that is not a valid
    /// result set for the query.
    pub fn is_endpoint(&self) -> bool {
        match self {
            AirtzError::Db(e) => e.is_endpoint(),
            AirtzError::Record(_) => true,
            _ => false,
        }
    }

    /// The endpoint rejected the query text.
    pub fn is_query_syntax(&self) -> bool {
        matches!(self, AirtzError::Db(e) if e.is_query_syntax())
    }
}

pub type Result<T> = std::result::Result<T, AirtzError>;
