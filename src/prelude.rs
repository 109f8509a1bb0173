pub use super::catalog::TimezoneCatalog;
pub use super::claims::{parse_icao_timezones, plan_claims, ClaimProposal};
pub use super::fetch::{fetch_airports, fetch_timezones};
pub use super::index::{Airport, IcaoIndex};
pub use super::record::{AirportRecord, TimezoneRecord};
pub use super::resolve::{resolve_directory, EntrySyntax, Resolution, TimeZoneTable};
pub use super::{AirtzError, Result};
pub use airtz_core::{EntityId, Item, Property};
pub use airtz_db::{EndpointConfig, SparqlClient};
