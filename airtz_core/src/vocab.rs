//! Wikidata items and properties the airport queries are written against.
//!
//! The identifiers are opaque to the graph; the variant names only exist to
//! keep the query definitions readable.

use std::fmt::{self, Display, Formatter};

use strum::{AsRefStr, EnumIter, EnumString, IntoStaticStr};

/// Default prefix of entity URIs returned by the Wikidata query service.
pub const WIKIDATA_ENTITY_PREFIX: &str = "http://www.wikidata.org/entity/";

/// Default Wikidata SPARQL endpoint.
pub const WIKIDATA_SPARQL_ENDPOINT: &str = "https://query.wikidata.org/sparql";

/// Namespace prefixes predeclared by the Wikidata query service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Prefix {
    /// Entities
    Wd,
    /// Direct ("truthy") properties
    Wdt,
    Wikibase,
    Bd,
}

impl Display for Prefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Classes and other items referenced by the queries.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    IntoStaticStr,
    EnumIter,
    EnumString,
)]
pub enum Item {
    #[strum(serialize = "Q1248784")]
    Airport,
    #[strum(serialize = "Q644371")]
    InternationalAirport,
    /// "IANA time zone identifier", the class of items standing for a zone
    #[strum(serialize = "Q17272692")]
    IanaTimeZone,
}

impl Display for Item {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", Prefix::Wd, self.as_ref())
    }
}

/// Properties referenced by the queries.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    IntoStaticStr,
    EnumIter,
    EnumString,
)]
pub enum Property {
    #[strum(serialize = "P31")]
    InstanceOf,
    #[strum(serialize = "P239")]
    IcaoAirportCode,
    #[strum(serialize = "P421")]
    LocatedInTimeZone,
    /// Zone name of an IANA time zone item, e.g. `Europe/Paris`
    #[strum(serialize = "P6687")]
    IanaTimeZoneId,
}

impl Display for Property {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", Prefix::Wdt, self.as_ref())
    }
}
