//! The fixed queries airtz sends.

use airtz_core::{Item, Property};

use crate::pattern::Triple;
use crate::select::SelectStatement;

/// A query with a fixed shape.
pub trait FixedQuery {
    /// Stable name of the query; the offline endpoint reads
    /// `<NAME>.json` for it.
    const NAME: &'static str;

    /// Variables every response row is expected to project.
    const VARS: &'static [&'static str];

    fn statement() -> SelectStatement;
}

/// Airports and international airports with their ICAO code, English label
/// and, where known, the IANA time zone they are located in.
pub struct AirportIcaoQuery;

impl FixedQuery for AirportIcaoQuery {
    const NAME: &'static str = "wikidata_airport_icao";
    const VARS: &'static [&'static str] =
        &["airport", "airportLabel", "icaoCode", "timezone", "zoneName"];

    fn statement() -> SelectStatement {
        SelectStatement::new()
            .vars(Self::VARS)
            .union(vec![
                vec![Triple::new("airport", Property::InstanceOf, Item::Airport)],
                vec![Triple::new(
                    "airport",
                    Property::InstanceOf,
                    Item::InternationalAirport,
                )],
            ])
            .blank_line()
            .triple(Triple::new("airport", Property::IcaoAirportCode, "icaoCode"))
            .optional(vec![
                Triple::new("airport", Property::LocatedInTimeZone, "timezone"),
                Triple::new("timezone", Property::InstanceOf, Item::IanaTimeZone),
                Triple::new("timezone", Property::IanaTimeZoneId, "zoneName"),
            ])
            .label_service("en")
    }
}

/// Every item standing for an IANA time zone, with its zone name.
pub struct IanaTimezoneQuery;

impl FixedQuery for IanaTimezoneQuery {
    const NAME: &'static str = "wikidata_iana_timezone";
    const VARS: &'static [&'static str] = &["timezone", "zoneName"];

    fn statement() -> SelectStatement {
        SelectStatement::new()
            .vars(Self::VARS)
            .triple(Triple::new("timezone", Property::InstanceOf, Item::IanaTimeZone))
            .triple(Triple::new("timezone", Property::IanaTimeZoneId, "zoneName"))
    }
}
