//! Time zones from the UTC offsets printed in airport directories.
//!
//! A directory entry names the airport's ICAO code in parentheses and its
//! offsets further along the same line:
//!
//! ```text
//! SAN FRANCISCO INTL  (KSFO)  8 SE  UTC-8(-7DT)  N37°37.19´ W122°22.49´
//! ```
//!
//! The offsets alone do not name a zone, so they are looked up in a
//! [`TimeZoneTable`] read from TOML, one table per zone:
//!
//! ```toml
//! [pacific]
//! iana = "America/Los_Angeles"
//! utc_standard = -8
//! utc_daylight = -7
//!
//! [guam]
//! icao_match = "^PG"
//! iana = "Pacific/Guam"
//! utc_standard = 10
//! ```
//!
//! The output is the `<ICAO> <zone>` / `<ICAO> ?` text that
//! [`parse_icao_timezones`](crate::parse_icao_timezones) reads back.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::claims::UNKNOWN_ZONE;
use crate::Result;

static STRICT_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\((?P<icao>[A-Z0-9]{4})\)",
        r".+UTC",
        r"(?P<utc>[-+\x{2013}][0-9]+)",
        r"(?:\((?P<utcdst>[-+\x{2013}][0-9]+)DT\))?",
    ))
    .expect("strict directory entry pattern")
});

static LENIENT_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\((?P<icao>[A-Z0-9]{4})\)",
        r".+UTC ?",
        r"(?P<utc>[-+\x{2013}][0-9]+)",
        r"(?: ?\(",
        r"(?:(?P<utcdst>[-+\x{2013} ]?[0-9]+)|(?P<dstutc>[0-9]+[-+\x{2013}]))",
        r"(?:DT|D|T)?\))?",
    ))
    .expect("lenient directory entry pattern")
});

/// How forgiving to be about typesetting slips in directory entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EntrySyntax {
    /// Only `UTC-8` and `UTC-8(-7DT)`.
    #[default]
    Strict,
    /// Also accepts `UTC -8`, `UTC-5 (4-DT)`, `UTC-5( 4DT)`, `(-4D)` and
    /// `(-4T)`.
    Lenient,
}

impl EntrySyntax {
    fn pattern(self) -> &'static Regex {
        match self {
            EntrySyntax::Strict => &*STRICT_ENTRY,
            EntrySyntax::Lenient => &*LENIENT_ENTRY,
        }
    }

    /// Reads the ICAO code and offsets off one line of directory text.
    /// Lines that are not an entry give `None`.
    pub fn parse_line(self, line: &str) -> Option<DirectoryEntry> {
        let caps = self.pattern().captures(line)?;
        let icao = caps.name("icao")?.as_str();
        let Some(utc_standard) = caps.name("utc").and_then(|m| parse_offset(m.as_str())) else {
            warn!(icao, line, "unreadable UTC offset");
            return None;
        };
        let utc_daylight = match (caps.name("utcdst"), caps.name("dstutc")) {
            (Some(m), _) => parse_offset(m.as_str())
                // "UTC-5( 4DT)": the sign of the daylight offset got lost
                .map(|dst| if utc_standard < -2 && dst > 2 { -dst } else { dst }),
            (None, Some(m)) => parse_reversed_offset(m.as_str()),
            (None, None) => None,
        };
        Some(DirectoryEntry {
            icao: icao.to_string(),
            utc_standard,
            utc_daylight,
        })
    }
}

/// `-8`, `+10`, ` 4` or `–5` (en dash) as hours.
fn parse_offset(offset: &str) -> Option<i8> {
    let offset = offset.replace('\u{2013}', "-");
    let offset = offset
        .strip_prefix(['+', ' '])
        .unwrap_or(&offset);
    offset.parse().ok()
}

/// `4-` as `-4`.
fn parse_reversed_offset(offset: &str) -> Option<i8> {
    let sign = offset.chars().last()?;
    let digits = &offset[..offset.len() - sign.len_utf8()];
    parse_offset(&format!("{}{}", sign, digits))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub icao: String,
    pub utc_standard: i8,
    pub utc_daylight: Option<i8>,
}

/// Regex an ICAO code must match for a zone definition to apply.
#[derive(Clone, Debug)]
pub struct IcaoPattern(Regex);

impl IcaoPattern {
    pub fn is_match(&self, icao: &str) -> bool {
        self.0.is_match(icao)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq for IcaoPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for IcaoPattern {}

impl<'de> Deserialize<'de> for IcaoPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let pattern = String::deserialize(deserializer)?;
        Regex::new(&pattern)
            .map(IcaoPattern)
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TimeZoneDefinition {
    #[serde(default)]
    pub icao_match: Option<IcaoPattern>,
    pub iana: String,
    pub utc_standard: i8,
    #[serde(default)]
    pub utc_daylight: Option<i8>,
}

impl TimeZoneDefinition {
    pub fn matches(&self, entry: &DirectoryEntry) -> bool {
        if let Some(pattern) = &self.icao_match {
            if !pattern.is_match(&entry.icao) {
                return false;
            }
        }
        self.utc_standard == entry.utc_standard && self.utc_daylight == entry.utc_daylight
    }
}

/// Zone definitions keyed by a free-form name.
///
/// Definitions restricted by `icao_match` are tried before unrestricted
/// ones; within each group, by name. The first match wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeZoneTable {
    definitions: Vec<(String, TimeZoneDefinition)>,
}

impl TimeZoneTable {
    pub fn from_toml(text: &str) -> Result<Self> {
        let by_name: BTreeMap<String, TimeZoneDefinition> = toml::from_str(text)?;
        let (mut definitions, unrestricted): (Vec<_>, Vec<_>) = by_name
            .into_iter()
            .partition(|(_, def)| def.icao_match.is_some());
        definitions.extend(unrestricted);
        Ok(TimeZoneTable { definitions })
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn find(&self, entry: &DirectoryEntry) -> Option<&TimeZoneDefinition> {
        self.definitions
            .iter()
            .map(|(_, def)| def)
            .find(|def| def.matches(entry))
    }
}

/// An airport and the zone its offsets resolved to, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub icao: String,
    pub zone: Option<String>,
}

impl Display for Resolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let zone = self.zone.as_deref().unwrap_or(UNKNOWN_ZONE);
        write!(f, "{} {}", self.icao, zone)
    }
}

/// Resolves every directory entry in `text`, in line order.
pub fn resolve_directory(
    text: &str,
    table: &TimeZoneTable,
    syntax: EntrySyntax,
) -> Vec<Resolution> {
    text.lines()
        .filter_map(|line| syntax.parse_line(line))
        .map(|entry| {
            let zone = table.find(&entry).map(|def| def.iana.clone());
            if zone.is_none() {
                debug!(?entry, "no zone definition matches");
            }
            Resolution {
                icao: entry.icao,
                zone,
            }
        })
        .collect()
}
