use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error during `impl FromStr for EntityId`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to match \"{0}\" as entity id")]
pub struct EntityIdFromStrErr(pub String);
impl EntityIdFromStrErr {
    pub fn new(s: impl Into<String>) -> Self {
        EntityIdFromStrErr(s.into())
    }
}

/// Numeric id of a Wikibase item, written `Q<n>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u64);

impl EntityId {
    pub fn new(numeric_id: u64) -> Self {
        EntityId(numeric_id)
    }

    pub fn numeric_id(&self) -> u64 {
        self.0
    }

    /// Parses the id at the end of an entity URI such as
    /// `http://www.wikidata.org/entity/Q42`.
    pub fn from_uri(uri: &str, prefix: &str) -> Result<Self, EntityIdFromStrErr> {
        strip_entity_prefix(uri, prefix).parse()
    }
}

impl FromStr for EntityId {
    type Err = EntityIdFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('Q').ok_or_else(|| EntityIdFromStrErr::new(s))?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EntityIdFromStrErr::new(s));
        }
        digits
            .parse()
            .map(EntityId)
            .map_err(|_| EntityIdFromStrErr::new(s))
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Removes `prefix` from `uri` if present, otherwise returns `uri` unchanged.
pub fn strip_entity_prefix<'a>(uri: &'a str, prefix: &str) -> &'a str {
    uri.strip_prefix(prefix).unwrap_or(uri)
}
