//! Identifier types for whitelisted entities.
//!
//! An [`Alias`] is the public name a caller uses; an [`EntityId`] is the
//! Home Assistant identifier it stands for. The two are never interchangeable,
//! so they are distinct types.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Category of controllable device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Lights, switched on and off.
    Light,
    /// Covers such as blinds and shades, positioned by percentage.
    Cover,
}

impl Domain {
    /// Every domain the gateway knows about.
    pub const ALL: [Self; 2] = [Self::Light, Self::Cover];

    /// Name of the domain as used in Home Assistant service paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Cover => "cover",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "cover" => Ok(Self::Cover),
            other => Err(CoreError::UnknownDomain(other.to_string())),
        }
    }
}

/// Public-facing short name for a device.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alias(String);

impl Alias {
    /// Create an alias.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyAlias`] if `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CoreError::EmptyAlias);
        }
        Ok(Self(name))
    }

    /// Borrow the alias as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Alias {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Alias {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Alias> for String {
    fn from(alias: Alias) -> Self {
        alias.0
    }
}

/// Home Assistant entity identifier, shaped `domain.object_id`.
///
/// The gateway forwards it verbatim; the shape check only guards the static
/// alias table against typos.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Parse an entity identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidEntityId`] unless the value is a non-empty
    /// domain, a single `.`, and a non-empty object id.
    pub fn parse(value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        match value.split_once('.') {
            Some((domain, object_id))
                if !domain.is_empty() && !object_id.is_empty() && !object_id.contains('.') =>
            {
                Ok(Self(value))
            }
            _ => Err(CoreError::InvalidEntityId(value)),
        }
    }

    /// The domain prefix, e.g. `light` for `light.kitchen`.
    #[must_use]
    pub fn domain_prefix(&self) -> &str {
        self.0.split_once('.').map_or("", |(domain, _)| domain)
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EntityId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_names() {
        assert_eq!(Domain::Light.as_str(), "light");
        assert_eq!(Domain::Cover.to_string(), "cover");
        assert_eq!("cover".parse::<Domain>().unwrap(), Domain::Cover);
        assert!("switch".parse::<Domain>().is_err());
    }

    #[test]
    fn entity_id_shape() {
        let id = EntityId::parse("light.gastezimmer_licht").unwrap();
        assert_eq!(id.domain_prefix(), "light");
        assert_eq!(id.as_str(), "light.gastezimmer_licht");

        for bad in ["", "light", ".licht", "light.", "light.a.b"] {
            assert!(
                matches!(EntityId::parse(bad), Err(CoreError::InvalidEntityId(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn empty_alias_rejected() {
        assert_eq!(Alias::new(""), Err(CoreError::EmptyAlias));
        assert_eq!(Alias::new("desk").unwrap().as_str(), "desk");
    }

    #[test]
    fn entity_id_serde_json() {
        let id = EntityId::parse("cover.guest_room_blinds").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"cover.guest_room_blinds\"");

        let err = serde_json::from_str::<EntityId>("\"nodot\"");
        assert!(err.is_err());
    }
}
