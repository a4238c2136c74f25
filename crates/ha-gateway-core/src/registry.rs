//! The alias whitelist.
//!
//! Only entities registered here can be addressed through the gateway. The
//! registry is assembled once with [`AliasRegistryBuilder`] and never mutated
//! afterwards, so it can be shared between request handlers without locking.

use std::collections::BTreeMap;

use crate::error::{CoreError, Result};
use crate::ids::{Alias, Domain, EntityId};

/// Light aliases of the guest room.
const GUEST_ROOM_LIGHTS: &[(&str, &str)] = &[
    ("ceiling", "light.guest_room_ceiling"),
    ("lamp", "light.guest_room_lamp"),
    ("room_main", "light.gastezimmer_licht"),
];

/// Cover aliases of the guest room.
const GUEST_ROOM_COVERS: &[(&str, &str)] = &[
    (AliasRegistry::BLIND_ALIAS, "cover.guest_room_blinds"),
    ("shade", "cover.guest_room_shade"),
];

/// Immutable mapping from domain to alias to entity identifier.
#[derive(Debug, Clone, Default)]
pub struct AliasRegistry {
    tables: BTreeMap<Domain, BTreeMap<Alias, EntityId>>,
}

impl AliasRegistry {
    /// Alias of the cover driven by the blind endpoints.
    pub const BLIND_ALIAS: &'static str = "blinds";

    /// Start building a registry.
    #[must_use]
    pub fn builder() -> AliasRegistryBuilder {
        AliasRegistryBuilder::default()
    }

    /// The canonical guest-room whitelist.
    ///
    /// # Panics
    ///
    /// Panics if the built-in table is malformed. The table is a constant and
    /// covered by tests, so this cannot happen at runtime.
    #[must_use]
    pub fn guest_room() -> Self {
        Self::from_tables(GUEST_ROOM_LIGHTS, GUEST_ROOM_COVERS)
            .expect("built-in guest room alias table is valid")
    }

    /// Build a registry from literal light and cover tables.
    ///
    /// # Errors
    ///
    /// Returns an error if any alias is duplicated or any entity id is
    /// malformed or filed under the wrong domain.
    pub fn from_tables(lights: &[(&str, &str)], covers: &[(&str, &str)]) -> Result<Self> {
        let mut builder = Self::builder();
        for (alias, entity_id) in lights {
            builder = builder.insert(Domain::Light, *alias, *entity_id)?;
        }
        for (alias, entity_id) in covers {
            builder = builder.insert(Domain::Cover, *alias, *entity_id)?;
        }
        Ok(builder.build())
    }

    /// Resolve an alias to its entity identifier.
    ///
    /// Matching is exact: no case folding, no prefix matching.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownAlias`] if the alias is not whitelisted for
    /// `domain`.
    pub fn resolve(&self, domain: Domain, alias: &str) -> Result<&EntityId> {
        self.tables
            .get(&domain)
            .and_then(|table| table.get(alias))
            .ok_or_else(|| CoreError::UnknownAlias {
                domain,
                alias: alias.to_string(),
            })
    }

    /// All aliases of a domain in lexicographic order.
    pub fn list_aliases(&self, domain: Domain) -> impl Iterator<Item = &Alias> + '_ {
        self.tables.get(&domain).into_iter().flat_map(BTreeMap::keys)
    }

    /// Number of aliases registered for a domain.
    #[must_use]
    pub fn len(&self, domain: Domain) -> usize {
        self.tables.get(&domain).map_or(0, BTreeMap::len)
    }

    /// Returns `true` if no aliases are registered in any domain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.values().all(BTreeMap::is_empty)
    }
}

/// Builder for [`AliasRegistry`].
#[derive(Debug, Default)]
pub struct AliasRegistryBuilder {
    tables: BTreeMap<Domain, BTreeMap<Alias, EntityId>>,
}

impl AliasRegistryBuilder {
    /// Register an alias.
    ///
    /// # Errors
    ///
    /// Returns an error if the alias is empty or already registered for
    /// `domain`, or if `entity_id` is malformed or has a different domain
    /// prefix.
    pub fn insert(
        mut self,
        domain: Domain,
        alias: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Result<Self> {
        let alias = Alias::new(alias)?;
        let entity_id = EntityId::parse(entity_id)?;

        if entity_id.domain_prefix() != domain.as_str() {
            return Err(CoreError::DomainMismatch {
                domain,
                entity_id: entity_id.into(),
            });
        }

        let table = self.tables.entry(domain).or_default();
        if table.contains_key(alias.as_str()) {
            return Err(CoreError::DuplicateAlias {
                domain,
                alias: alias.into(),
            });
        }
        table.insert(alias, entity_id);

        Ok(self)
    }

    /// Freeze the registry.
    #[must_use]
    pub fn build(self) -> AliasRegistry {
        AliasRegistry {
            tables: self.tables,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_room_table_is_valid() {
        let registry = AliasRegistry::guest_room();
        assert_eq!(registry.len(Domain::Light), GUEST_ROOM_LIGHTS.len());
        assert_eq!(registry.len(Domain::Cover), GUEST_ROOM_COVERS.len());
    }

    #[test]
    fn resolve_known_alias() {
        let registry = AliasRegistry::guest_room();
        let entity = registry.resolve(Domain::Light, "room_main").unwrap();
        assert_eq!(entity.as_str(), "light.gastezimmer_licht");

        // Same answer every time.
        let again = registry.resolve(Domain::Light, "room_main").unwrap();
        assert_eq!(entity, again);
    }

    #[test]
    fn resolve_every_configured_alias() {
        let registry = AliasRegistry::guest_room();
        for (alias, entity_id) in GUEST_ROOM_LIGHTS {
            assert_eq!(registry.resolve(Domain::Light, alias).unwrap().as_str(), *entity_id);
        }
        for (alias, entity_id) in GUEST_ROOM_COVERS {
            assert_eq!(registry.resolve(Domain::Cover, alias).unwrap().as_str(), *entity_id);
        }
    }

    #[test]
    fn resolve_is_exact_match() {
        let registry = AliasRegistry::guest_room();
        for alias in ["ROOM_MAIN", "room", "room_main ", ""] {
            assert!(matches!(
                registry.resolve(Domain::Light, alias),
                Err(CoreError::UnknownAlias { .. })
            ));
        }
    }

    #[test]
    fn domains_are_separate() {
        let registry = AliasRegistry::guest_room();
        assert!(registry.resolve(Domain::Cover, "room_main").is_err());
        assert!(registry.resolve(Domain::Light, AliasRegistry::BLIND_ALIAS).is_err());
    }

    #[test]
    fn list_aliases_sorted() {
        let registry = AliasRegistry::builder()
            .insert(Domain::Light, "zeta", "light.z")
            .unwrap()
            .insert(Domain::Light, "alpha", "light.a")
            .unwrap()
            .insert(Domain::Light, "Mid", "light.m")
            .unwrap()
            .build();

        let aliases: Vec<&str> = registry.list_aliases(Domain::Light).map(Alias::as_str).collect();
        assert_eq!(aliases, vec!["Mid", "alpha", "zeta"]);
        assert_eq!(registry.list_aliases(Domain::Cover).count(), 0);
    }

    #[test]
    fn duplicate_alias_rejected() {
        let result = AliasRegistry::builder()
            .insert(Domain::Light, "desk", "light.a")
            .unwrap()
            .insert(Domain::Light, "desk", "light.b");
        assert!(matches!(result, Err(CoreError::DuplicateAlias { .. })));
    }

    #[test]
    fn same_alias_in_two_domains() {
        let registry = AliasRegistry::builder()
            .insert(Domain::Light, "window", "light.window")
            .unwrap()
            .insert(Domain::Cover, "window", "cover.window")
            .unwrap()
            .build();
        assert_eq!(registry.resolve(Domain::Cover, "window").unwrap().as_str(), "cover.window");
    }

    #[test]
    fn domain_mismatch_rejected() {
        let result = AliasRegistry::builder().insert(Domain::Light, "blinds", "cover.blinds");
        assert!(matches!(result, Err(CoreError::DomainMismatch { .. })));
    }

    #[test]
    fn empty_registry() {
        let registry = AliasRegistry::builder().build();
        assert!(registry.is_empty());
        assert!(registry.resolve(Domain::Cover, AliasRegistry::BLIND_ALIAS).is_err());
    }
}
