//! Error types for alias resolution and command validation.

use thiserror::Error;

use crate::ids::Domain;

/// A result type using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by the registry and command types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The alias is not whitelisted for the domain.
    #[error("unknown {domain} alias: {alias}")]
    UnknownAlias {
        /// Domain that was searched.
        domain: Domain,
        /// Alias that was not found.
        alias: String,
    },

    /// The alias is already registered for the domain.
    #[error("duplicate {domain} alias: {alias}")]
    DuplicateAlias {
        /// Domain the alias was inserted into.
        domain: Domain,
        /// Alias that was inserted twice.
        alias: String,
    },

    /// The domain name is not one the gateway handles.
    #[error("unknown domain: {0}")]
    UnknownDomain(String),

    /// An alias must not be empty.
    #[error("alias must not be empty")]
    EmptyAlias,

    /// The entity identifier is not shaped like `domain.object_id`.
    #[error("invalid entity id: {0}")]
    InvalidEntityId(String),

    /// The entity identifier belongs to a different domain than its table.
    #[error("entity {entity_id} does not belong to domain {domain}")]
    DomainMismatch {
        /// Domain of the table being built.
        domain: Domain,
        /// Offending entity identifier.
        entity_id: String,
    },

    /// A percentage value is outside `0..=100`.
    #[error("value must be between 0 and 100, got {0}")]
    OutOfRange(i64),
}
