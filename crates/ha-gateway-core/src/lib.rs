//! Core types for the Home Assistant guest-room gateway.
//!
//! This crate provides the pieces of the gateway that do not touch the network:
//!
//! - **Identifiers**: [`Alias`], [`EntityId`] and [`Domain`]
//! - **Registry**: the immutable [`AliasRegistry`] whitelisting which entities
//!   may be addressed from outside
//! - **Commands**: validated command values such as [`CoverPercent`]
//!
//! # Example
//!
//! ```
//! use ha_gateway_core::{AliasRegistry, Domain};
//!
//! let registry = AliasRegistry::guest_room();
//!
//! let entity = registry.resolve(Domain::Light, "room_main").unwrap();
//! assert_eq!(entity.as_str(), "light.gastezimmer_licht");
//!
//! assert!(registry.resolve(Domain::Light, "garage").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod error;
pub mod ids;
pub mod registry;

pub use command::CoverPercent;
pub use error::{CoreError, Result};
pub use ids::{Alias, Domain, EntityId};
pub use registry::{AliasRegistry, AliasRegistryBuilder};
