//! HTTP request handlers.
//!
//! This module contains all the endpoint handlers for the gateway API.

pub mod blinds;
pub mod fallback;
pub mod health;
pub mod lights;
pub mod passthrough;
