//! Public catalog API client for dexkeep.
//!
//! Implements the core `CatalogPort` over HTTP. Only [`DefaultCatalogClient`]
//! and its configuration are public; use the client through the port trait.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultCatalogClient is meant to be used through CatalogPort, not its
// generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultCatalogClient;

// Configuration
pub use config::{CatalogClientConfig, DEFAULT_BASE_URL};

// Errors surfaced by client construction
pub use error::CatalogHttpError;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
