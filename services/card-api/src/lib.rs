//! Weather card service library.
//!
//! Exposes the service modules so integration tests can drive the router
//! with fake providers.

pub mod config;
pub mod handlers;
pub mod icons;
pub mod metrics;
pub mod provider;
pub mod rendering;
pub mod state;
