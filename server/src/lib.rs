//! Employee records HTTP server: configuration, router and seed loading.

pub mod config;
pub mod http;
pub mod seed;
