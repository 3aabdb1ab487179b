//! Authgate Library
//!
//! Exposes the authentication core, the HTTP surface, and configuration for
//! use by the server binary and the integration tests.

pub mod api;
pub mod auth;
pub mod config;
pub mod middleware;
