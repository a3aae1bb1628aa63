//! Subway station locator server.
//!
//! Resolves the nearest subway station for a point (and optional Korean
//! address), using a station catalog sourced from the railway open-data
//! API with disk-cache and bundled fallbacks.

pub mod cache;
pub mod catalog;
pub mod domain;
pub mod geo;
pub mod locate;
pub mod web;
