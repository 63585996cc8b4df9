//! Solar Layout API Service Library
//!
//! HTTP surface for the roof-mask-to-panel-layout pipeline, plus the thin
//! proxies the front end needs (building insights, places, backend report)
//! and the tariff and savings calculators.

pub mod billing;
pub mod config;
pub mod handlers;
pub mod pipeline;
pub mod routes;
pub mod state;
pub mod tariff_cache;
pub mod upstream;
