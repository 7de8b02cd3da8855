//! Travelsrv - travel destinations and points of interest over HTTP
//!
//! This library wraps the public countries and points-of-interest APIs behind
//! typed clients, derives destination cards from them, caches query results
//! per key and exposes the lot, together with persisted user preferences, as
//! a JSON API.

pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod models;
pub mod query;
pub mod services;
