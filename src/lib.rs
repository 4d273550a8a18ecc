//! matchday library
//!
//! Fetch-with-fallback caching for football data upstreams, plus the
//! resource catalogue and CLI plumbing used by the `matchday` binary.

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod fetch;
