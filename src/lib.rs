//! url-shortcuts - short codes that redirect to long URLs
//!
//! Visitors hitting `/{code}` are redirected to the stored destination with
//! campaign tracking merged into the query string; every hit on a known code
//! is recorded as a visit and feeds the per-period leaderboard.
//!
//! # Architecture
//! - `storage`: Sea-ORM backed persistence (SQLite, MySQL, PostgreSQL)
//! - `cache`: In-memory code lookup cache
//! - `analytics`: Bounded, detached visit recording
//! - `services`: Redirect resolution, leaderboard, shortcut/user management, identity
//! - `api`: HTTP routes, session auth and middleware
//! - `config`: TOML + environment configuration
//! - `runtime`: Startup, shutdown and execution modes

pub mod analytics;
pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
