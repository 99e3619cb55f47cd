//! Admin API 服务模块
//!
//! Session handling and the JSON API for shortcuts and users.

pub mod auth;
mod helpers;
pub mod routes;
pub mod shortcuts;
mod types;
pub mod users;

pub use helpers::{CookieBuilder, parse_id};
pub use routes::{api_routes, auth_routes};
pub use types::*;
