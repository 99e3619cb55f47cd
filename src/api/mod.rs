pub mod auth;
pub mod constants;
pub mod jwt;
pub mod middleware;
pub mod services;
pub mod state;

pub use auth::{AdminUser, AuthenticatedUser};
pub use state::AppState;
