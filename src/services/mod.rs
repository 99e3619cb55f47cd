//! Service layer for business logic
//!
//! Handlers and the CLI go through these services instead of touching the
//! store directly.

pub mod identity;
mod leaderboard;
mod resolver;
mod shortcut_service;
mod user_service;

pub use identity::{IdentityInfo, IdentityProvider, OAuthIdentityProvider};
pub use leaderboard::{LEADERBOARD_SIZE, LeaderboardService, Period, TopShortcutsReport};
pub use resolver::{RedirectResolver, Resolution, build_destination};
pub use shortcut_service::{ShortcutInput, ShortcutService};
pub use user_service::{UserInput, UserService};
