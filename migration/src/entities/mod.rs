pub mod shortcut;
pub mod user;
pub mod visit;

pub use shortcut::Entity as ShortcutEntity;
pub use user::Entity as UserEntity;
pub use visit::Entity as VisitEntity;
