use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};

use crate::storage::models::{NewShortcut, NewUser, NewVisit, Shortcut, User, Visit};
use migration::entities::{shortcut, user, visit};

/// 将 Sea-ORM Model 转换为 Shortcut
pub fn model_to_shortcut(model: shortcut::Model) -> Shortcut {
    Shortcut {
        id: model.id,
        code: model.code,
        url: model.url,
        created_at: model.created_at,
        created_by: model.created_by,
        updated_at: model.updated_at,
        updated_by: model.updated_by,
    }
}

/// Build the insert model; both audit timestamps are `now` and the creator
/// is also the first editor.
pub fn new_shortcut_to_active_model(
    shortcut: &NewShortcut,
    now: DateTime<Utc>,
) -> shortcut::ActiveModel {
    shortcut::ActiveModel {
        id: NotSet,
        code: Set(shortcut.code.clone()),
        url: Set(shortcut.url.clone()),
        created_at: Set(now),
        created_by: Set(shortcut.created_by),
        updated_at: Set(now),
        updated_by: Set(shortcut.created_by),
    }
}

pub fn model_to_visit(model: visit::Model) -> Visit {
    Visit {
        id: model.id,
        timestamp: model.timestamp,
        shortcut_id: model.shortcut_id,
        ip_address: model.ip_address,
        path: model.path,
        referer: model.referer,
        utm_source: model.utm_source,
        user_agent: model.user_agent,
    }
}

pub fn new_visit_to_active_model(visit: NewVisit) -> visit::ActiveModel {
    visit::ActiveModel {
        id: NotSet,
        timestamp: Set(visit.timestamp),
        shortcut_id: Set(visit.shortcut_id),
        ip_address: Set(visit.ip_address),
        path: Set(visit.path),
        referer: Set(visit.referer),
        utm_source: Set(visit.utm_source),
        user_agent: Set(visit.user_agent),
    }
}

pub fn model_to_user(model: user::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        created_at: model.created_at,
        last_logged_in: model.last_logged_in,
        active: model.active,
        admin: model.admin,
    }
}

pub fn new_user_to_active_model(user: &NewUser, now: DateTime<Utc>) -> user::ActiveModel {
    user::ActiveModel {
        id: NotSet,
        name: Set(user.name.clone()),
        email: Set(user.email.clone()),
        created_at: Set(now),
        last_logged_in: Set(None),
        active: Set(user.active),
        admin: Set(user.admin),
    }
}
