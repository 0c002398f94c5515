use crate::helper::user_helpers;
use crate::models::{ActivityStatus, Permission, User};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GuardError {
    #[error("No dashboard user with email '{0}'")]
    UnknownUser(String),
    #[error("User '{0}' is inactive")]
    Inactive(String),
    #[error("User '{email}' lacks the '{required}' permission needed for {section}")]
    MissingPermission {
        email: String,
        section: Section,
        required: Permission,
    },
}

wire_enum! {
    /// Dashboard areas an acting user can reach.
    Section {
        Users => "users",
        Content => "content",
        News => "news",
        Banners => "banners",
        Homepage => "homepage",
        Popups => "popups",
        Statistics => "statistics",
        Search => "search",
    }
}

impl Section {
    pub fn required_permission(self) -> Permission {
        match self {
            Section::Users => Permission::Users,
            Section::Content => Permission::Content,
            Section::News => Permission::News,
            Section::Banners => Permission::Banners,
            Section::Homepage | Section::Popups => Permission::Homepage,
            Section::Statistics | Section::Search => Permission::Statistics,
        }
    }
}

/// Active users holding `all` or the exact tag.
pub fn has_permission(user: &User, permission: Permission) -> bool {
    user.status == ActivityStatus::Active
        && user.permissions.iter().any(|p| *p == Permission::All || *p == permission)
}

/// Resolves the acting user; unknown and inactive accounts are refused.
pub fn require_active<'a>(users: &'a [User], email: &str) -> Result<&'a User, GuardError> {
    let Some(user) = user_helpers::find_by_email(users, email) else {
        log::warn!("Denied access to unknown user '{}'", email);
        return Err(GuardError::UnknownUser(email.to_string()));
    };
    if user.status != ActivityStatus::Active {
        log::warn!("Denied access to inactive user '{}'", user.email);
        return Err(GuardError::Inactive(user.email.clone()));
    }
    Ok(user)
}

pub fn require_permission<'a>(users: &'a [User], email: &str, section: Section) -> Result<&'a User, GuardError> {
    let user = require_active(users, email)?;
    let required = section.required_permission();
    if !has_permission(user, required) {
        log::warn!("Denied {} access to '{}': missing '{}'", section, user.email, required);
        return Err(GuardError::MissingPermission {
            email: user.email.clone(),
            section,
            required,
        });
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::default_seed;
    use assert_matches::assert_matches;

    #[test]
    fn all_grants_every_section() {
        let users = default_seed().unwrap().users;
        for section in Section::ALL {
            assert!(require_permission(&users, "admin@example.com", *section).is_ok());
        }
    }

    #[test]
    fn news_editor_is_limited_to_news() {
        let users = default_seed().unwrap().users;
        assert!(require_permission(&users, "news@example.com", Section::News).is_ok());
        assert_matches!(
            require_permission(&users, "news@example.com", Section::Popups),
            Err(GuardError::MissingPermission { required: Permission::Homepage, .. })
        );
    }

    #[test]
    fn inactive_and_unknown_users_are_denied() {
        let mut users = default_seed().unwrap().users;
        users[1].status = ActivityStatus::Inactive;
        assert_matches!(require_permission(&users, "content@example.com", Section::Content), Err(GuardError::Inactive(_)));
        assert_matches!(require_permission(&users, "nobody@example.com", Section::News), Err(GuardError::UnknownUser(_)));
    }
}
