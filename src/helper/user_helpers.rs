use crate::helper::form_helpers;
use crate::models::store_operations::aggregate_operations::{count_where, percentage};
use crate::models::store_operations::{FilterComposer, Selection, StoreError};
use crate::models::{ActivityStatus, User, UserRole};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub search: String,
    pub role: Selection<UserRole>,
    pub status: Selection<ActivityStatus>,
}

impl UserFilter {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, StoreError> {
        form_helpers::ensure_known_keys(params, &["role", "status"])?;
        Ok(Self {
            search: form_helpers::search_term(params),
            role: form_helpers::selection(params, "role")?,
            status: form_helpers::selection(params, "status")?,
        })
    }
}

pub fn filter_users<'a>(users: &'a [User], filter: &UserFilter) -> Vec<&'a User> {
    FilterComposer::new()
        .search(&filter.search)
        .category(&filter.role, |u: &User| u.role)
        .category(&filter.status, |u: &User| u.status)
        .apply(users)
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub active_percent: f64,
    pub by_role: BTreeMap<String, usize>,
}

pub fn user_stats(users: &[User]) -> UserStats {
    let active = count_where(users, |u| u.status == ActivityStatus::Active);
    let by_role = UserRole::ALL
        .iter()
        .map(|role| (role.to_string(), count_where(users, |u| u.role == *role)))
        .filter(|(_, n)| *n > 0)
        .collect();
    UserStats {
        total: users.len(),
        active,
        active_percent: percentage(active as u64, users.len() as u64),
        by_role,
    }
}

/// Checks the shape of a user record before it is stored.
pub fn prepare_user(mut user: User) -> Result<User, StoreError> {
    user.email = user.email.trim().to_string();
    let well_formed = match user.email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if !well_formed {
        return Err(StoreError::Validation(format!("'{}' is not a valid email address", user.email)));
    }
    if user.name.trim().is_empty() {
        return Err(StoreError::Validation("User name must not be empty".to_string()));
    }
    Ok(user)
}

pub fn find_by_email<'a>(users: &'a [User], email: &str) -> Option<&'a User> {
    let wanted = email.trim().to_lowercase();
    users.iter().find(|u| u.email.to_lowercase() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::store_operations::status_operations::toggle_status;
    use crate::models::store_operations::EntityStore;
    use crate::setup::default_seed;
    use assert_matches::assert_matches;

    fn store() -> EntityStore<User> {
        EntityStore::from_seed(default_seed().unwrap().users).unwrap()
    }

    #[test]
    fn search_covers_name_email_and_role_label() {
        let store = store();
        let by_role = UserFilter { search: "news editor".into(), ..Default::default() };
        assert_eq!(filter_users(store.list(), &by_role)[0].id, 3);

        let by_email = UserFilter { search: "CONTENT@".into(), ..Default::default() };
        assert_eq!(filter_users(store.list(), &by_email)[0].id, 2);
    }

    #[test]
    fn stats_follow_status_toggles() {
        let mut store = store();
        let now = chrono::NaiveDate::from_ymd_opt(2024, 3, 16).unwrap().and_hms_opt(0, 0, 0).unwrap();
        toggle_status(&mut store, 3, now).unwrap();
        let stats = user_stats(store.list());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.by_role.get("super_admin"), Some(&1));
        assert!(!stats.by_role.contains_key("viewer"));
    }

    #[test]
    fn email_is_unique_ignoring_case() {
        let mut store = store();
        let mut dup = store.get(2).unwrap().clone();
        dup.email = "Admin@Example.com".into();
        assert_matches!(store.insert(dup), Err(StoreError::Conflict { .. }));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut user = store().get(1).unwrap().clone();
        user.email = "not-an-address".into();
        assert_matches!(prepare_user(user), Err(StoreError::Validation(_)));
    }

    #[test]
    fn lookup_by_email_ignores_case() {
        let store = store();
        assert_eq!(find_by_email(store.list(), " NEWS@example.com").map(|u| u.id), Some(3));
        assert!(find_by_email(store.list(), "ghost@example.com").is_none());
    }
}
