use crate::models::status::Lifecycle;
use crate::models::store_operations::{Entity, EntityStore, StoreError};
use crate::models::EntityId;
use chrono::NaiveDateTime;

/// Records whose status field follows a [`Lifecycle`].
pub trait HasStatus: Entity {
    type Status: Lifecycle;

    fn status(&self) -> Self::Status;
    fn set_status(&mut self, status: Self::Status);

    /// Date checks that must pass before entering `next` at `now`.
    fn check_window(&self, _next: Self::Status, _now: NaiveDateTime) -> Result<(), String> {
        Ok(())
    }
}

/// Flips the record between the two members of its toggle pair.
pub fn toggle_status<T: HasStatus>(
    store: &mut EntityStore<T>,
    id: EntityId,
    now: NaiveDateTime,
) -> Result<&T, StoreError> {
    let current = current_status(store, id)?;
    let next = current.toggled().ok_or_else(|| {
        illegal::<T>(id, current, current, "status is outside the toggle pair; use an explicit transition")
    })?;
    transition_status(store, id, next, now)
}

/// Moves the record to `next` if the transition table and date window allow it.
pub fn transition_status<T: HasStatus>(
    store: &mut EntityStore<T>,
    id: EntityId,
    next: T::Status,
    now: NaiveDateTime,
) -> Result<&T, StoreError> {
    let record = store.get(id).ok_or(StoreError::NotFound { entity: T::KIND, id })?;
    let current = record.status();
    if !current.can_transition_to(next) {
        log::warn!("Rejected {} {} transition {} -> {}", T::KIND, id, current, next);
        return Err(illegal::<T>(id, current, next, "transition not allowed"));
    }
    if current != next {
        if let Err(reason) = record.check_window(next, now) {
            log::warn!("Rejected {} {} transition {} -> {}: {}", T::KIND, id, current, next, reason);
            return Err(illegal::<T>(id, current, next, &reason));
        }
    }
    store.update_by_id(id, |r| r.set_status(next))
}

/// Checks that a record about to be inserted may start in its status at `now`.
pub fn admit_new<T: HasStatus>(record: &T, now: NaiveDateTime) -> Result<(), StoreError> {
    let status = record.status();
    record.check_window(status, now).map_err(|reason| {
        log::warn!("Rejected new {} starting as {}: {}", T::KIND, status, reason);
        StoreError::Validation(format!("A new {} cannot start as '{}': {}", T::KIND, status, reason))
    })
}

/// Full-record replacement that still honours the lifecycle: the incoming
/// status must be reachable from the stored one and pass its date window.
pub fn replace_record<T: HasStatus>(
    store: &mut EntityStore<T>,
    id: EntityId,
    record: T,
    now: NaiveDateTime,
) -> Result<&T, StoreError> {
    let current = current_status(store, id)?;
    let next = record.status();
    if !current.can_transition_to(next) {
        log::warn!("Rejected {} {} replacement {} -> {}", T::KIND, id, current, next);
        return Err(illegal::<T>(id, current, next, "transition not allowed"));
    }
    if current != next {
        if let Err(reason) = record.check_window(next, now) {
            log::warn!("Rejected {} {} replacement {} -> {}: {}", T::KIND, id, current, next, reason);
            return Err(illegal::<T>(id, current, next, &reason));
        }
    }
    store.replace(id, record)
}

fn current_status<T: HasStatus>(store: &EntityStore<T>, id: EntityId) -> Result<T::Status, StoreError> {
    store
        .get(id)
        .map(HasStatus::status)
        .ok_or(StoreError::NotFound { entity: T::KIND, id })
}

fn illegal<T: HasStatus>(id: EntityId, from: T::Status, to: T::Status, reason: &str) -> StoreError {
    StoreError::IllegalTransition {
        entity: T::KIND,
        id,
        from: from.to_string(),
        to: to.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::status::{ActivityStatus, PopupStatus};
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    #[derive(Debug, Clone, PartialEq)]
    struct Switch {
        id: EntityId,
        status: ActivityStatus,
    }

    impl Entity for Switch {
        const KIND: &'static str = "switch";
        fn id(&self) -> EntityId {
            self.id
        }
        fn set_id(&mut self, id: EntityId) {
            self.id = id;
        }
    }

    impl HasStatus for Switch {
        type Status = ActivityStatus;
        fn status(&self) -> ActivityStatus {
            self.status
        }
        fn set_status(&mut self, status: ActivityStatus) {
            self.status = status;
        }
    }

    #[derive(Debug, Clone)]
    struct Timed {
        id: EntityId,
        status: PopupStatus,
        opens: NaiveDateTime,
    }

    impl Entity for Timed {
        const KIND: &'static str = "timed";
        fn id(&self) -> EntityId {
            self.id
        }
        fn set_id(&mut self, id: EntityId) {
            self.id = id;
        }
    }

    impl HasStatus for Timed {
        type Status = PopupStatus;
        fn status(&self) -> PopupStatus {
            self.status
        }
        fn set_status(&mut self, status: PopupStatus) {
            self.status = status;
        }
        fn check_window(&self, next: PopupStatus, now: NaiveDateTime) -> Result<(), String> {
            if next == PopupStatus::Active && now < self.opens {
                return Err("not open yet".into());
            }
            Ok(())
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 16).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn switches() -> EntityStore<Switch> {
        EntityStore::from_seed(vec![
            Switch { id: 1, status: ActivityStatus::Active },
            Switch { id: 2, status: ActivityStatus::Inactive },
        ])
        .unwrap()
    }

    #[test]
    fn toggling_active_record_deactivates_it() {
        let mut store = switches();
        toggle_status(&mut store, 1, now()).unwrap();
        assert!(store.list().iter().all(|s| s.status == ActivityStatus::Inactive));
    }

    #[test]
    fn toggling_twice_restores_status() {
        let mut store = switches();
        toggle_status(&mut store, 2, now()).unwrap();
        toggle_status(&mut store, 2, now()).unwrap();
        assert_eq!(store.get(2).unwrap().status, ActivityStatus::Inactive);
    }

    #[test]
    fn toggling_missing_record_is_not_found() {
        let mut store = switches();
        assert_matches!(toggle_status(&mut store, 5, now()), Err(StoreError::NotFound { id: 5, .. }));
    }

    #[test]
    fn third_state_cannot_be_toggled() {
        let opens = now();
        let mut store = EntityStore::from_seed(vec![Timed { id: 1, status: PopupStatus::Scheduled, opens }]).unwrap();
        assert_matches!(toggle_status(&mut store, 1, now()), Err(StoreError::IllegalTransition { .. }));
        assert_eq!(store.get(1).unwrap().status, PopupStatus::Scheduled);
    }

    #[test]
    fn window_guard_blocks_early_activation() {
        let opens = now() + chrono::Duration::days(1);
        let mut store = EntityStore::from_seed(vec![Timed { id: 1, status: PopupStatus::Scheduled, opens }]).unwrap();
        let err = transition_status(&mut store, 1, PopupStatus::Active, now()).unwrap_err();
        assert_matches!(err, StoreError::IllegalTransition { ref reason, .. } if reason == "not open yet");
        transition_status(&mut store, 1, PopupStatus::Active, opens).unwrap();
        assert_eq!(store.get(1).unwrap().status, PopupStatus::Active);
    }

    #[test]
    fn new_record_must_fit_its_window() {
        let opens = now() + chrono::Duration::days(1);
        let early = Timed { id: 0, status: PopupStatus::Active, opens };
        assert_matches!(admit_new(&early, now()), Err(StoreError::Validation(_)));
        assert!(admit_new(&early, opens).is_ok());
        assert!(admit_new(&Timed { status: PopupStatus::Scheduled, ..early }, now()).is_ok());
    }

    #[test]
    fn replacement_follows_the_transition_table() {
        let opens = now();
        let mut store = EntityStore::from_seed(vec![Timed { id: 1, status: PopupStatus::Active, opens }]).unwrap();
        let jump = Timed { id: 1, status: PopupStatus::Scheduled, opens };
        assert_matches!(replace_record(&mut store, 1, jump, now()), Err(StoreError::IllegalTransition { .. }));
        assert_eq!(store.get(1).unwrap().status, PopupStatus::Active);

        let later = opens + chrono::Duration::hours(2);
        let moved = Timed { id: 9, status: PopupStatus::Active, opens: later };
        let replaced = replace_record(&mut store, 1, moved, now()).unwrap();
        assert_eq!((replaced.id, replaced.opens), (1, later));

        let missing = Timed { id: 0, status: PopupStatus::Active, opens };
        assert_matches!(replace_record(&mut store, 7, missing, now()), Err(StoreError::NotFound { id: 7, .. }));
    }

    #[test]
    fn table_rejects_skipping_states() {
        let opens = now();
        let mut store = EntityStore::from_seed(vec![Timed { id: 1, status: PopupStatus::Active, opens }]).unwrap();
        assert_matches!(
            transition_status(&mut store, 1, PopupStatus::Scheduled, now()),
            Err(StoreError::IllegalTransition { .. })
        );
    }
}
