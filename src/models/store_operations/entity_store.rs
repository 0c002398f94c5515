use crate::models::store_operations::StoreError;
use crate::models::EntityId;

/// A record that lives in an [`EntityStore`].
pub trait Entity: Clone {
    /// Human-readable kind used in errors and logs.
    const KIND: &'static str;

    fn id(&self) -> EntityId;
    fn set_id(&mut self, id: EntityId);

    /// Normalized value that must stay unique across the collection, if any.
    fn unique_key(&self) -> Option<String> {
        None
    }
}

/// Ordered in-memory collection keyed by id.
///
/// Records keep insertion order. Ids are assigned on insert and never reused,
/// even after the highest record is deleted.
#[derive(Debug, Clone)]
pub struct EntityStore<T> {
    records: Vec<T>,
    /// Wider than `EntityId` so a seed holding the largest id leaves the
    /// counter exhausted instead of wrapping.
    next_id: u64,
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> EntityStore<T> {
    pub fn new() -> Self {
        Self { records: Vec::new(), next_id: 1 }
    }

    /// Builds a store from records that already carry their ids.
    pub fn from_seed(records: Vec<T>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for record in records {
            let id = record.id();
            if store.position(id).is_some() {
                return Err(StoreError::DuplicateId { entity: T::KIND, id });
            }
            if let Some(key) = record.unique_key() {
                if store.key_taken(&key, None) {
                    return Err(StoreError::Conflict { entity: T::KIND, key });
                }
            }
            store.next_id = store.next_id.max(u64::from(id) + 1);
            store.records.push(record);
        }
        Ok(store)
    }

    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Appends `record` under a freshly assigned id. Any id on the input is ignored.
    pub fn insert(&mut self, mut record: T) -> Result<&T, StoreError> {
        if let Some(key) = record.unique_key() {
            if self.key_taken(&key, None) {
                return Err(StoreError::Conflict { entity: T::KIND, key });
            }
        }
        let id = EntityId::try_from(self.next_id)
            .map_err(|_| StoreError::Validation(format!("No {} ids left to assign", T::KIND)))?;
        record.set_id(id);
        self.next_id += 1;
        self.records.push(record);
        log::debug!("Inserted {} {}", T::KIND, id);
        Ok(&self.records[self.records.len() - 1])
    }

    /// Applies `patch` to the record with `id`. The id itself cannot be changed
    /// by the patch; a patch that would break key uniqueness is discarded.
    pub fn update_by_id<F>(&mut self, id: EntityId, patch: F) -> Result<&T, StoreError>
    where
        F: FnOnce(&mut T),
    {
        let idx = self.position(id).ok_or(StoreError::NotFound { entity: T::KIND, id })?;
        let mut updated = self.records[idx].clone();
        patch(&mut updated);
        updated.set_id(id);
        self.commit(idx, updated)
    }

    /// Full-record replacement keyed by id.
    pub fn replace(&mut self, id: EntityId, mut record: T) -> Result<&T, StoreError> {
        let idx = self.position(id).ok_or(StoreError::NotFound { entity: T::KIND, id })?;
        record.set_id(id);
        self.commit(idx, record)
    }

    pub fn delete_by_id(&mut self, id: EntityId) -> Result<T, StoreError> {
        let idx = self.position(id).ok_or(StoreError::NotFound { entity: T::KIND, id })?;
        log::debug!("Deleted {} {}", T::KIND, id);
        Ok(self.records.remove(idx))
    }

    fn commit(&mut self, idx: usize, record: T) -> Result<&T, StoreError> {
        let id = record.id();
        if let Some(key) = record.unique_key() {
            if self.key_taken(&key, Some(id)) {
                return Err(StoreError::Conflict { entity: T::KIND, key });
            }
        }
        self.records[idx] = record;
        log::debug!("Updated {} {}", T::KIND, id);
        Ok(&self.records[idx])
    }

    fn position(&self, id: EntityId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    fn key_taken(&self, key: &str, except: Option<EntityId>) -> bool {
        self.records
            .iter()
            .filter(|r| Some(r.id()) != except)
            .any(|r| r.unique_key().as_deref() == Some(key))
    }
}
