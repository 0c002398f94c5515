use crate::models::EntityId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: EntityId },
    #[error("{entity} with id {id} already exists")]
    DuplicateId { entity: &'static str, id: EntityId },
    #[error("{entity} '{key}' is already taken")]
    Conflict { entity: &'static str, key: String },
    #[error("Cannot move {entity} {id} from '{from}' to '{to}': {reason}")]
    IllegalTransition {
        entity: &'static str,
        id: EntityId,
        from: String,
        to: String,
        reason: String,
    },
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl From<crate::models::UnknownVariant> for StoreError {
    fn from(e: crate::models::UnknownVariant) -> Self {
        StoreError::Validation(e.to_string())
    }
}

pub mod aggregate_operations;
pub mod entity_store;
pub mod filter_operations;
pub mod status_operations;

pub use entity_store::{Entity, EntityStore};
pub use filter_operations::{FilterComposer, Searchable, Selection};
pub use status_operations::HasStatus;
