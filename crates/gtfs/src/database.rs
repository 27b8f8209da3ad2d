use std::error;

use async_trait::async_trait;
use thiserror::Error;

use crate::data_model::{Entity, EntityKind};

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("failed to write batch of {count} {kind}: {source}")]
    Write {
        kind: EntityKind,
        count: usize,
        #[source]
        source: Box<dyn error::Error + Send + Sync>,
    },
}

impl DatabaseError {
    pub fn write<E>(kind: EntityKind, count: usize, why: E) -> Self
    where
        E: error::Error + Send + Sync + 'static,
    {
        Self::Write {
            kind,
            count,
            source: Box::new(why),
        }
    }
}

pub type Result<T> = std::result::Result<T, DatabaseError>;

/// Store the import pipeline writes into.
///
/// Implementations are cloned into the worker tasks, but only one task writes
/// at a time.
#[async_trait]
pub trait Database: Clone + Send + Sync + 'static {
    /// Persists all records of `batch` atomically: either every row is written
    /// or none is.
    async fn insert_batch<E: Entity>(&self, batch: &[E]) -> Result<()>;
}
