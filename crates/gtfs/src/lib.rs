//! Streaming import of GTFS schedule feeds.
//!
//! Every file of a feed is decoded lazily by an [`reader::EntityReader`], handed
//! to a [`batch::BatchInserter`] over a bounded channel and written to a
//! [`database::Database`] in batches. [`import::import`] runs this for every
//! [`data_model::EntityKind`] in order and reports one result per kind.

pub mod batch;
pub mod data_model;
pub mod database;
pub mod import;
pub mod reader;
mod serde;

pub use data_model::{Entity, EntityKind, Value};
pub use import::{import, import_all, ImportError, ImportItemsResult};
