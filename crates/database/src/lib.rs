use std::path::PathBuf;

use async_trait::async_trait;
use gtfs::{
    database::{Database, DatabaseError},
    Entity, EntityKind,
};
use sqlx::{
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

pub mod queries;
pub mod trim;

pub use trim::{TrimError, TrimItemsResult, TrimResult};

pub struct DatabaseConnectionInfo {
    pub path: PathBuf,
    /// Create the database file if it does not exist yet.
    pub create_if_missing: bool,
}

impl DatabaseConnectionInfo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_if_missing: false,
        }
    }

    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    fn sqlite_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(self.create_if_missing)
    }
}

/// GTFS store backed by SQLite.
///
/// The pool holds a single connection, so there is never more than one writer.
#[derive(Clone)]
pub struct SqliteDatabase {
    connection: SqlitePool,
}

impl SqliteDatabase {
    pub async fn connect(
        database_connection_info: DatabaseConnectionInfo,
    ) -> Result<Self, sqlx::Error> {
        log::debug!(
            "opening database {}",
            database_connection_info.path.display()
        );
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(database_connection_info.sqlite_options())
            .await?;

        Ok(Self { connection: pool })
    }

    /// An empty database living as long as the returned handle and its clones.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Ok(Self { connection: pool })
    }

    /// Creates the GTFS tables if they do not exist yet.
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations").run(&self.connection).await
    }

    /// Number of stored records of `kind`.
    pub async fn count(&self, kind: EntityKind) -> Result<u64, sqlx::Error> {
        queries::count(&self.connection, kind.table_name()).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.connection
    }

    pub async fn close(&self) {
        self.connection.close().await
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn insert_batch<E: Entity>(&self, batch: &[E]) -> gtfs::database::Result<()> {
        let convert_error = |why: sqlx::Error| DatabaseError::write(E::KIND, batch.len(), why);

        let mut tx = self.connection.begin().await.map_err(convert_error)?;
        queries::insert_all(&mut *tx, batch)
            .await
            .map_err(convert_error)?;

        // dropping the transaction without commit rolls the batch back
        tx.commit().await.map_err(convert_error)
    }
}
