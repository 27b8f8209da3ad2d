use std::{
    fmt,
    fs::File,
    io,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use thiserror::Error;
use tokio::{sync::mpsc, task::JoinError};

use crate::{
    batch::BatchInserter,
    data_model::{
        agency::Agency, calendar::Calendar, calendar_dates::CalendarDate, routes::Route,
        shapes::ShapePoint, stop_times::StopTime, stops::Stop, trips::Trip, Entity, EntityKind,
    },
    database::{Database, DatabaseError},
    reader::{DecodeError, EntityReader},
};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed record: {0}")]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error("decoder task failed: {0}")]
    Decoder(#[from] JoinError),
    #[error("batch inserter stopped without a report")]
    InserterGone,
}

/// Outcome of importing the records of one kind.
#[derive(Debug)]
pub struct ImportItemsResult {
    pub kind: EntityKind,
    /// Records handed to the database, whether or not their batch was written.
    pub count: u64,
    /// Batches written successfully.
    pub batches: u64,
    pub time: Duration,
    pub error: Option<ImportError>,
}

impl ImportItemsResult {
    fn failed(kind: EntityKind, time: Duration, error: ImportError) -> Self {
        Self {
            kind,
            count: 0,
            batches: 0,
            time,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl fmt::Display for ImportItemsResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            None => write!(
                f,
                "imported {} {} in {} batches in {:?}",
                self.count, self.kind, self.batches, self.time
            ),
            Some(why) => write!(f, "failed to import {}: {}", self.kind, why),
        }
    }
}

/// Imports every GTFS file below `gtfs_base` into `database`, one kind after the
/// other in [`EntityKind::ALL`] order.
///
/// Exactly one result per kind is sent to `progress`, in order. A failing kind
/// does not stop the import of the following kinds. `progress` is closed when
/// the function returns.
pub async fn import<D>(
    database: D,
    gtfs_base: impl AsRef<Path>,
    progress: mpsc::Sender<ImportItemsResult>,
) where
    D: Database,
{
    let gtfs_base = gtfs_base.as_ref();
    for kind in EntityKind::ALL {
        let result = match kind {
            EntityKind::Agencies => import_items::<Agency, _>(&database, gtfs_base).await,
            EntityKind::Routes => import_items::<Route, _>(&database, gtfs_base).await,
            EntityKind::Trips => import_items::<Trip, _>(&database, gtfs_base).await,
            EntityKind::Stops => import_items::<Stop, _>(&database, gtfs_base).await,
            EntityKind::StopTimes => import_items::<StopTime, _>(&database, gtfs_base).await,
            EntityKind::Shapes => import_items::<ShapePoint, _>(&database, gtfs_base).await,
            EntityKind::Calendars => import_items::<Calendar, _>(&database, gtfs_base).await,
            EntityKind::CalendarDates => {
                import_items::<CalendarDate, _>(&database, gtfs_base).await
            }
        };

        if progress.send(result).await.is_err() {
            log::warn!("progress receiver dropped, import of {} not reported", kind);
        }
    }
}

/// Runs [`import`] and collects the per-kind results.
pub async fn import_all<D>(database: D, gtfs_base: impl AsRef<Path>) -> Vec<ImportItemsResult>
where
    D: Database,
{
    let (sender, mut receiver) = mpsc::channel(EntityKind::ALL.len());
    import(database, gtfs_base, sender).await;

    let mut results = Vec::with_capacity(EntityKind::ALL.len());
    while let Some(result) = receiver.recv().await {
        results.push(result);
    }
    results
}

async fn import_items<E, D>(database: &D, gtfs_base: &Path) -> ImportItemsResult
where
    E: Entity,
    D: Database,
{
    let start = Instant::now();
    let path = gtfs_base.join(E::KIND.file_name());
    log::info!("importing {} from {}...", E::KIND, path.display());

    let file = match File::open(&path) {
        Ok(file) => file,
        Err(source) => {
            return ImportItemsResult::failed(
                E::KIND,
                start.elapsed(),
                ImportError::Open { path, source },
            )
        }
    };

    let (sender, receiver) = mpsc::channel(1);
    let report = BatchInserter::<D, E>::new(database.clone()).spawn(receiver);
    let decoded = tokio::task::spawn_blocking(move || decode(file, sender)).await;

    let Ok(report) = report.await else {
        return ImportItemsResult::failed(E::KIND, start.elapsed(), ImportError::InserterGone);
    };

    // a failed write closes the channel, which ends decoding early without an
    // error of its own
    let error = match (report.error, decoded) {
        (Some(why), _) => Some(ImportError::Database(why)),
        (None, Err(why)) => Some(ImportError::Decoder(why)),
        (None, Ok(Err(why))) => Some(ImportError::Decode(why)),
        (None, Ok(Ok(()))) => None,
    };

    ImportItemsResult {
        kind: E::KIND,
        count: report.count,
        batches: report.batches,
        time: start.elapsed(),
        error,
    }
}

/// Streams the records of `file` into `sender` until the file ends, a record is
/// malformed or the receiving side is gone.
fn decode<E: Entity>(file: File, sender: mpsc::Sender<E>) -> Result<(), DecodeError> {
    for entity in EntityReader::<E, _>::new(file)? {
        if sender.blocking_send(entity?).is_err() {
            break;
        }
    }
    Ok(())
}
