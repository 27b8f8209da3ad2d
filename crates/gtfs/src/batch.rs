use std::{
    marker::PhantomData,
    time::{Duration, Instant},
};

use tokio::sync::{mpsc, oneshot};

use crate::{
    data_model::Entity,
    database::{Database, DatabaseError},
};

/// Number of records persisted per write.
pub const BATCH_SIZE: usize = 1000;

/// Outcome of draining one record channel into the database.
#[derive(Debug)]
pub struct BatchReport {
    /// Records received from the channel, including those of a failed batch.
    pub count: u64,
    /// Batches written successfully.
    pub batches: u64,
    pub elapsed: Duration,
    /// The write error that stopped the inserter, if any.
    pub error: Option<DatabaseError>,
}

/// Collects records of one entity kind into batches of [`BATCH_SIZE`] and writes
/// each batch in a single atomic operation.
pub struct BatchInserter<D, E> {
    database: D,
    _entity: PhantomData<fn(E)>,
}

impl<D, E> BatchInserter<D, E>
where
    D: Database,
    E: Entity,
{
    pub fn new(database: D) -> Self {
        Self {
            database,
            _entity: PhantomData,
        }
    }

    /// Runs the inserter on its own task. The report is delivered once the
    /// channel is drained or a write failed.
    pub fn spawn(self, items: mpsc::Receiver<E>) -> oneshot::Receiver<BatchReport> {
        let (sender, receiver) = oneshot::channel();
        tokio::spawn(async move {
            let report = self.run(items).await;
            if sender.send(report).is_err() {
                log::debug!("report for {} was not awaited", E::KIND);
            }
        });
        receiver
    }

    /// Consumes `items` until the sender side is dropped, then writes the trailing
    /// partial batch.
    ///
    /// The first failed write stops the inserter: the channel is closed, so the
    /// producer notices, and the remaining records are discarded. Batches written
    /// before the failure stay in the database.
    pub async fn run(self, mut items: mpsc::Receiver<E>) -> BatchReport {
        let start = Instant::now();
        let mut count = 0;
        let mut batches = 0;
        let mut batch = Vec::with_capacity(BATCH_SIZE);

        while let Some(item) = items.recv().await {
            count += 1;
            batch.push(item);

            if batch.len() == BATCH_SIZE {
                if let Err(why) = self.write(&batch, batches).await {
                    items.close();
                    return BatchReport {
                        count,
                        batches,
                        elapsed: start.elapsed(),
                        error: Some(why),
                    };
                }
                batches += 1;
                batch.clear();
            }
        }

        let mut error = None;
        if !batch.is_empty() {
            match self.write(&batch, batches).await {
                Ok(()) => batches += 1,
                Err(why) => error = Some(why),
            }
        }

        BatchReport {
            count,
            batches,
            elapsed: start.elapsed(),
            error,
        }
    }

    async fn write(&self, batch: &[E], index: u64) -> Result<(), DatabaseError> {
        log::debug!(
            "writing batch {} of {} ({} records)",
            index + 1,
            E::KIND,
            batch.len()
        );
        self.database.insert_batch(batch).await.inspect_err(|why| {
            log::warn!("batch {} of {} failed: {}", index + 1, E::KIND, why)
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{
        fmt,
        sync::{Arc, Mutex},
    };

    use async_trait::async_trait;

    use super::*;
    use crate::data_model::{agency::Agency, EntityKind};

    #[derive(Debug)]
    pub(crate) struct Rejected;

    impl fmt::Display for Rejected {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("rejected")
        }
    }

    impl std::error::Error for Rejected {}

    /// Records the kind and size of every committed batch. The write with the
    /// (1-based) number `fail_on` fails and commits nothing.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingDatabase {
        pub(crate) committed: Arc<Mutex<Vec<(EntityKind, usize)>>>,
        writes: Arc<Mutex<usize>>,
        fail_on: Option<usize>,
    }

    impl RecordingDatabase {
        pub(crate) fn failing_on(write: usize) -> Self {
            Self {
                fail_on: Some(write),
                ..Self::default()
            }
        }

        pub(crate) fn committed(&self) -> Vec<(EntityKind, usize)> {
            self.committed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Database for RecordingDatabase {
        async fn insert_batch<E: Entity>(&self, batch: &[E]) -> crate::database::Result<()> {
            let write = {
                let mut writes = self.writes.lock().unwrap();
                *writes += 1;
                *writes
            };
            if self.fail_on == Some(write) {
                return Err(DatabaseError::write(E::KIND, batch.len(), Rejected));
            }
            self.committed.lock().unwrap().push((E::KIND, batch.len()));
            Ok(())
        }
    }

    async fn feed(database: RecordingDatabase, records: usize) -> (BatchReport, usize) {
        let (sender, receiver) = mpsc::channel(1);
        let producer = tokio::spawn(async move {
            let mut sent = 0;
            for i in 0..records {
                let agency = Agency {
                    id: i.to_string(),
                    ..Agency::default()
                };
                if sender.send(agency).await.is_err() {
                    break;
                }
                sent += 1;
            }
            sent
        });
        let report = BatchInserter::<_, Agency>::new(database).run(receiver).await;
        (report, producer.await.unwrap())
    }

    #[tokio::test]
    async fn writes_nothing_for_empty_input() {
        let database = RecordingDatabase::default();
        let (report, _) = feed(database.clone(), 0).await;
        assert_eq!(report.count, 0);
        assert_eq!(report.batches, 0);
        assert!(report.error.is_none());
        assert!(database.committed().is_empty());
    }

    #[tokio::test]
    async fn writes_full_and_trailing_batches() {
        let database = RecordingDatabase::default();
        let (report, _) = feed(database.clone(), 2500).await;
        assert_eq!(report.count, 2500);
        assert_eq!(report.batches, 3);
        assert!(report.error.is_none());
        let sizes: Vec<usize> = database.committed().iter().map(|(_, n)| *n).collect();
        assert_eq!(sizes, vec![1000, 1000, 500]);
    }

    #[tokio::test]
    async fn exact_multiple_has_no_trailing_batch() {
        for (records, batches) in [(1, 1), (999, 1), (1000, 1), (1001, 2), (3000, 3)] {
            let database = RecordingDatabase::default();
            let (report, _) = feed(database.clone(), records).await;
            assert_eq!(report.batches, batches, "{records} records");
            assert_eq!(
                database.committed().iter().map(|(_, n)| n).sum::<usize>(),
                records
            );
        }
    }

    #[tokio::test]
    async fn stops_at_first_failed_batch() {
        let database = RecordingDatabase::failing_on(2);
        let (report, sent) = feed(database.clone(), 3500).await;

        assert!(matches!(
            report.error,
            Some(DatabaseError::Write {
                kind: EntityKind::Agencies,
                count: 1000,
                ..
            })
        ));
        assert_eq!(report.batches, 1);
        assert_eq!(report.count, 2000);
        assert_eq!(database.committed(), vec![(EntityKind::Agencies, 1000)]);
        assert!(sent < 3500);
    }

    #[tokio::test]
    async fn spawned_inserter_reports_through_channel() {
        let database = RecordingDatabase::default();
        let (sender, receiver) = mpsc::channel(1);
        let report = BatchInserter::<_, Agency>::new(database.clone()).spawn(receiver);
        for id in ["a", "b", "c"] {
            let agency = Agency {
                id: id.to_owned(),
                ..Agency::default()
            };
            sender.send(agency).await.unwrap();
        }
        drop(sender);

        let report = report.await.unwrap();
        assert_eq!(report.count, 3);
        assert_eq!(report.batches, 1);
        assert_eq!(database.committed(), vec![(EntityKind::Agencies, 3)]);
    }

    #[tokio::test]
    async fn reports_failed_trailing_batch() {
        let database = RecordingDatabase::failing_on(2);
        let (report, sent) = feed(database.clone(), 1200).await;
        assert_eq!(sent, 1200);
        assert_eq!(report.batches, 1);
        assert_eq!(report.count, 1200);
        assert!(report.error.is_some());
    }
}
