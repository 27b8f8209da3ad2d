use std::{
    fmt,
    time::{Duration, Instant},
};

use gtfs::EntityKind;
use indexmap::IndexMap;
use thiserror::Error;

use crate::{queries, SqliteDatabase};

#[derive(Debug, Error)]
pub enum TrimError {
    #[error("table '{0}' does not exist")]
    MissingTable(&'static str),
    #[error("could not find an agency like '{0}'")]
    AgencyNotFound(String),
    #[error("failed to trim {kind}: {source}")]
    Statement {
        kind: EntityKind,
        #[source]
        source: sqlx::Error,
    },
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Outcome of trimming the records of one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimItemsResult {
    pub kind: EntityKind,
    /// Deleted records.
    pub affected: u64,
    /// Records left after the deletion.
    pub remaining: u64,
    pub time: Duration,
}

impl fmt::Display for TrimItemsResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "trimmed {} {} in {:?}, {} remaining",
            self.affected, self.kind, self.time, self.remaining
        )
    }
}

/// Per-kind results in the order the kinds were trimmed.
pub type TrimResult = IndexMap<EntityKind, TrimItemsResult>;

/// Deletions following the agency, each removing the records whose parent is
/// gone. Runs in this order.
const CASCADE: [(EntityKind, &str); 5] = [
    (
        EntityKind::Routes,
        "DELETE FROM routes WHERE agency_id NOT IN (SELECT DISTINCT id FROM agencies);",
    ),
    (
        EntityKind::Trips,
        "DELETE FROM trips WHERE route_id NOT IN (SELECT DISTINCT id FROM routes);",
    ),
    (
        EntityKind::StopTimes,
        "DELETE FROM stop_times WHERE trip_id NOT IN (SELECT DISTINCT id FROM trips);",
    ),
    (
        EntityKind::Stops,
        "DELETE FROM stops WHERE id NOT IN (SELECT DISTINCT stop_id FROM stop_times);",
    ),
    (
        EntityKind::Shapes,
        "DELETE FROM shapes WHERE shape_id NOT IN (SELECT DISTINCT shape_id FROM trips);",
    ),
];

impl SqliteDatabase {
    /// Reduces the store to the first agency whose name contains `like` and the
    /// routes, trips, stop times, stops and shapes reachable from it.
    ///
    /// `like` is matched with SQL `LIKE` (ASCII case-insensitive), so `%` and `_`
    /// act as wildcards. Calendars and calendar dates are kept as they are.
    /// Every deletion commits on its own; a failing step leaves the earlier ones
    /// in place.
    pub async fn trim(&self, like: &str) -> Result<TrimResult, TrimError> {
        self.require_tables().await?;

        let agency_id = self
            .find_agency(like)
            .await?
            .ok_or_else(|| TrimError::AgencyNotFound(like.to_owned()))?;
        log::info!("trimming to agency '{}'", agency_id);

        let mut result = TrimResult::new();

        let start = Instant::now();
        let deleted = sqlx::query("DELETE FROM agencies WHERE id <> ?;")
            .bind(agency_id.as_str())
            .execute(self.pool())
            .await
            .map_err(|source| TrimError::Statement {
                kind: EntityKind::Agencies,
                source,
            })?;
        self.record(&mut result, EntityKind::Agencies, deleted.rows_affected(), start)
            .await?;

        for (kind, statement) in CASCADE {
            let start = Instant::now();
            let deleted = sqlx::query(statement)
                .execute(self.pool())
                .await
                .map_err(|source| TrimError::Statement { kind, source })?;
            self.record(&mut result, kind, deleted.rows_affected(), start)
                .await?;
        }

        Ok(result)
    }

    async fn require_tables(&self) -> Result<(), TrimError> {
        for kind in EntityKind::ALL {
            let table = kind.table_name();
            let exists = sqlx::query_scalar::<_, String>(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?;",
            )
            .bind(table)
            .fetch_optional(self.pool())
            .await?;

            if exists.is_none() {
                return Err(TrimError::MissingTable(table));
            }
        }
        Ok(())
    }

    async fn find_agency(&self, like: &str) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT id FROM agencies WHERE name LIKE ? ORDER BY rowid LIMIT 1;",
        )
        .bind(format!("%{}%", like))
        .fetch_optional(self.pool())
        .await
    }

    async fn record(
        &self,
        result: &mut TrimResult,
        kind: EntityKind,
        affected: u64,
        start: Instant,
    ) -> Result<(), TrimError> {
        let remaining = queries::count(self.pool(), kind.table_name())
            .await
            .map_err(|source| TrimError::Statement { kind, source })?;
        let items = TrimItemsResult {
            kind,
            affected,
            remaining,
            time: start.elapsed(),
        };
        log::debug!("{}", items);
        result.insert(kind, items);
        Ok(())
    }
}
