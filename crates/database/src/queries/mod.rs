use gtfs::{Entity, Value};
use sqlx::{query::Query, sqlite::SqliteArguments, Sqlite, SqliteConnection};

const MAX_CHUNK_SIZE: usize = 100;

/// Upper bound of bound parameters per statement on older SQLite builds.
const BULK_INSERT_MAX: usize = 999;

// bulk insert

/// Inserts `rows` into the table of `E` using multi-row `INSERT` statements.
///
/// Runs one statement per chunk; callers wrap it in a transaction to make the
/// whole slice atomic. Returns the number of inserted rows.
pub async fn insert_all<E: Entity>(
    connection: &mut SqliteConnection,
    rows: &[E],
) -> Result<u64, sqlx::Error> {
    let columns = E::COLUMNS;
    let chunk_size = (BULK_INSERT_MAX / columns.len()).clamp(1, MAX_CHUNK_SIZE);
    let mut inserted = 0;

    for chunk in rows.chunks(chunk_size) {
        let statement = insert_statement(E::KIND.table_name(), columns, chunk.len());

        let mut query = sqlx::query::<Sqlite>(&statement);
        for row in chunk {
            for value in row.values() {
                query = bind_value(query, value);
            }
        }

        inserted += query.execute(&mut *connection).await?.rows_affected();
    }

    Ok(inserted)
}

fn insert_statement(table: &str, columns: &[&str], rows: usize) -> String {
    let mut placeholders = String::from("(?");
    placeholders.push_str(&", ?".repeat(columns.len() - 1));
    placeholders.push(')');

    let mut statement = format!("INSERT INTO {} ({}) VALUES ", table, columns.join(", "));
    for i in 0..rows {
        if i > 0 {
            statement.push_str(", ");
        }
        statement.push_str(&placeholders);
    }
    statement.push(';');
    statement
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: Value,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        Value::Text(text) => query.bind(text),
        Value::Integer(number) => query.bind(number),
        Value::Real(number) => query.bind(number),
    }
}

/// Number of rows in `table`.
pub async fn count<'c, E>(executor: E, table: &str) -> Result<u64, sqlx::Error>
where
    E: sqlx::Executor<'c, Database = Sqlite>,
{
    let statement = format!("SELECT COUNT(*) FROM {};", table);
    let count = sqlx::query_scalar::<_, i64>(&statement)
        .fetch_one(executor)
        .await?;
    Ok(count as u64)
}
