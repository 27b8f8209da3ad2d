use std::{fs, io, path::Path};

use database::{DatabaseConnectionInfo, SqliteDatabase};
use gtfs::EntityKind;
use tokio::sync::mpsc;

use crate::commands::{CommandError, ImportArgs, Result};

pub async fn run(args: ImportArgs) -> Result<()> {
    remove_database_file(&args.db_path)?;

    let database = SqliteDatabase::connect(
        DatabaseConnectionInfo::new(&args.db_path).create_if_missing(true),
    )
    .await?;
    database.migrate().await?;

    log::info!(
        "importing {} into {}",
        args.gtfs_base.display(),
        args.db_path.display()
    );
    let (progress, mut results) = mpsc::channel(1);
    let importer = tokio::spawn(gtfs::import(database.clone(), args.gtfs_base, progress));

    let mut failed = 0;
    while let Some(result) = results.recv().await {
        if result.is_ok() {
            log::info!("{}", result);
        } else {
            failed += 1;
            log::error!("{}", result);
        }
    }
    importer.await?;
    database.close().await;

    if failed > 0 {
        return Err(CommandError::ImportFailed {
            failed,
            total: EntityKind::ALL.len(),
        }
        .into());
    }
    Ok(())
}

fn remove_database_file(path: &Path) -> std::result::Result<(), CommandError> {
    match fs::remove_file(path) {
        Ok(()) => {
            log::debug!("removed old database file {}", path.display());
            Ok(())
        }
        Err(why) if why.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(CommandError::RemoveDatabase {
            path: path.to_owned(),
            source,
        }),
    }
}
