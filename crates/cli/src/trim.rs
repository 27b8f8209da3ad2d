use database::{DatabaseConnectionInfo, SqliteDatabase, TrimError};

use crate::commands::{Result, TrimArgs};

pub async fn run(args: TrimArgs) -> Result<()> {
    let database = SqliteDatabase::connect(DatabaseConnectionInfo::new(&args.db_path)).await?;

    match database.trim(&args.agency).await {
        Ok(result) => {
            for items in result.values() {
                log::info!("{}", items);
            }
        }
        Err(TrimError::AgencyNotFound(like)) => {
            log::warn!("could not find an agency like '{}', not trimming", like);
        }
        Err(why) => return Err(why.into()),
    }

    database.close().await;
    Ok(())
}
