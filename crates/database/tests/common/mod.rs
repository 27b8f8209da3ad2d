#![allow(dead_code)]

use std::{fs, path::Path};

use database::SqliteDatabase;
use gtfs::EntityKind;
use tempfile::TempDir;

/// Two agencies sharing stop `Y`. Stop `W` is not served at all.
pub const AGENCY: &str = "agency_id,agency_name,agency_url,agency_timezone
1,A,https://a.example/,Europe/Berlin
2,S-Bahn Berlin GmbH,https://sbahn.berlin/,Europe/Berlin
";

pub const ROUTES: &str = "route_id,agency_id,route_short_name,route_long_name,route_type
R1,1,R1,Regional,3
S1,2,S1,,109
S2,2,S2,,109
";

pub const TRIPS: &str = "route_id,service_id,trip_id,trip_short_name,direction_id,shape_id
R1,WD,T1,,0,SH_A
S1,WD,T2,,0,SH_S
S2,WE,T3,,1,SH_S
";

pub const STOPS: &str = "stop_id,stop_name,stop_lat,stop_lon
X,Xanten,52.1,13.1
Y,Yorckstr.,52.2,13.2
Z,Zoo,52.3,13.3
W,Wannsee,52.4,13.4
";

pub const STOP_TIMES: &str = "trip_id,arrival_time,departure_time,stop_id,stop_sequence
T1,08:00:00,08:00:00,X,1
T1,08:10:00,08:11:00,Y,2
T2,14:37:01,14:37:01,Y,1
T2,14:45:00,14:46:00,Z,2
T3,25:01:00,25:01:00,Z,1
";

pub const SHAPES: &str = "shape_id,shape_pt_lat,shape_pt_lon,shape_pt_sequence
SH_A,52.1,13.1,1
SH_A,52.2,13.2,2
SH_S,52.2,13.2,1
SH_S,52.25,13.25,2
SH_S,52.3,13.3,3
";

pub const CALENDAR: &str =
    "service_id,monday,tuesday,wednesday,thursday,friday,saturday,sunday,start_date,end_date
WD,1,1,1,1,1,0,0,20240101,20241231
WE,0,0,0,0,0,1,1,20240101,20241231
";

pub const CALENDAR_DATES: &str = "service_id,date,exception_type
WD,20241225,2
";

pub fn write(dir: &Path, kind: EntityKind, content: &str) {
    fs::write(dir.join(kind.file_name()), content).unwrap();
}

pub fn feed() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (kind, content) in [
        (EntityKind::Agencies, AGENCY),
        (EntityKind::Routes, ROUTES),
        (EntityKind::Trips, TRIPS),
        (EntityKind::Stops, STOPS),
        (EntityKind::StopTimes, STOP_TIMES),
        (EntityKind::Shapes, SHAPES),
        (EntityKind::Calendars, CALENDAR),
        (EntityKind::CalendarDates, CALENDAR_DATES),
    ] {
        write(dir.path(), kind, content);
    }
    dir
}

pub async fn database() -> SqliteDatabase {
    let database = SqliteDatabase::in_memory().await.unwrap();
    database.migrate().await.unwrap();
    database
}

/// Imports [`feed`] into a fresh in-memory database.
pub async fn imported() -> SqliteDatabase {
    let database = database().await;
    let dir = feed();
    let results = gtfs::import_all(database.clone(), dir.path()).await;
    assert!(results.iter().all(|result| result.is_ok()), "{results:?}");
    database
}

pub async fn counts(database: &SqliteDatabase) -> Vec<u64> {
    let mut counts = Vec::new();
    for kind in EntityKind::ALL {
        counts.push(database.count(kind).await.unwrap());
    }
    counts
}
