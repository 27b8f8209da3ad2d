use std::fmt;

use serde::de::DeserializeOwned;

pub mod agency;
pub mod calendar;
pub mod calendar_dates;
pub mod routes;
pub mod shapes;
pub mod stop_times;
pub mod stops;
pub mod trips;

/// The eight kinds of GTFS records handled by this crate.
///
/// The declaration order is the import order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Agencies,
    Routes,
    Trips,
    Stops,
    StopTimes,
    Shapes,
    Calendars,
    CalendarDates,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        Self::Agencies,
        Self::Routes,
        Self::Trips,
        Self::Stops,
        Self::StopTimes,
        Self::Shapes,
        Self::Calendars,
        Self::CalendarDates,
    ];

    /// Human readable, plural name.
    pub fn display_text(self) -> &'static str {
        match self {
            Self::Agencies => "Agencies",
            Self::Routes => "Routes",
            Self::Trips => "Trips",
            Self::Stops => "Stops",
            Self::StopTimes => "Stop Times",
            Self::Shapes => "Shapes",
            Self::Calendars => "Calendars",
            Self::CalendarDates => "Calendar Dates",
        }
    }

    /// Conventional name of the source file inside a GTFS directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Agencies => "agency.txt",
            Self::Routes => "routes.txt",
            Self::Trips => "trips.txt",
            Self::Stops => "stops.txt",
            Self::StopTimes => "stop_times.txt",
            Self::Shapes => "shapes.txt",
            Self::Calendars => "calendar.txt",
            Self::CalendarDates => "calendar_dates.txt",
        }
    }

    /// Name of the table holding records of this kind.
    pub fn table_name(self) -> &'static str {
        match self {
            Self::Agencies => "agencies",
            Self::Routes => "routes",
            Self::Trips => "trips",
            Self::Stops => "stops",
            Self::StopTimes => "stop_times",
            Self::Shapes => "shapes",
            Self::Calendars => "calendars",
            Self::CalendarDates => "calendar_dates",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}

/// A single column value, independent of the store it is written to.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Real(f64),
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

/// A record type that can be read from its GTFS file and written to its table.
pub trait Entity: DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Insertable columns of the table, in the order of [`Entity::values`].
    /// Surrogate keys are assigned by the store and are not listed.
    const COLUMNS: &'static [&'static str];

    fn values(&self) -> Vec<Value>;
}

/// Service day in the YYYYMMDD format. Since time within a service day may be above
/// 24:00:00, a service day may contain information for the subsequent day(s).
///
/// # Examples
///
/// `20180913` for September 13th, 2018.
pub type Date = String;

/// An ID field value is an internal ID, not intended to be shown to riders, and is a
/// sequence of any UTF-8 characters. Using only printable ASCII characters is
/// recommended. An ID is labeled "unique ID" when it must be unique within a file.
/// IDs defined in one .txt file are often referenced in another .txt file. IDs that
/// reference an ID in another table are labeled "foreign ID".
///
/// # Examples
///
/// The `stop_id` field in stops.txt is a "unique ID". The `parent_station` field in
/// stops.txt is a "foreign ID referencing `stops.stop_id`".
pub type IdString = String;

/// WGS84 latitude in decimal degrees. The value must be greater than or equal to
/// -90.0 and less than or equal to 90.0.
///
/// # Examples
///
/// `41.890169` for the Colosseum in Rome.
pub type Latitude = f64;

/// WGS84 longitude in decimal degrees. The value must be greater than or equal to
/// -180.0 and less than or equal to 180.0.
///
/// # Examples
///
/// `12.492269` for the Colosseum in Rome.
pub type Longitude = f64;

/// A fully qualified URL that includes http:// or https://, and any special
/// characters in the URL must be correctly escaped.
pub type Url = String;
