use serde::{Deserialize, Serialize};
use utility::time::ServiceTime;

use crate::serde::default_if_empty;

use super::{Entity, EntityKind, IdString, Value};

/// Times that a vehicle arrives at and departs from stops for each trip.
///
/// Stop times have no natural key in this schema; the store assigns a surrogate
/// id on insert.
/// See <https://gtfs.org/schedule/reference/#stop_timestxt>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopTime {
    /// Foreign ID referencing `stops.stop_id`.
    pub stop_id: IdString,

    /// Foreign ID referencing `trips.trip_id`.
    pub trip_id: IdString,

    /// Departure time from the stop in the time zone of the agency.
    ///
    /// For times occurring after midnight on the service day, the time is a value
    /// greater than `24:00:00` in `HH:MM:SS`.
    #[serde(rename = "departure_time", with = "utility::serde::service_time")]
    pub departure: ServiceTime,

    /// Arrival time at the stop, same format as `departure`.
    #[serde(rename = "arrival_time", with = "utility::serde::service_time")]
    pub arrival: ServiceTime,

    /// Order of stops for a particular trip. The values must increase along the
    /// trip but do not need to be consecutive.
    #[serde(rename = "stop_sequence", deserialize_with = "default_if_empty")]
    pub stop_sequence: i32,
}

impl Entity for StopTime {
    const KIND: EntityKind = EntityKind::StopTimes;
    const COLUMNS: &'static [&'static str] =
        &["stop_id", "trip_id", "departure", "arrival", "stop_seq"];

    fn values(&self) -> Vec<Value> {
        vec![
            self.stop_id.clone().into(),
            self.trip_id.clone().into(),
            self.departure.seconds().into(),
            self.arrival.seconds().into(),
            self.stop_sequence.into(),
        ]
    }
}
