use serde::{Deserialize, Serialize};

use crate::serde::default_if_empty;

use super::{Entity, EntityKind, IdString, Latitude, Longitude, Value};

/// Stops where vehicles pick up or drop off riders.
/// Primary Key: `stop_id`
/// See <https://gtfs.org/schedule/reference/#stopstxt>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stop {
    /// Unique Primary Key.
    #[serde(rename = "stop_id")]
    pub id: IdString,

    /// Name of the location.
    #[serde(rename = "stop_name")]
    pub name: String,

    /// Latitude of the location.
    #[serde(rename = "stop_lat", deserialize_with = "default_if_empty")]
    pub latitude: Latitude,

    /// Longitude of the location.
    #[serde(rename = "stop_lon", deserialize_with = "default_if_empty")]
    pub longitude: Longitude,
}

impl Entity for Stop {
    const KIND: EntityKind = EntityKind::Stops;
    const COLUMNS: &'static [&'static str] = &["id", "name", "latitude", "longitude"];

    fn values(&self) -> Vec<Value> {
        vec![
            self.id.clone().into(),
            self.name.clone().into(),
            self.latitude.into(),
            self.longitude.into(),
        ]
    }
}
