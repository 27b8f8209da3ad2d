use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind, IdString, Value};

/// Trips for each route. A trip is a sequence of two or more stops that occur
/// during a specific time period.
/// Primary Key: `trip_id`
/// See <https://gtfs.org/schedule/reference/#tripstxt>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trip {
    /// Unique Primary Key.
    /// Identifies a trip.
    #[serde(rename = "trip_id")]
    pub id: IdString,

    /// Foreign ID referencing `routes.route_id`.
    pub route_id: IdString,

    /// Identifies a set of dates when service is available for one or more routes.
    pub service_id: IdString,

    /// Indicates the direction of travel for a trip (`0` or `1`). Kept as text.
    pub direction_id: String,

    /// Identifies a geospatial shape describing the vehicle travel path for a trip.
    /// Loosely references `shapes.shape_id`, which is not unique.
    pub shape_id: IdString,

    /// Public facing text used to identify the trip to riders.
    #[serde(rename = "trip_short_name")]
    pub name: String,
}

impl Entity for Trip {
    const KIND: EntityKind = EntityKind::Trips;
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "route_id",
        "service_id",
        "direction_id",
        "shape_id",
        "name",
    ];

    fn values(&self) -> Vec<Value> {
        vec![
            self.id.clone().into(),
            self.route_id.clone().into(),
            self.service_id.clone().into(),
            self.direction_id.clone().into(),
            self.shape_id.clone().into(),
            self.name.clone().into(),
        ]
    }
}
