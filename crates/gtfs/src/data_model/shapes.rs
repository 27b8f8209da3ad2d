use serde::{Deserialize, Serialize};

use crate::serde::default_if_empty;

use super::{Entity, EntityKind, IdString, Latitude, Longitude, Value};

/// A single point of a shape. Shapes describe the path that a vehicle travels along
/// a route alignment; all points of one shape share the same `shape_id`.
///
/// The store assigns a surrogate id on insert.
/// See <https://gtfs.org/schedule/reference/#shapestxt>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapePoint {
    /// Identifies a shape. Not unique, groups the points of one shape.
    pub shape_id: IdString,

    /// Latitude of a shape point.
    #[serde(rename = "shape_pt_lat", deserialize_with = "default_if_empty")]
    pub point_latitude: Latitude,

    /// Longitude of a shape point.
    #[serde(rename = "shape_pt_lon", deserialize_with = "default_if_empty")]
    pub point_longitude: Longitude,

    /// Sequence in which the shape points connect to form the shape. Values must
    /// increase along the trip but do not need to be consecutive.
    #[serde(rename = "shape_pt_sequence", deserialize_with = "default_if_empty")]
    pub point_sequence: i32,
}

impl Entity for ShapePoint {
    const KIND: EntityKind = EntityKind::Shapes;
    const COLUMNS: &'static [&'static str] = &["shape_id", "pt_lat", "pt_lon", "pt_sequence"];

    fn values(&self) -> Vec<Value> {
        vec![
            self.shape_id.clone().into(),
            self.point_latitude.into(),
            self.point_longitude.into(),
            self.point_sequence.into(),
        ]
    }
}
