use serde::{Deserialize, Serialize};

use crate::serde::default_if_empty;

use super::{Entity, EntityKind, IdString, Value};

/// Transit routes. A route is a group of trips that are displayed to riders as a
/// single service.
/// Primary Key: `route_id`
/// See <https://gtfs.org/schedule/reference/#routestxt>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Route {
    /// Unique Primary Key.
    #[serde(rename = "route_id")]
    pub id: IdString,

    /// Foreign ID referencing `agency.agency_id`.
    pub agency_id: IdString,

    /// Short name of a route. Often a short, abstract identifier (e.g., "32",
    /// "100X", "Green") that riders use to identify a route.
    #[serde(rename = "route_short_name")]
    pub short_name: String,

    /// Full name of a route. This name is generally more descriptive than the
    /// `route_short_name`.
    #[serde(rename = "route_long_name")]
    pub long_name: String,

    /// Indicates the type of transportation used on a route.
    ///
    /// Kept as a plain integer, since feeds commonly use the extended route types
    /// (e.g. `109` for suburban railway) in addition to the basic ones.
    #[serde(rename = "route_type", deserialize_with = "default_if_empty")]
    pub kind: i32,
}

impl Entity for Route {
    const KIND: EntityKind = EntityKind::Routes;
    const COLUMNS: &'static [&'static str] =
        &["id", "agency_id", "short_name", "long_name", "type"];

    fn values(&self) -> Vec<Value> {
        vec![
            self.id.clone().into(),
            self.agency_id.clone().into(),
            self.short_name.clone().into(),
            self.long_name.clone().into(),
            self.kind.into(),
        ]
    }
}
