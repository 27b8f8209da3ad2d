use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::serde::default_if_empty;

use super::{Date, Entity, EntityKind, IdString, Value};

/// Indicates whether the service operates. Note that exceptions for particular dates
/// may be listed in calendar_dates.txt.
/// See <https://gtfs.org/schedule/reference/#calendartxt>
#[derive(Serialize_repr, Deserialize_repr, PartialEq, Eq, Debug, Clone, Copy, Default)]
#[repr(u8)]
pub enum ServiceAvailability {
    #[default]
    Unavailable = 0,
    Available = 1,
}

impl From<ServiceAvailability> for Value {
    fn from(value: ServiceAvailability) -> Self {
        Value::Integer(value as i64)
    }
}

/// Service dates specified using a weekly schedule with start and end dates.
///
/// The store assigns a surrogate id on insert.
/// See <https://gtfs.org/schedule/reference/#calendartxt>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calendar {
    /// Identifies a set of dates when service is available for one or more routes.
    pub service_id: IdString,

    /// Indicates whether the service operates on all Mondays in the date range
    /// specified by the start_date and end_date fields.
    #[serde(deserialize_with = "default_if_empty")]
    pub monday: ServiceAvailability,

    /// Functions in the same way as `monday` except applies to Tuesdays.
    #[serde(deserialize_with = "default_if_empty")]
    pub tuesday: ServiceAvailability,

    /// Functions in the same way as `monday` except applies to Wednesday.
    #[serde(deserialize_with = "default_if_empty")]
    pub wednesday: ServiceAvailability,

    /// Functions in the same way as `monday` except applies to Thursday
    #[serde(deserialize_with = "default_if_empty")]
    pub thursday: ServiceAvailability,

    /// Functions in the same way as `monday` except applies to Friday.
    #[serde(deserialize_with = "default_if_empty")]
    pub friday: ServiceAvailability,

    /// Functions in the same way as `monday` except applies to Saturday.
    #[serde(deserialize_with = "default_if_empty")]
    pub saturday: ServiceAvailability,

    /// Functions in the same way as `monday` except applies to Sunday.
    #[serde(deserialize_with = "default_if_empty")]
    pub sunday: ServiceAvailability,

    /// Start service day for the service interval.
    pub start_date: Date,

    /// End service day for the service interval. This service day is included in the
    /// interval.
    pub end_date: Date,
}

impl Entity for Calendar {
    const KIND: EntityKind = EntityKind::Calendars;
    const COLUMNS: &'static [&'static str] = &[
        "service_id",
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
        "start_date",
        "end_date",
    ];

    fn values(&self) -> Vec<Value> {
        vec![
            self.service_id.clone().into(),
            self.monday.into(),
            self.tuesday.into(),
            self.wednesday.into(),
            self.thursday.into(),
            self.friday.into(),
            self.saturday.into(),
            self.sunday.into(),
            self.start_date.clone().into(),
            self.end_date.clone().into(),
        ]
    }
}
