use serde::{Deserialize, Serialize};

use crate::serde::default_if_empty;

use super::{Date, Entity, EntityKind, IdString, Value};

/// Exceptions for the services defined in the calendar.txt.
/// See <https://gtfs.org/schedule/reference/#calendar_datestxt>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarDate {
    /// Foreign ID referencing `calendar.service_id` or ID.
    pub service_id: IdString,

    /// Date when service exception occurs.
    pub date: Date,

    /// `1` if service has been added for the date, `2` if it has been removed.
    #[serde(deserialize_with = "default_if_empty")]
    pub exception_type: i32,
}

impl Entity for CalendarDate {
    const KIND: EntityKind = EntityKind::CalendarDates;
    const COLUMNS: &'static [&'static str] = &["service_id", "date", "exception_type"];

    fn values(&self) -> Vec<Value> {
        vec![
            self.service_id.clone().into(),
            self.date.clone().into(),
            self.exception_type.into(),
        ]
    }
}
