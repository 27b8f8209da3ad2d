use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind, IdString, Url, Value};

/// Transit agencies with service represented in this dataset.
/// Primary Key: `agency_id`
/// See <https://gtfs.org/schedule/reference/#agencytxt>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Agency {
    /// Unique Primary Key.
    /// Identifies a transit brand which is often synonymous with a transit agency.
    /// Optional in single agency feeds, in which case it is stored as an empty
    /// string.
    #[serde(rename = "agency_id")]
    pub id: IdString,

    /// Full name of the transit agency.
    #[serde(rename = "agency_name")]
    pub name: String,

    /// URL of the transit agency.
    #[serde(rename = "agency_url")]
    pub url: Url,
}

impl Entity for Agency {
    const KIND: EntityKind = EntityKind::Agencies;
    const COLUMNS: &'static [&'static str] = &["id", "name", "url"];

    fn values(&self) -> Vec<Value> {
        vec![
            self.id.clone().into(),
            self.name.clone().into(),
            self.url.clone().into(),
        ]
    }
}
