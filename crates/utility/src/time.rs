use std::{fmt, str::FromStr};

use thiserror::Error;

const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_MINUTE: i64 = 60;

/// Error while decoding a GTFS time of day.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    /// The text does not consist of exactly three `:`-separated fields.
    #[error("cannot parse GTFS time from '{0}'")]
    Format(String),

    /// One of the fields is not a base-10 integer.
    #[error("cannot parse GTFS {component} from '{value}'")]
    Parse {
        component: &'static str,
        value: String,
    },

    /// The value does not fit into non-negative 32-bit seconds.
    #[error("cannot parse GTFS time from '{0}': value out of range")]
    Range(String),
}

/// Time in the HH:MM:SS format (H:MM:SS is also accepted), stored as seconds
/// since midnight of the service day.
///
/// Times after midnight on the service day are larger than `24:00:00`, so the
/// value may exceed 86399 seconds. It is never negative and never larger than
/// `i32::MAX`.
///
/// # Examples
///
/// `14:30:00` for 2:30PM or `25:35:00` for 1:35AM on the next day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceTime(i32);

impl ServiceTime {
    pub fn seconds(self) -> i32 {
        self.0
    }

    /// Formats the time as `HH:MM:SS`. Hours are at least two digits wide.
    pub fn encode(self) -> String {
        self.to_string()
    }

    /// Parses `H:MM:SS` text. Hours may have any number of digits.
    pub fn decode(text: &str) -> Result<Self, TimeError> {
        let fields: Vec<&str> = text.split(':').collect();
        let [hours, minutes, seconds] = fields.as_slice() else {
            return Err(TimeError::Format(text.to_owned()));
        };

        let hours = parse_component("hours", hours)?;
        let minutes = parse_component("minutes", minutes)?;
        let seconds = parse_component("seconds", seconds)?;

        let total = hours
            .checked_mul(SECONDS_PER_HOUR)
            .and_then(|total| total.checked_add(minutes.checked_mul(SECONDS_PER_MINUTE)?))
            .and_then(|total| total.checked_add(seconds))
            .ok_or_else(|| TimeError::Range(text.to_owned()))?;

        // components themselves may be negative, only the sum is checked
        i32::try_from(total)
            .ok()
            .filter(|total| *total >= 0)
            .map(Self)
            .ok_or_else(|| TimeError::Range(text.to_owned()))
    }
}

fn parse_component(component: &'static str, value: &str) -> Result<i64, TimeError> {
    value.parse::<i64>().map_err(|_| TimeError::Parse {
        component,
        value: value.to_owned(),
    })
}

impl fmt::Display for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / 3600;
        let minutes = (self.0 % 3600) / 60;
        let seconds = self.0 % 60;
        write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

impl FromStr for ServiceTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_zero_padded() {
        assert_eq!(ServiceTime(0).encode(), "00:00:00");
        assert_eq!(ServiceTime(52621).encode(), "14:37:01");
        assert_eq!(ServiceTime(41340).encode(), "11:29:00");
    }

    #[test]
    fn encodes_times_past_midnight() {
        assert_eq!(ServiceTime(25 * 3600 + 35 * 60).encode(), "25:35:00");
        assert_eq!(ServiceTime(104 * 3600 + 1).encode(), "104:00:01");
        assert_eq!(ServiceTime(i32::MAX).encode(), "596523:14:07");
    }

    #[test]
    fn decodes_valid_times() {
        assert_eq!(ServiceTime::decode("14:37:01"), Ok(ServiceTime(52621)));
        assert_eq!(ServiceTime::decode("0:00:00"), Ok(ServiceTime(0)));
        assert_eq!(ServiceTime::decode("4:05:06"), Ok(ServiceTime(14706)));
        assert_eq!(
            ServiceTime::decode("104:00:00"),
            Ok(ServiceTime(104 * 3600))
        );
        assert_eq!(
            ServiceTime::decode("596523:14:07"),
            Ok(ServiceTime(i32::MAX))
        );
    }

    #[test]
    fn rejects_non_numeric_fields() {
        assert_eq!(
            ServiceTime::decode("a4:37:01"),
            Err(TimeError::Parse {
                component: "hours",
                value: "a4".to_owned()
            })
        );
        assert!(matches!(
            ServiceTime::decode("14:3x:01"),
            Err(TimeError::Parse {
                component: "minutes",
                ..
            })
        ));
        assert!(matches!(
            ServiceTime::decode("14:37:"),
            Err(TimeError::Parse {
                component: "seconds",
                ..
            })
        ));
    }

    #[test]
    fn rejects_wrong_field_count() {
        for text in ["", "14:37", "14:37:01:00", "143701"] {
            assert_eq!(
                ServiceTime::decode(text),
                Err(TimeError::Format(text.to_owned())),
                "{text}"
            );
        }
    }

    #[test]
    fn rejects_values_out_of_range() {
        assert!(matches!(
            ServiceTime::decode("596523:14:08"),
            Err(TimeError::Range(_))
        ));
        assert!(matches!(
            ServiceTime::decode("999999999999999999:00:00"),
            Err(TimeError::Range(_))
        ));
        assert!(matches!(
            ServiceTime::decode("-1:00:00"),
            Err(TimeError::Range(_))
        ));
    }

    #[test]
    fn negative_components_are_summed() {
        assert_eq!(ServiceTime::decode("1:-1:00"), Ok(ServiceTime(3540)));
    }

    #[test]
    fn round_trips_through_canonical_form() {
        for text in [
            "0:00:00",
            "4:05:06",
            "14:37:01",
            "23:59:59",
            "24:00:00",
            "47:12:13",
            "104:00:01",
            "596523:14:07",
            "000000007:00:00",
        ] {
            let decoded = ServiceTime::decode(text).unwrap();
            let again = ServiceTime::decode(&decoded.encode()).unwrap();
            assert_eq!(decoded, again, "{text}");
        }
    }
}
