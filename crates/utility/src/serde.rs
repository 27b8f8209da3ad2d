pub mod service_time {
    use serde::de::Error as DeError;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::time::ServiceTime;

    pub fn serialize<S>(time: &ServiceTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.encode())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<ServiceTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ServiceTime::decode(&s).map_err(D::Error::custom)
    }
}
