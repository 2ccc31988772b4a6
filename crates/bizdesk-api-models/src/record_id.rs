//! Identifier field read from either `id` or `_id`.
//!
//! Used as `#[serde(flatten, with = "record_id")]` so a document carrying
//! both keys decodes instead of failing on a duplicate field.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserializer, Serializer};

const ID: &str = "id";
const STORE_ID: &str = "_id";

pub fn serialize<S>(id: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(ID, id)?;
    map.end()
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct RecordIdVisitor;

    impl<'de> Visitor<'de> for RecordIdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("an object with an `id` or `_id` string")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut id = None;
            let mut store_id = None;
            while let Some(key) = map.next_key::<String>()? {
                match key.as_str() {
                    ID => id = Some(map.next_value::<String>()?),
                    STORE_ID => store_id = Some(map.next_value::<String>()?),
                    _ => {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
            }
            id.or(store_id).ok_or_else(|| de::Error::missing_field(ID))
        }
    }

    deserializer.deserialize_map(RecordIdVisitor)
}
