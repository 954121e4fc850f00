//! Serialización JSON de ObjectId
//!
//! En JSON los identificadores viajan como string hexadecimal de 24
//! caracteres; en el documento BSON se guardan como ObjectId nativo.

use bson::oid::ObjectId;
use serde::{de, Deserialize, Deserializer, Serializer};

/// `Option<ObjectId>` <-> `"64b7f0c2a1b2c3d4e5f60718"` / `null`
///
/// Un string vacío se lee como `None`.
pub mod option_hex {
    use super::*;

    pub fn serialize<S>(value: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(oid) => serializer.serialize_str(&oid.to_hex()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<ObjectId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(hex) => ObjectId::parse_str(hex).map(Some).map_err(de::Error::custom),
        }
    }
}
