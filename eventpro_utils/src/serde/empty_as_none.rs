//! Treats an empty (or missing) string as `None`.
//!
//! HTML inputs submit untouched optional fields as `""` and number inputs
//! may submit their value as a string. Both are accepted next to the
//! value's own representation.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Input<T> {
    Text(String),
    Value(T),
}

pub fn serialize<S, T>(data: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    data.serialize(serializer)
}

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: Display,
{
    match Option::<Input<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Input::Text(s)) if s.is_empty() => Ok(None),
        Some(Input::Text(s)) => s.parse().map(Some).map_err(serde::de::Error::custom),
        Some(Input::Value(value)) => Ok(Some(value)),
    }
}
