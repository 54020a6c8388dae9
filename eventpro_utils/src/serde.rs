//! Helpers for `#[serde(with = "...")]` attributes.

pub mod empty_as_none;
pub mod null_as_default;
