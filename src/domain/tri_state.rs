use serde::{Deserialize, Deserializer};

/// Deserializer for `Option<Option<T>>` patch fields.
///
/// Paired with `#[serde(default)]`: a missing key stays `None` (leave as is),
/// an explicit `null` becomes `Some(None)` (clear), a value becomes
/// `Some(Some(value))` (set).
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>
{
    Deserialize::deserialize(deserializer).map(Some)
}
