/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Serde helpers for loosely typed API fields

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes an optional unsigned integer sent either as a number or as a string
///
/// Token endpoints return `expires_in` as `"3600"` or `3600` depending on the
/// identity backend; anything unparsable becomes `None`.
pub fn string_as_u64_opt<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    })
}

/// Deserializes a string, treating `null` and `""` as `None`
pub fn option_string_empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
