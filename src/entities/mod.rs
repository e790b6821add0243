// Entity models - one flat file-backed record type per upstream artifact

pub mod building;
pub mod channel;
pub mod company;
pub mod exclusion;
pub mod naics;
pub mod research;
pub mod scored;

pub use building::{Building, BuildingSource};
pub use channel::{Channel, ChannelConfig};
pub use company::Company;
pub use exclusion::{ExclusionConfig, ExclusionRule};
pub use naics::NaicsFitScore;
pub use research::ResearchScore;
pub use scored::ScoredCompany;

use serde::{Deserialize, Deserializer};

/// Upstream identifiers are sometimes zero-padded inconsistently between
/// artifacts ("007526346" vs "7526346"). Compare through this.
pub fn normalize_id(id: &str) -> &str {
    let trimmed = id.trim().trim_start_matches('0');
    if trimmed.is_empty() {
        "0"
    } else {
        trimmed
    }
}

/// Deserialize booleans the way pandas writes them: True/False/1/0/yes/no,
/// case-insensitive. Empty cells are false.
pub(crate) fn de_flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected boolean, got {other:?}"
        ))),
    }
}

/// Optional variant of the flexible boolean; empty cells are None.
pub(crate) fn de_opt_flexible_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => match value.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "expected boolean, got {other:?}"
            ))),
        },
    }
}

/// Integer columns arrive as "3.0" whenever pandas ever saw a null in them.
pub(crate) fn de_opt_lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            if let Ok(int) = value.parse::<i64>() {
                return Ok(Some(int));
            }
            value
                .parse::<f64>()
                .ok()
                .filter(|f| f.fract() == 0.0)
                .map(|f| Some(f as i64))
                .ok_or_else(|| {
                    serde::de::Error::custom(format!("expected integer, got {value:?}"))
                })
        }
    }
}

pub(crate) fn de_lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    de_opt_lenient_int(deserializer)?
        .ok_or_else(|| serde::de::Error::custom("expected integer, got empty cell"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_id_strips_leading_zeros() {
        assert_eq!(normalize_id("007526346"), "7526346");
        assert_eq!(normalize_id("7526346"), "7526346");
        assert_eq!(normalize_id("  0042 "), "42");
    }

    #[test]
    fn test_normalize_id_all_zeros() {
        assert_eq!(normalize_id("000"), "0");
        assert_eq!(normalize_id("0"), "0");
    }
}
