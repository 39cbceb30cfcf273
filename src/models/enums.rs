//! Shared enums for list ordering and catalog display

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AppError;

// ---------------------------------------------------------------------------
// SortKey
// ---------------------------------------------------------------------------

/// Server-side ordering accepted by `GET /books`.
///
/// The wire form is the field name, prefixed with `-` for descending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "-created_at")]
    NewestFirst,
    #[serde(rename = "created_at")]
    OldestFirst,
    #[serde(rename = "title")]
    TitleAsc,
    #[serde(rename = "-title")]
    TitleDesc,
    #[serde(rename = "publish_year")]
    YearAsc,
    #[serde(rename = "-publish_year")]
    YearDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::NewestFirst,
        SortKey::OldestFirst,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
        SortKey::YearAsc,
        SortKey::YearDesc,
    ];

    /// Return the query-string value for this key
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::NewestFirst => "-created_at",
            SortKey::OldestFirst => "created_at",
            SortKey::TitleAsc => "title",
            SortKey::TitleDesc => "-title",
            SortKey::YearAsc => "publish_year",
            SortKey::YearDesc => "-publish_year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::NewestFirst => "Newest first",
            SortKey::OldestFirst => "Oldest first",
            SortKey::TitleAsc => "Title A-Z",
            SortKey::TitleDesc => "Title Z-A",
            SortKey::YearAsc => "Year ascending",
            SortKey::YearDesc => "Year descending",
        }
    }

    pub fn is_descending(&self) -> bool {
        self.as_str().starts_with('-')
    }

    /// Book field the backend orders by
    pub fn field(&self) -> &'static str {
        self.as_str().trim_start_matches('-')
    }
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| {
                let accepted: Vec<&str> = SortKey::ALL.iter().map(|k| k.as_str()).collect();
                AppError::Validation(format!(
                    "Unknown sort key '{}' (expected one of: {})",
                    s,
                    accepted.join(", ")
                ))
            })
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ViewMode
// ---------------------------------------------------------------------------

/// How the catalog lays out its records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

impl FromStr for ViewMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            _ => Err(AppError::Validation(format!(
                "Unknown view mode '{}' (expected grid or list)",
                s
            ))),
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
