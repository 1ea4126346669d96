//! Page, request parameter and request key types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// The opposite direction, used when a column header is clicked twice.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("Invalid sort order: {} (must be 'asc' or 'desc')", other)),
        }
    }
}

/// One page as returned by the fetch capability.
///
/// Wire shape: `{items, limit, has_more, next_cursor}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub limit: u32,
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// Cursor for the following page, present only when the page says more exist.
    pub fn continuation(&self) -> Option<&str> {
        if self.has_more {
            self.next_cursor.as_deref()
        } else {
            None
        }
    }
}

/// Parameters handed to the fetch capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_id: Option<String>,
    pub limit: u32,
    pub sort_by: String,
    pub order: SortOrder,
    /// Search text; omitted when the debounced search is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The parameters that identify one page sequence.
///
/// Any change to the key invalidates the accumulated pages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    pub search: String,
    pub sort_by: String,
    pub order: SortOrder,
}

impl RequestKey {
    /// Build fetch parameters for this key.
    pub fn params(&self, limit: u32, after_id: Option<String>) -> PageParams {
        PageParams {
            after_id,
            limit,
            sort_by: self.sort_by.clone(),
            order: self.order,
            name: if self.search.is_empty() {
                None
            } else {
                Some(self.search.clone())
            },
        }
    }
}
