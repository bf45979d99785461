//! Offset-based pagination types for list endpoints.
//!
//! Page indexes are zero-based. The sort field is passed through to the
//! store as-is; direction is validated here.

use std::fmt;
use std::str::FromStr;

/// Sort direction for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("Invalid sort direction: {}", other)),
        }
    }
}

/// Validated page request: zero-based page index, page size, sort field
/// and direction.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
    pub sort: String,
    pub direction: SortDirection,
}

impl PageRequest {
    pub fn new(page: i64, size: i64, sort: String, direction: SortDirection) -> Result<Self, String> {
        if page < 0 {
            return Err("Page index must not be negative".to_string());
        }
        if size < 1 {
            return Err("Page size must be at least 1".to_string());
        }
        Ok(Self {
            page,
            size,
            sort,
            direction,
        })
    }

    /// SQL OFFSET for this page.
    pub fn offset(&self) -> i64 {
        self.page * self.size
    }
}

/// Total page count for a result set: `ceil(total_elements / size)`.
pub fn total_pages(total_elements: i64, size: i64) -> i64 {
    if size <= 0 {
        return 0;
    }
    (total_elements + size - 1) / size
}

/// Whether `page` is the last page of a result set.
pub fn is_last(page: i64, total_pages: i64) -> bool {
    page >= total_pages - 1
}
