//! Click-to-sort table headers.
//!
//! The query carries `order` (the label of the column to sort by) and `sort`
//! (`asc` or `desc`). Only the Block Type column is sortable, so any other
//! `order` falls back to the default: Block Type, ascending.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Label of the only sortable column.
pub const BLOCK_TYPE_COLUMN: &str = "Block Type";

/// Sort direction of the active column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` in any case selects descending; anything else is ascending.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Raw `order` / `sort` query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSortQuery {
    pub order: Option<String>,
    pub sort: Option<String>,
}

impl TableSortQuery {
    pub fn new(order: Option<&str>, sort: Option<&str>) -> Self {
        Self {
            order: order.map(str::to_owned),
            sort: sort.map(str::to_owned),
        }
    }

    /// True when `order` is absent or names the Block Type column.
    pub fn targets_block_type(&self) -> bool {
        self.order
            .as_deref()
            .map_or(true, |order| order == BLOCK_TYPE_COLUMN)
    }

    /// Effective direction for the Block Type column.
    pub fn direction(&self) -> SortDirection {
        if !self.targets_block_type() {
            return SortDirection::default();
        }
        self.sort
            .as_deref()
            .map(SortDirection::parse)
            .unwrap_or_default()
    }
}

/// Stable, case-insensitive sort of `rows` by the string `key` returns.
///
/// Rows with equal keys keep their relative order in both directions.
pub fn sort_rows<T, F>(rows: &mut [T], direction: SortDirection, key: F)
where
    F: Fn(&T) -> &str,
{
    match direction {
        SortDirection::Asc => rows.sort_by(|a, b| compare_ci(key(a), key(b))),
        SortDirection::Desc => rows.sort_by(|a, b| compare_ci(key(b), key(a))),
    }
}

fn compare_ci(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
