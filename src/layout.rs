//! Subplot grid sizing and placement.

use crate::error::{Result, VizError};
use serde::{Deserialize, Serialize};

/// Columns picked by [`GridLayout::auto`] once there are enough items.
const AUTO_MAX_COLUMNS: usize = 3;

/// Rows needed to lay `item_count` items out in `desired_columns` columns.
///
/// Integer ceiling division; no floating point involved.
pub fn rows_needed(item_count: usize, desired_columns: usize) -> Result<usize> {
    if desired_columns == 0 {
        return Err(VizError::invalid("desired_columns must be at least 1"));
    }
    let full = item_count / desired_columns;
    Ok(if item_count % desired_columns == 0 {
        full
    } else {
        full + 1
    })
}

/// 1-based `(row, col)` of the item at `index` in a grid `desired_columns` wide.
pub fn position(index: usize, desired_columns: usize) -> Result<(usize, usize)> {
    if desired_columns == 0 {
        return Err(VizError::invalid("desired_columns must be at least 1"));
    }
    Ok((index / desired_columns + 1, index % desired_columns + 1))
}

/// Resolved grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: usize,
    pub columns: usize,
}

impl GridLayout {
    /// Grid for `item_count` items with a fixed column count.
    ///
    /// With no items the grid collapses to a single empty cell.
    pub fn for_items(item_count: usize, desired_columns: usize) -> Result<Self> {
        let rows = rows_needed(item_count, desired_columns)?;
        if item_count == 0 {
            return Ok(Self { rows: 1, columns: 1 });
        }
        Ok(Self {
            rows,
            columns: desired_columns,
        })
    }

    /// Grid with an automatically chosen column count (up to three wide).
    pub fn auto(item_count: usize) -> Self {
        let columns = item_count.clamp(1, AUTO_MAX_COLUMNS);
        let rows = item_count.div_ceil(columns).max(1);
        Self { rows, columns }
    }

    /// 1-based `(row, col)` for the item at `index`.
    pub fn cell(&self, index: usize) -> (usize, usize) {
        (index / self.columns + 1, index % self.columns + 1)
    }

    pub fn cells(&self) -> usize {
        self.rows * self.columns
    }
}
