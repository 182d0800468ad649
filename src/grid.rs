use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{DAYS_PER_WEEK, Date, MAX_WEEK_ROWS, RangeError, Weekday, YearMonth, prelude::*};

/// Zero-based row and column of a cell in the rendered grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[display(fmt = "({row}, {column})")]
pub struct GridPos {
    pub row:    usize,
    pub column: usize,
}

impl GridPos {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Row-major position of the cell counted from the top-left corner.
    pub const fn flat_index(&self) -> usize {
        self.row * DAYS_PER_WEEK + self.column
    }

    const fn from_flat_index(index: usize) -> Self {
        Self::new(index / DAYS_PER_WEEK, index % DAYS_PER_WEEK)
    }
}

/// One grid position bound to a date.
///
/// Cells carry no selection state; that is derived from the selection set
/// whenever the grid is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub date:             Date,
    pub pos:              GridPos,
    /// `false` for filler cells borrowed from the adjacent months.
    pub is_current_month: bool,
}

/// How many week rows a month grid spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridLayout {
    /// Only the rows the month touches (4 to 6).
    #[default]
    Compact,
    /// Always six rows, padding with next-month fillers.
    SixWeeks,
}

/// Which cells a drag from one position to another covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanShape {
    /// The row by column bounding box of both positions.
    #[default]
    Rectangle,
    /// Every cell between both positions in reading order, wrapping at row ends.
    Linear,
}

/// A month laid out as week rows of seven cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    month:     YearMonth,
    first_day: Weekday,
    layout:    GridLayout,
    rows:      Vec<[Cell; DAYS_PER_WEEK]>,
    index:     HashMap<Date, GridPos>,
}

impl Grid {
    /// Lays out `month` with columns starting on `first_day`.
    ///
    /// The same arguments always produce the same grid.
    ///
    /// # Errors
    /// Returns `RangeError::Unrepresentable` if a filler cell would fall outside
    /// the supported calendar range (only the very first and last months).
    #[tracing::instrument(level = "debug")]
    pub fn build(month: YearMonth, first_day: Weekday, layout: GridLayout) -> Result<Self, RangeError> {
        let unrepresentable = || RangeError::Unrepresentable { month };

        let first = month.first_day();
        let leading = first.weekday().column_from(first_day);
        let start = (0..leading)
            .try_fold(first, |date, _| date.pred())
            .ok_or_else(unrepresentable)?;

        let row_count = match layout {
            GridLayout::Compact => (leading + usize::from(month.days())).div_ceil(DAYS_PER_WEEK),
            GridLayout::SixWeeks => MAX_WEEK_ROWS,
        };

        let mut rows = Vec::with_capacity(row_count);
        let mut index = HashMap::with_capacity(row_count * DAYS_PER_WEEK);
        let mut next = Some(start);
        for row in 0..row_count {
            let mut week = [Cell {
                date:             start,
                pos:              GridPos::new(row, 0),
                is_current_month: false,
            }; DAYS_PER_WEEK];
            for (column, cell) in week.iter_mut().enumerate() {
                let date = next.ok_or_else(unrepresentable)?;
                next = date.succ();

                let pos = GridPos::new(row, column);
                *cell = Cell {
                    date,
                    pos,
                    is_current_month: month.contains(&date),
                };
                index.insert(date, pos);
            }
            rows.push(week);
        }

        trace!(rows = row_count, leading, "grid built");
        Ok(Self {
            month,
            first_day,
            layout,
            rows,
            index,
        })
    }

    pub const fn month(&self) -> YearMonth {
        self.month
    }

    pub const fn first_day(&self) -> Weekday {
        self.first_day
    }

    pub const fn layout(&self) -> GridLayout {
        self.layout
    }

    pub fn rows(&self) -> &[[Cell; DAYS_PER_WEEK]] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    pub fn cell_at(&self, pos: GridPos) -> Option<&Cell> {
        self.rows.get(pos.row)?.get(pos.column)
    }

    pub fn date_at(&self, pos: GridPos) -> Option<Date> {
        self.cell_at(pos).map(|cell| cell.date)
    }

    /// Where `date` sits in this grid, if it is shown at all.
    pub fn position_of(&self, date: &Date) -> Option<GridPos> {
        self.index.get(date).copied()
    }

    pub fn contains(&self, date: &Date) -> bool {
        self.index.contains_key(date)
    }

    /// Every date shown in `column`, filler cells included.
    pub fn column(&self, column: usize) -> Vec<Date> {
        self.rows
            .iter()
            .filter_map(|week| week.get(column))
            .map(|cell| cell.date)
            .collect()
    }

    /// Dates covered by a drag between `from` and `to`, both ends inclusive.
    ///
    /// Positions outside the grid are clipped to it.
    pub fn span(&self, from: GridPos, to: GridPos, shape: SpanShape) -> Vec<Date> {
        match shape {
            SpanShape::Rectangle => {
                let rows = from.row.min(to.row)..=from.row.max(to.row);
                let columns = from.column.min(to.column)..=from.column.max(to.column);
                self.rows
                    .iter()
                    .enumerate()
                    .filter(|(row, _)| rows.contains(row))
                    .flat_map(|(_, week)| {
                        week.iter()
                            .filter(|cell| columns.contains(&cell.pos.column))
                            .map(|cell| cell.date)
                    })
                    .collect()
            },
            SpanShape::Linear => {
                let low = from.flat_index().min(to.flat_index());
                let high = from.flat_index().max(to.flat_index());
                (low..=high)
                    .map(GridPos::from_flat_index)
                    .filter_map(|pos| self.date_at(pos))
                    .collect()
            },
        }
    }
}
