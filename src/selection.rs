use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{DAYS_PER_WEEK, Date, Grid, MonthRange, SpanShape, Weekday, YearMonth};

/// The set of selected dates. Membership is the only selection state there is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet(BTreeSet<Date>);

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: &Date) -> bool {
        self.0.contains(date)
    }

    /// Returns `true` if the date was not selected before.
    pub fn insert(&mut self, date: Date) -> bool {
        self.0.insert(date)
    }

    /// Returns `true` if the date was selected before.
    pub fn remove(&mut self, date: &Date) -> bool {
        self.0.remove(date)
    }

    /// Flips membership of `date` and returns whether it is now selected.
    pub fn toggle(&mut self, date: Date) -> bool {
        if self.0.remove(&date) {
            false
        } else {
            self.0.insert(date);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Selected dates in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = &Date> {
        self.0.iter()
    }

    /// Dates selected in exactly one of the two sets.
    fn flipped_against(&self, other: &Self) -> Vec<Date> {
        self.0.symmetric_difference(&other.0).copied().collect()
    }
}

impl FromIterator<Date> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = Date>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a Date;
    type IntoIter = std::collections::btree_set::Iter<'a, Date>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Whether a drag adds its span to the selection or removes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragMode {
    Additive,
    Subtractive,
}

/// An in-progress drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    anchor:  Date,
    current: Date,
    mode:    DragMode,
    /// Selection as it was at drag start; every span is applied on top of it.
    base:    SelectionSet,
    moved:   bool,
}

impl DragSession {
    pub const fn anchor(&self) -> Date {
        self.anchor
    }

    pub const fn current(&self) -> Date {
        self.current
    }

    pub const fn mode(&self) -> DragMode {
        self.mode
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// One discrete user intention, already resolved to dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Intent {
    CellClick(Date),
    ColumnHeaderClick(usize),
    DragStart(Date),
    DragOver(Date),
    DragEnd,
    DragCancel,
    MonthChange(YearMonth),
    NextMonth,
    PrevMonth,
}

/// What an intent changed, so a renderer can redraw only the affected cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// Dates whose selection membership flipped, in chronological order.
    pub flipped: Vec<Date>,
    /// The grid was rebuilt (new month or new first day of week).
    pub relaid:  bool,
}

impl Transition {
    fn flipped(mut flipped: Vec<Date>) -> Self {
        flipped.sort_unstable();
        Self {
            flipped,
            relaid: false,
        }
    }

    const fn relaid() -> Self {
        Self {
            flipped: Vec::new(),
            relaid:  true,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.flipped.is_empty() && !self.relaid
    }
}

/// Owns the displayed grid, the selection set and the drag session.
///
/// Every intent is processed to completion by [`SelectionMachine::apply`]
/// before the next one is looked at.
#[derive(Debug, Clone)]
pub struct SelectionMachine {
    grid:       Grid,
    selection:  SelectionSet,
    state:      State,
    span_shape: SpanShape,
    bounds:     Option<MonthRange>,
}

impl SelectionMachine {
    pub fn new(grid: Grid, span_shape: SpanShape) -> Self {
        Self {
            grid,
            selection: SelectionSet::new(),
            state: State::Idle,
            span_shape,
            bounds: None,
        }
    }

    /// Restricts month navigation to `bounds`. Out-of-range requests are clamped.
    #[must_use]
    pub fn with_bounds(mut self, bounds: MonthRange) -> Self {
        self.bounds = Some(bounds);
        self
    }

    #[must_use]
    pub fn with_selection(mut self, selection: SelectionSet) -> Self {
        self.selection = selection;
        self
    }

    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    pub const fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub const fn state(&self) -> &State {
        &self.state
    }

    pub const fn span_shape(&self) -> SpanShape {
        self.span_shape
    }

    pub const fn bounds(&self) -> Option<MonthRange> {
        self.bounds
    }

    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, State::Dragging(_))
    }

    pub const fn drag_session(&self) -> Option<&DragSession> {
        match &self.state {
            State::Dragging(session) => Some(session),
            State::Idle => None,
        }
    }

    pub fn is_selected(&self, date: &Date) -> bool {
        self.selection.contains(date)
    }

    /// Processes one intent.
    #[tracing::instrument(level = "debug", skip(self), fields(dragging = self.is_dragging()))]
    pub fn apply(&mut self, intent: Intent) -> Transition {
        match intent {
            Intent::CellClick(date) => {
                self.abandon_drag("cell click");
                if !self.grid.contains(&date) {
                    debug!(%date, "cell click outside grid, ignoring");
                    return Transition::default();
                }
                let selected = self.selection.toggle(date);
                debug!(%date, selected, "cell toggled");
                Transition::flipped(vec![date])
            },
            Intent::ColumnHeaderClick(column) => {
                self.abandon_drag("column header click");
                self.toggle_column(column)
            },
            Intent::DragStart(date) => {
                self.abandon_drag("new drag start");
                self.start_drag(date);
                Transition::default()
            },
            Intent::DragOver(date) => self.drag_over(date),
            Intent::DragEnd => self.end_drag(),
            Intent::DragCancel => {
                if self.is_dragging() {
                    debug!("drag cancelled, keeping last applied span");
                    self.state = State::Idle;
                }
                Transition::default()
            },
            Intent::MonthChange(month) => self.change_month(month),
            Intent::NextMonth => match self.grid.month().next() {
                Some(month) => self.change_month(month),
                None => Transition::default(),
            },
            Intent::PrevMonth => match self.grid.month().prev() {
                Some(month) => self.change_month(month),
                None => Transition::default(),
            },
        }
    }

    /// Rebuilds the grid for the same month with a new first day of week,
    /// as after a locale switch. The selection is kept.
    pub fn relayout(&mut self, first_day: Weekday) -> Transition {
        self.abandon_drag("relayout");
        if first_day == self.grid.first_day() {
            return Transition::default();
        }
        match Grid::build(self.grid.month(), first_day, self.grid.layout()) {
            Ok(grid) => {
                debug!(%first_day, "grid relaid");
                self.grid = grid;
                Transition::relaid()
            },
            Err(err) => {
                warn!(error = %err, "cannot relayout grid, keeping current layout");
                Transition::default()
            },
        }
    }

    /// A drag left open (e.g. pointer capture lost) is closed as if cancelled.
    fn abandon_drag(&mut self, reason: &'static str) {
        if let State::Dragging(session) = &self.state {
            warn!(anchor = %session.anchor, reason, "abandoning unterminated drag");
            self.state = State::Idle;
        }
    }

    fn toggle_column(&mut self, column: usize) -> Transition {
        if column >= DAYS_PER_WEEK {
            warn!(column, "column header out of range, ignoring");
            return Transition::default();
        }

        let dates = self.grid.column(column);
        let all_selected = dates.iter().all(|date| self.selection.contains(date));
        let flipped: Vec<Date> = if all_selected {
            dates.into_iter().filter(|date| self.selection.remove(date)).collect()
        } else {
            dates.into_iter().filter(|date| self.selection.insert(*date)).collect()
        };
        debug!(column, deselected = all_selected, count = flipped.len(), "column toggled");
        Transition::flipped(flipped)
    }

    fn start_drag(&mut self, date: Date) {
        if !self.grid.contains(&date) {
            debug!(%date, "drag start outside grid, ignoring");
            return;
        }
        let mode = if self.selection.contains(&date) {
            DragMode::Subtractive
        } else {
            DragMode::Additive
        };
        debug!(%date, ?mode, "drag started");
        self.state = State::Dragging(DragSession {
            anchor: date,
            current: date,
            mode,
            base: self.selection.clone(),
            moved: false,
        });
    }

    fn drag_over(&mut self, date: Date) -> Transition {
        let State::Dragging(session) = &mut self.state else {
            trace!(%date, "drag over while idle, ignoring");
            return Transition::default();
        };
        let (Some(from), Some(to)) = (
            self.grid.position_of(&session.anchor),
            self.grid.position_of(&date),
        ) else {
            debug!(%date, "drag over outside grid, ignoring");
            return Transition::default();
        };

        let span = self.grid.span(from, to, self.span_shape);
        trace!(%from, %to, cells = span.len(), "applying drag span");

        let mut next = session.base.clone();
        match session.mode {
            DragMode::Additive => span.into_iter().for_each(|d| {
                next.insert(d);
            }),
            DragMode::Subtractive => span.iter().for_each(|d| {
                next.remove(d);
            }),
        }
        session.current = date;
        session.moved = true;

        let flipped = self.selection.flipped_against(&next);
        self.selection = next;
        Transition::flipped(flipped)
    }

    fn end_drag(&mut self) -> Transition {
        let State::Dragging(session) = std::mem::take(&mut self.state) else {
            trace!("drag end while idle, ignoring");
            return Transition::default();
        };
        if session.moved {
            debug!(anchor = %session.anchor, current = %session.current, "drag finished");
            return Transition::default();
        }

        // A drag that never moved is a click on its anchor.
        let anchor = session.anchor;
        match session.mode {
            DragMode::Additive => self.selection.insert(anchor),
            DragMode::Subtractive => self.selection.remove(&anchor),
        };
        debug!(%anchor, "drag without movement treated as click");
        Transition::flipped(vec![anchor])
    }

    fn change_month(&mut self, requested: YearMonth) -> Transition {
        if self.is_dragging() {
            debug!("month change cancels open drag");
            self.state = State::Idle;
        }

        let month = self.bounds.map_or(requested, |bounds| bounds.clamp(requested));
        if month != requested {
            debug!(%requested, %month, "month clamped to bounds");
        }
        if month == self.grid.month() {
            return Transition::default();
        }

        match Grid::build(month, self.grid.first_day(), self.grid.layout()) {
            Ok(grid) => {
                debug!(%month, kept = self.selection.len(), "month changed");
                self.grid = grid;
                Transition::relaid()
            },
            Err(err) => {
                warn!(error = %err, "cannot show month, staying on current one");
                Transition::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, year_month};
    use crate::{GridLayout, GridPos};

    fn machine(shape: SpanShape) -> SelectionMachine {
        let grid = Grid::build(year_month(2020, 12), Weekday::SUNDAY, GridLayout::Compact).unwrap();
        let machine = SelectionMachine::new(grid, shape);
        assert_eq!(machine.span_shape(), shape);
        assert_eq!(machine.bounds(), None);
        machine
    }

    fn at(machine: &SelectionMachine, row: usize, column: usize) -> Date {
        machine.grid().date_at(GridPos::new(row, column)).unwrap()
    }

    fn drag(machine: &mut SelectionMachine, from: Date, over: &[Date]) {
        machine.apply(Intent::DragStart(from));
        for date in over {
            machine.apply(Intent::DragOver(*date));
        }
        machine.apply(Intent::DragEnd);
    }

    #[test]
    fn test_click_toggles_and_is_reversible() {
        let mut m = machine(SpanShape::Rectangle);
        let d = at(&m, 2, 3);
        let before = m.selection().clone();

        let t = m.apply(Intent::CellClick(d));
        assert_eq!(t.flipped, vec![d]);
        assert!(m.is_selected(&d));

        m.apply(Intent::CellClick(d));
        assert!(!m.is_selected(&d));
        assert_eq!(m.selection(), &before);
    }

    #[test]
    fn test_click_pair_preserves_other_selection() {
        let mut m = machine(SpanShape::Rectangle)
            .with_selection([date(2020, 12, 1), date(2020, 12, 24)].into_iter().collect());
        let before = m.selection().clone();
        for cell in [date(2020, 12, 1), date(2020, 12, 9), date(2021, 1, 2)] {
            m.apply(Intent::CellClick(cell));
            m.apply(Intent::CellClick(cell));
            assert_eq!(m.selection(), &before, "pair of clicks on {cell}");
        }
    }

    #[test]
    fn test_column_header_all_or_nothing() {
        let mut m = machine(SpanShape::Rectangle);
        let column = m.grid().column(3);

        m.apply(Intent::ColumnHeaderClick(3));
        assert!(column.iter().all(|d| m.is_selected(d)));
        assert_eq!(m.selection().len(), column.len());

        m.apply(Intent::ColumnHeaderClick(3));
        assert!(m.selection().is_empty());
    }

    #[test]
    fn test_column_header_partial_column_selects_rest() {
        let mut m = machine(SpanShape::Rectangle);
        let column = m.grid().column(4);
        let outside = at(&m, 0, 0);
        m.apply(Intent::CellClick(column[1]));
        m.apply(Intent::CellClick(outside));

        let t = m.apply(Intent::ColumnHeaderClick(4));
        assert_eq!(t.flipped.len(), column.len() - 1);
        assert!(column.iter().all(|d| m.is_selected(d)));
        assert!(m.is_selected(&outside));

        m.apply(Intent::ColumnHeaderClick(4));
        assert!(column.iter().all(|d| !m.is_selected(d)));
        assert!(m.is_selected(&outside));
    }

    #[test]
    fn test_column_header_out_of_range_is_noop() {
        let mut m = machine(SpanShape::Rectangle);
        assert!(m.apply(Intent::ColumnHeaderClick(7)).is_noop());
        assert!(m.selection().is_empty());
    }

    #[test]
    fn test_drag_without_move_equals_click() {
        for preselected in [false, true] {
            let mut clicked = machine(SpanShape::Rectangle);
            let d = at(&clicked, 1, 1);
            if preselected {
                clicked = clicked.with_selection([d].into_iter().collect());
            }
            let mut dragged = clicked.clone();

            clicked.apply(Intent::CellClick(d));
            let t = dragged.apply(Intent::DragStart(d));
            assert!(t.is_noop(), "drag start must not touch the selection");
            dragged.apply(Intent::DragEnd);

            assert_eq!(clicked.selection(), dragged.selection(), "preselected = {preselected}");
            assert!(!dragged.is_dragging());
        }
    }

    #[test]
    fn test_rectangle_drag_selects_six_cells() {
        let mut m = machine(SpanShape::Rectangle);
        let from = at(&m, 0, 3);
        let to = at(&m, 1, 5);
        drag(&mut m, from, &[to]);

        assert_eq!(m.selection().len(), 6);
        for row in 0..=1 {
            for column in 3..=5 {
                assert!(m.is_selected(&at(&m, row, column)));
            }
        }
    }

    #[test]
    fn test_linear_drag_matches_ui_fixture_counts() {
        let mut m = machine(SpanShape::Linear);
        let (a, b) = (at(&m, 2, 3), at(&m, 3, 5));
        drag(&mut m, a, &[b]);
        assert_eq!(m.selection().len(), 10);

        // Starts on a selected cell, so this drag removes its span.
        let (c, d) = (at(&m, 2, 4), at(&m, 3, 3));
        drag(&mut m, c, &[d]);
        assert_eq!(m.selection().len(), 3);
    }

    #[test]
    fn test_drag_over_recomputes_instead_of_accumulating() {
        let mut m = machine(SpanShape::Rectangle);
        let anchor = at(&m, 1, 1);
        m.apply(Intent::DragStart(anchor));
        m.apply(Intent::DragOver(at(&m, 3, 4)));
        assert_eq!(m.selection().len(), 12);

        // Shrinking the span reverts the cells it no longer covers.
        let t = m.apply(Intent::DragOver(at(&m, 2, 2)));
        assert_eq!(m.selection().len(), 4);
        assert_eq!(t.flipped.len(), 8);
        m.apply(Intent::DragEnd);
        assert_eq!(m.selection().len(), 4);
    }

    #[test]
    fn test_subtractive_drag_restores_when_shrunk() {
        let mut m = machine(SpanShape::Rectangle);
        m.apply(Intent::ColumnHeaderClick(2));
        m.apply(Intent::ColumnHeaderClick(3));
        let full = m.selection().clone();

        let anchor = at(&m, 0, 2);
        m.apply(Intent::DragStart(anchor));
        assert_eq!(m.drag_session().map(DragSession::mode), Some(DragMode::Subtractive));
        m.apply(Intent::DragOver(at(&m, 4, 3)));
        assert!(m.selection().is_empty());

        m.apply(Intent::DragOver(anchor));
        assert_eq!(m.selection().len(), full.len() - 1);
        assert!(!m.is_selected(&anchor));
    }

    #[test]
    fn test_duplicate_and_reordered_drag_over_is_idempotent() {
        let mut m = machine(SpanShape::Rectangle);
        let anchor = at(&m, 1, 1);
        let (near, far) = (at(&m, 2, 2), at(&m, 3, 3));

        m.apply(Intent::DragStart(anchor));
        assert_eq!(m.drag_session().map(DragSession::current), Some(anchor));
        m.apply(Intent::DragOver(far));
        assert_eq!(m.drag_session().map(DragSession::current), Some(far));
        let once = m.selection().clone();
        let t = m.apply(Intent::DragOver(far));
        assert!(t.is_noop());
        assert_eq!(m.selection(), &once);

        m.apply(Intent::DragOver(near));
        m.apply(Intent::DragOver(far));
        assert_eq!(m.selection(), &once);
    }

    #[test]
    fn test_drag_leaves_unrelated_selection_alone() {
        let keep = date(2020, 12, 31);
        let mut m = machine(SpanShape::Rectangle).with_selection([keep].into_iter().collect());
        let (a, b) = (at(&m, 0, 0), at(&m, 1, 1));
        drag(&mut m, a, &[b]);
        assert!(m.is_selected(&keep));
        assert_eq!(m.selection().len(), 5);
    }

    #[test]
    fn test_drag_cancel_keeps_last_span() {
        let mut m = machine(SpanShape::Rectangle);
        let (a, b) = (at(&m, 0, 0), at(&m, 0, 2));
        m.apply(Intent::DragStart(a));
        m.apply(Intent::DragOver(b));
        m.apply(Intent::DragCancel);

        assert!(!m.is_dragging());
        assert_eq!(m.selection().len(), 3);
    }

    #[test]
    fn test_drag_cancel_before_move_changes_nothing() {
        let mut m = machine(SpanShape::Rectangle);
        let a = at(&m, 0, 0);
        m.apply(Intent::DragStart(a));
        m.apply(Intent::DragCancel);
        assert!(m.selection().is_empty());
        assert_eq!(m.state(), &State::Idle);
    }

    #[test]
    fn test_stale_drag_recovered_by_next_drag_start() {
        let mut m = machine(SpanShape::Rectangle);
        let (a, b, c) = (at(&m, 0, 0), at(&m, 0, 1), at(&m, 3, 3));
        m.apply(Intent::DragStart(a));
        m.apply(Intent::DragOver(b));
        // No DragEnd arrives.
        m.apply(Intent::DragStart(c));

        assert_eq!(m.drag_session().map(DragSession::anchor), Some(c));
        m.apply(Intent::DragEnd);
        assert_eq!(m.selection().len(), 3);
        assert!(m.is_selected(&a) && m.is_selected(&b) && m.is_selected(&c));
    }

    #[test]
    fn test_stale_drag_recovered_by_click() {
        let mut m = machine(SpanShape::Rectangle);
        let (a, b) = (at(&m, 0, 0), at(&m, 2, 2));
        m.apply(Intent::DragStart(a));
        m.apply(Intent::CellClick(b));

        assert!(!m.is_dragging());
        assert_eq!(m.selection().iter().copied().collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn test_idle_drag_events_are_ignored() {
        let mut m = machine(SpanShape::Rectangle);
        let d = at(&m, 1, 1);
        assert!(m.apply(Intent::DragOver(d)).is_noop());
        assert!(m.apply(Intent::DragEnd).is_noop());
        assert!(m.apply(Intent::DragCancel).is_noop());
        assert!(m.selection().is_empty());
    }

    #[test]
    fn test_click_and_still_drag_agree_outside_grid() {
        let outside = date(2021, 3, 1);
        let mut clicked = machine(SpanShape::Rectangle);
        let mut dragged = clicked.clone();

        assert!(clicked.apply(Intent::CellClick(outside)).is_noop());
        dragged.apply(Intent::DragStart(outside));
        dragged.apply(Intent::DragEnd);

        assert!(clicked.selection().is_empty());
        assert_eq!(clicked.selection(), dragged.selection());
    }

    #[test]
    fn test_drag_outside_grid_is_ignored() {
        let mut m = machine(SpanShape::Rectangle);
        let outside = date(2021, 3, 1);
        m.apply(Intent::DragStart(outside));
        assert!(!m.is_dragging());

        let inside = at(&m, 1, 1);
        m.apply(Intent::DragStart(inside));
        assert!(m.apply(Intent::DragOver(outside)).is_noop());
        assert!(m.is_dragging());
    }

    #[test]
    fn test_month_change_keeps_selection() {
        let mut m = machine(SpanShape::Rectangle);
        let d = date(2020, 12, 15);
        m.apply(Intent::CellClick(d));

        let t = m.apply(Intent::MonthChange(year_month(2021, 3)));
        assert!(t.relaid);
        assert_eq!(m.grid().month(), year_month(2021, 3));
        assert!(m.is_selected(&d));
        assert!(!m.grid().contains(&d));

        m.apply(Intent::MonthChange(year_month(2020, 12)));
        assert!(m.grid().contains(&d));
        assert!(m.is_selected(&d));
    }

    #[test]
    fn test_month_change_to_same_month_is_noop() {
        let mut m = machine(SpanShape::Rectangle);
        assert!(m.apply(Intent::MonthChange(year_month(2020, 12))).is_noop());
    }

    #[test]
    fn test_month_change_cancels_drag() {
        let mut m = machine(SpanShape::Rectangle);
        let (a, b) = (at(&m, 0, 0), at(&m, 0, 1));
        m.apply(Intent::DragStart(a));
        m.apply(Intent::DragOver(b));
        m.apply(Intent::NextMonth);

        assert!(!m.is_dragging());
        assert_eq!(m.grid().month(), year_month(2021, 1));
        assert_eq!(m.selection().len(), 2);
    }

    #[test]
    fn test_month_navigation_is_clamped_to_bounds() {
        let bounds = "2020-11/2021-01".parse::<MonthRange>().unwrap();
        let mut m = machine(SpanShape::Rectangle).with_bounds(bounds);
        assert_eq!(m.bounds(), Some(bounds));

        m.apply(Intent::MonthChange(year_month(2022, 6)));
        assert_eq!(m.grid().month(), year_month(2021, 1));
        assert!(m.apply(Intent::NextMonth).is_noop());

        m.apply(Intent::MonthChange(year_month(1999, 1)));
        assert_eq!(m.grid().month(), year_month(2020, 11));
        assert!(m.apply(Intent::PrevMonth).is_noop());
    }

    #[test]
    fn test_relayout_moves_columns_but_keeps_selection() {
        let mut m = machine(SpanShape::Rectangle);
        let d = date(2020, 12, 1);
        m.apply(Intent::CellClick(d));
        assert_eq!(m.grid().position_of(&d), Some(GridPos::new(0, 2)));

        let t = m.relayout(Weekday::MONDAY);
        assert!(t.relaid);
        assert_eq!(m.grid().position_of(&d), Some(GridPos::new(0, 1)));
        assert!(m.is_selected(&d));
        assert!(m.relayout(Weekday::MONDAY).is_noop());
    }

    #[test]
    fn test_intent_serde() {
        let intent = Intent::CellClick(date(2020, 12, 5));
        let json = serde_json::to_string(&intent).unwrap();
        assert_eq!(json, r#"{"type":"cell_click","value":"2020-12-05"}"#);
        let parsed: Intent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, intent);

        let json = serde_json::to_string(&Intent::DragEnd).unwrap();
        assert_eq!(json, r#"{"type":"drag_end"}"#);
    }

    #[test]
    fn test_selection_set_serde() {
        let set: SelectionSet = [date(2020, 12, 24), date(2020, 12, 1)].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["2020-12-01","2020-12-24"]"#);
    }
}
