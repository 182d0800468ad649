use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    CalendarConfig, ConfigError, DAYS_PER_WEEK, Date, Grid, GridPos, Intent, LocaleLabels,
    LocaleProvider, SelectionMachine, Transition, YearMonth,
};

/// Keys the view reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Enter,
    Space,
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

/// Raw input as delivered by the host surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum InputEvent {
    MouseDown(GridPos),
    MouseOver(GridPos),
    MouseUp,
    /// Pointer left the grid surface.
    MouseLeave,
    Click(GridPos),
    HeaderClick(usize),
    /// Month selector value, `YYYY-MM`.
    MonthSelected(String),
    /// Locale selector value, e.g. `fr-ca`.
    LocaleSelected(String),
    Key(Key),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub column: usize,
    pub label:  &'static str,
    /// Button text as displayed, padded with one space on each side.
    pub text:   String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub date:             Date,
    pub pos:              GridPos,
    /// Day of month as displayed.
    pub label:            String,
    pub is_current_month: bool,
    pub is_selected:      bool,
    pub is_focused:       bool,
}

/// Everything needed to draw the widget once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCalendar {
    pub heading:     String,
    /// Month selector value, `YYYY-MM`.
    pub month_value: String,
    pub locale:      String,
    pub headers:     Vec<HeaderView>,
    pub rows:        Vec<Vec<CellView>>,
}

impl RenderedCalendar {
    pub fn cell(&self, pos: GridPos) -> Option<&CellView> {
        self.rows.get(pos.row)?.get(pos.column)
    }

    pub fn cells(&self) -> impl Iterator<Item = &CellView> {
        self.rows.iter().flatten()
    }

    /// Number of cells carrying the selected flag.
    pub fn selected_count(&self) -> usize {
        self.cells().filter(|cell| cell.is_selected).count()
    }
}

/// Binds a [`SelectionMachine`] to raw input events and renders it.
#[derive(Debug, Clone)]
pub struct CalendarView {
    machine:  SelectionMachine,
    provider: LocaleProvider,
    labels:   LocaleLabels,
    heading:  String,
    focus:    Option<GridPos>,
    /// Cell of the last press that ended a drag; the click the host sends
    /// right after it belongs to that gesture.
    released: Option<GridPos>,
    pressed:  Option<GridPos>,
}

impl CalendarView {
    /// Builds a view with default settings for `month` in `locale`.
    ///
    /// # Errors
    /// Returns `ConfigError::Range` if `month` cannot be laid out.
    pub fn new(month: YearMonth, locale: &str) -> Result<Self, ConfigError> {
        Self::from_config(&CalendarConfig {
            initial_month: Some(month),
            locale: locale.to_owned(),
            ..CalendarConfig::default()
        })
    }

    /// # Errors
    /// Returns `ConfigError` if the config is inconsistent or its start month
    /// cannot be laid out.
    pub fn from_config(config: &CalendarConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let provider = LocaleProvider::new();
        let labels = provider.labels_for(&config.locale);
        let grid = Grid::build(config.start_month(), labels.first_day, config.layout)?;
        let mut machine = SelectionMachine::new(grid, config.span_shape);
        if let Some(bounds) = config.bounds {
            machine = machine.with_bounds(bounds);
        }

        debug!(locale = %labels.locale, month = %machine.grid().month(), "calendar view created");
        Ok(Self {
            machine,
            provider,
            labels,
            heading: config.heading.clone(),
            focus: None,
            released: None,
            pressed: None,
        })
    }

    pub const fn machine(&self) -> &SelectionMachine {
        &self.machine
    }

    pub const fn labels(&self) -> &LocaleLabels {
        &self.labels
    }

    pub const fn focus(&self) -> Option<GridPos> {
        self.focus
    }

    /// Translates one raw event into intents and applies them.
    pub fn handle(&mut self, event: InputEvent) -> Transition {
        let released = self.released.take();
        match event {
            InputEvent::MouseDown(pos) => {
                self.pressed = Some(pos);
                self.intent_at(pos, Intent::DragStart)
            },
            InputEvent::MouseOver(pos) => {
                if !self.machine.is_dragging() {
                    return Transition::default();
                }
                self.intent_at(pos, Intent::DragOver)
            },
            InputEvent::MouseUp => {
                if self.machine.is_dragging() {
                    self.released = self.pressed;
                }
                self.pressed = None;
                self.machine.apply(Intent::DragEnd)
            },
            InputEvent::MouseLeave => {
                self.pressed = None;
                self.machine.apply(Intent::DragCancel)
            },
            InputEvent::Click(pos) => {
                self.focus = self.machine.grid().cell_at(pos).map(|cell| cell.pos);
                if released == Some(pos) {
                    debug!(%pos, "click completes a press already applied");
                    return Transition::default();
                }
                self.intent_at(pos, Intent::CellClick)
            },
            InputEvent::HeaderClick(column) => self.machine.apply(Intent::ColumnHeaderClick(column)),
            InputEvent::MonthSelected(value) => match value.parse::<YearMonth>() {
                Ok(month) => {
                    let transition = self.machine.apply(Intent::MonthChange(month));
                    self.clamp_focus();
                    transition
                },
                Err(err) => {
                    warn!(%value, error = %err, "ignoring malformed month selector value");
                    Transition::default()
                },
            },
            InputEvent::LocaleSelected(tag) => self.switch_locale(&tag),
            InputEvent::Key(key) => self.handle_key(key),
        }
    }

    /// Renders every cell with its selection flag read from the selection set.
    pub fn render(&self) -> RenderedCalendar {
        let grid = self.machine.grid();
        let headers = self
            .labels
            .labels
            .iter()
            .enumerate()
            .map(|(column, &label)| HeaderView {
                column,
                label,
                text: format!(" {label} "),
            })
            .collect();

        let rows = grid
            .rows()
            .iter()
            .map(|week| {
                week.iter()
                    .map(|cell| CellView {
                        date:             cell.date,
                        pos:              cell.pos,
                        label:            cell.date.day().to_string(),
                        is_current_month: cell.is_current_month,
                        is_selected:      self.machine.is_selected(&cell.date),
                        is_focused:       self.focus == Some(cell.pos),
                    })
                    .collect()
            })
            .collect();

        RenderedCalendar {
            heading: self.heading.clone(),
            month_value: grid.month().to_string(),
            locale: self.labels.locale.tag(),
            headers,
            rows,
        }
    }

    fn intent_at(&mut self, pos: GridPos, intent: fn(Date) -> Intent) -> Transition {
        match self.machine.grid().date_at(pos) {
            Some(date) => self.machine.apply(intent(date)),
            None => {
                debug!(%pos, "event outside grid, ignoring");
                Transition::default()
            },
        }
    }

    fn switch_locale(&mut self, tag: &str) -> Transition {
        self.pressed = None;
        self.labels = self.provider.labels_for(tag);
        debug!(tag, resolved = %self.labels.locale, "locale switched");
        let transition = self.machine.relayout(self.labels.first_day);
        self.clamp_focus();
        // Header labels change even when the column order does not.
        Transition {
            relaid: true,
            ..transition
        }
    }

    fn handle_key(&mut self, key: Key) -> Transition {
        match key {
            Key::Escape => {
                self.pressed = None;
                self.machine.apply(Intent::DragCancel)
            },
            Key::Enter | Key::Space => match self.focus {
                Some(pos) => self.intent_at(pos, Intent::CellClick),
                None => Transition::default(),
            },
            Key::ArrowLeft | Key::ArrowRight | Key::ArrowUp | Key::ArrowDown => {
                self.move_focus(key);
                Transition::default()
            },
        }
    }

    fn move_focus(&mut self, key: Key) {
        let grid = self.machine.grid();
        let Some(pos) = self.focus else {
            self.focus = grid
                .position_of(&grid.month().first_day())
                .or(Some(GridPos::new(0, 0)));
            return;
        };

        let last_row = grid.row_count().saturating_sub(1);
        let next = match key {
            Key::ArrowLeft if pos.column > 0 => GridPos::new(pos.row, pos.column - 1),
            Key::ArrowLeft if pos.row > 0 => GridPos::new(pos.row - 1, DAYS_PER_WEEK - 1),
            Key::ArrowRight if pos.column + 1 < DAYS_PER_WEEK => GridPos::new(pos.row, pos.column + 1),
            Key::ArrowRight if pos.row < last_row => GridPos::new(pos.row + 1, 0),
            Key::ArrowUp => GridPos::new(pos.row.saturating_sub(1), pos.column),
            Key::ArrowDown => GridPos::new((pos.row + 1).min(last_row), pos.column),
            _ => pos,
        };
        self.focus = Some(next);
    }

    fn clamp_focus(&mut self) {
        let last_row = self.machine.grid().row_count().saturating_sub(1);
        if let Some(pos) = &mut self.focus {
            pos.row = pos.row.min(last_row);
        }
    }
}
