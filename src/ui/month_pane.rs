use std::fmt::Display;
use std::fmt::Write;
use unsegen::base::*;
use unsegen::widget::*;

use crate::picker::{DayState, GridCell, MonthGrid};

use super::{Context, Theme};

pub struct DayCell<'a> {
    day: &'a DayState,
    theme: &'a Theme,
}

impl<'a> DayCell<'a> {
    pub const CELL_HEIGHT: usize = 1;
    pub const CELL_WIDTH: usize = MonthGrid::CELL_WIDTH;

    pub fn new(day: &'a DayState, theme: &'a Theme) -> Self {
        DayCell { day, theme }
    }

    /// Style layers in the order they apply on top of `day_style`.
    pub fn styles(&self) -> Vec<StyleModifier> {
        let theme = self.theme;

        vec![
            (self.day.weekend, theme.weekend_day_style),
            (self.day.in_range, theme.range_day_style),
            (self.day.selected, theme.selected_day_style),
            (self.day.today, theme.today_day_style),
            (self.day.focused, theme.focus_day_style),
        ]
        .into_iter()
        .filter_map(|(active, style)| if active { Some(style) } else { None })
        .collect()
    }

    fn marker(&self) -> char {
        let theme = self.theme;
        let chosen = if self.day.focused {
            theme.focus_day_char
        } else if self.day.selected {
            theme.selected_day_char
        } else if self.day.in_range {
            theme.range_day_char
        } else {
            None
        };

        chosen.unwrap_or(' ')
    }
}

impl Display for DayCell<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arg_today = if self.day.today {
            self.theme.today_day_char.unwrap_or(' ')
        } else {
            ' '
        };

        write!(f, "{}{}{:>2}", arg_today, self.marker(), self.day.day())
    }
}

pub struct MonthPane<'a> {
    context: &'a Context,
}

impl<'a> MonthPane<'a> {
    const ROWS: usize = 6;
    const HEADER_ROWS: usize = 1;

    pub fn new(context: &'a Context) -> Self {
        MonthPane { context }
    }
}

impl Widget for MonthPane<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(MonthGrid::COLUMNS * DayCell::CELL_WIDTH),
            height: RowDemand::exact(Self::HEADER_ROWS + Self::ROWS * DayCell::CELL_HEIGHT),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = self.context.theme();
        let grid = self.context.picker().grid(Some(self.context.today()));

        let mut cursor = Cursor::new(&mut window).style_modifier(theme.month_header_style);

        for head in grid.header() {
            if let Err(err) = write!(&mut cursor, "{:>width$}", head, width = DayCell::CELL_WIDTH) {
                log::warn!("Error while writing weekday header: {}", err);
            }
        }

        for (row_idx, row) in grid.rows().enumerate() {
            cursor.move_to(
                ColIndex::new(0),
                RowIndex::new((Self::HEADER_ROWS + row_idx * DayCell::CELL_HEIGHT) as i32),
            );

            for cell in row {
                let result = match cell {
                    GridCell::Blank => {
                        cursor.set_style_modifier(theme.day_style);
                        write!(&mut cursor, "{:width$}", "", width = DayCell::CELL_WIDTH)
                    }
                    GridCell::Day(day) => {
                        let cell = DayCell::new(day, theme);
                        cursor.set_style_modifier(theme.day_style);
                        for style in cell.styles() {
                            cursor.apply_style_modifier(style);
                        }
                        write!(&mut cursor, "{}", cell)
                    }
                };

                if let Err(err) = result {
                    log::warn!("Error while writing day cell: {}", err);
                }
            }
        }
    }
}
