use std::fmt::Write;
use unsegen::base::*;
use unsegen::widget::*;

use crate::picker::MonthGrid;

use super::Context;

const PANE_WIDTH: usize = MonthGrid::COLUMNS * MonthGrid::CELL_WIDTH;

/// Previous/next month controls above the month pane.
pub struct ControlsBar<'a> {
    context: &'a Context,
}

impl<'a> ControlsBar<'a> {
    const PREV: &'static str = "< Prev";
    const NEXT: &'static str = "Next >";

    pub fn new(context: &'a Context) -> Self {
        ControlsBar { context }
    }

    pub fn line(&self) -> String {
        let label = self.context.picker().cursor().to_string();
        let label_width = PANE_WIDTH - Self::PREV.len() - Self::NEXT.len();

        format!(
            "{}{:^width$}{}",
            Self::PREV,
            label,
            Self::NEXT,
            width = label_width
        )
    }

    pub fn title(&self) -> String {
        let cursor = self.context.picker().cursor();
        format!(
            "{:^width$}",
            format!("{} {}", cursor.month().name(), cursor.year()),
            width = PANE_WIDTH
        )
    }
}

impl Widget for ControlsBar<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(PANE_WIDTH),
            height: RowDemand::exact(2),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = self.context.theme();
        let mut cursor = Cursor::new(&mut window).style_modifier(theme.controls_style);

        if let Err(err) = writeln!(&mut cursor, "{}", self.line()) {
            log::warn!("Error while writing month controls: {}", err);
        }

        cursor.set_style_modifier(theme.month_header_style);
        if let Err(err) = write!(&mut cursor, "{}", self.title()) {
            log::warn!("Error while writing month title: {}", err);
        }
    }
}

/// Selection summary, or the last error if one is pending.
pub struct StatusLine<'a> {
    context: &'a Context,
}

impl<'a> StatusLine<'a> {
    pub fn new(context: &'a Context) -> Self {
        StatusLine { context }
    }

    pub fn text(&self) -> String {
        match &self.context.last_error_message {
            Some(msg) => msg.clone(),
            None => format!("Range: {}", self.context.picker().range()),
        }
    }
}

impl Widget for StatusLine<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(PANE_WIDTH),
            height: RowDemand::exact(1),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let mut cursor = Cursor::new(&mut window);

        if self.context.last_error_message.is_some() {
            cursor.set_style_modifier(self.context.theme().error_style);
        }

        if let Err(err) = write!(&mut cursor, "{}", self.text()) {
            log::warn!("Error while writing status line: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::{DatePicker, WeekStart};
    use crate::ui::Theme;
    use chrono::NaiveDate;

    fn context() -> Context {
        let focus = NaiveDate::from_ymd_opt(2026, 10, 5).unwrap();
        Context::new(DatePicker::new(focus, WeekStart::Monday), Theme::default())
    }

    #[test]
    fn controls_show_month_label() {
        let context = context();
        let bar = ControlsBar::new(&context);

        assert_eq!(bar.line(), "< Prev    10/2026     Next >");
        assert_eq!(bar.line().len(), PANE_WIDTH);
        assert_eq!(bar.title().trim(), "October 2026");
    }

    #[test]
    fn status_prefers_errors() {
        let mut context = context();
        assert_eq!(StatusLine::new(&context).text(), "Range: no selection");

        context.select_focused();
        assert_eq!(StatusLine::new(&context).text(), "Range: 2026-10-05 .. ?");

        context.last_error_message = Some("invalid command".to_owned());
        assert_eq!(StatusLine::new(&context).text(), "invalid command");
    }
}
