use chrono::prelude::*;

use crate::config::ThemeConfig;
use crate::picker::{DatePicker, SelectOutcome};

use unsegen::base::style::*;
use unsegen::widget::builtin::PromptLine;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Command,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub day_style: StyleModifier,
    pub weekend_day_style: StyleModifier,
    pub range_day_style: StyleModifier,
    pub range_day_char: Option<char>,
    pub selected_day_style: StyleModifier,
    pub selected_day_char: Option<char>,
    pub focus_day_style: StyleModifier,
    pub focus_day_char: Option<char>,
    pub today_day_style: StyleModifier,
    pub today_day_char: Option<char>,
    pub month_header_style: StyleModifier,
    pub controls_style: StyleModifier,
    pub error_style: StyleModifier,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            day_style: StyleModifier::default(),
            weekend_day_style: StyleModifier::default().fg_color(Color::LightBlack),
            range_day_style: StyleModifier::default()
                .bg_color(Color::Green)
                .fg_color(Color::Black),
            range_day_char: None,
            selected_day_style: StyleModifier::default()
                .bg_color(Color::Blue)
                .fg_color(Color::White)
                .bold(true),
            selected_day_char: None,
            focus_day_style: StyleModifier::default().invert(true),
            focus_day_char: None,
            today_day_style: StyleModifier::default().italic(true),
            today_day_char: Some('*'),
            month_header_style: StyleModifier::default().fg_color(Color::Yellow),
            controls_style: StyleModifier::default().fg_color(Color::Cyan),
            error_style: StyleModifier::default().fg_color(Color::LightRed),
        }
    }
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Theme {
            today_day_char: config.today_char,
            focus_day_char: config.focus_char,
            selected_day_char: config.selected_char,
            range_day_char: config.range_char,
            ..Theme::default()
        }
    }
}

pub struct Context {
    pub mode: Mode,
    pub last_error_message: Option<String>,
    pub quit: bool,
    theme: Theme,
    picker: DatePicker,
    command_line: PromptLine,
    now: DateTime<Local>,
}

impl Context {
    pub fn new(picker: DatePicker, theme: Theme) -> Self {
        Context {
            mode: Mode::Normal,
            last_error_message: None,
            quit: false,
            theme,
            picker,
            command_line: PromptLine::with_prompt(":".to_owned()),
            now: Local::now(),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn picker(&self) -> &DatePicker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut DatePicker {
        &mut self.picker
    }

    pub fn command_line(&self) -> &PromptLine {
        &self.command_line
    }

    pub fn command_line_mut(&mut self) -> &mut PromptLine {
        &mut self.command_line
    }

    pub fn now(&self) -> &DateTime<Local> {
        &self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn update(&mut self) {
        self.now = Local::now();
    }

    pub fn jump_to_today(&mut self) {
        let today = self.today();
        self.picker.focus_date(today);
    }

    pub fn select_focused(&mut self) -> SelectOutcome {
        let outcome = self.picker.select_focused();

        match outcome {
            SelectOutcome::Started(start) => log::info!("Range started at {}", start),
            SelectOutcome::Completed { start, end } => {
                log::info!("Range selected: {} .. {}", start, end)
            }
            SelectOutcome::Ignored(reason) => log::debug!("Selection ignored: {:?}", reason),
        }

        outcome
    }

    pub fn enter_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.last_error_message = None;
    }
}
