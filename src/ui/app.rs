use crate::config::Config;
use crate::events::{Dispatcher, Event};
use crate::picker::{DatePicker, DateRange};

use super::{Context, ControlsBar, Mode, MonthPane, StatusLine, Theme};

use std::fs::File;
use unsegen::base::Terminal;
use unsegen::input::{
    EditBehavior, Key, Navigatable, NavigateBehavior, OperationResult, ScrollBehavior,
    Scrollable,
};
use unsegen::widget::*;

use super::command::CommandParser;

pub struct App<'a> {
    config: &'a Config,
    context: Context,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config, picker: DatePicker) -> App<'a> {
        let context = Context::new(picker, Theme::from_config(&config.theme));
        App { config, context }
    }

    pub fn selection(&self) -> &DateRange {
        self.context.picker().range()
    }

    /// The selected range rendered with the configured format, if complete.
    pub fn formatted_selection(&self) -> Option<String> {
        self.selection()
            .format_with(&self.config.date_format, &self.config.separator)
    }

    fn bottom_bar<'w>(&'w self) -> impl Widget + 'w {
        let mut layout = HLayout::new();

        if let Mode::Command = self.context.mode {
            layout = layout.widget(self.context.command_line().as_widget());
        } else {
            layout = layout.widget(StatusLine::new(&self.context));
        }

        layout
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w
    where
        'a: 'w,
    {
        VLayout::new()
            .widget(ControlsBar::new(&self.context))
            .widget(MonthPane::new(&self.context))
            .widget(self.bottom_bar())
    }

    fn handle_input(&mut self, input: unsegen::input::Input) {
        if input.matches(Key::Esc) {
            self.context.enter_mode(Mode::Normal);
            return;
        }

        match self.context.mode {
            Mode::Normal => {
                input
                    .chain((Key::Char('q'), || self.context.quit = true))
                    .chain((Key::Char(':'), || self.context.enter_mode(Mode::Command)))
                    .chain((Key::Char('\n'), || {
                        self.context.select_focused();
                    }))
                    .chain((Key::Char(' '), || {
                        self.context.select_focused();
                    }))
                    .chain((Key::Char('c'), || self.context.picker_mut().clear_selection()))
                    .chain((Key::Char('t'), || self.context.jump_to_today()))
                    .chain(
                        NavigateBehavior::new(&mut FocusBehaviour(&mut self.context))
                            .down_on(Key::Char('j'))
                            .down_on(Key::Down)
                            .up_on(Key::Char('k'))
                            .up_on(Key::Up)
                            .left_on(Key::Char('h'))
                            .left_on(Key::Left)
                            .right_on(Key::Char('l'))
                            .right_on(Key::Right),
                    )
                    .chain(
                        ScrollBehavior::new(&mut MonthBehaviour(&mut self.context))
                            .forwards_on(Key::Char('L'))
                            .forwards_on(Key::Char('>'))
                            .forwards_on(Key::Char(']'))
                            .backwards_on(Key::Char('H'))
                            .backwards_on(Key::Char('<'))
                            .backwards_on(Key::Char('[')),
                    )
                    .finish();
            }
            Mode::Command => {
                input
                    .chain(
                        EditBehavior::new(self.context.command_line_mut())
                            .delete_forwards_on(Key::Delete)
                            .delete_backwards_on(Key::Backspace)
                            .left_on(Key::Left)
                            .right_on(Key::Right),
                    )
                    .chain(
                        ScrollBehavior::new(self.context.command_line_mut())
                            .backwards_on(Key::Up)
                            .forwards_on(Key::Down),
                    )
                    .chain(CommandParser::new(&mut self.context))
                    .finish();
            }
        }
    }

    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        mut term: Terminal<File>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        while !self.context.quit {
            // Draw
            let root = term.create_root_window();
            self.as_widget().draw(root, RenderingHints::new());
            term.present();

            // Handle events
            match dispatcher.next()? {
                Event::Update => self.context.update(),
                Event::Resize => log::debug!("Terminal resized"),
                Event::Input(input) => self.handle_input(input),
            }
        }

        Ok(())
    }
}

struct FocusBehaviour<'a>(&'a mut Context);

impl Navigatable for FocusBehaviour<'_> {
    fn move_down(&mut self) -> OperationResult {
        self.0.picker_mut().move_focus(7);
        Ok(())
    }

    fn move_left(&mut self) -> OperationResult {
        self.0.picker_mut().move_focus(-1);
        Ok(())
    }

    fn move_right(&mut self) -> OperationResult {
        self.0.picker_mut().move_focus(1);
        Ok(())
    }

    fn move_up(&mut self) -> OperationResult {
        self.0.picker_mut().move_focus(-7);
        Ok(())
    }
}

struct MonthBehaviour<'a>(&'a mut Context);

impl Scrollable for MonthBehaviour<'_> {
    fn scroll_backwards(&mut self) -> OperationResult {
        self.0.picker_mut().navigate(-1);
        Ok(())
    }

    fn scroll_forwards(&mut self) -> OperationResult {
        self.0.picker_mut().navigate(1);
        Ok(())
    }
}
