use std::convert::TryFrom;
use std::fmt;
use unsegen::input::*;

use nom::{
    character::complete::{alpha1, digit1, space1},
    combinator::{all_consuming, map_opt, map_res, opt, rest},
    sequence::{preceded, tuple},
    IResult,
};

use super::context::{Context, Mode};
use crate::error::{Error, ErrorKind, Result};
use crate::picker::{parse_date, parse_month};

pub type ActionResult = Result<()>;

pub enum Action {
    Arg(fn(&mut Context, &str) -> ActionResult),
    NoArg(fn(&mut Context) -> ActionResult),
    Repeatable(fn(&mut Context, u32) -> ActionResult),
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Arg(_) => f.write_str("Arg"),
            Action::NoArg(_) => f.write_str("NoArg"),
            Action::Repeatable(_) => f.write_str("Repeatable"),
        }
    }
}

fn months(count: u32) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

static COMMANDS: &[(&str, Action)] = &[
    (
        "gm",
        Action::Repeatable(|c, p| {
            c.picker_mut().navigate(months(p));
            Ok(())
        }),
    ),
    (
        "gM",
        Action::Repeatable(|c, p| {
            c.picker_mut().navigate(-months(p));
            Ok(())
        }),
    ),
    (
        "gy",
        Action::Repeatable(|c, p| {
            c.picker_mut().navigate(months(p).saturating_mul(12));
            Ok(())
        }),
    ),
    (
        "gY",
        Action::Repeatable(|c, p| {
            c.picker_mut().navigate(-months(p).saturating_mul(12));
            Ok(())
        }),
    ),
    (
        "gw",
        Action::Repeatable(|c, p| {
            c.picker_mut().move_focus(p as i64 * 7);
            Ok(())
        }),
    ),
    (
        "gW",
        Action::Repeatable(|c, p| {
            c.picker_mut().move_focus(-(p as i64) * 7);
            Ok(())
        }),
    ),
    (
        "gd",
        Action::Repeatable(|c, p| {
            c.picker_mut().move_focus(p as i64);
            Ok(())
        }),
    ),
    (
        "gD",
        Action::Repeatable(|c, p| {
            c.picker_mut().move_focus(-(p as i64));
            Ok(())
        }),
    ),
    (
        "today",
        Action::NoArg(|c| {
            c.jump_to_today();
            Ok(())
        }),
    ),
    (
        "clear",
        Action::NoArg(|c| {
            c.picker_mut().clear_selection();
            Ok(())
        }),
    ),
    (
        "q",
        Action::NoArg(|c| {
            c.quit = true;
            Ok(())
        }),
    ),
    (
        "quit",
        Action::NoArg(|c| {
            c.quit = true;
            Ok(())
        }),
    ),
    (
        "goto",
        Action::Arg(|c, arg| {
            if let Ok(date) = parse_date(arg) {
                c.picker_mut().focus_date(date);
            } else {
                let month = parse_month(arg)?;
                c.picker_mut().show_month(month);
            }
            Ok(())
        }),
    ),
    (
        "select",
        Action::Arg(|c, arg| {
            let date = parse_date(arg)?;
            c.picker_mut().select_date(date);
            Ok(())
        }),
    ),
];

fn count(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |digits: &str| digits.parse::<u32>())(input)
}

fn action(input: &str) -> IResult<&str, (&str, &'static Action)> {
    map_opt(alpha1, |name: &str| {
        COMMANDS
            .iter()
            .find(|(cmd, _)| *cmd == name)
            .map(|(_, act)| (name, act))
    })(input)
}

fn argument(input: &str) -> IResult<&str, &str> {
    preceded(space1, rest)(input)
}

/// Splits `[count]name[ argument]` and resolves the command name.
pub fn parse_command(cmd: &str) -> Result<(Option<u32>, &str, &'static Action, Option<&str>)> {
    let (_, (repeat, (name, act), arg)) =
        all_consuming(tuple((opt(count), action, opt(argument))))(cmd.trim())
            .map_err(|_| {
                Error::new(
                    ErrorKind::CommandParse,
                    &format!("unknown command '{}'", cmd.trim()),
                )
            })?;

    Ok((repeat, name, act, arg.map(str::trim)))
}

pub fn run_command(context: &mut Context, cmd: &str) -> ActionResult {
    let (repeat, name, act, arg) = parse_command(cmd)?;

    log::debug!("Running command '{}'", cmd);

    match (act, repeat, arg) {
        (Action::Repeatable(a), repeat, None) => a(context, repeat.unwrap_or(1)),
        (Action::NoArg(a), None, None) => a(context),
        (Action::Arg(a), None, Some(arg)) if !arg.is_empty() => a(context, arg),
        _ => Err(Error::new(
            ErrorKind::CommandParse,
            &format!("wrong arguments for '{}'", name),
        )),
    }
}

pub struct CommandParser<'a> {
    context: &'a mut Context,
}

impl<'a> CommandParser<'a> {
    pub fn new(context: &'a mut Context) -> Self {
        CommandParser { context }
    }

    fn report_error(&mut self, error: Error) {
        log::warn!("{}", error);
        self.context.last_error_message = Some(format!("{}", error));
    }
}

impl Behavior for CommandParser<'_> {
    fn input(mut self, input: Input) -> Option<Input> {
        if let Event::Key(Key::Char('\n')) = input.event {
            let cmd = self.context.command_line_mut().finish_line().to_owned();
            if let Err(e) = run_command(&mut *self.context, &cmd) {
                self.context.mode = Mode::Normal;
                self.report_error(e);
            } else {
                self.context.enter_mode(Mode::Normal);
            }
            None
        } else {
            Some(input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::{DatePicker, IgnoreReason, SelectOutcome, WeekStart};
    use crate::ui::Theme;
    use chrono::{Month, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn context() -> Context {
        Context::new(
            DatePicker::new(date(2026, 10, 5), WeekStart::Monday),
            Theme::default(),
        )
    }

    #[test]
    fn parses_counts_names_and_arguments() {
        let (repeat, name, act, arg) = parse_command("3gm").unwrap();
        assert_eq!((repeat, name, arg), (Some(3), "gm", None));
        assert!(matches!(act, Action::Repeatable(_)));

        let (repeat, name, act, arg) = parse_command("goto 2027-02").unwrap();
        assert_eq!((repeat, name, arg), (None, "goto", Some("2027-02")));
        assert!(matches!(act, Action::Arg(_)));

        let (_, name, act, _) = parse_command("  clear ").unwrap();
        assert_eq!(name, "clear");
        assert!(matches!(act, Action::NoArg(_)));
    }

    #[test]
    fn unknown_commands_are_errors() {
        let err = parse_command("frobnicate").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::CommandParse));
        assert!(parse_command("").is_err());
        assert!(parse_command("12").is_err());
    }

    #[test]
    fn repeated_month_navigation() {
        let mut context = context();

        run_command(&mut context, "3gm").unwrap();
        assert_eq!(context.picker().cursor().month(), Month::January);
        assert_eq!(context.picker().cursor().year(), 2027);

        run_command(&mut context, "gM").unwrap();
        assert_eq!(context.picker().cursor().month(), Month::December);
        assert_eq!(context.picker().cursor().year(), 2026);

        run_command(&mut context, "2gY").unwrap();
        assert_eq!(context.picker().cursor().year(), 2024);
    }

    #[test]
    fn focus_movement_commands() {
        let mut context = context();

        run_command(&mut context, "2gw").unwrap();
        assert_eq!(*context.picker().focus(), date(2026, 10, 19));

        run_command(&mut context, "gD").unwrap();
        assert_eq!(*context.picker().focus(), date(2026, 10, 18));
    }

    #[test]
    fn goto_accepts_months_and_dates() {
        let mut context = context();

        run_command(&mut context, "goto 2027-02").unwrap();
        assert_eq!(*context.picker().focus(), date(2027, 2, 5));

        run_command(&mut context, "goto 2025-12-24").unwrap();
        assert_eq!(*context.picker().focus(), date(2025, 12, 24));
        assert_eq!(context.picker().cursor().month(), Month::December);

        let err = run_command(&mut context, "goto someday").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::DateParse));
    }

    #[test]
    fn select_command_drives_range() {
        let mut context = context();

        run_command(&mut context, "select 2026-10-06").unwrap();
        run_command(&mut context, "select 2026-10-08").unwrap();
        assert_eq!(
            context.picker().range().bounds(),
            Some((date(2026, 10, 6), date(2026, 10, 8)))
        );

        // Saturday: ignored, not an error
        run_command(&mut context, "select 2026-10-10").unwrap();
        assert!(context.picker().range().is_complete());

        run_command(&mut context, "clear").unwrap();
        assert_eq!(context.picker().range().start(), None);
        assert_eq!(
            context.select_focused(),
            SelectOutcome::Ignored(IgnoreReason::Weekend)
        );
    }

    #[test]
    fn wrong_arguments_are_rejected() {
        let mut context = context();

        assert!(run_command(&mut context, "2today").is_err());
        assert!(run_command(&mut context, "gm 3").is_err());
        assert!(run_command(&mut context, "select").is_err());

        run_command(&mut context, "q").unwrap();
        assert!(context.quit);
    }
}
