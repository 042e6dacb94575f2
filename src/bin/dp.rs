extern crate datepick as lib;

use chrono::Local;
use flexi_logger::{FileSpec, Logger};
use lib::events::Dispatcher;
use lib::picker::{parse_month, DatePicker};
use lib::ui::app::App;
use nix::sys::{signal, termios};
use std::io::Write;
use std::os::unix::io::AsRawFd;
use std::sync::Mutex;
use std::path::PathBuf;
use structopt::StructOpt;
use unsegen::base::Terminal;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "dp",
    author = "Julian Bigge <j.reedts@gmail.com>",
    about = "datepick - pick a range of weekdays from a terminal calendar."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "m",
        long = "month",
        help = "month to show first, formatted as YYYY-MM"
    )]
    pub month: Option<String>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only print the month non-interactively"
    )]
    pub show: bool,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    // The TUI owns the terminal, so only log when a file was given
    let _logger = match &args.log_file {
        Some(log_file) => Some(
            Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?
                .log_to_file(FileSpec::try_from(log_file)?)
                .print_message()
                .start()?,
        ),
        None => None,
    };

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let today = Local::now().date_naive();
    let mut picker = DatePicker::new(today, config.week_start);
    if let Some(month) = &args.month {
        picker.show_month(parse_month(month)?);
    }

    if args.show {
        print!("{}", picker.grid(Some(today)));
        println!();
        return Ok(());
    }

    // Draw on the controlling terminal so stdout stays free for the result
    let tty = termion::get_tty()?;
    let hook_tty = tty.try_clone()?;
    let orig_attr = termios::tcgetattr(tty.as_raw_fd())?;
    let hook_state = Mutex::new((hook_tty, orig_attr));

    std::panic::set_hook(Box::new(move |info| {
        if let Ok(mut state) = hook_state.lock() {
            let (tty, attr) = &mut *state;

            // Switch to main terminal screen
            let _ = write!(
                tty,
                "{}{}",
                termion::screen::ToMainScreen,
                termion::cursor::Show
            );
            let _ = termios::tcsetattr(tty.as_raw_fd(), termios::SetArg::TCSANOW, attr);
        }

        eprintln!("datepick ran into a fatal error!");
        eprintln!("Consider filing an issue with a log file and the backtrace below.");

        eprintln!("{}", info);
        eprintln!("{:?}", backtrace::Backtrace::new());
    }));

    let mut signals_to_wait = signal::SigSet::empty();
    signals_to_wait.add(signal::SIGWINCH);

    let dispatcher = Dispatcher::from_config(&config, signals_to_wait);

    let mut app = App::new(&config, picker);

    {
        // Setup unsegen terminal; dropping it restores the main screen
        let term = Terminal::new(tty)?;

        app.run(dispatcher, term)?;
    }

    if let Some(selection) = app.formatted_selection() {
        println!("{}", selection);
    }

    Ok(())
}
