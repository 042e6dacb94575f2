use crate::config;
use std::io::{self, Read};
use std::sync::mpsc;
use std::thread;

use nix::sys::signal::{SigSet, Signal};
use unsegen::input::Input;

use config::Config;

pub enum Event {
    Input(Input),
    Update,
    Resize,
}

pub struct Dispatcher {
    rx: mpsc::Receiver<Event>,
    _input_handle: thread::JoinHandle<()>,
    _update_handle: thread::JoinHandle<()>,
    _signal_handle: thread::JoinHandle<()>,
}

impl Dispatcher {
    /// Spawns the input, tick and signal threads. `signals` are blocked for
    /// the calling thread (and therefore every thread spawned afterwards) so
    /// only the signal thread receives them.
    pub fn from_config(config: &Config, signals: SigSet) -> Dispatcher {
        let tick_rate = config.tick_rate();
        let (tx, rx) = mpsc::channel();

        if let Err(err) = signals.thread_block() {
            log::warn!("Could not block signals: {}", err);
        }

        let input_handle = {
            let tx = tx.clone();
            thread::spawn(move || match termion::get_tty() {
                Ok(tty) => forward_input(tty, &tx),
                Err(err) => {
                    log::warn!("No controlling terminal, reading stdin: {}", err);
                    let stdin = io::stdin();
                    forward_input(stdin.lock(), &tx);
                }
            })
        };

        let update_handle = {
            let tx = tx.clone();
            thread::spawn(move || loop {
                if tx.send(Event::Update).is_err() {
                    return;
                }
                thread::sleep(tick_rate);
            })
        };

        let signal_handle = {
            thread::spawn(move || loop {
                match signals.wait() {
                    Ok(Signal::SIGWINCH) => {
                        if tx.send(Event::Resize).is_err() {
                            return;
                        }
                    }
                    Ok(signal) => log::debug!("Ignoring signal {}", signal),
                    Err(err) => {
                        log::warn!("Stopped waiting for signals: {}", err);
                        return;
                    }
                }
            })
        };

        Dispatcher {
            rx,
            _input_handle: input_handle,
            _update_handle: update_handle,
            _signal_handle: signal_handle,
        }
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}

fn forward_input<R: Read>(source: R, tx: &mpsc::Sender<Event>) {
    for evt in Input::read_all(source) {
        match evt {
            Ok(input) => {
                if tx.send(Event::Input(input)).is_err() {
                    return;
                }
            }
            Err(err) => log::warn!("Error while reading input: {}", err),
        }
    }
}
