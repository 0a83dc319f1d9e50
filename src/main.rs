mod alerts;
mod pump;
mod settings;
mod ui;

use std::io::{self, BufRead};
use std::sync::mpsc::{self, Sender};
use std::thread;

use anyhow::{anyhow, Context};
use num_traits::{FromPrimitive, ToPrimitive};
use timer_core::{Control, Mode, ModeController, MonotonicClock};

use crate::pump::PumpScheduler;
use crate::settings::AppSettings;
use crate::ui::TerminalPresenter;

const APP_NAME: &str = "Timers";
const KEY_ESC: char = '\u{001b}';

#[derive(Debug, num_derive::FromPrimitive, num_derive::ToPrimitive)]
pub enum AppOp {
    Key = 0,
    Pump,
    Quit,
}

/// Scalar message: an opcode plus one argument.
#[derive(Clone, Copy, Debug)]
pub struct Message {
    pub opcode: usize,
    pub arg: usize,
}

impl Message {
    pub fn new<T: ToPrimitive>(op: T, arg: usize) -> Self {
        Self {
            opcode: op.to_usize().unwrap_or(usize::MAX),
            arg,
        }
    }
}

type Timer = ModeController<MonotonicClock, PumpScheduler, TerminalPresenter<io::Stdout>>;

struct TimersApp {
    timer: Timer,
    preset_ms: u64,
    // Some while a duration is being typed.
    entry: Option<String>,
    quit: bool,
}

impl TimersApp {
    fn new(settings: AppSettings, scheduler: PumpScheduler) -> Self {
        let presenter = TerminalPresenter::new(io::stdout(), settings.alerts, settings.timer.initial_mode);
        let timer = ModeController::new(MonotonicClock::new(), scheduler, presenter, settings.timer);
        Self {
            timer,
            preset_ms: settings.timer.preset_ms,
            entry: None,
            quit: false,
        }
    }

    fn handle_key(&mut self, key: char) {
        if let Some(mut buf) = self.entry.take() {
            match key {
                KEY_ESC | 'q' => {
                    self.timer.presenter_mut().hold_readout(false);
                    self.timer.presenter_mut().show_prompt("Entry cancelled");
                }
                '\r' | '\n' if buf.trim().is_empty() => self.entry = Some(buf),
                '\r' | '\n' => {
                    self.timer.presenter_mut().hold_readout(false);
                    let (minutes, seconds) = parse_mmss(&buf);
                    self.timer.on_configure_countdown(minutes, seconds).ok();
                }
                c => {
                    buf.push(c);
                    self.entry = Some(buf);
                }
            }
            return;
        }

        match key {
            'w' => self.timer.on_mode_select(Mode::Stopwatch),
            'c' => self.timer.on_mode_select(Mode::Countdown),
            's' | ' ' => {
                if self.enabled(Control::StartStop) {
                    self.timer.on_start_stop().ok();
                }
            }
            'r' => {
                if self.enabled(Control::Reset) {
                    self.timer.on_reset().ok();
                }
            }
            'l' => {
                if self.enabled(Control::Lap) {
                    self.timer.on_lap().ok();
                }
            }
            'p' => {
                if self.enabled(Control::Preset) {
                    self.timer.on_preset_countdown(self.preset_ms).ok();
                }
            }
            't' => {
                if self.enabled(Control::DurationInputs) {
                    self.entry = Some(String::new());
                    let presenter = self.timer.presenter_mut();
                    presenter.show_prompt("Duration (MM:SS), Enter to set, Esc to cancel:");
                    presenter.hold_readout(true);
                }
            }
            'h' => self.timer.presenter_mut().show_help(help_text()),
            'q' => self.quit = true,
            _ => {}
        }
    }

    fn enabled(&self, control: Control) -> bool {
        let enabled = self.timer.presenter().is_enabled(control);
        if !enabled {
            log::debug!("{:?} is disabled right now", control);
        }
        enabled
    }

    fn shutdown(&mut self) {
        if self.timer.is_running() {
            self.timer.on_start_stop().ok();
        }
        self.timer.scheduler().quit();
    }
}

fn help_text() -> &'static str {
    concat!(
        "Keys (type, then Enter):\n",
        "  w  stopwatch mode      c  countdown mode\n",
        "  s  start / stop        r  reset\n",
        "  l  lap (stopwatch)     p  preset countdown\n",
        "  t  type a duration     h  this help\n",
        "  q  quit\n",
    )
}

/// Parse "MM:SS" or a bare number of seconds into (minutes, seconds).
/// Unreadable fields count as zero.
fn parse_mmss(s: &str) -> (i64, i64) {
    let parts: Vec<&str> = s.split(':').collect();
    match parts.len() {
        1 => {
            let secs = parts[0].trim().parse::<i64>().unwrap_or(0);
            if secs < 0 {
                (0, secs)
            } else {
                (secs / 60, secs % 60)
            }
        }
        2 => {
            let mins = parts[0].trim().parse::<i64>().unwrap_or(0);
            let secs = parts[1].trim().parse::<i64>().unwrap_or(0);
            (mins, secs)
        }
        _ => (0, 0),
    }
}

fn input_thread(main_conn: Sender<Message>) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("stdin: {}", e);
                break;
            }
        };
        for key in line.chars().chain(std::iter::once('\n')) {
            if main_conn.send(Message::new(AppOp::Key, key as usize)).is_err() {
                return;
            }
        }
    }
    main_conn.send(Message::new(AppOp::Quit, 0)).ok();
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("{} PID is {}", APP_NAME, std::process::id());

    let settings = settings::load();
    log::debug!("settings: {:?}", settings);

    let (main_conn, main_rx) = mpsc::channel();
    let (pump_conn, pump_rx) = mpsc::channel();

    let pump_main = main_conn.clone();
    let pump = thread::Builder::new()
        .name("pump".into())
        .spawn(move || pump::pump_thread(pump_rx, pump_main))
        .context("can't spawn pump thread")?;

    // Not joined: it stays blocked on stdin until the process exits.
    thread::Builder::new()
        .name("input".into())
        .spawn(move || input_thread(main_conn))
        .context("can't spawn input thread")?;

    let mut app = TimersApp::new(settings, PumpScheduler::new(pump_conn));
    app.timer.presenter_mut().show_help(help_text());
    app.timer.refresh();

    while !app.quit {
        let msg = match main_rx.recv() {
            Ok(msg) => msg,
            Err(_) => break,
        };
        match FromPrimitive::from_usize(msg.opcode) {
            Some(AppOp::Key) => {
                if let Some(key) = char::from_u32(msg.arg as u32) {
                    app.handle_key(key);
                }
            }
            Some(AppOp::Pump) => app.timer.on_tick(),
            Some(AppOp::Quit) => break,
            None => log::error!("unknown opcode: {:?}", msg),
        }
    }

    app.shutdown();
    pump.join().map_err(|_| anyhow!("pump thread panicked"))?;
    log::info!("{} exiting", APP_NAME);
    Ok(())
}
