//! Start-up settings read from the environment. Every key falls back to its
//! default when missing or unreadable; nothing is written back.

use timer_core::{Mode, TimerSettings};

use crate::alerts::AlertConfig;

const KEY_STOPWATCH_TICK: &str = "TIMERS_STOPWATCH_TICK_MS";
const KEY_COUNTDOWN_TICK: &str = "TIMERS_COUNTDOWN_TICK_MS";
const KEY_PRESET: &str = "TIMERS_PRESET_SECS";
const KEY_MODE: &str = "TIMERS_MODE";
const KEY_BELL: &str = "TIMERS_BELL";
const KEY_NOTIFY: &str = "TIMERS_NOTIFY";

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct AppSettings {
    pub timer: TimerSettings,
    pub alerts: AlertConfig,
}

pub fn load() -> AppSettings {
    load_from(|key| std::env::var(key).ok())
}

pub fn load_from<F: Fn(&str) -> Option<String>>(lookup: F) -> AppSettings {
    let mut settings = AppSettings::default();
    let timer = &mut settings.timer;

    if let Some(ms) = read(&lookup, KEY_STOPWATCH_TICK, parse_interval) {
        timer.stopwatch_tick_ms = ms;
    }
    if let Some(ms) = read(&lookup, KEY_COUNTDOWN_TICK, parse_interval) {
        timer.countdown_tick_ms = ms;
    }
    if let Some(secs) = read(&lookup, KEY_PRESET, parse_interval) {
        timer.preset_ms = secs.saturating_mul(1000);
    }
    if let Some(mode) = read(&lookup, KEY_MODE, parse_mode) {
        timer.initial_mode = mode;
    }
    if let Some(bell) = read(&lookup, KEY_BELL, parse_flag) {
        settings.alerts.bell = bell;
    }
    if let Some(notify) = read(&lookup, KEY_NOTIFY, parse_flag) {
        settings.alerts.notification = notify;
    }
    settings
}

fn read<F, T>(lookup: &F, key: &str, parse: fn(&str) -> Option<T>) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        log::warn!("ignoring {}={:?}, using default", key, raw);
    }
    parsed
}

fn parse_interval(s: &str) -> Option<u64> {
    s.parse::<u64>().ok().filter(|v| *v > 0)
}

fn parse_mode(s: &str) -> Option<Mode> {
    match s.to_ascii_lowercase().as_str() {
        "stopwatch" => Some(Mode::Stopwatch),
        "countdown" => Some(Mode::Countdown),
        _ => None,
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}
