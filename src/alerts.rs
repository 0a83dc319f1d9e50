use std::io::Write;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AlertConfig {
    pub bell: bool,
    pub notification: bool,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            bell: true,
            notification: true,
        }
    }
}

pub fn fire_alert<W: Write>(config: &AlertConfig, out: &mut W, message: &str) {
    if config.bell {
        write!(out, "\x07").ok();
    }
    if config.notification {
        writeln!(out, "*** {} ***", message).ok();
    }
    out.flush().ok();
}
