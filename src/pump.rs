use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use num_traits::FromPrimitive;
use timer_core::TickScheduler;

use crate::{AppOp, Message};

#[derive(Debug, num_derive::FromPrimitive, num_derive::ToPrimitive)]
pub enum PumpOp {
    Start = 0,
    Stop,
    Quit,
}

/// Posts `AppOp::Pump` to the main loop every `interval_ms` while running.
/// Blocks on the control channel while stopped.
pub fn pump_thread(control: Receiver<Message>, main_conn: Sender<Message>) {
    let mut interval_ms = 100u64;
    let mut running = false;

    loop {
        let msg = if running {
            match control.recv_timeout(Duration::from_millis(interval_ms)) {
                Ok(msg) => msg,
                Err(RecvTimeoutError::Timeout) => {
                    if main_conn.send(Message::new(AppOp::Pump, 0)).is_err() {
                        break;
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        } else {
            match control.recv() {
                Ok(msg) => msg,
                Err(_) => break,
            }
        };

        match FromPrimitive::from_usize(msg.opcode) {
            Some(PumpOp::Start) => {
                interval_ms = msg.arg as u64;
                if interval_ms == 0 {
                    interval_ms = 100;
                }
                running = true;
            }
            Some(PumpOp::Stop) => running = false,
            Some(PumpOp::Quit) => break,
            None => log::error!("pump: unknown opcode: {:?}", msg),
        }
    }
    log::debug!("pump thread exiting");
}

/// `TickScheduler` backed by the pump thread.
pub struct PumpScheduler {
    pump_conn: Sender<Message>,
    pump_running: bool,
}

impl PumpScheduler {
    pub fn new(pump_conn: Sender<Message>) -> Self {
        Self {
            pump_conn,
            pump_running: false,
        }
    }

    pub fn quit(&self) {
        self.send(PumpOp::Quit, 0);
    }

    fn send(&self, op: PumpOp, arg: usize) {
        if let Err(e) = self.pump_conn.send(Message::new(op, arg)) {
            log::error!("pump unreachable: {}", e);
        }
    }
}

impl TickScheduler for PumpScheduler {
    fn start(&mut self, interval_ms: u64) {
        if !self.pump_running {
            self.pump_running = true;
            self.send(PumpOp::Start, interval_ms as usize);
        }
    }

    fn stop(&mut self) {
        if self.pump_running {
            self.pump_running = false;
            self.send(PumpOp::Stop, 0);
        }
    }

    fn is_running(&self) -> bool {
        self.pump_running
    }
}
