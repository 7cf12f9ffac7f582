//! Input polling and rolling buffers.
//!
//! 입력은 틱당 한 번 폴링한다. 버퍼에는 엣지만 기록된다:
//! - 방향: 새로운 비중립 방향으로 바뀐 틱에만 1건
//! - 버튼: 눌림 rising edge에만 1건 (홀드는 기록 안 함)
//!
//! Entries expire by fixed retention windows every tick. Absent bindings
//! simply poll false; there is no error path here.

use serde::{Deserialize, Serialize};

use super::config::InputConfig;
use super::direction::Direction;

/// The four attack buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    Lp,
    Rp,
    Lk,
    Rk,
}

pub const BUTTONS: [Button; 4] = [Button::Lp, Button::Rp, Button::Lk, Button::Rk];

/// Key-down state for one character's 8 bindings, polled once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub lp: bool,
    pub rp: bool,
    pub lk: bool,
    pub rk: bool,
}

impl InputSnapshot {
    pub fn neutral() -> InputSnapshot {
        InputSnapshot::default()
    }

    /// Current direction from the signed axis sums (opposite keys cancel).
    pub fn direction(&self) -> Direction {
        let x = (self.right as i8) - (self.left as i8);
        let y = (self.up as i8) - (self.down as i8);
        Direction::from_axes(x, y)
    }

    pub fn button(&self, btn: Button) -> bool {
        match btn {
            Button::Lp => self.lp,
            Button::Rp => self.rp,
            Button::Lk => self.lk,
            Button::Rk => self.rk,
        }
    }
}

/// A direction change, tick-stamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirEntry {
    pub dir: Direction,
    pub tick: u64,
}

/// A button tap, tick-stamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEntry {
    pub btn: Button,
    pub tick: u64,
}

/// Per-character rolling input log.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    dirs: Vec<DirEntry>,
    buttons: Vec<ButtonEntry>,
    prev: InputSnapshot,
    now: u64,
}

impl InputBuffer {
    pub fn new() -> InputBuffer {
        InputBuffer::default()
    }

    /// Poll one tick: record edges, save the snapshot, expire old entries.
    pub fn record_tick(&mut self, snap: InputSnapshot, now: u64, cfg: &InputConfig) {
        self.now = now;

        // Direction edge: only a *new non-neutral* direction is recorded.
        let dir = snap.direction();
        if dir != Direction::Neutral && dir != self.prev.direction() {
            self.dirs.push(DirEntry { dir, tick: now });
        }

        // Button rising edges.
        for btn in BUTTONS {
            if snap.button(btn) && !self.prev.button(btn) {
                self.buttons.push(ButtonEntry { btn, tick: now });
            }
        }

        self.prev = snap;

        // Expiry: directions by a strict cutoff, buttons by inclusive age.
        let dir_cutoff = now.saturating_sub(cfg.dir_retention_ticks);
        self.dirs.retain(|e| e.tick > dir_cutoff);
        self.buttons.retain(|e| now - e.tick <= cfg.button_retention_ticks);
    }

    /// Was `btn` tapped within the last `window` ticks?
    pub fn was_button_tapped(&self, btn: Button, window: u64) -> bool {
        self.buttons
            .iter()
            .any(|e| e.btn == btn && self.now - e.tick <= window)
    }

    /// Retained direction changes, oldest first.
    pub fn directions(&self) -> &[DirEntry] {
        &self.dirs
    }

    /// The snapshot recorded last tick.
    pub fn prev_snapshot(&self) -> InputSnapshot {
        self.prev
    }
}
