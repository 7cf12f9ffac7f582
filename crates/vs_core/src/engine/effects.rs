//! Effect-spawn callback surface.
//!
//! The core never draws or plays anything: hit sparks, block sparks and
//! frame-authored effects are emitted as [`EffectRequest`]s through an
//! [`EffectSink`] supplied by the caller. The call never blocks; sinks that
//! drop requests are fine.

use serde::Serialize;

/// Which player a character (or an effect anchor) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    P1,
    P2,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::P1 => Side::P2,
            Side::P2 => Side::P1,
        }
    }
}

/// One visual/audio spawn request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectRequest {
    pub x: f32,
    pub y: f32,
    /// Visual effect identifiers, opaque to the core.
    pub visual: Vec<String>,
    /// Sound identifiers, opaque to the core.
    pub sound: Vec<String>,
    /// Mirror the effect horizontally based on this character's facing.
    pub flip_from: Option<Side>,
    /// Attach the effect to this character while it plays.
    pub follow: Option<Side>,
    pub follow_ticks: u32,
    /// One-shot rotation modifier in degrees (hit-spark angle).
    pub rotation: Option<f32>,
}

impl EffectRequest {
    pub fn at(x: f32, y: f32) -> EffectRequest {
        EffectRequest {
            x,
            y,
            visual: Vec::new(),
            sound: Vec::new(),
            flip_from: None,
            follow: None,
            follow_ticks: 0,
            rotation: None,
        }
    }
}

/// Receiver for effect requests. Implemented by the renderer/audio bridge.
pub trait EffectSink {
    fn spawn(&mut self, fx: EffectRequest);
}

/// Collects requests into a Vec; used by tests and the headless driver.
#[derive(Debug, Default)]
pub struct EffectCollector {
    pub spawned: Vec<EffectRequest>,
}

impl EffectCollector {
    pub fn new() -> EffectCollector {
        EffectCollector::default()
    }

    pub fn drain(&mut self) -> Vec<EffectRequest> {
        std::mem::take(&mut self.spawned)
    }
}

impl EffectSink for EffectCollector {
    fn spawn(&mut self, fx: EffectRequest) {
        self.spawned.push(fx);
    }
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl EffectSink for NullSink {
    fn spawn(&mut self, _fx: EffectRequest) {}
}
