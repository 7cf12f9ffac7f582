//! # vs_core - Deterministic 2D Fighting Game Combat Engine
//!
//! Per-tick combat simulation core for a two-player fighting game:
//! character state machines, animation-frame-accurate hitboxes, input
//! buffering with motion recognition, and hit/block resolution with shared
//! hit-stop.
//!
//! ## Features
//! - 100% deterministic simulation (pure function of state + polled input)
//! - Frame-exact ordering: input → facing → boxes → cancels → state tick →
//!   combat resolution → push separation → hit-stop countdown
//! - Data-driven characters: animations, movedata, and cancel tables are
//!   authored JSON consumed through [`models`]
//!
//! Rendering, audio, camera and HUD are external collaborators: they read
//! positions, facing, state names, health and box arrays, and receive effect
//! requests through an [`engine::effects::EffectSink`].

// Game engine APIs often require many parameters for physics, state, etc.
#![allow(clippy::too_many_arguments)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod engine;
pub mod error;
pub mod models;

pub use engine::animation::{Animation, AnimationPlayer, AnimationSet, MoveDataId};
pub use engine::character::Character;
pub use engine::config::EngineConfig;
pub use engine::direction::Direction;
pub use engine::effects::{EffectCollector, EffectRequest, EffectSink, NullSink, Side};
pub use engine::input::{Button, InputSnapshot};
pub use engine::match_loop::MatchEngine;
pub use engine::state_id::{AttackResult, StateCategory, StateId};
pub use error::{DataError, Result};
pub use models::character::CharacterFileData;
