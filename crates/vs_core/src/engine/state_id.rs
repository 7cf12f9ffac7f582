//! Typed state identifiers.
//!
//! States are an enum dispatched through a single `match`
//! ([`super::states::handle_state`]); attack states are data-driven and
//! carry an index into the character's attack move list. The string
//! vocabulary (used by authored cancel tables and by the HUD read surface)
//! is the camelCase set the authoring tools emit.

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

/// Per-character state machine identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum StateId {
    #[default]
    Idle,
    Crouch,
    Walk,
    Run,
    Turn,
    CrouchTurn,
    Prejump,
    Jump,
    Fall,
    Land,
    GuardHi,
    GuardLo,
    GuardPostHi,
    GuardPostLo,
    Hitstun,
    AirHitstun,
    AirHitstunScrew,
    AirHitstunTornado,
    Groundbounce,
    Knockdown,
    /// Data-driven attack state; the index points into the character's
    /// attack move list.
    #[strum(serialize = "attack")]
    Attack(u16),
}

impl StateId {
    /// Parse one of the built-in state names. Attack states are resolved
    /// separately against the character's move list.
    pub fn parse_builtin(name: &str) -> Option<StateId> {
        Some(match name {
            "idle" => StateId::Idle,
            "crouch" => StateId::Crouch,
            "walk" => StateId::Walk,
            "run" => StateId::Run,
            "turn" => StateId::Turn,
            "crouchTurn" => StateId::CrouchTurn,
            "prejump" => StateId::Prejump,
            "jump" => StateId::Jump,
            "fall" => StateId::Fall,
            "land" => StateId::Land,
            "guardHi" => StateId::GuardHi,
            "guardLo" => StateId::GuardLo,
            "guardPostHi" => StateId::GuardPostHi,
            "guardPostLo" => StateId::GuardPostLo,
            "hitstun" => StateId::Hitstun,
            "airHitstun" => StateId::AirHitstun,
            "airHitstunScrew" => StateId::AirHitstunScrew,
            "airHitstunTornado" => StateId::AirHitstunTornado,
            "groundbounce" => StateId::Groundbounce,
            "knockdown" => StateId::Knockdown,
            _ => return None,
        })
    }

    /// Built-in hit-reaction category; attack states defer to their move
    /// definition (handled by the character, which owns the move list).
    pub fn builtin_category(self) -> Option<StateCategory> {
        Some(match self {
            StateId::Idle | StateId::Walk | StateId::Run | StateId::Turn | StateId::Prejump => {
                StateCategory::Stand
            }
            StateId::GuardHi | StateId::GuardPostHi | StateId::Hitstun => StateCategory::Stand,
            StateId::Crouch
            | StateId::CrouchTurn
            | StateId::GuardLo
            | StateId::GuardPostLo => StateCategory::Crouch,
            StateId::Jump
            | StateId::Fall
            | StateId::AirHitstun
            | StateId::AirHitstunScrew
            | StateId::AirHitstunTornado
            | StateId::Groundbounce => StateCategory::Air,
            StateId::Land => StateCategory::Ground,
            StateId::Knockdown => StateCategory::Liedown,
            StateId::Attack(_) => return None,
        })
    }
}

/// Hit-reaction category of a state, used by block/hit resolution.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StateCategory {
    #[default]
    Stand,
    Crouch,
    Air,
    Ground,
    Liedown,
}

/// Outcome of the character's current attack sequence.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttackResult {
    /// No attack resolved yet this sequence.
    #[default]
    None,
    Hit,
    Block,
    Whiff,
}
