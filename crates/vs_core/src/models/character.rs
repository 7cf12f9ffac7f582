//! Character file records: identity, attack move list, cancel table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::engine::input::Button;
use crate::engine::state_id::{AttackResult, StateCategory};
use crate::error::Result;
use crate::models::animation::AnimationData;

/// One character = one file: identity block + its animation map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterFileData {
    pub character: CharacterData,
    #[serde(default)]
    pub default_duration: Option<u32>,
    pub animations: HashMap<String, AnimationData>,
}

impl CharacterFileData {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterData {
    pub name: String,
    pub shortname: String,
    #[serde(default = "default_max_health")]
    pub max_health: i32,
    #[serde(default = "default_jump_speed_x")]
    pub jump_speed_x: f32,
    #[serde(default = "default_jump_speed_y")]
    pub jump_speed_y: f32,
    /// Facing the art was authored at (+1 = toward +x).
    #[serde(default = "default_facing")]
    pub default_facing: i8,
    #[serde(default)]
    pub attacks: Vec<AttackData>,
    #[serde(default)]
    pub cancels: Vec<CancelRuleData>,
}

fn default_max_health() -> i32 {
    1000
}

fn default_jump_speed_x() -> f32 {
    1.0
}

fn default_jump_speed_y() -> f32 {
    -1.5
}

fn default_facing() -> i8 {
    1
}

/// An attack move: a dynamically named state bound to one animation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackData {
    /// State name, e.g. `nmlAtk5LP`. Also the animation name unless `anim`
    /// overrides it.
    pub name: String,
    #[serde(default)]
    pub anim: Option<String>,
    /// Hit-reaction category while this move is active.
    #[serde(default)]
    pub category: StateCategory,
}

/// One row of the authored cancel table. Absent constraints match anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelRuleData {
    /// Source states; empty = cancel from any state.
    #[serde(default)]
    pub from_state: Vec<String>,
    /// Required last attack result(s); authored as a string or an array.
    #[serde(default)]
    pub result: Option<OneOrMany<AttackResult>>,
    /// Runtime-frame window (completed frame durations + current timer).
    #[serde(default)]
    pub min_frame: Option<u32>,
    #[serde(default)]
    pub max_frame: Option<u32>,
    /// Animation keyframe-index window.
    #[serde(default)]
    pub min_keyframe: Option<usize>,
    #[serde(default)]
    pub max_keyframe: Option<usize>,
    /// Buttons that must all have been tapped within the tap window.
    #[serde(default)]
    pub buttons: Vec<Button>,
    /// Named motion that must currently be satisfied.
    #[serde(default)]
    pub motion: Option<String>,
    pub to: String,
}

/// Authoring convenience: `"hit"` and `["hit", "block"]` both parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T: Clone> OneOrMany<T> {
    pub fn to_vec(&self) -> Vec<T> {
        match self {
            OneOrMany::One(v) => vec![v.clone()],
            OneOrMany::Many(vs) => vs.clone(),
        }
    }
}
