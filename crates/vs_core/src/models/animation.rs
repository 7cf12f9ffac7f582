//! Animation file records.
//!
//! One file per character: a map of animation name → frames, plus file-wide
//! defaults. Field naming follows the authoring tool output (camelCase keys,
//! snake_case movedata fields, movedata carried as a one-element array).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::engine::boxes::BoxKind;

/// Top-level animation file: `{ "defaultDuration": 6, "animations": {...} }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationFileData {
    #[serde(default)]
    pub default_duration: Option<u32>,
    pub animations: HashMap<String, AnimationData>,
}

/// A single authored animation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationData {
    pub frames: Vec<FrameData>,
    /// Frame index the animation wraps back to when looping.
    #[serde(default)]
    pub loop_start: Option<usize>,
    /// Explicit play-once override. Absent: derived from `loop`
    /// (an animation that does not declare `loop: true` plays once).
    #[serde(default)]
    pub play_once: Option<bool>,
    #[serde(default, rename = "loop")]
    pub looped: Option<bool>,
    /// Boxes used by frames that author none of a given type.
    #[serde(default)]
    pub default_boxes: Vec<BoxData>,
    /// Movedata in effect before the first frame authors one.
    #[serde(default)]
    pub default_move_data: Option<Vec<MoveData>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameData {
    /// Opaque image handle for the renderer; the core never decodes it.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub boxes: Vec<BoxData>,
    /// Sparse: only frames that change combat data author this.
    /// One-element array per the authoring tool.
    #[serde(default)]
    pub movedata: Option<Vec<MoveData>>,
    /// Render-only draw offset, carried through untouched.
    #[serde(default)]
    pub offset: Option<[f32; 2]>,
    /// Effects fired while this frame is current (footsteps, dust, voice).
    #[serde(default)]
    pub effects: Option<EffectData>,
}

/// Typed collision rectangle in character-local space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoxData {
    #[serde(rename = "type")]
    pub kind: BoxKind,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub w: f32,
    #[serde(default)]
    pub h: f32,
}

/// Frame-authored effect identifiers, resolved by the renderer/audio side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectData {
    #[serde(default)]
    pub visual: Vec<String>,
    #[serde(default)]
    pub sound: Vec<String>,
}

/// Per-frame authored combat parameters.
///
/// 스파스 인코딩: 프레임에 없으면 직전에 정의된 movedata가 그대로 유지된다.
/// 로드 시점에 프레임별로 미리 펼쳐지므로 런타임에는 역방향 탐색이 없다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    #[serde(default)]
    pub damage: i32,
    /// Defender recovery lock after being hit (ticks).
    #[serde(default)]
    pub hit_stun: u32,
    /// Defender recovery lock after a correct block (ticks).
    #[serde(default)]
    pub block_stun: u32,
    /// Shared world freeze on hit (ticks).
    #[serde(default)]
    pub hit_pause: u32,
    /// Shared world freeze on block (ticks).
    #[serde(default)]
    pub block_pause: u32,
    /// Applied once in the defender's facing frame: +x pushes along facing.
    #[serde(default)]
    pub hit_knockback: [f32; 2],
    #[serde(default)]
    pub block_knockback: [f32; 2],
    #[serde(default)]
    pub guard_flag: GuardFlag,
    #[serde(default)]
    pub strength: Strength,
    /// Forces the airborne hit reaction even on a grounded defender.
    #[serde(default)]
    pub launch: bool,
    #[serde(default)]
    pub hit_property_air: AirHitProperty,
    /// Grounded hurt-animation hint (stand-high vs stand-low).
    #[serde(default)]
    pub hit_animtype_ground: Option<GroundHitAnim>,
}

/// Blockable height of an attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GuardFlag {
    /// Standing block only; whiffs outright against a non-blocking croucher.
    High,
    #[default]
    Mid,
    /// Crouching block only.
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Strength {
    #[default]
    Light,
    Medium,
    Heavy,
}

/// Airborne hit reaction selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AirHitProperty {
    #[default]
    Normal,
    Screw,
    Tornado,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroundHitAnim {
    High,
    Low,
}
