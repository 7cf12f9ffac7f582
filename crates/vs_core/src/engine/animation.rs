//! Animation runtime: resolved animation set + frame player.
//!
//! The authored model ([`crate::models::animation`]) is resolved once at
//! load:
//! - frame durations collapse `frame → file default → 6` into one number;
//! - sparse movedata is expanded so every frame knows the movedata in effect
//!   at that frame (the animation default seeds the scan);
//! - each authored movedata record gets a stable [`MoveDataId`] token, and
//!   re-arm detection compares tokens instead of deep-comparing records.
//!
//! 프레임 플레이어는 타이머가 프레임 길이에 닿으면 인덱스를 올리고,
//! play-once면 마지막 프레임에 고정, 아니면 loopStart로 되감는다.

use std::collections::HashMap;

use crate::models::animation::{AnimationData, AnimationFileData, EffectData, MoveData};

use super::boxes::{BoxKind, Rect};

/// Fallback duration when neither the frame nor the file authors one.
pub const DEFAULT_FRAME_DURATION: u32 = 6;

/// Identity token of one authored movedata record. Two records with equal
/// field values still get distinct tokens, so each authored active-frame
/// window re-arms the attack exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveDataId(u32);

/// A typed box in character-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypedBox {
    pub kind: BoxKind,
    pub rect: Rect,
}

/// One resolved frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Opaque image handle for the renderer.
    pub image: String,
    /// Display duration in ticks.
    pub duration: u32,
    /// Frame-local boxes; empty per type falls back to the animation's
    /// default boxes of that type.
    pub boxes: Vec<TypedBox>,
    /// Movedata in effect at this frame (eagerly resolved).
    pub move_data: Option<MoveDataId>,
    /// Frame-authored effect identifiers.
    pub effects: Option<EffectData>,
}

/// One resolved animation.
#[derive(Debug, Clone)]
pub struct Animation {
    pub frames: Vec<Frame>,
    pub loop_start: usize,
    pub play_once: bool,
    pub default_boxes: Vec<TypedBox>,
}

/// Shared registry of one character's animations plus the movedata arena
/// the id tokens index into. Referenced (never copied) by the character.
#[derive(Debug, Default)]
pub struct AnimationSet {
    anims: HashMap<String, Animation>,
    move_data: Vec<MoveData>,
}

impl AnimationSet {
    pub fn from_file(file: AnimationFileData) -> AnimationSet {
        AnimationSet::from_data(file.default_duration, file.animations)
    }

    pub fn from_data(
        default_duration: Option<u32>,
        data: HashMap<String, AnimationData>,
    ) -> AnimationSet {
        let mut set = AnimationSet::default();
        for (name, anim) in data {
            set.insert(name, anim, default_duration);
        }
        set
    }

    /// Resolve and register one authored animation.
    pub fn insert(&mut self, name: String, data: AnimationData, default_duration: Option<u32>) {
        // The animation default seeds the forward movedata scan.
        let mut last_md: Option<MoveDataId> = data
            .default_move_data
            .as_ref()
            .and_then(|mds| mds.first())
            .map(|md| self.intern_move_data(md.clone()));

        let frame_count = data.frames.len();
        let mut frames = Vec::with_capacity(frame_count);
        for frame in data.frames {
            if let Some(md) = frame.movedata.as_ref().and_then(|mds| mds.first()) {
                last_md = Some(self.intern_move_data(md.clone()));
            }
            frames.push(Frame {
                image: frame.image,
                duration: frame
                    .duration
                    .or(default_duration)
                    .unwrap_or(DEFAULT_FRAME_DURATION),
                boxes: frame
                    .boxes
                    .iter()
                    .map(|b| TypedBox { kind: b.kind, rect: Rect::new(b.x, b.y, b.w, b.h) })
                    .collect(),
                move_data: last_md,
                effects: frame.effects,
            });
        }

        let anim = Animation {
            frames,
            loop_start: data.loop_start.unwrap_or(0),
            // play-once unless the animation explicitly loops
            play_once: data.play_once.unwrap_or(!data.looped.unwrap_or(false)),
            default_boxes: data
                .default_boxes
                .iter()
                .map(|b| TypedBox { kind: b.kind, rect: Rect::new(b.x, b.y, b.w, b.h) })
                .collect(),
        };
        self.anims.insert(name, anim);
    }

    fn intern_move_data(&mut self, md: MoveData) -> MoveDataId {
        let id = MoveDataId(self.move_data.len() as u32);
        self.move_data.push(md);
        id
    }

    pub fn get(&self, name: &str) -> Option<&Animation> {
        self.anims.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.anims.contains_key(name)
    }

    pub fn move_data(&self, id: MoveDataId) -> &MoveData {
        &self.move_data[id.0 as usize]
    }
}

/// Per-character frame clock over the shared animation set.
#[derive(Debug, Clone, Default)]
pub struct AnimationPlayer {
    current: Option<String>,
    pub frame_index: usize,
    pub frame_timer: u32,
    last_move_data: Option<MoveDataId>,
}

impl AnimationPlayer {
    pub fn new() -> AnimationPlayer {
        AnimationPlayer::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Switch animation; no-op when already playing `name`.
    pub fn set_anim(&mut self, name: &str) {
        if self.current.as_deref() == Some(name) {
            return;
        }
        self.current = Some(name.to_string());
        self.frame_index = 0;
        self.frame_timer = 0;
    }

    /// Switch animation keeping the frame clock (screw hurt rotations).
    pub fn set_anim_preserving_clock(&mut self, name: &str) {
        if self.current.as_deref() == Some(name) {
            return;
        }
        self.current = Some(name.to_string());
    }

    /// Reset the frame clock without touching the current animation.
    pub fn reset_clock(&mut self) {
        self.frame_index = 0;
        self.frame_timer = 0;
    }

    /// Advance one tick. Returns true when the effective movedata token
    /// changed, which re-arms the owner's attack.
    pub fn advance(&mut self, set: &AnimationSet) -> bool {
        let Some(anim) = self.current.as_deref().and_then(|n| set.get(n)) else {
            return false;
        };
        if anim.frames.is_empty() {
            return false;
        }

        self.frame_index = self.frame_index.min(anim.frames.len() - 1);
        let duration = anim.frames[self.frame_index].duration;

        self.frame_timer += 1;
        if self.frame_timer >= duration {
            self.frame_timer = 0;
            self.frame_index += 1;
            if anim.play_once {
                self.frame_index = self.frame_index.min(anim.frames.len() - 1);
            } else if self.frame_index >= anim.frames.len() {
                self.frame_index = if anim.loop_start < anim.frames.len() {
                    anim.loop_start
                } else {
                    0
                };
            }
        }

        let current = self.current_move_data(set);
        let changed = current != self.last_move_data;
        self.last_move_data = current;
        changed
    }

    /// Movedata in effect at the current frame (already resolved at load).
    pub fn current_move_data(&self, set: &AnimationSet) -> Option<MoveDataId> {
        self.current_frame(set).and_then(|f| f.move_data)
    }

    pub fn current_animation<'a>(&self, set: &'a AnimationSet) -> Option<&'a Animation> {
        self.current.as_deref().and_then(|n| set.get(n))
    }

    pub fn current_frame<'a>(&self, set: &'a AnimationSet) -> Option<&'a Frame> {
        self.current_animation(set).and_then(|a| a.frames.get(self.frame_index))
    }

    /// Elapsed runtime frames: completed frame durations plus the current
    /// frame timer. This is the cancel table's frame axis.
    pub fn runtime_frame(&self, set: &AnimationSet) -> u32 {
        let Some(anim) = self.current_animation(set) else {
            return 0;
        };
        let completed: u32 = anim
            .frames
            .iter()
            .take(self.frame_index)
            .map(|f| f.duration)
            .sum();
        completed + self.frame_timer
    }
}
