//! Axis-aligned collision boxes.
//!
//! Three typed arrays per character (pushbox / hurtbox / hitbox) of fixed
//! capacity; inactive slots are zeroed. Negative width/height extend
//! leftward/upward and are folded by [`Rect::normalized`] before any overlap
//! test. Zero-sized boxes never participate in collision.

use serde::{Deserialize, Serialize};

/// Fixed slot capacity per box type per character.
pub const MAX_BOXES: usize = 10;

/// Which array a typed box lands in. Serialized with the authoring
/// vocabulary (`"pushbox"` / `"hurtbox"` / `"hitbox"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoxKind {
    #[serde(rename = "pushbox")]
    Push,
    #[serde(rename = "hurtbox")]
    Hurt,
    #[serde(rename = "hitbox")]
    Hit,
}

/// World- or local-space rectangle. `(x, y)` is the top-left corner when
/// width/height are positive.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect { x, y, w, h }
    }

    /// Zero-area boxes are inert: cleared slots never collide.
    pub fn is_empty(&self) -> bool {
        self.w == 0.0 || self.h == 0.0
    }

    /// Fold negative extents so `(x, y)` is the min corner.
    pub fn normalized(&self) -> Rect {
        Rect {
            x: if self.w < 0.0 { self.x + self.w } else { self.x },
            y: if self.h < 0.0 { self.y + self.h } else { self.y },
            w: self.w.abs(),
            h: self.h.abs(),
        }
    }

    /// Strict AABB overlap (touching edges do not collide).
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        if a.is_empty() || b.is_empty() {
            return false;
        }
        a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
    }

    /// Center of the overlap region, if the boxes overlap.
    pub fn intersection_center(&self, other: &Rect) -> Option<(f32, f32)> {
        if !self.overlaps(other) {
            return None;
        }
        let a = self.normalized();
        let b = other.normalized();
        let left = a.x.max(b.x);
        let right = (a.x + a.w).min(b.x + b.w);
        let top = a.y.max(b.y);
        let bottom = (a.y + a.h).min(b.y + b.h);
        Some(((left + right) * 0.5, (top + bottom) * 0.5))
    }

    /// Horizontal mirror about the local origin: `x' = -x - w`.
    pub fn mirrored_x(&self) -> Rect {
        Rect { x: -self.x - self.w, ..*self }
    }
}

/// One character-side box array; inactive slots stay zeroed.
pub type BoxArray = [Rect; MAX_BOXES];
