//! Match loop: per-tick ordering, push separation, shared hit-stop.
//!
//! 틱 순서는 고정 계약이다:
//! 1. 두 캐릭터의 상태머신 틱 (내부에서 입력→방향→박스→보류 가드→캔슬→상태)
//! 2. 양방향 전투 해석 (P1→P2, P2→P1)
//! 3. 푸시박스 분리
//! 4. 히트스톱 카운트다운
//!
//! The shared hit-stop counter is the system's sole cross-character
//! synchronization primitive: decremented here, set by combat resolution,
//! read (never written) by every per-character routine.

use super::character::{Character, TickCtx};
use super::combat::{check_hits, CombatCtx};
use super::config::EngineConfig;
use super::effects::{EffectSink, Side};
use super::input::InputSnapshot;

/// Global match state: two fighters, a static floor, the shared hit-stop.
pub struct MatchEngine {
    p1: Character,
    p2: Character,
    floor_y: f32,
    hit_stop: u32,
    tick: u64,
    config: EngineConfig,
}

impl MatchEngine {
    pub fn new(p1: Character, p2: Character, floor_y: f32, config: EngineConfig) -> MatchEngine {
        MatchEngine { p1, p2, floor_y, hit_stop: 0, tick: 0, config }
    }

    /// Advance one simulation step with this tick's polled inputs.
    pub fn tick(&mut self, inputs: [InputSnapshot; 2], sink: &mut dyn EffectSink) {
        self.tick += 1;

        // Character ticks run sequentially; P2 sees P1's updated position,
        // same as the reference ordering.
        let p2_x = self.p2.pos.0;
        self.p1.tick(
            inputs[0],
            &mut TickCtx {
                now: self.tick,
                hit_stop: self.hit_stop,
                floor_y: self.floor_y,
                opponent_x: p2_x,
                config: &self.config,
                sink: &mut *sink,
            },
        );
        let p1_x = self.p1.pos.0;
        self.p2.tick(
            inputs[1],
            &mut TickCtx {
                now: self.tick,
                hit_stop: self.hit_stop,
                floor_y: self.floor_y,
                opponent_x: p1_x,
                config: &self.config,
                sink: &mut *sink,
            },
        );

        // Both orderings; a hit in the first immediately freezes the second.
        let mut combat = CombatCtx {
            hit_stop: &mut self.hit_stop,
            floor_y: self.floor_y,
            config: &self.config,
            sink: &mut *sink,
        };
        check_hits(&mut self.p1, &mut self.p2, &mut combat);
        check_hits(&mut self.p2, &mut self.p1, &mut combat);

        // Push separation; frozen ticks move nobody.
        if self.hit_stop == 0 {
            resolve_push(&mut self.p1, &mut self.p2);
        }

        if self.hit_stop > 0 {
            self.hit_stop -= 1;
        }
    }

    pub fn character(&self, side: Side) -> &Character {
        match side {
            Side::P1 => &self.p1,
            Side::P2 => &self.p2,
        }
    }

    pub fn character_mut(&mut self, side: Side) -> &mut Character {
        match side {
            Side::P1 => &mut self.p1,
            Side::P2 => &mut self.p2,
        }
    }

    pub fn hit_stop(&self) -> u32 {
        self.hit_stop
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn floor_y(&self) -> f32 {
        self.floor_y
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Find the minimum overlapping push-box pair along the horizontal axis and
/// split the overlap equally, pushing each character away from the other.
fn resolve_push(a: &mut Character, b: &mut Character) {
    let mut min_overlap = f32::INFINITY;

    for box_a in a.pushboxes.iter().filter(|r| !r.is_empty()) {
        for box_b in b.pushboxes.iter().filter(|r| !r.is_empty()) {
            if !box_a.overlaps(box_b) {
                continue;
            }
            let na = box_a.normalized();
            let nb = box_b.normalized();
            let overlap = (na.x + na.w - nb.x).min(nb.x + nb.w - na.x);
            if overlap > 0.0 && overlap < min_overlap {
                min_overlap = overlap;
            }
        }
    }

    if min_overlap.is_finite() {
        let half = min_overlap / 2.0;
        if a.pos.0 < b.pos.0 {
            a.pos.0 -= half;
            b.pos.0 += half;
        } else {
            a.pos.0 += half;
            b.pos.0 -= half;
        }
    }
}
