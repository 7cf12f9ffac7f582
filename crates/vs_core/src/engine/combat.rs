//! Cross-character combat resolution.
//!
//! Per ordered attacker/defender pair, per tick, skipped entirely during
//! shared hit-stop: scan active hitboxes against active hurtboxes in array
//! order, resolve the first overlap as a hit or a block, disarm the
//! attacker, stop. No multi-hit within one tick. An armed attack that finds
//! no overlap at all is marked a whiff.
//!
//! 여기서만 상대 캐릭터의 상태를 건드린다. take_hit / take_block 이
//! 유일한 cross-character 변이 경로다.

use crate::models::animation::{AirHitProperty, GuardFlag, Strength};

use super::boxes::BoxArray;
use super::character::{Character, PendingGuard};
use super::config::EngineConfig;
use super::effects::{EffectRequest, EffectSink};
use super::state_id::{AttackResult, StateCategory, StateId};

/// Mutable world surface for one combat resolution pass. The shared
/// hit-stop counter is writable only here and in the match loop.
pub struct CombatCtx<'a> {
    pub hit_stop: &'a mut u32,
    pub floor_y: f32,
    pub config: &'a EngineConfig,
    pub sink: &'a mut dyn EffectSink,
}

/// One attacker→defender scan.
pub fn check_hits(attacker: &mut Character, defender: &mut Character, ctx: &mut CombatCtx) {
    // Never resolve during shared hit-stop.
    if *ctx.hit_stop > 0 {
        return;
    }

    let Some(md_id) = attacker.current_move_data() else {
        return;
    };
    if !attacker.can_hit_this_sequence {
        return;
    }

    let guard_flag = attacker.anims.move_data(md_id).guard_flag;
    let hitboxes = attacker.hitboxes;
    let hurtboxes = defender.hurtboxes;

    let mut hit_occurred = false;

    for hit in hitboxes.iter() {
        if hit.is_empty() {
            continue;
        }
        for hurt in hurtboxes.iter() {
            if hurt.is_empty() {
                continue;
            }
            if !hit.overlaps(hurt) {
                continue;
            }

            // High-whiff rule: a High attack sails over a crouching,
            // non-blocking defender. The overlap does not count, so the
            // attack still resolves as a whiff.
            if guard_flag == GuardFlag::High
                && defender.state_category == StateCategory::Crouch
                && !defender.is_holding_back()
                && !defender.is_holding_down_back()
            {
                continue;
            }

            hit_occurred = true;

            let wants_block = defender.is_holding_back() || defender.is_holding_down_back();
            if wants_block {
                defender.take_block(attacker, md_id, ctx);
            } else {
                defender.take_hit(attacker, ctx);
            }

            // Disarm for the rest of this active-frame window.
            attacker.can_hit_this_sequence = false;
            attacker.last_hit_move_data = Some(md_id);
            return; // first overlap wins
        }
    }

    if !hit_occurred {
        attacker.current_attack_result = AttackResult::Whiff;
    }
}

impl Character {
    /// Full hit resolution on `self` (the defender). Reads the attacker's
    /// current movedata; absent movedata is a no-op.
    pub fn take_hit(&mut self, attacker: &mut Character, ctx: &mut CombatCtx) {
        let Some(md_id) = attacker.current_move_data() else {
            return;
        };
        let md = attacker.anims.move_data(md_id).clone();

        attacker.current_attack_result = AttackResult::Hit;

        self.health = (self.health - md.damage).max(0);
        *ctx.hit_stop = md.hit_pause;
        self.hit_stun_timer = md.hit_stun;
        self.knockback = (md.hit_knockback[0], md.hit_knockback[1]);
        self.knockback_applied = false;

        attacker.can_hit_this_sequence = false;
        attacker.last_hit_move_data = Some(md_id);

        self.incoming_hit_anim = md.hit_animtype_ground;

        // Airborne: already above the floor, in an air state, or launched.
        let airborne = self.pos.1 < ctx.floor_y
            || self.state_category == StateCategory::Air
            || md.launch;

        self.anim.reset_clock();
        self.vel = (0.0, 0.0);

        // Hit spark at the overlap center of the first intersecting pair.
        let spawn = hit_intersection(&attacker.hitboxes, &self.hurtboxes)
            .unwrap_or(self.pos);
        let rotation = if self.knockback.0 != 0.0 || self.knockback.1 != 0.0 {
            (-self.knockback.1).atan2(self.knockback.0).to_degrees()
        } else {
            0.0
        };
        let (visual, sound) = match md.strength {
            Strength::Heavy => ("spark_hitH", "hitSH"),
            Strength::Medium => ("spark_hitM", "hitH"),
            Strength::Light => ("spark_hitL", "hitL"),
        };
        ctx.sink.spawn(EffectRequest {
            visual: vec![visual.to_string()],
            sound: vec![sound.to_string()],
            flip_from: Some(attacker.side),
            follow: Some(self.side),
            follow_ticks: 1,
            rotation: Some(rotation),
            ..EffectRequest::at(spawn.0, spawn.1)
        });

        let next = if airborne {
            match md.hit_property_air {
                AirHitProperty::Screw => StateId::AirHitstunScrew,
                AirHitProperty::Tornado => {
                    // Latched until the defender recovers.
                    self.tornadoed = true;
                    StateId::AirHitstunTornado
                }
                AirHitProperty::Normal => StateId::AirHitstun,
            }
        } else {
            StateId::Hitstun
        };

        log::debug!(
            "[{}] hit by {} for {} (stun {}, pause {}) -> {:?}",
            self.short_name,
            attacker.short_name,
            md.damage,
            md.hit_stun,
            md.hit_pause,
            next
        );
        self.change_state(next);
    }

    /// Block resolution on `self` (the defender). Block correctness is
    /// decided first; an incorrect block is one explicit path into
    /// [`Character::take_hit`] before any block state is written.
    pub fn take_block(
        &mut self,
        attacker: &mut Character,
        md_id: super::animation::MoveDataId,
        ctx: &mut CombatCtx,
    ) {
        let md = attacker.anims.move_data(md_id).clone();

        // Standing-back blocks High/Mid; down-back blocks Low.
        let stand_input = self.is_holding_back();
        let crouch_input = self.is_holding_down_back();
        let correct = (stand_input
            && matches!(md.guard_flag, GuardFlag::High | GuardFlag::Mid))
            || (crouch_input && md.guard_flag == GuardFlag::Low);

        if !correct {
            self.take_hit(attacker, ctx);
            return;
        }

        *ctx.hit_stop = md.block_pause;
        attacker.current_attack_result = AttackResult::Block;

        // Guard state, block-stun timer and knockback all land next tick so
        // this tick's state-machine pass completes cleanly.
        self.pending_guard = Some(PendingGuard {
            state: if crouch_input { StateId::GuardLo } else { StateId::GuardHi },
            block_stun: md.block_stun,
            knockback: (md.block_knockback[0], md.block_knockback[1]),
        });
        self.knockback_applied = false;

        log::debug!(
            "[{}] blocked {} ({:?} guard)",
            self.short_name,
            attacker.short_name,
            md.guard_flag
        );

        ctx.sink.spawn(EffectRequest {
            visual: vec!["spark_block".to_string()],
            sound: vec!["block1".to_string()],
            flip_from: Some(attacker.side),
            ..EffectRequest::at(self.pos.0, self.pos.1)
        });
    }
}

/// Overlap center of the first intersecting hit/hurt box pair.
fn hit_intersection(hitboxes: &BoxArray, hurtboxes: &BoxArray) -> Option<(f32, f32)> {
    for hit in hitboxes.iter().filter(|b| !b.is_empty()) {
        for hurt in hurtboxes.iter().filter(|b| !b.is_empty()) {
            if let Some(center) = hit.intersection_center(hurt) {
                return Some(center);
            }
        }
    }
    None
}
