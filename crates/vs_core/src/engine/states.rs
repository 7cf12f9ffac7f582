//! Per-state per-tick behavior.
//!
//! Entry actions run in each state's first-tick block (`just_entered`),
//! shared hit-stop freezes the pause-sensitive states *after* their entry
//! block, and every transition happens through
//! [`Character::change_state`].
//!
//! 속도 적분은 상태가 직접 한다. 상태마다 관성이 다르기 때문에 (달리기
//! lerp, 가드 마찰, 다운 슬라이드) 중앙에서 일괄 적분하지 않는다.

use super::character::{BouncePhase, Character, LandingFace, TickCtx};
use super::state_id::StateId;
use super::timestep::TICK_DT;

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// One tick of the current state. Single dispatch point for every state.
pub(crate) fn handle_state(ch: &mut Character, ctx: &mut TickCtx) {
    match ch.state {
        StateId::Idle => idle(ch, ctx),
        StateId::Crouch => crouch(ch, ctx),
        StateId::Walk => walk(ch, ctx),
        StateId::Run => run(ch, ctx),
        StateId::Turn => turn(ch, false),
        StateId::CrouchTurn => turn(ch, true),
        StateId::Prejump => prejump(ch),
        StateId::Jump => jump(ch, ctx),
        StateId::Fall => fall(ch, ctx),
        StateId::Land => land(ch),
        StateId::GuardHi => guard(ch, ctx, true),
        StateId::GuardLo => guard(ch, ctx, false),
        StateId::GuardPostHi => guard_post(ch, true),
        StateId::GuardPostLo => guard_post(ch, false),
        StateId::Hitstun => hitstun(ch, ctx),
        StateId::AirHitstun => air_hitstun(ch, ctx, "hurtAirStun"),
        StateId::AirHitstunTornado => air_hitstun(ch, ctx, "hurtAirTornado"),
        StateId::AirHitstunScrew => air_hitstun_screw(ch, ctx),
        StateId::Groundbounce => groundbounce(ch, ctx),
        StateId::Knockdown => knockdown(ch, ctx),
        StateId::Attack(index) => attack(ch, ctx, index),
    }
}

fn idle(ch: &mut Character, ctx: &mut TickCtx) {
    if ch.just_entered {
        // crouch에서 올라오는 중이면 블렌드 애니부터
        let from_crouch = ch.previous_state == StateId::Crouch;
        ch.anim.set_anim(if from_crouch { "croToSta" } else { "idle" });
        ch.transitioning = from_crouch;
        ch.just_entered = false;
    }

    if ch.transitioning && ch.anim_finished() {
        ch.anim.set_anim("idle");
        ch.transitioning = false;
    }

    ch.advance_frame();

    let (dx, dy) = ch.current_input.direction().axes();
    if dy == -1 {
        ch.change_state(StateId::Crouch);
        return;
    }
    if dy == 1 {
        ch.change_state(StateId::Prejump);
        return;
    }
    if ch.has_motion("run", ctx) {
        ch.change_state(StateId::Run);
        return;
    }
    if dx != 0 {
        ch.change_state(StateId::Walk);
    }
}

fn crouch(ch: &mut Character, _ctx: &mut TickCtx) {
    if ch.just_entered {
        let from_stand = ch.previous_state == StateId::Idle;
        ch.anim.set_anim(if from_stand { "staToCro" } else { "crouch" });
        ch.transitioning = from_stand;
        ch.just_entered = false;
    }

    if ch.transitioning && ch.anim_finished() {
        ch.anim.set_anim("crouch");
        ch.transitioning = false;
    }

    ch.advance_frame();

    let (_, dy) = ch.current_input.direction().axes();
    if dy != -1 {
        ch.change_state(StateId::Idle);
    }
}

fn walk(ch: &mut Character, ctx: &mut TickCtx) {
    let (dx, dy) = ch.current_input.direction().axes();

    if dx != 0 {
        // Forward/backward animation is relative to facing.
        let relative = dx as i32 * ch.facing as i32;
        ch.anim.set_anim(if relative == 1 { "walkF" } else { "walkB" });
        ch.pos.0 += dx as f32 * ctx.config.physics.walk_speed;
    } else {
        ch.change_state(StateId::Idle);
    }

    ch.advance_frame();
    if dy == 1 {
        ch.change_state(StateId::Prejump);
    }
}

fn run(ch: &mut Character, ctx: &mut TickCtx) {
    let (dx, dy) = ch.current_input.direction().axes();
    let relative = dx as i32 * ch.facing as i32;
    let physics = &ctx.config.physics;

    if relative > 0 {
        ch.anim.set_anim("run");
        ch.vel.0 = lerp(ch.vel.0, ch.facing as f32 * physics.run_speed, physics.run_accel_lerp);
        ch.pos.0 += ch.vel.0;
        ch.advance_frame();
    } else if relative < 0 {
        ch.vel.0 = 0.0;
        ch.change_state(StateId::Walk);
        return;
    } else if ch.vel.0 != 0.0 {
        // Neutral with momentum left: skid to a stop.
        ch.anim.set_anim("runStop");
        ch.advance_frame();
        ch.vel.0 = lerp(ch.vel.0, 0.0, physics.run_stop_lerp);
        ch.pos.0 += ch.vel.0;
        if ch.vel.0.abs() < physics.run_stop_cutoff {
            ch.vel.0 = 0.0;
        }
        if ch.vel.0 == 0.0 {
            ch.change_state(StateId::Idle);
        }
        return;
    }

    if dy == 1 {
        ch.change_state(StateId::Prejump);
    }
}

fn turn(ch: &mut Character, crouching: bool) {
    if ch.just_entered {
        ch.anim.set_anim(if crouching { "crouchTurn" } else { "turn" });
        // The flip itself happens once, on entry.
        ch.facing = -ch.facing;
        ch.just_entered = false;
    }

    ch.advance_frame();

    if ch.anim_finished() {
        ch.change_state(if crouching { StateId::Crouch } else { StateId::Idle });
    }
}

fn prejump(ch: &mut Character) {
    if ch.just_entered {
        ch.anim.set_anim("prejump");
    }
    ch.advance_frame();
    if ch.anim_finished() {
        ch.change_state(StateId::Jump);
    }
}

fn jump(ch: &mut Character, ctx: &mut TickCtx) {
    if ch.just_entered {
        ch.anim.set_anim("jump");
        // Horizontal component locked from the held direction at launch.
        let (dx, _) = ch.current_input.direction().axes();
        ch.vel.1 = ch.jump_speed.1;
        ch.vel.0 = dx as f32 * ch.jump_speed.0;
        ch.just_entered = false;
    }

    ch.pos.1 += ch.vel.1;
    ch.pos.0 += ch.vel.0;
    ch.vel.1 += ctx.config.physics.jump_gravity;

    if ch.vel.1 >= 0.0 {
        ch.change_state(StateId::Fall);
    } else {
        ch.advance_frame();
    }
}

fn fall(ch: &mut Character, ctx: &mut TickCtx) {
    if ch.just_entered {
        ch.anim.set_anim("fall");
        ch.just_entered = false;
    }

    ch.vel.1 += ctx.config.physics.jump_gravity;
    ch.pos.1 += ch.vel.1;
    ch.pos.0 += ch.vel.0;

    ch.advance_frame();

    if ch.pos.1 >= ctx.floor_y {
        ch.pos.1 = ctx.floor_y;
        ch.vel = (0.0, 0.0);
        ch.change_state(StateId::Land);
    }
}

fn land(ch: &mut Character) {
    if ch.just_entered {
        ch.anim.set_anim("land");
    }
    ch.advance_frame();
    if ch.anim_finished() {
        ch.change_state(StateId::Idle);
    }
}

fn guard(ch: &mut Character, ctx: &mut TickCtx, high: bool) {
    if ch.just_entered {
        ch.anim.set_anim(if high { "guardHi" } else { "guardLo" });
        // Fresh stun episode: knockback may be applied exactly once.
        ch.knockback_applied = false;
        ch.just_entered = false;
    }

    if ch.block_stun_timer > 0 {
        if ctx.hit_stop > 0 {
            return;
        }

        // One-time knockback, right after hit-stop ends.
        if !ch.knockback_applied {
            ch.vel.0 += ch.knockback.0 * ch.facing as f32;
            ch.vel.1 += ch.knockback.1;
            ch.knockback_applied = true;
        }

        let per_second = if high {
            ctx.config.stun.guard_friction_hi
        } else {
            ctx.config.stun.guard_friction_lo
        };
        ch.vel.0 *= (-per_second * TICK_DT).exp();
        if ch.vel.0.abs() < ctx.config.stun.guard_vel_cutoff {
            ch.vel.0 = 0.0;
        }
        ch.pos.0 += ch.vel.0;

        ch.advance_frame();

        ch.block_stun_timer -= 1;
        if ch.block_stun_timer > 0 {
            return;
        }
        ch.change_state(if high { StateId::GuardPostHi } else { StateId::GuardPostLo });
        return;
    }

    ch.advance_frame();

    // Guard animation finishing with no active block-stun also exits.
    if ch.anim_finished() {
        ch.change_state(if high { StateId::GuardPostHi } else { StateId::GuardPostLo });
    }
}

fn guard_post(ch: &mut Character, high: bool) {
    if ch.just_entered {
        ch.anim.set_anim(if high { "guardHiPost" } else { "guardLoPost" });
        ch.vel.0 = 0.0;
        ch.just_entered = false;
    }

    ch.advance_frame();

    if ch.anim_finished() {
        let (_, dy) = ch.current_input.direction().axes();
        ch.change_state(if dy == -1 { StateId::Crouch } else { StateId::Idle });
    }
}

fn hitstun(ch: &mut Character, ctx: &mut TickCtx) {
    if ch.just_entered {
        // Crouch-state hurt wins, then the authored hit-type hint, then the
        // stand-low default.
        let (_, dy) = ch.current_input.direction().axes();
        let crouching = ch.previous_state == StateId::Crouch || dy == -1;
        if crouching {
            ch.anim.set_anim("hurtCrouch");
        } else {
            use crate::models::animation::GroundHitAnim;
            let name = match ch.incoming_hit_anim {
                Some(GroundHitAnim::High) => "hurtStandHi",
                Some(GroundHitAnim::Low) | None => "hurtStandLo",
            };
            ch.anim.set_anim(name);
        }
        // Clear the hint so it cannot persist into later hits.
        ch.incoming_hit_anim = None;
        ch.just_entered = false;
    }

    // Shared hit-stop: freeze entirely.
    if ctx.hit_stop > 0 {
        return;
    }

    if !ch.knockback_applied {
        ch.vel.0 += ch.knockback.0 * ch.facing as f32;
        ch.vel.1 += ch.knockback.1;
        ch.knockback_applied = true;
    }

    if ch.vel.0 != 0.0 {
        ch.pos.0 += ch.vel.0;
        ch.vel.0 *= ctx.config.stun.hitstun_friction;
    }

    if ch.hit_stun_timer > 0 {
        ch.advance_frame();
        ch.hit_stun_timer -= 1;
        if ch.hit_stun_timer > 0 {
            return;
        }
    }

    // Exit: crouch if holding down, otherwise idle.
    let (_, dy) = ch.current_input.direction().axes();
    ch.vel.0 = 0.0;
    ch.change_state(if dy == -1 { StateId::Crouch } else { StateId::Idle });
}

fn air_hitstun(ch: &mut Character, ctx: &mut TickCtx, entry_anim: &str) {
    if ch.just_entered {
        ch.anim.set_anim(entry_anim);
        ch.incoming_hit_anim = None;
        ch.just_entered = false;
    }

    if ctx.hit_stop > 0 {
        return;
    }

    if !ch.knockback_applied {
        ch.vel.0 += ch.knockback.0 * ch.facing as f32;
        ch.vel.1 += ch.knockback.1;
        ch.knockback_applied = true;
    }

    ch.pos.0 += ch.vel.0;
    ch.pos.1 += ch.vel.1;
    ch.vel.1 += ctx.config.physics.air_hitstun_gravity;
    ch.vel.0 *= ctx.config.physics.air_drag;

    // Switch to the fall pose once past the apex.
    if ch.prev_vel_y < 0.0 && ch.vel.1 >= 0.0 && ch.anim.current() != Some("hurtAirFall") {
        ch.anim.set_anim("hurtAirFall");
    }
    ch.prev_vel_y = ch.vel.1;

    if ch.hit_stun_timer > 0 {
        ch.hit_stun_timer -= 1;
    }

    ch.advance_frame();

    if ch.pos.1 >= ctx.floor_y {
        ch.pos.1 = ctx.floor_y;
        ch.vel = (0.0, 0.0);
        ch.landing_face = LandingFace::Up;
        // Weak vertical knockback lies down; a slam bounces.
        if ch.knockback.1 > ctx.config.stun.groundbounce_threshold {
            ch.change_state(StateId::Knockdown);
        } else {
            ch.change_state(StateId::Groundbounce);
        }
    }
}

fn air_hitstun_screw(ch: &mut Character, ctx: &mut TickCtx) {
    if ch.just_entered {
        // Hit-pause pose; angle tracking starts once the freeze ends.
        ch.anim.set_anim("hurtAirSpecialStun");
        ch.prev_vel_y = ch.vel.1;
        ch.just_entered = false;
    }

    if ctx.hit_stop > 0 {
        return;
    }

    if !ch.knockback_applied {
        ch.vel.0 += ch.knockback.0 * ch.facing as f32;
        ch.vel.1 += ch.knockback.1;
        ch.knockback_applied = true;
    }

    // Live velocity vector, facing-adjusted, +y up for the angle space.
    let vx = ch.vel.0 * ch.facing as f32;
    let vy = -ch.vel.1;

    let snapped = if vx == 0.0 && vy == 0.0 {
        // Zero vector: reuse the last valid angle.
        ch.last_screw_angle.unwrap_or(0)
    } else {
        let mut deg = vy.atan2(vx).to_degrees();
        if deg < 0.0 {
            deg += 360.0;
        }
        let mut snapped = ((deg / 45.0).round() as i32) * 45 % 360;
        if snapped < 0 {
            snapped += 360;
        }
        snapped
    };
    ch.last_screw_angle = Some(snapped);

    // Swap rotation pose, preserving the frame clock.
    let anim_name = format!("hurtAirScrew{snapped}deg");
    ch.anim.set_anim_preserving_clock(&anim_name);

    ch.pos.0 += ch.vel.0;
    ch.pos.1 += ch.vel.1;
    ch.vel.1 += ctx.config.physics.air_hitstun_gravity;
    ch.prev_vel_y = ch.vel.1;

    if ch.hit_stun_timer > 0 {
        ch.hit_stun_timer -= 1;
    }

    ch.advance_frame();

    if ch.pos.1 >= ctx.floor_y {
        ch.pos.1 = ctx.floor_y;
        ch.vel = (0.0, 0.0);
        ch.landing_face = LandingFace::Up;
        // Screw always ends in a knockdown.
        ch.change_state(StateId::Knockdown);
    }
}

fn groundbounce(ch: &mut Character, ctx: &mut TickCtx) {
    if ch.just_entered {
        // Phase 1: grounded knockdown pose matching the landing orientation.
        ch.bounce_phase = BouncePhase::Pre;
        ch.bounce_pre_timer = ctx.config.stun.groundbounce_pre_ticks;
        ch.anim.set_anim(match ch.landing_face {
            LandingFace::Up => "knockdownFaceUp",
            LandingFace::Down => "knockdownFaceDown",
        });
        ch.vel.0 *= ctx.config.stun.knockdown_entry_damp;
        ch.vel.1 = 0.0;
        ch.just_entered = false;
    }

    if ctx.hit_stop > 0 {
        return;
    }

    match ch.bounce_phase {
        BouncePhase::Pre => {
            ch.pos.1 = ctx.floor_y;
            ch.pos.0 += ch.vel.0;
            ch.vel.0 *= ctx.config.stun.groundbounce_slide_friction;

            ch.advance_frame();

            ch.bounce_pre_timer = ch.bounce_pre_timer.saturating_sub(1);
            if ch.bounce_pre_timer == 0 {
                // Phase 2: one bounce arc toward the opposite orientation.
                ch.bounce_phase = BouncePhase::Bounce;
                ch.anim.set_anim(match ch.landing_face {
                    LandingFace::Up => "groundbounceToFaceDown",
                    LandingFace::Down => "groundbounceToFaceUp",
                });
                ch.vel.1 = ch.knockback.1 * ctx.config.stun.bounce_coefficient;
                ch.vel.0 *= ctx.config.stun.bounce_entry_damp;
            }
        }
        BouncePhase::Bounce => {
            ch.pos.0 += ch.vel.0;
            ch.pos.1 += ch.vel.1;
            ch.vel.1 += ctx.config.physics.bounce_gravity;

            ch.advance_frame();

            if ch.pos.1 >= ctx.floor_y {
                ch.pos.1 = ctx.floor_y;
                ch.vel = (0.0, 0.0);
                ch.landing_face = ch.landing_face.flipped();
                ch.change_state(StateId::Knockdown);
            }
        }
    }
}

fn knockdown(ch: &mut Character, ctx: &mut TickCtx) {
    if ch.just_entered {
        ch.anim.set_anim(match ch.landing_face {
            LandingFace::Up => "knockdownFaceUp",
            LandingFace::Down => "knockdownFaceDown",
        });
        ch.knockdown_timer = ctx.config.stun.knockdown_ticks;
        ch.vel.0 *= ctx.config.stun.knockdown_entry_damp;
        ch.vel.1 = 0.0;
        ch.just_entered = false;
    }

    if ctx.hit_stop > 0 {
        return;
    }

    // Slide out along the ground.
    ch.pos.0 += ch.vel.0;
    ch.vel.0 *= ctx.config.stun.knockdown_slide_friction;
    ch.pos.1 = ctx.floor_y;

    ch.advance_frame();

    ch.knockdown_timer = ch.knockdown_timer.saturating_sub(1);
    if ch.knockdown_timer == 0 {
        // Recovery releases the tornado latch.
        ch.tornadoed = false;
        ch.change_state(StateId::Idle);
    }
}

fn attack(ch: &mut Character, ctx: &mut TickCtx, index: u16) {
    // Undefined move: skipped safely, never fatal.
    let Some(anim_name) = ch.attacks.get(index as usize).map(|d| d.anim.clone()) else {
        return;
    };
    if ch.just_entered {
        ch.anim.set_anim(&anim_name);
        ch.vel.0 = 0.0;
        ch.just_entered = false;
    }

    if ctx.hit_stop > 0 {
        return;
    }

    ch.advance_frame();

    if ch.anim_finished() {
        ch.change_state(StateId::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::character::TickCtx;
    use crate::engine::effects::{EffectCollector, Side};
    use crate::engine::input::InputSnapshot;
    use crate::engine::test_fixtures::{test_character, test_ctx_parts, TEST_FLOOR_Y};

    fn held(up: bool, down: bool, left: bool, right: bool) -> InputSnapshot {
        InputSnapshot { up, down, left, right, ..InputSnapshot::default() }
    }

    /// Drive one full character tick with a far-away opponent.
    fn drive(
        ch: &mut Character,
        input: InputSnapshot,
        now: u64,
        hit_stop: u32,
        cfg: &crate::engine::config::EngineConfig,
        sink: &mut EffectCollector,
    ) {
        let mut ctx = TickCtx {
            now,
            hit_stop,
            floor_y: TEST_FLOOR_Y,
            opponent_x: ch.pos.0 + ch.facing as f32 * 200.0,
            config: cfg,
            sink,
        };
        ch.tick(input, &mut ctx);
    }

    #[test]
    fn test_idle_to_crouch_and_back() {
        let (cfg, mut sink) = test_ctx_parts();
        let mut ch = test_character(Side::P1, (100.0, TEST_FLOOR_Y));

        drive(&mut ch, held(false, true, false, false), 1, 0, &cfg, &mut sink);
        assert_eq!(ch.state(), StateId::Crouch);

        // staToCro 블렌드가 끝나면 crouch 루프로
        for t in 2..8 {
            drive(&mut ch, held(false, true, false, false), t, 0, &cfg, &mut sink);
        }
        assert_eq!(ch.state(), StateId::Crouch);
        assert_eq!(ch.anim.current(), Some("crouch"));

        drive(&mut ch, InputSnapshot::neutral(), 8, 0, &cfg, &mut sink);
        assert_eq!(ch.state(), StateId::Idle);
    }

    #[test]
    fn test_walk_moves_and_picks_direction_anim() {
        let (cfg, mut sink) = test_ctx_parts();
        let mut ch = test_character(Side::P1, (100.0, TEST_FLOOR_Y));
        ch.facing = 1;

        drive(&mut ch, held(false, false, false, true), 1, 0, &cfg, &mut sink);
        assert_eq!(ch.state(), StateId::Walk);

        let x0 = ch.pos.0;
        drive(&mut ch, held(false, false, false, true), 2, 0, &cfg, &mut sink);
        assert_eq!(ch.anim.current(), Some("walkF"));
        assert!(ch.pos.0 > x0);

        // 뒤로 걸으면 walkB
        drive(&mut ch, held(false, false, true, false), 3, 0, &cfg, &mut sink);
        assert_eq!(ch.anim.current(), Some("walkB"));
    }

    #[test]
    fn test_dash_motion_enters_run() {
        let (cfg, mut sink) = test_ctx_parts();
        let mut ch = test_character(Side::P1, (100.0, TEST_FLOOR_Y));
        ch.facing = 1;

        // 6, 중립, 6 → 대시
        drive(&mut ch, held(false, false, false, true), 1, 0, &cfg, &mut sink);
        drive(&mut ch, InputSnapshot::neutral(), 2, 0, &cfg, &mut sink);
        drive(&mut ch, held(false, false, false, true), 3, 0, &cfg, &mut sink);
        assert_eq!(ch.state(), StateId::Run);

        // 계속 전진하면 가속
        let x0 = ch.pos.0;
        for t in 4..10 {
            drive(&mut ch, held(false, false, false, true), t, 0, &cfg, &mut sink);
        }
        assert!(ch.pos.0 > x0 + 4.0);
    }

    #[test]
    fn test_jump_arc_returns_to_idle() {
        let (cfg, mut sink) = test_ctx_parts();
        let mut ch = test_character(Side::P1, (100.0, TEST_FLOOR_Y));

        let mut seen = Vec::new();
        let mut min_y = TEST_FLOOR_Y;
        for t in 1..150 {
            let input = if t < 4 { held(true, false, false, false) } else { InputSnapshot::neutral() };
            drive(&mut ch, input, t, 0, &cfg, &mut sink);
            if !seen.contains(&ch.state()) {
                seen.push(ch.state());
            }
            min_y = min_y.min(ch.pos.1);
        }

        assert!(seen.contains(&StateId::Prejump));
        assert!(seen.contains(&StateId::Jump));
        assert!(seen.contains(&StateId::Fall));
        assert!(seen.contains(&StateId::Land));
        assert_eq!(ch.state(), StateId::Idle);
        assert!(min_y < TEST_FLOOR_Y - 5.0, "jump should leave the floor");
        assert_eq!(ch.pos.1, TEST_FLOOR_Y);
    }

    #[test]
    fn test_guard_knockback_applied_once() {
        let (cfg, mut sink) = test_ctx_parts();
        let mut ch = test_character(Side::P1, (100.0, TEST_FLOOR_Y));
        ch.facing = 1;
        ch.change_state(StateId::GuardHi);
        ch.block_stun_timer = 6;
        ch.knockback = (-2.0, 0.0);

        drive(&mut ch, InputSnapshot::neutral(), 1, 0, &cfg, &mut sink);
        let vel_after_first = ch.vel.0;
        assert!(vel_after_first < 0.0, "knockback should push backward");

        // 이후 틱에서는 마찰 감쇠만, 재적용 없음
        drive(&mut ch, InputSnapshot::neutral(), 2, 0, &cfg, &mut sink);
        assert!(ch.vel.0.abs() < vel_after_first.abs());

        for t in 3..10 {
            drive(&mut ch, InputSnapshot::neutral(), t, 0, &cfg, &mut sink);
        }
        // 블록스턴 소진 → post → idle 경로
        assert!(matches!(ch.state(), StateId::GuardPostHi | StateId::Idle));
    }

    #[test]
    fn test_guard_frozen_during_hit_stop() {
        let (cfg, mut sink) = test_ctx_parts();
        let mut ch = test_character(Side::P1, (100.0, TEST_FLOOR_Y));
        ch.change_state(StateId::GuardLo);
        ch.block_stun_timer = 4;
        ch.knockback = (-2.0, 0.0);

        // entry 틱 이후 히트스톱 중에는 타이머/넉백 모두 정지
        drive(&mut ch, InputSnapshot::neutral(), 1, 3, &cfg, &mut sink);
        assert_eq!(ch.block_stun_timer, 4);
        assert_eq!(ch.vel.0, 0.0);
    }

    #[test]
    fn test_hitstun_exits_by_held_direction() {
        let (cfg, mut sink) = test_ctx_parts();
        let mut ch = test_character(Side::P1, (100.0, TEST_FLOOR_Y));
        ch.change_state(StateId::Hitstun);
        ch.hit_stun_timer = 3;
        ch.knockback = (-1.0, 0.0);

        for t in 1..10 {
            drive(&mut ch, held(false, true, false, false), t, 0, &cfg, &mut sink);
        }
        // 다운 홀드 중이면 crouch로 복귀
        assert_eq!(ch.state(), StateId::Crouch);
    }

    #[test]
    fn test_air_hitstun_weak_knockback_lands_into_knockdown() {
        let (cfg, mut sink) = test_ctx_parts();
        let mut ch = test_character(Side::P1, (100.0, TEST_FLOOR_Y - 10.0));
        ch.change_state(StateId::AirHitstun);
        ch.hit_stun_timer = 30;
        ch.knockback = (0.0, 1.0); // 약한 하향 넉백 → 바운스 없음
        ch.vel = (0.0, 1.0);

        for t in 1..60 {
            drive(&mut ch, InputSnapshot::neutral(), t, 0, &cfg, &mut sink);
            if ch.state() == StateId::Knockdown {
                break;
            }
        }
        assert_eq!(ch.state(), StateId::Knockdown);
        assert_eq!(ch.pos.1, TEST_FLOOR_Y);
    }

    #[test]
    fn test_air_hitstun_slam_bounces_first() {
        let (cfg, mut sink) = test_ctx_parts();
        let mut ch = test_character(Side::P1, (100.0, TEST_FLOOR_Y - 10.0));
        ch.change_state(StateId::AirHitstun);
        ch.hit_stun_timer = 30;
        ch.knockback = (0.0, -3.0); // 강한 수직 넉백 → 그라운드바운스
        ch.knockback_applied = true; // 이미 적용된 시점부터 낙하만 재현
        ch.vel = (0.0, 2.0);

        let mut bounced = false;
        for t in 1..120 {
            drive(&mut ch, InputSnapshot::neutral(), t, 0, &cfg, &mut sink);
            if ch.state() == StateId::Groundbounce {
                bounced = true;
            }
            if ch.state() == StateId::Knockdown {
                break;
            }
        }
        assert!(bounced, "slam landing should pass through groundbounce");
        assert_eq!(ch.state(), StateId::Knockdown);
    }

    #[test]
    fn test_screw_angle_snaps_to_45() {
        let (cfg, mut sink) = test_ctx_parts();
        let mut ch = test_character(Side::P1, (100.0, TEST_FLOOR_Y - 80.0));
        ch.facing = 1;
        ch.change_state(StateId::AirHitstunScrew);
        ch.knockback = (0.0, 0.0);
        ch.knockback_applied = true;

        // entry 틱은 히트스톱 중: 특수 스턴 포즈가 유지된다
        drive(&mut ch, InputSnapshot::neutral(), 1, 5, &cfg, &mut sink);
        assert_eq!(ch.anim.current(), Some("hurtAirSpecialStun"));

        // 위-앞 45도 방향 속도 → 45deg 포즈
        ch.vel = (1.0, -1.0);
        drive(&mut ch, InputSnapshot::neutral(), 2, 0, &cfg, &mut sink);
        assert!(ch.anim.current().unwrap().starts_with("hurtAirScrew"));
        assert_eq!(ch.anim.current(), Some("hurtAirScrew45deg"));
    }

    #[test]
    fn test_knockdown_recovers_and_clears_tornado() {
        let (cfg, mut sink) = test_ctx_parts();
        let mut ch = test_character(Side::P1, (100.0, TEST_FLOOR_Y));
        ch.tornadoed = true;
        ch.change_state(StateId::Knockdown);

        for t in 1..=(cfg.stun.knockdown_ticks as u64 + 5) {
            drive(&mut ch, InputSnapshot::neutral(), t, 0, &cfg, &mut sink);
        }
        assert_eq!(ch.state(), StateId::Idle);
        assert!(!ch.tornadoed);
    }

    #[test]
    fn test_attack_state_plays_out_and_returns() {
        let (cfg, mut sink) = test_ctx_parts();
        let mut ch = test_character(Side::P1, (100.0, TEST_FLOOR_Y));
        let jab = ch.state_id("nmlAtk5LP").unwrap();
        ch.change_state(jab);

        for t in 1..30 {
            drive(&mut ch, InputSnapshot::neutral(), t, 0, &cfg, &mut sink);
        }
        assert_eq!(ch.state(), StateId::Idle);
    }

    #[test]
    fn test_attack_becomes_armed_on_active_frame() {
        let (cfg, mut sink) = test_ctx_parts();
        let mut ch = test_character(Side::P1, (100.0, TEST_FLOOR_Y));
        let jab = ch.state_id("nmlAtk5LP").unwrap();
        ch.change_state(jab);

        assert!(!ch.is_armed());
        let mut armed_seen = false;
        for t in 1..12 {
            drive(&mut ch, InputSnapshot::neutral(), t, 0, &cfg, &mut sink);
            armed_seen |= ch.is_armed();
        }
        assert!(armed_seen, "active-frame movedata must arm the attack");
    }
}
