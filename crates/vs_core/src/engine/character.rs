//! Per-character runtime state and tick orchestration.
//!
//! Tick order inside [`Character::tick`] is a contract:
//! input → facing → boxes → pending guard → cancels → state behavior.
//! 블록 리졸버가 걸어둔 가드 상태는 다음 틱 첫머리에서 적용된다. 이
//! 1틱 지연 덕에 블록스턴 타이머/넉백이 새 상태 위에서 깔끔하게 올라간다.

use std::sync::Arc;

use crate::error::Result;
use crate::models::animation::GroundHitAnim;
use crate::models::character::CharacterData;

use super::animation::{AnimationPlayer, AnimationSet, MoveDataId, TypedBox};
use super::boxes::{BoxArray, BoxKind, Rect, MAX_BOXES};
use super::cancel::{resolve_state_name, CancelRule};
use super::config::EngineConfig;
use super::effects::{EffectRequest, EffectSink, Side};
use super::input::{InputBuffer, InputSnapshot};
use super::motion::detect_motion;
use super::state_id::{AttackResult, StateCategory, StateId};
use super::states;

/// A resolved attack move: dynamically named state bound to one animation.
#[derive(Debug, Clone)]
pub struct AttackDef {
    pub name: String,
    pub anim: String,
    pub category: StateCategory,
}

/// Guard state handed over by the block resolver, applied next tick.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PendingGuard {
    pub state: StateId,
    pub block_stun: u32,
    pub knockback: (f32, f32),
}

/// Which way a knocked-down character faces on the ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum LandingFace {
    #[default]
    Up,
    Down,
}

impl LandingFace {
    pub fn flipped(self) -> LandingFace {
        match self {
            LandingFace::Up => LandingFace::Down,
            LandingFace::Down => LandingFace::Up,
        }
    }
}

/// Groundbounce sub-phase: grounded pose first, then the bounce arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum BouncePhase {
    #[default]
    Pre,
    Bounce,
}

/// Per-tick read context for one character's state machine. The shared
/// hit-stop counter is a read-only copy here; only the match loop and the
/// combat resolution pass mutate it.
pub struct TickCtx<'a> {
    pub now: u64,
    pub hit_stop: u32,
    pub floor_y: f32,
    pub opponent_x: f32,
    pub config: &'a EngineConfig,
    pub sink: &'a mut dyn EffectSink,
}

/// One fighter. Created once at match start, mutated every tick, never
/// destroyed mid-match. Owns its position/velocity exclusively; the only
/// cross-character writes happen inside combat resolution.
#[derive(Debug)]
pub struct Character {
    pub name: String,
    pub short_name: String,
    pub side: Side,

    /// World position (y grows downward; the floor is at a fixed +y).
    pub pos: (f32, f32),
    pub vel: (f32, f32),
    /// Facing the art was authored at.
    pub default_facing: i8,
    /// Current facing: +1 toward +x.
    pub facing: i8,
    pub(crate) queued_turn: bool,

    pub(crate) state: StateId,
    pub(crate) previous_state: StateId,
    pub(crate) state_category: StateCategory,
    pub(crate) just_entered: bool,
    /// Stand↔crouch blend animation still playing.
    pub(crate) transitioning: bool,

    pub anim: AnimationPlayer,
    pub(crate) anims: Arc<AnimationSet>,

    pub max_health: i32,
    pub health: i32,
    pub(crate) jump_speed: (f32, f32),

    pub hit_stun_timer: u32,
    pub block_stun_timer: u32,
    pub(crate) knockback: (f32, f32),
    pub(crate) knockback_applied: bool,
    pub(crate) incoming_hit_anim: Option<GroundHitAnim>,
    pub(crate) tornadoed: bool,

    pub(crate) can_hit_this_sequence: bool,
    pub current_attack_result: AttackResult,
    pub(crate) last_hit_move_data: Option<MoveDataId>,

    pub(crate) input: InputBuffer,
    pub(crate) current_input: InputSnapshot,

    pub pushboxes: BoxArray,
    pub hurtboxes: BoxArray,
    pub hitboxes: BoxArray,

    pub(crate) cancel_table: Vec<CancelRule>,
    pub(crate) attacks: Vec<AttackDef>,
    pub(crate) pending_guard: Option<PendingGuard>,

    // State-local scratch, reset by the owning states.
    pub(crate) prev_vel_y: f32,
    pub(crate) last_screw_angle: Option<i32>,
    pub(crate) landing_face: LandingFace,
    pub(crate) bounce_phase: BouncePhase,
    pub(crate) bounce_pre_timer: u32,
    pub(crate) knockdown_timer: u32,
}

impl Character {
    /// Resolve authored character data into a runtime fighter. Fails only on
    /// configuration errors (unknown state names in the cancel table).
    pub fn from_data(
        data: &CharacterData,
        anims: Arc<AnimationSet>,
        side: Side,
        pos: (f32, f32),
    ) -> Result<Character> {
        let attacks: Vec<AttackDef> = data
            .attacks
            .iter()
            .map(|a| AttackDef {
                name: a.name.clone(),
                anim: a.anim.clone().unwrap_or_else(|| a.name.clone()),
                category: a.category,
            })
            .collect();
        if attacks.len() > u16::MAX as usize {
            return Err(crate::error::DataError::TooManyAttacks(attacks.len()));
        }
        for (i, a) in attacks.iter().enumerate() {
            if attacks[..i].iter().any(|b| b.name == a.name) {
                return Err(crate::error::DataError::DuplicateAttack(a.name.clone()));
            }
        }

        let cancel_table = data
            .cancels
            .iter()
            .map(|rule| CancelRule::resolve(rule, &attacks))
            .collect::<Result<Vec<_>>>()?;

        let mut ch = Character {
            name: data.name.clone(),
            short_name: data.shortname.clone(),
            side,
            pos,
            vel: (0.0, 0.0),
            default_facing: data.default_facing,
            facing: data.default_facing,
            queued_turn: false,
            state: StateId::Idle,
            previous_state: StateId::Idle,
            state_category: StateCategory::Stand,
            just_entered: true,
            transitioning: false,
            anim: AnimationPlayer::new(),
            anims,
            max_health: data.max_health,
            health: data.max_health,
            jump_speed: (data.jump_speed_x, data.jump_speed_y),
            hit_stun_timer: 0,
            block_stun_timer: 0,
            knockback: (0.0, 0.0),
            knockback_applied: false,
            incoming_hit_anim: None,
            tornadoed: false,
            can_hit_this_sequence: false,
            current_attack_result: AttackResult::None,
            last_hit_move_data: None,
            input: InputBuffer::new(),
            current_input: InputSnapshot::neutral(),
            pushboxes: [Rect::default(); MAX_BOXES],
            hurtboxes: [Rect::default(); MAX_BOXES],
            hitboxes: [Rect::default(); MAX_BOXES],
            cancel_table,
            attacks,
            pending_guard: None,
            prev_vel_y: 0.0,
            last_screw_angle: None,
            landing_face: LandingFace::Up,
            bounce_phase: BouncePhase::Pre,
            bounce_pre_timer: 0,
            knockdown_timer: 0,
        };
        ch.change_state(StateId::Idle);
        Ok(ch)
    }

    /// Resolve a state name (builtin or attack move) for this character.
    pub fn state_id(&self, name: &str) -> Result<StateId> {
        resolve_state_name(name, &self.attacks)
    }

    /// Display name of the current state (HUD surface).
    pub fn state_name(&self) -> &str {
        match self.state {
            StateId::Attack(i) => self
                .attacks
                .get(i as usize)
                .map(|a| a.name.as_str())
                .unwrap_or("attack"),
            state => <&'static str>::from(state),
        }
    }

    pub fn state(&self) -> StateId {
        self.state
    }

    pub fn state_category(&self) -> StateCategory {
        self.state_category
    }

    pub fn animations(&self) -> &AnimationSet {
        &self.anims
    }

    pub fn is_armed(&self) -> bool {
        self.can_hit_this_sequence
    }

    /// Retained direction-change log (training-display surface).
    pub fn input_log(&self) -> &[super::input::DirEntry] {
        self.input.directions()
    }

    // ------------------------------------------------------------
    // Per-tick orchestration
    // ------------------------------------------------------------

    pub fn tick(&mut self, input: InputSnapshot, ctx: &mut TickCtx) {
        self.current_input = input;
        self.input.record_tick(input, ctx.now, &ctx.config.input);

        self.update_facing(ctx.opponent_x);
        self.update_boxes();

        // Guard state deferred from last tick's block resolution.
        if let Some(pending) = self.pending_guard.take() {
            self.change_state(pending.state);
            self.block_stun_timer = pending.block_stun;
            self.knockback = pending.knockback;
        }

        self.handle_cancels(ctx);
        states::handle_state(self, ctx);
        self.emit_frame_effects(ctx);
    }

    /// Transition to `new`: record the previous state, reset the frame
    /// clock, mark entry (entry actions run in the state's first-tick
    /// block), then resolve any queued facing turn.
    pub fn change_state(&mut self, new: StateId) {
        log::trace!("[{}] state {:?} -> {:?}", self.short_name, self.state, new);
        self.previous_state = self.state;
        self.state = new;
        self.state_category = self.category_of(new);
        self.anim.reset_clock();
        self.just_entered = true;
        self.process_queued_turn();
    }

    pub(crate) fn category_of(&self, state: StateId) -> StateCategory {
        match state {
            StateId::Attack(i) => self
                .attacks
                .get(i as usize)
                .map(|a| a.category)
                .unwrap_or_default(),
            state => state.builtin_category().unwrap_or_default(),
        }
    }

    fn process_queued_turn(&mut self) {
        if !self.queued_turn {
            return;
        }
        if matches!(self.state, StateId::Idle | StateId::Crouch) {
            let turn = if self.state == StateId::Crouch {
                StateId::CrouchTurn
            } else {
                StateId::Turn
            };
            self.change_state(turn);
        }
        self.queued_turn = false;
    }

    /// Auto-face the opponent in turnable states; queue the turn elsewhere.
    fn update_facing(&mut self, opponent_x: f32) {
        let desired: i8 = if opponent_x > self.pos.0 { 1 } else { -1 };
        if self.facing == desired {
            return;
        }
        // Already turning: let it finish.
        if matches!(self.state, StateId::Turn | StateId::CrouchTurn) {
            return;
        }
        match self.state {
            StateId::Idle => self.change_state(StateId::Turn),
            StateId::Crouch => self.change_state(StateId::CrouchTurn),
            _ => self.queued_turn = true,
        }
    }

    /// Rebuild the three box arrays from the current animation frame,
    /// mirroring local x when facing differs from the authored default.
    /// Frame-local boxes of a type shadow the animation defaults of that
    /// type; everything else stays zeroed.
    pub(crate) fn update_boxes(&mut self) {
        for slot in self
            .pushboxes
            .iter_mut()
            .chain(self.hurtboxes.iter_mut())
            .chain(self.hitboxes.iter_mut())
        {
            *slot = Rect::default();
        }

        let Some(name) = self.anim.current() else {
            return;
        };
        let Some(anim) = self.anims.get(name) else {
            return;
        };
        let frame_boxes: &[TypedBox] = anim
            .frames
            .get(self.anim.frame_index)
            .map(|f| f.boxes.as_slice())
            .unwrap_or(&[]);

        let mirror = self.facing != self.default_facing;
        let (pos_x, pos_y) = self.pos;

        for kind in [BoxKind::Push, BoxKind::Hurt, BoxKind::Hit] {
            let from_frame: Vec<Rect> = frame_boxes
                .iter()
                .filter(|b| b.kind == kind)
                .map(|b| b.rect)
                .collect();
            let source = if from_frame.is_empty() {
                anim.default_boxes
                    .iter()
                    .filter(|b| b.kind == kind)
                    .map(|b| b.rect)
                    .collect()
            } else {
                from_frame
            };

            let arr = match kind {
                BoxKind::Push => &mut self.pushboxes,
                BoxKind::Hurt => &mut self.hurtboxes,
                BoxKind::Hit => &mut self.hitboxes,
            };
            for (slot, rect) in arr.iter_mut().zip(source.into_iter().take(MAX_BOXES)) {
                let local = if mirror { rect.mirrored_x() } else { rect };
                *slot = Rect::new(pos_x + local.x, pos_y + local.y, local.w, local.h);
            }
        }
    }

    fn handle_cancels(&mut self, ctx: &TickCtx) {
        if self.anim.current().is_none() {
            return;
        }
        if ctx.hit_stop > 0 {
            return;
        }

        let runtime_frame = self.anim.runtime_frame(&self.anims);
        let keyframe = self.anim.frame_index;

        let mut target = None;
        for rule in &self.cancel_table {
            if rule.matches(
                self.state,
                self.current_attack_result,
                runtime_frame,
                keyframe,
                self.facing,
                &self.input,
                &ctx.config.input,
            ) {
                target = Some(rule.to);
                break; // first fully-satisfied rule wins
            }
        }
        if let Some(to) = target {
            log::debug!("[{}] cancel -> {:?}", self.short_name, to);
            self.change_state(to);
        }
    }

    /// Frame-authored effects fire while their frame is current.
    fn emit_frame_effects(&self, ctx: &mut TickCtx) {
        let Some(frame) = self.anim.current_frame(&self.anims) else {
            return;
        };
        if let Some(fx) = &frame.effects {
            ctx.sink.spawn(EffectRequest {
                visual: fx.visual.clone(),
                sound: fx.sound.clone(),
                follow: Some(self.side),
                ..EffectRequest::at(self.pos.0, self.pos.1)
            });
        }
    }

    // ------------------------------------------------------------
    // Input queries
    // ------------------------------------------------------------

    /// Holding straight or jumping back, relative to facing (not crouching).
    pub fn is_holding_back(&self) -> bool {
        let (x, y) = self.current_input.direction().axes();
        let back_x = if self.facing == 1 { -1 } else { 1 };
        x == back_x && y >= 0
    }

    /// Holding down-back relative to facing.
    pub fn is_holding_down_back(&self) -> bool {
        let (x, y) = self.current_input.direction().axes();
        let back_x = if self.facing == 1 { -1 } else { 1 };
        x == back_x && y == -1
    }

    pub fn has_motion(&self, name: &str, ctx: &TickCtx) -> bool {
        detect_motion(self.input.directions(), name, self.facing, &ctx.config.input)
    }

    // ------------------------------------------------------------
    // Animation helpers
    // ------------------------------------------------------------

    /// Advance the frame clock; a movedata token change re-arms the attack.
    pub(crate) fn advance_frame(&mut self) {
        if self.anim.advance(&self.anims) {
            self.can_hit_this_sequence = true;
        }
    }

    /// Has the current animation reached its last frame? Missing or empty
    /// animations count as finished so partial data cannot soft-lock a
    /// state.
    pub(crate) fn anim_finished(&self) -> bool {
        match self.anim.current_animation(&self.anims) {
            Some(anim) if !anim.frames.is_empty() => {
                self.anim.frame_index >= anim.frames.len() - 1
            }
            _ => true,
        }
    }

    pub fn current_move_data(&self) -> Option<MoveDataId> {
        self.anim.current_move_data(&self.anims)
    }
}
