//! Test fixtures: a minimal but complete character, built programmatically.
//!
//! 실제 데이터 파일 없이 엔진 전체를 돌릴 수 있는 최소 셋. 계약 테스트와
//! 상태 테스트가 공유한다.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;

use crate::models::animation::{AnimationData, BoxData, FrameData, MoveData};
use crate::models::character::CharacterData;

use super::animation::AnimationSet;
use super::boxes::BoxKind;
use super::character::Character;
use super::config::EngineConfig;
use super::effects::{EffectCollector, Side};
use super::match_loop::MatchEngine;

pub const TEST_FLOOR_Y: f32 = 140.0;

fn frame(duration: u32) -> FrameData {
    FrameData { duration: Some(duration), ..FrameData::default() }
}

fn boxed_frame(duration: u32, boxes: Vec<BoxData>) -> FrameData {
    FrameData { duration: Some(duration), boxes, ..FrameData::default() }
}

fn push(x: f32, y: f32, w: f32, h: f32) -> BoxData {
    BoxData { kind: BoxKind::Push, x, y, w, h }
}

fn hurt(x: f32, y: f32, w: f32, h: f32) -> BoxData {
    BoxData { kind: BoxKind::Hurt, x, y, w, h }
}

fn hit(x: f32, y: f32, w: f32, h: f32) -> BoxData {
    BoxData { kind: BoxKind::Hit, x, y, w, h }
}

fn looping(frames: Vec<FrameData>, default_boxes: Vec<BoxData>) -> AnimationData {
    AnimationData { frames, looped: Some(true), default_boxes, ..AnimationData::default() }
}

fn play_once(frames: Vec<FrameData>, default_boxes: Vec<BoxData>) -> AnimationData {
    AnimationData { frames, play_once: Some(true), default_boxes, ..AnimationData::default() }
}

fn movedata(value: serde_json::Value) -> Vec<MoveData> {
    vec![serde_json::from_value(value).unwrap()]
}

/// Standing default boxes: pushbox deliberately asymmetric so mirroring is
/// observable.
fn stand_boxes() -> Vec<BoxData> {
    vec![push(-4.0, -32.0, 16.0, 32.0), hurt(-6.0, -32.0, 12.0, 32.0)]
}

fn crouch_boxes() -> Vec<BoxData> {
    vec![push(-4.0, -16.0, 16.0, 16.0), hurt(-6.0, -16.0, 12.0, 16.0)]
}

/// Build the full animation set the state machine expects.
pub fn test_animation_set() -> AnimationSet {
    let mut anims: HashMap<String, AnimationData> = HashMap::new();

    for name in ["idle", "walkF", "walkB", "run", "jump", "fall"] {
        anims.insert(name.into(), looping(vec![frame(6), frame(6)], stand_boxes()));
    }
    anims.insert("crouch".into(), looping(vec![frame(6)], crouch_boxes()));

    for name in ["croToSta", "staToCro", "turn", "land", "runStop", "prejump"] {
        anims.insert(name.into(), play_once(vec![frame(2), frame(2)], stand_boxes()));
    }
    anims.insert("crouchTurn".into(), play_once(vec![frame(2), frame(2)], crouch_boxes()));

    for name in ["guardHi", "guardHiPost"] {
        anims.insert(name.into(), play_once(vec![frame(4), frame(4)], stand_boxes()));
    }
    for name in ["guardLo", "guardLoPost"] {
        anims.insert(name.into(), play_once(vec![frame(4), frame(4)], crouch_boxes()));
    }

    for name in ["hurtStandHi", "hurtStandLo", "hurtAirStun", "hurtAirFall",
        "hurtAirTornado", "hurtAirSpecialStun"]
    {
        anims.insert(name.into(), looping(vec![frame(6)], stand_boxes()));
    }
    anims.insert("hurtCrouch".into(), looping(vec![frame(6)], crouch_boxes()));

    for deg in (0..360).step_by(45) {
        anims.insert(
            format!("hurtAirScrew{deg}deg"),
            looping(vec![frame(4)], stand_boxes()),
        );
    }

    for name in ["knockdownFaceUp", "knockdownFaceDown", "groundbounceToFaceUp",
        "groundbounceToFaceDown"]
    {
        anims.insert(name.into(), looping(vec![frame(6)], stand_boxes()));
    }

    // Standing jab: 2-tick startup, 3-tick active window, 4-tick recovery.
    anims.insert(
        "nmlAtk5LP".into(),
        AnimationData {
            frames: vec![
                frame(2),
                FrameData {
                    duration: Some(3),
                    boxes: vec![
                        push(-4.0, -32.0, 16.0, 32.0),
                        hurt(-6.0, -32.0, 12.0, 32.0),
                        hit(4.0, -28.0, 28.0, 20.0),
                    ],
                    movedata: Some(movedata(json!({
                        "damage": 50,
                        "hit_stun": 12,
                        "block_stun": 10,
                        "hit_pause": 8,
                        "block_pause": 6,
                        "hit_knockback": [-2.0, 0.0],
                        "block_knockback": [-1.5, 0.0],
                        "guard_flag": "Mid",
                        "strength": "Medium"
                    }))),
                    ..FrameData::default()
                },
                boxed_frame(4, stand_boxes()),
            ],
            play_once: Some(true),
            ..AnimationData::default()
        },
    );

    // Standing straight: High attack, launches on hit.
    anims.insert(
        "nmlAtk5RP".into(),
        AnimationData {
            frames: vec![
                frame(3),
                FrameData {
                    duration: Some(3),
                    boxes: vec![
                        push(-4.0, -32.0, 16.0, 32.0),
                        hurt(-6.0, -32.0, 12.0, 32.0),
                        hit(4.0, -30.0, 26.0, 16.0),
                    ],
                    movedata: Some(movedata(json!({
                        "damage": 70,
                        "hit_stun": 16,
                        "block_stun": 12,
                        "hit_pause": 10,
                        "block_pause": 8,
                        "hit_knockback": [-3.0, -3.0],
                        "block_knockback": [-2.0, 0.0],
                        "guard_flag": "High",
                        "strength": "Heavy",
                        "hit_animtype_ground": "High"
                    }))),
                    ..FrameData::default()
                },
                boxed_frame(5, stand_boxes()),
            ],
            play_once: Some(true),
            ..AnimationData::default()
        },
    );

    // Crouching jab: the low variant entered while down is held.
    anims.insert(
        "nmlAtk2LP".into(),
        AnimationData {
            frames: vec![
                frame(2),
                FrameData {
                    duration: Some(2),
                    boxes: vec![
                        push(-4.0, -16.0, 16.0, 16.0),
                        hurt(-6.0, -16.0, 12.0, 16.0),
                        hit(4.0, -10.0, 22.0, 10.0),
                    ],
                    movedata: Some(movedata(json!({
                        "damage": 30,
                        "hit_stun": 9,
                        "block_stun": 8,
                        "hit_pause": 6,
                        "block_pause": 5,
                        "hit_knockback": [-1.0, 0.0],
                        "block_knockback": [-1.0, 0.0],
                        "guard_flag": "Low",
                        "strength": "Light",
                        "hit_animtype_ground": "Low"
                    }))),
                    ..FrameData::default()
                },
                boxed_frame(3, crouch_boxes()),
            ],
            play_once: Some(true),
            ..AnimationData::default()
        },
    );

    AnimationSet::from_data(None, anims)
}

pub fn test_character_data() -> CharacterData {
    serde_json::from_value(json!({
        "name": "Stray",
        "shortname": "str",
        "attacks": [
            { "name": "nmlAtk5LP", "category": "stand" },
            { "name": "nmlAtk2LP", "category": "crouch" },
            { "name": "nmlAtk5RP", "category": "stand" }
        ],
        "cancels": [
            { "fromState": ["idle", "walk", "run"], "buttons": ["lp"],
              "minFrame": 0, "to": "nmlAtk5LP" },
            { "fromState": ["crouch"], "buttons": ["lp"],
              "minFrame": 0, "to": "nmlAtk2LP" },
            { "fromState": ["idle", "walk", "run"], "buttons": ["rp"],
              "minFrame": 0, "to": "nmlAtk5RP" },
            { "fromState": ["nmlAtk5LP"], "result": "hit", "buttons": ["rp"],
              "to": "nmlAtk5RP" }
        ]
    }))
    .unwrap()
}

pub fn test_character(side: Side, pos: (f32, f32)) -> Character {
    let set = Arc::new(test_animation_set());
    Character::from_data(&test_character_data(), set, side, pos).unwrap()
}

/// P1 on the left facing right, P2 on the right facing left, both grounded.
pub fn test_engine() -> MatchEngine {
    let mut p1 = test_character(Side::P1, (100.0, TEST_FLOOR_Y));
    let mut p2 = test_character(Side::P2, (160.0, TEST_FLOOR_Y));
    p1.facing = 1;
    p2.facing = -1;
    MatchEngine::new(p1, p2, TEST_FLOOR_Y, EngineConfig::default())
}

/// Like [`test_engine`] but with the characters inside jab range.
pub fn test_engine_close() -> MatchEngine {
    let mut engine = test_engine();
    engine.character_mut(Side::P2).pos = (120.0, TEST_FLOOR_Y);
    engine
}

pub fn test_ctx_parts() -> (EngineConfig, EffectCollector) {
    (EngineConfig::default(), EffectCollector::new())
}
