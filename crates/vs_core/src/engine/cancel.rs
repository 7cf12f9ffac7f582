//! Table-driven cancel resolver.
//!
//! 캔슬 테이블은 순서가 계약이다: 위에서부터 검사해 모든 제약을 만족하는
//! 첫 규칙이 이기고, 그 틱에는 더 이상 보지 않는다. 히트스톱 중에는 어떤
//! 규칙도 발동하지 않는다 (캐릭터 틱에서 차단).
//!
//! State names in authored rules resolve to typed [`StateId`]s at load time;
//! an unknown name is a [`DataError`], never a runtime panic.

use crate::error::{DataError, Result};
use crate::models::character::CancelRuleData;

use super::character::AttackDef;
use super::config::InputConfig;
use super::input::{Button, InputBuffer};
use super::motion::detect_motion;
use super::state_id::{AttackResult, StateId};

/// One resolved cancel rule. Absent constraints match anything.
#[derive(Debug, Clone)]
pub struct CancelRule {
    /// Source states; empty = any.
    pub from: Vec<StateId>,
    /// Required last attack result(s).
    pub result: Option<Vec<AttackResult>>,
    /// Runtime-frame window.
    pub min_frame: Option<u32>,
    pub max_frame: Option<u32>,
    /// Animation keyframe-index window.
    pub min_keyframe: Option<usize>,
    pub max_keyframe: Option<usize>,
    /// Buttons that must all have been tapped within the tap window.
    pub buttons: Vec<Button>,
    /// Motion that must currently be satisfied.
    pub motion: Option<String>,
    pub to: StateId,
}

impl CancelRule {
    /// Resolve an authored rule against the character's attack move list.
    pub fn resolve(data: &CancelRuleData, attacks: &[AttackDef]) -> Result<CancelRule> {
        let from = data
            .from_state
            .iter()
            .map(|name| resolve_state_name(name, attacks))
            .collect::<Result<Vec<_>>>()?;
        Ok(CancelRule {
            from,
            result: data.result.as_ref().map(|r| r.to_vec()),
            min_frame: data.min_frame,
            max_frame: data.max_frame,
            min_keyframe: data.min_keyframe,
            max_keyframe: data.max_keyframe,
            buttons: data.buttons.clone(),
            motion: data.motion.clone(),
            to: resolve_state_name(&data.to, attacks)?,
        })
    }

    /// All present constraints satisfied?
    pub fn matches(
        &self,
        state: StateId,
        result: AttackResult,
        runtime_frame: u32,
        keyframe: usize,
        facing: i8,
        input: &InputBuffer,
        cfg: &InputConfig,
    ) -> bool {
        if !self.from.is_empty() && !self.from.contains(&state) {
            return false;
        }
        if let Some(results) = &self.result {
            if !results.contains(&result) {
                return false;
            }
        }
        if let Some(min) = self.min_frame {
            if runtime_frame < min {
                return false;
            }
        }
        if let Some(max) = self.max_frame {
            if runtime_frame > max {
                return false;
            }
        }
        if let Some(min) = self.min_keyframe {
            if keyframe < min {
                return false;
            }
        }
        if let Some(max) = self.max_keyframe {
            if keyframe > max {
                return false;
            }
        }
        if !self
            .buttons
            .iter()
            .all(|&b| input.was_button_tapped(b, cfg.tap_window_ticks))
        {
            return false;
        }
        if let Some(motion) = &self.motion {
            if !detect_motion(input.directions(), motion, facing, cfg) {
                return false;
            }
        }
        true
    }
}

/// Builtin state name, or an attack move name from the character's list.
pub fn resolve_state_name(name: &str, attacks: &[AttackDef]) -> Result<StateId> {
    if let Some(state) = StateId::parse_builtin(name) {
        return Ok(state);
    }
    attacks
        .iter()
        .position(|a| a.name == name)
        .map(|i| StateId::Attack(i as u16))
        .ok_or_else(|| DataError::UnknownState(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::InputSnapshot;
    use crate::engine::state_id::StateCategory;
    use crate::models::character::OneOrMany;

    fn attack(name: &str) -> AttackDef {
        AttackDef {
            name: name.to_string(),
            anim: name.to_string(),
            category: StateCategory::Stand,
        }
    }

    fn rule_data(json: &str) -> CancelRuleData {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_resolve_builtin_and_attack_names() {
        let attacks = vec![attack("nmlAtk5LP"), attack("nmlAtk5RP")];
        let rule = CancelRule::resolve(
            &rule_data(r#"{ "fromState": ["idle", "nmlAtk5LP"], "to": "nmlAtk5RP" }"#),
            &attacks,
        )
        .unwrap();
        assert_eq!(rule.from, vec![StateId::Idle, StateId::Attack(0)]);
        assert_eq!(rule.to, StateId::Attack(1));
    }

    #[test]
    fn test_resolve_unknown_state_fails() {
        let err = CancelRule::resolve(
            &rule_data(r#"{ "fromState": ["idle"], "to": "nmlAtk9ZZ" }"#),
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, DataError::UnknownState(name) if name == "nmlAtk9ZZ"));
    }

    #[test]
    fn test_matches_state_and_result() {
        let rule = CancelRule {
            from: vec![StateId::Attack(0)],
            result: Some(vec![AttackResult::Hit]),
            min_frame: None,
            max_frame: None,
            min_keyframe: None,
            max_keyframe: None,
            buttons: vec![],
            motion: None,
            to: StateId::Attack(1),
        };
        let input = InputBuffer::new();
        let cfg = InputConfig::default();

        assert!(rule.matches(StateId::Attack(0), AttackResult::Hit, 0, 0, 1, &input, &cfg));
        assert!(!rule.matches(StateId::Attack(0), AttackResult::Whiff, 0, 0, 1, &input, &cfg));
        assert!(!rule.matches(StateId::Idle, AttackResult::Hit, 0, 0, 1, &input, &cfg));
    }

    #[test]
    fn test_matches_frame_windows() {
        let rule = CancelRule {
            from: vec![],
            result: None,
            min_frame: Some(4),
            max_frame: Some(9),
            min_keyframe: Some(1),
            max_keyframe: Some(2),
            buttons: vec![],
            motion: None,
            to: StateId::Idle,
        };
        let input = InputBuffer::new();
        let cfg = InputConfig::default();

        assert!(rule.matches(StateId::Walk, AttackResult::None, 4, 1, 1, &input, &cfg));
        assert!(rule.matches(StateId::Walk, AttackResult::None, 9, 2, 1, &input, &cfg));
        assert!(!rule.matches(StateId::Walk, AttackResult::None, 3, 1, 1, &input, &cfg));
        assert!(!rule.matches(StateId::Walk, AttackResult::None, 10, 1, 1, &input, &cfg));
        assert!(!rule.matches(StateId::Walk, AttackResult::None, 5, 0, 1, &input, &cfg));
        assert!(!rule.matches(StateId::Walk, AttackResult::None, 5, 3, 1, &input, &cfg));
    }

    #[test]
    fn test_matches_button_tap() {
        let rule = CancelRule {
            from: vec![],
            result: None,
            min_frame: None,
            max_frame: None,
            min_keyframe: None,
            max_keyframe: None,
            buttons: vec![Button::Lp],
            motion: None,
            to: StateId::Idle,
        };
        let cfg = InputConfig::default();

        let mut input = InputBuffer::new();
        assert!(!rule.matches(StateId::Idle, AttackResult::None, 0, 0, 1, &input, &cfg));

        let pressed = InputSnapshot { lp: true, ..InputSnapshot::default() };
        input.record_tick(pressed, 1, &cfg);
        assert!(rule.matches(StateId::Idle, AttackResult::None, 0, 0, 1, &input, &cfg));

        // 탭 윈도우(2틱)를 벗어나면 무효
        for t in 2..=4 {
            input.record_tick(InputSnapshot::neutral(), t, &cfg);
        }
        assert!(!rule.matches(StateId::Idle, AttackResult::None, 0, 0, 1, &input, &cfg));
    }

    #[test]
    fn test_result_list_from_authored_array() {
        let data = rule_data(r#"{ "result": ["hit", "block"], "to": "idle" }"#);
        assert!(matches!(data.result, Some(OneOrMany::Many(_))));
        let rule = CancelRule::resolve(&data, &[]).unwrap();
        assert_eq!(rule.result, Some(vec![AttackResult::Hit, AttackResult::Block]));
    }
}
