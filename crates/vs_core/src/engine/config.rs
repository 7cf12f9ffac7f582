//! # Engine Tuning Configuration
//!
//! 모든 튜닝 상수를 중앙에서 관리하는 설정 시스템.
//!
//! Decay constants (frictions, gravity increments, bounce coefficient) vary
//! between balance revisions, so they are configuration rather than
//! contracts. Defaults reproduce the reference revision.
//!
//! ## 사용법
//! ```rust
//! use vs_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let arcade = EngineConfig::arcade();
//! ```

use serde::{Deserialize, Serialize};

/// Full engine tuning set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub physics: PhysicsConfig,
    pub stun: StunConfig,
    pub input: InputConfig,
}

impl EngineConfig {
    /// 기준 리비전 (기본값 그대로)
    pub fn reference() -> Self {
        Self::default()
    }

    /// 아케이드 스타일: 더 무겁게 떨어지고 더 빨리 일어난다
    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.physics.jump_gravity = 0.11;
        cfg.physics.air_hitstun_gravity = 0.09;
        cfg.stun.hitstun_friction = 0.6;
        cfg.stun.knockdown_ticks = 45;
        cfg.stun.bounce_coefficient = 0.6;
        cfg
    }
}

/// Movement and gravity tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// 걷기 속도, px/tick (기본: 1.0)
    pub walk_speed: f32,
    /// 달리기 목표 속도 (기본: 3.5)
    pub run_speed: f32,
    /// 달리기 가속 lerp 계수 (기본: 0.3)
    pub run_accel_lerp: f32,
    /// runStop 감속 lerp 계수 (기본: 0.2)
    pub run_stop_lerp: f32,
    /// runStop에서 속도가 이 값 아래면 0으로 스냅 (기본: 0.5)
    pub run_stop_cutoff: f32,
    /// 점프/낙하 중력 증가량, px/tick² (기본: 0.09)
    pub jump_gravity: f32,
    /// 공중 피격 중력 증가량 (기본: 0.07)
    pub air_hitstun_gravity: f32,
    /// 공중 피격 수평 드래그 배율 (기본: 0.95)
    pub air_drag: f32,
    /// 바운스 궤적 중력 증가량 (기본: 0.08)
    pub bounce_gravity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            walk_speed: 1.0,
            run_speed: 3.5,
            run_accel_lerp: 0.3,
            run_stop_lerp: 0.2,
            run_stop_cutoff: 0.5,
            jump_gravity: 0.09,
            air_hitstun_gravity: 0.07,
            air_drag: 0.95,
            bounce_gravity: 0.08,
        }
    }
}

/// Stun, guard and knockdown tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StunConfig {
    /// 지상 피격 수평 감속 배율 (기본: 0.7)
    pub hitstun_friction: f32,
    /// 상단 가드 마찰, per second (기본: 6.0)
    pub guard_friction_hi: f32,
    /// 하단 가드 마찰, per second (기본: 7.0)
    pub guard_friction_lo: f32,
    /// 가드 넉백 속도가 이 값 아래면 정지 (기본: 0.05)
    pub guard_vel_cutoff: f32,
    /// 다운 유지 시간, ticks (기본: 60)
    pub knockdown_ticks: u32,
    /// 다운/바운스 진입 시 수평 속도 감쇠 배율 (기본: 0.4)
    pub knockdown_entry_damp: f32,
    /// 다운 슬라이드 마찰 배율 (기본: 0.85)
    pub knockdown_slide_friction: f32,
    /// 바운스 전 지면 포즈 시간, ticks (기본: 5)
    pub groundbounce_pre_ticks: u32,
    /// 바운스 전 포즈 중 슬라이드 마찰 배율 (기본: 0.9)
    pub groundbounce_slide_friction: f32,
    /// 바운스 상승 속도 = 넉백 y × 이 계수 (기본: 0.5)
    pub bounce_coefficient: f32,
    /// 바운스 시작 시 수평 속도 감쇠 배율 (기본: 0.6)
    pub bounce_entry_damp: f32,
    /// 착지 분기: 넉백 y가 이 값보다 크면(약하면) 다운, 아니면 바운스
    /// (기본: -2.0)
    pub groundbounce_threshold: f32,
}

impl Default for StunConfig {
    fn default() -> Self {
        Self {
            hitstun_friction: 0.7,
            guard_friction_hi: 6.0,
            guard_friction_lo: 7.0,
            guard_vel_cutoff: 0.05,
            knockdown_ticks: 60,
            knockdown_entry_damp: 0.4,
            knockdown_slide_friction: 0.85,
            groundbounce_pre_ticks: 5,
            groundbounce_slide_friction: 0.9,
            bounce_coefficient: 0.5,
            bounce_entry_damp: 0.6,
            groundbounce_threshold: -2.0,
        }
    }
}

/// Input buffer and motion recognition windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// 방향 엔트리 보존 기간, ticks (기본: 15)
    pub dir_retention_ticks: u64,
    /// 버튼 엔트리 보존 기간, ticks (기본: 20)
    pub button_retention_ticks: u64,
    /// 캔슬 버튼 탭 인정 윈도우, ticks (기본: 2)
    pub tap_window_ticks: u64,
    /// 커맨드 입력 간 최대 간격, ticks (기본: 12)
    pub motion_time_window: u64,
    /// 대시 두 번째 탭 최대 간격, ticks (기본: 8)
    pub dash_max_gap: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir_retention_ticks: 15,
            button_retention_ticks: 20,
            tap_window_ticks: 2,
            motion_time_window: 12,
            dash_max_gap: 8,
        }
    }
}

// ========== Tests ==========
