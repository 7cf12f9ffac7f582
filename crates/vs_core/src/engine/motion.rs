//! Motion recognition.
//!
//! Named multi-frame input patterns are matched backward-in-time against the
//! rolling direction buffer: the newest entries must complete the pattern
//! tail-first, with a bounded number of mismatched entries (leniency) and a
//! bounded gap between matched entries. facing=-1 mirrors every direction in
//! the pattern before matching, so motions are facing-symmetric by
//! construction.
//!
//! `run` is special-cased as a dash: two same-direction forward taps within a
//! short gap, abandoned as soon as the opposite direction shows up.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::config::InputConfig;
use super::direction::Direction;
use super::input::DirEntry;

use Direction::{Down, DownRight, Neutral, Right};

/// A named motion: alternative direction sequences plus a mismatch budget.
#[derive(Debug, Clone)]
pub struct MotionDef {
    pub sequences: &'static [&'static [Direction]],
    pub leniency: u32,
}

/// Built-in motion registry. Sequences are authored for facing=+1 and
/// mirrored on the fly for facing=-1.
static MOTIONS: Lazy<HashMap<&'static str, MotionDef>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(
        "qcf",
        MotionDef { sequences: &[&[Down, DownRight, Right]], leniency: 4 },
    );
    m.insert(
        "dp",
        MotionDef {
            sequences: &[
                &[Right, Down, DownRight],
                &[Right, Neutral, Down, DownRight],
                &[Right, Down, DownRight, Right],
            ],
            leniency: 4,
        },
    );
    // "run"은 시퀀스가 아니라 대시 전용 탐지기를 쓴다
    m
});

/// Does the buffer currently satisfy `name` for the given facing?
/// Unknown names are silently false.
pub fn detect_motion(buffer: &[DirEntry], name: &str, facing: i8, cfg: &InputConfig) -> bool {
    if name == "run" {
        return detect_dash(buffer, facing, cfg.dash_max_gap);
    }

    let Some(motion) = MOTIONS.get(name) else {
        return false;
    };

    motion.sequences.iter().any(|seq| {
        let adjusted: Vec<Direction> = if facing == 1 {
            seq.to_vec()
        } else {
            seq.iter().map(|d| d.flip()).collect()
        };
        match_pattern(buffer, &adjusted, motion.leniency, cfg.motion_time_window)
    })
}

/// Backward-in-time pattern match.
///
/// Walks the buffer newest-first, consuming the pattern tail-first. A
/// non-matching entry costs one leniency point; exceeding the budget or a
/// gap larger than `time_window` between matched entries aborts.
pub fn match_pattern(
    buffer: &[DirEntry],
    pattern: &[Direction],
    leniency: u32,
    time_window: u64,
) -> bool {
    if pattern.is_empty() {
        return false;
    }

    let mut seq_index = pattern.len() - 1;
    let mut mismatches = 0u32;
    let mut last_tick: Option<u64> = None;

    for entry in buffer.iter().rev() {
        if let Some(last) = last_tick {
            if last - entry.tick > time_window {
                break;
            }
        }

        if entry.dir == pattern[seq_index] {
            last_tick = Some(entry.tick);
            if seq_index == 0 {
                return true;
            }
            seq_index -= 1;
        } else {
            mismatches += 1;
            if mismatches > leniency {
                break;
            }
        }
    }
    false
}

/// Dash: two taps of the forward direction within `max_gap` ticks.
/// A back-direction entry between them discards the search.
pub fn detect_dash(buffer: &[DirEntry], facing: i8, max_gap: u64) -> bool {
    let forward = if facing == 1 { Right } else { Right.flip() };
    let back = forward.flip();

    let mut last_tap: Option<u64> = None;

    for entry in buffer.iter().rev() {
        if entry.dir == forward {
            if let Some(last) = last_tap {
                if last - entry.tick <= max_gap {
                    return true;
                }
            }
            last_tap = Some(entry.tick);
        }
        if entry.dir == back {
            break;
        }
    }
    false
}
