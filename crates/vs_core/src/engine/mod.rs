//! Combat simulation engine.
//!
//! Everything here is driven synchronously by [`match_loop::MatchEngine::tick`]
//! at a fixed rate; no module suspends, blocks, or draws.

pub mod animation; // frame player + eager movedata resolution
pub mod boxes; // AABB geometry, box arrays, facing mirror
pub mod cancel; // table-driven cancel resolver
pub mod character; // per-character runtime state + tick orchestration
pub mod combat; // hit scan, take_hit / take_block
pub mod config; // tuning constants (physics, stun decay, input windows)
pub mod direction; // numpad direction model
pub mod effects; // effect-spawn callback surface (renderer/audio)
pub mod input; // polled snapshot + rolling edge-triggered buffers
pub mod match_loop; // per-tick ordering, push separation, shared hit-stop
pub mod motion; // motion registry + backward-in-time matching
pub mod state_id; // typed state identifier + categories
pub mod states; // per-state per-tick behavior
pub mod timestep; // fixed tick-rate constants

#[cfg(test)]
pub mod test_fixtures;
