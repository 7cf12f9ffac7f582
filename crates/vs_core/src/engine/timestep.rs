/// timestep.rs
/// Fixed Simulation Tick Constants
///
/// One tick = one simulation step, advanced by the external frame driver.
/// All durations in the engine (stun timers, frame durations, buffer
/// retention) are counted in these ticks.

/// Simulation ticks per second.
pub const TICK_RATE: u32 = 60;

/// Tick duration in seconds.
pub const TICK_DT: f32 = 1.0 / TICK_RATE as f32;

// Compile-time validation
const _: () = assert!(TICK_RATE > 0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_rate_consistency() {
        assert_eq!(TICK_RATE, 60);
        assert!((TICK_DT * TICK_RATE as f32 - 1.0).abs() < 1e-6);
    }
}
