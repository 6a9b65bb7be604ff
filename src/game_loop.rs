use std::time::{Duration, Instant};

/// Ceiling on steps returned by one `tick`. A long stall (window drag,
/// debugger pause) would otherwise turn into a burst of catch-up
/// updates.
const MAX_STEPS_PER_TICK: u32 = 8;

/// Fixed-timestep driver. Wall-clock time accumulates and `tick`
/// converts it into whole `1/fps` steps, so light paths and caster
/// spins advance the same amount regardless of refresh rate.
pub struct GameLoop {
    last_update: Instant,
    accumulator: Duration,
    fixed_timestep: Duration,
}

impl GameLoop {
    pub fn new(fps: u32) -> Self {
        Self {
            last_update: Instant::now(),
            accumulator: Duration::ZERO,
            fixed_timestep: Duration::from_secs_f64(1.0 / f64::from(fps)),
        }
    }

    /// Banks the time since the previous call and returns how many
    /// whole fixed steps the caller should simulate, each advancing by
    /// `delta_time` seconds. Anything past the step ceiling is
    /// discarded rather than replayed.
    pub fn tick(&mut self) -> u32 {
        let now = Instant::now();
        self.accumulator += now.duration_since(self.last_update);
        self.last_update = now;

        let mut steps = 0;
        while self.accumulator >= self.fixed_timestep && steps < MAX_STEPS_PER_TICK {
            self.accumulator -= self.fixed_timestep;
            steps += 1;
        }
        if steps == MAX_STEPS_PER_TICK {
            self.accumulator = Duration::ZERO;
        }
        steps
    }

    /// Length of one fixed step, in seconds.
    pub fn delta_time(&self) -> f32 {
        self.fixed_timestep.as_secs_f32()
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_step_matches_requested_rate() {
        let game_loop = GameLoop::new(50);
        assert!((game_loop.delta_time() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn accumulated_time_runs_whole_steps() {
        let mut game_loop = GameLoop::new(60);
        // Backdate the last update so a known amount has accumulated.
        game_loop.last_update = Instant::now() - Duration::from_millis(50);

        let steps = game_loop.tick();
        // 50ms at 60Hz is exactly three whole steps (16.6ms each).
        assert!((2..=3).contains(&steps), "steps = {steps}");
    }

    #[test]
    fn long_stall_is_capped_not_replayed() {
        let mut game_loop = GameLoop::new(60);
        game_loop.last_update = Instant::now() - Duration::from_secs(5);

        assert_eq!(game_loop.tick(), MAX_STEPS_PER_TICK);
        // The leftover backlog went with the capped tick.
        assert_eq!(game_loop.tick(), 0);
    }
}
