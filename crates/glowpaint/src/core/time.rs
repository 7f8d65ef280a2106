/// Converts variable display-frame deltas into whole simulation frames.
///
/// Effects are tuned per frame rather than per second, so a 120 Hz display
/// must not run them twice as fast as a 60 Hz one.
pub struct FramePacer {
    /// Duration of one simulation frame in seconds.
    dt: f32,
    /// Most frames a single display refresh may run.
    max_steps: u32,
    /// Time carried over from earlier refreshes.
    accumulator: f32,
}

impl FramePacer {
    pub fn new(dt: f32, max_steps: u32) -> Self {
        Self {
            dt: if dt > 0.0 { dt } else { 1.0 / 60.0 },
            max_steps: max_steps.max(1),
            accumulator: 0.0,
        }
    }

    /// Add a display delta. Returns how many simulation frames to run now.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        // Drop backlog after a stall (hidden tab) instead of replaying it.
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut pacer = FramePacer::new(1.0 / 60.0, 4);
        assert_eq!(pacer.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn high_refresh_display_alternates() {
        let mut pacer = FramePacer::new(1.0 / 60.0, 4);
        let steps: u32 = (0..120).map(|_| pacer.accumulate(1.0 / 120.0)).sum();
        assert!((59..=60).contains(&steps), "ran {} frames", steps);
    }

    #[test]
    fn caps_after_stall() {
        let mut pacer = FramePacer::new(1.0 / 60.0, 4);
        assert_eq!(pacer.accumulate(5.0), 4);
    }

    #[test]
    fn ignores_bad_deltas() {
        let mut pacer = FramePacer::new(1.0 / 60.0, 4);
        assert_eq!(pacer.accumulate(f32::NAN), 0);
        assert_eq!(pacer.accumulate(-1.0), 0);
    }
}
