/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DelayState {
    Pending,
    Fired,
    Cancelled,
}

/// One-shot timer driven by simulated time.
///
/// The component that schedules something owns the `Delay`; cancelling it
/// (or dropping the owner) is the only way to withdraw the scheduled work,
/// so nothing can fire against a torn-down component.
#[derive(Debug, Clone)]
pub struct Delay {
    duration: f32,
    elapsed: f32,
    state: DelayState,
}

impl Delay {
    /// Arm a delay of `duration` seconds.
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            elapsed: 0.0,
            state: DelayState::Pending,
        }
    }

    pub fn from_millis(ms: u32) -> Self {
        Self::new(ms as f32 / 1000.0)
    }

    /// Advance by `dt` seconds. Returns `true` exactly once: on the tick
    /// where the accumulated time first reaches the duration.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.state != DelayState::Pending {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.state = DelayState::Fired;
            true
        } else {
            false
        }
    }

    /// Withdraw the delay. A cancelled delay never fires.
    pub fn cancel(&mut self) {
        if self.state == DelayState::Pending {
            self.state = DelayState::Cancelled;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == DelayState::Pending
    }

    pub fn has_fired(&self) -> bool {
        self.state == DelayState::Fired
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Seconds accumulated so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
