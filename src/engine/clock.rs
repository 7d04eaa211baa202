/// Frame clock and timing control
///
/// Implements a fixed timestep update loop with variable rendering.
/// Game logic advances at a consistent rate while the render tick
/// carries the real elapsed time since the previous frame.
use std::time::{Duration, Instant};

/// Target update rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of updates per frame to prevent spiral of death
const MAX_UPDATE_STEPS: u32 = 5;

/// Frame clock state
pub struct FrameClock {
    /// Accumulated time for fixed timestep updates
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Time when the clock started
    start_time: Instant,

    /// Whether the game is paused
    paused: bool,

    /// Current frame number
    frame_count: u64,

    /// Total updates executed
    update_count: u64,

    /// Exponentially smoothed FPS
    smoothed_fps: f32,

    /// Elapsed seconds since the previous frame (the render tick)
    render_tick: f32,
}

impl FrameClock {
    /// Create a new frame clock
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: now,
            start_time: now,
            paused: false,
            frame_count: 0,
            update_count: 0,
            smoothed_fps: 0.0,
            render_tick: 0.0,
        }
    }

    /// Begin a new frame, returns the number of fixed updates to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.render_tick = frame_time.as_secs_f32();

        // Smooth FPS over recent frames
        if self.render_tick > 0.0 {
            let instant_fps = 1.0 / self.render_tick;
            self.smoothed_fps = if self.smoothed_fps == 0.0 {
                instant_fps
            } else {
                self.smoothed_fps * 0.95 + instant_fps * 0.05
            };
        }

        // If paused, don't accumulate time for updates
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut updates = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && updates < MAX_UPDATE_STEPS {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            updates += 1;
        }

        self.update_count += updates as u64;
        updates
    }

    /// Get the fixed timestep for logic updates (in seconds)
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Elapsed seconds since the previous frame.
    ///
    /// This is the tick handed to draw calls, which advance animation
    /// clocks by exactly this much once per frame.
    pub fn render_tick(&self) -> f32 {
        self.render_tick
    }

    /// Get current smoothed FPS
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Get total elapsed time since start
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

    /// Get total number of frames rendered
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of updates executed
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Check if the game is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the game
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    /// Resume the game
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Game resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_creation() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.update_count(), 0);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_fixed_timestep() {
        let clock = FrameClock::new();
        assert!((clock.fixed_timestep() - 1.0 / 60.0).abs() < 0.0001);
    }

    #[test]
    fn test_pause_resume() {
        let mut clock = FrameClock::new();
        clock.pause();
        assert!(clock.is_paused());
        clock.resume();
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_toggle_pause() {
        let mut clock = FrameClock::new();
        clock.toggle_pause();
        assert!(clock.is_paused());
        clock.toggle_pause();
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_paused_no_updates() {
        let mut clock = FrameClock::new();
        clock.pause();

        thread::sleep(Duration::from_millis(50));

        let updates = clock.begin_frame();
        assert_eq!(updates, 0);
    }

    #[test]
    fn test_frame_counting() {
        let mut clock = FrameClock::new();
        clock.begin_frame();
        assert_eq!(clock.frame_count(), 1);
        clock.begin_frame();
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_render_tick_positive() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(5));
        clock.begin_frame();
        assert!(clock.render_tick() > 0.0);
    }

    #[test]
    fn test_max_update_steps_limit() {
        let mut clock = FrameClock::new();

        // Simulate a very long frame (300ms)
        thread::sleep(Duration::from_millis(300));

        let updates = clock.begin_frame();
        // Capped even though 300ms would allow 18 updates
        assert!(updates <= MAX_UPDATE_STEPS);
    }
}
