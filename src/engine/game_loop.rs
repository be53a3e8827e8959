/// Frame timing for the host loop
///
/// The player component is frame-rate independent: it only needs the
/// seconds elapsed since the previous frame. This clock measures that
/// delta, clamps pathological spikes (window drags, debugger stops) so a
/// single step cannot carry a jump through the ground, and reports zero
/// while paused.
use std::collections::VecDeque;
use std::time::Instant;

/// Longest delta handed to the simulation in one frame (seconds)
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Frame clock state
pub struct GameLoop {
    /// Time of last frame
    last_frame_time: Instant,

    /// Time when the clock started
    start_time: Instant,

    paused: bool,

    /// Raw frame durations for FPS calculation
    frame_times: VecDeque<f32>,

    frame_count: u64,

    /// Current FPS (updated every 10 frames)
    current_fps: f32,

    /// Delta handed out by the last `begin_frame`
    delta_time: f32,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a clock whose first frame is measured from `start`
    pub fn starting_at(start: Instant) -> Self {
        Self {
            last_frame_time: start,
            start_time: start,
            paused: false,
            frame_times: VecDeque::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
            delta_time: 0.0,
        }
    }

    /// Begin a new frame, returns the simulation delta in seconds
    pub fn begin_frame(&mut self) -> f32 {
        self.begin_frame_at(Instant::now())
    }

    /// Begin a frame at an explicit instant
    pub fn begin_frame_at(&mut self, now: Instant) -> f32 {
        let raw = now
            .saturating_duration_since(self.last_frame_time)
            .as_secs_f32();
        self.last_frame_time = now;
        self.frame_count += 1;

        self.frame_times.push_back(raw);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.pop_front();
        }
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        self.delta_time = if self.paused {
            0.0
        } else if raw > MAX_FRAME_DELTA {
            log::warn!(
                "Frame took {:.3}s, clamping simulation step to {:.3}s",
                raw,
                MAX_FRAME_DELTA
            );
            MAX_FRAME_DELTA
        } else {
            raw
        };
        self.delta_time
    }

    /// Delta handed out by the most recent frame
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Seconds between clock start and the last frame
    pub fn elapsed_secs(&self) -> f32 {
        self.last_frame_time
            .saturating_duration_since(self.start_time)
            .as_secs_f32()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            log::info!("Game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    fn update_fps(&mut self) {
        let total: f32 = self.frame_times.iter().sum();
        self.current_fps = if total > 0.0 {
            self.frame_times.len() as f32 / total
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
