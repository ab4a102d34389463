//! Frames-per-second measurement.

use instant::{Duration, Instant};

/// Length of the window the frame rate is averaged over.
pub const MEASUREMENT_INTERVAL: Duration = Duration::from_millis(500);

/// Counts frames and turns them into a frame rate every [`MEASUREMENT_INTERVAL`].
///
/// Call [`measure`](Self::measure) at the start of a frame and
/// [`update_frame_count`](Self::update_frame_count) after presenting it.
#[derive(Debug, Clone)]
pub struct FpsTimer {
    window_start: Instant,
    last_frame: Instant,
    frames: u32,
    fps: f64,
}

impl FpsTimer {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            window_start: now,
            last_frame: now,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Returns the time since the previous measurement.
    pub fn measure(&mut self) -> Duration {
        self.measure_at(Instant::now())
    }

    pub fn measure_at(&mut self, now: Instant) -> Duration {
        let dt = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= MEASUREMENT_INTERVAL {
            self.fps = self.frames as f64 / elapsed.as_secs_f64();
            self.frames = 0;
            self.window_start = now;
        }
        dt
    }

    pub fn update_frame_count(&mut self) {
        self.frames += 1;
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn fps_text(&self) -> String {
        format!("fps: {:.1}", self.fps)
    }
}

impl Default for FpsTimer {
    fn default() -> Self {
        Self::new()
    }
}
