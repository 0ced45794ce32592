use std::time::{Duration, Instant};

/// Frame timing: delta time between frames and a rolling frame rate
/// for display.
#[derive(Debug)]
pub struct FrameStats {
    last_frame: Instant,
    previous_time: Instant,
    frames: usize,
    delta_time: f64,
    fps: Option<f64>,
}

impl FrameStats {
    /// Frame rate is averaged over windows of this length.
    pub const AVERAGE_WINDOW: f64 = 0.2;

    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            previous_time: now,
            frames: 0,
            delta_time: 0.0,
            fps: None,
        }
    }

    /// Mark the end of a frame, optionally sleeping so the
    /// frame rate stays under `limit_fps`. Returns the delta time in
    /// seconds.
    pub fn update(&mut self, limit_fps: Option<f64>) -> f64 {
        if let Some(limit_fps) = limit_fps {
            let expected_time = (self.frames + 1) as f64 / limit_fps;
            let time_diff = (Instant::now() - self.previous_time).as_secs_f64();

            let wait_time = expected_time - time_diff;
            if wait_time.is_finite() && wait_time > 0.0 {
                std::thread::sleep(Duration::from_secs_f64(wait_time));
            }
        }

        self.update_at(Instant::now())
    }

    fn update_at(&mut self, now: Instant) -> f64 {
        self.frames += 1;

        self.delta_time = now.saturating_duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;

        let time_diff = now.saturating_duration_since(self.previous_time).as_secs_f64();
        if time_diff > 0.0 {
            self.fps = Some(self.frames as f64 / time_diff);
        }

        if time_diff > Self::AVERAGE_WINDOW {
            self.previous_time = now;
            self.frames = 0;
        }

        self.delta_time
    }

    /// Seconds spent on the last frame.
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Cached frame rate, `None` until the first frame ends.
    pub fn fps(&self) -> Option<f64> {
        self.fps
    }

    /// Average milliseconds per frame derived from [`Self::fps()`].
    pub fn ms_per_frame(&self) -> Option<f64> {
        self.fps.map(|fps| 1000.0 / fps)
    }

    /// Line shown in the overlay.
    pub fn summary(&self) -> String {
        match (self.ms_per_frame(), self.fps) {
            (Some(ms_per_frame), Some(fps)) => format!(
                "Application average {:.3} ms/frame ({:.1} FPS)",
                ms_per_frame, fps
            ),
            _ => "Application average: measuring".to_string(),
        }
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}
