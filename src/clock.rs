use web_time::Instant;

/// Wall clock that starts on the first call to `elapsed_time` or `delta`, so time spent
/// before the first frame is not counted.
#[derive(Debug, Default)]
pub struct Clock {
    start: Option<Instant>,
    last_delta: Option<Instant>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call, or since the clock started. The first call starts the
    /// clock and returns 0.
    pub fn delta(&mut self) -> f32 {
        let now = Instant::now();

        let Some(last) = self.last_delta.replace(now) else {
            self.start = Some(now);
            return 0.0;
        };

        now.duration_since(last).as_secs_f32()
    }

    /// Seconds since the clock started. The first call starts the clock and returns 0.
    pub fn elapsed_time(&mut self) -> f32 {
        self.delta();

        match (self.start, self.last_delta) {
            (Some(start), Some(last)) => last.duration_since(start).as_secs_f32(),
            _ => 0.0,
        }
    }
}
