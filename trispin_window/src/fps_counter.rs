use std::time::{Duration, Instant};

const MEASUREMENT_PERIOD: Duration = Duration::from_secs(3);

/// Averages frame rate over periods of a few seconds so the displayed value
/// stays readable.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frames: u32,
    last_time: Instant,
    measurement: (u32, Duration),
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            frames: 0,
            last_time: now,
            measurement: (0, Duration::ZERO),
        }
    }

    pub fn end_frame(&mut self) {
        self.end_frame_at(Instant::now());
    }

    fn end_frame_at(&mut self, now: Instant) {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.last_time);
        if elapsed >= MEASUREMENT_PERIOD {
            self.measurement = (self.frames, elapsed);
            self.last_time = now;
            self.frames = 0;
        }
    }

    pub fn fps(&self) -> f32 {
        let (frames, elapsed) = self.measurement;
        if frames == 0 || elapsed.is_zero() {
            0.0
        } else {
            frames as f32 / elapsed.as_secs_f32()
        }
    }

    pub fn mspf(&self) -> f32 {
        let (frames, elapsed) = self.measurement;
        if frames == 0 || elapsed.is_zero() {
            0.0
        } else {
            elapsed.as_secs_f32() / frames as f32 * 1000.0
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_no_measurement_before_period() {
        let start = Instant::now();
        let mut counter = FpsCounter::starting_at(start);
        for i in 1..100 {
            counter.end_frame_at(start + Duration::from_millis(i * 10));
        }
        assert_eq!(counter.fps(), 0.0);
        assert_eq!(counter.mspf(), 0.0);
    }

    #[test]
    fn test_measurement_after_period() {
        let start = Instant::now();
        let mut counter = FpsCounter::starting_at(start);
        // 180 frames at 60 fps.
        for i in 1..=180 {
            counter.end_frame_at(start + Duration::from_micros(i * 16_667));
        }
        assert!((counter.fps() - 60.0).abs() < 0.1, "fps = {}", counter.fps());
        assert!((counter.mspf() - 16.667).abs() < 0.01, "mspf = {}", counter.mspf());

        // The measurement holds until the next period completes.
        counter.end_frame_at(start + Duration::from_secs(4));
        assert!((counter.fps() - 60.0).abs() < 0.1);
    }
}
