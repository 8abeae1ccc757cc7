use std::time::{Duration, Instant};

/// Stopwatch for the presenter view. Pausing keeps the elapsed time;
/// starting an already running timer has no effect.
#[derive(Debug, Clone, Default)]
pub struct PresentationTimer {
    accumulated: Duration,
    running_since: Option<Instant>,
}

impl PresentationTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, now: Instant) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    pub fn stop(&mut self) {
        self.stop_at(Instant::now());
    }

    pub fn stop_at(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += now.saturating_duration_since(since);
        }
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        self.running_since = None;
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        match self.running_since {
            Some(since) => self.accumulated + now.saturating_duration_since(since),
            None => self.accumulated,
        }
    }

    pub fn text_at(&self, now: Instant) -> String {
        format_elapsed(self.elapsed_at(now))
    }
}

/// `MM:SS`. Minutes keep counting past 59, there is no hour field.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_elapsed(Duration::ZERO), "00:00");
        assert_eq!(format_elapsed(Duration::from_millis(59_999)), "00:59");
        assert_eq!(format_elapsed(Duration::from_secs(61)), "01:01");
        assert_eq!(format_elapsed(Duration::from_secs(100 * 60 + 5)), "100:05");
    }

    #[test]
    fn new_timer_is_stopped_at_zero() {
        let timer = PresentationTimer::new();
        assert!(!timer.is_running());
        let now = Instant::now();
        assert_eq!(timer.elapsed_at(now), Duration::ZERO);
        assert_eq!(timer.text_at(now), "00:00");
    }

    #[test]
    fn pause_keeps_elapsed_time() {
        let t0 = Instant::now();
        let mut timer = PresentationTimer::new();
        timer.start_at(t0);
        timer.stop_at(t0 + Duration::from_secs(10));
        assert!(!timer.is_running());
        assert_eq!(
            timer.elapsed_at(t0 + Duration::from_secs(500)),
            Duration::from_secs(10)
        );

        timer.start_at(t0 + Duration::from_secs(20));
        assert_eq!(
            timer.elapsed_at(t0 + Duration::from_secs(25)),
            Duration::from_secs(15)
        );
    }

    #[test]
    fn start_is_single_flight() {
        let t0 = Instant::now();
        let mut timer = PresentationTimer::new();
        timer.start_at(t0);
        // A second start must not move the reference point
        timer.start_at(t0 + Duration::from_secs(30));
        assert_eq!(
            timer.elapsed_at(t0 + Duration::from_secs(40)),
            Duration::from_secs(40)
        );
    }

    #[test]
    fn stop_when_stopped_is_harmless() {
        let t0 = Instant::now();
        let mut timer = PresentationTimer::new();
        timer.stop_at(t0);
        timer.start_at(t0);
        timer.stop_at(t0 + Duration::from_secs(3));
        timer.stop_at(t0 + Duration::from_secs(9));
        assert_eq!(timer.elapsed_at(t0 + Duration::from_secs(9)), Duration::from_secs(3));
    }

    #[test]
    fn reset_clears_everything() {
        let t0 = Instant::now();
        let mut timer = PresentationTimer::new();
        timer.start_at(t0);
        timer.reset();
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed_at(t0 + Duration::from_secs(5)), Duration::ZERO);
    }
}
