//! Wall-clock measurement around a single computation.

use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};

/// Elapsed time of one measured computation, from a monotonic clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timing {
    elapsed: Duration,
}

impl Timing {
    pub fn from_duration(elapsed: Duration) -> Self {
        Self { elapsed }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// How many times faster `self` is than `baseline`; 0.0 when `self`
    /// measured no time at all.
    pub fn speedup_over(&self, baseline: Timing) -> f64 {
        let t = self.seconds();
        if t > 0.0 {
            baseline.seconds() / t
        } else {
            0.0
        }
    }
}

/// Serialized as fractional seconds.
impl Serialize for Timing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.seconds())
    }
}

/// A value together with the time it took to compute.
#[derive(Clone, Copy, Debug)]
pub struct Timed<T> {
    pub value: T,
    pub timing: Timing,
}

/// Run `f`, measuring only the call itself.
pub fn timed<T>(f: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let value = f();
    let timing = Timing::from_duration(start.elapsed());
    Timed { value, timing }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_returns_value() {
        let t = timed(|| 6 * 7);
        assert_eq!(t.value, 42);
        assert!(t.timing.seconds() >= 0.0);
    }

    #[test]
    fn test_timed_measures_sleep() {
        let t = timed(|| std::thread::sleep(Duration::from_millis(5)));
        assert!(t.timing.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_speedup() {
        let fast = Timing::from_duration(Duration::from_millis(10));
        let slow = Timing::from_duration(Duration::from_millis(40));
        assert!((fast.speedup_over(slow) - 4.0).abs() < 1e-9);
        assert_eq!(Timing::default().speedup_over(slow), 0.0);
    }

    #[test]
    fn test_serializes_as_seconds() {
        let t = Timing::from_duration(Duration::from_millis(1500));
        assert_eq!(serde_json::to_string(&t).unwrap(), "1.5");
    }
}
