use crate::sensors::{Hcsr04, RangeSensorError};

#[derive(Debug)]
pub enum ProximityError {
    NonPositiveThreshold,
}

/// One measurement together with the verdict taken from it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximitySample {
    pub distance_cm: f64,
    pub detected: bool,
}

/// Binary presence decision on top of the range sensor.
///
/// A single noisy reading can flip the verdict between two samples, there is
/// no hysteresis and no debouncing.
pub struct ProximityDetector<'a> {
    sensor: Hcsr04<'a>,
    threshold_cm: f64,
}

impl<'a> ProximityDetector<'a> {
    /// Creates a detector that reports objects strictly closer than
    /// `threshold_cm`. The threshold must be a positive number of centimeters.
    pub fn new(
        sensor: Hcsr04<'a>,
        threshold_cm: f64,
    ) -> Result<ProximityDetector<'a>, ProximityError> {
        if threshold_cm.is_nan() || threshold_cm <= 0.0 {
            return Err(ProximityError::NonPositiveThreshold);
        }

        Ok(ProximityDetector {
            sensor,
            threshold_cm,
        })
    }

    pub fn threshold_cm(&self) -> f64 {
        self.threshold_cm
    }

    /// Takes one fresh measurement and pairs it with its verdict
    pub fn sample(&mut self) -> Result<ProximitySample, RangeSensorError> {
        let distance_cm = self.sensor.measure()?;
        Ok(ProximitySample {
            distance_cm,
            detected: breaches_threshold(distance_cm, self.threshold_cm),
        })
    }

    /// Whether an object currently sits closer than the threshold
    pub fn is_detected(&mut self) -> Result<bool, RangeSensorError> {
        Ok(self.sample()?.detected)
    }
}

/// Strictly below the threshold counts as detected, sitting exactly on it
/// does not.
fn breaches_threshold(distance_cm: f64, threshold_cm: f64) -> bool {
    distance_cm < threshold_cm
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test0_closer_than_threshold_detects() {
        assert!(breaches_threshold(3.2, 5.0));
    }

    #[test]
    fn test1_farther_than_threshold_does_not_detect() {
        assert!(!breaches_threshold(7.0, 5.0));
    }

    #[test]
    fn test2_exactly_on_the_threshold_does_not_detect() {
        assert!(!breaches_threshold(5.0, 5.0));
    }

    #[test]
    fn test3_zero_distance_detects() {
        assert!(breaches_threshold(0.0, 5.0));
    }
}
