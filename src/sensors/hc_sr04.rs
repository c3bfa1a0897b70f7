use esp_idf_svc::{hal::delay::Delay, sys::esp_timer_get_time};

use crate::gpio::{DigitalIn, DigitalOut, DigitalOutError};

const SOUND_SPEED_M_S: f64 = 343.0;
const SOUND_SPEED_CM_US: f64 = SOUND_SPEED_M_S * 100.0 / 1_000_000.0;

const TRIGGER_SETTLE_US: u32 = 2;
const TRIGGER_PULSE_US: u32 = 10;

/// The sensor itself gives up listening for an echo after roughly 38ms,
/// so waiting longer than that can only mean a wiring fault.
pub const DEFAULT_ECHO_TIMEOUT_US: i64 = 38_000;

#[derive(Debug)]
pub enum RangeSensorError {
    TriggerFault(DigitalOutError),
    EchoStartTimeout,
    EchoEndTimeout,
}

/// Simple abstraction of the HCSR04 that facilitates its handling
///
/// The driver owns both of its pins for the whole process lifetime, nothing
/// else may toggle them while measurements are running.
pub struct Hcsr04<'a> {
    trig: DigitalOut<'a>,
    echo: DigitalIn<'a>,
    echo_timeout_us: i64,
}

impl<'a> Hcsr04<'a> {
    pub fn new(trig: DigitalOut<'a>, echo: DigitalIn<'a>) -> Hcsr04<'a> {
        Self::with_echo_timeout(trig, echo, DEFAULT_ECHO_TIMEOUT_US)
    }

    /// Creates the sensor with a custom deadline (in microseconds) for each
    /// of the two echo edge waits.
    pub fn with_echo_timeout(
        trig: DigitalOut<'a>,
        echo: DigitalIn<'a>,
        echo_timeout_us: i64,
    ) -> Hcsr04<'a> {
        Hcsr04 {
            trig,
            echo,
            echo_timeout_us,
        }
    }

    /// Returns the distance of the object in front of the sensor in centimeters
    ///
    /// Each call is a fresh, independent measurement with no filtering or
    /// smoothing across calls.
    ///
    /// # Errors
    ///
    /// - `RangeSensorError::TriggerFault`: If the trigger pin cannot be driven.
    /// - `RangeSensorError::EchoStartTimeout`: If the echo pulse never starts
    ///   within the configured deadline.
    /// - `RangeSensorError::EchoEndTimeout`: If the echo pulse never ends
    ///   within the configured deadline.
    pub fn measure(&mut self) -> Result<f64, RangeSensorError> {
        let delay = Delay::new_default();

        // First set the trigger to Low for a few micro-seconds to get a clean signal
        // Then set the trigger pin high for 10 micro-seconds to send the sonic burst
        self.trig
            .set_low()
            .map_err(RangeSensorError::TriggerFault)?;
        delay.delay_us(TRIGGER_SETTLE_US);
        self.trig
            .set_high()
            .map_err(RangeSensorError::TriggerFault)?;
        delay.delay_us(TRIGGER_PULSE_US);
        self.trig
            .set_low()
            .map_err(RangeSensorError::TriggerFault)?;

        let armed_time = now_us();
        while self.echo.is_low() {
            if now_us() - armed_time > self.echo_timeout_us {
                return Err(RangeSensorError::EchoStartTimeout);
            }
        }
        let send_echo_time = now_us();

        while self.echo.is_high() {
            if now_us() - send_echo_time > self.echo_timeout_us {
                return Err(RangeSensorError::EchoEndTimeout);
            }
        }
        let rec_echo_time = now_us();

        let travel_time = rec_echo_time - send_echo_time;
        Ok(pulse_to_cm(travel_time))
    }
}

/// Converts the round-trip travel time of the sonic burst into the distance
/// in centimeters of the object in front of the sensor.
pub fn pulse_to_cm(travel_time_us: i64) -> f64 {
    let cm = SOUND_SPEED_CM_US * travel_time_us as f64;
    cm / 2.0 // We divide by 2 because if not we get the distance of the roundtrip
}

/// Microseconds since boot, from the monotonic esp timer
fn now_us() -> i64 {
    unsafe { esp_timer_get_time() }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test0_zero_pulse_is_zero_distance() {
        assert_eq!(pulse_to_cm(0), 0.0);
    }

    #[test]
    fn test1_900us_pulse_lands_at_15_435_cm() {
        let distance = pulse_to_cm(900);
        assert!((distance - 15.435).abs() < 1e-9);
    }

    #[test]
    fn test2_conversion_matches_fixed_constant() {
        for travel_time_us in [1_i64, 57, 290, 900, 23_200, 38_000] {
            assert_eq!(
                pulse_to_cm(travel_time_us),
                travel_time_us as f64 * 0.0343 / 2.0
            );
        }
    }

    #[test]
    fn test3_longer_pulses_read_farther() {
        assert!(pulse_to_cm(1_000) < pulse_to_cm(1_001));
    }
}
