use esp_idf_svc::hal::gpio::*;
pub use esp_idf_svc::hal::gpio::{Level, Pull};

#[derive(Debug)]
pub enum DigitalInError {
    CannotSetPinAsInput,
    CannotSetPullForPin,
}

/// Driver for receiving digital inputs from a particular Pin
pub struct DigitalIn<'a> {
    pin_driver: PinDriver<'a, AnyIOPin, Input>,
}

impl<'a> DigitalIn<'a> {
    /// Creates a new DigitalIn for a Pin with the desired pull.
    pub fn new(pin: AnyIOPin, pull_type: Pull) -> Result<DigitalIn<'a>, DigitalInError> {
        let mut pin_driver =
            PinDriver::input(pin).map_err(|_| DigitalInError::CannotSetPinAsInput)?;
        pin_driver
            .set_pull(pull_type)
            .map_err(|_| DigitalInError::CannotSetPullForPin)?;

        Ok(DigitalIn { pin_driver })
    }

    /// Gets the current pin level
    pub fn get_level(&self) -> Level {
        self.pin_driver.get_level()
    }

    /// verifies if the pin level is High
    pub fn is_high(&self) -> bool {
        self.pin_driver.get_level() == Level::High
    }

    /// verifies if the pin level is Low
    pub fn is_low(&self) -> bool {
        self.pin_driver.get_level() == Level::Low
    }
}
