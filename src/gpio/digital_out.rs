use esp_idf_svc::hal::gpio::*;

#[derive(Debug)]
pub enum DigitalOutError {
    CannotSetPinAsOutput,
    InvalidPin,
}

/// Driver to handle a digital output for a particular Pin
pub struct DigitalOut<'a> {
    pin_driver: PinDriver<'a, AnyIOPin, Output>,
}

impl<'a> DigitalOut<'a> {
    /// Creates a new DigitalOut for a Pin. The pin keeps whatever level the
    /// hardware left it in; callers that care must set one explicitly.
    pub fn new(pin: AnyIOPin) -> Result<DigitalOut<'a>, DigitalOutError> {
        let pin_driver =
            PinDriver::output(pin).map_err(|_| DigitalOutError::CannotSetPinAsOutput)?;

        Ok(DigitalOut { pin_driver })
    }

    /// Sets the pin level either to High or Low
    pub fn set_level(&mut self, level: Level) -> Result<(), DigitalOutError> {
        self.pin_driver
            .set_level(level)
            .map_err(|_| DigitalOutError::InvalidPin)
    }

    /// Gets the current pin level
    pub fn get_level(&mut self) -> Level {
        if self.pin_driver.is_set_high() {
            Level::High
        } else {
            Level::Low
        }
    }

    /// Sets the current pin level in High
    pub fn set_high(&mut self) -> Result<(), DigitalOutError> {
        self.set_level(Level::High)
    }

    /// Sets the current pin level in Low
    pub fn set_low(&mut self) -> Result<(), DigitalOutError> {
        self.set_level(Level::Low)
    }

    /// Changes the pin level.
    /// If the current level is High, then the pin changes its level to Low
    /// If the current level is Low, then the pin changes its level to High
    pub fn toggle(&mut self) -> Result<(), DigitalOutError> {
        if self.pin_driver.is_set_high() {
            self.set_level(Level::Low)
        } else {
            self.set_level(Level::High)
        }
    }
}
