//! Mailbox sentinel firmware. An HC-SR04 ultrasonic sensor watches the
//! mailbox; while something sits closer than the threshold the indicator LED
//! is lit and an alert goes out to the configured webhook.
//!
//! Wiring: trigger on GPIO5, echo on GPIO4, indicator LED on GPIO2.

use esp_idf_svc::{
    eventloop::EspSystemEventLoop,
    hal::{
        gpio::{IOPin, Pull},
        peripherals::Peripherals,
    },
};
use log::error;

use mailbox_sentinel::{
    alert::AlertDispatcher,
    config::DeviceConfig,
    gpio::{DigitalIn, DigitalOut},
    monitor::{self, MailboxMonitor},
    sensors::{Hcsr04, ProximityDetector},
    sentinel_error::SentinelError,
    wifi::WifiDriver,
};

/// Distance under which an object counts as mail
const THRESHOLD_CM: f64 = 5.0;
/// Credentials file read once at startup
const CREDENTIALS_PATH: &str = "credentials.json";

fn main() -> Result<(), SentinelError> {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    // Without valid credentials the device can neither join the network nor
    // alert anyone, so a broken credentials file stops the boot right here.
    let config = match DeviceConfig::load(CREDENTIALS_PATH) {
        Ok(config) => config,
        Err(err) => {
            error!("Error reading {}: {:?}", CREDENTIALS_PATH, err);
            return Err(SentinelError::Config(err));
        }
    };

    let peripherals = Peripherals::take().map_err(SentinelError::Esp)?;
    let event_loop = EspSystemEventLoop::take().map_err(SentinelError::Esp)?;

    let trig =
        DigitalOut::new(peripherals.pins.gpio5.downgrade()).map_err(SentinelError::DigitalOut)?;
    let echo = DigitalIn::new(peripherals.pins.gpio4.downgrade(), Pull::Down)
        .map_err(SentinelError::DigitalIn)?;
    let mut indicator =
        DigitalOut::new(peripherals.pins.gpio2.downgrade()).map_err(SentinelError::DigitalOut)?;
    indicator.set_low().map_err(SentinelError::DigitalOut)?;

    let sensor = Hcsr04::new(trig, echo);
    let detector =
        ProximityDetector::new(sensor, THRESHOLD_CM).map_err(SentinelError::Proximity)?;

    let mut wifi = WifiDriver::new(event_loop, peripherals.modem).map_err(SentinelError::Wifi)?;
    monitor::associate(&mut wifi, &config);

    let dispatcher = AlertDispatcher::new(&config);
    MailboxMonitor::new(detector, indicator, dispatcher).run()
}
