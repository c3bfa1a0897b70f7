use esp_idf_svc::sys::EspError;

use crate::{
    alert::AlertError,
    config::ConfigError,
    gpio::{DigitalInError, DigitalOutError},
    sensors::{ProximityError, RangeSensorError},
    wifi::WifiError,
};

/// Crate wide error aggregating the failures of every module
#[derive(Debug)]
pub enum SentinelError {
    Alert(AlertError),
    Config(ConfigError),
    DigitalIn(DigitalInError),
    DigitalOut(DigitalOutError),
    Esp(EspError),
    Proximity(ProximityError),
    RangeSensor(RangeSensorError),
    Wifi(WifiError),
}
