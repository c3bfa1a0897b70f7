use esp_idf_svc::hal::delay::FreeRtos;
use log::{info, warn};

use crate::{
    alert::{AlertDispatcher, AlertMessage},
    config::DeviceConfig,
    gpio::DigitalOut,
    sensors::ProximityDetector,
    wifi::WifiDriver,
};

/// Cadence of the detection loop
pub const LOOP_CADENCE_MS: u32 = 250;
/// Spacing between association attempts while the link is down
pub const CONNECT_RETRY_DELAY_MS: u32 = 1000;
/// Text of every alert this device emits
pub const ALERT_TEXT: &str = "You have mail!";

/// Brings the wifi link up, retrying forever with a fixed spacing between
/// attempts. There is no attempt bound and no backoff; this returns only
/// once the link and the network interface are up.
pub fn associate(wifi: &mut WifiDriver, config: &DeviceConfig) {
    loop {
        info!("Connecting to WiFi...");
        match wifi.connect(config.ssid(), Some(config.password().to_string())) {
            Ok(()) => break,
            Err(err) => {
                warn!("WiFi association failed: {:?}", err);
                FreeRtos::delay_ms(CONNECT_RETRY_DELAY_MS);
            }
        }
    }

    match wifi.get_address_info() {
        Ok(ip) => info!("WiFi connected! IP: {}", ip),
        Err(err) => warn!("WiFi connected, but the IP could not be read: {:?}", err),
    }
}

/// The monitoring half of the device: samples the detector, drives the
/// indicator and hands detections to the dispatcher.
pub struct MailboxMonitor<'a> {
    detector: ProximityDetector<'a>,
    indicator: DigitalOut<'a>,
    dispatcher: AlertDispatcher<'a>,
}

impl<'a> MailboxMonitor<'a> {
    pub fn new(
        detector: ProximityDetector<'a>,
        indicator: DigitalOut<'a>,
        dispatcher: AlertDispatcher<'a>,
    ) -> MailboxMonitor<'a> {
        MailboxMonitor {
            detector,
            indicator,
            dispatcher,
        }
    }

    /// Runs the detection loop. Never returns; the device monitors until it
    /// is powered off or reset.
    ///
    /// While an object stays in range an alert goes out on every cycle, the
    /// loop cadence is the only throttle.
    pub fn run(mut self) -> ! {
        loop {
            self.cycle();
            FreeRtos::delay_ms(LOOP_CADENCE_MS);
        }
    }

    /// One measurement-to-action pass
    fn cycle(&mut self) {
        match self.detector.sample() {
            Ok(sample) => {
                info!("measured distance: {} cm", sample.distance_cm);
                if sample.detected {
                    self.switch_indicator(true);
                    self.dispatcher.send(&AlertMessage::new(ALERT_TEXT));
                } else {
                    self.switch_indicator(false);
                }
            }
            Err(err) => {
                // A sensor fault counts as nothing in range for the indicator
                warn!("range sensor fault: {:?}", err);
                self.switch_indicator(false);
            }
        }
    }

    fn switch_indicator(&mut self, lit: bool) {
        let result = if lit {
            self.indicator.set_high()
        } else {
            self.indicator.set_low()
        };
        if let Err(err) = result {
            warn!("indicator could not be driven: {:?}", err);
        }
    }
}
