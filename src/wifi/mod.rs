pub mod http;
mod wifi_driver;

pub use wifi_driver::*;
