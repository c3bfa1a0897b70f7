mod hc_sr04;
mod proximity;

pub use {hc_sr04::*, proximity::*};
