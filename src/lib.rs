#![no_std]

mod error;

pub mod config;
pub mod conversion;
pub mod device;
pub mod interface;
mod log;
pub mod params;
pub mod registers;
pub mod uart;

pub use crate::config::Config;
pub use crate::device::Ads1015;
pub use crate::error::{Error, Result};
