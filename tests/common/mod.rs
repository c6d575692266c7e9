#![allow(dead_code)]

pub mod log_capture;
pub mod mocks;
pub mod test_utils;

pub use log_capture::*;
pub use mocks::*;
pub use test_utils::*;
