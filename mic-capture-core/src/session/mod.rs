pub mod device_selector;
pub mod recorder;
