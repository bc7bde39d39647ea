pub mod console;
pub mod device;
