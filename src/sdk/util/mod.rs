pub mod log;
pub mod sleep;
