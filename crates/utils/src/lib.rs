pub mod env;
pub mod log;
