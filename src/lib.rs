pub mod cmd;
pub mod error;
