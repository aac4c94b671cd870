pub mod check;
pub mod clean;
mod command_result;
pub mod fill;
pub mod fix;
pub mod helper;
pub mod init;
pub mod placeholders;
pub mod verify;

pub use command_result::*;
