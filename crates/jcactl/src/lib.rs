//! Command implementations behind the `jcactl` binary.

pub mod cmd_canonical;
pub mod cmd_check;
pub mod cmd_drivers;
pub mod cmd_show;
pub mod common;
