pub mod commands;
pub mod config;
pub mod toolchain;
pub mod version;
