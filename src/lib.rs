pub mod cli;
pub mod clipboard;
pub mod config;
pub mod export;
pub mod logging;
pub mod muse;
pub mod session;
pub mod storage;
pub mod ui;
