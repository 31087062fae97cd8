pub mod app;
pub mod config;
pub mod days;
pub mod ephemeris;
pub mod error;
pub mod foods;
pub mod logging;
pub mod moon;
pub mod recipes;
pub mod state;
pub mod storage;
