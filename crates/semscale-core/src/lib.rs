pub mod calibration;
pub mod compositor;
pub mod config;
pub mod consts;
pub mod crop;
pub mod error;
pub mod font;
pub mod geometry;
pub mod io;
pub mod magnifier;
pub mod scalebar;
pub mod session;
pub mod suggestion;
