pub mod compute;
pub mod config;
pub mod consts;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod io;
pub mod quality;
pub mod sampler;
pub mod session;
