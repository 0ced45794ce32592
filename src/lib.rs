#[macro_use]
pub mod gpu_utils;

pub mod app;
pub mod config;
pub mod fps;
pub mod logging;
pub mod rasterize;
pub mod scene;
pub mod ui;

pub use nalgebra_glm as glm;
