pub mod app;
pub mod map;
pub mod screens;

pub use app::{AppOptions, GeopickApp};
