pub mod api;
pub mod fetch_controller;

pub use api::{HttpMovingAverageApi, MovingAverageApi};
pub use fetch_controller::{FetchController, FetchStatus};
