// Text components of the dashboard
pub mod command_palette;
pub mod results;
pub mod toolbar;
