pub mod app;
pub mod stage;
pub mod theme;
pub mod window;
