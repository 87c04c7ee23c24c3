pub mod app;
pub mod cylinder;
pub mod theme;
