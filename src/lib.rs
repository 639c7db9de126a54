pub mod config;
pub mod food;
pub mod game;
pub mod geometry;
pub mod render;
pub mod sim;
pub mod snake;
pub mod term;
