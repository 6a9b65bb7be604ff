pub mod scene;
pub mod render;
pub mod obj;
pub mod shapes;
pub mod camera;
pub mod config;

pub mod app;
pub mod game_loop;
