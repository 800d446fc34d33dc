pub mod camera;
pub mod cli;
pub mod geometry;
pub mod input;
pub mod meshes;
pub mod motion;
pub mod renderer;
pub mod scene;
pub mod stage;
pub mod types;

// Re-export the scene assembly factories
pub use meshes::{create_ball, create_goal, create_keeper};
