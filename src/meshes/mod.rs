mod ball;
mod goal;
mod keeper;

pub use ball::create_ball;
pub use goal::create_goal;
pub use keeper::create_keeper;

/// Segment count used for every curved primitive in the scene.
pub(crate) const SEGMENTS: u32 = 32;
