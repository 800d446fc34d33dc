use crate::geometry;
use crate::scene::{Material, Node};

use super::SEGMENTS;

pub const BALL_RADIUS: f32 = 0.125;

/// Sphere sitting in front of the goal mouth, waiting to be kicked.
pub fn create_ball() -> Node {
    let mut ball = Node::mesh(
        geometry::sphere(BALL_RADIUS, SEGMENTS, SEGMENTS),
        Material::flat(0xffaa11),
    );
    ball.translate(0.0, 1.5, 2.5);
    ball
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_ball_starts_in_front_of_goal() {
        let ball = create_ball();
        assert_eq!(ball.position(), Vec3::new(0.0, 1.5, 2.5));
    }

    #[test]
    fn test_ball_is_a_single_opaque_mesh() {
        let ball = create_ball();
        let mut count = 0;
        let mut opacity = 0.0;
        ball.visit_meshes(glam::Mat4::IDENTITY, &mut |_, mesh| {
            count += 1;
            opacity = mesh.material.opacity;
        });
        assert_eq!(count, 1);
        assert_eq!(opacity, 1.0);
    }
}
