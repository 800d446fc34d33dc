use glam::Vec3;

use crate::geometry;
use crate::scene::{Material, Node};

use super::SEGMENTS;

const POST_RADIUS: f32 = 0.1;
const POST_HEIGHT: f32 = 2.0;
const CROSSBAR_LENGTH: f32 = 6.0;
const SUPPORT_LENGTH: f32 = 2.3;
const SUPPORT_TILT_DEG: f32 = 30.0;
const RING_RADIUS: f32 = 0.2;

/// Flattened sphere decorating the base of a post or support.
fn base_ring(material: Material, x: f32, z: f32) -> Node {
    let mut ring = Node::mesh(
        geometry::sphere(RING_RADIUS, SEGMENTS, SEGMENTS),
        material,
    );
    ring.scale(1.0, 0.2, 1.0);
    ring.translate(x, 0.0, z);
    ring
}

/// The full goal frame: posts, crossbar, tilted back supports, base
/// rings, and the semi-transparent back and side nets, assembled as one
/// group so it can be scaled as a unit.
pub fn create_goal() -> Node {
    let frame = Material::flat(0xffffff);
    let net = Material::flat(0xd3d3d3).with_opacity(0.8).double_sided();

    let left_post_ring = base_ring(frame, -3.0, 0.0);
    let mut left_post = Node::mesh(
        geometry::cylinder(POST_RADIUS, POST_HEIGHT, SEGMENTS),
        frame,
    );
    left_post.translate(-3.0, 1.0, 0.0);

    let right_post_ring = base_ring(frame, 3.0, 0.0);
    let mut right_post = Node::mesh(
        geometry::cylinder(POST_RADIUS, POST_HEIGHT, SEGMENTS),
        frame,
    );
    right_post.translate(3.0, 1.0, 0.0);

    let mut crossbar = Node::mesh(
        geometry::cylinder(POST_RADIUS, CROSSBAR_LENGTH, SEGMENTS),
        frame,
    );
    crossbar.rotate_deg(Vec3::Z, 90.0);
    crossbar.translate(0.0, 2.0, 0.0);

    let left_support_ring = base_ring(frame, -3.0, -1.2);
    let mut left_support = Node::mesh(
        geometry::cylinder(POST_RADIUS, SUPPORT_LENGTH, SEGMENTS),
        frame,
    );
    left_support.rotate_deg(Vec3::X, SUPPORT_TILT_DEG);
    left_support.translate(-3.0, 1.0, -0.6);

    let right_support_ring = base_ring(frame, 3.0, -1.2);
    let mut right_support = Node::mesh(
        geometry::cylinder(POST_RADIUS, SUPPORT_LENGTH, SEGMENTS),
        frame,
    );
    right_support.rotate_deg(Vec3::X, SUPPORT_TILT_DEG);
    right_support.translate(3.0, 1.0, -0.6);

    let mut back_net = Node::mesh(geometry::plane(6.0, 2.3), net);
    back_net.rotate_deg(Vec3::X, SUPPORT_TILT_DEG);
    back_net.translate(0.0, 0.95, -0.6);

    // Triangular side nets from an explicit vertex list
    let side = [[0.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, -1.2]];
    let mut left_net = Node::mesh(geometry::triangle(side), net);
    left_net.translate(-3.0, 0.0, 0.0);
    let mut right_net = Node::mesh(geometry::triangle(side), net);
    right_net.translate(3.0, 0.0, 0.0);

    Node::group(vec![
        left_post,
        left_post_ring,
        right_post,
        right_post_ring,
        crossbar,
        left_support_ring,
        left_support,
        right_support_ring,
        right_support,
        back_net,
        left_net,
        right_net,
    ])
}
