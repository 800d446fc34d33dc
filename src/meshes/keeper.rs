use glam::Vec3;

use crate::geometry;
use crate::scene::{Material, Node};

use super::SEGMENTS;

const KIT_BLUE: u32 = 0x0000ff;
const SKIN: u32 = 0xffe0bd;

/// Ten-part goalkeeper figure assembled from primitives, positioned and
/// scaled as one group so visibility toggling never rebuilds it.
pub fn create_keeper() -> Node {
    let kit = Material::flat(KIT_BLUE);

    let mut body = Node::mesh(geometry::cuboid(1.0, 2.0, 0.5), kit);
    body.translate(0.0, 1.0, 0.0);

    let mut head = Node::mesh(
        geometry::sphere(0.5, SEGMENTS, SEGMENTS),
        Material::flat(SKIN),
    );
    head.translate(0.0, 2.5, 0.0);

    let eye = Material::flat(0x000000);
    let mut left_eye = Node::mesh(geometry::sphere(0.1, SEGMENTS, SEGMENTS), eye);
    left_eye.translate(-0.15, 2.7, 0.45);
    let mut right_eye = Node::mesh(geometry::sphere(0.1, SEGMENTS, SEGMENTS), eye);
    right_eye.translate(0.15, 2.7, 0.45);

    // Arms are positioned first, then rotated about the group origin so
    // they swing outward from the shoulders
    let mut left_arm = Node::mesh(geometry::cylinder(0.2, 1.5, SEGMENTS), kit);
    left_arm.translate(-0.75, 1.5, 0.0);
    left_arm.rotate_deg(Vec3::Z, -45.0);

    let mut right_arm = Node::mesh(geometry::cylinder(0.2, 1.5, SEGMENTS), kit);
    right_arm.translate(0.75, 1.5, 0.0);
    right_arm.rotate_deg(Vec3::Z, 45.0);

    let glove = Material::flat(0xffffff);
    let mut left_glove = Node::mesh(geometry::cuboid(0.5, 0.5, 0.5), glove);
    left_glove.translate(-0.75, 2.5, 0.0);
    left_glove.rotate_deg(Vec3::Z, -45.0);

    let mut right_glove = Node::mesh(geometry::cuboid(0.5, 0.5, 0.5), glove);
    right_glove.translate(0.75, 2.5, 0.0);
    right_glove.rotate_deg(Vec3::Z, 45.0);

    let mut left_leg = Node::mesh(geometry::cylinder(0.25, 2.0, SEGMENTS), kit);
    left_leg.translate(-0.3, -1.0, 0.0);
    let mut right_leg = Node::mesh(geometry::cylinder(0.25, 2.0, SEGMENTS), kit);
    right_leg.translate(0.3, -1.0, 0.0);

    let mut keeper = Node::group(vec![
        body,
        head,
        left_eye,
        right_eye,
        left_arm,
        right_arm,
        left_glove,
        right_glove,
        left_leg,
        right_leg,
    ]);
    keeper.translate(0.0, 1.0, 0.0);
    keeper.scale_uniform(0.4);
    keeper
}
