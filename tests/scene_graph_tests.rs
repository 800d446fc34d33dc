use glam::{Mat4, Vec3};
use goalmouth::geometry;
use goalmouth::input::Action;
use goalmouth::motion::PATH_RADIUS;
use goalmouth::scene::{Material, Node, Scene};
use goalmouth::stage::Stage;
use goalmouth::{create_ball, create_goal, create_keeper};

fn unit_cube() -> Node {
    Node::mesh(geometry::cuboid(1.0, 1.0, 1.0), Material::flat(0xffffff))
}

#[test]
fn test_transform_composition_is_order_dependent() {
    let mut a = unit_cube();
    a.translate(2.0, 0.0, 0.0);
    a.rotate_deg(Vec3::Y, 45.0);

    let mut b = unit_cube();
    b.rotate_deg(Vec3::Y, 45.0);
    b.translate(2.0, 0.0, 0.0);

    assert_ne!(a.transform, b.transform);
    // Rotating after translating swings the node around the origin
    assert!((a.position().length() - 2.0).abs() < 1e-5);
    assert_eq!(b.position(), Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn test_nested_group_worlds_compose_parent_first() {
    let mut inner = unit_cube();
    inner.translate(1.0, 0.0, 0.0);
    let mut middle = Node::group(vec![inner]);
    middle.translate(0.0, 1.0, 0.0);
    let mut outer = Node::group(vec![middle]);
    outer.scale_uniform(2.0);

    let mut scene = Scene::new();
    scene.insert(outer);

    let mut positions = Vec::new();
    scene.visit_meshes(|world, _| positions.push(world.w_axis.truncate()));
    assert_eq!(positions.len(), 1);
    assert!((positions[0] - Vec3::new(2.0, 2.0, 0.0)).length() < 1e-6);
}

#[test]
fn test_first_arc_first_step_from_rest() {
    let mut stage = Stage::new(false);
    let start = stage.ball_position();
    stage.apply(Action::ToggleFirstArc);
    stage.tick();
    // cos(0) = 1, sin(0) = 0: one step straight down by the path radius
    let expected = start + Vec3::new(0.0, -PATH_RADIUS, 0.0);
    assert!((stage.ball_position() - expected).length() < 1e-7);
}

#[test]
fn test_factories_match_scene_constants() {
    let ball = create_ball();
    assert_eq!(ball.position(), Vec3::new(0.0, 1.5, 2.5));

    let goal = create_goal();
    let mut net_opacity = None;
    goal.visit_meshes(Mat4::IDENTITY, &mut |_, mesh| {
        if mesh.material.opacity < 1.0 {
            net_opacity = Some(mesh.material.opacity);
        }
    });
    assert_eq!(net_opacity, Some(0.8));

    let keeper = create_keeper();
    let mut parts = 0;
    keeper.visit_meshes(Mat4::IDENTITY, &mut |_, _| parts += 1);
    assert_eq!(parts, 10);
}

#[test]
fn test_detached_subtree_survives_scene_round_trip() {
    let mut scene = Scene::new();
    let keeper = create_keeper();
    let reference = keeper.transform;

    let id = scene.insert(keeper);
    let detached = scene.remove(id).unwrap();
    assert_eq!(detached.transform, reference);

    let id = scene.insert(detached);
    assert_eq!(scene.get(id).unwrap().transform, reference);
}
