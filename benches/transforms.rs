use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use goalmouth::geometry;
use goalmouth::motion::BallFlight;
use goalmouth::scene::{Material, Node, Scene};
use goalmouth::{create_ball, create_goal, create_keeper};

/// Benchmark: relative transform composition on a single node
fn bench_transform_ops(c: &mut Criterion) {
    c.bench_function("transform_ops", |b| {
        let mut node = Node::mesh(geometry::cuboid(1.0, 1.0, 1.0), Material::flat(0xffffff));
        b.iter(|| {
            node.translate(black_box(0.1), 0.0, 0.0);
            node.rotate_deg(Vec3::Z, black_box(1.0));
            node.scale_uniform(black_box(1.0));
        })
    });
}

/// Benchmark: flattening the full scene into world-space draw items
fn bench_scene_flatten(c: &mut Criterion) {
    let mut scene = Scene::new();
    scene.insert(create_goal());
    scene.insert(create_ball());
    scene.insert(create_keeper());

    c.bench_function("scene_flatten", |b| {
        b.iter(|| {
            let mut count = 0usize;
            scene.visit_meshes(|world, _| {
                black_box(world);
                count += 1;
            });
            black_box(count)
        })
    });
}

/// Benchmark: one frame of scripted ball flight at high speed
fn bench_ball_flight(c: &mut Criterion) {
    c.bench_function("ball_flight_frame", |b| {
        let mut ball = create_ball();
        let mut flight = BallFlight {
            first_arc: true,
            second_arc: true,
            speed: 10,
            angle: 0.0,
        };
        b.iter(|| flight.advance(black_box(&mut ball)))
    });
}

/// Benchmark: full goal assembly from scratch
fn bench_goal_assembly(c: &mut Criterion) {
    c.bench_function("goal_assembly", |b| b.iter(|| black_box(create_goal())));
}

criterion_group!(
    benches,
    bench_transform_ops,
    bench_scene_flatten,
    bench_ball_flight,
    bench_goal_assembly
);
criterion_main!(benches);
