use std::f32::consts::TAU;

use crate::types::Vertex;

/// Triangle mesh data shared between scene assembly and the renderer.
///
/// Plain position/index buffers; color lives in the material so a single
/// geometry can be reused with different materials.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    fn push_vertex(&mut self, position: [f32; 3]) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(Vertex { position });
        index
    }

    /// Append a quad given its corners in counter-clockwise order
    /// (viewed from the front face).
    fn push_quad(&mut self, corners: [[f32; 3]; 4]) {
        let base = self.vertices.len() as u32;
        for corner in corners {
            self.push_vertex(corner);
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Capped cylinder centered at the origin with its axis along +Y.
pub fn cylinder(radius: f32, height: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let half = height * 0.5;
    let n = segments as usize;

    let mut mesh = MeshData::with_capacity(2 * n + 2, 12 * n);

    // Top ring [0, n), bottom ring [n, 2n)
    for i in 0..segments {
        let angle = i as f32 / segments as f32 * TAU;
        mesh.push_vertex([radius * angle.cos(), half, radius * angle.sin()]);
    }
    for i in 0..segments {
        let angle = i as f32 / segments as f32 * TAU;
        mesh.push_vertex([radius * angle.cos(), -half, radius * angle.sin()]);
    }
    let top_center = mesh.push_vertex([0.0, half, 0.0]);
    let bottom_center = mesh.push_vertex([0.0, -half, 0.0]);

    for i in 0..segments {
        let j = (i + 1) % segments;
        let (ti, tj) = (i, j);
        let (bi, bj) = (segments + i, segments + j);
        // Side wall, wound counter-clockwise from outside
        mesh.indices.extend_from_slice(&[ti, tj, bi]);
        mesh.indices.extend_from_slice(&[tj, bj, bi]);
        // Caps
        mesh.indices.extend_from_slice(&[top_center, tj, ti]);
        mesh.indices.extend_from_slice(&[bottom_center, bi, bj]);
    }

    mesh
}

/// UV sphere centered at the origin.
pub fn sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let cols = segments + 1;

    let mut mesh = MeshData::with_capacity(
        (cols * (rings + 1)) as usize,
        (6 * segments * rings) as usize,
    );

    for ring in 0..=rings {
        let theta = ring as f32 / rings as f32 * std::f32::consts::PI;
        let (sin_t, cos_t) = theta.sin_cos();
        for seg in 0..=segments {
            let phi = seg as f32 / segments as f32 * TAU;
            mesh.push_vertex([
                radius * sin_t * phi.cos(),
                radius * cos_t,
                radius * sin_t * phi.sin(),
            ]);
        }
    }

    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * cols + seg;
            let b = a + cols;
            mesh.indices.extend_from_slice(&[a, a + 1, b]);
            mesh.indices.extend_from_slice(&[a + 1, b + 1, b]);
        }
    }

    mesh
}

/// Axis-aligned box centered at the origin.
pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);
    let mut mesh = MeshData::with_capacity(24, 36);

    // +X
    mesh.push_quad([
        [hx, -hy, hz],
        [hx, -hy, -hz],
        [hx, hy, -hz],
        [hx, hy, hz],
    ]);
    // -X
    mesh.push_quad([
        [-hx, -hy, -hz],
        [-hx, -hy, hz],
        [-hx, hy, hz],
        [-hx, hy, -hz],
    ]);
    // +Y
    mesh.push_quad([
        [-hx, hy, hz],
        [hx, hy, hz],
        [hx, hy, -hz],
        [-hx, hy, -hz],
    ]);
    // -Y
    mesh.push_quad([
        [-hx, -hy, -hz],
        [hx, -hy, -hz],
        [hx, -hy, hz],
        [-hx, -hy, hz],
    ]);
    // +Z
    mesh.push_quad([
        [-hx, -hy, hz],
        [hx, -hy, hz],
        [hx, hy, hz],
        [-hx, hy, hz],
    ]);
    // -Z
    mesh.push_quad([
        [hx, -hy, -hz],
        [-hx, -hy, -hz],
        [-hx, hy, -hz],
        [hx, hy, -hz],
    ]);

    mesh
}

/// Flat rectangle in the XY plane facing +Z.
pub fn plane(width: f32, height: f32) -> MeshData {
    let (hx, hy) = (width * 0.5, height * 0.5);
    let mut mesh = MeshData::with_capacity(4, 6);
    mesh.push_quad([
        [-hx, -hy, 0.0],
        [hx, -hy, 0.0],
        [hx, hy, 0.0],
        [-hx, hy, 0.0],
    ]);
    mesh
}

/// Single triangle from an explicit vertex list.
pub fn triangle(vertices: [[f32; 3]; 3]) -> MeshData {
    let mut mesh = MeshData::with_capacity(3, 3);
    for vertex in vertices {
        mesh.push_vertex(vertex);
    }
    mesh.indices.extend_from_slice(&[0, 1, 2]);
    mesh
}
