use std::sync::atomic::{AtomicU32, Ordering};

use glam::{Mat4, Vec3};

use crate::geometry::MeshData;

/// Convert a 0xRRGGBB color to linear-ish float components.
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Flat unlit material state for a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub opacity: f32,
    pub wireframe: bool,
    pub double_sided: bool,
}

impl Material {
    /// Opaque single-sided material from a 0xRRGGBB color
    pub fn flat(hex: u32) -> Self {
        Self {
            color: rgb(hex),
            opacity: 1.0,
            wireframe: false,
            double_sided: false,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }
}

/// Process-unique mesh identity, used by the renderer to cache GPU buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(u32);

impl MeshId {
    fn next() -> Self {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Renderable leaf: geometry plus material
#[derive(Debug, Clone)]
pub struct Mesh {
    pub id: MeshId,
    pub geometry: MeshData,
    pub material: Material,
}

/// Tagged node payload so traversal is exhaustive
#[derive(Debug, Clone)]
pub enum NodeKind {
    Mesh(Mesh),
    Group(Vec<Node>),
}

/// Scene-graph node owning a local affine transform.
///
/// Transform mutation is incremental: each operation builds a delta matrix
/// and composes it onto the current transform with the delta on the left,
/// so a translation moves the node in its parent frame and a rotation
/// applied after a translation swings the node about the parent origin.
/// Call order therefore changes the resulting pose.
#[derive(Debug, Clone)]
pub struct Node {
    pub transform: Mat4,
    pub kind: NodeKind,
}

impl Node {
    pub fn mesh(geometry: MeshData, material: Material) -> Self {
        Self {
            transform: Mat4::IDENTITY,
            kind: NodeKind::Mesh(Mesh {
                id: MeshId::next(),
                geometry,
                material,
            }),
        }
    }

    pub fn group(children: Vec<Node>) -> Self {
        Self {
            transform: Mat4::IDENTITY,
            kind: NodeKind::Group(children),
        }
    }

    /// Compose a relative transform onto this node.
    pub fn apply(&mut self, delta: Mat4) {
        self.transform = delta * self.transform;
    }

    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.apply(Mat4::from_translation(Vec3::new(dx, dy, dz)));
    }

    /// Rotate about an axis by an angle in degrees.
    ///
    /// The axis is expected to be unit length; a degenerate axis produces
    /// whatever the matrix math produces.
    pub fn rotate_deg(&mut self, axis: Vec3, degrees: f32) {
        self.apply(Mat4::from_axis_angle(axis, degrees.to_radians()));
    }

    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) {
        self.apply(Mat4::from_scale(Vec3::new(sx, sy, sz)));
    }

    pub fn scale_uniform(&mut self, factor: f32) {
        self.scale(factor, factor, factor);
    }

    /// World-space translation component of this node's transform.
    pub fn position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    /// Depth-first visit of every mesh under this node, with the
    /// accumulated world transform.
    pub fn visit_meshes(&self, parent: Mat4, visit: &mut impl FnMut(Mat4, &Mesh)) {
        let world = parent * self.transform;
        match &self.kind {
            NodeKind::Mesh(mesh) => visit(world, mesh),
            NodeKind::Group(children) => {
                for child in children {
                    child.visit_meshes(world, visit);
                }
            }
        }
    }

    /// Depth-first mutable visit of every mesh under this node.
    pub fn visit_meshes_mut(&mut self, visit: &mut impl FnMut(&mut Mesh)) {
        match &mut self.kind {
            NodeKind::Mesh(mesh) => visit(mesh),
            NodeKind::Group(children) => {
                for child in children {
                    child.visit_meshes_mut(visit);
                }
            }
        }
    }
}
