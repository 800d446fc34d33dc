mod node;

pub use node::{rgb, Material, Mesh, MeshId, Node, NodeKind};

use glam::Mat4;

/// Handle to a root-level node in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Retained scene: a slotted arena of root nodes plus a clear color.
///
/// Removal detaches a node without destroying it, so a removed subtree
/// keeps its transform and children and can be re-inserted later. Slot
/// indices are reused, which keeps ids stable for everything still in
/// the scene.
#[derive(Debug, Default)]
pub struct Scene {
    slots: Vec<Option<Node>>,
    pub background: [f32; 3],
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(hex: u32) -> Self {
        Self {
            slots: Vec::new(),
            background: rgb(hex),
        }
    }

    pub fn insert(&mut self, node: Node) -> NodeId {
        if let Some(free) = self.slots.iter().position(Option::is_none) {
            self.slots[free] = Some(node);
            NodeId(free)
        } else {
            self.slots.push(Some(node));
            NodeId(self.slots.len() - 1)
        }
    }

    /// Detach a root node, returning it intact.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        self.slots.get_mut(id.0).and_then(Option::take)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of root nodes currently attached.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Depth-first visit of every attached mesh with its world transform.
    pub fn visit_meshes(&self, mut visit: impl FnMut(Mat4, &Mesh)) {
        for node in self.slots.iter().flatten() {
            node.visit_meshes(Mat4::IDENTITY, &mut visit);
        }
    }

    /// Depth-first mutable visit of every attached mesh.
    pub fn visit_meshes_mut(&mut self, mut visit: impl FnMut(&mut Mesh)) {
        for node in self.slots.iter_mut().flatten() {
            node.visit_meshes_mut(&mut visit);
        }
    }

    /// Flip the wireframe flag on every mesh reachable from the root.
    ///
    /// Detached nodes are not reachable and keep whatever flag they had.
    pub fn toggle_wireframe(&mut self) {
        self.visit_meshes_mut(|mesh| mesh.material.wireframe = !mesh.material.wireframe);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry;
    use glam::Vec3;

    fn mesh_node() -> Node {
        Node::mesh(geometry::sphere(1.0, 8, 4), Material::flat(0xffaa11))
    }

    #[test]
    fn test_insert_and_get() {
        let mut scene = Scene::new();
        let id = scene.insert(mesh_node());
        assert!(scene.contains(id));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_remove_returns_node_intact() {
        let mut scene = Scene::new();
        let mut node = mesh_node();
        node.translate(0.0, 1.0, 0.0);
        let id = scene.insert(node);

        let detached = scene.remove(id).unwrap();
        assert!(!scene.contains(id));
        assert_eq!(detached.position(), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_remove_twice_is_none() {
        let mut scene = Scene::new();
        let id = scene.insert(mesh_node());
        assert!(scene.remove(id).is_some());
        assert!(scene.remove(id).is_none());
    }

    #[test]
    fn test_slot_reuse() {
        let mut scene = Scene::new();
        let first = scene.insert(mesh_node());
        let _second = scene.insert(mesh_node());
        scene.remove(first);
        let third = scene.insert(mesh_node());
        assert_eq!(first, third);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_wireframe_toggle_is_idempotent_in_pairs() {
        let mut scene = Scene::new();
        scene.insert(mesh_node());
        scene.insert(Node::group(vec![mesh_node(), mesh_node()]));

        let mut before = Vec::new();
        scene.visit_meshes(|_, mesh| before.push(mesh.material.wireframe));

        scene.toggle_wireframe();
        let mut flipped = Vec::new();
        scene.visit_meshes(|_, mesh| flipped.push(mesh.material.wireframe));
        assert_eq!(before.len(), flipped.len());
        assert!(before.iter().zip(&flipped).all(|(b, f)| b != f));

        scene.toggle_wireframe();
        let mut after = Vec::new();
        scene.visit_meshes(|_, mesh| after.push(mesh.material.wireframe));
        assert_eq!(before, after);
    }

    #[test]
    fn test_detached_node_misses_wireframe_toggle() {
        let mut scene = Scene::new();
        scene.insert(mesh_node());
        let parked_id = scene.insert(mesh_node());
        let mut parked = scene.remove(parked_id).unwrap();

        scene.toggle_wireframe();

        let mut kept_wireframe = false;
        scene.visit_meshes(|_, mesh| kept_wireframe = mesh.material.wireframe);
        assert!(kept_wireframe);

        let mut parked_wireframe = true;
        parked.visit_meshes_mut(&mut |mesh| parked_wireframe = mesh.material.wireframe);
        assert!(!parked_wireframe);
    }

    #[test]
    fn test_background_from_hex() {
        let scene = Scene::with_background(0x228b22);
        assert!((scene.background[1] - 139.0 / 255.0).abs() < 1e-6);
    }
}
