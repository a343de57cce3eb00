use std::time::Instant;

use crate::mesh::{MeshRecord, Sphere};

use super::{
    bvh_node::BvhNode,
    bvh_util::BvhConstructionTime,
    sah::{find_best_split, node_cost, partition},
    wrapper::Wrapper,
};

/// Per room build parameters
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BvhSettings {
    /// 0 and 1 both give a single root leaf, 2 allows one split and so on
    pub max_depth: u32,
    /// Wrap whole meshes instead of their triangles
    pub use_full_objects: bool,
}

impl Default for BvhSettings {
    fn default() -> Self {
        Self {
            max_depth: 16,
            use_full_objects: false,
        }
    }
}

///
/// Bounding volume hierarchy over the triangles (or meshes) and spheres
/// of one room
///
/// Nodes are stored flat with the root at index 0. Every node refers to a
/// contiguous range of `wrappers`, which the build reorders in place.
/// All indices are local to the room.
#[derive(Debug, Clone)]
pub struct Bvh {
    wrappers: Vec<Wrapper>,
    nodes: Vec<BvhNode>,
    max_depth: u32,
    max_depth_reached: u32,
    layer: u32,
    pub time: BvhConstructionTime,
}

impl Bvh {
    pub fn new<M: MeshRecord>(meshes: &[M], spheres: &[Sphere], settings: &BvhSettings, layer: u32) -> Self {
        let timer = Instant::now();
        let wrappers = create_wrappers(meshes, spheres, settings.use_full_objects, layer);
        let wrapping = timer.elapsed();

        let mut bvh = Bvh {
            wrappers,
            nodes: vec![],
            max_depth: settings.max_depth,
            max_depth_reached: 0,
            layer,
            time: BvhConstructionTime {
                wrapping,
                ..Default::default()
            },
        };

        let timer = Instant::now();
        let root = BvhNode::new(&bvh.wrappers, 0, bvh.wrappers.len() as u32, layer);
        bvh.nodes.push(root);
        bvh.create_nodes(0, 1);
        bvh.time.subdivision = timer.elapsed();

        log::debug!(
            "room {}: {} wrappers, {} nodes, depth {} of {} in {:?}",
            layer,
            bvh.wrappers.len(),
            bvh.nodes.len(),
            bvh.max_depth_reached,
            bvh.max_depth,
            bvh.time.total()
        );
        bvh
    }

    fn create_nodes(&mut self, node_idx: usize, depth: u32) {
        let parent = self.nodes[node_idx];
        if depth >= self.max_depth || parent.len <= 1 {
            self.max_depth_reached = self.max_depth_reached.max(depth);
            return;
        }

        let parent_cost = node_cost(parent.bounds_size(), parent.len);
        let split = find_best_split(&self.wrappers, &parent.bbox, parent.start, parent.len);

        // no improvement, stays a leaf without counting towards the depth reached
        if split.cost >= parent_cost {
            return;
        }

        let axis = split.axis as u32;
        let start = parent.start as usize;
        let end = start + parent.len as usize;
        let num_on_left = partition(&mut self.wrappers[start..end], axis, split.position);

        let left = BvhNode::new(&self.wrappers, parent.start, num_on_left, self.layer);
        let right = BvhNode::new(
            &self.wrappers,
            parent.start + num_on_left,
            parent.len - num_on_left,
            self.layer,
        );
        log::trace!(
            "split node {} on {:?} at {}: {} | {} (cost {} < {})",
            node_idx,
            split.axis,
            split.position,
            left.len,
            right.len,
            split.cost,
            parent_cost
        );

        let left_idx = self.nodes.len();
        self.nodes.push(left);
        self.nodes.push(right);
        self.nodes[node_idx].children = Some((left_idx as u32, left_idx as u32 + 1));

        if left.len > 0 {
            self.create_nodes(left_idx, depth + 1);
        }
        if right.len > 0 {
            self.create_nodes(left_idx + 1, depth + 1);
        }
    }

    pub fn wrappers(&self) -> &[Wrapper] {
        &self.wrappers
    }

    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    pub fn num_wrappers(&self) -> u32 {
        self.wrappers.len() as u32
    }

    pub fn num_nodes(&self) -> u32 {
        self.nodes.len() as u32
    }

    pub fn max_depth_reached(&self) -> u32 {
        self.max_depth_reached
    }

    pub fn layer(&self) -> u32 {
        self.layer
    }

}

/// Meshes first, in order, then spheres
fn create_wrappers<M: MeshRecord>(
    meshes: &[M],
    spheres: &[Sphere],
    use_full_objects: bool,
    layer: u32,
) -> Vec<Wrapper> {
    let mut wrappers = if use_full_objects {
        meshes
            .iter()
            .enumerate()
            .map(|(mesh_idx, mesh)| Wrapper::from_mesh(mesh, mesh_idx as u32, layer))
            .collect::<Vec<_>>()
    } else {
        let total = meshes.iter().map(|mesh| mesh.triangle_count()).sum::<usize>();
        let mut wrappers = Vec::with_capacity(total + spheres.len());
        let mut triangle_idx = 0;
        for (mesh_idx, mesh) in meshes.iter().enumerate() {
            for i in 0..mesh.triangle_count() {
                wrappers.push(Wrapper::from_triangle(
                    &mesh.triangle(i),
                    mesh_idx as u32,
                    triangle_idx,
                    layer,
                ));
                triangle_idx += 1;
            }
        }
        wrappers
    };

    wrappers.extend(
        spheres
            .iter()
            .enumerate()
            .map(|(sphere_idx, sphere)| Wrapper::from_sphere(sphere, sphere_idx as u32, layer)),
    );
    wrappers
}
