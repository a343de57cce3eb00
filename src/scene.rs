use std::time::Instant;

use rayon::prelude::*;

use crate::data_structures::{
    bvh::{Bvh, BvhSettings},
    bvh_util::BvhConstructionTime,
    vector::Vec3f32,
    wrapper::WrapperKind,
};
use crate::mesh::{Mesh, MeshRecord, Sphere};

///
/// Independently rendered part of the scene
#[derive(Debug, Clone, Default)]
pub struct Room {
    pub layer: u32,
    pub meshes: Vec<Mesh>,
    pub spheres: Vec<Sphere>,
}

impl Room {
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|mesh| mesh.triangle_count()).sum()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SceneSettings {
    /// Skip construction entirely when false
    pub use_bvh: bool,
    pub bvh: BvhSettings,
    /// Build rooms on the rayon pool
    pub parallel: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            use_bvh: true,
            bvh: BvhSettings::default(),
            parallel: true,
        }
    }
}

/// Wrapper with scene wide indices
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WrapperInfo {
    pub min: Vec3f32,
    pub is_triangle: i32,
    pub max: Vec3f32,
    /// -1 for spheres
    pub mesh_index: i32,
    pub index: i32,
}

/// Node with scene wide indices, children are -1 for leaves
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BvhNodeInfo {
    pub min: Vec3f32,
    pub is_leaf: i32,
    pub max: Vec3f32,
    pub start_wrapper_index: i32,
    pub length_of_wrappers: i32,
    pub left_child_index: i32,
    pub right_child_index: i32,
}

/// Where a room's data starts in each scene wide list
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RoomInfo {
    pub layer: u32,
    pub global_meshes_index: u32,
    pub num_meshes: u32,
    pub global_triangles_index: u32,
    pub num_triangles: u32,
    pub global_spheres_index: u32,
    pub num_spheres: u32,
    pub wrappers_index: u32,
    pub num_wrappers: u32,
    pub bvh_nodes_index: u32,
    pub num_bvh_nodes: u32,
}

static_assertions::assert_eq_size!(WrapperInfo, [u32; 9]);
static_assertions::assert_eq_size!(BvhNodeInfo, [u32; 11]);
static_assertions::assert_eq_size!(RoomInfo, [u32; 11]);

///
/// Every room's BVH concatenated into scene wide lists
#[derive(Debug, Clone, Default)]
pub struct SceneBvh {
    pub wrappers: Vec<WrapperInfo>,
    pub nodes: Vec<BvhNodeInfo>,
    pub rooms: Vec<RoomInfo>,
    pub max_depth_reached: u32,
    pub time: BvhConstructionTime,
}

impl SceneBvh {
    pub fn build(rooms: &[Room], settings: &SceneSettings) -> Self {
        let mut scene = SceneBvh {
            rooms: room_offsets(rooms),
            ..Default::default()
        };
        if !settings.use_bvh {
            log::info!("BVH disabled, skipping construction for {} rooms", rooms.len());
            return scene;
        }

        let build = |room: &Room| Bvh::new(&room.meshes, &room.spheres, &settings.bvh, room.layer);
        let bvhs: Vec<Bvh> = if settings.parallel {
            rooms.par_iter().map(build).collect()
        } else {
            rooms.iter().map(build).collect()
        };

        let timer = Instant::now();
        for (info, bvh) in scene.rooms.iter_mut().zip(&bvhs) {
            info.wrappers_index = scene.wrappers.len() as u32;
            info.num_wrappers = bvh.num_wrappers();
            info.bvh_nodes_index = scene.nodes.len() as u32;
            info.num_bvh_nodes = bvh.num_nodes();

            scene.max_depth_reached = scene.max_depth_reached.max(bvh.max_depth_reached());
            scene.time.wrapping += bvh.time.wrapping;
            scene.time.subdivision += bvh.time.subdivision;

            append_room(&mut scene.wrappers, &mut scene.nodes, info, bvh);
        }
        scene.time.aggregation = timer.elapsed();

        log::info!(
            "built {} rooms: {} wrappers, {} nodes, max depth {}",
            scene.rooms.len(),
            scene.wrappers.len(),
            scene.nodes.len(),
            scene.max_depth_reached
        );
        scene
    }

    pub fn num_wrappers(&self) -> u32 {
        self.wrappers.len() as u32
    }

    pub fn num_nodes(&self) -> u32 {
        self.nodes.len() as u32
    }
}

/// Global mesh, triangle and sphere bases of every room
fn room_offsets(rooms: &[Room]) -> Vec<RoomInfo> {
    let mut meshes = 0;
    let mut triangles = 0;
    let mut spheres = 0;
    rooms
        .iter()
        .map(|room| {
            let info = RoomInfo {
                layer: room.layer,
                global_meshes_index: meshes,
                num_meshes: room.meshes.len() as u32,
                global_triangles_index: triangles,
                num_triangles: room.triangle_count() as u32,
                global_spheres_index: spheres,
                num_spheres: room.spheres.len() as u32,
                ..Default::default()
            };
            meshes += info.num_meshes;
            triangles += info.num_triangles;
            spheres += info.num_spheres;
            info
        })
        .collect()
}

fn append_room(wrappers: &mut Vec<WrapperInfo>, nodes: &mut Vec<BvhNodeInfo>, room: &RoomInfo, bvh: &Bvh) {
    wrappers.extend(bvh.wrappers().iter().map(|wrapper| {
        let index = wrapper.index()
            + match wrapper.kind {
                WrapperKind::Triangle { .. } => room.global_triangles_index,
                WrapperKind::Mesh { .. } => room.global_meshes_index,
                WrapperKind::Sphere { .. } => room.global_spheres_index,
            };
        WrapperInfo {
            min: wrapper.bbox.min,
            is_triangle: wrapper.is_triangle() as i32,
            max: wrapper.bbox.max,
            mesh_index: match wrapper.mesh_index() {
                -1 => -1,
                mesh_index => mesh_index + room.global_meshes_index as i32,
            },
            index: index as i32,
        }
    }));

    nodes.extend(bvh.nodes().iter().map(|node| {
        let (left_child_index, right_child_index) = match node.children {
            Some((left, right)) => (
                (left + room.bvh_nodes_index) as i32,
                (right + room.bvh_nodes_index) as i32,
            ),
            None => (-1, -1),
        };
        BvhNodeInfo {
            min: node.bbox.min,
            is_leaf: node.is_leaf() as i32,
            max: node.bbox.max,
            start_wrapper_index: (node.start + room.wrappers_index) as i32,
            length_of_wrappers: node.len as i32,
            left_child_index,
            right_child_index,
        }
    }));
}

#[cfg(test)]
mod scene_test {
    use super::*;
    use crate::data_structures::vector::vec3f;
    use crate::mesh::Transform;

    fn strip(at: f32, triangles: u32) -> Mesh {
        let mut vertices = vec![];
        let mut indices = vec![];
        for i in 0..triangles {
            let x = i as f32 * 3.0;
            vertices.push(vec3f(x, 0.0, 0.0));
            vertices.push(vec3f(x + 1.0, 0.0, 0.0));
            vertices.push(vec3f(x, 1.0, 0.5));
            indices.push([i * 3, i * 3 + 1, i * 3 + 2]);
        }
        Mesh::new(vertices, vec![], indices, Transform::from_position(vec3f(at, 0.0, 0.0)))
    }

    fn rooms() -> Vec<Room> {
        vec![
            Room {
                layer: 0,
                meshes: vec![strip(0.0, 3), strip(20.0, 2)],
                spheres: vec![Sphere::new(vec3f(0.0, 10.0, 0.0), 1.0)],
            },
            Room {
                layer: 1,
                meshes: vec![strip(-10.0, 4)],
                spheres: vec![
                    Sphere::new(vec3f(5.0, 5.0, 5.0), 0.5),
                    Sphere::new(vec3f(-5.0, 5.0, 5.0), 0.5),
                ],
            },
            Room::default(),
        ]
    }

    #[test]
    fn room_offsets_accumulate() {
        let rooms = rooms();
        let scene = SceneBvh::build(&rooms, &SceneSettings::default());
        let info = &scene.rooms;
        assert_eq!(info.len(), 3);
        assert_eq!((info[1].global_meshes_index, info[1].global_triangles_index), (2, 5));
        assert_eq!(info[1].global_spheres_index, 1);
        assert_eq!(info[2].global_triangles_index, 9);
        assert_eq!((info[0].wrappers_index, info[0].num_wrappers), (0, 6));
        assert_eq!((info[1].wrappers_index, info[1].num_wrappers), (6, 6));
        assert_eq!((info[2].wrappers_index, info[2].num_wrappers), (12, 0));
        assert_eq!(info[2].num_bvh_nodes, 1);
        assert_eq!(
            info[2].bvh_nodes_index,
            info[0].num_bvh_nodes + info[1].num_bvh_nodes
        );
        assert_eq!(scene.num_wrappers(), 12);
        assert_eq!(scene.num_nodes(), info.iter().map(|r| r.num_bvh_nodes).sum::<u32>());
    }

    #[test]
    fn indices_are_global() {
        let rooms = rooms();
        let scene = SceneBvh::build(&rooms, &SceneSettings::default());

        for (r, room) in scene.rooms.iter().enumerate() {
            let range = room.bvh_nodes_index as usize..(room.bvh_nodes_index + room.num_bvh_nodes) as usize;
            for node in &scene.nodes[range.clone()] {
                assert!(node.start_wrapper_index >= room.wrappers_index as i32);
                assert!(
                    node.start_wrapper_index + node.length_of_wrappers
                        <= (room.wrappers_index + room.num_wrappers) as i32
                );
                if node.is_leaf == 1 {
                    assert_eq!((node.left_child_index, node.right_child_index), (-1, -1));
                } else {
                    assert!(range.contains(&(node.left_child_index as usize)));
                    assert!(range.contains(&(node.right_child_index as usize)));
                }
            }

            let wrappers = room.wrappers_index as usize..(room.wrappers_index + room.num_wrappers) as usize;
            for wrapper in &scene.wrappers[wrappers] {
                if wrapper.is_triangle == 1 {
                    let mesh = wrapper.mesh_index as u32 - room.global_meshes_index;
                    assert!(mesh < room.num_meshes, "room {r}");
                    let triangle = wrapper.index as u32 - room.global_triangles_index;
                    assert!(triangle < room.num_triangles);
                } else {
                    assert_eq!(wrapper.mesh_index, -1);
                    let sphere = wrapper.index as u32 - room.global_spheres_index;
                    assert!(sphere < room.num_spheres);
                }
            }
        }
    }

    #[test]
    fn full_objects_offset_by_mesh_base() {
        let rooms = rooms();
        let settings = SceneSettings {
            bvh: BvhSettings {
                use_full_objects: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let scene = SceneBvh::build(&rooms, &settings);
        assert_eq!(scene.num_wrappers(), 2 + 1 + 1 + 2);
        let room = scene.rooms[1];
        let meshes: Vec<_> = scene.wrappers[room.wrappers_index as usize..]
            .iter()
            .filter(|w| w.is_triangle == 1)
            .collect();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].mesh_index, 2);
        assert_eq!(meshes[0].index, 2);
    }

    #[test]
    fn parallel_matches_sequential() {
        let rooms = rooms();
        let parallel = SceneBvh::build(&rooms, &SceneSettings::default());
        let sequential = SceneBvh::build(
            &rooms,
            &SceneSettings {
                parallel: false,
                ..Default::default()
            },
        );
        assert_eq!(parallel.wrappers, sequential.wrappers);
        assert_eq!(parallel.nodes, sequential.nodes);
        assert_eq!(parallel.rooms, sequential.rooms);
        assert_eq!(parallel.max_depth_reached, sequential.max_depth_reached);
    }

    #[test]
    fn disabled_bvh_is_empty() {
        let rooms = rooms();
        let scene = SceneBvh::build(
            &rooms,
            &SceneSettings {
                use_bvh: false,
                ..Default::default()
            },
        );
        assert!(scene.wrappers.is_empty());
        assert!(scene.nodes.is_empty());
        assert_eq!(scene.rooms.len(), 3);
        assert!(scene.rooms.iter().all(|r| r.num_wrappers == 0 && r.num_bvh_nodes == 0));
        assert_eq!(scene.rooms[1].global_meshes_index, 2);
    }

    #[test]
    fn flat_records_cast_to_bytes() {
        let scene = SceneBvh::build(&rooms(), &SceneSettings::default());
        let bytes: &[u8] = bytemuck::cast_slice(scene.nodes.as_slice());
        assert_eq!(bytes.len(), scene.nodes.len() * 44);
    }
}
