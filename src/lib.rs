//! Bounding volume hierarchies over the triangles and spheres of
//! independently rendered rooms, plus the glue that concatenates every
//! room into scene wide flat lists.

pub mod data_structures;
pub mod mesh;
pub mod scene;

pub use data_structures::{
    bbox::Bbox,
    bvh::{Bvh, BvhSettings},
    bvh_node::BvhNode,
    wrapper::{Wrapper, WrapperKind},
};
pub use mesh::{Mesh, MeshRecord, Sphere, Transform, Triangle};
pub use scene::{BvhNodeInfo, Room, RoomInfo, SceneBvh, SceneSettings, WrapperInfo};
