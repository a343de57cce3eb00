use crate::mesh::{MeshRecord, Sphere, Triangle};

use super::{bbox::Bbox, vector::Vec3f32};

/// What a wrapper stands for. All indices are local to the room.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WrapperKind {
    /// A single triangle. `triangle_index` counts triangles across every
    /// mesh of the room in mesh order.
    Triangle { mesh_index: u32, triangle_index: u32 },
    /// A whole mesh, used when building over full objects
    Mesh { mesh_index: u32 },
    Sphere { sphere_index: u32 },
}

///
/// Bounding box plus identity of one primitive
///
/// Wrappers are what the BVH sorts, so the triangle and sphere
/// lists themselves never have to be reordered.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Wrapper {
    pub bbox: Bbox,
    pub center: Vec3f32,
    pub kind: WrapperKind,
    pub layer: u32,
}

impl Wrapper {
    fn with_bbox(bbox: Bbox, kind: WrapperKind, layer: u32) -> Self {
        Self {
            bbox,
            center: bbox.center(),
            kind,
            layer,
        }
    }

    pub fn from_triangle(triangle: &Triangle, mesh_index: u32, triangle_index: u32, layer: u32) -> Self {
        Self::with_bbox(
            triangle.bbox(),
            WrapperKind::Triangle {
                mesh_index,
                triangle_index,
            },
            layer,
        )
    }

    pub fn from_mesh<M: MeshRecord>(mesh: &M, mesh_index: u32, layer: u32) -> Self {
        Self::with_bbox(mesh.bounds(), WrapperKind::Mesh { mesh_index }, layer)
    }

    pub fn from_sphere(sphere: &Sphere, sphere_index: u32, layer: u32) -> Self {
        Self::with_bbox(sphere.bbox(), WrapperKind::Sphere { sphere_index }, layer)
    }

    /// Whole mesh wrappers report `true` as well, consumers tell them
    /// apart from single triangles by the build mode.
    pub fn is_triangle(&self) -> bool {
        !matches!(self.kind, WrapperKind::Sphere { .. })
    }

    /// Owning mesh, -1 for spheres
    pub fn mesh_index(&self) -> i32 {
        match self.kind {
            WrapperKind::Triangle { mesh_index, .. } | WrapperKind::Mesh { mesh_index } => {
                mesh_index as i32
            }
            WrapperKind::Sphere { .. } => -1,
        }
    }

    /// Triangle, mesh or sphere index depending on the kind
    pub fn index(&self) -> u32 {
        match self.kind {
            WrapperKind::Triangle { triangle_index, .. } => triangle_index,
            WrapperKind::Mesh { mesh_index } => mesh_index,
            WrapperKind::Sphere { sphere_index } => sphere_index,
        }
    }
}
