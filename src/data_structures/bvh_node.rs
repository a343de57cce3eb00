use super::{bbox::Bbox, vector::Vec3f32, wrapper::Wrapper};

///
/// One node of a room BVH
///
/// A node covers the contiguous wrapper range `start..start + len` of the
/// room's wrapper array. Interior nodes additionally point at two children
/// in the room's node array; the children split the range exactly.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BvhNode {
    pub bbox: Bbox,
    pub start: u32,
    pub len: u32,
    pub children: Option<(u32, u32)>,
    pub layer: u32,
}

impl BvhNode {
    /// Create a leaf bounding `wrappers[start..start + len]`.
    /// An empty range yields a zero sized box at the origin.
    pub fn new(wrappers: &[Wrapper], start: u32, len: u32, layer: u32) -> Self {
        let range = &wrappers[start as usize..(start + len) as usize];
        let bbox = match range.split_first() {
            Some((first, rest)) => rest.iter().fold(first.bbox, |mut bbox, wrapper| {
                bbox.include_bbox(&wrapper.bbox);
                bbox
            }),
            None => Bbox::default(),
        };
        Self {
            bbox,
            start,
            len,
            children: None,
            layer,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn bounds_size(&self) -> Vec3f32 {
        self.bbox.extent()
    }

    pub fn left_child_index(&self) -> i32 {
        self.children.map_or(-1, |(left, _)| left as i32)
    }

    pub fn right_child_index(&self) -> i32 {
        self.children.map_or(-1, |(_, right)| right as i32)
    }
}
