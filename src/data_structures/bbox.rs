use super::vector::*;

///
/// ### Bounding Box
/// Axis aligned bounding box type
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Bbox {
    pub min: Vec3f32,
    pub max: Vec3f32,
}

impl Bbox {
    ///
    /// Create a bounding box from two corners, `min` must not exceed `max`
    pub const fn new(min: Vec3f32, max: Vec3f32) -> Bbox {
        Self { min, max }
    }

    ///
    /// Create a new bounding box including nothing
    ///
    /// The corners are inverted infinities so that including any box or
    /// vertex produces exactly that box or vertex.
    pub const fn empty() -> Bbox {
        Self {
            min: Vec3f32::splat(f32::INFINITY),
            max: Vec3f32::splat(f32::NEG_INFINITY),
        }
    }

    ///
    /// Create a bounding box from a given triangle
    pub fn from_triangle(v0: Vec3f32, v1: Vec3f32, v2: Vec3f32) -> Bbox {
        Self {
            min: v0.min(v1).min(v2),
            max: v0.max(v1).max(v2),
        }
    }

    ///
    /// Create a bounding box enclosing a sphere
    pub fn from_sphere(center: Vec3f32, radius: f32) -> Bbox {
        let r = Vec3f32::splat(radius);
        Self {
            min: center - r,
            max: center + r,
        }
    }

    /// Extend the bounding box to include the given vertex
    pub fn include_vertex(&mut self, v: Vec3f32) {
        self.min = self.min.min(v);
        self.max = self.max.max(v);
    }

    /// Extend the bounding box to include the given bounding box
    pub fn include_bbox(&mut self, other: &Bbox) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Get the center of the bounding box
    pub fn center(&self) -> Vec3f32 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents of the bounding box
    pub fn extent(&self) -> Vec3f32 {
        self.max - self.min
    }

    /// True if nothing has been included yet
    pub fn is_empty(&self) -> bool {
        !self.min.le(self.max).all()
    }

    /// Check if the other bounding box lies completely inside this one
    pub fn contains_bbox(&self, other: &Bbox) -> bool {
        self.min.le(other.min).all() && self.max.ge(other.max).all()
    }
}
