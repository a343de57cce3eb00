//! Surface area heuristic used to pick split planes.

use super::{bbox::Bbox, vector::Vec3f32, wrapper::Wrapper};

/// Candidate planes tested per axis, spread evenly inside the node box
pub const NUM_SPLIT_TESTS: u32 = 10;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Split {
    AxisX = 0,
    AxisY = 1,
    AxisZ = 2,
}

impl From<u32> for Split {
    fn from(value: u32) -> Self {
        match value {
            0 => Split::AxisX,
            1 => Split::AxisY,
            2 => Split::AxisZ,
            _ => panic!("unexpected input {value}"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SplitCandidate {
    pub axis: Split,
    pub position: f32,
    pub cost: f32,
}

impl SplitCandidate {
    /// Returned when there is nothing to split
    pub const NONE: SplitCandidate = SplitCandidate {
        axis: Split::AxisX,
        position: 0.0,
        cost: f32::INFINITY,
    };
}

/// Half the surface area of a box of `size` times the primitives inside it.
///
/// Flat boxes cost nothing, and neither does an empty side.
pub fn node_cost(size: Vec3f32, count: u32) -> f32 {
    if count == 0 {
        return 0.0;
    }
    let half_area = size.0 * size.1 + size.0 * size.2 + size.1 * size.2;
    half_area * count as f32
}

/// Try `NUM_SPLIT_TESTS` planes on every axis and keep the cheapest.
///
/// Ties keep the earliest candidate, axis major.
pub fn find_best_split(wrappers: &[Wrapper], bbox: &Bbox, start: u32, count: u32) -> SplitCandidate {
    if count <= 1 {
        return SplitCandidate::NONE;
    }
    let mut best = SplitCandidate::NONE;
    for axis in 0..3 {
        for i in 0..NUM_SPLIT_TESTS {
            let t = (i + 1) as f32 / (NUM_SPLIT_TESTS + 1) as f32;
            let position = lerp(bbox.min[axis], bbox.max[axis], t);
            let cost = evaluate_split(wrappers, axis, position, start, count);
            if cost < best.cost {
                best = SplitCandidate {
                    axis: axis.into(),
                    position,
                    cost,
                };
            }
        }
    }
    best
}

/// Cost of splitting `wrappers[start..start + count]` at `position` on `axis`.
/// Centers exactly on the plane go right.
pub fn evaluate_split(wrappers: &[Wrapper], axis: u32, position: f32, start: u32, count: u32) -> f32 {
    let mut left = Bbox::empty();
    let mut right = Bbox::empty();
    let mut left_count = 0;
    let mut right_count = 0;

    for wrapper in &wrappers[start as usize..(start + count) as usize] {
        if wrapper.center[axis] < position {
            left_count += 1;
            left.include_bbox(&wrapper.bbox);
        } else {
            right_count += 1;
            right.include_bbox(&wrapper.bbox);
        }
    }

    node_cost(left.extent(), left_count) + node_cost(right.extent(), right_count)
}

/// Move every wrapper whose center lies left of `position` to the front of
/// `wrappers`, keeping the order of the left ones. Returns how many moved.
pub fn partition(wrappers: &mut [Wrapper], axis: u32, position: f32) -> u32 {
    let mut num_on_left = 0;
    for i in 0..wrappers.len() {
        if wrappers[i].center[axis] < position {
            wrappers.swap(num_on_left, i);
            num_on_left += 1;
        }
    }
    num_on_left as u32
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
