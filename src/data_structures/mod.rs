pub mod bbox;
pub mod bvh;
pub mod bvh_node;
pub mod bvh_util;
pub mod sah;
pub mod vector;
pub mod wrapper;
