use std::io::BufRead;
use std::path::Path;

use cgmath::{ElementWise, Quaternion, Vector3};

use crate::data_structures::{
    bbox::Bbox,
    vector::{cross, vec3f, Vec3f32},
};

///
/// World space triangle with per vertex normals
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle {
    pub v0: Vec3f32,
    pub v1: Vec3f32,
    pub v2: Vec3f32,
    pub n0: Vec3f32,
    pub n1: Vec3f32,
    pub n2: Vec3f32,
}

impl Triangle {
    pub fn bbox(&self) -> Bbox {
        Bbox::from_triangle(self.v0, self.v1, self.v2)
    }
}

/// Anything the BVH builder can wrap as a mesh.
///
/// Triangles and bounds are expected in world space. `bounds` must enclose
/// every triangle returned by `triangle`.
pub trait MeshRecord {
    fn triangle_count(&self) -> usize;

    fn triangle(&self, idx: usize) -> Triangle;

    fn bounds(&self) -> Bbox;
}

///
/// Placement of a mesh in the world
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3f32) -> Self {
        Self {
            position: position.into(),
            ..Default::default()
        }
    }

    pub fn point_to_world(&self, p: Vec3f32) -> Vec3f32 {
        let p: Vector3<f32> = p.into();
        (self.rotation * p.mul_element_wise(self.scale) + self.position).into()
    }

    pub fn direction_to_world(&self, dir: Vec3f32) -> Vec3f32 {
        let dir: Vector3<f32> = dir.into();
        (self.rotation * dir).into()
    }
}

///
/// Mesh type containing local vertices, normals and index triples
/// along with the transform that places it in the world
#[derive(Clone, Debug)]
pub struct Mesh {
    vertices: Vec<Vec3f32>,
    normals: Vec<Vec3f32>,
    indices: Vec<[u32; 3]>,
    transform: Transform,
    bounds: Bbox,
}

impl Mesh {
    /// `normals` may be empty, in which case face normals are used.
    /// Otherwise it has to be indexed the same way as `vertices`.
    pub fn new(
        vertices: Vec<Vec3f32>,
        normals: Vec<Vec3f32>,
        indices: Vec<[u32; 3]>,
        transform: Transform,
    ) -> Self {
        let mut mesh = Self {
            vertices,
            normals,
            indices,
            transform,
            bounds: Bbox::default(),
        };
        mesh.update_bounds();
        mesh
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.update_bounds();
    }

    /// Recompute world space bounds from every referenced vertex
    fn update_bounds(&mut self) {
        let mut bounds = Bbox::empty();
        for triangle in self.indices.iter() {
            for &i in triangle {
                bounds.include_vertex(self.transform.point_to_world(self.vertices[i as usize]));
            }
        }
        self.bounds = if bounds.is_empty() {
            Bbox::default()
        } else {
            bounds
        };
    }

    pub fn from_obj<P>(file_name: P) -> anyhow::Result<Mesh>
    where
        P: AsRef<Path> + std::fmt::Debug,
    {
        let (models, _materials_maybe) = tobj::load_obj(file_name, &Self::load_options())?;
        Ok(Self::from_models(&models))
    }

    /// Same as [`Mesh::from_obj`] but reads from memory, material libraries are ignored
    pub fn from_obj_reader<B: BufRead>(reader: &mut B) -> anyhow::Result<Mesh> {
        let (models, _materials_maybe) =
            tobj::load_obj_buf(reader, &Self::load_options(), |_| {
                Err(tobj::LoadError::OpenFileFailed)
            })?;
        Ok(Self::from_models(&models))
    }

    fn load_options() -> tobj::LoadOptions {
        tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        }
    }

    fn from_models(models: &[tobj::Model]) -> Mesh {
        let mut vertices = vec![];
        let mut normals = vec![];
        let mut indices = vec![];
        let mut has_normals = true;
        for m in models.iter() {
            let total = vertices.len() as u32;
            let count = m.mesh.positions.len() / 3;
            vertices.extend((0..count).map(|i| {
                vec3f(
                    m.mesh.positions[i * 3],
                    m.mesh.positions[i * 3 + 1],
                    m.mesh.positions[i * 3 + 2],
                )
            }));
            if m.mesh.normals.len() == m.mesh.positions.len() {
                normals.extend((0..count).map(|i| {
                    vec3f(
                        m.mesh.normals[i * 3],
                        m.mesh.normals[i * 3 + 1],
                        m.mesh.normals[i * 3 + 2],
                    )
                }));
            } else {
                has_normals = false;
            }
            indices.extend((0..m.mesh.indices.len() / 3).map(|i| {
                [
                    total + m.mesh.indices[i * 3],
                    total + m.mesh.indices[i * 3 + 1],
                    total + m.mesh.indices[i * 3 + 2],
                ]
            }));
        }
        if !has_normals {
            normals.clear();
        }
        log::debug!(
            "loaded {} models, {} vertices, {} triangles",
            models.len(),
            vertices.len(),
            indices.len()
        );
        Self::new(vertices, normals, indices, Transform::default())
    }
}

impl MeshRecord for Mesh {
    fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    fn triangle(&self, idx: usize) -> Triangle {
        let [i0, i1, i2] = self.indices[idx].map(|i| i as usize);
        let v0 = self.transform.point_to_world(self.vertices[i0]);
        let v1 = self.transform.point_to_world(self.vertices[i1]);
        let v2 = self.transform.point_to_world(self.vertices[i2]);
        let (n0, n1, n2) = if self.normals.is_empty() {
            let n = cross(v1 - v0, v2 - v0).normalize();
            (n, n, n)
        } else {
            (
                self.transform.direction_to_world(self.normals[i0]),
                self.transform.direction_to_world(self.normals[i1]),
                self.transform.direction_to_world(self.normals[i2]),
            )
        };
        Triangle { v0, v1, v2, n0, n1, n2 }
    }

    fn bounds(&self) -> Bbox {
        self.bounds
    }
}

///
/// World space sphere
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3f32,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3f32, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn bbox(&self) -> Bbox {
        Bbox::from_sphere(self.center, self.radius)
    }
}

#[cfg(test)]
mod mesh_test {
    use super::*;
    use cgmath::{Deg, Rotation3};
    use std::io::Cursor;

    const QUAD_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vn 0 0 1
f 1//1 2//1 3//1
f 1//1 3//1 4//1
";

    fn approx(a: Vec3f32, b: Vec3f32) -> bool {
        (a - b).magnitude() < 1e-5
    }

    #[test]
    fn obj_from_memory() {
        let mesh = Mesh::from_obj_reader(&mut Cursor::new(QUAD_OBJ)).expect("Failed to load model");
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.bounds(), Bbox::new(vec3f(0.0, 0.0, 0.0), vec3f(1.0, 1.0, 0.0)));
        let triangle = mesh.triangle(1);
        assert_eq!(triangle.v0, vec3f(0.0, 0.0, 0.0));
        assert_eq!(triangle.v1, vec3f(1.0, 1.0, 0.0));
        assert_eq!(triangle.v2, vec3f(0.0, 1.0, 0.0));
        assert!(approx(triangle.n2, vec3f(0.0, 0.0, 1.0)));
    }

    #[test]
    fn transform_moves_triangles_and_bounds() {
        let mut mesh = Mesh::new(
            vec![vec3f(0.0, 0.0, 0.0), vec3f(1.0, 0.0, 0.0), vec3f(0.0, 1.0, 0.0)],
            vec![],
            vec![[0, 1, 2]],
            Transform::default(),
        );
        assert!(approx(mesh.triangle(0).n0, vec3f(0.0, 0.0, 1.0)));

        mesh.set_transform(Transform {
            position: Vector3::new(10.0, 0.0, 0.0),
            rotation: Quaternion::from_angle_z(Deg(90.0)),
            scale: Vector3::new(2.0, 2.0, 2.0),
        });
        let triangle = mesh.triangle(0);
        assert!(approx(triangle.v0, vec3f(10.0, 0.0, 0.0)));
        assert!(approx(triangle.v1, vec3f(10.0, 2.0, 0.0)));
        assert!(approx(triangle.v2, vec3f(8.0, 0.0, 0.0)));
        assert!(approx(triangle.n0, vec3f(0.0, 0.0, 1.0)));

        let bounds = mesh.bounds();
        assert!(approx(bounds.min, vec3f(8.0, 0.0, 0.0)));
        assert!(approx(bounds.max, vec3f(10.0, 2.0, 0.0)));
        assert!(bounds.contains_bbox(&triangle.bbox()));
    }

    #[test]
    fn sphere_bounds() {
        let sphere = Sphere::new(vec3f(0.0, 1.0, 0.0), 2.0);
        assert_eq!(sphere.bbox().min, vec3f(-2.0, -1.0, -2.0));
        assert_eq!(sphere.bbox().max, vec3f(2.0, 3.0, 2.0));
    }
}
