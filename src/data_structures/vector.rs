use std::ops::{Add, Div, Index, IndexMut, Mul, Sub};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Default, bytemuck::Zeroable)]
pub struct Vec3<T>(pub T, pub T, pub T);

unsafe impl<T> bytemuck::Pod for Vec3<T> where T: bytemuck::Pod {}

pub type Vec3f32 = Vec3<f32>;

#[inline(always)]
pub const fn vec3f32(f0: f32, f1: f32, f2: f32) -> Vec3<f32> {
    Vec3::<f32>(f0, f1, f2)
}
#[inline(always)]
pub const fn vec3f(f0: f32, f1: f32, f2: f32) -> Vec3<f32> {
    vec3f32(f0, f1, f2)
}

pub fn dot<T>(v1: Vec3<T>, v2: Vec3<T>) -> T
where
    T: Mul<Output = T> + Add<Output = T>,
{
    v1.0 * v2.0 + v1.1 * v2.1 + v1.2 * v2.2
}

pub fn cross<T>(v1: Vec3<T>, v2: Vec3<T>) -> Vec3<T>
where
    T: Mul<Output = T> + Sub<Output = T> + Copy,
{
    Vec3(
        v1.1 * v2.2 - v1.2 * v2.1,
        v1.2 * v2.0 - v1.0 * v2.2,
        v1.0 * v2.1 - v1.1 * v2.0,
    )
}

/// Vec3 Methods
///

impl Vec3<f32> {
    pub const fn splat(v: f32) -> Self {
        Self(v, v, v)
    }

    /// Component-wise minimum
    pub fn min(self, rhs: Self) -> Self {
        Self(
            f32::min(self.0, rhs.0),
            f32::min(self.1, rhs.1),
            f32::min(self.2, rhs.2),
        )
    }

    /// Component-wise maximum
    pub fn max(self, rhs: Self) -> Self {
        Self(
            f32::max(self.0, rhs.0),
            f32::max(self.1, rhs.1),
            f32::max(self.2, rhs.2),
        )
    }

    pub fn magnitude(self) -> f32 {
        dot(self, self).sqrt()
    }

    pub fn normalize(self) -> Self {
        let magnitude = self.magnitude();
        Self(self.0 / magnitude, self.1 / magnitude, self.2 / magnitude)
    }
}

impl<T> Add<Vec3<T>> for Vec3<T>
where
    T: Add<Output = T>,
{
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0, self.1 + rhs.1, self.2 + rhs.2)
    }
}

impl<T> Sub<Vec3<T>> for Vec3<T>
where
    T: Sub<Output = T>,
{
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0, self.1 - rhs.1, self.2 - rhs.2)
    }
}

impl<T: Mul<Output = T>> Mul<Vec3<T>> for Vec3<T>
where
    T: Mul,
{
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0, self.1 * rhs.1, self.2 * rhs.2)
    }
}

impl<T> Mul<T> for Vec3<T>
where
    T: Mul<Output = T> + Copy,
{
    type Output = Self;

    fn mul(self, rhs: T) -> Self::Output {
        Self(self.0 * rhs, self.1 * rhs, self.2 * rhs)
    }
}

impl<T> Div<T> for Vec3<T>
where
    T: Div<Output = T> + Copy,
{
    type Output = Self;

    fn div(self, rhs: T) -> Self::Output {
        Self(self.0 / rhs, self.1 / rhs, self.2 / rhs)
    }
}

impl<T> Index<u32> for Vec3<T> {
    type Output = T;

    fn index(&self, index: u32) -> &Self::Output {
        match index {
            0 => &self.0,
            1 => &self.1,
            2 => &self.2,
            _ => panic!("Unexpected index {index}"),
        }
    }
}

impl<T> IndexMut<u32> for Vec3<T> {
    fn index_mut(&mut self, index: u32) -> &mut Self::Output {
        match index {
            0 => &mut self.0,
            1 => &mut self.1,
            2 => &mut self.2,
            _ => panic!("Unexpected index {index}"),
        }
    }
}

impl<T> From<(T, T, T)> for Vec3<T> {
    fn from(value: (T, T, T)) -> Self {
        Vec3::<T>(value.0, value.1, value.2)
    }
}

impl<T> From<[T; 3]> for Vec3<T>
where
    T: Copy,
{
    fn from(value: [T; 3]) -> Self {
        Self(value[0], value[1], value[2])
    }
}

impl From<cgmath::Vector3<f32>> for Vec3<f32> {
    fn from(value: cgmath::Vector3<f32>) -> Self {
        Self(value.x, value.y, value.z)
    }
}

impl From<Vec3<f32>> for cgmath::Vector3<f32> {
    fn from(value: Vec3<f32>) -> Self {
        cgmath::Vector3::new(value.0, value.1, value.2)
    }
}

// comparisons

impl<T> Vec3<T>
where
    T: PartialOrd<T>,
{
    pub fn le(&self, rhs: Vec3<T>) -> Vec3<bool> {
        let x = self.0 <= rhs.0;
        let y = self.1 <= rhs.1;
        let z = self.2 <= rhs.2;
        Vec3::<bool>(x, y, z)
    }

    pub fn ge(&self, rhs: Vec3<T>) -> Vec3<bool> {
        let x = self.0 >= rhs.0;
        let y = self.1 >= rhs.1;
        let z = self.2 >= rhs.2;
        Vec3::<bool>(x, y, z)
    }
}

impl<T> Vec3<T>
where
    T: Into<bool> + Copy,
{
    pub fn all(&self) -> bool {
        self.0.into() && self.1.into() && self.2.into()
    }
}

#[cfg(test)]
mod vector_test {
    use super::*;

    #[test]
    fn component_min_max() {
        let a = vec3f(1.0, -2.0, 3.0);
        let b = vec3f(0.0, 4.0, 3.5);
        assert_eq!(a.min(b), vec3f(0.0, -2.0, 3.0));
        assert_eq!(a.max(b), vec3f(1.0, 4.0, 3.5));
    }

    #[test]
    fn cross_product() {
        let x = vec3f(1.0, 0.0, 0.0);
        let y = vec3f(0.0, 1.0, 0.0);
        assert_eq!(cross(x, y), vec3f(0.0, 0.0, 1.0));
        assert_eq!(cross(y, x), vec3f(0.0, 0.0, -1.0));
    }

    #[test]
    fn index_by_axis() {
        let mut v = vec3f(1.0, 2.0, 3.0);
        assert_eq!(v[2], 3.0);
        v[1] = 5.0;
        assert_eq!(v, vec3f(1.0, 5.0, 3.0));
        assert!(v.le(vec3f(1.0, 5.0, 3.0)).all());
        assert!(!v.ge(vec3f(2.0, 0.0, 0.0)).all());
    }
}
