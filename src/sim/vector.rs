//! Two-component vector used for position, direction, speed and size
//!
//! Thin wrapper over `glam::Vec2` that adds checked axis indexing.
//! Multiplication is component-wise (direction * speed).

use std::ops::{Add, AddAssign, Index, IndexMut, Mul};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

pub const AXIS_X: usize = 0;
pub const AXIS_Y: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D(Vec2);

impl Vector2D {
    pub const ZERO: Self = Self(Vec2::ZERO);

    pub const fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.0.y
    }

    /// Read an axis (0 = x, 1 = y)
    pub fn get(&self, axis: usize) -> Result<f32, SimError> {
        match axis {
            AXIS_X => Ok(self.0.x),
            AXIS_Y => Ok(self.0.y),
            _ => Err(SimError::InvalidAxis(axis)),
        }
    }

    /// Write an axis (0 = x, 1 = y)
    pub fn set(&mut self, axis: usize, value: f32) -> Result<(), SimError> {
        *self.axis_mut(axis)? = value;
        Ok(())
    }

    fn axis_mut(&mut self, axis: usize) -> Result<&mut f32, SimError> {
        match axis {
            AXIS_X => Ok(&mut self.0.x),
            AXIS_Y => Ok(&mut self.0.y),
            _ => Err(SimError::InvalidAxis(axis)),
        }
    }

    pub fn set_xy(&mut self, x: f32, y: f32) {
        self.0 = Vec2::new(x, y);
    }

    /// Same vector with x and y exchanged
    pub fn swapped(&self) -> Self {
        Self(Vec2::new(self.0.y, self.0.x))
    }

    pub fn as_vec2(&self) -> Vec2 {
        self.0
    }
}

impl From<Vec2> for Vector2D {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl From<Vector2D> for Vec2 {
    fn from(v: Vector2D) -> Self {
        v.0
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul for Vector2D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

/// Panics on any axis other than 0/1; use [`Vector2D::get`] for a checked read.
impl Index<usize> for Vector2D {
    type Output = f32;

    fn index(&self, axis: usize) -> &f32 {
        match axis {
            AXIS_X => &self.0.x,
            AXIS_Y => &self.0.y,
            _ => panic!("{}", SimError::InvalidAxis(axis)),
        }
    }
}

impl IndexMut<usize> for Vector2D {
    fn index_mut(&mut self, axis: usize) -> &mut f32 {
        match self.axis_mut(axis) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_access() {
        let mut v = Vector2D::new(3.0, -2.0);
        assert_eq!(v[0], 3.0);
        assert_eq!(v[1], -2.0);
        v[1] = 7.5;
        assert_eq!(v.y(), 7.5);
    }

    #[test]
    fn test_checked_access_rejects_bad_axis() {
        let mut v = Vector2D::new(1.0, 2.0);
        assert_eq!(v.get(2), Err(SimError::InvalidAxis(2)));
        assert_eq!(v.set(5, 1.0), Err(SimError::InvalidAxis(5)));
        assert_eq!(v, Vector2D::new(1.0, 2.0));
    }

    #[test]
    #[should_panic(expected = "invalid axis 2")]
    fn test_index_panics_on_bad_axis() {
        let v = Vector2D::new(1.0, 2.0);
        let _ = v[2];
    }

    #[test]
    fn test_component_wise_motion() {
        let mut pos = Vector2D::new(10.0, 20.0);
        let dir = Vector2D::new(-1.0, 1.0);
        let speed = Vector2D::new(4.0, 0.0);
        pos += dir * speed;
        assert_eq!(pos, Vector2D::new(6.0, 20.0));
        assert_eq!(pos.swapped(), Vector2D::new(20.0, 6.0));
    }
}
