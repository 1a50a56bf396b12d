//! Spatial state written to pooled instances.
use glam::{Quat, Vec3};

/// Where and how to orient an acquired instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// World position.
    pub position: Vec3,
    /// World orientation.
    pub rotation: Quat,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Placement {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Placement at `position` with identity rotation.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Builds a placement from engine-agnostic `mint` types.
    pub fn from_mint(position: mint::Vector3<f32>, rotation: mint::Quaternion<f32>) -> Self {
        Self {
            position: position.into(),
            rotation: rotation.into(),
        }
    }

    /// Combines the placement with a scale into a full transform.
    pub fn to_transform(self, scale: Vec3) -> Transform {
        Transform {
            translation: self.position,
            rotation: self.rotation,
            scale,
        }
    }
}

/// Position, orientation and scale of an instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
