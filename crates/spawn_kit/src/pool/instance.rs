//! Contracts between the pool and the objects it manages.
use glam::Vec3;

use crate::pool::transform::Transform;

/// An object that can be parked in a [`crate::pool::ComponentPool`].
pub trait Poolable {
    fn set_active(&mut self, active: bool);
    fn is_active(&self) -> bool;
    fn set_transform(&mut self, transform: Transform);
}

impl<P: Poolable + ?Sized> Poolable for Box<P> {
    fn set_active(&mut self, active: bool) {
        (**self).set_active(active);
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    fn set_transform(&mut self, transform: Transform) {
        (**self).set_transform(transform);
    }
}

/// Produces instances of one resource. Only used while a pool is being filled.
pub trait InstanceFactory {
    type Instance: Poolable;

    /// Scale of the source prefab, reapplied on every acquire.
    fn prefab_scale(&self) -> Vec3 {
        Vec3::ONE
    }

    fn instantiate(&mut self) -> Self::Instance;
}

/// Factory backed by a closure.
pub struct FnFactory<F> {
    f: F,
    scale: Vec3,
}

impl<F> FnFactory<F> {
    pub fn new(f: F) -> Self {
        Self {
            f,
            scale: Vec3::ONE,
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

impl<F, I> InstanceFactory for FnFactory<F>
where
    F: FnMut() -> I,
    I: Poolable,
{
    type Instance = I;

    fn prefab_scale(&self) -> Vec3 {
        self.scale
    }

    fn instantiate(&mut self) -> I {
        (self.f)()
    }
}

/// Minimal engine-free instance: an activity flag and a transform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicInstance {
    pub active: bool,
    pub transform: Transform,
}

impl Poolable for BasicInstance {
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fn_factory_reports_scale_and_builds() {
        let mut built = 0;
        let mut factory = FnFactory::new(|| {
            built += 1;
            BasicInstance::default()
        })
        .with_scale(Vec3::splat(0.5));

        assert_eq!(factory.prefab_scale(), Vec3::splat(0.5));
        let instance = factory.instantiate();
        assert!(!instance.is_active());
        drop(factory);
        assert_eq!(built, 1);
    }

    #[test]
    fn boxed_instances_forward_calls() {
        let mut boxed: Box<dyn Poolable> = Box::new(BasicInstance::default());
        boxed.set_active(true);
        assert!(boxed.is_active());
    }
}
