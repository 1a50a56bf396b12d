//! Level context providers.
//!
//! Selection is scoped by a level key the caller supplies. [`LevelProvider`] lets
//! game code hand over "whatever level is active right now" without a global
//! game manager; [`LevelCell`] is a plain holder for that value.

/// Synchronous query for the caller's current level key.
pub trait LevelProvider<L> {
    fn current_level(&self) -> L;
}

impl<L, F> LevelProvider<L> for F
where
    F: Fn() -> L,
{
    #[inline]
    fn current_level(&self) -> L {
        self()
    }
}

/// Owns the active level key and hands out clones of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelCell<L> {
    level: L,
}

impl<L> LevelCell<L> {
    pub fn new(level: L) -> Self {
        Self { level }
    }

    pub fn get(&self) -> &L {
        &self.level
    }

    /// Replaces the active level, returning the previous one.
    pub fn set(&mut self, level: L) -> L {
        std::mem::replace(&mut self.level, level)
    }
}

impl<L: Clone> LevelProvider<L> for LevelCell<L> {
    #[inline]
    fn current_level(&self) -> L {
        self.level.clone()
    }
}
