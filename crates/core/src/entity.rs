//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Collections key their entries through this trait only, so they never need
/// to look at anything else an entity carries.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
