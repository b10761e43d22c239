//! Copying with overrides. Every entity in the data model can be duplicated exactly or duplicated
//! with some of its fields replaced. The copy always happens first, in full, and the overrides are
//! then applied to the copy through the entity's ordinary setters, so the original is never shared
//! with or touched by the result.

/// A set of optional field overrides for `T`. Fields left unset keep the copied value.
pub trait Patch<T> {
    /// Writes the overridden fields into `target`.
    fn apply(self, target: &mut T);
}

/// Deep copies with optional overrides.
pub trait Similar: Clone {
    /// An exact, independently owned copy.
    fn similar(&self) -> Self {
        self.clone()
    }

    /// A copy with the fields set in `patch` replaced.
    fn clone_with<P: Patch<Self>>(&self, patch: P) -> Self {
        let mut out = self.clone();
        patch.apply(&mut out);
        out
    }

    /// A copy modified by an arbitrary closure, for overrides a patch can't express (e.g., the
    /// fallible slice setters).
    fn similar_with<F: FnOnce(&mut Self)>(&self, f: F) -> Self {
        let mut out = self.clone();
        f(&mut out);
        out
    }
}
