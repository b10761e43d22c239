//! Directed, labeled bonds between sites of a structure.
//!
//! A bond refers to its endpoints by 1-based position in the site list of whatever structure holds
//! it: the indices mean nothing on their own, and are only checked against a site list once the
//! bond is used with one. The wrap records how many unit-cell translations along each Bravais
//! direction the destination is displaced from its position in the same cell.

use nalgebra::SVector;
use num_traits::Zero;

use crate::{
    error::LatticeError,
    similar::{Patch, Similar},
};

/// Everything a bond needs to expose to take part in the generic structure algorithms.
pub trait AbstractBond<const N: usize>: Clone {
    /// The label type, fixed once per lattice.
    type Label;

    /// 1-based index of the source site.
    fn from(&self) -> usize;

    fn set_from(&mut self, from: usize);

    /// 1-based index of the destination site.
    fn to(&self) -> usize;

    fn set_to(&mut self, to: usize);

    fn label(&self) -> &Self::Label;

    fn set_label(&mut self, label: Self::Label);

    /// Periodic offset of the destination, in units of the Bravais vectors.
    fn wrap(&self) -> &SVector<i64, N>;

    fn set_wrap(&mut self, wrap: SVector<i64, N>);

    /// Whether the bond crosses a cell boundary, i.e., whether any wrap component is nonzero.
    fn is_periodic(&self) -> bool {
        !self.wrap().is_zero()
    }
}

/// A bond `from -> to`. A symmetric coupling is two bonds, `i -> j` and `j -> i`, with the same
/// label and opposite wraps; see [`Bond::reversed`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bond<L, const N: usize> {
    from: usize,
    to: usize,
    label: L,
    wrap: SVector<i64, N>,
}

impl<L, const N: usize> Bond<L, N> {
    pub fn new(from: usize, to: usize, label: L, wrap: SVector<i64, N>) -> Self {
        Self {
            from,
            to,
            label,
            wrap,
        }
    }

    /// Builds a bond from an untyped wrap. Fails if the wrap doesn't have exactly `N` components.
    pub fn from_slice(from: usize, to: usize, label: L, wrap: &[i64]) -> Result<Self, LatticeError> {
        LatticeError::check_dim("bond wrap", N, wrap.len())?;
        Ok(Self::new(from, to, label, SVector::from_column_slice(wrap)))
    }

    /// Replaces the wrap from an untyped list, leaving the bond untouched if the length is wrong.
    pub fn set_wrap_from_slice(&mut self, wrap: &[i64]) -> Result<(), LatticeError> {
        LatticeError::check_dim("bond wrap", N, wrap.len())?;
        self.wrap = SVector::from_column_slice(wrap);
        Ok(())
    }

    /// The number of periodic directions.
    pub const fn wrap_len(&self) -> usize {
        N
    }
}

impl<L: Clone, const N: usize> Bond<L, N> {
    /// The same coupling seen from the other end: endpoints swapped, wrap negated.
    pub fn reversed(&self) -> Self {
        Self::new(self.to, self.from, self.label.clone(), -self.wrap)
    }
}

impl<L: Clone, const N: usize> AbstractBond<N> for Bond<L, N> {
    type Label = L;

    fn from(&self) -> usize {
        self.from
    }

    fn set_from(&mut self, from: usize) {
        self.from = from;
    }

    fn to(&self) -> usize {
        self.to
    }

    fn set_to(&mut self, to: usize) {
        self.to = to;
    }

    fn label(&self) -> &L {
        &self.label
    }

    fn set_label(&mut self, label: L) {
        self.label = label;
    }

    fn wrap(&self) -> &SVector<i64, N> {
        &self.wrap
    }

    fn set_wrap(&mut self, wrap: SVector<i64, N>) {
        self.wrap = wrap;
    }
}

impl<L: Clone, const N: usize> Similar for Bond<L, N> {}

/// Overrides for [`Bond::clone_with`](Similar::clone_with).
#[derive(Debug, Clone)]
pub struct BondPatch<L, const N: usize> {
    from: Option<usize>,
    to: Option<usize>,
    label: Option<L>,
    wrap: Option<SVector<i64, N>>,
}

impl<L, const N: usize> Default for BondPatch<L, N> {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            label: None,
            wrap: None,
        }
    }
}

impl<L, const N: usize> BondPatch<L, N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(mut self, from: usize) -> Self {
        self.from = Some(from);
        self
    }

    pub fn to(mut self, to: usize) -> Self {
        self.to = Some(to);
        self
    }

    pub fn label(mut self, label: L) -> Self {
        self.label = Some(label);
        self
    }

    pub fn wrap(mut self, wrap: SVector<i64, N>) -> Self {
        self.wrap = Some(wrap);
        self
    }
}

impl<L: Clone, const N: usize> Patch<Bond<L, N>> for BondPatch<L, N> {
    fn apply(self, target: &mut Bond<L, N>) {
        if let Some(from) = self.from {
            target.set_from(from);
        }
        if let Some(to) = self.to {
            target.set_to(to);
        }
        if let Some(label) = self.label {
            target.set_label(label);
        }
        if let Some(wrap) = self.wrap {
            target.set_wrap(wrap);
        }
    }
}
