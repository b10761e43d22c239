//! Sites: labeled points in D-dimensional embedding space.

use nalgebra::SVector;

use crate::{
    error::LatticeError,
    similar::{Patch, Similar},
};

/// Everything a site needs to expose to take part in the generic structure algorithms.
pub trait AbstractSite<const D: usize>: Clone {
    /// The label type, fixed once per lattice.
    type Label;

    /// The site's label.
    fn label(&self) -> &Self::Label;

    /// Replaces the label.
    fn set_label(&mut self, label: Self::Label);

    /// The position in embedding space.
    fn point(&self) -> &SVector<f64, D>;

    /// Replaces the position.
    fn set_point(&mut self, point: SVector<f64, D>);
}

/// A labeled point. The dimension is part of the type, so `point` always has `D` components.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Site<L, const D: usize> {
    point: SVector<f64, D>,
    label: L,
}

impl<L, const D: usize> Site<L, D> {
    pub fn new(point: SVector<f64, D>, label: L) -> Self {
        Self { point, label }
    }

    /// Builds a site from an untyped list of coordinates. Fails if there aren't exactly `D`.
    pub fn from_slice(point: &[f64], label: L) -> Result<Self, LatticeError> {
        LatticeError::check_dim("site point", D, point.len())?;
        Ok(Self::new(SVector::from_column_slice(point), label))
    }

    /// Replaces the position from an untyped list of coordinates, leaving the site untouched if the
    /// length is wrong.
    pub fn set_point_from_slice(&mut self, point: &[f64]) -> Result<(), LatticeError> {
        LatticeError::check_dim("site point", D, point.len())?;
        self.point = SVector::from_column_slice(point);
        Ok(())
    }

    /// The embedding dimension.
    pub const fn dim(&self) -> usize {
        D
    }
}

impl<L: Clone, const D: usize> AbstractSite<D> for Site<L, D> {
    type Label = L;

    fn label(&self) -> &L {
        &self.label
    }

    fn set_label(&mut self, label: L) {
        self.label = label;
    }

    fn point(&self) -> &SVector<f64, D> {
        &self.point
    }

    fn set_point(&mut self, point: SVector<f64, D>) {
        self.point = point;
    }
}

impl<L: Clone, const D: usize> Similar for Site<L, D> {}

/// Overrides for [`Site::clone_with`](Similar::clone_with).
#[derive(Debug, Clone)]
pub struct SitePatch<L, const D: usize> {
    point: Option<SVector<f64, D>>,
    label: Option<L>,
}

impl<L, const D: usize> Default for SitePatch<L, D> {
    fn default() -> Self {
        Self {
            point: None,
            label: None,
        }
    }
}

impl<L, const D: usize> SitePatch<L, D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point(mut self, point: SVector<f64, D>) -> Self {
        self.point = Some(point);
        self
    }

    pub fn label(mut self, label: L) -> Self {
        self.label = Some(label);
        self
    }
}

impl<L: Clone, const D: usize> Patch<Site<L, D>> for SitePatch<L, D> {
    fn apply(self, target: &mut Site<L, D>) {
        if let Some(point) = self.point {
            target.set_point(point);
        }
        if let Some(label) = self.label {
            target.set_label(label);
        }
    }
}
