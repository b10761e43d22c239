//! The contract shared by unit cells and lattices: a set of Bravais vectors, an ordered list of
//! sites, and an ordered list of bonds whose endpoints index into that site list. Everything
//! derivable from those three lists is provided here once, so any type that supplies the accessors
//! gets the topology algorithms for free.
//!
//! The Bravais vectors are stored as the columns of a `D x N` matrix: `N` translation vectors in a
//! `D`-dimensional embedding space. `N` need not equal `D` (a chain embedded in the plane has
//! `N = 1, D = 2`), and a finite cluster has `N = 0`.

use nalgebra::{SMatrix, SVector};

use crate::{
    bond::AbstractBond,
    error::LatticeError,
    site::AbstractSite,
    topology::{organize_bonds_by, vector, BondsBySite},
};

pub trait Structure<const D: usize, const N: usize> {
    type Site: AbstractSite<D>;
    type Bond: AbstractBond<N>;

    /// The Bravais vectors, one per column.
    fn lattice_vectors(&self) -> &SMatrix<f64, D, N>;

    fn set_lattice_vectors(&mut self, lattice_vectors: SMatrix<f64, D, N>);

    fn sites(&self) -> &[Self::Site];

    fn set_sites(&mut self, sites: Vec<Self::Site>);

    fn bonds(&self) -> &[Self::Bond];

    fn set_bonds(&mut self, bonds: Vec<Self::Bond>);

    fn num_sites(&self) -> usize {
        self.sites().len()
    }

    fn num_bonds(&self) -> usize {
        self.bonds().len()
    }

    /// The site at 1-based index `i`.
    fn site(&self, i: usize) -> Result<&Self::Site, LatticeError> {
        LatticeError::check_index("site", i, self.num_sites())?;
        Ok(&self.sites()[i - 1])
    }

    /// The bond at 1-based index `i`.
    fn bond(&self, i: usize) -> Result<&Self::Bond, LatticeError> {
        LatticeError::check_index("bond", i, self.num_bonds())?;
        Ok(&self.bonds()[i - 1])
    }

    /// The `k`th Bravais vector, 1-based.
    fn lattice_vector(&self, k: usize) -> Result<SVector<f64, D>, LatticeError> {
        LatticeError::check_index("lattice vector", k, N)?;
        Ok(self.lattice_vectors().column(k - 1).into_owned())
    }

    fn a1(&self) -> Result<SVector<f64, D>, LatticeError> {
        self.lattice_vector(1)
    }

    fn a2(&self) -> Result<SVector<f64, D>, LatticeError> {
        self.lattice_vector(2)
    }

    fn a3(&self) -> Result<SVector<f64, D>, LatticeError> {
        self.lattice_vector(3)
    }

    /// Bonds grouped by their source site, keeping their relative order.
    fn organized_bonds_from(&self) -> Result<BondsBySite<Self::Bond>, LatticeError> {
        organize_bonds_by(self.bonds(), self.num_sites(), |b| b.from())
    }

    /// Bonds grouped by their destination site, keeping their relative order.
    fn organized_bonds_to(&self) -> Result<BondsBySite<Self::Bond>, LatticeError> {
        organize_bonds_by(self.bonds(), self.num_sites(), |b| b.to())
    }

    /// The real-space vector of every bond, in bond order. See [`vector`].
    fn bond_vectors(&self) -> Result<Vec<SVector<f64, D>>, LatticeError>
    where
        Self: Sized,
    {
        self.bonds()
            .iter()
            .map(|b| vector::<Self, Self::Bond, D, N, N>(b, self))
            .collect()
    }

    /// The distinct site labels, in order of first appearance.
    fn site_labels(&self) -> Vec<&<Self::Site as AbstractSite<D>>::Label>
    where
        <Self::Site as AbstractSite<D>>::Label: PartialEq,
    {
        distinct(self.sites().iter().map(|s| s.label()))
    }

    /// The distinct bond labels, in order of first appearance.
    fn bond_labels(&self) -> Vec<&<Self::Bond as AbstractBond<N>>::Label>
    where
        <Self::Bond as AbstractBond<N>>::Label: PartialEq,
    {
        distinct(self.bonds().iter().map(|b| b.label()))
    }
}

/// Labels are only required to be comparable, not hashable, so this is quadratic in the number of
/// distinct labels. There are rarely more than a handful.
fn distinct<'a, T: PartialEq + 'a>(items: impl Iterator<Item = &'a T>) -> Vec<&'a T> {
    let mut out: Vec<&T> = vec![];
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Builds a Bravais matrix from a list of plain vectors, checking there are `N` of them with `D`
/// components each.
pub fn basis_from_slices<const D: usize, const N: usize>(
    vectors: &[Vec<f64>],
) -> Result<SMatrix<f64, D, N>, LatticeError> {
    LatticeError::check_dim("lattice vectors", N, vectors.len())?;
    let mut m = SMatrix::<f64, D, N>::zeros();
    for (k, v) in vectors.iter().enumerate() {
        LatticeError::check_dim("lattice vector", D, v.len())?;
        m.set_column(k, &SVector::<f64, D>::from_column_slice(v));
    }
    Ok(m)
}
