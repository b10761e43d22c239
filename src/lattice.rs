//! Lattices: an expanded realization of a unit cell (a finite cluster, a supercell, a strip with
//! some directions left periodic...) together with the unit cell it was built from.
//!
//! A lattice is a [`Structure`] in its own right: its bonds index into its own site list and wrap
//! along its own Bravais vectors, which generally differ in number from the unit cell's. Nothing
//! ties the lattice's counts to the unit cell's; building one from the other is left to the caller.
//! The unit cell shares the lattice's embedding dimension `D` but repeats along its own `M` Bravais
//! vectors.

use nalgebra::SMatrix;

use crate::{
    bond::AbstractBond,
    error::LatticeError,
    similar::{Patch, Similar},
    site::AbstractSite,
    structure::Structure,
    unitcell::AbstractUnitcell,
    validation::check_bond_indices,
};

pub trait AbstractLattice<const D: usize, const N: usize, const M: usize>: Structure<D, N> {
    /// The type of the generating unit cell.
    type Unitcell: AbstractUnitcell<D, M>;

    fn unitcell(&self) -> &Self::Unitcell;

    fn set_unitcell(&mut self, unitcell: Self::Unitcell);

    /// The embedding dimension of the sites.
    fn ndims(&self) -> usize {
        D
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lattice<S, B, U, const D: usize, const N: usize, const M: usize> {
    lattice_vectors: SMatrix<f64, D, N>,
    sites: Vec<S>,
    bonds: Vec<B>,
    unitcell: U,
}

impl<S, B, U, const D: usize, const N: usize, const M: usize> Lattice<S, B, U, D, N, M> {
    /// Assembles a lattice as given, without checking bond endpoints.
    pub fn new(
        lattice_vectors: SMatrix<f64, D, N>,
        sites: Vec<S>,
        bonds: Vec<B>,
        unitcell: U,
    ) -> Self {
        Self {
            lattice_vectors,
            sites,
            bonds,
            unitcell,
        }
    }
}

impl<S, B, U, const D: usize, const N: usize, const M: usize> Lattice<S, B, U, D, N, M>
where
    S: AbstractSite<D>,
    B: AbstractBond<N>,
{
    /// Assembles a lattice, failing if any bond refers to a site that doesn't exist.
    pub fn try_new(
        lattice_vectors: SMatrix<f64, D, N>,
        sites: Vec<S>,
        bonds: Vec<B>,
        unitcell: U,
    ) -> Result<Self, LatticeError> {
        let lattice = Self::new(lattice_vectors, sites, bonds, unitcell);
        check_bond_indices(&lattice)?;
        Ok(lattice)
    }
}

impl<S, B, U, const D: usize, const N: usize, const M: usize> Structure<D, N>
    for Lattice<S, B, U, D, N, M>
where
    S: AbstractSite<D>,
    B: AbstractBond<N>,
{
    type Site = S;
    type Bond = B;

    fn lattice_vectors(&self) -> &SMatrix<f64, D, N> {
        &self.lattice_vectors
    }

    fn set_lattice_vectors(&mut self, lattice_vectors: SMatrix<f64, D, N>) {
        self.lattice_vectors = lattice_vectors;
    }

    fn sites(&self) -> &[S] {
        &self.sites
    }

    fn set_sites(&mut self, sites: Vec<S>) {
        self.sites = sites;
    }

    fn bonds(&self) -> &[B] {
        &self.bonds
    }

    fn set_bonds(&mut self, bonds: Vec<B>) {
        self.bonds = bonds;
    }
}

impl<S, B, U, const D: usize, const N: usize, const M: usize> AbstractLattice<D, N, M>
    for Lattice<S, B, U, D, N, M>
where
    S: AbstractSite<D>,
    B: AbstractBond<N>,
    U: AbstractUnitcell<D, M>,
{
    type Unitcell = U;

    fn unitcell(&self) -> &U {
        &self.unitcell
    }

    fn set_unitcell(&mut self, unitcell: U) {
        self.unitcell = unitcell;
    }
}

impl<S: Clone, B: Clone, U: Clone, const D: usize, const N: usize, const M: usize> Similar
    for Lattice<S, B, U, D, N, M>
{
}

/// Overrides for [`Lattice::clone_with`](Similar::clone_with).
#[derive(Debug, Clone)]
pub struct LatticePatch<S, B, U, const D: usize, const N: usize> {
    lattice_vectors: Option<SMatrix<f64, D, N>>,
    sites: Option<Vec<S>>,
    bonds: Option<Vec<B>>,
    unitcell: Option<U>,
}

impl<S, B, U, const D: usize, const N: usize> Default for LatticePatch<S, B, U, D, N> {
    fn default() -> Self {
        Self {
            lattice_vectors: None,
            sites: None,
            bonds: None,
            unitcell: None,
        }
    }
}

impl<S, B, U, const D: usize, const N: usize> LatticePatch<S, B, U, D, N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lattice_vectors(mut self, lattice_vectors: SMatrix<f64, D, N>) -> Self {
        self.lattice_vectors = Some(lattice_vectors);
        self
    }

    pub fn sites(mut self, sites: Vec<S>) -> Self {
        self.sites = Some(sites);
        self
    }

    pub fn bonds(mut self, bonds: Vec<B>) -> Self {
        self.bonds = Some(bonds);
        self
    }

    pub fn unitcell(mut self, unitcell: U) -> Self {
        self.unitcell = Some(unitcell);
        self
    }
}

impl<S, B, U, const D: usize, const N: usize, const M: usize> Patch<Lattice<S, B, U, D, N, M>>
    for LatticePatch<S, B, U, D, N>
{
    fn apply(self, target: &mut Lattice<S, B, U, D, N, M>) {
        if let Some(lattice_vectors) = self.lattice_vectors {
            target.lattice_vectors = lattice_vectors;
        }
        if let Some(sites) = self.sites {
            target.sites = sites;
        }
        if let Some(bonds) = self.bonds {
            target.bonds = bonds;
        }
        if let Some(unitcell) = self.unitcell {
            target.unitcell = unitcell;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bond::Bond,
        site::{Site, SitePatch},
        topology::vector,
        unitcell::{Unitcell, UnitcellPatch},
        validation::{validate, ValidationOptions},
    };
    use nalgebra::{matrix, vector, SVector};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    type Cell = Unitcell<Site<char, 2>, Bond<char, 2>, 2, 2>;
    type Ring = Lattice<Site<char, 2>, Bond<char, 1>, Cell, 2, 1, 2>;

    /// A one-site square cell with nearest-neighbour bonds in both directions.
    fn square_cell() -> Cell {
        let right = Bond::new(1, 1, 'x', vector![1, 0]);
        let up = Bond::new(1, 1, 'y', vector![0, 1]);
        Unitcell::new(
            matrix![1., 0.; 0., 1.],
            vec![Site::new(vector![0., 0.], 'A')],
            vec![right.clone(), right.reversed(), up.clone(), up.reversed()],
        )
    }

    /// A strip of `len` cells along a1, periodic along a1 only, with open ends along a2.
    fn ring(len: usize) -> Ring {
        let cell = square_cell();
        let sites = (0..len)
            .map(|i| Site::new(vector![i as f64, 0.], 'A'))
            .collect();
        let mut bonds = vec![];
        for i in 1..=len {
            let (next, wrap) = if i == len { (1, 1) } else { (i + 1, 0) };
            let b = Bond::new(i, next, 'x', vector![wrap]);
            bonds.push(b.reversed());
            bonds.push(b);
        }
        Lattice::new(matrix![len as f64; 0.], sites, bonds, cell)
    }

    #[test]
    fn test_lattice_contract() {
        let lat = ring(4);
        assert_eq!(lat.num_sites(), 4);
        assert_eq!(lat.num_bonds(), 8);
        assert_eq!(lat.ndims(), 2);
        assert_eq!(lat.a1().unwrap(), vector![4., 0.]);
        assert!(lat.a2().is_err());

        // the generating cell keeps its own, different, shape
        assert_eq!(lat.unitcell().num_sites(), 1);
        assert_eq!(lat.unitcell().num_bonds(), 4);
        assert_eq!(lat.unitcell().a2().unwrap(), vector![0., 1.]);

        assert_eq!(validate(&lat, &ValidationOptions::strict()), Ok(()));
        assert_eq!(validate(lat.unitcell(), &ValidationOptions::strict()), Ok(()));
    }

    #[test]
    fn test_bond_vectors_across_boundary() {
        let lat = ring(3);
        // every bond in the ring is a unit step, including the ones that wrap around
        for v in lat.bond_vectors().unwrap() {
            assert_eq!(v.norm(), 1.);
        }
        let wrapping = Bond::new(3, 1, 'x', vector![1]);
        assert!(wrapping.is_periodic());
        assert_eq!(vector(&wrapping, &lat).unwrap(), vector![1., 0.]);

        // bonds of the unit cell belong to a different family than the lattice's
        let cell_bond = lat.unitcell().bond(1).unwrap();
        assert_eq!(
            vector(cell_bond, &lat),
            Err(LatticeError::IncompatibleTypes {
                expected: 1,
                found: 2
            })
        );
        assert_eq!(vector(cell_bond, lat.unitcell()).unwrap(), vector![1., 0.]);
    }

    #[test]
    fn test_organized_ring() {
        let lat = ring(5);
        let by_from = lat.organized_bonds_from().unwrap();
        let by_to = lat.organized_bonds_to().unwrap();
        for site in 1..=5 {
            assert_eq!(by_from[site].len(), 2);
            assert_eq!(by_to[site].len(), 2);
            assert!(by_from[site].iter().all(|b| b.from() == site));
            assert!(by_to[site].iter().all(|b| b.to() == site));
        }
    }

    #[test]
    fn test_try_new() {
        let lat = ring(2);
        let bad: Result<Ring, _> = Lattice::try_new(
            *lat.lattice_vectors(),
            lat.sites().to_vec(),
            vec![Bond::new(1, 3, 'x', vector![0])],
            lat.unitcell().clone(),
        );
        assert!(bad.is_err());
        let good: Result<Ring, _> = Lattice::try_new(
            *lat.lattice_vectors(),
            lat.sites().to_vec(),
            lat.bonds().to_vec(),
            lat.unitcell().clone(),
        );
        assert_eq!(good, Ok(lat));
    }

    #[test]
    fn test_set_unitcell() {
        let mut lat = ring(2);
        let mut cell = square_cell();
        cell.set_bonds(vec![]);
        lat.set_unitcell(cell);
        assert_eq!(lat.unitcell().num_bonds(), 0);
        assert_eq!(lat.num_bonds(), 4);
    }

    /// How many copies of its unit cell a lattice holds, using only the lattice traits.
    fn num_cells<L, const N: usize, const M: usize>(lat: &L) -> usize
    where
        L: AbstractLattice<2, N, M>,
    {
        lat.num_sites() / lat.unitcell().num_sites()
    }

    #[test]
    fn test_unitcell_through_trait() {
        let lat = ring(4);
        assert_eq!(num_cells(&lat), 4);
        // the cell keeps its own two Bravais vectors while the ring has one
        assert_eq!(lat.unitcell().lattice_vector(2), Ok(vector![0., 1.]));
        assert!(lat.lattice_vector(2).is_err());
    }

    #[test]
    fn test_clone_with() {
        let lat = ring(3);
        assert_eq!(lat.clone_with(LatticePatch::new()), lat);

        let open = lat.clone_with(
            LatticePatch::new().bonds(
                lat.bonds()
                    .iter()
                    .filter(|b| !b.is_periodic())
                    .cloned()
                    .collect(),
            ),
        );
        assert_eq!(open.num_bonds(), 4);
        assert_eq!(lat.num_bonds(), 6);
        assert_eq!(open.unitcell(), lat.unitcell());

        let mut copy = lat.similar();
        copy.set_sites(vec![]);
        copy.set_unitcell(square_cell().clone_with(UnitcellPatch::new().sites(vec![])));
        assert_eq!(lat.num_sites(), 3);
        assert_eq!(lat.unitcell().num_sites(), 1);

        let moved = lat.clone_with(
            LatticePatch::new()
                .lattice_vectors(matrix![6.; 0.])
                .unitcell(square_cell()),
        );
        assert_eq!(moved.a1().unwrap(), vector![6., 0.]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let lat = ring(3);
        let json = serde_json::to_string(&lat).unwrap();
        let back: Ring = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lat);
        assert_eq!(validate(&back, &ValidationOptions::strict()), Ok(()));
    }

    proptest! {
        #[test]
        fn test_clone_is_independent(len in 1usize..8, shift in -5f64..5f64) {
            let lat = ring(len);
            let mut copy = lat.similar();
            let sites = copy
                .sites()
                .iter()
                .map(|s| s.clone_with(SitePatch::new().point(s.point() + SVector::from([shift, 0.]))))
                .collect();
            copy.set_sites(sites);
            prop_assert_eq!(lat.clone(), ring(len));
            prop_assert_eq!(copy.num_sites(), len);
            // translating every site leaves every bond vector unchanged
            prop_assert_eq!(copy.bond_vectors().unwrap().len(), lat.bond_vectors().unwrap().len());
            for (a, b) in copy.bond_vectors().unwrap().iter().zip(lat.bond_vectors().unwrap()) {
                prop_assert!((a - b).norm() < 1e-9);
            }
        }
    }
}
