//! Unit cells: the minimal repeating unit of a lattice model.

use nalgebra::SMatrix;

use crate::{
    bond::AbstractBond,
    error::LatticeError,
    similar::{Patch, Similar},
    site::AbstractSite,
    structure::Structure,
    validation::check_bond_indices,
};

/// Marker for structures that are unit cells rather than expanded lattices. A lattice's generating
/// cell must implement it.
pub trait AbstractUnitcell<const D: usize, const N: usize>: Structure<D, N> {}

/// A finite basis of sites and bonds, repeated along `N` Bravais vectors in `D` dimensions. Bond
/// endpoints index into this cell's own site list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unitcell<S, B, const D: usize, const N: usize> {
    lattice_vectors: SMatrix<f64, D, N>,
    sites: Vec<S>,
    bonds: Vec<B>,
}

impl<S, B, const D: usize, const N: usize> Unitcell<S, B, D, N> {
    /// Assembles a unit cell as given. Bond endpoints are not checked here: use [`Self::try_new`]
    /// or [`crate::validation::validate`] for that.
    pub fn new(lattice_vectors: SMatrix<f64, D, N>, sites: Vec<S>, bonds: Vec<B>) -> Self {
        Self {
            lattice_vectors,
            sites,
            bonds,
        }
    }
}

impl<S, B, const D: usize, const N: usize> Unitcell<S, B, D, N>
where
    S: AbstractSite<D>,
    B: AbstractBond<N>,
{
    /// Assembles a unit cell, failing if any bond refers to a site that doesn't exist.
    pub fn try_new(
        lattice_vectors: SMatrix<f64, D, N>,
        sites: Vec<S>,
        bonds: Vec<B>,
    ) -> Result<Self, LatticeError> {
        let uc = Self::new(lattice_vectors, sites, bonds);
        check_bond_indices(&uc)?;
        Ok(uc)
    }
}

impl<S, B, const D: usize, const N: usize> Structure<D, N> for Unitcell<S, B, D, N>
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

impl<S, B, const D: usize, const N: usize> AbstractUnitcell<D, N> for Unitcell<S, B, D, N>
where
    S: AbstractSite<D>,
    B: AbstractBond<N>,
{
}

impl<S: Clone, B: Clone, const D: usize, const N: usize> Similar for Unitcell<S, B, D, N> {}

/// Overrides for [`Unitcell::clone_with`](Similar::clone_with).
#[derive(Debug, Clone)]
pub struct UnitcellPatch<S, B, const D: usize, const N: usize> {
    lattice_vectors: Option<SMatrix<f64, D, N>>,
    sites: Option<Vec<S>>,
    bonds: Option<Vec<B>>,
}

impl<S, B, const D: usize, const N: usize> Default for UnitcellPatch<S, B, D, N> {
    fn default() -> Self {
        Self {
            lattice_vectors: None,
            sites: None,
            bonds: None,
        }
    }
}

impl<S, B, const D: usize, const N: usize> UnitcellPatch<S, B, D, N> {
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
}

impl<S, B, const D: usize, const N: usize> Patch<Unitcell<S, B, D, N>>
    for UnitcellPatch<S, B, D, N>
{
    fn apply(self, target: &mut Unitcell<S, B, D, N>) {
        if let Some(lattice_vectors) = self.lattice_vectors {
            target.lattice_vectors = lattice_vectors;
        }
        if let Some(sites) = self.sites {
            target.sites = sites;
        }
        if let Some(bonds) = self.bonds {
            target.bonds = bonds;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bond::Bond,
        site::Site,
        structure::basis_from_slices,
        topology::vector,
    };
    use approx::assert_relative_eq;
    use nalgebra::{matrix, vector};
    use pretty_assertions::assert_eq;

    type Cell = Unitcell<Site<String, 2>, Bond<String, 2>, 2, 2>;

    fn square_two_site() -> Cell {
        Unitcell::new(
            matrix![1., 0.; 0., 1.],
            vec![
                Site::new(vector![0., 0.], "A".into()),
                Site::new(vector![0.5, 0.5], "B".into()),
            ],
            vec![
                Bond::new(1, 2, "J".into(), vector![0, 0]),
                Bond::new(2, 1, "J".into(), vector![1, 0]),
            ],
        )
    }

    #[test]
    fn test_two_site_scenario() {
        let uc = square_two_site();
        assert_eq!(uc.num_sites(), 2);
        assert_eq!(uc.num_bonds(), 2);

        let by_from = uc.organized_bonds_from().unwrap();
        assert_eq!(by_from[1], [Bond::new(1, 2, "J".into(), vector![0, 0])]);
        assert_eq!(by_from[2], [Bond::new(2, 1, "J".into(), vector![1, 0])]);

        // [0, 0] - [0.5, 0.5] + [1, 0]
        let b2 = uc.bond(2).unwrap();
        assert_eq!(vector(b2, &uc).unwrap(), vector![0.5, -0.5]);
    }

    #[test]
    fn test_accessors() {
        let uc = square_two_site();
        assert_eq!(uc.site(2).unwrap().label(), "B");
        assert_eq!(uc.bond(1).unwrap().to(), 2);
        assert_eq!(
            uc.site(3),
            Err(LatticeError::IndexOutOfRange {
                what: "site",
                index: 3,
                len: 2
            })
        );
        assert!(uc.site(0).is_err());
        assert!(uc.bond(3).is_err());

        assert_eq!(uc.a1().unwrap(), vector![1., 0.]);
        assert_eq!(uc.a2().unwrap(), vector![0., 1.]);
        assert_eq!(
            uc.a3(),
            Err(LatticeError::IndexOutOfRange {
                what: "lattice vector",
                index: 3,
                len: 2
            })
        );

        let site_labels: Vec<&str> = uc.site_labels().into_iter().map(String::as_str).collect();
        assert_eq!(site_labels, vec!["A", "B"]);
        assert_eq!(uc.bond_labels(), vec![&"J".to_string()]);
    }

    #[test]
    fn test_setters_replace_lists() {
        let mut uc = square_two_site();
        uc.set_sites(vec![Site::new(vector![0., 0.], "A".into())]);
        uc.set_bonds(vec![Bond::new(1, 1, "K".into(), vector![0, 1])]);
        uc.set_lattice_vectors(matrix![2., 0.; 0., 3.]);
        assert_eq!(uc.num_sites(), 1);
        assert_eq!(uc.bond_labels(), vec![&"K".to_string()]);
        assert_eq!(uc.bond_vectors().unwrap(), vec![vector![0., 3.]]);
    }

    #[test]
    fn test_try_new() {
        let good = square_two_site();
        let rebuilt = Cell::try_new(
            *good.lattice_vectors(),
            good.sites().to_vec(),
            good.bonds().to_vec(),
        )
        .unwrap();
        assert_eq!(rebuilt, good);

        let bad = Cell::try_new(
            *good.lattice_vectors(),
            good.sites().to_vec(),
            vec![Bond::new(1, 5, "J".into(), vector![0, 0])],
        );
        assert_eq!(
            bad,
            Err(LatticeError::IndexOutOfRange {
                what: "bond endpoint",
                index: 5,
                len: 2
            })
        );
    }

    #[test]
    fn test_from_untyped_data() {
        // the shape of data handed over by a file reader
        let basis = basis_from_slices::<3, 3>(&[
            vec![0., 0.5, 0.5],
            vec![0.5, 0., 0.5],
            vec![0.5, 0.5, 0.],
        ])
        .unwrap();
        let sites = vec![Site::from_slice(&[0., 0., 0.], 1u8).unwrap()];
        let bonds = [[1, 0, 0], [0, 1, 0], [0, 0, 1], [-1, 1, 0]]
            .iter()
            .map(|w| Bond::from_slice(1, 1, 1u8, w))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        let fcc = Unitcell::try_new(basis, sites, bonds).unwrap();

        let lengths: Vec<f64> = fcc
            .bond_vectors()
            .unwrap()
            .iter()
            .map(|v| v.norm())
            .collect();
        for l in lengths {
            assert_relative_eq!(l, 0.5f64.sqrt(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_clone_with() {
        let uc = square_two_site();
        let copy = uc.similar();
        assert_eq!(copy, uc);

        let mut bare = uc.clone_with(UnitcellPatch::new().bonds(vec![]));
        assert_eq!(bare.num_bonds(), 0);
        assert_eq!(bare.sites(), uc.sites());
        bare.set_sites(vec![]);
        assert_eq!(uc.num_sites(), 2);

        let stretched = uc.similar_with(|c| c.set_lattice_vectors(c.lattice_vectors() * 2.));
        assert_eq!(stretched.a1().unwrap(), vector![2., 0.]);
        assert_eq!(uc.a1().unwrap(), vector![1., 0.]);
    }
}
