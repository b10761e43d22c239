//! Algorithms over any [`Structure`]: grouping bonds by endpoint, and reconstructing the
//! real-space vector a bond represents.

use std::ops::Index;

use nalgebra::SVector;
use tracing::{debug, trace};

use crate::{bond::AbstractBond, error::LatticeError, site::AbstractSite, structure::Structure};

/// Bonds grouped per site. Indexed by 1-based site index, like the bond endpoints themselves:
/// `by_site[1]` holds the bonds of the first site.
#[derive(Debug, Clone, PartialEq)]
pub struct BondsBySite<B> {
    lists: Vec<Vec<B>>,
}

impl<B> BondsBySite<B> {
    /// The number of sites, including those without bonds.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// The bonds of the site at 1-based index `site`, or `None` if there is no such site.
    pub fn get(&self, site: usize) -> Option<&[B]> {
        site.checked_sub(1)
            .and_then(|i| self.lists.get(i))
            .map(Vec::as_slice)
    }

    /// Iterates over `(site, bonds)` pairs in site order, with 1-based site indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[B])> + '_ {
        self.lists
            .iter()
            .enumerate()
            .map(|(i, l)| (i + 1, l.as_slice()))
    }

    /// The total number of bonds over all sites.
    pub fn num_bonds(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    /// The underlying lists, where position `i` holds the bonds of site `i + 1`.
    pub fn into_inner(self) -> Vec<Vec<B>> {
        self.lists
    }
}

impl<B> Index<usize> for BondsBySite<B> {
    type Output = [B];

    /// Panics if `site` is not in `1..=len`.
    fn index(&self, site: usize) -> &[B] {
        match self.get(site) {
            Some(bonds) => bonds,
            None => panic!("site index {} is outside 1..={}", site, self.len()),
        }
    }
}

/// Groups `bonds` by the site `key` picks out, for a structure of `num_sites` sites. Bonds keep
/// their original relative order within each group.
///
/// Two linear passes: the first checks every key and counts the bonds per site, so every group is
/// allocated once at its final size; the second copies the bonds into their groups in order.
pub fn organize_bonds_by<B: Clone>(
    bonds: &[B],
    num_sites: usize,
    key: impl Fn(&B) -> usize,
) -> Result<BondsBySite<B>, LatticeError> {
    let mut counts = vec![0usize; num_sites];
    for bond in bonds {
        let site = key(bond);
        LatticeError::check_index("site", site, num_sites)?;
        counts[site - 1] += 1;
    }

    let mut lists: Vec<Vec<B>> = counts.into_iter().map(Vec::with_capacity).collect();
    for bond in bonds {
        lists[key(bond) - 1].push(bond.clone());
    }

    debug!(
        num_sites,
        num_bonds = bonds.len(),
        "organized bonds by site"
    );
    Ok(BondsBySite { lists })
}

/// The real-space displacement a bond represents within `structure`:
///
/// `point(to) - point(from) + Σ_k wrap[k] * a_k`
///
/// where `a_k` are the structure's Bravais vectors. The bond need not be one of the structure's own,
/// but it must carry the same label type as the structure's bonds. It is incompatible if its wrap
/// length `M` differs from the structure's number of Bravais vectors `N`, and its endpoints must
/// index into the structure's sites.
///
/// ```
/// use latticework::{vector, Bond, Site, Unitcell};
/// use nalgebra::{matrix, vector};
///
/// let uc: Unitcell<Site<&str, 2>, Bond<&str, 2>, 2, 2> = Unitcell::new(
///     matrix![1., 0.; 0., 1.],
///     vec![Site::new(vector![0., 0.], "A"), Site::new(vector![0.5, 0.5], "B")],
///     vec![],
/// );
/// let v = vector(&Bond::new(2, 1, "J", vector![1, 0]), &uc).unwrap();
/// assert_eq!(v, vector![0.5, -0.5]);
/// ```
///
/// A bond labeled with another type belongs to a different family of lattices and is rejected at
/// compile time:
///
/// ```compile_fail
/// use latticework::{vector, Bond, Site, Unitcell};
/// use nalgebra::{matrix, vector};
///
/// let uc: Unitcell<Site<&str, 2>, Bond<&str, 2>, 2, 2> = Unitcell::new(
///     matrix![1., 0.; 0., 1.],
///     vec![Site::new(vector![0., 0.], "A"), Site::new(vector![0.5, 0.5], "B")],
///     vec![],
/// );
/// let _ = vector(&Bond::<u64, 2>::new(2, 1, 7, vector![1, 0]), &uc);
/// ```
pub fn vector<S, B, const D: usize, const N: usize, const M: usize>(
    bond: &B,
    structure: &S,
) -> Result<SVector<f64, D>, LatticeError>
where
    S: Structure<D, N> + ?Sized,
    B: AbstractBond<M, Label = <S::Bond as AbstractBond<N>>::Label>,
{
    if M != N {
        return Err(LatticeError::IncompatibleTypes {
            expected: N,
            found: M,
        });
    }

    let from = structure.site(bond.from())?.point();
    let to = structure.site(bond.to())?.point();
    let basis = structure.lattice_vectors();

    let mut v = to - from;
    for (k, &w) in bond.wrap().iter().enumerate() {
        if w != 0 {
            v += basis.column(k) * (w as f64);
        }
    }

    trace!(from = bond.from(), to = bond.to(), "reconstructed bond vector");
    Ok(v)
}
