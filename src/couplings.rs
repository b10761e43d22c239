//! Coupling strengths keyed by bond label. This is the lookup Hamiltonian terms do when they walk a
//! structure's bonds: the label says which species of bond it is, the table says how strong it is.
//! Labels are only required to be comparable, so lookup is a linear scan; there are rarely more
//! than a handful of bond species.

use crate::{bond::AbstractBond, structure::Structure};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BondCouplings<L> {
    entries: Vec<(L, f64)>,
}

impl<L> Default for BondCouplings<L> {
    fn default() -> Self {
        Self { entries: vec![] }
    }
}

impl<L: PartialEq> BondCouplings<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Self::insert`].
    pub fn with(mut self, label: L, strength: f64) -> Self {
        self.insert(label, strength);
        self
    }

    /// Sets the strength for `label`, returning the previous one if there was any.
    pub fn insert(&mut self, label: L, strength: f64) -> Option<f64> {
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, s)) => Some(std::mem::replace(s, strength)),
            None => {
                self.entries.push((label, strength));
                None
            }
        }
    }

    pub fn get(&self, label: &L) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|&(_, s)| s)
    }

    /// The strength of the bond's species, or `None` if it isn't in the table.
    pub fn coupling<B, const N: usize>(&self, bond: &B) -> Option<f64>
    where
        B: AbstractBond<N, Label = L>,
    {
        self.get(bond.label())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels and strengths, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&L, f64)> + '_ {
        self.entries.iter().map(|(l, s)| (l, *s))
    }

    /// The largest coupling magnitude, or 0 for an empty table.
    pub fn energy_scale(&self) -> f64 {
        self.entries
            .iter()
            .map(|(_, s)| s.abs())
            .fold(0., f64::max)
    }

    /// The sum of the couplings of every bond in `structure`. Bonds whose label isn't in the table
    /// contribute nothing.
    pub fn total_on<S, const D: usize, const N: usize>(&self, structure: &S) -> f64
    where
        S: Structure<D, N> + ?Sized,
        S::Bond: AbstractBond<N, Label = L>,
    {
        structure
            .bonds()
            .iter()
            .filter_map(|b| self.coupling(b))
            .sum()
    }
}

/// Adds two coupling tables. Strengths of labels present in both are summed; labels keep the order
/// in which they first appear, `a`'s before `b`'s.
pub fn combine<L: PartialEq + Clone>(a: &BondCouplings<L>, b: &BondCouplings<L>) -> BondCouplings<L> {
    let mut out = a.clone();
    for (label, strength) in b.iter() {
        let total = out.get(label).unwrap_or(0.) + strength;
        out.insert(label.clone(), total);
    }
    out
}
