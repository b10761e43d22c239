//! Optional consistency checks on a structure. Constructing a unit cell or lattice never checks
//! anything by itself; these checks run when asked for, e.g., after reading a structure from an
//! external source.

use tracing::debug;

use crate::{bond::AbstractBond, error::LatticeError, structure::Structure};

/// Which checks [`validate`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationOptions {
    /// Every bond endpoint must be a site of the structure.
    pub check_indices: bool,
    /// Every bond must have a reciprocal bond: endpoints swapped, same label, negated wrap.
    pub check_reciprocal: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            check_indices: true,
            check_reciprocal: false,
        }
    }
}

impl ValidationOptions {
    /// All checks enabled.
    pub fn strict() -> Self {
        Self {
            check_indices: true,
            check_reciprocal: true,
        }
    }

    pub fn with_indices(mut self, check: bool) -> Self {
        self.check_indices = check;
        self
    }

    pub fn with_reciprocal(mut self, check: bool) -> Self {
        self.check_reciprocal = check;
        self
    }
}

/// Checks that every bond's endpoints lie in `1..=num_sites`.
pub fn check_bond_indices<S, const D: usize, const N: usize>(
    structure: &S,
) -> Result<(), LatticeError>
where
    S: Structure<D, N> + ?Sized,
{
    let num_sites = structure.num_sites();
    for bond in structure.bonds() {
        LatticeError::check_index("bond endpoint", bond.from(), num_sites)?;
        LatticeError::check_index("bond endpoint", bond.to(), num_sites)?;
    }
    Ok(())
}

/// Checks that every bond has a reciprocal partner.
pub fn check_reciprocal_bonds<S, const D: usize, const N: usize>(
    structure: &S,
) -> Result<(), LatticeError>
where
    S: Structure<D, N> + ?Sized,
    <S::Bond as AbstractBond<N>>::Label: PartialEq,
{
    let by_from = structure.organized_bonds_from()?;
    for (i, bond) in structure.bonds().iter().enumerate() {
        let partners = by_from
            .get(bond.to())
            .ok_or(LatticeError::IndexOutOfRange {
                what: "bond endpoint",
                index: bond.to(),
                len: by_from.len(),
            })?;
        let has_partner = partners.iter().any(|other| {
            other.to() == bond.from()
                && other.label() == bond.label()
                && *other.wrap() == -bond.wrap()
        });
        if !has_partner {
            return Err(LatticeError::MissingReciprocal {
                index: i + 1,
                from: bond.from(),
                to: bond.to(),
            });
        }
    }
    Ok(())
}

/// Runs the checks `options` asks for, stopping at the first failure.
pub fn validate<S, const D: usize, const N: usize>(
    structure: &S,
    options: &ValidationOptions,
) -> Result<(), LatticeError>
where
    S: Structure<D, N> + ?Sized,
    <S::Bond as AbstractBond<N>>::Label: PartialEq,
{
    debug!(
        num_sites = structure.num_sites(),
        num_bonds = structure.num_bonds(),
        ?options,
        "validating structure"
    );
    if options.check_indices {
        check_bond_indices(structure)?;
    }
    if options.check_reciprocal {
        check_reciprocal_bonds(structure)?;
    }
    Ok(())
}
