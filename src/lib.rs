//! Data model for the lattices of condensed-matter lattice models: labeled [`site::Site`]s,
//! directed [`bond::Bond`]s that may wrap around periodic boundaries, [`unitcell::Unitcell`]s, and
//! [`lattice::Lattice`]s built from them.
//!
//! The algorithms in [`topology`] only see the traits ([`site::AbstractSite`],
//! [`bond::AbstractBond`], [`structure::Structure`]), so alternative storage for any of the
//! entities can be swapped in without touching the code that consumes them.

pub mod bond;
pub mod couplings;
pub mod error;
pub mod lattice;
pub mod similar;
pub mod site;
pub mod structure;
pub mod topology;
pub mod unitcell;
pub mod validation;

pub use bond::{AbstractBond, Bond, BondPatch};
pub use couplings::{combine, BondCouplings};
pub use error::LatticeError;
pub use lattice::{AbstractLattice, Lattice, LatticePatch};
pub use similar::{Patch, Similar};
pub use site::{AbstractSite, Site, SitePatch};
pub use structure::{basis_from_slices, Structure};
pub use topology::{organize_bonds_by, vector, BondsBySite};
pub use unitcell::{AbstractUnitcell, Unitcell, UnitcellPatch};
pub use validation::{validate, ValidationOptions};
