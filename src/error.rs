//! Errors raised by the lattice data model. Every variant is a programmer-error-class failure: it
//! aborts the single operation that detected it and is never retried internally.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LatticeError {
    /// A point, wrap or set of Bravais vectors has the wrong number of components for the declared
    /// dimension.
    #[error("Expected {expected} components for {what}, got {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// A 1-based index lies outside `1..=len`.
    #[error("{what} index {index} is outside 1..={len}")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
    /// A bond was used with a structure whose number of Bravais vectors doesn't match the length of
    /// the bond's wrap, i.e., the bond belongs to a different lattice family.
    #[error("Bond with wrap of length {found} used with a structure of {expected} lattice vectors")]
    IncompatibleTypes { expected: usize, found: usize },
    /// A bond has no partner going the other way with the same label and the negated wrap.
    #[error("Bond {index} ({from} -> {to}) has no reciprocal bond")]
    MissingReciprocal { index: usize, from: usize, to: usize },
}

impl LatticeError {
    /// Checks that `index` is a valid 1-based index into a list of `len` elements.
    pub(crate) fn check_index(what: &'static str, index: usize, len: usize) -> Result<(), Self> {
        if (1..=len).contains(&index) {
            Ok(())
        } else {
            Err(Self::IndexOutOfRange { what, index, len })
        }
    }

    /// Checks that a slice of `found` components can fill a `expected`-component vector.
    pub(crate) fn check_dim(what: &'static str, expected: usize, found: usize) -> Result<(), Self> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::DimensionMismatch {
                what,
                expected,
                found,
            })
        }
    }
}
