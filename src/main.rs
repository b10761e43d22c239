//! Demo: builds the two-site square cell, a periodic strip made of it, and prints the bond
//! structure of both. Set `RUST_LOG=latticework=debug` to see the library's events.
use latticework::{
    validate, vector, AbstractBond, AbstractLattice, AbstractSite, Bond, BondCouplings, Lattice,
    LatticeError, Site, Structure, Unitcell, ValidationOptions,
};
use nalgebra::{matrix, vector};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Cell = Unitcell<Site<&'static str, 2>, Bond<&'static str, 2>, 2, 2>;
type Strip = Lattice<Site<&'static str, 2>, Bond<&'static str, 1>, Cell, 2, 1, 2>;

fn two_site_cell() -> Cell {
    let inner = Bond::new(1, 2, "J", vector![0, 0]);
    let outer = Bond::new(2, 1, "J", vector![1, 0]);
    Unitcell::new(
        matrix![1., 0.; 0., 1.],
        vec![
            Site::new(vector![0., 0.], "A"),
            Site::new(vector![0.5, 0.5], "B"),
        ],
        vec![inner.reversed(), inner, outer.reversed(), outer],
    )
}

/// Repeats the cell `len` times along a1, keeping a1 periodic and dropping the a2 direction.
fn strip(cell: &Cell, len: usize) -> Result<Strip, LatticeError> {
    let n = cell.num_sites();
    let a1 = cell.a1()?;
    let mut sites = vec![];
    for i in 0..len {
        for s in cell.sites() {
            sites.push(Site::new(s.point() + a1 * i as f64, *s.label()));
        }
    }

    let mut bonds = vec![];
    for i in 0..len {
        for b in cell.bonds() {
            if b.wrap()[1] != 0 {
                continue;
            }
            let target = i as i64 + b.wrap()[0];
            let cell_idx = target.rem_euclid(len as i64) as usize;
            let wrap = target.div_euclid(len as i64);
            bonds.push(Bond::new(
                i * n + b.from(),
                cell_idx * n + b.to(),
                *b.label(),
                vector![wrap],
            ));
        }
    }

    Lattice::try_new(
        matrix![len as f64 * a1.x; len as f64 * a1.y],
        sites,
        bonds,
        cell.clone(),
    )
}

fn report<S: Structure<2, N>, const N: usize>(name: &str, structure: &S) -> Result<(), LatticeError> {
    println!(
        "{name}: {} sites, {} bonds",
        structure.num_sites(),
        structure.num_bonds()
    );
    let by_from = structure.organized_bonds_from()?;
    for (site, bonds) in by_from.iter() {
        for b in bonds {
            let v = vector(b, structure)?;
            println!(
                "  {site:>3} -> {:<3} wrap {:?}  [{:>6.3}, {:>6.3}]",
                b.to(),
                b.wrap().as_slice(),
                v.x,
                v.y
            );
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "latticework=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cell = two_site_cell();
    validate(&cell, &ValidationOptions::strict())?;
    report("unit cell", &cell)?;

    let lattice = strip(&cell, 3)?;
    validate(&lattice, &ValidationOptions::strict())?;
    report("strip", &lattice)?;
    tracing::info!(
        ndims = lattice.ndims(),
        cell_sites = lattice.unitcell().num_sites(),
        "built strip"
    );

    let couplings = BondCouplings::new().with("J", 1.0);
    println!("total coupling on strip: {}", couplings.total_on(&lattice));
    Ok(())
}
