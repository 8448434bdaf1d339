//! Joint probability of a single World.
//!
//! The probability of a World is the product, over every person, of a gene
//! factor and a trait factor. Founders draw their gene count from the prior;
//! children draw one allele from each parent independently.

use std::collections::BTreeSet;

use hd_common::{GeneCount, PersonName, Result};
use hd_config::NetworkParams;

use crate::pedigree::{Pedigree, Population};
use crate::world::World;

/// P(child gene count | parents' gene counts).
pub fn child_gene_probability(
    params: &NetworkParams,
    child: GeneCount,
    mother: GeneCount,
    father: GeneCount,
) -> f64 {
    let t_m = params.transmission(mother);
    let t_f = params.transmission(father);
    match child {
        GeneCount::Zero => (1.0 - t_m) * (1.0 - t_f),
        GeneCount::One => t_m * (1.0 - t_f) + (1.0 - t_m) * t_f,
        GeneCount::Two => t_m * t_f,
    }
}

/// Joint probability of `world` under the network.
///
/// `world` must have one entry per node of `pedigree`.
pub fn world_probability(pedigree: &Pedigree, params: &NetworkParams, world: &World) -> f64 {
    debug_assert_eq!(pedigree.len(), world.len());
    pedigree
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let count = world.gene(i);
            let gene_factor = match node.parents {
                None => params.prior(count),
                Some((m, f)) => child_gene_probability(params, count, world.gene(m), world.gene(f)),
            };
            gene_factor * params.trait_probability(count, world.has_trait(i))
        })
        .product()
}

/// Joint probability of the World described by the three sets.
///
/// People in neither `one_gene` nor `two_genes` carry zero copies; people
/// outside `have_trait` do not express the trait.
pub fn joint_probability(
    population: &Population,
    one_gene: &BTreeSet<PersonName>,
    two_genes: &BTreeSet<PersonName>,
    have_trait: &BTreeSet<PersonName>,
    params: &NetworkParams,
) -> Result<f64> {
    let pedigree = population.compile()?;
    let world = World::from_sets(&pedigree, one_gene, two_genes, have_trait)?;
    Ok(world_probability(&pedigree, params, &world))
}
