//! Subset-driven enumeration.
//!
//! Walks trait subsets, then one-copy subsets, then two-copy subsets of the
//! remaining people, skipping trait subsets that contradict the evidence.
//! It visits exactly the Worlds the sharded engine visits and serves as the
//! cross-check for it.

use std::collections::BTreeSet;

use hd_common::{PersonName, Result};
use hd_config::{InferenceConfig, NetworkParams};
use hd_math::powerset;
use tracing::debug;

use super::accumulator::MarginalAccumulator;
use super::engine::check_population_size;
use crate::joint::world_probability;
use crate::pedigree::Population;
use crate::report::Posteriors;
use crate::world::World;

/// Marginals computed by explicit subset enumeration.
pub fn calculate_by_subsets(
    population: &Population,
    params: &NetworkParams,
    config: &InferenceConfig,
) -> Result<Posteriors> {
    config.validate()?;
    params.validate()?;
    let pedigree = population.compile()?;
    check_population_size(pedigree.len(), config.max_population)?;

    let names: BTreeSet<PersonName> = pedigree.names().iter().cloned().collect();
    let subsets = powerset(&names);
    let mut acc = MarginalAccumulator::new(pedigree.len());

    for have_trait in &subsets {
        let fails_evidence = population.people().any(|person| {
            person
                .observed_trait
                .is_some_and(|seen| seen != have_trait.contains(&person.name))
        });
        if fails_evidence {
            continue;
        }

        for one_gene in &subsets {
            let rest: BTreeSet<PersonName> = names.difference(one_gene).cloned().collect();
            for two_genes in powerset(&rest) {
                let world = World::from_sets(&pedigree, one_gene, &two_genes, have_trait)?;
                acc.add(&world, world_probability(&pedigree, params, &world));
            }
        }
    }

    debug!(worlds = acc.worlds(), "subset enumeration complete");
    acc.finish(&pedigree, config.precision)
}
