//! Per-person marginal accumulation.
//!
//! Each consistent World adds its joint probability to one gene bucket and
//! one trait bucket per person. Accumulators from separate shards merge by
//! plain addition.

use hd_common::{Error, Result};
use hd_math::{normalize_percent, round_places};

use crate::pedigree::Pedigree;
use crate::report::{GeneDistribution, PersonPosterior, Posteriors, TraitDistribution};
use crate::world::World;

/// Unnormalized marginal mass for every person.
#[derive(Debug, Clone, PartialEq)]
pub struct MarginalAccumulator {
    /// Indexed by gene count.
    genes: Vec<[f64; 3]>,
    /// Index 0 is no-trait, 1 is trait.
    traits: Vec<[f64; 2]>,
    evidence_mass: f64,
    worlds: u64,
}

impl MarginalAccumulator {
    pub fn new(people: usize) -> Self {
        Self {
            genes: vec![[0.0; 3]; people],
            traits: vec![[0.0; 2]; people],
            evidence_mass: 0.0,
            worlds: 0,
        }
    }

    /// Record one World with joint probability `p`.
    pub fn add(&mut self, world: &World, p: f64) {
        for (i, (gene, traits)) in self.genes.iter_mut().zip(self.traits.iter_mut()).enumerate() {
            gene[world.gene(i).index()] += p;
            traits[usize::from(world.has_trait(i))] += p;
        }
        self.evidence_mass += p;
        self.worlds += 1;
    }

    /// Fold another shard's totals into this one.
    pub fn merge(&mut self, other: &MarginalAccumulator) {
        debug_assert_eq!(self.genes.len(), other.genes.len());
        for (mine, theirs) in self.genes.iter_mut().zip(&other.genes) {
            for (a, b) in mine.iter_mut().zip(theirs) {
                *a += b;
            }
        }
        for (mine, theirs) in self.traits.iter_mut().zip(&other.traits) {
            for (a, b) in mine.iter_mut().zip(theirs) {
                *a += b;
            }
        }
        self.evidence_mass += other.evidence_mass;
        self.worlds += other.worlds;
    }

    /// Worlds recorded so far.
    pub fn worlds(&self) -> u64 {
        self.worlds
    }

    /// Total joint mass recorded so far.
    pub fn evidence_mass(&self) -> f64 {
        self.evidence_mass
    }

    /// Normalize to percent and round to `precision` decimals.
    ///
    /// A person whose gene or trait buckets carry no mass means no World
    /// compatible with the evidence is possible: `UnsatisfiableEvidence`.
    pub fn finish(&self, pedigree: &Pedigree, precision: Option<u32>) -> Result<Posteriors> {
        let round = |v: f64| precision.map_or(v, |places| round_places(v, places));
        let mut out = Posteriors::new();
        for (i, name) in pedigree.names().iter().enumerate() {
            let unsatisfiable = |distribution: &'static str| Error::UnsatisfiableEvidence {
                person: name.to_string(),
                distribution,
            };
            let gene = normalize_percent(&self.genes[i]).ok_or_else(|| unsatisfiable("gene"))?;
            let traits =
                normalize_percent(&self.traits[i]).ok_or_else(|| unsatisfiable("trait"))?;
            out.insert(
                name.clone(),
                PersonPosterior {
                    gene: GeneDistribution {
                        two: round(gene[2]),
                        one: round(gene[1]),
                        zero: round(gene[0]),
                    },
                    expression: TraitDistribution {
                        present: round(traits[1]),
                        absent: round(traits[0]),
                    },
                },
            );
        }
        Ok(out)
    }
}
