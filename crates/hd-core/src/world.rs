//! Complete gene/trait assignments and the space of them.
//!
//! A [`World`] gives every node of a [`Pedigree`] a gene count and a trait
//! value. The [`WorldSpace`] numbers every World consistent with the evidence
//! as a mixed-radix index: each person contributes one digit whose radix is
//! three gene counts times the trait values their evidence allows.

use std::collections::BTreeSet;
use std::ops::Range;

use hd_common::{Error, GeneCount, PersonName, Result};
use hd_math::MixedRadix;

use crate::pedigree::Pedigree;

const BOTH_TRAITS: [bool; 2] = [false, true];
const ONLY_ABSENT: [bool; 1] = [false];
const ONLY_PRESENT: [bool; 1] = [true];

/// 6^24 is the largest unconstrained space that fits a `u64` index.
pub const MAX_INDEXABLE_PEOPLE: usize = 24;

/// One assignment of gene count and trait to every node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    genes: Vec<GeneCount>,
    traits: Vec<bool>,
}

impl World {
    /// All zero-copy, trait-free assignment for `len` people.
    pub fn baseline(len: usize) -> Self {
        Self {
            genes: vec![GeneCount::Zero; len],
            traits: vec![false; len],
        }
    }

    pub fn new(genes: Vec<GeneCount>, traits: Vec<bool>) -> Result<Self> {
        if genes.len() != traits.len() {
            return Err(Error::InvalidWorld(format!(
                "{} gene assignments but {} trait assignments",
                genes.len(),
                traits.len()
            )));
        }
        Ok(Self { genes, traits })
    }

    /// Build from the set representation: names in `one_gene` carry one copy,
    /// names in `two_genes` carry two, everyone else none.
    pub fn from_sets(
        pedigree: &Pedigree,
        one_gene: &BTreeSet<PersonName>,
        two_genes: &BTreeSet<PersonName>,
        have_trait: &BTreeSet<PersonName>,
    ) -> Result<Self> {
        let mut world = Self::baseline(pedigree.len());
        let lookup = |name: &PersonName, set: &str| {
            pedigree.index_of(name.as_str()).ok_or_else(|| {
                Error::InvalidWorld(format!("{set} names '{name}', who is not in the population"))
            })
        };
        for name in one_gene {
            world.genes[lookup(name, "one_gene")?] = GeneCount::One;
        }
        for name in two_genes {
            if one_gene.contains(name) {
                return Err(Error::InvalidWorld(format!(
                    "'{name}' is in both one_gene and two_genes"
                )));
            }
            world.genes[lookup(name, "two_genes")?] = GeneCount::Two;
        }
        for name in have_trait {
            world.traits[lookup(name, "have_trait")?] = true;
        }
        Ok(world)
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn gene(&self, index: usize) -> GeneCount {
        self.genes[index]
    }

    pub fn has_trait(&self, index: usize) -> bool {
        self.traits[index]
    }

    pub fn genes(&self) -> &[GeneCount] {
        &self.genes
    }

    pub fn traits(&self) -> &[bool] {
        &self.traits
    }

    /// True when every observed trait matches this World.
    pub fn matches_evidence(&self, pedigree: &Pedigree) -> bool {
        pedigree
            .nodes()
            .iter()
            .zip(&self.traits)
            .all(|(node, &has)| node.observed_trait.map_or(true, |seen| seen == has))
    }
}

/// Every World consistent with a pedigree's evidence.
#[derive(Debug, Clone)]
pub struct WorldSpace {
    radix: MixedRadix,
    trait_choices: Vec<&'static [bool]>,
}

impl WorldSpace {
    /// Returns `PopulationTooLarge` if the space cannot be indexed by `u64`.
    pub fn new(pedigree: &Pedigree) -> Result<Self> {
        let trait_choices: Vec<&'static [bool]> = pedigree
            .nodes()
            .iter()
            .map(|node| match node.observed_trait {
                None => &BOTH_TRAITS[..],
                Some(false) => &ONLY_ABSENT[..],
                Some(true) => &ONLY_PRESENT[..],
            })
            .collect();
        let radices = trait_choices
            .iter()
            .map(|choices| (GeneCount::ALL.len() * choices.len()) as u32)
            .collect();
        let radix = MixedRadix::new(radices).ok_or(Error::PopulationTooLarge {
            size: pedigree.len(),
            limit: MAX_INDEXABLE_PEOPLE,
        })?;
        Ok(Self {
            radix,
            trait_choices,
        })
    }

    /// Number of Worlds consistent with the evidence.
    pub fn total(&self) -> u64 {
        self.radix.total()
    }

    /// Split the index space into at most `shards` contiguous ranges.
    pub fn shard_ranges(&self, shards: usize) -> Vec<Range<u64>> {
        self.radix.shard_ranges(shards)
    }

    /// Visit the Worlds in `range` in index order.
    ///
    /// `visit` returns `false` to stop early; the return value is the number
    /// of Worlds visited.
    pub fn walk<F>(&self, range: Range<u64>, mut visit: F) -> u64
    where
        F: FnMut(&World) -> bool,
    {
        if range.start >= range.end || range.start >= self.total() {
            return 0;
        }
        let mut digits = vec![0u32; self.radix.len()];
        self.radix.decode(range.start, &mut digits);
        let mut world = World::baseline(self.radix.len());
        let mut visited = 0u64;
        let end = range.end.min(self.total());
        for _ in range.start..end {
            self.fill(&digits, &mut world);
            visited += 1;
            if !visit(&world) {
                break;
            }
            self.radix.increment(&mut digits);
        }
        visited
    }

    fn fill(&self, digits: &[u32], world: &mut World) {
        for (i, &digit) in digits.iter().enumerate() {
            let digit = digit as usize;
            world.genes[i] = GeneCount::ALL[digit % 3];
            world.traits[i] = self.trait_choices[i][digit / 3];
        }
    }
}
