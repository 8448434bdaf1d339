//! Population and pedigree structure.
//!
//! A [`Population`] is the caller-facing map of named individuals. Before
//! inference it is validated and compiled into a [`Pedigree`]: a dense,
//! name-sorted node list where parents are referenced by index.

use std::collections::BTreeMap;

use hd_common::{Error, PersonName, Result};
use serde::{Deserialize, Serialize};

/// One individual and the evidence observed about them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: PersonName,

    #[serde(default)]
    pub mother: Option<PersonName>,

    #[serde(default)]
    pub father: Option<PersonName>,

    /// `Some` when the trait was directly observed.
    #[serde(default, rename = "trait")]
    pub observed_trait: Option<bool>,
}

impl Person {
    /// An individual with no recorded parents.
    pub fn founder(name: impl Into<PersonName>) -> Self {
        Self {
            name: name.into(),
            mother: None,
            father: None,
            observed_trait: None,
        }
    }

    pub fn child(
        name: impl Into<PersonName>,
        mother: impl Into<PersonName>,
        father: impl Into<PersonName>,
    ) -> Self {
        Self {
            name: name.into(),
            mother: Some(mother.into()),
            father: Some(father.into()),
            observed_trait: None,
        }
    }

    /// Attach an observation of the trait.
    pub fn observed(mut self, has_trait: bool) -> Self {
        self.observed_trait = Some(has_trait);
        self
    }

    pub fn is_founder(&self) -> bool {
        self.mother.is_none() && self.father.is_none()
    }
}

/// Named individuals with their parent links and evidence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Population {
    people: BTreeMap<PersonName, Person>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list of people, rejecting duplicate names.
    pub fn from_people(people: impl IntoIterator<Item = Person>) -> Result<Self> {
        let mut population = Self::new();
        for person in people {
            population.insert(person)?;
        }
        Ok(population)
    }

    pub fn insert(&mut self, person: Person) -> Result<()> {
        if self.people.contains_key(&person.name) {
            return Err(Error::malformed(
                person.name.as_str(),
                "appears more than once",
            ));
        }
        self.people.insert(person.name.clone(), person);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Person> {
        self.people.get(name)
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &PersonName> {
        self.people.keys()
    }

    /// People in name order.
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    /// Check the structural invariants without compiling.
    pub fn validate(&self) -> Result<()> {
        self.compile().map(|_| ())
    }

    /// Validate and compile into index form.
    ///
    /// Rejects a person with exactly one parent, a parent missing from the
    /// population, a person listed as their own parent, identical mother and
    /// father, and ancestry cycles.
    pub fn compile(&self) -> Result<Pedigree> {
        let names: Vec<PersonName> = self.people.keys().cloned().collect();
        let index_of = |name: &PersonName| names.binary_search(name).ok();

        let mut nodes = Vec::with_capacity(names.len());
        for person in self.people.values() {
            let who = person.name.as_str();
            let parents = match (&person.mother, &person.father) {
                (None, None) => None,
                (Some(_), None) => return Err(Error::malformed(who, "mother set without father")),
                (None, Some(_)) => return Err(Error::malformed(who, "father set without mother")),
                (Some(mother), Some(father)) => {
                    if mother == &person.name || father == &person.name {
                        return Err(Error::malformed(who, "listed as their own parent"));
                    }
                    if mother == father {
                        return Err(Error::malformed(
                            who,
                            format!("'{mother}' is both mother and father"),
                        ));
                    }
                    let m = index_of(mother).ok_or_else(|| {
                        Error::malformed(who, format!("mother '{mother}' is not in the population"))
                    })?;
                    let f = index_of(father).ok_or_else(|| {
                        Error::malformed(who, format!("father '{father}' is not in the population"))
                    })?;
                    Some((m, f))
                }
            };
            nodes.push(Node {
                parents,
                observed_trait: person.observed_trait,
            });
        }

        let pedigree = Pedigree { names, nodes };
        pedigree.check_acyclic()?;
        Ok(pedigree)
    }
}

/// A validated person in index form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    /// (mother, father) indices.
    pub parents: Option<(usize, usize)>,
    pub observed_trait: Option<bool>,
}

/// Compiled pedigree; node `i` belongs to `names[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pedigree {
    names: Vec<PersonName>,
    nodes: Vec<Node>,
}

impl Pedigree {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn names(&self) -> &[PersonName] {
        &self.names
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.binary_search_by(|n| n.as_str().cmp(name)).ok()
    }

    fn check_acyclic(&self) -> Result<()> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            New,
            Active,
            Done,
        }

        let mut marks = vec![Mark::New; self.nodes.len()];
        for start in 0..self.nodes.len() {
            if marks[start] != Mark::New {
                continue;
            }
            // Iterative DFS over parent edges: (node, next parent slot).
            let mut stack = vec![(start, 0usize)];
            marks[start] = Mark::Active;
            while let Some((node, slot)) = stack.pop() {
                let parent = match (self.nodes[node].parents, slot) {
                    (Some((m, _)), 0) => Some(m),
                    (Some((_, f)), 1) => Some(f),
                    _ => None,
                };
                let Some(parent) = parent else {
                    marks[node] = Mark::Done;
                    continue;
                };
                stack.push((node, slot + 1));
                match marks[parent] {
                    Mark::New => {
                        marks[parent] = Mark::Active;
                        stack.push((parent, 0));
                    }
                    Mark::Active => {
                        return Err(Error::malformed(
                            self.names[parent].as_str(),
                            "is their own ancestor",
                        ));
                    }
                    Mark::Done => {}
                }
            }
        }
        Ok(())
    }
}
