//! End-to-end inference scenarios on small, hand-checked pedigrees.

use std::path::{Path, PathBuf};

use hd_core::config::{GeneTable, InferenceConfig, NetworkParams};
use hd_core::loader::load_population;
use hd_core::pedigree::{Person, Population};
use hd_core::{calculate_by_subsets, calculate_probabilities, infer, Error, GeneCount};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn founders_alone_reproduce_the_prior() {
    let params = NetworkParams::default();
    let population =
        Population::from_people([Person::founder("Arthur"), Person::founder("Molly")]).unwrap();

    let exact = infer(&population, &params, InferenceConfig::exact()).unwrap();
    for posterior in exact.people.values() {
        assert_close(posterior.gene.two, 0.023, 1e-9);
        assert_close(posterior.gene.one, 2.998, 1e-9);
        assert_close(posterior.gene.zero, 96.979, 1e-9);
    }

    let rounded = calculate_probabilities(&population, &params).unwrap();
    let arthur = &rounded["Arthur"];
    assert_eq!(arthur.gene.two, 0.0);
    assert_eq!(arthur.gene.one, 3.0);
    assert_eq!(arthur.gene.zero, 97.0);
    assert_eq!(arthur.expression.present, 0.1);
    assert_eq!(arthur.expression.absent, 99.9);
}

#[test]
fn observed_founder_posterior_follows_bayes_rule() {
    let params = NetworkParams::default();
    let population = Population::from_people([Person::founder("Ron").observed(true)]).unwrap();
    let report = infer(&population, &params, InferenceConfig::exact()).unwrap();

    let evidence = 0.96979 * 0.0008 + 0.02998 * 0.0004 + 0.00023;
    let ron = &report.people["Ron"];
    assert_close(ron.gene.zero, 100.0 * 0.96979 * 0.0008 / evidence, 1e-9);
    assert_close(ron.gene.one, 100.0 * 0.02998 * 0.0004 / evidence, 1e-9);
    assert_close(ron.gene.two, 100.0 * 0.00023 / evidence, 1e-9);
    assert_close(report.evidence_likelihood, evidence, 1e-15);
    assert_eq!(report.worlds_enumerated, 3);
}

#[test]
fn affected_child_raises_parents_carrier_probability() {
    let params = NetworkParams::default();
    let population = Population::from_people([
        Person::founder("Mother"),
        Person::founder("Father"),
        Person::child("Child", "Mother", "Father").observed(true),
    ])
    .unwrap();

    let rounded = calculate_probabilities(&population, &params).unwrap();
    assert_eq!(rounded["Child"].expression.present, 100.0);
    assert_eq!(rounded["Child"].expression.absent, 0.0);

    let exact = infer(&population, &params, InferenceConfig::exact()).unwrap();
    for parent in ["Mother", "Father"] {
        let posterior = &exact.people[parent];
        assert!(posterior.gene.two > 0.023, "{parent}: {:?}", posterior.gene);
        assert!(posterior.gene.one > 2.998, "{parent}: {:?}", posterior.gene);
        assert!(posterior.gene.zero < 96.979, "{parent}: {:?}", posterior.gene);
        assert!(posterior.expression.present > 0.1018);
    }
    assert_close(
        exact.people["Mother"].gene.two,
        exact.people["Father"].gene.two,
        1e-9,
    );
}

#[test]
fn family0_marginals() {
    let params = NetworkParams::default();
    let population = load_population(&fixture("family0.csv")).unwrap();
    let out = calculate_probabilities(&population, &params).unwrap();

    let harry = &out["Harry"];
    assert_eq!(harry.gene.two, 0.3);
    assert_eq!(harry.gene.one, 24.0);
    assert_eq!(harry.gene.zero, 75.7);
    assert_eq!(harry.expression.present, 0.4);
    assert_eq!(harry.expression.absent, 99.6);

    let james = &out["James"];
    assert_eq!(james.gene.get(GeneCount::Two), 22.6);
    assert_eq!(james.expression.present, 100.0);

    let lily = &out["Lily"];
    assert_eq!(lily.gene.zero, 97.0);
    assert_eq!(lily.gene.two, 0.0);
    assert_eq!(lily.expression.absent, 100.0);
}

#[test]
fn json_and_csv_fixtures_agree() {
    let params = NetworkParams::default();
    let csv = load_population(&fixture("family0.csv")).unwrap();
    let json = load_population(&fixture("family0.json")).unwrap();
    assert_eq!(csv, json);
    assert_eq!(
        calculate_probabilities(&csv, &params).unwrap(),
        calculate_probabilities(&json, &params).unwrap()
    );
}

#[test]
fn larger_families_normalize() {
    let params = NetworkParams::default();
    for name in ["family1.csv", "family2.csv"] {
        let population = load_population(&fixture(name)).unwrap();
        let out = calculate_probabilities(&population, &params).unwrap();
        assert_eq!(out.len(), population.len());
        for (person, posterior) in &out {
            assert_close(posterior.gene.total(), 100.0, 0.1 + 1e-9);
            assert_close(posterior.expression.total(), 100.0, 0.1 + 1e-9);
            let observed = population.get(person.as_str()).unwrap().observed_trait;
            match observed {
                Some(true) => assert_eq!(posterior.expression.present, 100.0),
                Some(false) => assert_eq!(posterior.expression.absent, 100.0),
                None => {}
            }
        }
    }
}

#[test]
fn unsatisfiable_evidence_is_an_error() {
    // Nobody can ever express the trait under these tables.
    let params = NetworkParams {
        trait_given_gene: GeneTable::new(0.0, 0.0, 0.0),
        ..NetworkParams::default()
    };
    let population = Population::from_people([
        Person::founder("Mother"),
        Person::founder("Father"),
        Person::child("Child", "Mother", "Father").observed(true),
    ])
    .unwrap();

    let err = calculate_probabilities(&population, &params).unwrap_err();
    assert!(
        matches!(err, Error::UnsatisfiableEvidence { .. }),
        "unexpected error: {err}"
    );
    let err = calculate_by_subsets(&population, &params, &InferenceConfig::default()).unwrap_err();
    assert!(matches!(err, Error::UnsatisfiableEvidence { .. }));
}

#[test]
fn malformed_pedigree_is_an_error() {
    let mut orphan = Person::founder("Harry");
    orphan.father = Some("James".into());
    let population = Population::from_people([orphan, Person::founder("James")]).unwrap();
    let err = calculate_probabilities(&population, &NetworkParams::default()).unwrap_err();
    assert!(matches!(err, Error::MalformedPedigree { .. }));
}

#[test]
fn repeated_runs_are_identical() {
    let params = NetworkParams::default();
    let population = load_population(&fixture("family2.csv")).unwrap();
    let first = infer(&population, &params, InferenceConfig::exact()).unwrap();
    let second = infer(&population, &params, InferenceConfig::exact()).unwrap();
    assert_eq!(first.people, second.people);
    assert_eq!(
        first.evidence_likelihood.to_bits(),
        second.evidence_likelihood.to_bits()
    );
}

#[test]
fn subset_enumeration_matches_engine() {
    let params = NetworkParams::default();
    let population = load_population(&fixture("family0.csv")).unwrap();
    let config = InferenceConfig::exact();
    let by_subsets = calculate_by_subsets(&population, &params, &config).unwrap();
    let by_engine = infer(&population, &params, config).unwrap().people;
    assert_eq!(by_subsets.len(), by_engine.len());
    for (name, expected) in &by_engine {
        let actual = &by_subsets[name];
        for count in GeneCount::ALL {
            assert_close(actual.gene.get(count), expected.gene.get(count), 1e-9);
        }
        assert_close(actual.expression.present, expected.expression.present, 1e-9);
    }
}
