//! Conditional probability tables of the inheritance network.
//!
//! Each person contributes three variables: a gene copy count, the copies
//! passed on to children, and trait expression. The table shapes are fixed;
//! only their values are configurable.

use hd_common::GeneCount;
use serde::{Deserialize, Serialize};

use crate::validate::{check_probability, ValidationError};

/// Tolerance used when checking that the founder prior sums to one.
pub const PRIOR_SUM_TOLERANCE: f64 = 1e-6;

/// Complete network parameter file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkParams {
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    /// P(gene count) for founders.
    pub gene_prior: GeneTable,

    /// P(trait = true | gene count).
    pub trait_given_gene: GeneTable,

    /// Probability that a transmitted allele flips state.
    pub mutation_rate: f64,
}

/// One value per gene copy count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneTable {
    pub zero: f64,
    pub one: f64,
    pub two: f64,

    #[serde(rename = "_comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl GeneTable {
    pub fn new(zero: f64, one: f64, two: f64) -> Self {
        Self {
            zero,
            one,
            two,
            comment: None,
        }
    }

    pub fn get(&self, count: GeneCount) -> f64 {
        match count {
            GeneCount::Zero => self.zero,
            GeneCount::One => self.one,
            GeneCount::Two => self.two,
        }
    }

    pub fn sum(&self) -> f64 {
        self.zero + self.one + self.two
    }

    fn validate(&self, field: &str) -> Result<(), ValidationError> {
        for count in GeneCount::ALL {
            check_probability(&format!("{field}[{count}]"), self.get(count))?;
        }
        Ok(())
    }
}

impl NetworkParams {
    /// Load parameters from a JSON file and validate them.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let params = Self::parse_json(&content)?;
        params.validate()?;
        Ok(params)
    }

    /// Parse parameters from a JSON string.
    pub fn parse_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Semantic checks: every entry is a probability and the prior is normalized.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !hd_common::schema::is_compatible(&self.schema_version) {
            return Err(ValidationError::SchemaVersion {
                found: self.schema_version.clone(),
                expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            });
        }
        self.gene_prior.validate("gene_prior")?;
        self.trait_given_gene.validate("trait_given_gene")?;
        check_probability("mutation_rate", self.mutation_rate)?;

        let sum = self.gene_prior.sum();
        if (sum - 1.0).abs() > PRIOR_SUM_TOLERANCE {
            return Err(ValidationError::NotNormalized {
                field: "gene_prior".to_string(),
                sum,
            });
        }
        Ok(())
    }

    /// Prior probability that a founder carries `count` copies.
    pub fn prior(&self, count: GeneCount) -> f64 {
        self.gene_prior.get(count)
    }

    /// P(trait assignment | gene count).
    pub fn trait_probability(&self, count: GeneCount, has_trait: bool) -> f64 {
        let p = self.trait_given_gene.get(count);
        if has_trait {
            p
        } else {
            1.0 - p
        }
    }

    /// Probability that a parent with `count` copies passes a mutated allele on.
    ///
    /// A carrier of one copy hands down either allele with equal chance, and
    /// the two mutation directions cancel out, so the result is exactly 1/2.
    pub fn transmission(&self, count: GeneCount) -> f64 {
        match count {
            GeneCount::Zero => self.mutation_rate,
            GeneCount::One => 0.5,
            GeneCount::Two => 1.0 - self.mutation_rate,
        }
    }
}

/// Embedded default parameters.
const DEFAULT_PARAMS_JSON: &str = include_str!("schemas/params.default.json");

impl Default for NetworkParams {
    fn default() -> Self {
        // The embedded file is covered by `params_default_loads`.
        Self::parse_json(DEFAULT_PARAMS_JSON).expect("Embedded default params JSON is invalid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn params_default_loads() {
        let params = NetworkParams::default();
        assert_eq!(params.schema_version, "1.0.0");
        params.validate().unwrap();
    }

    #[test]
    fn default_tables_match_published_values() {
        let params = NetworkParams::default();
        assert!(approx_eq(params.prior(GeneCount::Two), 0.00023));
        assert!(approx_eq(params.prior(GeneCount::One), 0.02998));
        assert!(approx_eq(params.prior(GeneCount::Zero), 0.96979));
        assert!(approx_eq(params.trait_probability(GeneCount::Two, true), 1.0));
        assert!(approx_eq(params.trait_probability(GeneCount::Two, false), 0.0));
        assert!(approx_eq(params.trait_probability(GeneCount::One, false), 0.9996));
        assert!(approx_eq(params.trait_probability(GeneCount::Zero, true), 0.0008));
        assert!(approx_eq(params.mutation_rate, 1.1e-8));
    }

    #[test]
    fn transmission_by_count() {
        let params = NetworkParams::default();
        assert!(approx_eq(params.transmission(GeneCount::Zero), 1.1e-8));
        assert!(approx_eq(params.transmission(GeneCount::One), 0.5));
        assert!(approx_eq(params.transmission(GeneCount::Two), 1.0 - 1.1e-8));
    }

    #[test]
    fn prior_must_sum_to_one() {
        let mut params = NetworkParams::default();
        params.gene_prior.zero = 0.5;
        assert!(matches!(
            params.validate(),
            Err(ValidationError::NotNormalized { .. })
        ));
    }

    #[test]
    fn rejects_probability_out_of_range() {
        let mut params = NetworkParams::default();
        params.trait_given_gene.one = 1.5;
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("trait_given_gene[1]"));

        let mut params = NetworkParams::default();
        params.mutation_rate = -1e-9;
        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_incompatible_schema() {
        let mut params = NetworkParams::default();
        params.schema_version = "2.0.0".into();
        assert!(matches!(
            params.validate(),
            Err(ValidationError::SchemaVersion { .. })
        ));
    }

    #[test]
    fn parse_invalid_json() {
        assert!(NetworkParams::parse_json("{not valid json}").is_err());
        assert!(NetworkParams::parse_json(r#"{"schema_version": "1.0.0"}"#).is_err());
    }

    #[test]
    fn from_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        let mut params = NetworkParams::default();
        params.gene_prior.two = 0.9;
        std::fs::write(&path, serde_json::to_string(&params).unwrap()).unwrap();
        assert!(NetworkParams::from_file(&path).is_err());

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            NetworkParams::from_file(&missing),
            Err(ValidationError::IoError(_))
        ));
    }
}
