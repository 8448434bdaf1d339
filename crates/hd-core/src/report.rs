//! Posterior distributions and the inference report.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use hd_common::{GeneCount, PersonName, RunId};
use serde::{Deserialize, Serialize};

/// Percent-scale distribution over gene copy counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneDistribution {
    #[serde(rename = "2")]
    pub two: f64,
    #[serde(rename = "1")]
    pub one: f64,
    #[serde(rename = "0")]
    pub zero: f64,
}

impl GeneDistribution {
    pub fn get(&self, count: GeneCount) -> f64 {
        match count {
            GeneCount::Zero => self.zero,
            GeneCount::One => self.one,
            GeneCount::Two => self.two,
        }
    }

    pub fn total(&self) -> f64 {
        self.zero + self.one + self.two
    }

    /// Most probable copy count; ties go to the lower count.
    pub fn mode(&self) -> GeneCount {
        GeneCount::ALL
            .into_iter()
            .fold(GeneCount::Zero, |best, c| if self.get(c) > self.get(best) { c } else { best })
    }
}

/// Percent-scale distribution over trait expression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitDistribution {
    #[serde(rename = "true")]
    pub present: f64,
    #[serde(rename = "false")]
    pub absent: f64,
}

impl TraitDistribution {
    pub fn get(&self, has_trait: bool) -> f64 {
        if has_trait {
            self.present
        } else {
            self.absent
        }
    }

    pub fn total(&self) -> f64 {
        self.present + self.absent
    }
}

/// Marginals for one person.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonPosterior {
    pub gene: GeneDistribution,
    #[serde(rename = "trait")]
    pub expression: TraitDistribution,
}

/// Marginals for everyone, keyed by name.
pub type Posteriors = BTreeMap<PersonName, PersonPosterior>;

/// Result of one inference run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceReport {
    pub schema_version: String,
    pub run_id: RunId,
    pub generated_at: DateTime<Utc>,
    /// Worlds consistent with the evidence that were evaluated.
    pub worlds_enumerated: u64,
    /// P(evidence): total joint mass of the consistent Worlds.
    pub evidence_likelihood: f64,
    pub people: Posteriors,
}

impl InferenceReport {
    pub fn new(worlds_enumerated: u64, evidence_likelihood: f64, people: Posteriors) -> Self {
        Self {
            schema_version: hd_common::SCHEMA_VERSION.to_string(),
            run_id: RunId::new(),
            generated_at: Utc::now(),
            worlds_enumerated,
            evidence_likelihood,
            people,
        }
    }

    /// Indented per-person listing, people in name order.
    pub fn render_text(&self) -> String {
        render_posteriors(&self.people)
    }
}

/// Render posteriors as an indented listing.
pub fn render_posteriors(people: &Posteriors) -> String {
    let mut out = String::new();
    for (name, posterior) in people {
        let _ = writeln!(out, "{name}:");
        let _ = writeln!(out, "  Gene:");
        for count in GeneCount::ALL.iter().rev() {
            let _ = writeln!(out, "    {count}: {}%", posterior.gene.get(*count));
        }
        let _ = writeln!(out, "  Trait:");
        let _ = writeln!(out, "    True: {}%", posterior.expression.present);
        let _ = writeln!(out, "    False: {}%", posterior.expression.absent);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Posteriors {
        let mut people = Posteriors::new();
        people.insert(
            "Harry".into(),
            PersonPosterior {
                gene: GeneDistribution {
                    two: 0.0,
                    one: 48.2,
                    zero: 51.8,
                },
                expression: TraitDistribution {
                    present: 0.0,
                    absent: 100.0,
                },
            },
        );
        people
    }

    #[test]
    fn text_lists_counts_high_to_low() {
        let text = render_posteriors(&sample());
        assert_eq!(
            text,
            "Harry:\n  Gene:\n    2: 0%\n    1: 48.2%\n    0: 51.8%\n  Trait:\n    True: 0%\n    False: 100%\n"
        );
    }

    #[test]
    fn json_uses_count_and_boolean_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["Harry"]["gene"]["1"], 48.2);
        assert_eq!(json["Harry"]["trait"]["false"], 100.0);
    }

    #[test]
    fn mode_prefers_lower_count_on_ties() {
        let dist = GeneDistribution {
            two: 0.0,
            one: 50.0,
            zero: 50.0,
        };
        assert_eq!(dist.mode(), GeneCount::Zero);
    }

    #[test]
    fn report_carries_schema_and_run_id() {
        let report = InferenceReport::new(216, 0.5, sample());
        assert_eq!(report.schema_version, hd_common::SCHEMA_VERSION);
        assert!(report.run_id.0.starts_with("run-"));
        assert!(report.render_text().starts_with("Harry:"));
    }
}
