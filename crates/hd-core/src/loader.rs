//! Pedigree file loading.
//!
//! Two formats are accepted, chosen by file extension:
//! - CSV with header `name,mother,father,trait` (`1`/`0`/empty trait)
//! - JSON `{"people": [{"name", "mother", "father", "trait"}]}`

use std::io::Read;
use std::path::Path;

use hd_common::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pedigree::{Person, Population};

/// On-disk pedigree format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PedigreeFormat {
    Csv,
    Json,
}

impl PedigreeFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => Ok(PedigreeFormat::Csv),
            Some("json") => Ok(PedigreeFormat::Json),
            _ => Err(Error::Load(format!(
                "{}: unrecognized extension (expected .csv or .json)",
                path.display()
            ))),
        }
    }
}

/// JSON document shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PedigreeFile {
    pub people: Vec<Person>,
}

impl From<&Population> for PedigreeFile {
    fn from(population: &Population) -> Self {
        Self {
            people: population.people().cloned().collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    mother: Option<String>,
    father: Option<String>,
    #[serde(rename = "trait")]
    observed: Option<String>,
}

/// Load and validate a pedigree file.
pub fn load_population(path: &Path) -> Result<Population> {
    let format = PedigreeFormat::from_path(path)?;
    let file = std::fs::File::open(path)
        .map_err(|e| Error::Load(format!("failed to open {}: {e}", path.display())))?;
    let population = match format {
        PedigreeFormat::Csv => parse_csv(file)?,
        PedigreeFormat::Json => {
            let mut text = String::new();
            std::io::BufReader::new(file).read_to_string(&mut text)?;
            parse_json(&text)?
        }
    };
    population.validate()?;
    debug!(path = %path.display(), people = population.len(), "pedigree loaded");
    Ok(population)
}

/// Parse CSV rows into a population. Structure is not validated here.
pub fn parse_csv<R: Read>(reader: R) -> Result<Population> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut population = Population::new();
    for (line, row) in rdr.deserialize::<CsvRow>().enumerate() {
        let row = row.map_err(|e| Error::Load(format!("row {}: {e}", line + 1)))?;
        let observed_trait = parse_trait(row.observed.as_deref())
            .map_err(|msg| Error::Load(format!("row {} ({}): {msg}", line + 1, row.name)))?;
        population.insert(Person {
            name: row.name.into(),
            mother: non_empty(row.mother).map(Into::into),
            father: non_empty(row.father).map(Into::into),
            observed_trait,
        })?;
    }
    Ok(population)
}

/// Parse the JSON document form. Structure is not validated here.
pub fn parse_json(json: &str) -> Result<Population> {
    let file: PedigreeFile = serde_json::from_str(json)?;
    Population::from_people(file.people)
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

fn parse_trait(field: Option<&str>) -> std::result::Result<Option<bool>, String> {
    match field.map(str::trim) {
        None | Some("") => Ok(None),
        Some("1") => Ok(Some(true)),
        Some("0") => Ok(Some(false)),
        Some(other) if other.eq_ignore_ascii_case("true") => Ok(Some(true)),
        Some(other) if other.eq_ignore_ascii_case("false") => Ok(Some(false)),
        Some(other) => Err(format!("trait must be 1, 0 or empty, got '{other}'")),
    }
}
