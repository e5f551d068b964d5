use crate::core::filters::{mentor_matches, ALL};
use crate::models::Mentor;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading the mentor catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate mentor id: {0}")]
    DuplicateId(String),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    mentors: Vec<Mentor>,
}

/// Immutable catalog of mentors
///
/// Loaded once at process start, either from the embedded seed data or
/// from a TOML file. Filtering is a pure read; catalog order is the
/// presentation order and is always preserved.
#[derive(Debug, Clone)]
pub struct MentorCatalog {
    mentors: Vec<Mentor>,
    industries: Vec<String>,
    cities: Vec<String>,
}

impl MentorCatalog {
    /// Build a catalog from mentor records, rejecting duplicate ids
    pub fn new(mentors: Vec<Mentor>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for mentor in &mentors {
            if !seen.insert(mentor.id.as_str()) {
                return Err(CatalogError::DuplicateId(mentor.id.clone()));
            }
        }

        let industries = derive_industries(&mentors);
        let cities = derive_cities(&mentors);

        Ok(Self {
            mentors,
            industries,
            cities,
        })
    }

    /// The catalog compiled into the binary
    pub fn builtin() -> Self {
        Self::from_toml_str(include_str!("builtin_mentors.toml"))
            .expect("embedded mentor catalog is valid")
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(raw)?;
        Self::new(file.mentors)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Filter the catalog with conjunctive category, city and text predicates
    ///
    /// An empty result is a valid state, not an error.
    pub fn filter(&self, category: &str, city: &str, query: &str) -> Vec<&Mentor> {
        self.mentors
            .iter()
            .filter(|mentor| mentor_matches(mentor, category, city, query))
            .collect()
    }

    /// Look up a mentor by id
    ///
    /// Used to validate externally supplied ids (AI recommendations)
    /// before acting on them.
    pub fn get(&self, id: &str) -> Option<&Mentor> {
        self.mentors.iter().find(|mentor| mentor.id == id)
    }

    pub fn mentors(&self) -> &[Mentor] {
        &self.mentors
    }

    /// Distinct industries in catalog order, sentinel first
    pub fn industries(&self) -> &[String] {
        &self.industries
    }

    /// Distinct cities in catalog order, sentinel first
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.mentors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mentors.is_empty()
    }
}

fn derive_industries(mentors: &[Mentor]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut industries = vec![ALL.to_string()];
    for mentor in mentors {
        // compound industries contribute each of their parts
        for part in mentor.industry.split(" / ") {
            let part = part.trim();
            if !part.is_empty() && seen.insert(part.to_string()) {
                industries.push(part.to_string());
            }
        }
    }
    industries
}

fn derive_cities(mentors: &[Mentor]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut cities = vec![ALL.to_string()];
    for mentor in mentors {
        if seen.insert(mentor.city.clone()) {
            cities.push(mentor.city.clone());
        }
    }
    cities
}
