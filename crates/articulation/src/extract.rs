//! Per-agreement extraction
//!
//! Glues the cell map and the template walk together for one agreement and
//! tags the resulting rows with where they came from. Agreements are
//! independent of each other, so callers may process them in any order and
//! concatenate the results.

use crate::cell_map::CellExpressionMap;
use crate::expression::ExpressionBuilder;
use crate::walker::walk_template_with_title;
use shared::{Agreement, ExtractorConfig, MappingRecord, OutputRow, Result};
use std::collections::HashSet;
use tracing::{debug, info};

const UNKNOWN_MAJOR: &str = "Unknown Major";

/// Where an agreement sits in the overall run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgreementContext {
    pub academic_year_id: u32,
    pub sending_college: String,
    pub receiving_university: String,
    /// Label used when the agreement does not name its major
    pub major: Option<String>,
}

/// Turns agreements into mapping records
#[derive(Debug, Clone)]
pub struct Extractor {
    builder: ExpressionBuilder,
    default_title: String,
    strict: bool,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(&ExtractorConfig::default())
    }
}

impl Extractor {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            builder: ExpressionBuilder::default(),
            default_title: config.default_title.clone(),
            strict: false,
        }
    }

    /// Builder: enable or disable the honors override
    pub fn with_honors_override(mut self, enabled: bool) -> Self {
        self.builder = self.builder.with_honors_override(enabled);
        self
    }

    /// Builder: fail on an undecodable `articulations` payload instead of
    /// treating the agreement as having no mappings
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Output rows of one agreement, in template order
    pub fn rows(&self, agreement: &Agreement) -> Result<Vec<OutputRow>> {
        if !agreement.has_template_assets() {
            debug!(agreement = agreement.name.as_deref().unwrap_or(""), "No template assets");
            return Ok(Vec::new());
        }

        let assets = agreement.template_assets()?;
        let expressions = if self.strict {
            CellExpressionMap::build(&agreement.articulations()?, &self.builder)
        } else {
            CellExpressionMap::from_agreement(agreement, &self.builder)
        };

        Ok(walk_template_with_title(&assets, &expressions, &self.default_title))
    }

    /// Rows of one agreement tagged with its context
    pub fn extract(&self, context: &AgreementContext, agreement: &Agreement) -> Result<Vec<MappingRecord>> {
        let major = major_name(context, agreement);
        let rows = self.rows(agreement)?;

        info!(
            receiving = %context.receiving_university,
            major = %major,
            rows = rows.len(),
            "Extracted agreement"
        );

        Ok(rows
            .into_iter()
            .map(|row| MappingRecord {
                academic_year_id: context.academic_year_id,
                sending_college: context.sending_college.clone(),
                receiving_university: context.receiving_university.clone(),
                major: major.clone(),
                requirement_title: row.requirement_title,
                for_course: row.for_course,
                sending_equivalent: row.sending_equivalent,
            })
            .collect())
    }
}

fn major_name(context: &AgreementContext, agreement: &Agreement) -> String {
    [agreement.name.as_deref(), context.major.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_MAJOR)
        .to_string()
}

/// Drop exact duplicate records, keeping the first of each
pub fn dedup_records(records: Vec<MappingRecord>) -> Vec<MappingRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.clone()))
        .collect()
}
