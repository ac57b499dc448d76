//! assist-map extract command

use anyhow::Context;
use articulation::{dedup_records, AgreementContext, Extractor};
use clap::Args;
use shared::{Agreement, ExtractionReport, ExtractorConfig, MappingRecord};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Agreement JSON files (bare agreement or API response)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// ASSIST academic year id (e.g. 75, 76)
    #[arg(long)]
    pub year_id: u32,

    /// Receiving institution, by name or id
    #[arg(short, long)]
    pub receiving: String,

    /// Sending institution recorded on each row (defaults to config)
    #[arg(short, long)]
    pub sending: Option<String>,

    /// Major label for agreements that carry no name
    #[arg(long)]
    pub major: Option<String>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Drop duplicate records across agreements
    #[arg(long)]
    pub dedup: bool,

    /// Abort on the first agreement that cannot be decoded
    #[arg(long)]
    pub strict: bool,

    /// Keep the declared conjunction for honors/non-honors pairs
    #[arg(long)]
    pub no_honors_override: bool,
}

impl ExtractCommand {
    pub fn run(&self, config: &ExtractorConfig) -> anyhow::Result<()> {
        let records = self.collect(config)?;
        let report = ExtractionReport::new(records);
        let json = serde_json::to_string_pretty(&report)?;

        match &self.out {
            Some(path) => {
                std::fs::write(path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!("✓ Wrote {} records to {}", report.record_count, path.display());
            }
            None => println!("{}", json),
        }

        Ok(())
    }

    /// Extract every agreement file, in the order given
    pub fn collect(&self, config: &ExtractorConfig) -> anyhow::Result<Vec<MappingRecord>> {
        let receiver = config.find_receiver(&self.receiving)?;
        let extractor = Extractor::new(config)
            .with_strict(self.strict)
            .with_honors_override(!self.no_honors_override);

        let context = AgreementContext {
            academic_year_id: self.year_id,
            sending_college: self
                .sending
                .clone()
                .unwrap_or_else(|| config.sending_college.clone()),
            receiving_university: receiver.name.clone(),
            major: self.major.clone(),
        };

        let mut records = Vec::new();
        for path in &self.files {
            let result = load_agreement(path).and_then(|agreement| {
                extractor
                    .extract(&context, &agreement)
                    .with_context(|| format!("Failed to extract {}", path.display()))
            });

            match result {
                Ok(batch) => records.extend(batch),
                Err(err) if self.strict => return Err(err),
                Err(err) => {
                    let reason = format!("{:#}", err);
                    warn!(path = %path.display(), error = %reason, "Skipping agreement");
                }
            }
        }

        if self.dedup {
            records = dedup_records(records);
        }

        Ok(records)
    }
}

/// Read an agreement document from disk
pub fn load_agreement(path: &Path) -> anyhow::Result<Agreement> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    Ok(Agreement::from_document(document)?)
}
