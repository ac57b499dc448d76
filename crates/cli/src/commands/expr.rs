//! assist-map expr command

use anyhow::Context;
use articulation::ExpressionBuilder;
use clap::Args;
use shared::{SendingArticulation, SendingItem};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Args)]
pub struct ExprCommand {
    /// JSON file holding one sendingArticulation object
    pub file: PathBuf,

    /// Keep the declared conjunction for honors/non-honors pairs
    #[arg(long)]
    pub no_honors_override: bool,

    /// Also print each course group's expression on its own line
    #[arg(long)]
    pub groups: bool,
}

impl ExprCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        let sending = self.load()?;
        let builder = self.builder();

        if self.groups {
            for (index, group) in Self::group_expressions(&builder, &sending).iter().enumerate() {
                println!("group {}: {}", index + 1, group);
            }
        }

        let expression = builder.build(Some(&sending));
        if expression.is_empty() {
            eprintln!("(no articulation)");
        } else {
            println!("{}", expression);
        }
        Ok(())
    }

    pub fn expression(&self) -> anyhow::Result<String> {
        let sending = self.load()?;
        Ok(self.builder().build(Some(&sending)))
    }

    /// Per-group expressions, always in their parenthesised form
    pub fn groups(&self) -> anyhow::Result<Vec<String>> {
        let sending = self.load()?;
        Ok(Self::group_expressions(&self.builder(), &sending))
    }

    fn builder(&self) -> ExpressionBuilder {
        let builder = ExpressionBuilder::new().with_honors_override(!self.no_honors_override);
        debug!(honors_override = builder.honors_override(), "Expression builder ready");
        builder
    }

    fn group_expressions(builder: &ExpressionBuilder, sending: &SendingArticulation) -> Vec<String> {
        match sending {
            SendingArticulation::Items(items) => items
                .iter()
                .filter_map(|item| match item {
                    SendingItem::CourseGroup(group) => builder.group_expression(group),
                    SendingItem::Course(_) | SendingItem::Other => None,
                })
                .collect(),
            SendingArticulation::NotArticulated { .. } => Vec::new(),
        }
    }

    fn load(&self) -> anyhow::Result<SendingArticulation> {
        let content = std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Not a sendingArticulation object: {}", self.file.display()))
    }
}
