//! assist-map receivers command

use clap::Args;
use shared::ExtractorConfig;

#[derive(Debug, Args)]
pub struct ReceiversCommand {}

impl ReceiversCommand {
    pub fn run(&self, config: &ExtractorConfig) -> anyhow::Result<()> {
        println!("Receiving institutions:");
        for receiver in &config.receivers {
            println!("  - {} ({})", receiver.name, receiver.id);
        }
        println!("Sending institution: {}", config.sending_college);
        Ok(())
    }
}
