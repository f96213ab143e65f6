//! Command-line interface definition

use std::path::PathBuf;

use clap::Parser;

use crate::layout::{FinalResponsePolicy, ReportConfig, SectionOrder};

#[derive(Parser, Debug)]
#[command(
    name = "council-report",
    about = "Render a stored council conversation into a PDF report",
    version
)]
pub struct Cli {
    /// Conversation identifier; resolves <store>/<id>.json
    pub conversation_id: String,

    /// Directory holding conversation records
    #[arg(long, default_value = "data/conversations")]
    pub store: PathBuf,

    /// Directory the report is written to (created if absent)
    #[arg(long, default_value = "data/pdf")]
    pub out_dir: PathBuf,

    /// Render the final resolution before the member appendix
    #[arg(long)]
    pub final_first: bool,

    /// Flow member responses continuously instead of one model per page
    #[arg(long)]
    pub continuous_appendix: bool,

    /// Render only the first final resolution found
    #[arg(long)]
    pub first_final_only: bool,
}

impl Cli {
    pub fn config(&self) -> ReportConfig {
        ReportConfig {
            order: if self.final_first {
                SectionOrder::FinalFirst
            } else {
                SectionOrder::AppendixFirst
            },
            one_model_per_page: !self.continuous_appendix,
            final_policy: if self.first_final_only {
                FinalResponsePolicy::FirstOnly
            } else {
                FinalResponsePolicy::All
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_policy() {
        let cli = Cli::parse_from(["council-report", "abc123"]);
        assert_eq!(cli.conversation_id, "abc123");
        let config = cli.config();
        assert_eq!(config.order, SectionOrder::AppendixFirst);
        assert!(config.one_model_per_page);
        assert_eq!(config.final_policy, FinalResponsePolicy::All);
    }

    #[test]
    fn flags_flip_the_policy() {
        let cli = Cli::parse_from([
            "council-report",
            "abc123",
            "--final-first",
            "--continuous-appendix",
            "--first-final-only",
        ]);
        let config = cli.config();
        assert_eq!(config.order, SectionOrder::FinalFirst);
        assert!(!config.one_model_per_page);
        assert_eq!(config.final_policy, FinalResponsePolicy::FirstOnly);
    }
}
