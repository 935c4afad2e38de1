//! KINDS command - List recognized notification types.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use notify_core::NotificationKind;
use serde::Serialize;

use super::{HumanReadable, output};

/// Arguments for the kinds command.
#[derive(Args)]
pub struct KindsArgs {
    /// Subject to render into the example log lines
    #[arg(long, default_value = "{sub}")]
    pub sub: String,
}

/// One recognized notification type.
#[derive(Debug, Serialize)]
pub struct KindSummary {
    pub notification_type: String,
    pub label: &'static str,
    pub log_line: String,
}

/// All recognized notification types.
#[derive(Debug, Serialize)]
pub struct KindsResponse {
    pub kinds: Vec<KindSummary>,
}

impl KindsResponse {
    fn build(sub: &str) -> Self {
        let kinds = NotificationKind::KNOWN
            .iter()
            .map(|kind| KindSummary {
                notification_type: kind.as_str().to_string(),
                label: kind.label(),
                log_line: kind.describe(sub),
            })
            .collect();
        Self { kinds }
    }
}

impl HumanReadable for KindsResponse {
    fn print_human(&self) {
        println!("{}", "Recognized notification types".green().bold());
        println!();
        for kind in &self.kinds {
            println!("  {}", kind.notification_type.cyan());
            println!("    {} {}", "logs:".dimmed(), kind.log_line);
        }
        println!();
        println!(
            "  {}",
            "Any other value is logged as an unknown notification type.".dimmed()
        );
    }
}

/// Execute the kinds command.
pub fn execute(human: bool, args: KindsArgs) -> Result<()> {
    output(&KindsResponse::build(&args.sub), human)
}
