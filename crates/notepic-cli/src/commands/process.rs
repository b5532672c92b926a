//! Process Command
//!
//! Walks the base directory and fills the `pic` frontmatter field of every
//! note whose `filetype` matches. Per-file failures are logged and counted;
//! they never fail the command.

use anyhow::Result;
use notepic_core::{ProcessOptions, Processor, WalkSummary};
use tracing::info;

use crate::cli::ProcessArgs;
use crate::config::CliConfig;

/// Execute the process command
pub fn execute(config: &CliConfig, args: &ProcessArgs) -> Result<WalkSummary> {
    let options = config.process_options(args);
    info!("Starting process command");
    info!("Dry-run mode: {}", args.dry_run);

    let summary = run(&options, args.dry_run);
    println!("{}", render_summary(&options, &summary, args.dry_run));

    Ok(summary)
}

/// Run the pipeline for `options`
pub fn run(options: &ProcessOptions, dry_run: bool) -> WalkSummary {
    Processor::from_options(options, dry_run).process_files(options)
}

/// Human readable report for stdout
pub fn render_summary(options: &ProcessOptions, summary: &WalkSummary, dry_run: bool) -> String {
    let verb = if dry_run { "Would rewrite" } else { "Rewrote" };
    let mut out = format!(
        "{verb} {} of {} matching files in {} (filetype: {})\n",
        summary.rewritten,
        summary.matched,
        options.basedir.display(),
        options.filetype
    );
    out.push_str(&format!("   pic updated: {}\n", summary.pic_updated));
    out.push_str(&format!("   skipped (other filetype): {}", summary.skipped));
    if summary.failed > 0 {
        out.push_str(&format!("\n   failed: {}", summary.failed));
    }
    if summary.access_errors > 0 {
        out.push_str(&format!("\n   unreadable paths: {}", summary.access_errors));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_mentions_failures_only_when_present() {
        let options = ProcessOptions::default();
        let clean = WalkSummary {
            matched: 3,
            rewritten: 2,
            pic_updated: 1,
            skipped: 1,
            ..Default::default()
        };

        let text = render_summary(&options, &clean, false);
        assert!(text.starts_with("Rewrote 2 of 3 matching files"));
        assert!(text.contains("pic updated: 1"));
        assert!(!text.contains("failed"));

        let broken = WalkSummary {
            failed: 2,
            access_errors: 1,
            ..clean
        };
        let text = render_summary(&options, &broken, true);
        assert!(text.starts_with("Would rewrite"));
        assert!(text.contains("failed: 2"));
        assert!(text.contains("unreadable paths: 1"));
    }
}
