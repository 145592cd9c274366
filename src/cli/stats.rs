//! Non-interactive priority statistics command

use crate::config::Config;
use crate::memo::MemoService;
use anyhow::Result;
use clap::Args;

/// Print priority statistics without entering the TUI
#[derive(Args)]
pub struct StatsCommand {
    /// Print raw JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    pub async fn execute(&self, config: &Config) -> Result<()> {
        let service = MemoService::new(config.api_url.clone(), config.request_timeout())?;
        let stats = service.priority_stats().await?;

        if self.json {
            let value = serde_json::json!({
                "priorityCounts": stats.priority_counts,
                "totalMemos": stats.total_memos,
                "mostCommonPriority": stats.most_common_priority,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
            return Ok(());
        }

        println!("Total memos: {}", stats.total_memos);
        println!("  High:   {}", stats.count("HIGH"));
        println!("  Medium: {}", stats.count("MEDIUM"));
        println!("  Low:    {}", stats.count("LOW"));
        println!("Most common priority: {}", stats.most_common_priority);
        Ok(())
    }
}
