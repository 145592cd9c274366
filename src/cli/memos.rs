//! Non-interactive memo commands

use crate::config::Config;
use crate::memo::{CreateMemoRequest, Memo, MemoService, Priority, UpdateMemoRequest};
use anyhow::Result;
use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

fn print_memo(memo: &Memo) {
    let priority = memo.priority.map(|p| p.label()).unwrap_or("None");
    println!("#{} [{}] {}", memo.id.unwrap_or_default(), priority, memo.title);
    if !memo.content.is_empty() {
        println!("{}", memo.content);
    }
    if let Some(created_at) = memo.created_at {
        println!("Created: {}", created_at.format("%Y-%m-%d %H:%M"));
    }
}

/// Create a new memo
#[derive(Args)]
pub struct AddCommand {
    /// Memo title
    pub title: String,

    /// Memo content
    pub content: String,

    /// Priority tag
    #[arg(long, value_enum)]
    pub priority: Option<PriorityArg>,
}

impl AddCommand {
    pub async fn execute(&self, config: &Config) -> Result<()> {
        let service = MemoService::new(config.api_url.clone(), config.request_timeout())?;
        let memo = service
            .create(&CreateMemoRequest {
                title: self.title.clone(),
                content: self.content.clone(),
                priority: self.priority.map(Into::into),
            })
            .await?;

        print_memo(&memo);
        Ok(())
    }
}

/// Show a single memo
#[derive(Args)]
pub struct ShowCommand {
    /// ID of the memo to show
    pub id: i64,
}

impl ShowCommand {
    pub async fn execute(&self, config: &Config) -> Result<()> {
        let service = MemoService::new(config.api_url.clone(), config.request_timeout())?;
        let memo = service.get(self.id).await?;
        print_memo(&memo);
        Ok(())
    }
}

/// Edit an existing memo
#[derive(Args)]
pub struct EditCommand {
    /// ID of the memo to edit
    pub id: i64,

    /// New title (unchanged when omitted)
    #[arg(long)]
    pub title: Option<String>,

    /// New content (unchanged when omitted)
    #[arg(long)]
    pub content: Option<String>,

    /// New priority tag (unchanged when omitted)
    #[arg(long, value_enum)]
    pub priority: Option<PriorityArg>,
}

impl EditCommand {
    pub async fn execute(&self, config: &Config) -> Result<()> {
        let service = MemoService::new(config.api_url.clone(), config.request_timeout())?;

        // Fetch current state so omitted fields stay untouched
        let current = service.get(self.id).await?;
        let updated = service
            .update(
                self.id,
                &UpdateMemoRequest {
                    title: self.title.clone().unwrap_or(current.title),
                    content: self.content.clone().unwrap_or(current.content),
                    priority: self.priority.map(Into::into).or(current.priority),
                },
            )
            .await?;

        print_memo(&updated);
        Ok(())
    }
}
