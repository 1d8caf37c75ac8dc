use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::SearchError;
use crate::fanout::DispatchConfig;
use crate::query::{Qualifier, QualifierSet};

/// Count how often keywords are used in GitHub code and rank them.
#[derive(Parser, Debug, Clone)]
#[clap(
    author,
    version,
    about,
    long_about = "Count how many times each keyword appears in GitHub code and print them ranked by total.\n\nExample:\n    ghkw --in=file --language=javascript --size=\">1000\" exclude_condition exclusion_condition"
)]
pub struct Args {
    /// Keywords to count. `:` is removed from each keyword.
    #[clap(value_name = "KEYWORD")]
    pub keywords: Vec<String>,

    /// Print debug logs, including every query and raw total.
    #[clap(short, long)]
    pub debug: bool,

    /// Add `in:` to the search term (e.g. file, path).
    #[clap(long = "in", value_name = "WHERE")]
    pub in_: Option<String>,

    /// Add `language:` to the search term.
    #[clap(long)]
    pub language: Option<String>,

    /// Add `fork:` to the search term.
    #[clap(long)]
    pub fork: Option<String>,

    /// Add `size:` to the search term (e.g. ">1000").
    #[clap(long)]
    pub size: Option<String>,

    /// Add `path:` to the search term.
    #[clap(long)]
    pub path: Option<String>,

    /// Add `filename:` to the search term.
    #[clap(long)]
    pub filename: Option<String>,

    /// Add `extension:` to the search term.
    #[clap(long)]
    pub extension: Option<String>,

    /// Add `user:` to the search term.
    #[clap(long)]
    pub user: Option<String>,

    /// Add `repo:` to the search term.
    #[clap(long)]
    pub repo: Option<String>,

    /// GitHub API token. Falls back to GITHUB_TOKEN, then the config file.
    #[clap(short, long)]
    pub token: Option<String>,

    /// GitHub REST API base URL.
    #[clap(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Config file path. Defaults to ~/.config/ghkw/config.toml.
    #[clap(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Maximum number of concurrent searches. Unlimited when omitted.
    #[clap(
        short = 'c',
        long,
        value_name = "NUM",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub concurrency: Option<usize>,

    /// Seconds to wait for a single search.
    #[clap(long, value_name = "SECS", default_value = "30", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Seconds to wait for all searches together.
    #[clap(long, value_name = "SECS", default_value = "120", value_parser = clap::value_parser!(u64).range(1..))]
    pub deadline: u64,

    /// Do not draw progress spinners.
    #[clap(long)]
    pub no_progress: bool,
}

impl Args {
    /// Qualifier set filled from the qualifier flags.
    pub fn qualifiers(&self) -> Result<QualifierSet, SearchError> {
        let mut qualifiers = QualifierSet::default();
        let values = [
            (Qualifier::In, &self.in_),
            (Qualifier::Language, &self.language),
            (Qualifier::Fork, &self.fork),
            (Qualifier::Size, &self.size),
            (Qualifier::Path, &self.path),
            (Qualifier::Filename, &self.filename),
            (Qualifier::Extension, &self.extension),
            (Qualifier::User, &self.user),
            (Qualifier::Repo, &self.repo),
        ];
        for (qualifier, value) in values {
            if let Some(value) = value {
                qualifiers.set(qualifier, value.as_str())?;
            }
        }
        Ok(qualifiers)
    }

    /// Dispatcher settings from the flags.
    pub fn dispatch_config(&self) -> DispatchConfig {
        DispatchConfig {
            debug: self.debug,
            concurrency: self.concurrency,
            query_timeout: Some(Duration::from_secs(self.timeout)),
            deadline: Some(Duration::from_secs(self.deadline)),
            show_progress: !self.no_progress,
        }
    }
}
