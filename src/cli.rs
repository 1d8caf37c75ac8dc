//! One complete `ghkw` run: validate input, resolve credentials, fan out,
//! rank and print.

use std::io::Write;
use std::sync::Arc;

use tracing::{debug, info};

use crate::args::Args;
use crate::config::{self, ConfigFile, SearchConfig, TOKEN_ENV};
use crate::error::SearchError;
use crate::fanout::Dispatcher;
use crate::github_searcher::GitHubSearcher;
use crate::query::KeywordSet;
use crate::rank::rank;
use crate::report;

/// Count every keyword in `args` and write the ranked table to `out`.
///
/// Fatal errors (no keywords, no token, bad configuration) are returned
/// before any query is sent, and nothing is written to `out`. Individual
/// query failures only show up as zero totals.
pub async fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), SearchError> {
    if args.debug {
        debug!("Run as DEBUG mode");
    }

    let keywords = KeywordSet::new(&args.keywords)?;
    debug!("keywords: {:?}", keywords.iter().collect::<Vec<_>>());

    let qualifiers = args.qualifiers()?;
    if args.debug {
        qualifiers.log_debug();
    }

    let dispatcher = Dispatcher::new(args.dispatch_config())?;

    let file = match args.config.clone().or_else(config::config_path) {
        Some(path) => ConfigFile::load(&path)?,
        None => ConfigFile::default(),
    };
    let env_token = std::env::var(TOKEN_ENV).ok();
    let token = config::resolve_token(args.token.as_deref(), env_token.as_deref(), &file)?;

    let mut search_config = SearchConfig::default();
    if let Some(api_url) = args.api_url.clone().or(file.github.api_url) {
        search_config.api_url = api_url;
    }
    search_config.validate()?;

    let searcher = Arc::new(GitHubSearcher::new(&search_config, token)?);
    let totals = dispatcher.run(&keywords, &qualifiers, searcher).await;
    info!("Finished {} searches", totals.len());

    report::render(&rank(&totals), out)?;
    Ok(())
}
