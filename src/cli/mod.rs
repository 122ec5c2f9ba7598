//! Command line interface for play_publish.
//!
//! Turns arguments into a validated [`PublishRequest`], runs the publisher
//! and reports the outcome.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::config::PublishRequest;
use crate::error::{CliError, LocalIoError, Result};
use crate::play::PlayClient;
use crate::publish::{PublishOutcome, Publisher};
use std::collections::HashSet;
use std::path::PathBuf;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args).await
}

/// Execute a parsed invocation
pub async fn execute(args: &Args) -> Result<i32> {
    let output = OutputManager::stdout();

    if let Err(reason) = args.validate() {
        return Err(CliError::InvalidArguments { reason }.into());
    }

    let release_files = resolve_release_files(&args.release_files)?;
    let request = args.to_request(release_files);
    check_optional_paths(&request)?;
    request.validate()?;

    output.section(&format!("Publishing {}", request.package_name));
    output.info(&format!("Track: {}", request.track));
    for file in &request.release_files {
        output.indent(&file.display().to_string());
    }

    let client = PlayClient::with_base_url(&args.access_token, &args.api_base_url)?;
    let outcome = Publisher::new(client).publish(&request).await?;
    report(&output, &outcome);

    Ok(0)
}

/// Expand release file patterns, keeping first-seen order without duplicates
///
/// Every pattern must match at least one file.
pub fn resolve_release_files(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for pattern in patterns.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        let paths = glob::glob(pattern).map_err(|e| LocalIoError::InvalidGlob {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        let mut matched = false;
        for entry in paths {
            let path = entry.map_err(|e| {
                let path = e.path().to_path_buf();
                LocalIoError::read(path, e.into_error())
            })?;
            if !path.is_file() {
                continue;
            }
            matched = true;
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }

        if !matched {
            return Err(LocalIoError::NoGlobMatch {
                pattern: pattern.to_string(),
            }
            .into());
        }
    }

    if files.is_empty() {
        return Err(CliError::MissingArgument {
            argument: "--release-files".to_string(),
        }
        .into());
    }
    Ok(files)
}

fn check_optional_paths(request: &PublishRequest) -> Result<()> {
    let optional = [
        request.mapping_file.as_ref(),
        request.debug_symbols.as_ref(),
        request.whats_new_directory.as_ref(),
    ];
    for path in optional.into_iter().flatten() {
        if !path.try_exists().map_err(|e| LocalIoError::read(path, e))? {
            return Err(LocalIoError::MissingFile { path: path.clone() }.into());
        }
    }
    Ok(())
}

fn report(output: &OutputManager, outcome: &PublishOutcome) {
    match outcome {
        PublishOutcome::Committed {
            edit_id,
            track,
            version_codes,
        } => {
            output.success(&format!("Committed edit {edit_id} to track '{track}'"));
            for code in version_codes {
                output.indent(&format!("version code {code}"));
            }
        }
        PublishOutcome::Shared { download_urls } => {
            output.success(&format!("Shared {} artifact(s)", download_urls.len()));
            for url in download_urls {
                output.indent(url);
            }
            if let Some(last) = outcome.last_download_url() {
                output.println(&format!("internalSharingDownloadUrl={last}"));
            }
        }
    }
}
