//! play_publish - publish Android release builds to Google Play.
//!
//! Uploads artifacts into an edit, assigns them to a track and commits, or
//! shares them through internal app sharing.

use play_publish::cli;
use play_publish::cli::OutputManager;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            let output = OutputManager::stderr();
            output.error(&format!("Fatal error: {e}"));
            log::debug!("{:?}", e);

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                output.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    output.indent(&suggestion);
                }
            }

            process::exit(1);
        }
    }
}
