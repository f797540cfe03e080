//! Application service — find or create the debug keystore.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter};
use crate::domain::keystore::{android_debug_keystore, keystore_candidates, keytool_generate_command};

/// Return the first existing debug keystore, generating one at
/// `~/.android/debug.keystore` when none exists.
///
/// # Errors
///
/// Returns an error if the home directory is unknown or `keytool` fails.
pub async fn locate_or_generate(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
) -> Result<PathBuf> {
    let home = fs.home_dir()?;

    for candidate in keystore_candidates(&home) {
        if fs.exists(&candidate) {
            reporter.detail(&format!("using debug keystore: {}", candidate.display()));
            return Ok(candidate);
        }
        reporter.warn(&format!("debug keystore not exist at: {}", candidate.display()));
    }

    let keystore = android_debug_keystore(&home);
    reporter.detail("generating debug keystore");
    if let Some(parent) = keystore.parent() {
        fs.create_dir_all(parent)?;
    }
    let keytool = keytool_generate_command(&keystore);
    reporter.detail(&format!("$ {keytool}"));
    runner
        .run(&keytool)
        .await
        .context("generating debug keystore")?
        .ensure_success(&keytool)?;

    reporter.detail(&format!("using debug keystore: {}", keystore.display()));
    Ok(keystore)
}
