//! Debug keystore locations and the fixed `keytool` parameters used to
//! create one.

use std::path::{Path, PathBuf};

use crate::domain::invocation::CommandLine;

pub const KEY_ALIAS: &str = "androiddebugkey";
pub const STORE_PASSWORD: &str = "android";
pub const KEY_PASSWORD: &str = "android";
pub const KEY_ALGORITHM: &str = "RSA";
pub const KEY_SIZE: &str = "2048";
pub const VALIDITY_DAYS: &str = "10000";
pub const DISTINGUISHED_NAME: &str = "CN=Android Debug,O=Android,C=US";

/// `~/.android/debug.keystore`, the Android SDK default. Generated here when
/// no keystore exists.
#[must_use]
pub fn android_debug_keystore(home: &Path) -> PathBuf {
    home.join(".android").join("debug.keystore")
}

/// `~/.local/share/Mono for Android/debug.keystore`, left by Xamarin tooling.
#[must_use]
pub fn xamarin_debug_keystore(home: &Path) -> PathBuf {
    home.join(".local")
        .join("share")
        .join("Mono for Android")
        .join("debug.keystore")
}

/// Search order; the first existing path wins.
#[must_use]
pub fn keystore_candidates(home: &Path) -> [PathBuf; 2] {
    [android_debug_keystore(home), xamarin_debug_keystore(home)]
}

/// `keytool -genkey` invocation that creates a debug keystore at `path`.
#[must_use]
pub fn keytool_generate_command(path: &Path) -> CommandLine {
    CommandLine::new("keytool").args([
        "-genkey",
        "-v",
        "-keystore",
        &path.display().to_string(),
        "-alias",
        KEY_ALIAS,
        "-storepass",
        STORE_PASSWORD,
        "-keypass",
        KEY_PASSWORD,
        "-keyalg",
        KEY_ALGORITHM,
        "-keysize",
        KEY_SIZE,
        "-validity",
        VALIDITY_DAYS,
        "-dname",
        DISTINGUISHED_NAME,
    ])
}
