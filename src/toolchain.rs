//! Local Go toolchain environment: home directory, SDK root, GOPATH and
//! the version of the installed `go` command.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::version::error::ToolchainError;
use crate::version::semver::strip_distribution_prefix;

/// Returns the user's home directory for the running OS
pub fn home_dir() -> Result<PathBuf, ToolchainError> {
    home_dir_with_env(std::env::consts::OS, |key| std::env::var(key).ok(), dirs::home_dir)
}

fn home_dir_with_env(
    os: &str,
    env: impl Fn(&str) -> Option<String>,
    fallback: impl FnOnce() -> Option<PathBuf>,
) -> Result<PathBuf, ToolchainError> {
    match os {
        "plan9" | "uefi" => Err(ToolchainError::UnsupportedPlatform(os.to_string())),
        "windows" => env("USERPROFILE")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .ok_or(ToolchainError::HomeNotFound("%USERPROFILE%")),
        _ => env("HOME")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(fallback)
            .ok_or(ToolchainError::HomeNotFound("$HOME")),
    }
}

/// Directory holding downloaded SDKs (`~/sdk`)
pub fn sdk_root() -> Result<PathBuf, ToolchainError> {
    Ok(sdk_root_in(home_dir()?))
}

fn sdk_root_in(home: PathBuf) -> PathBuf {
    home.join("sdk")
}

/// `$GOPATH`, or the default `~/go` when unset
pub fn gopath() -> PathBuf {
    gopath_with_env(std::env::var("GOPATH").ok(), home_dir().ok())
}

fn gopath_with_env(gopath: Option<String>, home: Option<PathBuf>) -> PathBuf {
    gopath
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|home| home.join("go")))
        .unwrap_or_default()
}

/// Version of the installed `go` command without the `go` prefix
pub fn running_version() -> Result<String, ToolchainError> {
    let go = go_command(std::env::var("GOROOT").ok());
    debug!("Querying version from {:?}", go);

    let output = Command::new(&go).args(["env", "GOVERSION"]).output()?;
    if !output.status.success() {
        return Err(ToolchainError::GoCommand(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    Ok(parse_go_version_output(&String::from_utf8_lossy(&output.stdout)))
}

fn go_command(goroot: Option<String>) -> PathBuf {
    match goroot.filter(|root| !root.is_empty()) {
        Some(root) => PathBuf::from(root).join("bin").join("go"),
        None => PathBuf::from("go"),
    }
}

fn parse_go_version_output(stdout: &str) -> String {
    strip_distribution_prefix(stdout.trim()).to_string()
}
