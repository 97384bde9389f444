//! Well-known path resolution with fallback chains.

use std::io;
use std::path::PathBuf;

use crate::diag::{self, DiagnosticsSink, LogLevel};
use crate::error::{Error, Result};

/// Returns the directory containing the currently running executable.
///
/// Resolution goes through the OS's own notion of the current program image
/// (`GetModuleFileNameW`, `/proc/self/exe`), never `argv[0]`, which can be
/// relative, overridden, or absent.
pub fn executable_directory(sink: Option<&dyn DiagnosticsSink>) -> Result<PathBuf> {
  let executable = std::env::current_exe().map_err(|err| {
    diag::emit_with(sink, LogLevel::Error, || format!("failed to get the executable path: {err}"));
    Error::access("current_exe", "executable path", err)
  })?;

  match executable.parent() {
    Some(directory) => Ok(directory.to_path_buf()),
    None => Err(Error::access(
      "current_exe",
      executable.display().to_string(),
      io::Error::other("executable path has no parent directory"),
    )),
  }
}

/// Resolves the root directory for per-user local application data.
///
/// Never fails: each candidate in the chain is tried in order and the chain
/// terminates at the executable's own directory.
pub fn local_app_data_root(sink: Option<&dyn DiagnosticsSink>) -> PathBuf {
  imp::local_app_data_root(sink)
}

#[cfg(windows)]
mod imp {
  use std::path::PathBuf;

  use crate::diag::DiagnosticsSink;

  pub fn local_app_data_root(sink: Option<&dyn DiagnosticsSink>) -> PathBuf {
    match dirs::data_local_dir() {
      Some(path) => path,
      None => super::executable_fallback(sink),
    }
  }
}

#[cfg(not(windows))]
mod imp {
  use std::path::PathBuf;

  use crate::diag::DiagnosticsSink;

  pub fn local_app_data_root(sink: Option<&dyn DiagnosticsSink>) -> PathBuf {
    // The explicit override variable for the configuration root wins.
    if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME")
      && !config_home.is_empty()
    {
      return PathBuf::from(config_home);
    }

    // Otherwise the conventional subdirectory of the home directory.
    if let Some(home) = std::env::var_os("HOME")
      && !home.is_empty()
    {
      return PathBuf::from(home).join(".config");
    }

    super::executable_fallback(sink)
  }
}

/// Terminal fallback of the chain. The warning keeps a defaulted path
/// distinguishable from an observed one.
fn executable_fallback(sink: Option<&dyn DiagnosticsSink>) -> PathBuf {
  diag::emit_with(sink, LogLevel::Warn, || {
    "no conventional application data root found, falling back to the executable directory".to_string()
  });

  executable_directory(sink).unwrap_or_else(|_| PathBuf::from("."))
}
