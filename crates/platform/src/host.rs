//! The host-platform capability surface.
//!
//! One interface covers everything installation-discovery code needs from
//! the operating system, so OS conditionals stay inside this crate instead
//! of spreading through call sites. The concrete behavior behind each
//! capability is selected per target when the crate is compiled; a
//! [`NativeHost`] is constructed once at process startup, optionally with a
//! diagnostics sink attached.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::collate;
use crate::diag::DiagnosticsSink;
use crate::error::Result;
use crate::paths;
use crate::redirect::{self, RedirectRecord};
use crate::registry::{self, RegistryRoot};
use crate::volumes;

/// Capabilities the platform layer offers to higher-level discovery logic.
///
/// All operations are synchronous and safe to call from multiple threads;
/// each call acquires and releases its own transient OS resources and no
/// state is retained between calls.
pub trait HostPlatform {
  /// Lists all mounted filesystem roots. See [`volumes::drive_root_paths`].
  fn drive_root_paths(&self) -> Result<Vec<PathBuf>>;

  /// Probes a root for a redirect marker. See [`redirect::find_redirect`].
  fn find_redirect(&self, root: &Path) -> Result<Option<RedirectRecord>>;

  /// Reads a registry string value with dual-view fallback. See
  /// [`registry::read_registry_string`].
  fn read_registry_string(&self, root: RegistryRoot, subkey: &str, value: &str) -> Result<Option<String>>;

  /// Lists a registry key's children. See [`registry::registry_sub_keys`].
  fn registry_sub_keys(&self, root: RegistryRoot, subkey: &str) -> Result<Vec<String>>;

  /// Compares filenames the way the host filesystem does. See
  /// [`collate::compare_filenames`].
  fn compare_filenames(&self, lhs: &str, rhs: &str) -> Result<Ordering>;

  /// Returns the running executable's directory. See
  /// [`paths::executable_directory`].
  fn executable_directory(&self) -> Result<PathBuf>;

  /// Resolves the per-user local application data root. See
  /// [`paths::local_app_data_root`].
  fn local_app_data_root(&self) -> PathBuf;
}

/// The running host's implementation of [`HostPlatform`].
#[derive(Default)]
pub struct NativeHost {
  sink: Option<Arc<dyn DiagnosticsSink>>,
}

impl NativeHost {
  pub fn new() -> Self {
    Self { sink: None }
  }

  /// Attaches a diagnostics sink consulted by every capability. Sink
  /// presence never changes a returned result.
  pub fn with_sink(sink: Arc<dyn DiagnosticsSink>) -> Self {
    Self { sink: Some(sink) }
  }

  fn sink(&self) -> Option<&dyn DiagnosticsSink> {
    self.sink.as_deref()
  }
}

impl HostPlatform for NativeHost {
  fn drive_root_paths(&self) -> Result<Vec<PathBuf>> {
    volumes::drive_root_paths()
  }

  fn find_redirect(&self, root: &Path) -> Result<Option<RedirectRecord>> {
    redirect::find_redirect(root, self.sink())
  }

  fn read_registry_string(&self, root: RegistryRoot, subkey: &str, value: &str) -> Result<Option<String>> {
    registry::read_registry_string(root, subkey, value, self.sink())
  }

  fn registry_sub_keys(&self, root: RegistryRoot, subkey: &str) -> Result<Vec<String>> {
    registry::registry_sub_keys(root, subkey, self.sink())
  }

  fn compare_filenames(&self, lhs: &str, rhs: &str) -> Result<Ordering> {
    collate::compare_filenames(lhs, rhs)
  }

  fn executable_directory(&self) -> Result<PathBuf> {
    paths::executable_directory(self.sink())
  }

  fn local_app_data_root(&self) -> PathBuf {
    paths::local_app_data_root(self.sink())
  }
}
