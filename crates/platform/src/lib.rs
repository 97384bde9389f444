//! Host-platform abstractions for gamescout.
//!
//! This crate is the layer between installation-discovery logic and the
//! operating system. It provides:
//! - enumeration of mounted filesystem roots
//! - detection and decoding of per-drive `.GamingRoot` redirect markers
//! - read-only registry-style lookups with dual-view fallback
//! - filename comparison matching host filesystem case folding
//! - well-known path resolution with fallback chains
//!
//! Every path returned is either observed directly from the OS or derived
//! deterministically from OS-observed data; fallbacks announce themselves
//! through the optional diagnostics sink. Expected absence (a missing
//! marker, a missing registry value, a drive that is not ready) is an
//! ordinary result, never an error.

pub mod collate;
pub mod diag;
pub mod error;
pub mod host;
pub mod paths;
pub mod redirect;
pub mod registry;
pub mod volumes;

pub use collate::compare_filenames;
pub use diag::{DiagnosticMessage, DiagnosticsSink, LogLevel, MemorySink, Severity, TracingSink, messages_as_markdown};
pub use error::{Error, Result};
pub use host::{HostPlatform, NativeHost};
pub use paths::{executable_directory, local_app_data_root};
pub use redirect::{MARKER_FILE_NAME, RedirectRecord, find_redirect};
pub use registry::{RegistryRoot, read_registry_string, registry_sub_keys};
pub use volumes::drive_root_paths;
