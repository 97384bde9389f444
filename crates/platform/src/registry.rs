//! Read-only access to the host's registry-style configuration store.
//!
//! Lookups follow the dual-view contract: a value is first sought under the
//! 32-bit registry reflection and then under the 64-bit one, because the
//! store may redirect the same nominal key differently per view. Absence of
//! a value or key after both attempts is an ordinary result, not an error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::diag::DiagnosticsSink;
use crate::error::{Error, Result};

/// Root of the hierarchical configuration store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistryRoot {
  ClassesRoot,
  CurrentConfig,
  CurrentUser,
  LocalMachine,
  Users,
}

impl RegistryRoot {
  /// Returns the conventional `HKEY_*` spelling.
  pub const fn as_str(&self) -> &'static str {
    match self {
      RegistryRoot::ClassesRoot => "HKEY_CLASSES_ROOT",
      RegistryRoot::CurrentConfig => "HKEY_CURRENT_CONFIG",
      RegistryRoot::CurrentUser => "HKEY_CURRENT_USER",
      RegistryRoot::LocalMachine => "HKEY_LOCAL_MACHINE",
      RegistryRoot::Users => "HKEY_USERS",
    }
  }
}

impl fmt::Display for RegistryRoot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for RegistryRoot {
  type Err = Error;

  /// Parses the conventional `HKEY_*` spellings. Anything else is rejected
  /// before any OS call is attempted.
  fn from_str(s: &str) -> Result<Self> {
    match s {
      "HKEY_CLASSES_ROOT" => Ok(RegistryRoot::ClassesRoot),
      "HKEY_CURRENT_CONFIG" => Ok(RegistryRoot::CurrentConfig),
      "HKEY_CURRENT_USER" => Ok(RegistryRoot::CurrentUser),
      "HKEY_LOCAL_MACHINE" => Ok(RegistryRoot::LocalMachine),
      "HKEY_USERS" => Ok(RegistryRoot::Users),
      _ => Err(Error::InvalidInput(format!("unknown registry root key: {s}"))),
    }
  }
}

/// Reads a string value, trying the 32-bit registry view first and retrying
/// once under the 64-bit view.
///
/// A value or key that exists in neither view yields `Ok(None)`. Permission
/// denials and other unexpected status codes are surfaced as
/// [`Error::Access`].
pub fn read_registry_string(
  root: RegistryRoot,
  subkey: &str,
  value: &str,
  sink: Option<&dyn DiagnosticsSink>,
) -> Result<Option<String>> {
  imp::read_registry_string(root, subkey, value, sink)
}

/// Lists the names of a key's direct children.
///
/// A key that does not exist yields an empty list; a failure while
/// enumerating an existing key is an [`Error::Access`] carrying the key
/// path.
pub fn registry_sub_keys(root: RegistryRoot, subkey: &str, sink: Option<&dyn DiagnosticsSink>) -> Result<Vec<String>> {
  imp::registry_sub_keys(root, subkey, sink)
}

#[cfg(windows)]
mod imp {
  use std::ptr;

  use windows_sys::Win32::Foundation::{ERROR_FILE_NOT_FOUND, ERROR_NO_MORE_ITEMS, ERROR_PATH_NOT_FOUND, ERROR_SUCCESS, WIN32_ERROR};
  use windows_sys::Win32::System::Registry::{
    HKEY, HKEY_CLASSES_ROOT, HKEY_CURRENT_CONFIG, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, HKEY_USERS,
    KEY_ENUMERATE_SUB_KEYS, REG_ROUTINE_FLAGS, RRF_RT_REG_SZ, RRF_SUBKEY_WOW6432KEY, RRF_SUBKEY_WOW6464KEY,
    RegCloseKey, RegEnumKeyExW, RegGetValueW, RegOpenKeyExW, RegQueryInfoKeyW,
  };

  use super::RegistryRoot;
  use crate::diag::{self, DiagnosticsSink, LogLevel};
  use crate::error::{Error, Result};

  /// Owned registry key handle, closed on every exit path.
  struct KeyHandle(HKEY);

  impl Drop for KeyHandle {
    fn drop(&mut self) {
      // SAFETY: the handle was opened by RegOpenKeyExW and is closed exactly
      // once.
      unsafe {
        RegCloseKey(self.0);
      }
    }
  }

  fn native_root(root: RegistryRoot) -> HKEY {
    match root {
      RegistryRoot::ClassesRoot => HKEY_CLASSES_ROOT,
      RegistryRoot::CurrentConfig => HKEY_CURRENT_CONFIG,
      RegistryRoot::CurrentUser => HKEY_CURRENT_USER,
      RegistryRoot::LocalMachine => HKEY_LOCAL_MACHINE,
      RegistryRoot::Users => HKEY_USERS,
    }
  }

  fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(Some(0)).collect()
  }

  /// The registry reports a missing key and a missing value with the same
  /// family of status codes; both are expected absence.
  fn is_absent(status: WIN32_ERROR) -> bool {
    status == ERROR_FILE_NOT_FOUND || status == ERROR_PATH_NOT_FOUND
  }

  fn access_error(operation: &'static str, target: String, status: WIN32_ERROR) -> Error {
    Error::access(operation, target, std::io::Error::from_raw_os_error(status as i32))
  }

  /// One `RegGetValueW` lookup under a single registry view, sizing the
  /// buffer from a preliminary query.
  fn read_with_view(
    root: HKEY,
    subkey: &[u16],
    value: &[u16],
    view: REG_ROUTINE_FLAGS,
  ) -> std::result::Result<String, WIN32_ERROR> {
    let mut byte_len: u32 = 0;

    // SAFETY: a null data pointer asks only for the required size.
    let status = unsafe {
      RegGetValueW(
        root,
        subkey.as_ptr(),
        value.as_ptr(),
        RRF_RT_REG_SZ | view,
        ptr::null_mut(),
        ptr::null_mut(),
        &mut byte_len,
      )
    };
    if status != ERROR_SUCCESS {
      return Err(status);
    }

    let mut buffer = vec![0u16; (byte_len as usize).div_ceil(2)];

    // SAFETY: the buffer is valid for byte_len bytes as reported by the
    // size query above.
    let status = unsafe {
      RegGetValueW(
        root,
        subkey.as_ptr(),
        value.as_ptr(),
        RRF_RT_REG_SZ | view,
        ptr::null_mut(),
        buffer.as_mut_ptr().cast(),
        &mut byte_len,
      )
    };
    if status != ERROR_SUCCESS {
      return Err(status);
    }

    // Cut at the terminator rather than trusting the reported length.
    let end = buffer.iter().position(|&unit| unit == 0).unwrap_or(buffer.len());
    Ok(String::from_utf16_lossy(&buffer[..end]))
  }

  pub fn read_registry_string(
    root: RegistryRoot,
    subkey: &str,
    value: &str,
    sink: Option<&dyn DiagnosticsSink>,
  ) -> Result<Option<String>> {
    diag::emit_with(sink, LogLevel::Trace, || {
      format!("getting string for registry key, subkey and value: {root}, {subkey}, {value}")
    });

    let hkey = native_root(root);
    let subkey_wide = to_wide(subkey);
    let value_wide = to_wide(value);

    let looked_up = read_with_view(hkey, &subkey_wide, &value_wide, RRF_SUBKEY_WOW6432KEY).or_else(|_| {
      // The store may redirect differently per view and only one view may
      // hold the sought value.
      diag::emit_with(sink, LogLevel::Info, || {
        "failed to get string value from 32-bit registry view, trying 64-bit registry view".to_string()
      });
      read_with_view(hkey, &subkey_wide, &value_wide, RRF_SUBKEY_WOW6464KEY)
    });

    match looked_up {
      Ok(string_value) => {
        diag::emit_with(sink, LogLevel::Info, || format!("found string: {string_value}"));
        Ok(Some(string_value))
      }
      Err(status) if is_absent(status) => {
        diag::emit_with(sink, LogLevel::Info, || "failed to get string value".to_string());
        Ok(None)
      }
      Err(status) => Err(access_error("RegGetValue", format!("{root}\\{subkey}\\{value}"), status)),
    }
  }

  pub fn registry_sub_keys(
    root: RegistryRoot,
    subkey: &str,
    sink: Option<&dyn DiagnosticsSink>,
  ) -> Result<Vec<String>> {
    diag::emit_with(sink, LogLevel::Trace, || {
      format!("getting subkey names for registry key and subkey: {root}, {subkey}")
    });

    let subkey_wide = to_wide(subkey);
    let mut raw: HKEY = ptr::null_mut();

    // SAFETY: the out pointer is valid; the handle is wrapped immediately on
    // success.
    let status = unsafe {
      RegOpenKeyExW(native_root(root), subkey_wide.as_ptr(), 0, KEY_ENUMERATE_SUB_KEYS, &mut raw)
    };
    if status != ERROR_SUCCESS {
      // Failure to open is most commonly a key that simply does not exist,
      // which is an unexceptional state.
      diag::emit_with(sink, LogLevel::Warn, || {
        format!(
          "failed to open the registry key \"{root}\\{subkey}\": {}",
          std::io::Error::from_raw_os_error(status as i32)
        )
      });
      return Ok(Vec::new());
    }
    let key = KeyHandle(raw);

    let mut max_name_len: u32 = 0;

    // SAFETY: only the max-subkey-length out parameter is requested.
    let status = unsafe {
      RegQueryInfoKeyW(
        key.0,
        ptr::null_mut(),
        ptr::null_mut(),
        ptr::null_mut(),
        ptr::null_mut(),
        &mut max_name_len,
        ptr::null_mut(),
        ptr::null_mut(),
        ptr::null_mut(),
        ptr::null_mut(),
        ptr::null_mut(),
        ptr::null_mut(),
      )
    };
    if status != ERROR_SUCCESS {
      return Err(access_error("RegQueryInfoKey", format!("{root}\\{subkey}"), status));
    }

    let mut names = Vec::new();
    let mut index: u32 = 0;

    loop {
      let mut buffer = vec![0u16; max_name_len as usize + 1];
      let mut name_len = buffer.len() as u32;

      // SAFETY: the name buffer is valid for name_len units.
      let status = unsafe {
        RegEnumKeyExW(
          key.0,
          index,
          buffer.as_mut_ptr(),
          &mut name_len,
          ptr::null_mut(),
          ptr::null_mut(),
          ptr::null_mut(),
          ptr::null_mut(),
        )
      };

      match status {
        ERROR_SUCCESS => {
          names.push(String::from_utf16_lossy(&buffer[..name_len as usize]));
          index += 1;
        }
        ERROR_NO_MORE_ITEMS => break,
        _ => return Err(access_error("RegEnumKeyEx", format!("{root}\\{subkey}"), status)),
      }
    }

    Ok(names)
  }
}

#[cfg(not(windows))]
mod imp {
  use super::RegistryRoot;
  use crate::diag::{self, DiagnosticsSink, LogLevel};
  use crate::error::Result;

  // This host has no registry-style store; every lookup reports absence.

  pub fn read_registry_string(
    root: RegistryRoot,
    subkey: &str,
    value: &str,
    sink: Option<&dyn DiagnosticsSink>,
  ) -> Result<Option<String>> {
    diag::emit_with(sink, LogLevel::Trace, || {
      format!("no registry-style store on this platform, reporting {root}\\{subkey}\\{value} as absent")
    });
    Ok(None)
  }

  pub fn registry_sub_keys(
    root: RegistryRoot,
    subkey: &str,
    sink: Option<&dyn DiagnosticsSink>,
  ) -> Result<Vec<String>> {
    diag::emit_with(sink, LogLevel::Trace, || {
      format!("no registry-style store on this platform, reporting {root}\\{subkey} as empty")
    });
    Ok(Vec::new())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::diag::MemorySink;

  #[test]
  fn root_key_names_round_trip() {
    for root in [
      RegistryRoot::ClassesRoot,
      RegistryRoot::CurrentConfig,
      RegistryRoot::CurrentUser,
      RegistryRoot::LocalMachine,
      RegistryRoot::Users,
    ] {
      assert_eq!(root.as_str().parse::<RegistryRoot>().unwrap(), root);
    }
  }

  #[test]
  fn unknown_root_key_is_invalid_input() {
    let err = "HKEY_PERFORMANCE_DATA".parse::<RegistryRoot>().unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
  }

  #[test]
  fn missing_value_is_absent_not_an_error() {
    let value = read_registry_string(
      RegistryRoot::CurrentUser,
      r"Software\Gamescout\DoesNotExist",
      "InstallLocation",
      None,
    )
    .unwrap();

    assert_eq!(value, None);
  }

  #[test]
  fn missing_key_enumerates_as_empty() {
    let sink = MemorySink::new();
    let names = registry_sub_keys(RegistryRoot::LocalMachine, r"Software\Gamescout\DoesNotExist", Some(&sink)).unwrap();

    assert!(names.is_empty());
    assert!(!sink.messages().is_empty());
  }
}
