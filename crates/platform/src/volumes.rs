//! Enumeration of mounted filesystem roots.

use std::path::PathBuf;

use crate::error::Result;

/// Lists all mounted filesystem roots at the time of the call.
///
/// The result reflects live OS mount state: repeated calls may differ as
/// volumes come and go, and no ordering beyond the OS's own is promised.
/// Duplicated mount points are reported once.
pub fn drive_root_paths() -> Result<Vec<PathBuf>> {
  imp::drive_root_paths()
}

#[cfg(windows)]
mod imp {
  use std::io;
  use std::path::PathBuf;
  use std::ptr;

  use windows_sys::Win32::Storage::FileSystem::GetLogicalDriveStringsW;

  use crate::error::{Error, Result};

  pub fn drive_root_paths() -> Result<Vec<PathBuf>> {
    // SAFETY: a zero-length query writes nothing and returns the required
    // buffer length.
    let required = unsafe { GetLogicalDriveStringsW(0, ptr::null_mut()) };
    if required == 0 {
      return Err(Error::access(
        "GetLogicalDriveStrings",
        "drive root list",
        io::Error::last_os_error(),
      ));
    }

    // Room for the final terminating null character.
    let mut buffer = vec![0u16; required as usize + 1];

    // SAFETY: the buffer is valid for buffer.len() units.
    let written = unsafe { GetLogicalDriveStringsW(buffer.len() as u32, buffer.as_mut_ptr()) };
    if written == 0 {
      return Err(Error::access(
        "GetLogicalDriveStrings",
        "drive root list",
        io::Error::last_os_error(),
      ));
    }

    buffer.truncate(written as usize);

    Ok(super::split_drive_strings(&buffer))
  }
}

#[cfg(not(windows))]
mod imp {
  use std::fs::File;
  use std::io::BufReader;
  use std::path::PathBuf;

  use crate::error::{Error, Result};

  const MOUNTS_PATH: &str = "/proc/self/mounts";

  pub fn drive_root_paths() -> Result<Vec<PathBuf>> {
    let file =
      File::open(MOUNTS_PATH).map_err(|source| Error::access("open mount table", MOUNTS_PATH, source))?;

    Ok(super::parse_mount_table(BufReader::new(file)))
  }
}

/// Splits the `GetLogicalDriveStringsW` output format - a run of
/// NUL-terminated UTF-16 segments ended by an empty segment - into distinct
/// paths.
#[cfg(any(windows, test))]
fn split_drive_strings(buffer: &[u16]) -> Vec<PathBuf> {
  let mut paths = Vec::new();

  for segment in buffer.split(|&unit| unit == 0) {
    if segment.is_empty() {
      continue;
    }

    let path = PathBuf::from(String::from_utf16_lossy(segment));
    if !paths.contains(&path) {
      paths.push(path);
    }
  }

  paths
}

/// Parses a line-oriented mount table in `/proc/self/mounts` format into the
/// set of distinct mount points.
///
/// Individual malformed lines are skipped; the table has no fixed upper
/// bound on entries.
#[cfg(any(not(windows), test))]
fn parse_mount_table<R: std::io::BufRead>(reader: R) -> Vec<PathBuf> {
  let mut paths = Vec::new();

  for line in reader.lines().map_while(std::io::Result::ok) {
    let Some(mount_dir) = line.split_ascii_whitespace().nth(1) else {
      continue;
    };

    let path = PathBuf::from(unescape_mount_field(mount_dir));
    if !paths.contains(&path) {
      paths.push(path);
    }
  }

  paths
}

/// Decodes the octal escapes (`\040` for space and friends) that the kernel
/// uses for whitespace in mount table fields.
#[cfg(any(not(windows), test))]
fn unescape_mount_field(field: &str) -> String {
  fn octal_triple(digits: &[u8]) -> Option<u8> {
    if digits.iter().all(|digit| (b'0'..=b'7').contains(digit)) {
      let text = std::str::from_utf8(digits).ok()?;
      u8::from_str_radix(text, 8).ok()
    } else {
      None
    }
  }

  let bytes = field.as_bytes();
  let mut out = Vec::with_capacity(bytes.len());
  let mut i = 0;

  while i < bytes.len() {
    if bytes[i] == b'\\'
      && i + 3 < bytes.len()
      && let Some(value) = octal_triple(&bytes[i + 1..i + 4])
    {
      out.push(value);
      i += 4;
    } else {
      out.push(bytes[i]);
      i += 1;
    }
  }

  String::from_utf8_lossy(&out).into_owned()
}
