//! Case-insensitive filename comparison matching host filesystem semantics.

use std::cmp::Ordering;

use crate::error::Result;

/// Compares two filenames case-insensitively, the way the host filesystem
/// itself folds case.
///
/// On Windows this goes through `CompareStringOrdinal`, which folds through
/// the operating system uppercase table - the same mapping path lookups use,
/// independent of locale. Elsewhere the comparison applies Unicode default
/// case folding, matching the case-insensitive catalog semantics of the
/// common desktop filesystems.
///
/// Inputs are required to be valid text in the platform's comparison
/// encoding; `&str` guarantees that on the folding path, while the Windows
/// API reports an invalid argument as [`Error::InvalidInput`].
///
/// [`Error::InvalidInput`]: crate::Error::InvalidInput
pub fn compare_filenames(lhs: &str, rhs: &str) -> Result<Ordering> {
  imp::compare_filenames(lhs, rhs)
}

#[cfg(windows)]
mod imp {
  use std::cmp::Ordering;

  use windows_sys::Win32::Globalization::{CSTR_EQUAL, CSTR_GREATER_THAN, CSTR_LESS_THAN, CompareStringOrdinal};

  use crate::error::{Error, Result};

  pub fn compare_filenames(lhs: &str, rhs: &str) -> Result<Ordering> {
    let lhs_wide: Vec<u16> = lhs.encode_utf16().collect();
    let rhs_wide: Vec<u16> = rhs.encode_utf16().collect();

    // SAFETY: both buffers are valid for the lengths passed and outlive the
    // call; CompareStringOrdinal does not mutate them.
    let result = unsafe {
      CompareStringOrdinal(
        lhs_wide.as_ptr(),
        lhs_wide.len() as i32,
        rhs_wide.as_ptr(),
        rhs_wide.len() as i32,
        1,
      )
    };

    match result {
      CSTR_LESS_THAN => Ok(Ordering::Less),
      CSTR_EQUAL => Ok(Ordering::Equal),
      CSTR_GREATER_THAN => Ok(Ordering::Greater),
      _ => Err(Error::InvalidInput(
        "one of the filenames to compare was invalid".to_string(),
      )),
    }
  }
}

#[cfg(not(windows))]
mod imp {
  use std::cmp::Ordering;

  use unicase::UniCase;

  use crate::error::Result;

  pub fn compare_filenames(lhs: &str, rhs: &str) -> Result<Ordering> {
    Ok(UniCase::unicode(lhs).cmp(&UniCase::unicode(rhs)))
  }
}
