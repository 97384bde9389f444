//! Detection and decoding of per-drive redirect marker files.
//!
//! Some installers drop a small binary file named `.GamingRoot` at the root
//! of a drive to record where installs on that drive were redirected to.
//! The content is the byte sequence `52 47 42 58 01 00 00 00` followed by
//! the NUL-terminated UTF-16LE path of the games folder relative to the same
//! drive.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::diag::{self, DiagnosticsSink, LogLevel};
use crate::error::{Error, Result};

/// Name of the marker file probed at each filesystem root.
pub const MARKER_FILE_NAME: &str = ".GamingRoot";

/// Number of 16-bit units in the fixed signature/version header.
const HEADER_UNITS: usize = 4;

/// A decoded redirect marker.
///
/// Query result only: recomputed on every call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectRecord {
  /// The filesystem root the marker was found under.
  pub source_root: PathBuf,
  /// The root joined with the relative path decoded from the marker.
  pub target_path: PathBuf,
}

/// Probes `root` for a redirect marker file and decodes it.
///
/// A missing marker is `Ok(None)`, and so is any failure to read it: an
/// unreadable file is indistinguishable from a drive that is not ready
/// (e.g. a removable disk drive with nothing in it), which is a normal
/// state at enumeration time. Marker content that violates the format is
/// [`Error::MalformedMarker`].
pub fn find_redirect(root: &Path, sink: Option<&dyn DiagnosticsSink>) -> Result<Option<RedirectRecord>> {
  let marker_path = root.join(MARKER_FILE_NAME);

  if !marker_path.is_file() {
    return Ok(None);
  }

  let bytes = match fs::read(&marker_path) {
    Ok(bytes) => bytes,
    Err(err) => {
      diag::emit_with(sink, LogLevel::Error, || {
        format!("failed to read file at {}: {err}", marker_path.display())
      });
      return Ok(None);
    }
  };

  diag::emit_with(sink, LogLevel::Debug, || {
    format!(
      "read the following bytes from {}: {}",
      marker_path.display(),
      hex_bytes(&bytes)
    )
  });

  let relative_path = decode_marker(&marker_path, &bytes)?;

  diag::emit_with(sink, LogLevel::Debug, || {
    format!("read the following relative path from {MARKER_FILE_NAME}: {relative_path}")
  });

  Ok(Some(RedirectRecord {
    source_root: root.to_path_buf(),
    target_path: root.join(&relative_path),
  }))
}

/// Decodes marker byte content into the relative path it carries.
fn decode_marker(marker_path: &Path, bytes: &[u8]) -> Result<String> {
  if bytes.len() % 2 != 0 {
    return Err(Error::MalformedMarker {
      path: marker_path.to_path_buf(),
      reason: "found a non-even number of bytes, cannot interpret the content as UTF-16LE".to_string(),
    });
  }

  let units: Vec<u16> = bytes
    .chunks_exact(2)
    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
    .collect();

  if units.len() < HEADER_UNITS + 1 {
    return Err(Error::MalformedMarker {
      path: marker_path.to_path_buf(),
      reason: "file is shorter than expected".to_string(),
    });
  }

  // The first four units are a fixed signature/version header that is not
  // re-validated. The final unit is dropped unconditionally, terminator or
  // not; markers in the wild rely on that.
  let relative_units = &units[HEADER_UNITS..units.len() - 1];

  String::from_utf16(relative_units).map_err(|_| Error::MalformedMarker {
    path: marker_path.to_path_buf(),
    reason: "the relative path is not valid UTF-16".to_string(),
  })
}

fn hex_bytes(bytes: &[u8]) -> String {
  bytes
    .iter()
    .map(|byte| format!("0x{byte:02x}"))
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
  use proptest::prelude::*;
  use tempfile::TempDir;

  use super::*;
  use crate::diag::MemorySink;

  const HEADER_BYTES: [u8; 8] = [0x52, 0x47, 0x42, 0x58, 0x01, 0x00, 0x00, 0x00];

  fn marker_bytes(relative_path: &str) -> Vec<u8> {
    let mut bytes = HEADER_BYTES.to_vec();
    for unit in relative_path.encode_utf16() {
      bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes.extend_from_slice(&[0x00, 0x00]);
    bytes
  }

  fn write_marker(root: &Path, bytes: &[u8]) {
    fs::write(root.join(MARKER_FILE_NAME), bytes).unwrap();
  }

  #[test]
  fn absent_marker_is_not_an_error() {
    let root = TempDir::new().unwrap();
    let sink = MemorySink::new();

    let record = find_redirect(root.path(), Some(&sink)).unwrap();

    assert_eq!(record, None);
    assert!(sink.messages().is_empty());
  }

  #[test]
  fn marker_that_is_a_directory_is_treated_as_absent() {
    let root = TempDir::new().unwrap();
    fs::create_dir(root.path().join(MARKER_FILE_NAME)).unwrap();

    assert_eq!(find_redirect(root.path(), None).unwrap(), None);
  }

  #[test]
  fn marker_decodes_to_target_under_the_same_root() {
    let root = TempDir::new().unwrap();
    write_marker(root.path(), &marker_bytes(r"Games\Install"));

    let record = find_redirect(root.path(), None).unwrap().unwrap();

    assert_eq!(record.source_root, root.path());
    assert_eq!(record.target_path, root.path().join(r"Games\Install"));
  }

  #[test]
  fn empty_relative_path_redirects_to_the_root_itself() {
    let root = TempDir::new().unwrap();
    write_marker(root.path(), &marker_bytes(""));

    let record = find_redirect(root.path(), None).unwrap().unwrap();

    assert_eq!(record.target_path, record.source_root);
  }

  #[test]
  fn odd_byte_count_is_malformed() {
    let root = TempDir::new().unwrap();
    let mut bytes = marker_bytes("Games");
    bytes.push(0x00);
    write_marker(root.path(), &bytes);

    let err = find_redirect(root.path(), None).unwrap_err();

    assert!(matches!(err, Error::MalformedMarker { .. }));
  }

  #[test]
  fn header_alone_is_shorter_than_expected() {
    let err = decode_marker(Path::new(".GamingRoot"), &HEADER_BYTES).unwrap_err();

    match err {
      Error::MalformedMarker { reason, .. } => assert_eq!(reason, "file is shorter than expected"),
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn final_unit_is_dropped_even_when_it_is_not_a_terminator() {
    // Last unit is 'X' rather than NUL; it is discarded all the same.
    let mut bytes = HEADER_BYTES.to_vec();
    for unit in "GamesX".encode_utf16() {
      bytes.extend_from_slice(&unit.to_le_bytes());
    }

    let relative = decode_marker(Path::new(".GamingRoot"), &bytes).unwrap();

    assert_eq!(relative, "Games");
  }

  #[test]
  fn unpaired_surrogate_in_path_is_malformed() {
    let mut bytes = HEADER_BYTES.to_vec();
    bytes.extend_from_slice(&0xd800u16.to_le_bytes());
    bytes.extend_from_slice(&[0x00, 0x00]);

    let err = decode_marker(Path::new(".GamingRoot"), &bytes).unwrap_err();

    assert!(matches!(err, Error::MalformedMarker { .. }));
  }

  #[test]
  fn malformed_marker_error_names_the_file() {
    let root = TempDir::new().unwrap();
    write_marker(root.path(), &[0x52]);

    let err = find_redirect(root.path(), None).unwrap_err();

    match err {
      Error::MalformedMarker { path, .. } => assert_eq!(path, root.path().join(MARKER_FILE_NAME)),
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn attached_sink_receives_hex_and_path_traces() {
    let root = TempDir::new().unwrap();
    write_marker(root.path(), &marker_bytes("Games"));
    let sink = MemorySink::new();

    find_redirect(root.path(), Some(&sink)).unwrap().unwrap();

    let messages = sink.messages();
    assert!(messages.iter().any(|(_, text)| text.contains("0x52 0x47 0x42 0x58")));
    assert!(messages.iter().any(|(_, text)| text.contains("Games")));
  }

  proptest! {
    #[test]
    fn any_odd_length_content_is_malformed(bytes in proptest::collection::vec(any::<u8>(), 1..64)) {
      prop_assume!(bytes.len() % 2 != 0);

      let err = decode_marker(Path::new(".GamingRoot"), &bytes).unwrap_err();
      prop_assert!(matches!(err, Error::MalformedMarker { .. }), "expected MalformedMarker, got {err:?}");
    }

    #[test]
    fn any_even_content_shorter_than_ten_bytes_is_malformed(units in proptest::collection::vec(any::<u16>(), 0..5)) {
      let bytes: Vec<u8> = units.iter().flat_map(|unit| unit.to_le_bytes()).collect();

      let err = decode_marker(Path::new(".GamingRoot"), &bytes).unwrap_err();
      prop_assert!(matches!(err, Error::MalformedMarker { .. }), "expected MalformedMarker, got {err:?}");
    }

    #[test]
    fn relative_paths_round_trip_exactly(relative in "[^\u{0}]{0,32}") {
      let mut bytes = HEADER_BYTES.to_vec();
      for unit in relative.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
      }
      bytes.extend_from_slice(&[0x00, 0x00]);

      let decoded = decode_marker(Path::new(".GamingRoot"), &bytes).unwrap();
      prop_assert_eq!(decoded, relative);
    }
  }
}
