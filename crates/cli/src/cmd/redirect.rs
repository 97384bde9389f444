//! Redirect command implementation.
//!
//! Probes a single filesystem root for a redirect marker and reports the
//! decoded target.

use std::path::Path;

use anyhow::Result;
use gamescout_platform::HostPlatform;

use crate::output::{self, print_error, print_info};

pub fn cmd_redirect(host: &dyn HostPlatform, root: &Path, json: bool) -> Result<()> {
  let record = match host.find_redirect(root) {
    Ok(record) => record,
    Err(e) => {
      print_error(&e.to_string());
      return Err(e.into());
    }
  };

  if json {
    return output::print_json(&record);
  }

  match record {
    Some(record) => print_info(&format!(
      "{} {} {}",
      record.source_root.display(),
      output::symbols::ARROW,
      record.target_path.display()
    )),
    None => print_info(&format!("no redirect marker at {}", root.display())),
  }

  Ok(())
}
