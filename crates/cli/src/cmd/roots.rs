//! Roots command implementation.
//!
//! Lists mounted filesystem roots and optionally probes each one for a
//! redirect marker.

use anyhow::Result;
use gamescout_platform::{DiagnosticMessage, Error, HostPlatform, Severity, messages_as_markdown};

use crate::output::{self, print_info};

pub fn cmd_roots(host: &dyn HostPlatform, redirects: bool, json: bool) -> Result<()> {
  let roots = host.drive_root_paths()?;

  if !redirects {
    if json {
      return output::print_json(&roots);
    }

    for root in &roots {
      print_info(&root.display().to_string());
    }
    return Ok(());
  }

  let mut entries = Vec::new();
  let mut problems = Vec::new();

  for root in &roots {
    match host.find_redirect(root) {
      Ok(record) => entries.push((root, record)),
      Err(err @ Error::MalformedMarker { .. }) => {
        // One bad marker should not hide the other roots.
        problems.push(DiagnosticMessage::new(Severity::Warning, err.to_string()));
        entries.push((root, None));
      }
      Err(err) => return Err(err.into()),
    }
  }

  if json {
    let list: Vec<_> = entries
      .iter()
      .map(|(root, record)| {
        serde_json::json!({
          "root": root,
          "redirect": record.as_ref().map(|r| &r.target_path),
        })
      })
      .collect();
    return output::print_json(&list);
  }

  for (root, record) in &entries {
    match record {
      Some(record) => print_info(&format!(
        "{} {} {}",
        root.display(),
        output::symbols::ARROW,
        record.target_path.display()
      )),
      None => print_info(&root.display().to_string()),
    }
  }

  if !problems.is_empty() {
    println!();
    print!("{}", messages_as_markdown(&problems));
  }

  Ok(())
}
