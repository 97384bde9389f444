//! Compare command implementation.

use std::cmp::Ordering;

use anyhow::Result;
use gamescout_platform::HostPlatform;

use crate::output;

pub fn cmd_compare(host: &dyn HostPlatform, lhs: &str, rhs: &str, json: bool) -> Result<()> {
  let ordering = host.compare_filenames(lhs, rhs)?;

  let word = match ordering {
    Ordering::Less => "less",
    Ordering::Equal => "equal",
    Ordering::Greater => "greater",
  };

  if json {
    return output::print_json(&serde_json::json!({
      "lhs": lhs,
      "rhs": rhs,
      "ordering": word,
    }));
  }

  match ordering {
    Ordering::Equal => println!("{lhs} and {rhs} are equal"),
    Ordering::Less => println!("{lhs} orders before {rhs}"),
    Ordering::Greater => println!("{lhs} orders after {rhs}"),
  }

  Ok(())
}
