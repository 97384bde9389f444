//! Registry command implementations.
//!
//! Thin wrappers over the platform layer's read-only configuration store
//! access. Absent values and keys print as such; they are not errors.

use anyhow::Result;
use gamescout_platform::{HostPlatform, RegistryRoot};

use crate::output::{self, print_info, print_stat};

pub fn cmd_reg_get(host: &dyn HostPlatform, root: &str, subkey: &str, value: &str, json: bool) -> Result<()> {
  let root: RegistryRoot = root.parse()?;
  let found = host.read_registry_string(root, subkey, value)?;

  if json {
    return output::print_json(&serde_json::json!({
      "root": root,
      "subkey": subkey,
      "value": value,
      "data": found,
    }));
  }

  match found {
    Some(data) => print_stat(value, &data),
    None => print_info(&format!("{root}\\{subkey}\\{value} is absent")),
  }

  Ok(())
}

pub fn cmd_reg_keys(host: &dyn HostPlatform, root: &str, subkey: &str, json: bool) -> Result<()> {
  let root: RegistryRoot = root.parse()?;
  let names = host.registry_sub_keys(root, subkey)?;

  if json {
    return output::print_json(&names);
  }

  if names.is_empty() {
    print_info(&format!("{root}\\{subkey} has no child keys"));
    return Ok(());
  }

  for name in &names {
    print_info(name);
  }

  Ok(())
}
