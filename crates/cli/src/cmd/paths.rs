//! Paths command implementation.
//!
//! Shows the well-known paths the platform layer resolves for this process.

use anyhow::Result;
use gamescout_platform::HostPlatform;

use crate::output::{self, print_stat};

pub fn cmd_paths(host: &dyn HostPlatform, json: bool) -> Result<()> {
  let executable_dir = host.executable_directory()?;
  let app_data_root = host.local_app_data_root();

  if json {
    return output::print_json(&serde_json::json!({
      "executable_dir": executable_dir,
      "local_app_data_root": app_data_root,
    }));
  }

  print_stat("Executable dir", &executable_dir.display().to_string());
  print_stat("App data root", &app_data_root.display().to_string());

  Ok(())
}
