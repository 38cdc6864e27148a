//! CLI command for previewing a path remap

use std::path::Path;

use crate::config::Config;
use crate::paths::try_remap_path;

pub fn execute(config: &Config, path: &Path, target: u32) -> anyhow::Result<()> {
    let set = config.palette().color_set(target, &config.marker)?;
    println!("{}", try_remap_path(path, &set)?.display());
    Ok(())
}
