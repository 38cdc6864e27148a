//! CLI command for listing the sprites of one palette

use std::path::PathBuf;

use crate::config::Config;
use crate::locate::locate_all;

pub fn execute(config: &Config, code: Option<u32>) -> anyhow::Result<()> {
    let code = code.unwrap_or(config.default_palette);
    let set = config.palette().color_set(code, &config.marker)?;

    let roots: Vec<PathBuf> = config
        .roots
        .iter()
        .map(|root| config.base_dir.join(root))
        .collect();
    let assets = locate_all(&roots, &set, &config.extensions)?;

    for asset in &assets {
        let relative = asset.strip_prefix(&config.base_dir).unwrap_or(asset);
        println!("{}", relative.display());
    }
    println!();
    println!("{} sprites in {}", assets.len(), set.folder_name());

    Ok(())
}
