//! CLI command for listing the palette table

use console::style;
use image::Rgba;

use crate::config::Config;
use crate::palette::Role;

fn hex(color: Rgba<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

pub fn execute(config: &Config) -> anyhow::Result<()> {
    let palette = config.palette();
    let sets = palette.color_sets(&config.marker)?;

    print!("{:>4}  {:<10}", "code", "name");
    for role in Role::ALL {
        print!("  {:<13}", role.name());
    }
    println!();

    for (set, entry) in sets.iter().zip(palette.entries()) {
        let code = if set.code() == config.default_palette {
            style(format!("{:>4}", set.code())).bold().to_string()
        } else {
            format!("{:>4}", set.code())
        };
        print!("{code}  {:<10}", entry.name.as_deref().unwrap_or("-"));
        for (_, color) in set.iter() {
            print!("  {:<13}", hex(color));
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_ignores_alpha() {
        assert_eq!(hex(Rgba([45, 95, 117, 255])), "#2d5f75");
    }
}
