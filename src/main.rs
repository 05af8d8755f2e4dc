use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use glyphpack::{
    copy_with_parents, parse_hex_color, CatalogSource, FontCatalog, GeneratorConfig,
    GlyphRenderer, PackGenerator, Style,
};

#[derive(Parser)]
#[command(name = "glyphpack")]
#[command(about = "Rasterize a glyph-font icon library into a PNG icon pack")]
struct Cli {
    /// Icon style to generate
    #[arg(short, long, default_value = "solid")]
    style: Style,

    /// Icon (foreground) color, 3- or 6-digit hex
    #[arg(short, long, default_value = "FFFFFF")]
    icon_color: String,

    /// Background color, 3- or 6-digit hex
    #[arg(short, long, default_value = "0A1423")]
    background_color: String,

    /// Output directory (defaults to icon-pack-<style>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory containing icons.yml and categories.yml
    #[arg(long)]
    metadata_dir: Option<PathBuf>,

    /// Directory containing the style's font file
    #[arg(long)]
    font_dir: Option<PathBuf>,

    /// Use the licensed metadata/font source
    #[arg(long)]
    licensed: bool,

    /// Extra files to copy into the output root (license text, pack icon, ...)
    #[arg(long = "copy", value_name = "FILE")]
    copy: Vec<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "info" }),
    )
    .init();

    let config = GeneratorConfig {
        style: cli.style,
        icon_color: parse_hex_color(&cli.icon_color).context("invalid --icon-color")?,
        background_color: parse_hex_color(&cli.background_color)
            .context("invalid --background-color")?,
        output_root: cli
            .output
            .unwrap_or_else(|| PathBuf::from(format!("icon-pack-{}", cli.style))),
        licensed: cli.licensed,
    };

    // The free and licensed cuts ship metadata and fonts in different trees.
    let source_root = if config.licensed { "pro" } else { "free" };
    let metadata_dir = cli
        .metadata_dir
        .unwrap_or_else(|| PathBuf::from(source_root).join("metadata"));
    let font_dir = cli
        .font_dir
        .unwrap_or_else(|| PathBuf::from(source_root).join("webfonts"));

    let font_path = font_dir.join(config.style.font_file());
    let font_bytes = fs::read(&font_path)
        .with_context(|| format!("failed to read font {}", font_path.display()))?;
    let mut fonts = FontCatalog::new(config.licensed);
    fonts.register(config.style, &font_bytes)?;

    let generator = PackGenerator::new(
        CatalogSource::in_dir(&metadata_dir),
        GlyphRenderer::new(fonts),
    );
    let output = generator.generate(&config)?;

    for file in &cli.copy {
        let name = file
            .file_name()
            .with_context(|| format!("{} has no file name", file.display()))?;
        copy_with_parents(file, &output.root.join(name))
            .with_context(|| format!("failed to copy {}", file.display()))?;
    }

    println!(
        "Generated {} icons into {}",
        output.entries.len(),
        output.root.display()
    );
    Ok(())
}
