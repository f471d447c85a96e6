//! shadow-forge CLI - export a box-shadow style block from the command line

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use shadow_forge::{
    Configurable, ExportError, FieldId, ShadowGenerator, ShadowProfile, ShadowType, TwinSide,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Emit {
    /// The `.element { ... }` block
    Css,
    /// The resulting profile as JSON
    Json,
    /// The live preview styles as JSON
    Preview,
}

#[derive(Parser)]
#[command(name = "shadow-forge")]
#[command(about = "Generate CSS box-shadow declarations", long_about = None)]
struct Cli {
    /// Start from a profile JSON file instead of the defaults
    #[arg(long)]
    profile: Option<PathBuf>,

    #[arg(long, allow_hyphen_values = true)]
    horizontal: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    vertical: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    blur: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    spread: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    opacity: Option<String>,

    #[arg(long)]
    shadow_color: Option<String>,

    #[arg(long)]
    background_color: Option<String>,

    #[arg(long)]
    box_color: Option<String>,

    #[arg(long, value_enum)]
    shadow_type: Option<ShadowType>,

    /// What to print
    #[arg(long, value_enum, default_value_t = Emit::Css)]
    emit: Emit,
}

impl Cli {
    fn edits(&self) -> impl Iterator<Item = (FieldId, &str)> {
        [
            (FieldId::Horizontal, &self.horizontal),
            (FieldId::Vertical, &self.vertical),
            (FieldId::Blur, &self.blur),
            (FieldId::Spread, &self.spread),
            (FieldId::Opacity, &self.opacity),
            (FieldId::ShadowColor, &self.shadow_color),
            (FieldId::BackgroundColor, &self.background_color),
            (FieldId::BoxColor, &self.box_color),
        ]
        .into_iter()
        .filter_map(|(field, raw)| raw.as_deref().map(|raw| (field, raw)))
    }
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut generator = ShadowGenerator::new(());
    if let Some(path) = &cli.profile {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read profile {}", path.display()))?;
        let profile = ShadowProfile::from_json(&json)
            .with_context(|| format!("invalid profile {}", path.display()))?;
        generator.apply_profile(&profile);
    }

    for (field, raw) in cli.edits() {
        generator.edit(field, TwinSide::Secondary, raw);
    }
    if let Some(shadow_type) = cli.shadow_type {
        generator.set_shadow_type(shadow_type);
    }

    match cli.emit {
        Emit::Css => match generator.export() {
            Ok(css) => println!("{css}"),
            Err(ExportError::InvalidForm(report)) => {
                for (field, result) in report.errors() {
                    eprintln!("{}: {}", field.label(), result.message);
                }
                bail!("{} field(s) are invalid", report.errors().count());
            }
            Err(e) => return Err(e.into()),
        },
        Emit::Json => println!("{}", generator.export_profile().to_json_pretty()?),
        Emit::Preview => println!("{}", serde_json::to_string_pretty(&generator.preview())?),
    }

    Ok(())
}
