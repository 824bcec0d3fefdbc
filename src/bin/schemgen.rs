use schemgen::{
    export, font::FontGlyphProvider, Compression, ExportConfig, ExportError, Generator,
    GlyphProvider, NoGlyphs, Orientation,
};

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(version, about = "Generate voxel structure schematics")]
struct Cli {
    /// Directory the .nbt files are written to.
    #[arg(long, default_value = schemgen::export::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Gzip level, 0 (store) to 9 (smallest).
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(0..=9))]
    level: u32,

    /// TrueType font used by `generate-text`.
    #[arg(long)]
    font: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    GenerateCircle {
        radius: i32,
        /// `horizontal` or `vertical`
        orientation: String,
    },
    GenerateSphere {
        radius: i32,
    },
    GenerateParabola {
        width: i32,
        height: i32,
    },
    GenerateText {
        fontsize: u32,
        #[arg(trailing_var_arg = true, required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

fn run(cli: Cli) -> Result<String, ExportError> {
    let generator = match cli.command {
        Command::GenerateCircle {
            radius,
            orientation,
        } => Generator::Circle {
            radius,
            orientation: orientation.parse::<Orientation>()?,
        },
        Command::GenerateSphere { radius } => Generator::Sphere { radius },
        Command::GenerateParabola { width, height } => Generator::Parabola { width, height },
        Command::GenerateText { fontsize, text } => Generator::Text {
            font_size: fontsize,
            text: text.join(" "),
        },
    };
    generator.validate()?;

    let config = ExportConfig {
        output_dir: cli.output_dir,
        compression: Compression { level: cli.level },
    };

    let glyphs: Box<dyn GlyphProvider> = match (&cli.font, generator.needs_glyphs()) {
        (Some(path), true) => Box::new(FontGlyphProvider::from_file(path)?),
        _ => Box::new(NoGlyphs),
    };

    Ok(export(&generator, glyphs.as_ref(), &config)?.message)
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(message) => {
            println!("{}", message);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
