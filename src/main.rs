use clap::{Parser, Subcommand, ValueEnum};
use retouch::filters::{ChannelOffset, FilterKind};
use retouch::render::{self, Zoom};
use retouch::session::Session;
use retouch::{batch, codec};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "retouch")]
#[command(about = "Pixel-level photo retoucher")]
#[command(long_about = "\
Pixel-level photo retoucher

Loads a raster image (PNG, JPEG, WebP), applies one per-pixel edit, and
exports lossless PNG. Edits are computed from the unedited source image,
so channel offsets describe an absolute adjustment and never compound.

Examples:

  retouch info photo.jpg
  retouch edit photo.jpg --filter sepia -o toned.png
  retouch edit photo.jpg --red 20 --blue -15 -o warmer.png
  retouch zoom sprite.png --factor 3.0 -o sprite-3x.png
  retouch batch ./shots --filter grayscale -o ./contact-sheet

Run 'retouch filters' to list the available filters.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Shared flags for commands that pick one edit.
#[derive(clap::Args)]
struct EditArgs {
    /// Named filter to apply
    #[arg(long, value_enum, conflicts_with_all = ["red", "green", "blue"])]
    filter: Option<NamedFilter>,

    /// Red channel offset, -255 to 255
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    red: i16,

    /// Green channel offset, -255 to 255
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    green: i16,

    /// Blue channel offset, -255 to 255
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    blue: i16,
}

#[derive(Subcommand)]
enum Command {
    /// Print image dimensions and format
    Info {
        image: PathBuf,
        /// Emit as JSON instead of a summary line
        #[arg(long)]
        json: bool,
    },
    /// Apply one filter or channel adjustment and export a PNG
    Edit {
        image: PathBuf,
        #[command(flatten)]
        edit: EditArgs,
        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Export a nearest-neighbor scaled PNG (hard pixel edges, no smoothing)
    Zoom {
        image: PathBuf,
        /// Zoom factor, clamped to 0.1–3.0
        #[arg(long)]
        factor: f32,
        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Apply one edit to every supported image under a directory
    Batch {
        input: PathBuf,
        #[command(flatten)]
        edit: EditArgs,
        /// Output directory (input-relative paths are mirrored)
        #[arg(short, long)]
        output: PathBuf,
        /// Emit the report as JSON instead of per-file lines
        #[arg(long)]
        json: bool,
    },
    /// List the available filters
    Filters,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NamedFilter {
    Grayscale,
    Invert,
    Sepia,
}

impl From<NamedFilter> for FilterKind {
    fn from(named: NamedFilter) -> Self {
        match named {
            NamedFilter::Grayscale => FilterKind::Grayscale,
            NamedFilter::Invert => FilterKind::Invert,
            NamedFilter::Sepia => FilterKind::Sepia,
        }
    }
}

impl EditArgs {
    /// Resolve the flags into one filter. `--filter` and the channel flags
    /// are mutually exclusive (clap enforces it); at least one must be given.
    fn resolve(&self) -> Result<FilterKind, String> {
        if let Some(named) = self.filter {
            return Ok(named.into());
        }
        let offset = ChannelOffset::new(self.red, self.green, self.blue);
        if offset.is_zero() {
            return Err(
                "specify --filter, or a channel adjustment via --red/--green/--blue".to_string(),
            );
        }
        Ok(FilterKind::ChannelOffset(offset))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Info { image, json } => {
            let info = codec::identify(&image)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "{}: {}x{} ({})",
                    image.display(),
                    info.width,
                    info.height,
                    info.format
                );
            }
        }
        Command::Edit {
            image,
            edit,
            output,
        } => {
            let kind = edit.resolve()?;
            let bytes = std::fs::read(&image)?;

            // Drive the same boundary a GUI host would
            let mut session = Session::new();
            session.image_selected(&bytes)?;
            match kind {
                FilterKind::ChannelOffset(offset) => session.channel_adjusted(offset)?,
                named => session.filter_invoked(named)?,
            }
            session.finish()?;
            let (_, png) = session.export_invoked()?;
            std::fs::write(&output, png)?;

            println!(
                "{} → {} ({})",
                image.display(),
                output.display(),
                kind.name()
            );
        }
        Command::Zoom {
            image,
            factor,
            output,
        } => {
            let buffer = codec::decode_file(&image)?;
            let zoom = Zoom::new(factor);
            let scaled = render::scale(&buffer, zoom);
            codec::encode_png_file(&scaled, &output)?;
            println!(
                "{} → {} ({}x{} at {:.0}%)",
                image.display(),
                output.display(),
                scaled.width(),
                scaled.height(),
                zoom.factor() * 100.0
            );
        }
        Command::Batch {
            input,
            edit,
            output,
            json,
        } => {
            let kind = edit.resolve()?;
            let report = batch::run(&input, &output, kind)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for entry in &report.processed {
                    println!("{} → {}", entry.source.display(), entry.output.display());
                }
                for entry in &report.failed {
                    println!("{}: FAILED ({})", entry.source.display(), entry.reason);
                }
                println!(
                    "Processed {} of {} images ({})",
                    report.processed.len(),
                    report.total(),
                    kind.name()
                );
            }
            if !report.failed.is_empty() {
                std::process::exit(1);
            }
        }
        Command::Filters => {
            for kind in FilterKind::NAMED {
                println!("{:<16}{}", kind.name(), describe(kind));
            }
            println!(
                "{:<16}{}",
                "channel-offset",
                "additive per-channel brightness via --red/--green/--blue"
            );
        }
    }

    Ok(())
}

fn describe(kind: FilterKind) -> &'static str {
    match kind {
        FilterKind::Grayscale => "average the color channels (alpha untouched)",
        FilterKind::Invert => "complement each color channel",
        FilterKind::Sepia => "classic warm-tone weight matrix",
        FilterKind::ChannelOffset(_) => "additive per-channel brightness",
    }
}
