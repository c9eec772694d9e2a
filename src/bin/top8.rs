//! Command-line interface for fetching standings, rendering the graphic
//! and applying the image filter.
//!
//! API keys come from the environment: `STARTGG_API_KEY` for standings,
//! `REMOVEBG_API_KEY` for background removal.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use top8_renderer::{
    FilterEngine, FilterParams, GraphicProfile, GraphicRenderer, IconLibrary, OUTPUT_FILE_NAME,
    RemoveBgClient, RenderOptions, StandingsClient,
};

#[derive(Parser)]
#[command(name = "top8", about = "Tournament Top-8 standings graphics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch Top-8 standings and write an editable profile
    Fetch {
        /// Event URL or bare slug
        event: String,

        /// Write the profile here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Render a profile to a PNG graphic
    Render {
        /// Profile JSON written by `fetch` and edited by hand
        profile: PathBuf,

        /// TrueType/OpenType font file for text
        #[arg(long)]
        font: PathBuf,

        /// Directory of character icon images
        #[arg(long)]
        icons: Option<PathBuf>,

        /// Output file
        #[arg(long, default_value = OUTPUT_FILE_NAME)]
        out: PathBuf,

        /// Device pixel ratio for high-density output
        #[arg(long, default_value_t = 1.0)]
        dpr: f32,

        /// Stroke a border, regardless of the profile's border setting
        #[arg(long)]
        border: bool,
    },

    /// Apply the colorize/lightness filter to an image
    Filter {
        /// Input image
        input: PathBuf,

        /// Output file
        #[arg(long)]
        out: PathBuf,

        /// Take the filter settings from a profile JSON instead of flags
        #[arg(long, conflicts_with_all = ["hue", "saturation", "lightness", "remove_background"])]
        profile: Option<PathBuf>,

        /// Tint hue in degrees (-180 to 180)
        #[arg(long, default_value_t = 0.0)]
        hue: f64,

        /// Tint saturation (-100 to 100)
        #[arg(long, default_value_t = 0.0)]
        saturation: f64,

        /// Lightness shift (-100 to 100)
        #[arg(long, default_value_t = 0.0)]
        lightness: f64,

        /// Remove the background first (requires REMOVEBG_API_KEY)
        #[arg(long)]
        remove_background: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Fetch { event, out } => {
            let client = StandingsClient::from_env()?;
            let standings = client.top8(&event)?;
            if standings.is_empty() {
                log::warn!("event has no finalized standings yet");
            }

            let profile = GraphicProfile::from_standings(&standings);
            let json = profile.to_json()?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("wrote {} entries to {}", standings.len(), path.display());
                }
                None => println!("{json}"),
            }
        }

        Command::Render {
            profile,
            font,
            icons,
            out,
            dpr,
            border,
        } => {
            let json = std::fs::read_to_string(&profile)
                .with_context(|| format!("reading {}", profile.display()))?;
            let profile = GraphicProfile::from_json(&json)?;

            let mut entries = profile.render_entries();
            if let Some(dir) = icons {
                IconLibrary::new(dir).preload(&mut entries);
            }

            let renderer = GraphicRenderer::from_font_file(&font)
                .with_context(|| format!("loading font {}", font.display()))?;
            let options = RenderOptions {
                add_border: profile.add_border || border,
                device_pixel_ratio: dpr,
            };
            let png = renderer.render_png(&entries, &options)?;
            std::fs::write(&out, png).with_context(|| format!("writing {}", out.display()))?;
            println!("wrote {}", out.display());
        }

        Command::Filter {
            input,
            out,
            profile,
            hue,
            saturation,
            lightness,
            remove_background,
        } => {
            let params = match profile {
                Some(path) => {
                    let json = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    GraphicProfile::from_json(&json)?.filter_params()
                }
                None => FilterParams {
                    hue_shift: hue,
                    saturation_adjust: saturation,
                    lightness_adjust: lightness,
                    remove_background,
                },
            };

            let engine = if params.remove_background {
                FilterEngine::with_remover(Box::new(RemoveBgClient::from_env()?))
            } else {
                FilterEngine::new()
            };

            let bytes = std::fs::read(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let output = engine.apply(&bytes, &params)?;
            std::fs::write(&out, output).with_context(|| format!("writing {}", out.display()))?;
            println!("wrote {}", out.display());
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
