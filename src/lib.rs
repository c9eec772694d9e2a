//! top8-renderer: tournament Top-8 standings graphics
//!
//! This crate fetches Top-8 standings from a bracket-hosting service's
//! GraphQL API, turns them into editable rows, and renders the result as a
//! PNG graphic. It also provides an image filter (optional background
//! removal via a third-party API, plus a grayscale-colorize tint and a
//! lightness shift applied per pixel).
//!
//! # Example
//!
//! ```no_run
//! use top8_renderer::{
//!     GraphicProfile, GraphicRenderer, IconLibrary, RenderOptions, StandingsClient,
//! };
//!
//! # fn main() -> top8_renderer::Result<()> {
//! // Fetch standings and seed an editable profile
//! let client = StandingsClient::from_env()?;
//! let standings = client.top8("https://start.gg/tournament/foo/event/bar/overview")?;
//! let profile = GraphicProfile::from_standings(&standings);
//!
//! // ... user edits names and assigns characters ...
//!
//! // Preload icons and render
//! let mut entries = profile.render_entries();
//! IconLibrary::new("assets/icons").preload(&mut entries);
//!
//! let renderer = GraphicRenderer::from_font_file("assets/Inter-Bold.ttf")?;
//! let png = renderer.render_png(&entries, &RenderOptions::default())?;
//! std::fs::write(top8_renderer::OUTPUT_FILE_NAME, png)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Image Filter
//!
//! ```no_run
//! use top8_renderer::{FilterEngine, FilterParams, RemoveBgClient};
//!
//! # fn main() -> top8_renderer::Result<()> {
//! let engine = FilterEngine::with_remover(Box::new(RemoveBgClient::from_env()?));
//! let input = std::fs::read("photo.png")?;
//! let output = engine.apply(&input, &FilterParams {
//!     hue_shift: 120.0,
//!     saturation_adjust: 50.0,
//!     lightness_adjust: 0.0,
//!     remove_background: true,
//! })?;
//! std::fs::write("photo-tinted.png", output)?;
//! # Ok(())
//! # }
//! ```

pub mod color;
mod error;
mod filter;
pub mod graphic;
mod icons;
mod matting;
mod profile;
mod standings;

pub use error::{Error, Result};
pub use filter::{FilterEngine, FilterParams, adjust_lightness, colorize, encode_png};
pub use graphic::{
    GraphicRenderer, OUTPUT_FILE_NAME, RenderEntry, RenderOptions,
    layout::{GraphicLayout, MeasureText, compute_layout},
    text::{FontRenderer, TextPainter},
};
pub use icons::{IconLibrary, icon_file_name};
pub use matting::{BackgroundRemover, RemoveBgClient};
pub use profile::{EntrySettings, GraphicProfile};
pub use standings::{StandingEntry, StandingsClient, extract_slug};
