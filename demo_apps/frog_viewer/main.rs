//! Frog viewer
//!
//! Opens a window, loads the frog parts and the `STmap.jpeg` skin from
//! `CROAK_ASSET_DIR` (default `assets`) and drives the rig from the
//! keyboard:
//!
//! - arrows: move, shift + arrows: tilt and roll
//! - `w` / `s`: arm and leg strokes, `a` / `d`: turn the head
//! - `j`: jump, `q`: swim, Escape: quit
//!
//! Left drag orbits the camera, right drag pans, the wheel zooms.
//!
//! Set `CROAK_SETTINGS` to a JSON file to override motion settings.

use std::path::Path;

use anyhow::Context;

use croak::app::winit::App;
use croak::prelude::*;
use croak::render::{FrogRenderer, SceneStyle};

const SKIN_TEXTURE: &str = "STmap.jpeg";

fn load_settings() -> anyhow::Result<CharacterSettings> {
    let Ok(path) = std::env::var("CROAK_SETTINGS") else {
        return Ok(CharacterSettings::default());
    };
    let json = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let settings =
        CharacterSettings::from_json(&json).with_context(|| format!("parsing {path}"))?;
    log::info!("Loaded settings from {path}");
    Ok(settings)
}

fn build_renderer(asset_dir: &Path) -> anyhow::Result<FrogRenderer> {
    let renderer = FrogRenderer::new(SceneStyle::default());
    match std::fs::read(asset_dir.join(SKIN_TEXTURE)) {
        Ok(bytes) => Ok(renderer.with_skin_texture(SKIN_TEXTURE, &bytes)?),
        Err(e) => {
            log::warn!("No skin texture ({e}); drawing untextured");
            Ok(renderer)
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    if let Err(e) = probe_render_capability() {
        log::error!("{e}");
        println!("{RENDER_UNAVAILABLE_MESSAGE}");
        return Ok(());
    }

    let settings = load_settings()?;
    let asset_dir = std::env::var("CROAK_ASSET_DIR").unwrap_or_else(|_| "assets".into());
    let asset_dir = Path::new(&asset_dir);

    let mut session = Session::new(settings)?;
    // Reads run on the loader's runtime, so it must outlive the event loop.
    let loader = FsAssetLoader::new(asset_dir)?;
    session.request_assets(&loader, &FROG_ASSETS);

    let renderer = build_renderer(asset_dir)?;
    App::new().with_title("Croak").run(session, renderer)?;
    drop(loader);
    Ok(())
}
