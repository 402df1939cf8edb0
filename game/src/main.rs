//! Headless play-through: begin, scroll the carousel, open a level and solve it by dragging tiles.
//!
//! `paflamy [CATALOG_FILE]`. Environment: `RUST_LOG`, `PAFLAMY_SETTINGS_PATH`, `PAFLAMY_SEED`,
//! `PAFLAMY_LEVEL`, `PAFLAMY_SCREEN_WIDTH`, `PAFLAMY_SCREEN_HEIGHT`.

use std::error::Error;
use std::fs;
use std::time::Duration;

use engine::input::PointerEvent;
use engine::surface::SurfaceSize;
use engine::{HeadlessHost, HostEvent};
use paflamy::navigation::{NavEffect, Stage};
use paflamy::settings::SettingsStore;
use paflamy::{Level, LevelCatalog, PaflamyApp};
use tracing_subscriber::EnvFilter;

const FRAME: Duration = Duration::from_millis(16);
const MAX_WAIT_FRAMES: usize = 600;

type Host = HeadlessHost<PaflamyApp>;

fn env_u32(name: &str) -> Option<u32> {
    std::env::var(name).ok().and_then(|v| v.parse::<u32>().ok())
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse::<u64>().ok())
}

fn env_usize(name: &str) -> Option<usize> {
    std::env::var(name).ok().and_then(|v| v.parse::<usize>().ok())
}

fn load_catalog() -> Result<LevelCatalog, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = fs::read_to_string(&path)?;
            let catalog = LevelCatalog::parse(&text)?;
            tracing::info!(%path, levels = catalog.len(), "catalog loaded");
            Ok(catalog)
        }
        None => Ok(LevelCatalog::builtin()?),
    }
}

fn wait_until(host: &mut Host, mut done: impl FnMut(&Host) -> bool) -> Result<(), Box<dyn Error>> {
    for _ in 0..MAX_WAIT_FRAMES {
        if done(&*host) {
            return Ok(());
        }
        host.advance(1, FRAME)?;
    }
    Err(format!("gave up after {MAX_WAIT_FRAMES} frames").into())
}

/// Drags the carousel one pitch to the left per step until `target` is centered.
fn scroll_to(host: &mut Host, target: usize) -> Result<(), Box<dyn Error>> {
    let layout = *host.app().nav().layout();
    let y = layout.y_padding + layout.carousel_level_height() / 2.0;
    let x = layout.screen.width_f32() * 0.75;

    while host.app().nav().carousel().index < target as i32 {
        host.run([
            HostEvent::Pointer(PointerEvent::down(x, y)),
            HostEvent::Pointer(PointerEvent::moved(x - layout.pitch(), y)),
        ])?;
        // Let the catch-up animation reach the pointer before releasing.
        host.advance(10, FRAME)?;
        host.step(HostEvent::Pointer(PointerEvent::up(x - layout.pitch(), y)))?;
        wait_until(host, |h| !h.app().nav().carousel().settling)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = SettingsStore::from_env().load();
    let catalog = load_catalog()?;
    let target = env_usize("PAFLAMY_LEVEL").unwrap_or(0).min(catalog.last_index());
    let screen = SurfaceSize::new(
        env_u32("PAFLAMY_SCREEN_WIDTH").unwrap_or(1080),
        env_u32("PAFLAMY_SCREEN_HEIGHT").unwrap_or(1920),
    );
    let app = match env_u64("PAFLAMY_SEED") {
        Some(seed) => PaflamyApp::seeded(catalog, seed, &settings, screen)?,
        None => PaflamyApp::new(catalog, &settings, screen)?,
    };
    let mut host = HeadlessHost::new(app);

    let button = host.app().nav().start_screen().button();
    host.tap(button.x + button.w / 2.0, button.y + button.h / 2.0)?;
    if host.app().nav().stage() != Stage::Menu {
        return Err("start button is not reachable on this screen size".into());
    }

    scroll_to(&mut host, target)?;

    let layout = *host.app().nav().layout();
    host.tap(
        layout.screen.width_f32() / 2.0,
        layout.y_padding + layout.carousel_level_height() / 2.0,
    )?;
    wait_until(&mut host, |h| h.app().nav().stage() == Stage::Playing)?;

    let index = host.app().session().level_index();
    let tile = host.app().nav().tile_size(index);
    let budget = host.app().session().level().map_or(0, Level::free_tile_count);
    let mut swaps = 0usize;
    while let Some((from, to)) = host.app().session().level().and_then(Level::hint) {
        if swaps >= budget {
            return Err(format!("level {index} still unsolved after {swaps} swaps").into());
        }
        host.drag(
            layout.cell_center(from.0, from.1, tile),
            layout.cell_center(to.0, to.1, tile),
        )?;
        swaps += 1;
    }

    let solved = host
        .effects()
        .iter()
        .any(|e| matches!(e, NavEffect::LevelSolved { index: i } if *i == index));
    tracing::info!(index, swaps, frames = host.frame(), solved, "play-through finished");

    host.step(HostEvent::Back)?;
    Ok(())
}
