//! Gridfire headless driver
//!
//! Owns the timing source and plays a scripted session against the core:
//! input state feeds each step, events go to the audio manager, and the
//! render queries are pulled every frame the way a renderer would.
//!
//! Usage: `gridfire [settings.json] [level.json]`

#[cfg(not(target_arch = "wasm32"))]
use std::error::Error;

#[cfg(not(target_arch = "wasm32"))]
use gridfire::{
    Level, Settings,
    audio::{AudioManager, NullBackend},
    consts::FRAME_DT,
    input::{InputState, Key},
    sim::{GamePhase, GameState, tick},
};

/// Virtual screen the driver queries rays and sprites for
#[cfg(not(target_arch = "wasm32"))]
const SCREEN_WIDTH: u32 = 320;
#[cfg(not(target_arch = "wasm32"))]
const SCREEN_HEIGHT: u32 = 200;
/// Two minutes at 60 Hz
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u64 = 60 * 120;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gridfire (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core is driven by the embedding host on wasm
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let level = match args.next() {
        Some(path) => Level::from_json(&std::fs::read_to_string(path)?)?,
        None => Level::default_level()?,
    };

    let seed = settings.seed.unwrap_or_else(rand::random);
    let mut state = GameState::with_tuning(&level, settings.tuning.clone(), seed);

    let mut audio: AudioManager<NullBackend> = AudioManager::default();
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_muted(settings.muted);

    let mut input = InputState::new(settings.mouse_sensitivity);
    input.set_fire(true);

    while state.frame < MAX_FRAMES && state.phase == GamePhase::Playing {
        drive_script(&mut input, state.frame);
        let cmd = input.snapshot();
        tick(&mut state, &cmd, FRAME_DT);

        audio.dispatch(&state.drain_events());

        let columns = state.cast_columns(SCREEN_WIDTH);
        let sprites = state.sprites(SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32);

        if state.frame % 60 == 0 {
            let hud = state.hud();
            let nearest_wall = columns
                .iter()
                .map(|c| c.corrected)
                .fold(f32::INFINITY, f32::min);
            log::info!(
                "t={:.0}s HP {} | AMMO {} | KILLS {} | hostiles {} ({} visible) | wall {:.2}",
                state.time,
                hud.health,
                hud.ammo_text(),
                hud.kills,
                state.living_enemy_count(),
                sprites.len(),
                nearest_wall
            );
        }
    }

    let hud = state.hud();
    log::info!(
        "Session over after {} frames: HP {} KILLS {} ({:?})",
        state.frame,
        hud.health,
        hud.kills,
        state.phase
    );
    Ok(())
}

/// Sweep the view with the pointer and walk in bursts, trigger held
#[cfg(not(target_arch = "wasm32"))]
fn drive_script(input: &mut InputState, frame: u64) {
    input.pointer_moved(6.0);
    let walking = (frame / 90) % 2 == 0;
    input.set_key(Key::Forward, walking);
    input.set_key(Key::StrafeRight, !walking && (frame / 45) % 2 == 0);
}
