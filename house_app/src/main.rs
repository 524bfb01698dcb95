//! House walkthrough, headless
//!
//! Loads a viewer configuration and its scene, then replays a scripted walk
//! and logs where the camera ends up. The script is a list of commands, each
//! a letter and a step count:
//!
//! - `F` / `B`: walk forward / backward
//! - `L` / `R`: turn left / right
//! - `U` / `D`: look up / down by one pointer pixel per count
//! - `W`: reload the house with wall color variant N
//!
//! ```text
//! house_walk assets/viewer.toml "F20 L40 F10 D30"
//! ```

use std::path::PathBuf;

use house_engine::camera::Directions;
use house_engine::config::{Config, ConfigError};
use house_engine::core::ViewerConfig;
use house_engine::foundation::logging;
use house_engine::{Viewer, ViewerError};
use thiserror::Error;

const DEFAULT_CONFIG: &str = "assets/viewer.toml";
const DEFAULT_SCRIPT: &str = "F10 L20 F10 W1 R40 B5 D20";
const WALL_VARIANTS: [&str; 2] = ["house.mtl", "house_red.mtl"];

#[derive(Error, Debug)]
enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Viewer(#[from] ViewerError),

    #[error("Bad script command '{0}'")]
    Script(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Hold(Directions, u32),
    Look(i32),
    Walls(usize),
}

fn parse_script(script: &str) -> Result<Vec<Command>, AppError> {
    script
        .split_whitespace()
        .map(|token| {
            let mut chars = token.chars();
            let letter = chars.next().map(|c| c.to_ascii_uppercase());
            let count: u32 = chars
                .as_str()
                .parse()
                .map_err(|_| AppError::Script(token.to_string()))?;
            let signed = i32::try_from(count).map_err(|_| AppError::Script(token.to_string()))?;

            match letter {
                Some('F') => Ok(Command::Hold(Directions::FORWARD, count)),
                Some('B') => Ok(Command::Hold(Directions::BACKWARD, count)),
                Some('L') => Ok(Command::Hold(Directions::YAW_LEFT, count)),
                Some('R') => Ok(Command::Hold(Directions::YAW_RIGHT, count)),
                Some('U') => Ok(Command::Look(-signed)),
                Some('D') => Ok(Command::Look(signed)),
                Some('W') if (count as usize) < WALL_VARIANTS.len() => Ok(Command::Walls(count as usize)),
                _ => Err(AppError::Script(token.to_string())),
            }
        })
        .collect()
}

fn replay(viewer: &mut Viewer, commands: &[Command]) -> Result<(), AppError> {
    for command in commands {
        match *command {
            Command::Hold(directions, count) => {
                viewer.press(directions);
                let mut blocked = 0;
                for _ in 0..count {
                    blocked += usize::from(viewer.step().blocked);
                }
                viewer.release(directions);
                log::info!(
                    "{:?} x{}: position {:?}, {} blocked",
                    directions,
                    count,
                    viewer.camera().state().position,
                    blocked
                );
            }
            Command::Look(pixels) => {
                viewer.camera_mut().pointer_moved(0.0, pixels as f32);
                log::info!("Pitch now {:.3}", viewer.camera().state().pitch);
            }
            Command::Walls(variant) => {
                viewer.reload_object("house", "house.obj", WALL_VARIANTS[variant])?;
            }
        }
    }
    Ok(())
}

fn run() -> Result<(), AppError> {
    let mut args = std::env::args().skip(1);
    let config_path = args.next().map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);
    let script = args.next().unwrap_or_else(|| DEFAULT_SCRIPT.to_string());

    let config = ViewerConfig::load_from_file(&config_path)?;
    logging::init_with_level(&config.engine.log_level);
    log::info!("Starting house walkthrough with {}", config_path.display());

    let commands = parse_script(&script)?;
    let mut viewer = Viewer::new(config)?;
    let textures = viewer.load_textures()?;
    log::info!(
        "{} objects, {} obstacles, {} textures",
        viewer.objects().len(),
        viewer.collision_map().len(),
        textures
    );

    replay(&mut viewer, &commands)?;

    let frame = viewer.render_view(4.0 / 3.0);
    let triangles: usize = frame.objects.iter().map(|view| view.object.table().triangle_count()).sum();
    log::info!("Final frame: {} objects, {} triangles", frame.objects.len(), triangles);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        log::error!("House walkthrough failed: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
