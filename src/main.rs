//! Entry point for the **deskzones** overlay.
//!
//! Spawns the Unix-socket command listener on a background thread and runs
//! the overlay on the main thread.  With the `overlay-gtk` feature the main
//! thread runs the GLib main loop; without it a headless loop applies
//! socket commands and logs what a host would have shown.

use deskzones::command::Command;
use deskzones::config::Config;
use deskzones::ipc::listener::UnixSocketListener;
use deskzones::traits::CommandSource;
use log::{error, info};
use std::path::PathBuf;
use std::sync::mpsc;

/// Default socket path for the command listener.
fn default_socket_path() -> PathBuf {
    let runtime = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(runtime).join("deskzones.sock")
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/deskzones`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("deskzones")
}

/// Load `$XDG_CONFIG_HOME/deskzones/config.json`, or an explicit
/// `--config <path>`, falling back to compiled-in defaults.
fn load_config() -> Config {
    let explicit = std::env::args()
        .skip_while(|a| a != "--config")
        .nth(1)
        .map(PathBuf::from);
    let path = explicit
        .clone()
        .unwrap_or_else(|| config_dir().join("config.json"));

    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) if explicit.is_some() => {
            error!("{}", e);
            std::process::exit(1);
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

fn main() {
    env_logger::init();

    let config = load_config();
    let surface = config.surface();

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    spawn_command_sources(cmd_tx.clone());

    start_event_loop(surface, cmd_tx, cmd_rx, config);
}

//  Event loops

#[cfg(feature = "overlay-gtk")]
fn start_event_loop(
    surface: deskzones::surface::Surface,
    cmd_tx: mpsc::Sender<Command>,
    cmd_rx: mpsc::Receiver<Command>,
    config: Config,
) {
    if let Err(e) = deskzones::overlay::gtk::run_main_loop(surface, cmd_tx, cmd_rx, config.overlay) {
        error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "overlay-gtk"))]
fn start_event_loop(
    mut surface: deskzones::surface::Surface,
    cmd_tx: mpsc::Sender<Command>,
    cmd_rx: mpsc::Receiver<Command>,
    _config: Config,
) {
    // Only the listener thread keeps the channel open.
    drop(cmd_tx);
    info!("deskzones running headless");
    for cmd in cmd_rx {
        match cmd {
            Command::Quit => break,
            cmd => {
                if let Some(effect) = surface.apply(cmd) {
                    info!("no dialog host for {:?}", effect);
                }
            }
        }
        info!(
            "{} rectangle(s), {} mode",
            surface.rectangles().len(),
            if surface.is_edit_mode() { "edit" } else { "lock" }
        );
    }
    info!("command sources closed, exiting");
}

//  Helpers

fn spawn_command_sources(tx: mpsc::Sender<Command>) {
    let path = default_socket_path();
    std::thread::spawn(move || {
        let mut source = UnixSocketListener::new(&path);
        if let Err(e) = source.run(tx) {
            error!("socket listener error: {}", e);
        }
    });
}
