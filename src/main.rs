use std::sync::Arc;

use macroquad::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod game;
mod geometry;
mod handoff;
mod render;
mod steering;

use config::GameConfig;
use game::Game;
use handoff::Strategy;
use render::Renderer;
use steering::Steering;

fn window_conf(config: &GameConfig) -> Conf {
    Conf {
        window_title: "Snake".to_owned(),
        window_width: config.width,
        window_height: config.height,
        window_resizable: false,
        ..Default::default()
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() {
    init_logging();

    let path = GameConfig::default_path();
    let config = GameConfig::load_or_default(&path);

    let mut args = std::env::args().skip(1);
    let strategy = match args.next().as_deref() {
        None => Strategy::default(),
        Some("write-config") => {
            match config.write(&path) {
                Ok(()) => info!(path = %path.display(), "wrote config"),
                Err(err) => error!(%err, "could not write config"),
            }
            return;
        }
        Some(arg) => arg.parse().unwrap_or_else(|err| {
            warn!(%err, "using the default strategy");
            Strategy::default()
        }),
    };

    let steering = Arc::new(Steering::new(config.start_direction));
    let game = Game::new(&config, Arc::clone(&steering));
    let (publisher, refresh) = handoff::channel(strategy);

    macroquad::Window::from_config(window_conf(&config), async move {
        let renderer = Renderer::new(&config, refresh, steering, get_time());
        info!(%strategy, seed = ?config.seed, tick_ms = config.tick_ms, "starting game");
        if let Err(err) = game::spawn(game, publisher) {
            error!(%err, "could not start the game loop");
            return;
        }
        render::run(renderer).await;
    });
}
