use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use raylib::prelude::*;

mod app;
mod auto_advance;
mod catalog;
mod config;
mod constants;
mod coordinator;
mod error;
mod image_loader;
mod input;
mod presenter;
mod ring;
mod slide;
mod state;

use crate::app::App;
use crate::catalog::load_catalog;
use crate::config::{Config, WindowConfig, load_config};
use crate::constants::*;
use crate::coordinator::Coordinator;
use crate::image_loader::JpegSetLoader;
use crate::input::command_for;
use crate::presenter::{Frame, Presenter};

/// Full-screen category slideshow for wall displays.
#[derive(Debug, Parser)]
#[command(name = "wall-display", version)]
struct Args {
    /// Directory holding menu.data and the category image folders.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_MENU_DIR)]
    dir: PathBuf,

    /// Configuration file.
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log level (overrides RUST_LOG).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<log::LevelFilter>,

    /// Run in a window instead of full screen.
    #[arg(long)]
    windowed: bool,
}

fn init_logging(level: Option<log::LevelFilter>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.init();
}

fn open_window(window: &WindowConfig) -> (RaylibHandle, RaylibThread) {
    let mut builder = raylib::init();
    builder.title(WINDOW_TITLE).vsync();
    if window.fullscreen {
        // Zero size makes raylib use the monitor resolution.
        builder.size(0, 0).fullscreen();
    } else {
        builder.size(WINDOWED_WIDTH, WINDOWED_HEIGHT);
    }
    let (mut rl, thread) = builder.build();

    rl.set_target_fps(window.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);
    rl.set_exit_key(None);
    rl.hide_cursor();
    (rl, thread)
}

fn run(args: &Args) -> Result<()> {
    let mut config: Config = load_config(&args.config);
    if args.windowed {
        config.window.fullscreen = false;
    }

    // --- Load Catalog (before any window exists, so failures exit cleanly) ---
    let categories = load_catalog(&args.dir).context("error when setting up wall display data")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("wall-display-loader")
        .build()
        .context("failed to start background loader")?;

    let (mut rl, thread) = open_window(&config.window);
    let screen_width = rl.get_screen_width();
    let screen_height = rl.get_screen_height();
    info!("Display: {}x{}", screen_width, screen_height);

    let area_width = (screen_width - config.window.menu_width as i32).max(1) as u32;
    let loader = JpegSetLoader::new(area_width, screen_height.max(1) as u32);
    let coordinator = Coordinator::new(loader, categories, runtime.handle().clone());

    let mut app = App::new(coordinator, &config.slideshow);
    let mut presenter = Presenter::new(&config);
    app.start();

    // --- Main Loop ---
    while app.is_running() && !rl.window_should_close() {
        let dt = rl.get_frame_time();

        // --- Update Logic ---
        let mut changed = false;
        while let Some(key) = rl.get_key_pressed() {
            if let Some(command) = command_for(key) {
                changed |= app.handle(command);
            }
        }
        changed |= app.update(Duration::from_secs_f32(dt.max(0.0)));
        if changed {
            presenter.show_or_blank(&mut rl, &thread, app.coordinator().current());
        }

        let coordinator = app.coordinator();
        let frame = Frame {
            categories: coordinator.categories(),
            selected: coordinator.selected(),
            state: coordinator.state(),
            slide_count: coordinator.ring().len(),
            paused: app.auto_advance().is_paused(),
        };
        presenter.update(dt, &frame, rl.get_screen_height() as f32);

        // --- Render ---
        let mut d = rl.begin_drawing(&thread);
        presenter.draw(&mut d, &frame);
    }

    let coordinator = app.coordinator();
    info!(
        "Shutting down (requests: {}, stale results discarded: {}, showing category: {:?})",
        coordinator.request_id(),
        coordinator.discarded(),
        coordinator.displayed(),
    );
    drop(presenter);
    drop(app);
    runtime.shutdown_background();
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.log_level);

    if let Err(e) = run(&args) {
        error!("FATAL: {:#}", e);
        process::exit(1);
    }
}
