mod camera;
mod config;
mod controller;
mod cube;
mod error;
mod graphics;
mod math;
mod state;
mod timer;
mod vertex;
mod widget;

use clap::Parser;
use config::Config;
use druid::widget::{Button, Flex};
use druid::{AppLauncher, EventCtx, Widget, WidgetExt, WindowDesc};
use error::AppError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use state::{AppState, ADD_CUBE};
use tracing::info;
use tracing_subscriber::EnvFilter;
use widget::CubeViewport;

/// Button row on top, viewport filling the rest
fn build_ui(rng: StdRng) -> impl Widget<AppState> {
    let add_cube = Button::new("Add Cube")
        .on_click(|ctx: &mut EventCtx, data: &mut AppState, _env| {
            if !data.has_cube {
                ctx.submit_command(ADD_CUBE);
            }
        })
        .disabled_if(|data: &AppState, _env| data.has_cube);

    Flex::column()
        .with_child(add_cube)
        .with_spacer(8.0)
        .with_flex_child(CubeViewport::new(rng), 1.0)
        .padding(8.0)
}

/// Main function
pub fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(seed = ?config.seed, width = config.width, height = config.height, "starting");

    let main_window = WindowDesc::new(build_ui(rng))
        .title(config.title.clone())
        .window_size((config.width, config.height));

    let initial_state = AppState {
        has_cube: false,
        debug: config.debug,
    };

    AppLauncher::with_window(main_window).launch(initial_state)?;

    info!("window closed");
    Ok(())
}
