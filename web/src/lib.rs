use clap::Parser;
use wasm_bindgen::prelude::*;

mod maze;
mod settings;
mod theme;
mod utils;

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    maze: settings::ConfigArgs,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args.maze);

    let theme = theme::Theme::init();

    let root = document()
        .get_element_by_id("maze")
        .expect("Could not find id=\"maze\" element");

    log::debug!("App started");
    yew::Renderer::<maze::MazeView>::with_root_and_props(
        root,
        maze::MazeProps {
            args: args.maze,
            theme,
        },
    )
    .render();
}
