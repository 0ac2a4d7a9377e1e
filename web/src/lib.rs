use cashmine_core::DEFAULT_STARTING_BALANCE;
use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<String>,

    /// Credits the session starts with
    #[arg(short, long, default_value_t = DEFAULT_STARTING_BALANCE)]
    credits: f64,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            verbose: Default::default(),
            seed: None,
            credits: DEFAULT_STARTING_BALANCE,
        }
    }
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

    let args = match Args::try_parse_from(location_hash.split(['#', '&'])) {
        Ok(args) => args,
        Err(err) => {
            gloo::console::error!(format!("Could not parse args: {}", err));
            Args::default()
        }
    };
    if let Some(log_level) = args.verbose.log_level() {
        if let Err(err) = console_log::init_with_level(log_level) {
            gloo::console::error!(format!("Error initializing logger: {}", err));
        }
    }
    log::debug!("seed: {:?}", args.seed);

    let props = game::GameProps {
        seed: args.seed.as_deref().map(utils::seed_from_text),
        credits: args.credits,
    };

    let Some(root) = document().get_element_by_id("game") else {
        log::error!("Could not find id=\"game\" element");
        return;
    };

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, props).render();
}
