mod app;
mod config;
mod game_task;
mod state;

use clap::Parser;
use eframe::egui;
use tokio::sync::mpsc;

use tictactoe_core::logger::init_logger;

use app::GameApp;
use state::SharedState;

#[derive(Parser)]
#[command(about = "Tic-tac-toe desktop client")]
struct Args {
    /// Path to the YAML config file
    #[arg(long, default_value = "client_config.yaml")]
    config: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logger(None);

    let shared_state = SharedState::new();
    let client_config = match config::load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            shared_state.set_error(e);
            config::ClientConfig::default()
        }
    };

    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let task_config = client_config.clone();
    let task_state = shared_state.clone();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(game_task::game_task(task_config, task_state, command_rx));
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 540.0])
            .with_title("Tic-Tac-Toe"),
        ..Default::default()
    };

    eframe::run_native(
        "Tic-Tac-Toe",
        options,
        Box::new(move |_cc| Ok(Box::new(GameApp::new(&client_config, shared_state, command_tx)))),
    )?;

    Ok(())
}
