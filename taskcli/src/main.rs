// taskcli/src/main.rs
use clap::Command;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use taskcli::{shell, ClientConfig, Controller, FileStorage, HttpApi, SessionStore, TaskService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Logs go to stderr so rendered views stay clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let matches = shell::command()
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("shell").about("Interactive session"))
        .get_matches();

    let config = ClientConfig::from_env()?;
    let api = HttpApi::new(&config)?;
    let storage = FileStorage::new(config.state_dir.clone());
    debug!(
        api_url = %api.base_url(),
        state_dir = %storage.dir().display(),
        page_limit = config.page_limit,
        "Configuration loaded"
    );

    let session = SessionStore::new(Arc::new(storage));
    let mut controller = Controller::new(TaskService::new(api, session), config.page_limit);

    if matches.subcommand_name() == Some("shell") {
        controller.init().await;
        return shell::run(&mut controller).await;
    }

    let output = shell::run_once(controller, &matches).await?;
    println!("{}", output);
    Ok(())
}
