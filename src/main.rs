use color_eyre::eyre::Result;
use dotenv::dotenv;
use timetable_client::config::ClientConfig;
use tracing_subscriber::FmtSubscriber;

mod commands;
mod table;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ClientConfig::from_env()?;

    // Logs go to stderr so the printed timetable stays clean
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let command = commands::Command::parse(std::env::args().skip(1))?;
    commands::run(command, &config).await
}
