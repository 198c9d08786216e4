use clap::Parser;
use log::info;
use server::config::ServerConfig;
use server::network::Server;
use shared::GameConfig;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Tick rate (updates per second)
    #[arg(short, long, default_value_t = shared::config::TICK_RATE,
          value_parser = clap::value_parser!(u32).range(1..))]
    tick_rate: u32,

    /// Points needed to win a match
    #[arg(short, long, default_value_t = shared::config::WIN_SCORE,
          value_parser = clap::value_parser!(u32).range(1..))]
    win_score: u32,

    /// Maximum number of connected clients
    #[arg(short, long, default_value_t = server::config::DEFAULT_MAX_CLIENTS)]
    max_clients: usize,

    /// Seconds of silence before a client is dropped
    #[arg(long, default_value = "5")]
    client_timeout: u64,

    /// Seconds a half-filled room waits for an opponent (0 waits forever)
    #[arg(long, default_value = "120")]
    waiting_timeout: u64,

    /// Largest paddle movement accepted from a single move packet
    #[arg(long)]
    max_paddle_step: Option<f32>,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            game: GameConfig {
                tick_rate: self.tick_rate,
                win_score: self.win_score,
                ..GameConfig::default()
            },
            max_clients: self.max_clients,
            client_timeout: Duration::from_secs(self.client_timeout),
            waiting_timeout: (self.waiting_timeout > 0)
                .then(|| Duration::from_secs(self.waiting_timeout)),
            max_paddle_step: self.max_paddle_step,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();
    let address = format!("{}:{}", args.host, args.port);
    let config = args.into_config();

    info!(
        "Starting server at {}Hz, first to {} wins",
        config.game.tick_rate, config.game.win_score
    );

    let mut server = Server::new(&address, config).await?;

    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    Ok(())
}
