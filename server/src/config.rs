use shared::GameConfig;
use std::time::Duration;

pub const DEFAULT_MAX_CLIENTS: usize = 64;
pub const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_WAITING_TIMEOUT: Duration = Duration::from_secs(120);

/// Server-side settings layered over the shared [`GameConfig`]
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub game: GameConfig,
    pub max_clients: usize,
    /// Silence after which a client is treated as disconnected
    pub client_timeout: Duration,
    /// How long a half-filled room may wait for an opponent; `None` waits forever
    pub waiting_timeout: Option<Duration>,
    /// Largest paddle change accepted from one move intent; `None` trusts the client
    pub max_paddle_step: Option<f32>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            max_clients: DEFAULT_MAX_CLIENTS,
            client_timeout: DEFAULT_CLIENT_TIMEOUT,
            waiting_timeout: Some(DEFAULT_WAITING_TIMEOUT),
            max_paddle_step: None,
        }
    }
}
