//! Headless client that queues for a match and tracks the ball with its paddle.
//!
//! Run two of these against a local server to watch a full match in the logs.

use bincode::{deserialize, serialize};
use clap::Parser;
use log::{error, info, warn};
use shared::{GameConfig, Packet, RoomId, SeatNumber, PROTOCOL_VERSION};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::interval;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short = 's', long, default_value = "127.0.0.1:8080")]
    server: String,

    /// Matches to play before leaving
    #[arg(short = 'g', long, default_value = "1")]
    games: u32,

    /// Fraction of the configured paddle speed the bot moves at
    #[arg(long, default_value = "1.0")]
    skill: f32,
}

/// Moves `paddle_y` toward `target_y` by at most `max_step` (sign ignored)
fn follow(paddle_y: f32, target_y: f32, max_step: f32) -> f32 {
    let max_step = max_step.abs();
    paddle_y + (target_y - paddle_y).clamp(-max_step, max_step)
}

struct Bot {
    socket: UdpSocket,
    server_addr: SocketAddr,
    config: GameConfig,
    room: Option<(RoomId, SeatNumber)>,
    paddle_y: f32,
    games_left: u32,
    skill: f32,
}

impl Bot {
    async fn send(&self, packet: &Packet) -> Result<(), Box<dyn std::error::Error>> {
        let data = serialize(packet)?;
        self.socket.send_to(&data, self.server_addr).await?;
        Ok(())
    }

    /// Returns false once the bot is done
    async fn handle_packet(&mut self, packet: Packet) -> Result<bool, Box<dyn std::error::Error>> {
        match packet {
            Packet::Connected {
                connection_id,
                config,
            } => {
                info!("Connected as {}", connection_id);
                self.config = config;
                self.paddle_y = config.center_y();
                self.send(&Packet::JoinQueue).await?;
            }
            Packet::Joined { room_id, seat } => {
                info!("Joined {} as {}", room_id, seat);
                self.room = Some((room_id, seat));
            }
            Packet::PlayersUpdate { count } => info!("{} player(s) in room", count),
            Packet::StartGame { .. } => info!("Match started"),
            Packet::Rematch => info!("Rematch started"),
            Packet::GameState { ball, .. } => {
                if let Some((room_id, _)) = self.room {
                    let max_step = self.config.paddle_speed * self.skill;
                    self.paddle_y = self
                        .config
                        .clamp_paddle_y(follow(self.paddle_y, ball.y, max_step));
                    self.send(&Packet::PaddleMove {
                        room_id,
                        y: self.paddle_y,
                    })
                    .await?;
                }
            }
            Packet::GameOver {
                winner_seat,
                scores,
            } => {
                let Some((room_id, seat)) = self.room else {
                    return Ok(true);
                };
                let outcome = if winner_seat == seat { "won" } else { "lost" };
                info!("We {} {}-{}", outcome, scores.seat1, scores.seat2);

                self.games_left = self.games_left.saturating_sub(1);
                if self.games_left > 0 {
                    self.send(&Packet::RequestRematch { room_id }).await?;
                } else {
                    self.send(&Packet::LeaveRoom { room_id }).await?;
                    self.send(&Packet::Disconnect).await?;
                    return Ok(false);
                }
            }
            Packet::RoomClosed { room_id } => {
                warn!("{} closed, queueing again", room_id);
                self.room = None;
                self.send(&Packet::JoinQueue).await?;
            }
            Packet::Disconnected { reason } => {
                error!("Disconnected by server: {}", reason);
                return Ok(false);
            }
            other => warn!("Unexpected packet {:?}", other),
        }
        Ok(true)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    info!("Client socket bound to {}", socket.local_addr()?);

    let mut bot = Bot {
        socket,
        server_addr: args.server.parse()?,
        config: GameConfig::default(),
        room: None,
        paddle_y: GameConfig::default().center_y(),
        games_left: args.games.max(1),
        skill: args.skill,
    };

    bot.send(&Packet::Connect {
        client_version: PROTOCOL_VERSION,
    })
    .await?;

    let mut heartbeat = interval(Duration::from_secs(1));
    let mut buffer = [0u8; 2048];

    loop {
        tokio::select! {
            received = bot.socket.recv_from(&mut buffer) => {
                let (len, _) = received?;
                match deserialize::<Packet>(&buffer[..len]) {
                    Ok(packet) => {
                        if !bot.handle_packet(packet).await? {
                            break;
                        }
                    }
                    Err(e) => warn!("Failed to deserialize packet: {}", e),
                }
            }
            _ = heartbeat.tick() => {
                bot.send(&Packet::Heartbeat).await?;
            }
        }
    }

    Ok(())
}
