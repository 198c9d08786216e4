//! # Pong Room Server Library
//!
//! Authoritative server for two-player pong matches. Clients connect over UDP,
//! ask to be matched, stream their paddle positions, and receive the ball,
//! paddles and score of their room at a fixed tick rate.
//!
//! ## Core Responsibilities
//!
//! ### Matchmaking
//! A connection asking to play is seated in the lowest-numbered room waiting for
//! an opponent, or in a fresh room if none is waiting. Asking again while seated
//! returns the same seat.
//!
//! ### Authoritative Simulation
//! Each room in play is advanced by its own tick driver using the physics kernel
//! from the `shared` crate, so clients predicting locally run identical math.
//! Scores, wins and rematches are decided here only.
//!
//! ### Room Lifecycle
//! Rooms start play when the second seat fills, fall back to waiting when a
//! player leaves, and are destroyed with the last occupant. Tick drivers are
//! cancelled in the same step that ends play.
//!
//! ## Architecture Design
//!
//! ### Single Event Loop
//! All room state lives in one [`gateway::SessionGateway`] owned by the task
//! running [`network::Server::run`]. Socket reads, socket writes, client timeout
//! checks and tick drivers are separate tasks that only exchange messages with
//! that loop, so a tick and a paddle move for the same room can never interleave
//! mid-mutation and no locking of room state is needed.
//!
//! ### Pluggable Edges
//! The gateway is generic over a [`transport::Transport`] and a
//! [`scheduler::TickScheduler`]. The server uses UDP and tokio intervals; tests
//! use in-memory recording and manual stepping.
//!
//! ## Module Organization
//!
//! - `room`: one match's state machine
//! - `registry`: the set of live rooms
//! - `matchmaker`: seating connections
//! - `scheduler`: tick drivers
//! - `gateway`: intents in, broadcasts out
//! - `transport`: delivery capability and broadcast groups
//! - `client_manager`: connection ids, addresses and timeouts
//! - `network`: UDP tasks and the event loop
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::config::ServerConfig;
//! use server::network::Server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let mut server = Server::new("127.0.0.1:8080", ServerConfig::default()).await?;
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

pub mod client_manager;
pub mod config;
pub mod error;
pub mod gateway;
pub mod matchmaker;
pub mod network;
pub mod registry;
pub mod room;
pub mod scheduler;
pub mod transport;
