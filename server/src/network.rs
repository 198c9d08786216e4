//! Server network layer handling UDP communications and event loop coordination

use crate::client_manager::ClientManager;
use crate::config::ServerConfig;
use crate::gateway::SessionGateway;
use crate::registry::RoomRegistry;
use crate::scheduler::{IntervalScheduler, TickHandle};
use crate::transport::{RoomGroups, Transport};
use bincode::{deserialize, serialize};
use log::{debug, error, info, warn};
use shared::{ConnectionId, Packet, RoomId, PROTOCOL_VERSION};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::UdpSocket;
use tokio::sync::{mpsc, RwLock};
use tokio::time::interval;

/// Messages sent from network tasks to main server loop
#[derive(Debug)]
pub enum ServerMessage {
    PacketReceived { packet: Packet, addr: SocketAddr },
    ClientTimeout { client_id: ConnectionId },
    Shutdown,
}

/// Messages sent from the event loop to the sender task
#[derive(Debug)]
pub enum GameMessage {
    SendPacket {
        packet: Packet,
        addr: SocketAddr,
    },
    SendToClients {
        packet: Packet,
        recipients: Vec<ConnectionId>,
    },
}

/// Transport that queues packets for the UDP sender task
pub struct UdpTransport {
    game_tx: mpsc::UnboundedSender<GameMessage>,
    groups: RoomGroups,
}

impl UdpTransport {
    pub fn new(game_tx: mpsc::UnboundedSender<GameMessage>) -> Self {
        Self {
            game_tx,
            groups: RoomGroups::default(),
        }
    }

    fn queue(&self, packet: Packet, recipients: Vec<ConnectionId>) {
        if recipients.is_empty() {
            return;
        }
        if let Err(e) = self
            .game_tx
            .send(GameMessage::SendToClients { packet, recipients })
        {
            error!("Failed to queue packet for sending: {}", e);
        }
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, connection_id: ConnectionId, packet: Packet) {
        self.queue(packet, vec![connection_id]);
    }

    fn broadcast(&mut self, room_id: RoomId, packet: Packet) {
        let members = self.groups.members(room_id);
        self.queue(packet, members);
    }

    fn join_group(&mut self, connection_id: ConnectionId, room_id: RoomId) {
        self.groups.join(connection_id, room_id);
    }

    fn leave_group(&mut self, connection_id: ConnectionId, room_id: RoomId) {
        self.groups.leave(connection_id, room_id);
    }
}

/// Main server coordinating networking and room simulation.
///
/// Every room mutation happens on the task running [`Server::run`]; socket I/O,
/// timeout checks and tick drivers only talk to it through channels.
pub struct Server {
    socket: Arc<UdpSocket>,
    clients: Arc<RwLock<ClientManager>>,
    gateway: SessionGateway<UdpTransport, IntervalScheduler>,
    config: ServerConfig,

    // Communication channels
    server_tx: mpsc::UnboundedSender<ServerMessage>,
    server_rx: mpsc::UnboundedReceiver<ServerMessage>,
    tick_rx: mpsc::UnboundedReceiver<TickHandle>,
    game_tx: mpsc::UnboundedSender<GameMessage>,
    game_rx: Option<mpsc::UnboundedReceiver<GameMessage>>,
}

impl Server {
    pub async fn new(
        addr: &str,
        config: ServerConfig,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let socket = Arc::new(UdpSocket::bind(addr).await?);
        info!("Server listening on {}", socket.local_addr()?);

        let (server_tx, server_rx) = mpsc::unbounded_channel();
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let (game_tx, game_rx) = mpsc::unbounded_channel();

        let gateway = SessionGateway::new(
            RoomRegistry::new(&config),
            IntervalScheduler::new(config.game.tick_period(), tick_tx),
            UdpTransport::new(game_tx.clone()),
            config.waiting_timeout,
        );

        Ok(Server {
            socket,
            clients: Arc::new(RwLock::new(ClientManager::new(
                config.max_clients,
                config.client_timeout,
            ))),
            gateway,
            config,
            server_tx,
            server_rx,
            tick_rx,
            game_tx,
            game_rx: Some(game_rx),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Sender that can stop the event loop with [`ServerMessage::Shutdown`]
    pub fn shutdown_handle(&self) -> mpsc::UnboundedSender<ServerMessage> {
        self.server_tx.clone()
    }

    /// Spawns task that continuously listens for incoming packets
    fn spawn_network_receiver(&self) {
        let socket = Arc::clone(&self.socket);
        let server_tx = self.server_tx.clone();

        tokio::spawn(async move {
            let mut buffer = [0u8; 2048];

            loop {
                match socket.recv_from(&mut buffer).await {
                    Ok((len, addr)) => {
                        if let Ok(packet) = deserialize::<Packet>(&buffer[0..len]) {
                            if let Err(e) =
                                server_tx.send(ServerMessage::PacketReceived { packet, addr })
                            {
                                error!("Failed to send packet to main loop: {}", e);
                                break;
                            }
                        } else {
                            warn!("Failed to deserialize packet from {}", addr);
                        }
                    }
                    Err(e) => {
                        error!("Error receiving packet: {}", e);
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    }
                }
            }
        });
    }

    /// Spawns task that processes outgoing packet queue
    fn spawn_network_sender(&mut self) {
        let Some(mut game_rx) = self.game_rx.take() else {
            return;
        };
        let socket = Arc::clone(&self.socket);
        let clients = Arc::clone(&self.clients);

        tokio::spawn(async move {
            while let Some(message) = game_rx.recv().await {
                match message {
                    GameMessage::SendPacket { packet, addr } => {
                        if let Err(e) = Self::send_packet_impl(&socket, &packet, addr).await {
                            error!("Failed to send packet to {}: {}", addr, e);
                        }
                    }
                    GameMessage::SendToClients { packet, recipients } => {
                        let addrs: Vec<(ConnectionId, SocketAddr)> = {
                            let clients_guard = clients.read().await;
                            recipients
                                .iter()
                                .filter_map(|id| clients_guard.get_addr(*id).map(|addr| (*id, addr)))
                                .collect()
                        };

                        let data = match serialize(&packet) {
                            Ok(data) => data,
                            Err(e) => {
                                error!("Failed to serialize packet: {}", e);
                                continue;
                            }
                        };

                        for (client_id, addr) in addrs {
                            if let Err(e) = socket.send_to(&data, addr).await {
                                error!("Failed to send to client {}: {}", client_id, e);
                            }
                        }
                    }
                }
            }
        });
    }

    /// Spawns task that monitors client timeouts
    fn spawn_timeout_checker(&self) {
        let clients = Arc::clone(&self.clients);
        let server_tx = self.server_tx.clone();

        tokio::spawn(async move {
            let mut interval = interval(Duration::from_secs(1));

            loop {
                interval.tick().await;

                let timed_out = {
                    let mut clients_guard = clients.write().await;
                    clients_guard.check_timeouts()
                };

                for client_id in timed_out {
                    if let Err(e) = server_tx.send(ServerMessage::ClientTimeout { client_id }) {
                        error!("Failed to send timeout message: {}", e);
                        return;
                    }
                }
            }
        });
    }

    async fn send_packet_impl(
        socket: &UdpSocket,
        packet: &Packet,
        addr: SocketAddr,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let data = serialize(packet)?;
        socket.send_to(&data, addr).await?;
        Ok(())
    }

    fn send_packet(&self, packet: Packet, addr: SocketAddr) {
        if let Err(e) = self.game_tx.send(GameMessage::SendPacket { packet, addr }) {
            error!("Failed to queue packet for sending: {}", e);
        }
    }

    /// Handles connection management packets and forwards intents to the gateway
    async fn handle_packet(&mut self, packet: Packet, addr: SocketAddr) {
        if let Packet::Connect { client_version } = packet {
            self.handle_connect(client_version, addr).await;
            return;
        }

        let client_id = {
            let mut clients = self.clients.write().await;
            let client_id = clients.find_client_by_addr(addr);
            if let Some(id) = client_id {
                clients.touch(id);
            }
            client_id
        };

        let Some(client_id) = client_id else {
            warn!("Packet from unknown client at {}", addr);
            return;
        };

        let result = match packet {
            Packet::Heartbeat => Ok(()),
            Packet::JoinQueue => self.gateway.join_queue(client_id).map(|_| ()),
            Packet::PaddleMove { room_id, y } => self.gateway.paddle_move(client_id, room_id, y),
            Packet::RequestRematch { room_id } => {
                self.gateway.request_rematch(client_id, room_id)
            }
            Packet::LeaveRoom { room_id } => {
                self.gateway.leave_room(client_id, room_id).map(|_| ())
            }
            Packet::Disconnect => {
                self.clients.write().await.remove_client(&client_id);
                self.gateway.disconnect(client_id);
                Ok(())
            }
            _ => {
                warn!("Unexpected packet type from client {}", client_id);
                Ok(())
            }
        };

        if let Err(e) = result {
            debug!("Ignoring intent from client {}: {}", client_id, e);
        }
    }

    async fn handle_connect(&mut self, client_version: u32, addr: SocketAddr) {
        info!(
            "Client connecting from {} (version: {})",
            addr, client_version
        );

        if client_version != PROTOCOL_VERSION {
            self.send_packet(
                Packet::Disconnected {
                    reason: "Protocol version mismatch".to_string(),
                },
                addr,
            );
            return;
        }

        // Remove existing connection if present
        let existing_client_id = {
            let clients = self.clients.read().await;
            clients.find_client_by_addr(addr)
        };

        if let Some(existing_id) = existing_client_id {
            info!("Removing existing client {} from {}", existing_id, addr);
            self.clients.write().await.remove_client(&existing_id);
            self.gateway.disconnect(existing_id);
        }

        let client_id = {
            let mut clients = self.clients.write().await;
            clients.add_client(addr)
        };

        let response = match client_id {
            Some(connection_id) => Packet::Connected {
                connection_id,
                config: self.config.game,
            },
            None => Packet::Disconnected {
                reason: "Server full".to_string(),
            },
        };
        self.send_packet(response, addr);
    }

    /// Main server loop coordinating all operations
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.spawn_network_receiver();
        self.spawn_network_sender();
        self.spawn_timeout_checker();

        let mut sweep = interval(Duration::from_secs(1));

        info!("Server started successfully");

        loop {
            tokio::select! {
                message = self.server_rx.recv() => {
                    match message {
                        Some(ServerMessage::PacketReceived { packet, addr }) => {
                            self.handle_packet(packet, addr).await;
                        }
                        Some(ServerMessage::ClientTimeout { client_id }) => {
                            info!("Client {} timed out", client_id);
                            self.gateway.disconnect(client_id);
                        }
                        Some(ServerMessage::Shutdown) | None => {
                            info!("Server shutting down");
                            break;
                        }
                    }
                }

                Some(handle) = self.tick_rx.recv() => {
                    self.gateway.tick(handle);
                }

                _ = sweep.tick() => {
                    self.gateway.expire_idle_rooms(Instant::now());

                    let client_count = self.clients.read().await.len();
                    if client_count > 0 {
                        debug!(
                            "{} clients, {} rooms, {} tick drivers",
                            client_count,
                            self.gateway.registry().len(),
                            self.gateway.scheduler().len()
                        );
                    }
                }
            }
        }

        Ok(())
    }
}
