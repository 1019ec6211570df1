//! Connection lifecycle management.
//!
//! One [`Connection`] models exactly one socket to a control unit.
//! Reads and writes run in per-connection tokio tasks; every task
//! captures the connection generation it was spawned for, and any
//! completion that arrives for a stale generation is a no-op. Sockets
//! are never reused across reconnects.

use crate::error::ClientError;
use balboa_protocol::codec::Decoder;
use balboa_protocol::message::{Message, OutboundMessage, SettingsType};
use balboa_protocol::DEFAULT_PORT;
use bytes::BytesMut;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{lookup_host, TcpStream};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Default read buffer size (512 bytes; frames are at most 257).
pub const DEFAULT_READ_BUFFER_SIZE: usize = 512;

/// Minimum read buffer size.
pub const MIN_READ_BUFFER_SIZE: usize = 128;

/// Maximum read buffer size (64 KiB).
pub const MAX_READ_BUFFER_SIZE: usize = 64 * 1024;

/// Capacity of the event broadcast channel.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Connection configuration. Plain values; nothing is parsed from
/// files here.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Hostname or IP address of the control unit.
    pub host: String,
    /// TCP port, 4257 unless overridden.
    pub port: u16,
    /// Read buffer size for socket reads.
    pub read_buffer_size: usize,
    /// Suggested delay before the caller retries `connect()` after an
    /// `Offline` or `Error` event. The connection itself runs no
    /// timer.
    pub reconnect_interval: Duration,
}

impl ConnectionConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            reconnect_interval: Duration::from_secs(30),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size.clamp(MIN_READ_BUFFER_SIZE, MAX_READ_BUFFER_SIZE);
        self
    }

    pub fn with_reconnect_interval(mut self, interval: Duration) -> Self {
        self.reconnect_interval = interval;
        self
    }
}

/// The states a connection moves through.
///
/// Transitions: `Initial → Connecting`; `Connecting → Error |
/// ConfigurationPending`; `ConfigurationPending → Online | Offline`;
/// `Online → Offline`; `Offline | Error → Connecting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Initial,
    Connecting,
    Offline,
    Error,
    ConfigurationPending,
    Online,
}

/// Events delivered to subscribers.
#[derive(Debug, Clone)]
pub enum Event {
    /// The connection moved to a new state, with a human-readable
    /// detail. Emitted exactly once per transition.
    StateChanged {
        state: ConnectionState,
        detail: String,
    },
    /// A decoded inbound message that was not babble-suppressed.
    Message(Message),
}

/// State shared between the API surface and the socket tasks. All
/// read-modify-write sequences happen under this mutex; completion
/// callbacks arrive on arbitrary runtime workers.
struct Inner {
    state: ConnectionState,
    /// Bumped on every connect and teardown; socket tasks compare
    /// their captured generation against it before acting.
    generation: u64,
    writer: Option<mpsc::UnboundedSender<BytesMut>>,
    tasks: Vec<JoinHandle<()>>,
    suppress_babble: bool,
}

impl Inner {
    /// Drops the write queue and stops the socket tasks. Pending
    /// output and buffered input are meaningless across sockets.
    fn teardown(&mut self) {
        self.writer = None;
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

/// A connection to a Balboa control unit.
///
/// Created via [`Connection::new`], shared as an `Arc`. Subscribe to
/// [`Event`]s before calling [`Connection::connect`] so no transition
/// is missed.
pub struct Connection {
    config: ConnectionConfig,
    inner: Mutex<Inner>,
    events: broadcast::Sender<Event>,
}

impl Connection {
    /// Creates a new, unconnected connection.
    pub fn new(config: ConnectionConfig) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            config,
            inner: Mutex::new(Inner {
                state: ConnectionState::Initial,
                generation: 0,
                writer: None,
                tasks: Vec::new(),
                suppress_babble: true,
            }),
            events,
        })
    }

    /// Subscribes to state changes and decoded messages.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Returns the current connection state.
    pub fn state(&self) -> ConnectionState {
        self.inner.lock().state
    }

    /// Returns whether duplicate status frames are being suppressed.
    ///
    /// Control units resend near-identical status several times per
    /// second; consecutive frames with equal CRC values are discarded
    /// while `Online`. The CRC covers type and payload, and status
    /// updates carry the clock to minute accuracy, so this is safe in
    /// practice.
    pub fn babble_suppression(&self) -> bool {
        self.inner.lock().suppress_babble
    }

    /// Enables or disables duplicate status suppression.
    pub fn set_babble_suppression(&self, enabled: bool) {
        self.inner.lock().suppress_babble = enabled;
    }

    /// Initiates (or reinitiates) the connection. Non-blocking; the
    /// outcome arrives as `StateChanged` events. A call while already
    /// `Connecting` is ignored so connection attempts never stack.
    pub fn connect(self: &Arc<Self>) {
        let generation = {
            let mut inner = self.inner.lock();
            if inner.state == ConnectionState::Connecting {
                tracing::debug!("connect requested while already connecting, ignored");
                return;
            }
            inner.generation += 1;
            inner.teardown();
            inner.state = ConnectionState::Connecting;
            inner.generation
        };

        self.emit(
            ConnectionState::Connecting,
            format!("connecting to {}:{}", self.config.host, self.config.port),
        );

        let conn = Arc::clone(self);
        tokio::spawn(async move { conn.run(generation).await });
    }

    /// Tears down the connection. Idempotent: disconnecting an
    /// already-closed or never-opened connection only emits `Offline`.
    pub fn disconnect(&self) {
        {
            let mut inner = self.inner.lock();
            inner.generation += 1;
            inner.teardown();
            inner.state = ConnectionState::Offline;
        }
        tracing::debug!("disconnecting");
        self.emit(ConnectionState::Offline, "disconnected");
    }

    /// Encodes a command and queues it for transmission.
    ///
    /// Messages go onto the wire in exactly submission order. Fails
    /// only when no socket exists.
    pub fn send_message(&self, message: &OutboundMessage) -> Result<(), ClientError> {
        let encoded = message.encode()?;
        tracing::trace!(
            message_type = format_args!("{:#08x}", message.message_type()),
            bytes = encoded.len(),
            "queueing outbound frame"
        );

        let inner = self.inner.lock();
        let writer = inner.writer.as_ref().ok_or(ClientError::NotConnected)?;
        writer.send(encoded).map_err(|_| ClientError::NotConnected)
    }

    /// Resolves, connects and hands the socket to the reader and
    /// writer tasks. Runs once per `connect()` call.
    async fn run(self: Arc<Self>, generation: u64) {
        let target = (self.config.host.as_str(), self.config.port);
        let addr = match lookup_host(target).await {
            Ok(mut addrs) => match addrs.next() {
                Some(addr) => addr,
                None => {
                    return self.fail(
                        generation,
                        format!("failed to resolve host: {}", self.config.host),
                    )
                }
            },
            Err(err) => {
                return self.fail(
                    generation,
                    format!("failed to resolve host {}: {}", self.config.host, err),
                )
            }
        };

        let stream = match TcpStream::connect(addr).await {
            Ok(stream) => stream,
            Err(err) => return self.fail(generation, format!("connection failed: {err}")),
        };
        stream.set_nodelay(true).ok();
        tracing::debug!(%addr, "connected to control unit");

        let (read_half, write_half) = stream.into_split();
        let (tx, rx) = mpsc::unbounded_channel();
        {
            let mut inner = self.inner.lock();
            if inner.generation != generation {
                // Disconnected while connecting; the socket drops here.
                return;
            }
            inner.writer = Some(tx);
            inner
                .tasks
                .push(tokio::spawn(Arc::clone(&self).write_loop(
                    generation,
                    write_half,
                    rx,
                )));
        }

        // Connected but not configured yet: request the device
        // information and the panel configuration, then start reading.
        for setting in [SettingsType::Information, SettingsType::Panel] {
            if let Err(err) = self.send_message(&OutboundMessage::SettingsRequest(setting)) {
                tracing::debug!("handshake request failed: {err}");
                return;
            }
        }
        self.transition_if(
            generation,
            ConnectionState::Connecting,
            ConnectionState::ConfigurationPending,
            "configuration requests sent",
        );

        let mut inner = self.inner.lock();
        if inner.generation != generation {
            return;
        }
        inner
            .tasks
            .push(tokio::spawn(Arc::clone(&self).read_loop(generation, read_half)));
    }

    /// Drains the outbound FIFO onto the socket, one buffer at a time.
    /// Partial writes resume before the next buffer is dequeued, so
    /// frames are transmitted whole and in submission order.
    async fn write_loop(
        self: Arc<Self>,
        generation: u64,
        mut writer: OwnedWriteHalf,
        mut queue: mpsc::UnboundedReceiver<BytesMut>,
    ) {
        while let Some(buf) = queue.recv().await {
            if let Err(err) = writer.write_all(&buf).await {
                // A dead socket cannot safely retry individual writes;
                // drop the whole connection.
                self.drop_connection(generation, format!("write failed: {err}"));
                return;
            }
            tracing::trace!(bytes = buf.len(), "frame written");
        }
    }

    /// Reads the socket into the stream decoder and dispatches decoded
    /// messages until the connection dies.
    async fn read_loop(self: Arc<Self>, generation: u64, mut reader: OwnedReadHalf) {
        let mut decoder = Decoder::new();
        let mut buf = vec![0u8; self.config.read_buffer_size];
        // Scoped to this connection: a fresh session never inherits
        // the previous session's suppression point.
        let mut last_crc: Option<u8> = None;

        loop {
            let n = match reader.read(&mut buf).await {
                Ok(0) => {
                    return self.drop_connection(generation, "connection closed by peer");
                }
                Ok(n) => n,
                Err(err) => {
                    return self.drop_connection(generation, format!("read failed: {err}"));
                }
            };

            tracing::trace!(bytes = n, buffered = decoder.buffered(), "data received");
            decoder.extend(&buf[..n]);

            while let Some(frame) = decoder.decode_frame() {
                let suppress = {
                    let inner = self.inner.lock();
                    inner.generation == generation
                        && inner.state == ConnectionState::Online
                        && inner.suppress_babble
                };
                if suppress && last_crc == Some(frame.crc) {
                    tracing::trace!("suppressed repeated frame");
                    continue;
                }
                last_crc = Some(frame.crc);

                let Some(message) = Message::from_frame(&frame) else {
                    continue;
                };
                let configured = matches!(message, Message::PanelConfiguration(_));
                let _ = self.events.send(Event::Message(message));

                if configured {
                    self.transition_if(
                        generation,
                        ConnectionState::ConfigurationPending,
                        ConnectionState::Online,
                        "panel configuration received",
                    );
                }
            }
        }
    }

    /// Emits a state-change event. State itself is already updated.
    fn emit(&self, state: ConnectionState, detail: impl Into<String>) {
        let detail = detail.into();
        tracing::debug!(state = ?state, detail = %detail, "state changed");
        let _ = self.events.send(Event::StateChanged { state, detail });
    }

    /// Moves `from → to` if the generation is current and the state
    /// still matches.
    fn transition_if(
        &self,
        generation: u64,
        from: ConnectionState,
        to: ConnectionState,
        detail: &str,
    ) {
        {
            let mut inner = self.inner.lock();
            if inner.generation != generation || inner.state != from {
                return;
            }
            inner.state = to;
        }
        self.emit(to, detail);
    }

    /// Marks a failed connection attempt. No socket tasks exist yet.
    fn fail(&self, generation: u64, detail: String) {
        {
            let mut inner = self.inner.lock();
            if inner.generation != generation {
                return;
            }
            inner.state = ConnectionState::Error;
        }
        self.emit(ConnectionState::Error, detail);
    }

    /// Tears down a live connection after a read or write failure.
    /// Generation-guarded so a stale socket's failure cannot touch its
    /// replacement, and so `Offline` is emitted exactly once.
    fn drop_connection(&self, generation: u64, detail: impl Into<String>) {
        {
            let mut inner = self.inner.lock();
            if inner.generation != generation {
                return;
            }
            inner.generation += 1;
            inner.teardown();
            inner.state = ConnectionState::Offline;
        }
        self.emit(ConnectionState::Offline, detail);
    }
}
