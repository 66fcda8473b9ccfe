//! # Server - Concurrent Message Reception
//!
//! The server binds an endpoint, accepts connections concurrently, and
//! invokes a registered [`Handler`] once per complete message received.
//!
//! ## Architecture
//!
//! ```text
//! accept loop ──spawn──> connection task ──> handler.handle(message)
//!      │                      │
//!      └── watch channel ─────┘  (shutdown signal)
//! ```
//!
//! Each accepted connection runs on its own tokio task, so a slow or blocked
//! peer cannot starve the others. Within one connection, messages are
//! dispatched in arrival order; ordering across connections is unspecified.
//!
//! A framing error terminates only the connection it occurred on. The server
//! itself fails only if the endpoint cannot be claimed.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;

use crate::common::connection::Connection;
use crate::common::error::Error;
use crate::common::messages::Message;
use crate::server::config::ServerConfig;
use crate::server::metrics::ServerMetrics;

/// Callback invoked once per received message.
///
/// Registered once at server start. The handler is called synchronously from
/// the connection's task and owns the message for the duration of the call.
/// Any `Fn(Message) + Send + Sync + 'static` closure is a handler.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, message: Message);
}

impl<F> Handler for F
where
    F: Fn(Message) + Send + Sync + 'static,
{
    fn handle(&self, message: Message) {
        self(message)
    }
}

/// Signals the server to stop.
///
/// On shutdown the accept loop stops and [`Server::run`] returns; in-flight
/// connection tasks observe the same signal and close after their current
/// read completes, without draining further buffered frames.
#[derive(Clone)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl ShutdownHandle {
    /// Request shutdown. Idempotent; safe to call from any task.
    pub fn shutdown(&self) {
        let _ = self.tx.send(true);
    }
}

/// A message server bound to an endpoint.
///
/// # Example
/// ```ignore
/// let server = Server::bind("127.0.0.1:9000", ServerConfig::default()).await?;
/// server.run(|msg: Message| println!("{:?}", msg.fields())).await?;
/// ```
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    config: ServerConfig,
    metrics: ServerMetrics,
    shutdown_tx: watch::Sender<bool>,
}

impl Server {
    /// Claim the endpoint.
    ///
    /// # Errors
    /// [`Error::Bind`] if the endpoint cannot be claimed (already bound,
    /// permission denied, unresolvable address).
    pub async fn bind(endpoint: &str, config: ServerConfig) -> Result<Self, Error> {
        let listener = TcpListener::bind(endpoint).await.map_err(|e| Error::Bind {
            endpoint: endpoint.to_string(),
            source: e,
        })?;
        let local_addr = listener.local_addr().map_err(|e| Error::Bind {
            endpoint: endpoint.to_string(),
            source: e,
        })?;
        let (shutdown_tx, _) = watch::channel(false);

        Ok(Self {
            listener,
            local_addr,
            config,
            metrics: ServerMetrics::new(),
            shutdown_tx,
        })
    }

    /// The address actually bound. Useful when binding port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// A cloneable handle onto the server's counters.
    pub fn metrics(&self) -> ServerMetrics {
        self.metrics.clone()
    }

    /// A handle that can stop the server from another task.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: self.shutdown_tx.clone(),
        }
    }

    /// Serve until shutdown is signalled.
    ///
    /// Accepts connections in a loop and spawns a task per connection. Each
    /// task reads framed messages and invokes `handler` once per message, in
    /// arrival order for that connection. Returns `Ok(())` once the shutdown
    /// signal fires.
    pub async fn run<H: Handler>(self, handler: H) -> Result<(), Error> {
        info!("📡 Listening on {}", self.local_addr);

        let handler = Arc::new(handler);
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        // Shutdown may have been requested before run was called.
        if *shutdown_rx.borrow() {
            return Ok(());
        }

        if self.config.metrics.report_interval_secs > 0 {
            self.spawn_metrics_reporter();
        }

        loop {
            tokio::select! {
                accepted = self.listener.accept() => match accepted {
                    Ok((socket, addr)) => {
                        debug!("🔗 Accepted connection from {}", addr);
                        self.metrics.record_connection();

                        let handler = Arc::clone(&handler);
                        let metrics = self.metrics.clone();
                        let max_frame_bytes = self.config.limits.max_frame_bytes;
                        let conn_shutdown = self.shutdown_tx.subscribe();
                        tokio::spawn(async move {
                            handle_connection(
                                socket,
                                addr,
                                handler,
                                metrics,
                                max_frame_bytes,
                                conn_shutdown,
                            )
                            .await;
                        });
                    }
                    Err(e) => error!("❌ Accept error: {}", e),
                },
                _ = shutdown_rx.changed() => {
                    info!("🛑 Shutdown requested, stopping accept loop");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Periodically log a metrics summary until shutdown.
    fn spawn_metrics_reporter(&self) {
        let metrics = self.metrics.clone();
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let interval = Duration::from_secs(self.config.metrics.report_interval_secs);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => metrics.log_summary(),
                    _ = shutdown_rx.changed() => break,
                }
            }
        });
    }
}

/// Read and dispatch messages from a single connection until the peer
/// closes, a framing error occurs, or shutdown is signalled.
async fn handle_connection<H: Handler>(
    socket: TcpStream,
    addr: SocketAddr,
    handler: Arc<H>,
    metrics: ServerMetrics,
    max_frame_bytes: usize,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut conn = Connection::with_frame_limit(socket, max_frame_bytes);

    loop {
        tokio::select! {
            read = conn.read_message() => match read {
                Ok(Some(message)) => {
                    metrics.record_message();
                    handler.handle(message);
                }
                Ok(None) => {
                    debug!("🔌 Connection from {} closed", addr);
                    break;
                }
                Err(e) => {
                    // Scoped to this connection; the server keeps serving.
                    warn!("⚠️ Dropping connection from {}: {}", addr, e);
                    metrics.record_framing_error();
                    break;
                }
            },
            _ = shutdown_rx.changed() => {
                debug!("🔌 Closing connection from {} for shutdown", addr);
                break;
            }
        }
    }
}

/// Bind `endpoint` with the default configuration and serve until shutdown.
///
/// The one-call form of [`Server::bind`] + [`Server::run`].
pub async fn run<H: Handler>(endpoint: &str, handler: H) -> Result<(), Error> {
    Server::bind(endpoint, ServerConfig::default())
        .await?
        .run(handler)
        .await
}
