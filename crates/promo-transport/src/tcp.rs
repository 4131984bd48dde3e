//! TCP server for the line-based discount protocol

use crate::handler::ConnectionHandler;
use promo_core::CodeManager;
use promo_protocol::{Response, BANNER};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info};

/// TCP server accepting plaintext client connections
pub struct TcpServer {
    manager: Arc<CodeManager>,
    addr: SocketAddr,
    client_counter: AtomicU64,
}

impl TcpServer {
    pub fn new(manager: Arc<CodeManager>, addr: SocketAddr) -> Self {
        Self {
            manager,
            addr,
            client_counter: AtomicU64::new(0),
        }
    }

    /// Run the server, accepting connections until the task is dropped
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let listener = TcpListener::bind(self.addr).await?;
        info!(addr = %self.addr, "Promo TCP server listening");

        loop {
            match listener.accept().await {
                Ok((stream, peer_addr)) => {
                    let client_id = format!(
                        "tcp:{}:{}",
                        peer_addr,
                        self.client_counter.fetch_add(1, Ordering::Relaxed)
                    );
                    let manager = self.manager.clone();

                    tokio::spawn(async move {
                        if let Err(e) =
                            Self::handle_connection(stream, client_id.clone(), manager).await
                        {
                            error!(client = %client_id, error = %e, "Connection error");
                        }
                    });
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }

    async fn handle_connection(
        mut stream: TcpStream,
        client_id: String,
        manager: Arc<CodeManager>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!(client = %client_id, "Client connected");

        stream.write_all(BANNER.as_bytes()).await?;

        let mut handler = ConnectionHandler::new(client_id.clone(), manager);
        let mut buf = vec![0u8; 4096];

        loop {
            match stream.read(&mut buf).await {
                Ok(0) => {
                    info!(client = %client_id, "Client disconnected");
                    break;
                }
                Ok(n) => {
                    let responses = handler.process(&buf[..n]).await;
                    for response in responses {
                        stream.write_all(&response.encode()).await?;
                        if matches!(response, Response::Goodbye) {
                            // EXIT closes the connection from our side
                            info!(client = %client_id, "Client exited");
                            return Ok(());
                        }
                    }
                }
                Err(e) => {
                    error!(client = %client_id, error = %e, "Read error");
                    break;
                }
            }
        }

        Ok(())
    }
}
