//! UDP receiver for NMEA sentences

use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{config::ReceiverConfig, errors::AisSyncError};

/// Largest datagram accepted from the AIS receiver
const MAX_DATAGRAM: usize = 4096;

/// Bound UDP socket, not yet receiving
pub struct UdpReceiverBuilder {
    socket: UdpSocket,
    tx: mpsc::Sender<String>,
    rx: mpsc::Receiver<String>,
}

pub struct UdpReceiver {
    rx: mpsc::Receiver<String>,
    _handle: tokio::task::JoinHandle<Result<(), AisSyncError>>,
}

impl UdpReceiverBuilder {
    /// Bind the socket given in configuration
    pub async fn bind(config: &ReceiverConfig) -> Result<Self, AisSyncError> {
        config.validate()?;
        let addr = config.socket_addr()?;

        let socket = UdpSocket::bind(addr).await?;
        info!("Listening for NMEA sentences on {}", socket.local_addr()?);

        // Create a channel for message passing
        let (tx, rx) = mpsc::channel(config.channel_capacity);

        Ok(Self { socket, tx, rx })
    }

    /// Address the socket is actually bound to
    pub fn local_addr(&self) -> Result<std::net::SocketAddr, AisSyncError> {
        Ok(self.socket.local_addr()?)
    }

    /// Start receiving datagrams in a background task
    pub fn start(self) -> UdpReceiver {
        let _handle = tokio::spawn(Self::process_datagrams(self.tx, self.socket));

        UdpReceiver {
            rx: self.rx,
            _handle,
        }
    }

    /// Receive datagrams and forward their text.
    ///
    /// Socket errors are logged and receiving continues. The loop ends when
    /// the receiving side of the channel is dropped.
    async fn process_datagrams(
        tx: mpsc::Sender<String>,
        socket: UdpSocket,
    ) -> Result<(), AisSyncError> {
        let mut buf = vec![0u8; MAX_DATAGRAM];
        loop {
            match socket.recv_from(&mut buf).await {
                Ok((len, peer)) => {
                    let Some(text) = Self::parse_datagram(&buf[..len]) else {
                        continue;
                    };
                    debug!("Received {} bytes from {}", len, peer);
                    if tx.send(text).await.is_err() {
                        info!("Receiver dropped, stopping UDP task");
                        break Err(AisSyncError::ReceiverClosed);
                    }
                }
                Err(e) => {
                    error!("UDP receive error: {}", e);
                    continue;
                }
            }
        }
    }

    /// Decode datagram bytes as text, None if nothing remains after trimming
    fn parse_datagram(payload: &[u8]) -> Option<String> {
        let text = String::from_utf8_lossy(payload);
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

impl UdpReceiver {
    /// Receive next datagram, None once the receiving task has stopped
    pub async fn recv(&mut self) -> Option<String> {
        self.rx.recv().await
    }
}
