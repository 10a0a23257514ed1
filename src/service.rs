//! Receive, decode and record loop

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::{
    correlate::SharedLog,
    decoder::{decode_sentence, is_ais_sentence},
    errors::{AisSyncError, DecodeError},
    models::LogEntry,
    receiver::UdpReceiver,
};

/// Decodes incoming sentences and appends type 1 reports to the log.
///
/// This is the only writer of the log.
pub struct SentenceProcessor {
    log: SharedLog,
}

impl SentenceProcessor {
    pub fn new(log: SharedLog) -> Self {
        Self { log }
    }

    pub fn log(&self) -> SharedLog {
        self.log.clone()
    }

    /// Decode one line.
    ///
    /// Returns None for non-AIS lines and for messages other than type 1.
    pub async fn process_line(&self, line: &str) -> Result<Option<LogEntry>, DecodeError> {
        if !is_ais_sentence(line) {
            debug!("Skipping non-AIS line: {}", line);
            return Ok(None);
        }

        let report = decode_sentence(line)?;
        if !report.is_position_report() {
            debug!(
                "Skipping message type {} from {}",
                report.message_id, report.mmsi
            );
            return Ok(None);
        }

        let entry = LogEntry::received_now(report);
        self.log.write().await.push(entry.clone());
        Ok(Some(entry))
    }

    /// Decode every line of a datagram; failures are logged and skipped
    pub async fn process_datagram(&self, datagram: &str) -> Vec<LogEntry> {
        let mut accepted = Vec::new();
        for line in datagram.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match self.process_line(line).await {
                Ok(Some(entry)) => {
                    info!(
                        "Position report from {} at {:.3}",
                        entry.report.mmsi, entry.timestamp
                    );
                    accepted.push(entry);
                }
                Ok(None) => {}
                Err(e) => warn!("Failed to decode {}: {}", line, e),
            }
        }
        accepted
    }
}

/// Write an entry as a single JSON line
pub async fn emit<W>(sink: &mut W, entry: &LogEntry) -> Result<(), AisSyncError>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(entry)?;
    line.push(b'\n');
    sink.write_all(&line).await?;
    sink.flush().await?;
    Ok(())
}

/// Run until the receiver stops delivering datagrams
pub async fn run<W>(
    mut receiver: UdpReceiver,
    processor: &SentenceProcessor,
    sink: &mut W,
) -> Result<(), AisSyncError>
where
    W: AsyncWrite + Unpin,
{
    while let Some(datagram) = receiver.recv().await {
        for entry in processor.process_datagram(&datagram).await {
            emit(sink, &entry).await?;
        }
    }

    Err(AisSyncError::ReceiverClosed)
}
