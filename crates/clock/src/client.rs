use crate::events::{parse_tick, ClockEvent, ClockTick};
use rtf_core::{Result, RtfError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::net::UnixStream;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Where clock lines are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockSource {
    /// A Unix stream socket; reconnected whenever it drops.
    Socket(PathBuf),
    /// Standard input; the stream ends at EOF.
    Stdin,
}

/// Clock tick client.
///
/// Reads `sim,real` lines from a socket or stdin and streams typed
/// [`ClockTick`]s.
pub struct ClockListener {
    source:    ClockSource,
    reconnect: Duration,
}

impl ClockListener {
    /// `socket = None` reads from standard input.
    pub fn new(socket: Option<PathBuf>, reconnect_ms: u64) -> Self {
        Self {
            source:    socket.map_or(ClockSource::Stdin, ClockSource::Socket),
            reconnect: Duration::from_millis(reconnect_ms),
        }
    }

    /// Spawn a background task that reads the clock source and forwards
    /// parsed ticks on the returned channel.
    ///
    /// The task stops when the receiver is dropped or, for stdin, at EOF.
    pub fn spawn_listener(self) -> mpsc::Receiver<ClockTick> {
        let (tx, rx) = mpsc::channel(64);

        tokio::spawn(async move {
            match self.source {
                ClockSource::Stdin => {
                    info!("Reading clock ticks from stdin");
                    forward_lines(BufReader::new(tokio::io::stdin()), &tx).await;
                    info!("Clock input ended");
                }
                ClockSource::Socket(path) => loop {
                    match connect(&path).await {
                        Ok(stream) => {
                            info!("Connected to clock socket '{}'", path.display());
                            if !forward_lines(BufReader::new(stream), &tx).await {
                                return; // all receivers dropped
                            }
                            warn!(
                                "Clock connection lost; reconnecting in {}ms",
                                self.reconnect.as_millis()
                            );
                        }
                        Err(e) => {
                            error!("{e}; retrying in {}ms", self.reconnect.as_millis());
                        }
                    }

                    if tx.is_closed() {
                        return;
                    }
                    tokio::time::sleep(self.reconnect).await;
                },
            }
        });

        rx
    }
}

async fn connect(path: &Path) -> Result<UnixStream> {
    UnixStream::connect(path)
        .await
        .map_err(|e| RtfError::Clock(format!("cannot connect to '{}': {e}", path.display())))
}

/// Forward every parsed tick from `reader` until EOF or a read error.
/// Returns `false` once the receiver has gone away.
async fn forward_lines<R>(reader: R, tx: &mpsc::Sender<ClockTick>) -> bool
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return true,
            Err(e) => {
                warn!("Clock read error: {e}");
                return true;
            }
        };

        match parse_tick(&line) {
            ClockEvent::Tick(tick) => {
                if tx.send(tick).await.is_err() {
                    return false;
                }
            }
            ClockEvent::Blank => {}
            ClockEvent::Unknown(raw) => warn!("Ignoring malformed clock line: {raw:?}"),
        }
    }
}
