//! Runtime wiring for `rtf`.
//!
//! Owns the tokio runtime and wires together all tasks:
//! - clock producer (live mode): ticks → real-time factor → shared ingestor
//! - signal forwarders: SIGINT/SIGTERM → `Shutdown`, SIGUSR1 → `Reset`
//! - render loop: the consumer, redrawing the dashboard every `refresh_ms`
//! - persistence: the record is written only after the producer has stopped

mod signals;

use rtf_clock::{ClockListener, ClockTick, RateDeriver};
use rtf_config::{default_path, load as load_config, RtfConfig};
use rtf_core::{Message, Result, RtfError};
use rtf_renderer::Dashboard;
use rtf_stats::{SampleIngestor, SharedIngestor};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// How long shutdown waits for stray blocking tasks before abandoning them.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

/// Command-line choices forwarded from the binary.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Config file; `None` = [`default_path`].
    pub config: Option<PathBuf>,
    /// Replay a saved record instead of listening to the clock.
    pub input:  Option<PathBuf>,
    /// Where to save the record at shutdown.
    pub output: Option<PathBuf>,
    /// Overrides `clock.socket`.
    pub socket: Option<PathBuf>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Run until SIGINT/SIGTERM (or end of stdin clock input).
pub fn run(options: RunOptions) -> Result<()> {
    let mut config = load_config(options.config.clone().unwrap_or_else(default_path))?;
    if let Some(socket) = options.socket.clone() {
        config.clock.socket = Some(socket);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async move {
        let (bus_tx, bus_rx) = mpsc::channel(8);
        signals::spawn_forwarders(bus_tx.clone());

        let mut console = Console::stdout();
        match options.input {
            Some(input) => replay(&config, input, options.output, bus_rx, &mut console).await,
            None => {
                let ticks = ClockListener::new(config.clock.socket.clone(), config.clock.reconnect_ms)
                    .spawn_listener();
                live(&config, ticks, options.output, bus_tx, bus_rx, &mut console).await
            }
        }
    });

    finish(runtime);
    result
}

/// Tear the runtime down without waiting on blocking reads that can't be
/// cancelled (tokio's stdin is one).
fn finish(runtime: Runtime) {
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
}

// ── Live mode ─────────────────────────────────────────────────────────────────

async fn live<W: Write>(
    config: &RtfConfig,
    ticks: mpsc::Receiver<ClockTick>,
    output: Option<PathBuf>,
    bus_tx: mpsc::Sender<Message>,
    mut bus_rx: mpsc::Receiver<Message>,
    console: &mut Console<W>,
) -> Result<()> {
    let ingestor = build_ingestor(config)?;
    let dashboard = Dashboard::from_config(&config.display);

    let (stop_tx, stop_rx) = watch::channel(false);
    let producer = tokio::spawn(produce(ticks, ingestor.clone(), stop_rx, bus_tx));

    consume(&ingestor, &dashboard, refresh(config), &mut bus_rx, false, console).await;

    // Stop the producer before flushing so the record is final.
    let _ = stop_tx.send(true);
    let rate = producer
        .await
        .map_err(|e| RtfError::Clock(format!("producer task failed: {e}")))?;

    if rate.rejected() > 0 {
        info!("Dropped {} non-finite real-time factors", rate.rejected());
    }

    if let Some(path) = output {
        let (sim, real) = rate.last_tick().map_or((0.0, 0.0), |t| (t.sim, t.real));
        rtf_codec::save(&path, &ingestor.record(sim, real))?;
    }
    Ok(())
}

/// Producer: derive one sample per tick and feed the shared ingestor until
/// told to stop.  Hands back the deriver so shutdown can read the last tick.
async fn produce(
    mut ticks: mpsc::Receiver<ClockTick>,
    ingestor: SharedIngestor,
    mut stop: watch::Receiver<bool>,
    bus: mpsc::Sender<Message>,
) -> RateDeriver {
    let mut rate = RateDeriver::new();

    while !*stop.borrow() {
        tokio::select! {
            changed = stop.changed() => {
                if changed.is_err() {
                    break; // stop sender dropped
                }
            }
            tick = ticks.recv() => match tick {
                Some(tick) => {
                    if let Some(rtf) = rate.push(tick) {
                        if let Err(e) = ingestor.on_sample(rtf) {
                            warn!("Sample rejected: {e}");
                        }
                    }
                }
                None => {
                    info!("Clock stream closed; shutting down");
                    let _ = bus.send(Message::Shutdown).await;
                    break;
                }
            },
        }
    }

    rate
}

// ── Replay mode ───────────────────────────────────────────────────────────────

async fn replay<W: Write>(
    config: &RtfConfig,
    input: PathBuf,
    output: Option<PathBuf>,
    mut bus_rx: mpsc::Receiver<Message>,
    console: &mut Console<W>,
) -> Result<()> {
    // Decode fully before touching any state; a bad file is fatal.
    let record = rtf_codec::load(&input, config.histogram)?;

    let ingestor = build_ingestor(config)?;
    ingestor.restore(&record)?;
    info!("Replaying '{}' (read-only)", input.display());

    let dashboard = Dashboard::from_config(&config.display);
    consume(&ingestor, &dashboard, refresh(config), &mut bus_rx, true, console).await;

    if let Some(path) = output {
        rtf_codec::save(&path, &record)?;
    }
    Ok(())
}

// ── Consumer ──────────────────────────────────────────────────────────────────

/// Render loop.  Redraws on every tick and handles bus messages until
/// `Shutdown` arrives or every sender is gone.  Pending messages always win
/// over a redraw, so a slow terminal can't hold off shutdown.
async fn consume<W: Write>(
    ingestor: &SharedIngestor,
    dashboard: &Dashboard,
    refresh: Duration,
    bus: &mut mpsc::Receiver<Message>,
    read_only: bool,
    console: &mut Console<W>,
) {
    let mut ticker = tokio::time::interval(refresh);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            msg = bus.recv() => match msg {
                Some(Message::Reset) if read_only => warn!("Reset ignored: replay data is read-only"),
                Some(Message::Reset) => {
                    ingestor.reset();
                    info!("Statistics and histogram reset");
                }
                Some(Message::Shutdown) | None => break,
            },
            _ = ticker.tick() => {
                console.draw(&dashboard.render(&ingestor.display_snapshot()));
            }
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn build_ingestor(config: &RtfConfig) -> Result<SharedIngestor> {
    let ingestor = SampleIngestor::new(config.histogram, config.window.capacity)?;
    Ok(SharedIngestor::new(ingestor))
}

fn refresh(config: &RtfConfig) -> Duration {
    Duration::from_millis(config.display.refresh_ms.max(1))
}

/// Output sink for the dashboard; clears the screen between frames when
/// attached to a terminal.
struct Console<W> {
    out:   W,
    clear: bool,
}

impl Console<std::io::Stdout> {
    fn stdout() -> Self {
        let out = std::io::stdout();
        let clear = out.is_terminal();
        Self { out, clear }
    }
}

impl<W: Write> Console<W> {
    fn draw(&mut self, frame: &str) {
        let prefix = if self.clear { "\x1b[2J\x1b[H" } else { "" };
        if let Err(e) = write!(self.out, "{prefix}{frame}").and_then(|_| self.out.flush()) {
            warn!("Dashboard write failed: {e}");
        }
    }
}
