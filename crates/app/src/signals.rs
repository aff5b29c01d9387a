use rtf_core::Message;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Turn process signals into bus messages.
///
/// - SIGINT / SIGTERM → [`Message::Shutdown`] (once)
/// - SIGUSR1          → [`Message::Reset`] (every time)
pub(crate) fn spawn_forwarders(tx: mpsc::Sender<Message>) {
    let shutdown_tx = tx.clone();
    tokio::spawn(async move {
        wait_for_shutdown().await;
        info!("Shutdown requested");
        let _ = shutdown_tx.send(Message::Shutdown).await;
    });

    tokio::spawn(async move {
        let mut usr1 = match signal(SignalKind::user_defined1()) {
            Ok(s) => s,
            Err(e) => {
                warn!("SIGUSR1 reset trigger unavailable: {e}");
                return;
            }
        };
        while usr1.recv().await.is_some() {
            info!("Reset requested");
            if tx.send(Message::Reset).await.is_err() {
                break; // consumer gone
            }
        }
    });
}

async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    let mut term = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            warn!("SIGTERM handler unavailable: {e}");
            ctrl_c.await;
            return;
        }
    };

    tokio::select! {
        _ = ctrl_c => {}
        _ = term.recv() => {}
    }
}
