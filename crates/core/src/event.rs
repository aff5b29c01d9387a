/// Control messages that flow into the consumer loop.
///
/// Sources:
/// - SIGUSR1 forwarder   → `Reset`
/// - SIGINT / SIGTERM    → `Shutdown`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Clear the since-start statistics and histogram; the trend window stays.
    Reset,
    /// Stop the producer, flush persisted state and exit.
    Shutdown,
}
