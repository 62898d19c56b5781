use std::path::Path;
use std::time::Duration;

/// One-shot delayed callback capability.
///
/// The only callback the gate ever needs is "re-run the change check for this
/// file as the delayed retry", so the capability is expressed in those terms.
/// Scheduled retries are never cancelled; the gate tolerates late or
/// redundant deliveries.
pub trait Scheduler: Send {
    fn schedule_retry(&self, identity: &Path, delay: Duration);
}
