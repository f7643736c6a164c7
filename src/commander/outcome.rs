use log::trace;
use tokio::sync::oneshot;

/// How a single dispatch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Response was written or delivered.
    Success,
    /// Request was fine, but it named a command nobody registered.
    Rejected,
    /// Request was rejected, or the async result could not be delivered.
    Failure,
}

impl DispatchOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, DispatchOutcome::Success | DispatchOutcome::Rejected)
    }
}

pub(crate) fn outcome_channel() -> (OutcomeSender, OutcomeReceiver) {
    let (sender, receiver) = oneshot::channel();
    (OutcomeSender(sender), OutcomeReceiver(receiver))
}

pub(crate) struct OutcomeSender(oneshot::Sender<DispatchOutcome>);

impl OutcomeSender {
    pub fn publish(self, outcome: DispatchOutcome) {
        if let Err(outcome) = self.0.send(outcome) {
            trace!("Nobody is waiting for dispatch outcome {outcome:?}");
        }
    }
}

/// Completion signal of a dispatch.
#[derive(Debug)]
pub struct OutcomeReceiver(oneshot::Receiver<DispatchOutcome>);

impl OutcomeReceiver {
    /// Waits until the dispatch is finished. `None` means no outcome is ever going to be
    /// published, which is the case for fire-and-forget commands.
    pub async fn wait(self) -> Option<DispatchOutcome> {
        self.0.await.ok()
    }
}
