//! Sign-up flow state: landing, pending, success.
//!
//! The controller owns the form fields and the current step, and publishes
//! every change on a watch channel so a UI (or a test) can render each state.
//! Only one submission can be outstanding: the landing → pending transition
//! is a single check-and-set on the channel.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use waitlist_types::{ExternalRecordId, WaitlistEntry};

use crate::{client::WaitlistSubmitter, error::FlowError, reveal::RevealSchedule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowStep {
    #[default]
    Landing,
    Pending,
    Success,
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Landing => "landing",
            Self::Pending => "pending",
            Self::Success => "success",
        };
        f.write_str(s)
    }
}

/// Everything a sign-up screen needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlowSnapshot {
    pub step: FlowStep,
    pub name: String,
    pub email: String,

    /// Reason the last submission failed; shown on the landing form.
    pub error: Option<String>,

    pub record_id: Option<ExternalRecordId>,
    pub position: Option<usize>,
}

impl FlowSnapshot {
    pub fn can_submit(&self) -> bool {
        self.step == FlowStep::Landing && !self.name.is_empty() && !self.email.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowTimings {
    /// Pause between the relay answering and the result being shown.
    pub settle_delay: Duration,
}

impl Default for FlowTimings {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(2000),
        }
    }
}

/// Error shown when a pending submission is abandoned before it settles.
pub const CANCELLED_REASON: &str = "Submission cancelled";

/// Puts the flow back on landing if a pending submission is dropped.
struct PendingGuard<'a> {
    state: &'a watch::Sender<FlowSnapshot>,
    armed: bool,
}

impl<'a> PendingGuard<'a> {
    fn new(state: &'a watch::Sender<FlowSnapshot>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        tracing::debug!("waitlist flow: pending submission dropped, back to landing");
        self.state.send_modify(|s| {
            s.step = FlowStep::Landing;
            s.error = Some(CANCELLED_REASON.to_string());
        });
    }
}

pub struct FlowController {
    submitter: Arc<dyn WaitlistSubmitter>,
    timings: FlowTimings,
    state: watch::Sender<FlowSnapshot>,
}

impl FlowController {
    pub fn new(submitter: Arc<dyn WaitlistSubmitter>) -> Self {
        Self::with_timings(submitter, FlowTimings::default())
    }

    pub fn with_timings(submitter: Arc<dyn WaitlistSubmitter>, timings: FlowTimings) -> Self {
        let (state, _) = watch::channel(FlowSnapshot::default());
        Self {
            submitter,
            timings,
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FlowSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        self.state.borrow().clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.state.send_modify(|s| s.name = name);
    }

    pub fn set_email(&self, email: impl Into<String>) {
        let email = email.into();
        self.state.send_modify(|s| s.email = email);
    }

    /// Schedule for revealing the screen of the current step.
    pub fn reveal_schedule(&self) -> RevealSchedule {
        match self.state.borrow().step {
            FlowStep::Success => RevealSchedule::success(),
            FlowStep::Landing | FlowStep::Pending => RevealSchedule::landing(),
        }
    }

    /// Submit the form and wait for the flow to settle.
    ///
    /// A failed submission is not an `Err`: the flow returns to landing with
    /// the failure reason in `error` and the form still filled in. Dropping
    /// the future before it settles also returns to landing, with
    /// [`CANCELLED_REASON`] as the error.
    pub async fn submit(&self) -> Result<FlowSnapshot, FlowError> {
        let mut refused = None;
        let mut entry = None;
        self.state.send_if_modified(|s| {
            if s.step != FlowStep::Landing {
                refused = Some(FlowError::InvalidState(s.step));
                return false;
            }
            if s.name.is_empty() || s.email.is_empty() {
                refused = Some(FlowError::IncompleteForm);
                return false;
            }
            entry = Some(WaitlistEntry::new(s.name.clone(), s.email.clone()));
            s.step = FlowStep::Pending;
            s.error = None;
            true
        });

        if let Some(err) = refused {
            return Err(err);
        }
        let Some(entry) = entry else {
            return Err(FlowError::IncompleteForm);
        };
        tracing::debug!("waitlist flow: landing -> pending");

        let guard = PendingGuard::new(&self.state);

        let outcome = self.submitter.submit(&entry).await;

        tokio::time::sleep(self.timings.settle_delay).await;

        guard.disarm();
        match outcome {
            Ok(receipt) => {
                tracing::debug!(id = %receipt.id, "waitlist flow: pending -> success");
                self.state.send_modify(|s| {
                    s.step = FlowStep::Success;
                    s.record_id = Some(receipt.id);
                    s.position = receipt.position;
                });
            }
            Err(err) => {
                tracing::warn!(error = %err, "waitlist flow: submission failed");
                self.state.send_modify(|s| {
                    s.step = FlowStep::Landing;
                    s.error = Some(err.to_string());
                });
            }
        }

        Ok(self.snapshot())
    }

    /// Back to an empty landing form. Refused while a submission is pending.
    pub fn reset(&self) -> Result<(), FlowError> {
        let mut refused = false;
        self.state.send_if_modified(|s| {
            if s.step == FlowStep::Pending {
                refused = true;
                return false;
            }
            *s = FlowSnapshot::default();
            true
        });

        if refused {
            return Err(FlowError::InvalidState(FlowStep::Pending));
        }
        tracing::debug!("waitlist flow: reset");
        Ok(())
    }
}
