//! Iteration hooks and cooperative cancellation.

use core::ops::ControlFlow;
use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::record::IterationRecord;
use super::state::CampaignState;

/// Callbacks fired around every campaign iteration.
///
/// Returning `ControlFlow::Break(())` from either method stops the campaign
/// cleanly: iterations completed so far are kept and the campaign ends in the
/// [`Cancelled`](crate::CampaignPhase::Cancelled) phase.
///
/// `()` is the no-op hook.
///
/// # Examples
///
/// Stop once any observation exceeds a target:
///
/// ```
/// use core::ops::ControlFlow;
///
/// use bayesopt::campaign::{CampaignState, IterationHook, IterationRecord};
///
/// struct StopAbove(f64);
///
/// impl IterationHook for StopAbove {
///     fn after_iteration(
///         &mut self,
///         _state: &CampaignState,
///         record: &IterationRecord,
///     ) -> ControlFlow<()> {
///         if record.oracle_result.iter().any(|&y| y > self.0) {
///             ControlFlow::Break(())
///         } else {
///             ControlFlow::Continue(())
///         }
///     }
/// }
/// ```
pub trait IterationHook {
    /// Called before an iteration starts, with the state it will start from.
    fn before_iteration(&mut self, _state: &CampaignState) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// Called after an iteration committed, with the new state and the
    /// iteration's record.
    fn after_iteration(
        &mut self,
        _state: &CampaignState,
        _record: &IterationRecord,
    ) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

impl IterationHook for () {}

impl<H: IterationHook + ?Sized> IterationHook for &mut H {
    fn before_iteration(&mut self, state: &CampaignState) -> ControlFlow<()> {
        (**self).before_iteration(state)
    }

    fn after_iteration(
        &mut self,
        state: &CampaignState,
        record: &IterationRecord,
    ) -> ControlFlow<()> {
        (**self).after_iteration(state, record)
    }
}

/// A cloneable flag that cancels a running campaign between iterations.
///
/// Clones share the flag, so one handle can live on another thread while the
/// campaign runs with the other. Cancellation is observed at the next
/// iteration boundary; an iteration in flight always completes or fails as a
/// whole.
///
/// ```
/// use bayesopt::campaign::CancelToken;
///
/// let token = CancelToken::new();
/// let remote = token.clone();
/// assert!(!token.is_cancelled());
/// remote.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// A token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl IterationHook for CancelToken {
    fn before_iteration(&mut self, _state: &CampaignState) -> ControlFlow<()> {
        if self.is_cancelled() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}
