use super::transition::Transition;

/// Receives highlight transitions from the synchronizer.
///
/// Implemented by the rendering collaborator. Listeners only see the transition,
/// never the synchronizer, so they cannot trigger another tick from inside a tick.
pub trait TransitionListener: Send {
    fn on_transition(&mut self, transition: &Transition);
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);
