use crate::{ActionKey, DogImageRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch books and dog once, cancellable by `Shutdown`.
    StartInitialLoad,
    /// Schedule a debounced action on the refresh coordinator.
    Trigger(ActionKey),
    /// Check that the current dog image actually resolves.
    ProbeImage(DogImageRef),
    /// Cancel the initial load and every pending trigger.
    Shutdown,
}
