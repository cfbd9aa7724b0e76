use crate::api::types::SystemId;
use crate::data::record::StellarSystemRecord;

/// Discrete requests from the UI and the data loader.
/// Applied in arrival order at the start of the next tick.
#[derive(Debug, Clone)]
pub enum ComposerInput {
    /// A system was clicked.
    SelectSystem(SystemId),
    /// The back control was used.
    GoIdle,
    /// The "new system" control was used.
    GoCreate,
    /// The loader resolved a system id.
    SystemLoaded(StellarSystemRecord),
    /// The loader gave up on a system id.
    SystemLoadFailed { id: SystemId, reason: String },
    /// Lock or unlock the return-to-overview watcher.
    SetCameraLock(bool),
}

/// A queue of composer inputs.
/// The host pushes inputs between frames; the composer drains them each tick.
pub struct InputQueue {
    inputs: Vec<ComposerInput>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            inputs: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, input: ComposerInput) {
        self.inputs.push(input);
    }

    /// Take all pending inputs, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<ComposerInput> {
        std::mem::take(&mut self.inputs)
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_keeps_order() {
        let mut q = InputQueue::new();
        q.push(ComposerInput::SelectSystem(SystemId::new("a")));
        q.push(ComposerInput::GoIdle);
        q.push(ComposerInput::SetCameraLock(true));
        assert_eq!(q.len(), 3);

        let inputs = q.drain();
        assert!(q.is_empty());
        assert!(matches!(&inputs[0], ComposerInput::SelectSystem(id) if id.as_str() == "a"));
        assert!(matches!(inputs[1], ComposerInput::GoIdle));
        assert!(matches!(inputs[2], ComposerInput::SetCameraLock(true)));
    }
}
