//! Cross-thread hand-off for hits arriving off the core thread.

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use engine::HitEvent;

/// A bounded-by-nothing MPSC queue a MIDI callback thread can push into
/// without blocking on the core. The core drains it at the start of an
/// update step, never during one.
pub struct HitQueue {
    sender: Sender<HitEvent>,
    receiver: Receiver<HitEvent>,
}

impl HitQueue {
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self { sender, receiver }
    }

    /// A cloneable handle for producer threads (e.g. a MIDI callback).
    pub fn sender(&self) -> Sender<HitEvent> {
        self.sender.clone()
    }

    /// Drains every hit currently queued, in arrival order. Never blocks.
    pub fn drain(&self) -> Vec<HitEvent> {
        let mut hits = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(hit) => hits.push(hit),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        hits
    }
}

impl Default for HitQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::DrumKind;

    #[test]
    fn drains_hits_in_arrival_order() {
        let queue = HitQueue::new();
        let tx = queue.sender();
        tx.send(HitEvent::new(DrumKind::Kick, 0.0, 100, "dev")).unwrap();
        tx.send(HitEvent::new(DrumKind::Snare, 10.0, 100, "dev")).unwrap();

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].kind, DrumKind::Kick);
        assert_eq!(drained[1].kind, DrumKind::Snare);
    }

    #[test]
    fn draining_an_empty_queue_returns_nothing() {
        let queue = HitQueue::new();
        assert!(queue.drain().is_empty());
    }
}
