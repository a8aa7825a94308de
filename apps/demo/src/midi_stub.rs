//! A contract-only stand-in for a MIDI adapter: a real adapter would map
//! incoming MIDI note numbers (e.g. Alesis Nitro kick = 36, snare = 38) to
//! `DrumKind` and push hits onto the queue from its own callback thread.
//! This one plays back a fixed script on a timer thread instead.

use engine::HitEvent;
use judge::HitQueue;
use std::thread;
use std::time::Duration;

/// Spawns a thread that sends each `(delay_from_start, hit)` pair into
/// `queue` once its delay has elapsed, in order. Demonstrates the
/// cross-thread hand-off the core is required to tolerate without the
/// MIDI source ever touching core state directly.
pub fn spawn_scripted_source(queue: &HitQueue, script: Vec<(Duration, HitEvent)>) {
    let sender = queue.sender();
    thread::spawn(move || {
        let mut elapsed = Duration::ZERO;
        for (delay, hit) in script {
            let sleep_for = delay.saturating_sub(elapsed);
            thread::sleep(sleep_for);
            elapsed = delay;
            if sender.send(hit).is_err() {
                break;
            }
        }
    });
}
