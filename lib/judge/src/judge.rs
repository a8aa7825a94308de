//! Matches incoming hits to pattern notes, retires missed notes, and keeps
//! score/combo state.

use crate::compensator::HitCompensator;
use crate::config::JudgeConfig;
use crate::queue::HitQueue;
use bus::{Event, EventBus, EventKind};
use engine::{Accuracy, DrumKind, HitEvent, Judgment, Note, Pattern, ScoreState};
use std::cell::RefCell;
use std::rc::Rc;

fn base_points(accuracy: Accuracy, config: &JudgeConfig) -> u64 {
    match accuracy {
        Accuracy::Perfect => config.points_perfect,
        Accuracy::Good => config.points_good,
        Accuracy::Ok => config.points_ok,
        Accuracy::Miss => config.points_miss,
        Accuracy::Ghost => 0,
    }
}

/// A hit whose kind carries no usable label. The only producer of this
/// today is an upstream adapter that emits `DrumKind::Other("")` when its
/// own mapping table comes up empty.
fn is_malformed(kind: &DrumKind) -> bool {
    matches!(kind, DrumKind::Other(label) if label.trim().is_empty())
}

pub struct Judge {
    config: JudgeConfig,
    bus: Rc<RefCell<EventBus>>,
    pattern: Option<Rc<Pattern>>,
    compensator: Option<Box<dyn HitCompensator>>,
    judged: Vec<bool>,
    pending_hits: Vec<HitEvent>,
    score: ScoreState,
}

impl Judge {
    pub fn new(config: JudgeConfig, bus: Rc<RefCell<EventBus>>) -> Self {
        Self {
            config,
            bus,
            pattern: None,
            compensator: None,
            judged: Vec::new(),
            pending_hits: Vec::new(),
            score: ScoreState::new(),
        }
    }

    /// Binds the judge to a pattern and a latency compensator. Replacing an
    /// already-attached pattern discards any pending unresolved notes
    /// without emitting miss events for them.
    pub fn attach(&mut self, pattern: Rc<Pattern>, compensator: Box<dyn HitCompensator>) {
        self.judged = vec![false; pattern.len()];
        self.pattern = Some(pattern);
        self.compensator = Some(compensator);
        self.pending_hits.clear();
    }

    /// Queues a hit for resolution on the next [`Judge::advance`]. Malformed
    /// hits are dropped immediately with an `ERROR` event.
    pub fn on_hit(&mut self, hit: HitEvent) {
        if is_malformed(&hit.kind) {
            self.bus.borrow_mut().emit(&Event::Error {
                source_kind: EventKind::HitJudged,
                reason: crate::error::JudgeError::UnknownKind.to_string(),
            });
            return;
        }
        self.pending_hits.push(hit);
    }

    /// Drains `queue` and resolves everything collected against `game_time_ms`.
    pub fn drain_and_advance(&mut self, queue: &HitQueue, game_time_ms: f64) {
        for hit in queue.drain() {
            self.on_hit(hit);
        }
        self.advance(game_time_ms);
    }

    /// Retires notes that have aged out of their window as misses, matches
    /// every pending hit against the active window, and emits `HIT_JUDGED`
    /// in the guaranteed order: misses by note time, then matched hits by
    /// arrival order, then ghosts by arrival order.
    pub fn advance(&mut self, game_time_ms: f64) {
        let Some(pattern) = self.pattern.clone() else {
            self.pending_hits.clear();
            return;
        };

        let mut misses: Vec<usize> = Vec::new();
        for (idx, note) in pattern.notes().iter().enumerate() {
            if !self.judged[idx] && note.time_ms + self.config.ok_window_ms < game_time_ms {
                self.judged[idx] = true;
                misses.push(idx);
            }
        }
        misses.sort_by(|a, b| {
            pattern.note(*a).unwrap().time_ms.partial_cmp(&pattern.note(*b).unwrap().time_ms).unwrap()
        });

        let hits = std::mem::take(&mut self.pending_hits);
        let mut matched: Vec<(usize, HitEvent, Accuracy, f64)> = Vec::new();
        let mut ghosts: Vec<HitEvent> = Vec::new();

        for hit in hits {
            let Some(compensator) = &self.compensator else { continue };
            let t_h = compensator.compensate(&hit.device_id, hit.raw_timestamp_ms);
            let best = self.best_candidate(&pattern, &hit.kind, t_h, game_time_ms);
            match best {
                Some((idx, delta)) => {
                    self.judged[idx] = true;
                    let accuracy = if delta.abs() <= self.config.perfect_window_ms {
                        Accuracy::Perfect
                    } else if delta.abs() <= self.config.good_window_ms {
                        Accuracy::Good
                    } else {
                        Accuracy::Ok
                    };
                    matched.push((idx, hit, accuracy, delta));
                }
                None => ghosts.push(hit),
            }
        }

        for idx in misses {
            self.apply_miss(idx, game_time_ms);
        }
        for (idx, hit, accuracy, delta) in matched {
            self.apply_match(idx, hit, accuracy, delta, game_time_ms);
        }
        for hit in ghosts {
            self.apply_ghost(hit, game_time_ms);
        }
    }

    fn best_candidate(
        &self,
        pattern: &Pattern,
        kind: &DrumKind,
        t_h: f64,
        game_time_ms: f64,
    ) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, note) in pattern.notes().iter().enumerate() {
            if self.judged[idx] || &note.kind != kind {
                continue;
            }
            if note.time_ms < game_time_ms - self.config.ok_window_ms
                || note.time_ms > game_time_ms + self.config.ok_window_ms
            {
                continue;
            }
            let delta = t_h - note.time_ms;
            if delta.abs() > self.config.ok_window_ms {
                continue;
            }
            let is_better = match best {
                None => true,
                Some((best_idx, best_delta)) => {
                    let best_note_time = pattern.note(best_idx).unwrap().time_ms;
                    match delta.abs().partial_cmp(&best_delta.abs()).unwrap() {
                        std::cmp::Ordering::Less => true,
                        std::cmp::Ordering::Greater => false,
                        std::cmp::Ordering::Equal => {
                            if note.time_ms != best_note_time {
                                note.time_ms < best_note_time
                            } else {
                                idx < best_idx
                            }
                        }
                    }
                }
            };
            if is_better {
                best = Some((idx, delta));
            }
        }
        best
    }

    fn apply_miss(&mut self, idx: usize, game_time_ms: f64) {
        self.score.counts.record(Accuracy::Miss);
        self.score.combo = 0;
        self.score.multiplier = engine::multiplier_for_combo(0);
        let score_delta = self.config.points_miss;
        self.score.score += score_delta;
        let judgment = Judgment {
            note_index: Some(idx),
            hit: None,
            accuracy: Accuracy::Miss,
            delta_ms: 0.0,
            score_delta,
            combo_after: 0,
            game_time_ms,
        };
        self.bus.borrow_mut().emit(&Event::HitJudged { judgment });
    }

    fn apply_match(&mut self, idx: usize, hit: HitEvent, accuracy: Accuracy, delta: f64, game_time_ms: f64) {
        self.score.counts.record(accuracy);
        match accuracy {
            Accuracy::Perfect | Accuracy::Good => self.score.combo += 1,
            Accuracy::Ok if self.config.combo_breaks_on_ok => self.score.combo = 0,
            _ => {}
        }
        self.score.max_combo = self.score.max_combo.max(self.score.combo);
        self.score.multiplier = engine::multiplier_for_combo(self.score.combo);
        let points = base_points(accuracy, &self.config);
        let score_delta = (points as f32 * self.score.multiplier).round() as u64;
        self.score.score += score_delta;
        let judgment = Judgment {
            note_index: Some(idx),
            hit: Some(hit),
            accuracy,
            delta_ms: delta,
            score_delta,
            combo_after: self.score.combo,
            game_time_ms,
        };
        self.bus.borrow_mut().emit(&Event::HitJudged { judgment });
    }

    fn apply_ghost(&mut self, hit: HitEvent, game_time_ms: f64) {
        self.score.counts.record(Accuracy::Ghost);
        if self.config.ghost_hit_breaks_combo {
            self.score.combo = 0;
            self.score.multiplier = engine::multiplier_for_combo(0);
        }
        let judgment = Judgment {
            note_index: None,
            hit: Some(hit),
            accuracy: Accuracy::Ghost,
            delta_ms: 0.0,
            score_delta: 0,
            combo_after: self.score.combo,
            game_time_ms,
        };
        self.bus.borrow_mut().emit(&Event::HitJudged { judgment });
    }

    pub fn reset(&mut self) {
        if let Some(pattern) = &self.pattern {
            self.judged = vec![false; pattern.len()];
        }
        self.pending_hits.clear();
        self.score.reset();
    }

    pub fn get_score_state(&self) -> &ScoreState {
        &self.score
    }

    pub fn accuracy_pct(&self) -> f64 {
        self.score.accuracy_pct()
    }

    /// Unjudged notes due within `[game_time_ms - ok_window_ms, game_time_ms + ok_window_ms]`.
    pub fn upcoming_window(&self, game_time_ms: f64) -> Vec<&Note> {
        let Some(pattern) = &self.pattern else { return Vec::new() };
        pattern
            .notes()
            .iter()
            .enumerate()
            .filter(|(idx, note)| {
                !self.judged[*idx]
                    && note.time_ms >= game_time_ms - self.config.ok_window_ms
                    && note.time_ms <= game_time_ms + self.config.ok_window_ms
            })
            .map(|(_, note)| note)
            .collect()
    }
}
