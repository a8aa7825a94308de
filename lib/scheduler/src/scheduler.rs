//! Drives fixed-timestep updates from a variable-rate frame signal.

use crate::config::SchedulerConfig;
use crate::error::SchedulerError;
use crate::perf::{PerfMonitor, PerfStats};
use bus::{Event, EventBus, EventKind, SubscriptionToken};
use std::cell::RefCell;
use std::rc::Rc;
use time::TimeProvider;

/// Bounds work per frame regardless of the frame source's rate, publishing
/// lifecycle events on a shared [`EventBus`] as it goes.
///
/// `Scheduler` owns its [`TimeProvider`] but shares the bus with whatever
/// else in the session needs to publish or subscribe (the pattern player,
/// the judge). The bus is reference-counted rather than owned outright
/// because the core is single-threaded cooperative, not because multiple
/// threads touch it.
pub struct Scheduler {
    config: SchedulerConfig,
    time: TimeProvider,
    bus: Rc<RefCell<EventBus>>,
    perf: PerfMonitor,
    running: bool,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig, bus: Rc<RefCell<EventBus>>) -> Self {
        let time = TimeProvider::new(config.time_provider_config());
        let perf = PerfMonitor::new(config.perf_window_size);
        Self { config, time, bus, perf, running: false }
    }

    pub fn start(&mut self) {
        self.running = true;
        self.bus.borrow_mut().emit(&Event::Start);
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.bus.borrow_mut().emit(&Event::Stop);
    }

    pub fn pause(&mut self) {
        self.time.pause();
        self.bus.borrow_mut().emit(&Event::Pause);
    }

    /// `wall_ms` re-baselines the clock so the pause duration is not
    /// observed as simulation time on the next tick.
    pub fn resume(&mut self, wall_ms: f64) {
        self.time.resume(wall_ms);
        self.bus.borrow_mut().emit(&Event::Resume);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_time_scale(&mut self, scale: f64) {
        self.time.set_time_scale(scale);
    }

    pub fn on(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&Event) -> Result<(), String> + 'static,
    ) -> SubscriptionToken {
        self.bus.borrow_mut().subscribe(kind, handler)
    }

    pub fn get_perf_stats(&self) -> PerfStats {
        self.perf.stats()
    }

    pub fn game_time_ms(&self) -> f64 {
        self.time.game_time() * 1000.0
    }

    /// Advances the scheduler by one wall-clock tick.
    ///
    /// Calls `update(fixed_dt_ms)` once per fixed step — up to
    /// `max_updates_per_frame` times — and `render(delta_time_ms,
    /// interpolation)` once at the end of the frame. Both callbacks report
    /// failures through their `Result`; a failure is caught, logged and
    /// surfaced as a synthetic `ERROR` event rather than propagated.
    pub fn tick(
        &mut self,
        wall_ms: f64,
        mut update: impl FnMut(f64) -> Result<(), String>,
        mut render: impl FnMut(f64, f64) -> Result<(), String>,
    ) {
        self.perf.begin_frame(wall_ms);
        self.time.begin_frame(wall_ms);

        if self.time.is_paused() {
            let interpolation = self.time.interpolation();
            if let Err(reason) = render(0.0, interpolation) {
                self.emit_failure(SchedulerError::RenderFailure { reason });
            } else {
                self.bus.borrow_mut().emit(&Event::Render { delta_time_ms: 0.0, interpolation });
            }
            self.perf.end_frame(0);
            return;
        }

        let fixed_dt_ms = self.time.config().fixed_dt() * 1000.0;
        let mut update_count = 0u32;
        while update_count < self.config.max_updates_per_frame && self.time.consume_step() {
            let game_time_ms = self.time.game_time() * 1000.0;
            self.bus.borrow_mut().emit(&Event::Update { game_time_ms });
            if let Err(reason) = update(fixed_dt_ms) {
                self.emit_failure(SchedulerError::UpdateFailure { reason });
                break;
            }
            update_count += 1;
        }

        let delta_time_ms = self.time.delta_time() * 1000.0;
        let interpolation = self.time.interpolation();
        if let Err(reason) = render(delta_time_ms, interpolation) {
            self.emit_failure(SchedulerError::RenderFailure { reason });
        } else {
            self.bus.borrow_mut().emit(&Event::Render { delta_time_ms, interpolation });
        }
        self.perf.end_frame(update_count);
    }

    fn emit_failure(&mut self, error: SchedulerError) {
        log::error!("{error}");
        let (source_kind, reason) = match error {
            SchedulerError::UpdateFailure { reason } => (EventKind::Update, reason),
            SchedulerError::RenderFailure { reason } => (EventKind::Render, reason),
        };
        self.bus.borrow_mut().emit(&Event::Error { source_kind, reason });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn scheduler(bus: Rc<RefCell<EventBus>>) -> Scheduler {
        Scheduler::new(SchedulerConfig { target_fps: 60, max_updates_per_frame: 5, perf_window_size: 60 }, bus)
    }

    #[test]
    fn scenario_a_caps_updates_at_max_per_frame() {
        let bus = Rc::new(RefCell::new(EventBus::new()));
        let mut sched = scheduler(bus);
        let updates = Rc::new(Cell::new(0));

        sched.tick(0.0, |_| Ok(()), |_, _| Ok(()));
        let u = updates.clone();
        sched.tick(
            100.0,
            move |_| {
                u.set(u.get() + 1);
                Ok(())
            },
            |_, _| Ok(()),
        );

        assert_eq!(updates.get(), 5);
    }

    #[test]
    fn update_is_emitted_before_render_each_tick() {
        let bus = Rc::new(RefCell::new(EventBus::new()));
        let order = Rc::new(RefCell::new(Vec::new()));

        let o1 = order.clone();
        bus.borrow_mut().subscribe(EventKind::Update, move |_| {
            o1.borrow_mut().push("update");
            Ok(())
        });
        let o2 = order.clone();
        bus.borrow_mut().subscribe(EventKind::Render, move |_| {
            o2.borrow_mut().push("render");
            Ok(())
        });

        let mut sched = scheduler(bus);
        sched.tick(0.0, |_| Ok(()), |_, _| Ok(()));
        sched.tick(17.0, |_| Ok(()), |_, _| Ok(()));

        assert_eq!(*order.borrow(), vec!["update", "render"]);
    }

    #[test]
    fn paused_scheduler_renders_with_zero_delta_and_skips_updates() {
        let bus = Rc::new(RefCell::new(EventBus::new()));
        let mut sched = scheduler(bus);
        sched.tick(0.0, |_| Ok(()), |_, _| Ok(()));
        sched.pause();

        let updates = Rc::new(Cell::new(0));
        let u = updates.clone();
        let renders = Rc::new(Cell::new((0.0_f64, 0.0_f64)));
        let r = renders.clone();
        sched.tick(
            5000.0,
            move |_| {
                u.set(u.get() + 1);
                Ok(())
            },
            move |dt, interp| {
                r.set((dt, interp));
                Ok(())
            },
        );

        assert_eq!(updates.get(), 0);
        assert_eq!(renders.get().0, 0.0);
    }

    #[test]
    fn update_failure_emits_error_and_stops_the_frames_update_loop() {
        let bus = Rc::new(RefCell::new(EventBus::new()));
        let errors = Rc::new(Cell::new(0));
        let e = errors.clone();
        bus.borrow_mut().subscribe(EventKind::Error, move |_| {
            e.set(e.get() + 1);
            Ok(())
        });

        let mut sched = scheduler(bus);
        sched.tick(0.0, |_| Ok(()), |_, _| Ok(()));
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        sched.tick(
            100.0,
            move |_| {
                c.set(c.get() + 1);
                Err("simulation exploded".to_string())
            },
            |_, _| Ok(()),
        );

        assert_eq!(calls.get(), 1, "update loop should break after the first failure");
        assert_eq!(errors.get(), 1);
    }
}
