//! Headless host wiring: strings the six timing-engine components together
//! behind contract-only stand-ins for everything the core doesn't own
//! (frame source, MIDI adapter, pattern loader, calibration storage) and
//! runs one short session to demonstrate the wiring end to end.

mod calibrator_adapter;
mod config;
mod json_loader;
mod midi_stub;

use calibration::{CalibrationConfig, InMemoryCalibrationStore, LatencyCalibrator};
use calibrator_adapter::CalibratorAdapter;
use bus::{Event, EventBus, EventKind};
use config::DemoConfig;
use engine::{Accuracy, DrumKind, HitEvent};
use json_loader::JsonPatternLoader;
use judge::{HitQueue, Judge};
use pattern::{PatternLoader, PatternPlayer};
use scheduler::Scheduler;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const DEVICE_ID: &str = "demo-pad";
const INPUT_METHOD: &str = "midi";
const PATTERN_PATH: &str = "demos/patterns/core_riff.json";
const CONFIG_PATH: &str = "demos/djentronome.toml";

fn main() {
    env_logger::init();

    let config = DemoConfig::load_from(CONFIG_PATH);
    let compensator = calibrate_device(config.calibration);

    let bus = Rc::new(RefCell::new(EventBus::new()));
    install_logging(&bus);

    let mut scheduler = Scheduler::new(config.scheduler, bus.clone());
    let mut player = PatternPlayer::new(config.pattern_player, bus.clone());
    let mut judge = Judge::new(config.judge, bus.clone());

    let pattern = load_pattern_off_core_thread(PATTERN_PATH);
    let shared_pattern = player.load_pattern(pattern);
    judge.attach(shared_pattern.clone(), Box::new(compensator));

    let hit_queue = HitQueue::new();
    midi_stub::spawn_scripted_source(&hit_queue, scripted_hits());

    player.start().expect("pattern was just loaded");
    scheduler.start();

    let mut fixed_dt_acc = 0.0_f64;
    let frame_period_ms = 1000.0 / config.scheduler.target_fps as f64;
    let total_frames = ((shared_pattern.duration_ms + 500.0) / frame_period_ms).ceil() as u32;

    for frame in 0..total_frames {
        let wall_ms = frame as f64 * frame_period_ms;
        std::thread::sleep(Duration::from_millis(frame_period_ms as u64));

        scheduler.tick(
            wall_ms,
            |dt_ms| {
                fixed_dt_acc += dt_ms;
                player.update(fixed_dt_acc);
                judge.drain_and_advance(&hit_queue, fixed_dt_acc);
                Ok(())
            },
            |_delta_ms, _interpolation| Ok(()),
        );
    }

    scheduler.stop();

    let score = judge.get_score_state();
    log::info!(
        "session complete: score={} max_combo={} accuracy={:.1}% ({:?})",
        score.score,
        score.max_combo,
        judge.accuracy_pct(),
        score.counts,
    );
}

fn calibrate_device(config: CalibrationConfig) -> CalibratorAdapter<InMemoryCalibrationStore> {
    let store = InMemoryCalibrationStore::new();
    let mut calibrator = LatencyCalibrator::new(config, store);

    // A device that consistently reports hits ~18ms after the cue.
    let samples: Vec<(f64, f64)> =
        (0..12).map(|i| (i as f64 * 100.0, i as f64 * 100.0 + 18.0)).collect();

    match calibrator.calibrate(DEVICE_ID, INPUT_METHOD, &samples, 0.0) {
        Ok(profile) => log::info!("calibrated '{DEVICE_ID}' at {:.1}% confidence", profile.confidence * 100.0),
        Err(err) => log::warn!("calibration for '{DEVICE_ID}' was flagged: {err}"),
    }

    CalibratorAdapter::new(calibrator)
}

fn load_pattern_off_core_thread(path: &str) -> engine::Pattern {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .build()
        .expect("failed to start the loader runtime");

    let path = path.to_string();
    runtime
        .block_on(async move {
            tokio::task::spawn_blocking(move || JsonPatternLoader.load(&path))
                .await
                .expect("pattern-loading task panicked")
        })
        .expect("failed to load demo pattern")
}

fn scripted_hits() -> Vec<(Duration, HitEvent)> {
    // Raw timestamps carry the device's ~18ms reporting lag baked in by
    // `calibrate_device`; the judge sees them compensated back near 0.
    vec![
        (Duration::from_millis(18), HitEvent::new(DrumKind::Kick, 18.0, 110, DEVICE_ID)),
        (Duration::from_millis(218), HitEvent::new(DrumKind::Kick, 218.0, 105, DEVICE_ID)),
        (Duration::from_millis(418), HitEvent::new(DrumKind::Snare, 418.0, 120, DEVICE_ID)),
        (Duration::from_millis(618), HitEvent::new(DrumKind::Kick, 618.0, 100, DEVICE_ID)),
        (Duration::from_millis(1018), HitEvent::new(DrumKind::Snare, 1018.0, 115, DEVICE_ID)),
        (Duration::from_millis(1218), HitEvent::new(DrumKind::HiHat, 1218.0, 90, DEVICE_ID)),
        // A hit with no nearby note of its kind: a ghost.
        (Duration::from_millis(1300), HitEvent::new(DrumKind::Cymbal, 1300.0, 80, DEVICE_ID)),
    ]
}

fn install_logging(bus: &Rc<RefCell<EventBus>>) {
    let mut bus_mut = bus.borrow_mut();
    bus_mut.subscribe(EventKind::PatternLoaded, |event| {
        if let Event::PatternLoaded { pattern_id } = event {
            log::info!("pattern loaded: {pattern_id}");
        }
        Ok(())
    });
    bus_mut.subscribe(EventKind::SectionChanged, |event| {
        if let Event::SectionChanged { section, game_time_ms } = event {
            log::info!("section '{}' at {:.0}ms", section.name, game_time_ms);
        }
        Ok(())
    });
    bus_mut.subscribe(EventKind::HitJudged, |event| {
        if let Event::HitJudged { judgment } = event {
            match judgment.accuracy {
                Accuracy::Miss => log::info!("miss at {:.0}ms", judgment.game_time_ms),
                Accuracy::Ghost => log::info!("ghost hit at {:.0}ms", judgment.game_time_ms),
                _ => log::info!(
                    "{} delta={:.1}ms combo={}",
                    judgment.accuracy,
                    judgment.delta_ms,
                    judgment.combo_after
                ),
            }
        }
        Ok(())
    });
    bus_mut.subscribe(EventKind::PatternCompleted, |event| {
        if let Event::PatternCompleted { pattern_id } = event {
            log::info!("pattern completed: {pattern_id}");
        }
        Ok(())
    });
    bus_mut.subscribe(EventKind::Error, |event| {
        if let Event::Error { source_kind, reason } = event {
            log::error!("{source_kind:?}: {reason}");
        }
        Ok(())
    });
}
