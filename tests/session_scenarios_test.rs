mod test_traces;

use crisscross::config::{CounterConfig, DetectionMode};
use crisscross::session::CrossingSession;
use crisscross::trace::HandSample;
use test_traces::{alternating_trace, step_trace, still_trace};

fn config_for(mode: DetectionMode) -> CounterConfig {
    let mut config = CounterConfig::default();
    config.detector.mode = mode;
    config
}

fn count_crossings(samples: &[HandSample], mode: DetectionMode) -> u64 {
    let start_t = samples.first().map(|s| s.t).unwrap_or(0.0);
    let mut session = CrossingSession::new(&config_for(mode), start_t).unwrap();
    session.process_trace(samples);
    session.count()
}

#[test]
fn test_strict_mode_counts_each_swap_once() {
    // 10 swaps, held 0.5 s apiece: every boundary is a clean order flip
    // well outside the cooldown.
    let trace = step_trace(10, 0.5, 30.0);

    let mut session =
        CrossingSession::new(&config_for(DetectionMode::Symmetric), trace[0].t).unwrap();
    let observations = session.process_trace(&trace);

    assert_eq!(
        session.count(),
        10,
        "Each clean swap should count exactly once, got {}",
        session.count()
    );

    let events = observations.iter().filter(|o| o.event.is_some()).count();
    assert_eq!(events, 10, "Expected 10 event observations, got {}", events);
}

#[test]
fn test_relaxed_mode_adds_initial_order_event() {
    let trace = step_trace(10, 0.5, 30.0);

    let counted = count_crossings(&trace, DetectionMode::Asymmetric);

    // Same 10 swaps plus one event for the first visible pair.
    assert_eq!(
        counted, 11,
        "Relaxed mode should count the starting order and every swap, got {}",
        counted
    );
}

#[test]
fn test_rapid_swaps_are_rate_limited() {
    // Swaps every 40 ms, faster than the 100 ms cooldown. The first flip
    // fires, then only every third boundary clears the cooldown, so 10 of
    // the 30 swaps survive.
    let trace = step_trace(30, 0.04, 50.0);

    let counted = count_crossings(&trace, DetectionMode::Symmetric);

    assert!(
        counted < 30,
        "Cooldown should suppress rapid swaps, counted all {}",
        counted
    );
    assert_eq!(counted, 10, "Expected 10 cooldown-spaced events, got {}", counted);
}

#[test]
fn test_swap_hidden_by_dropout_is_not_counted() {
    // Three swaps at t = 0.5, 1.0, 1.5; the left hand disappears across
    // the middle one (samples 28..=32 around the boundary at sample 30).
    let mut trace = step_trace(3, 0.5, 30.0);
    for sample in &mut trace[28..=32] {
        sample.left_y = None;
    }

    let strict = count_crossings(&trace, DetectionMode::Symmetric);
    assert_eq!(
        strict, 2,
        "A swap hidden by a tracking gap must not fire without a fresh flip, got {}",
        strict
    );

    // Relaxed mode re-arms after the gap: starting order, two visible
    // swaps, and one resumption event.
    let relaxed = count_crossings(&trace, DetectionMode::Asymmetric);
    assert_eq!(
        relaxed, 4,
        "Relaxed mode should count the resumption after the gap, got {}",
        relaxed
    );
}

#[test]
fn test_near_tie_wiggle_stays_silent() {
    // Hands hover 0.008 apart and trade order every sample, always inside
    // the 0.02 minimum separation.
    let trace: Vec<HandSample> = (0..60)
        .map(|i| {
            let t = i as f64 / 30.0;
            let wiggle = if i % 2 == 0 { 0.004 } else { -0.004 };
            HandSample::new(t, Some(0.5 + wiggle), Some(0.5 - wiggle))
        })
        .collect();

    assert_eq!(
        count_crossings(&trace, DetectionMode::Symmetric),
        0,
        "Order flips inside the separation dead zone must stay silent"
    );
    assert_eq!(
        count_crossings(&trace, DetectionMode::Asymmetric),
        0,
        "The dead zone applies to relaxed mode as well"
    );
}

#[test]
fn test_rate_warms_up_by_extrapolation() {
    // Four swaps at t = 2, 4, 6, 8 over a 10 s session: well short of the
    // rate window, so the per-minute figure is extrapolated.
    let trace = step_trace(4, 2.0, 30.0);

    let mut session =
        CrossingSession::new(&config_for(DetectionMode::Symmetric), trace[0].t).unwrap();
    let observations = session.process_trace(&trace);

    // One event by t = 3.0 gives 1 / 3 s * 60 = 20 per minute.
    let early = &observations[90];
    assert!(
        (early.rate - 20.0).abs() < 1e-9,
        "Expected extrapolated rate 20.0 at t = 3, got {}",
        early.rate
    );

    let snapshot = session.snapshot(10.0);
    assert_eq!(snapshot.count, 4);
    assert!(
        (snapshot.rate - 24.0).abs() < 1e-9,
        "Expected 4 / 10 s * 60 = 24.0 per minute, got {}",
        snapshot.rate
    );
}

#[test]
fn test_rate_counts_trailing_window_when_mature() {
    // Swaps every 3 s for 93 s. At the end only the events inside the
    // trailing 60 s window (t = 33 .. 90, twenty of them) contribute.
    let trace = step_trace(30, 3.0, 10.0);

    let mut session =
        CrossingSession::new(&config_for(DetectionMode::Symmetric), trace[0].t).unwrap();
    session.process_trace(&trace);

    let last_t = trace.last().unwrap().t;
    let snapshot = session.snapshot(last_t);

    assert_eq!(snapshot.count, 30, "All swaps count toward the session total");
    assert!(
        (snapshot.rate - 20.0).abs() < 1e-9,
        "Expected 20 events in the trailing window, got rate {}",
        snapshot.rate
    );
}

#[test]
fn test_count_survives_quiet_tail_while_rate_decays() {
    // Ten swaps in the first 11 s, then 70 s of motionless hands. The
    // splice keeps the same vertical order, so no extra crossing fires.
    let mut trace = step_trace(10, 1.0, 10.0);
    trace.extend(still_trace(11.0, 70.0, 10.0));

    let mut session =
        CrossingSession::new(&config_for(DetectionMode::Symmetric), trace[0].t).unwrap();
    let observations = session.process_trace(&trace);

    // Right after the tenth swap at t = 10 the windowed rate reads 60/min.
    let at_peak = &observations[100];
    assert!(at_peak.event.is_some(), "Expected the tenth swap at t = 10");
    assert!(
        (at_peak.rate - 60.0).abs() < 1e-9,
        "Expected rate 60.0 right after the last swap, got {}",
        at_peak.rate
    );

    let last_t = trace.last().unwrap().t;
    let snapshot = session.snapshot(last_t);

    assert_eq!(snapshot.count, 10, "An idle tail must not erase the session count");
    assert_eq!(
        snapshot.rate, 0.0,
        "All events have aged out of the window, got rate {}",
        snapshot.rate
    );
    assert!(
        (snapshot.elapsed_seconds - last_t).abs() < 1e-12,
        "Elapsed time should span the whole session, got {}",
        snapshot.elapsed_seconds
    );
}

#[test]
fn test_reset_starts_a_fresh_session_midway() {
    // Eight swaps at t = 0.5 .. 4.0; reset after the fourth.
    let trace = step_trace(8, 0.5, 30.0);
    let split = 68;

    let mut session =
        CrossingSession::new(&config_for(DetectionMode::Symmetric), trace[0].t).unwrap();
    session.process_trace(&trace[..split]);
    assert_eq!(session.count(), 4, "Four swaps before the reset point");

    let reset_t = trace[split - 1].t;
    session.reset(reset_t);
    assert_eq!(session.count(), 0, "Reset must clear the count");

    session.process_trace(&trace[split..]);
    assert_eq!(
        session.count(),
        4,
        "Only swaps after the reset should count, got {}",
        session.count()
    );
    assert_eq!(
        session.samples_seen(),
        (trace.len() - split) as u64,
        "Sample counters restart at the reset"
    );

    let last_t = trace.last().unwrap().t;
    let snapshot = session.snapshot(last_t);
    assert!(
        (snapshot.elapsed_seconds - (last_t - reset_t)).abs() < 1e-9,
        "Elapsed time restarts at the reset, got {}",
        snapshot.elapsed_seconds
    );
}

#[test]
fn test_modes_differ_by_bootstrap_on_smooth_motion() {
    let trace = alternating_trace(20.0, 30.0, 0.437);

    let strict = count_crossings(&trace, DetectionMode::Symmetric);
    let relaxed = count_crossings(&trace, DetectionMode::Asymmetric);

    // Sampling can hide a flip whose first sample past the tie is still
    // inside the separation band, so the strict count trails the ~17
    // zero crossings of the motion.
    assert!(
        (9..=17).contains(&strict),
        "Strict count {} outside the plausible band for 0.437 Hz over 20 s",
        strict
    );
    assert_eq!(
        relaxed,
        strict + 1,
        "Relaxed mode should add exactly the starting-order event: {} vs {}",
        relaxed,
        strict
    );
}

#[test]
fn test_observations_report_running_totals() {
    let trace = step_trace(6, 0.5, 30.0);

    let mut session =
        CrossingSession::new(&config_for(DetectionMode::Symmetric), trace[0].t).unwrap();
    let observations = session.process_trace(&trace);

    let mut prev_count = 0;
    for observation in &observations {
        assert!(
            observation.count >= prev_count,
            "Count must never decrease: {} after {}",
            observation.count,
            prev_count
        );
        assert!(observation.rate >= 0.0, "Rate must never be negative");

        if let Some(event) = observation.event {
            assert_eq!(
                event.count, observation.count,
                "An event carries the same running count as its observation"
            );
        }

        prev_count = observation.count;
    }

    assert_eq!(prev_count, 6);
}
