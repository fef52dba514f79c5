//! Behavior of the search loop: evaluation order, counters, policies and isolation

use shrinkage::{
    IntShrinker, MemorySink, PredicateError, SequenceShrinker, ShrinkConfig, ShrinkEngine,
    ShrinkingMode, Shrinker, StringShrinker, get_global_config, set_print_shrink_steps, shrink,
};
use std::cell::RefCell;

fn fails_when(condition: bool) -> Result<(), PredicateError> {
    if condition {
        Err(PredicateError::regression("still failing"))
    } else {
        Ok(())
    }
}

fn engine(mode: ShrinkingMode) -> ShrinkEngine {
    ShrinkEngine::with_config(ShrinkConfig::with_mode(mode).quiet())
}

#[test]
fn test_evaluation_order_follows_candidate_order() {
    let seen = RefCell::new(Vec::new());
    let result = engine(ShrinkingMode::Unbounded)
        .shrink(vec![1u8, 2, 3, 4], &SequenceShrinker::new(0u8), |v: &Vec<u8>| {
            seen.borrow_mut().push(v.clone());
            fails_when(v.contains(&4))
        })
        .unwrap();

    assert_eq!(result.minimal, vec![4]);
    assert_eq!(
        *seen.borrow(),
        vec![
            // [1, 2, 3, 4]
            vec![],
            vec![1, 2],
            vec![1, 2, 0, 0],
            vec![3, 4],
            // [3, 4]
            vec![],
            vec![3],
            vec![3, 0],
            vec![4],
            // [4]
            vec![],
            vec![0],
        ]
    );
    assert_eq!(result.attempts, 5 + 5 + 2);
    assert_eq!(result.shrink_steps, 2);
}

#[test]
fn test_each_round_derives_from_accepted_candidate() {
    let result = engine(ShrinkingMode::Unbounded)
        .shrink(1_000_000u64, &IntShrinker, |n: &u64| fails_when(*n >= 1000))
        .unwrap();

    // halving only stops once the next halving would pass
    assert!(result.minimal >= 1000);
    assert!(IntShrinker
        .shrink(&result.minimal)
        .iter()
        .all(|candidate| *candidate < 1000));
    assert_eq!(result.minimal, 1000);
}

#[test]
fn test_bounded_mode_limits_attempts() {
    for bound in [1, 3, 5, 10, 25] {
        let calls = RefCell::new(0usize);
        let result = engine(ShrinkingMode::Bounded(bound))
            .shrink(
                "97asd!@#ASD'''234)*safmasd".to_string(),
                &StringShrinker::default(),
                |s: &String| {
                    *calls.borrow_mut() += 1;
                    fails_when(s.chars().count() >= 4)
                },
            )
            .unwrap();

        // a round is only started while under the bound and has at most five candidates
        assert!(*calls.borrow() < bound + 5, "bound {}", bound);
        assert!(result.attempts < bound + 5, "bound {}", bound);
        assert!(result.minimal.chars().count() >= 4);
    }
}

#[test]
fn test_unbounded_and_large_bound_agree() {
    let initial = "a quick brown fox # jumps".to_string();
    let run = |mode| {
        engine(mode)
            .shrink(initial.clone(), &StringShrinker::default(), |s: &String| {
                fails_when(s.contains('#'))
            })
            .unwrap()
    };

    let unbounded = run(ShrinkingMode::Unbounded);
    let bounded = run(ShrinkingMode::Bounded(10_000));
    assert_eq!(unbounded.minimal, bounded.minimal);
    assert_eq!(unbounded.attempts, bounded.attempts);
    assert_eq!(unbounded.trace, bounded.trace);
    assert!(bounded.completed);
}

#[test]
fn test_passing_candidates_leave_initial_value() {
    let result = engine(ShrinkingMode::Unbounded)
        .shrink("xyz".to_string(), &StringShrinker::default(), |s: &String| {
            fails_when(s == "xyz")
        })
        .unwrap();

    assert_eq!(result.minimal, "xyz");
    assert_eq!(result.shrink_steps, 0);
    assert_eq!(result.attempts, 5);
    assert_eq!(
        result.trace.result_line(),
        Some("Shrink result (after 5 shrinks) => \"xyz\"")
    );
}

#[test]
fn test_trace_indices_are_global() {
    let sink = MemorySink::new();
    let engine = ShrinkEngine::with_config(ShrinkConfig::with_mode(ShrinkingMode::Unbounded))
        .with_sink(sink.clone());
    engine
        .shrink(12u32, &IntShrinker, |n: &u32| fails_when(*n >= 6))
        .unwrap();

    // 12 -> [0, 6, 11]; 6 -> [0, 3, 5]
    assert_eq!(
        sink.lines(),
        vec![
            "Shrink #0: 0 pass",
            "Shrink #1: 6 fail",
            "Shrink #3: 0 pass",
            "Shrink #4: 3 pass",
            "Shrink #5: 5 pass",
            "Shrink result (after 6 shrinks) => 6",
        ]
    );
}

#[test]
fn test_free_function_reads_toggle_at_call_time() {
    set_print_shrink_steps(false);
    assert!(!get_global_config().print_shrink_steps);

    let minimal = shrink(
        -300i32,
        &IntShrinker,
        ShrinkingMode::Unbounded,
        |n: &i32| fails_when(*n <= -7),
    )
    .unwrap();
    assert_eq!(minimal, -7);

    set_print_shrink_steps(true);
    assert!(get_global_config().print_shrink_steps);
}

#[test]
fn test_concurrent_searches_are_independent() {
    let inputs: Vec<u64> = (1..=8).map(|i| i * 1_000).collect();

    let results = crossbeam::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|&initial| {
                scope.spawn(move |_| {
                    let sink = MemorySink::new();
                    let engine =
                        ShrinkEngine::with_config(ShrinkConfig::with_mode(ShrinkingMode::Unbounded))
                            .with_sink(sink.clone());
                    let threshold = initial / 10;
                    let result = engine
                        .shrink(initial, &IntShrinker, |n: &u64| fails_when(*n >= threshold))
                        .unwrap();
                    (threshold, result.minimal, sink.emitted())
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>()
    })
    .unwrap();

    assert_eq!(results.len(), inputs.len());
    for (threshold, minimal, emitted) in results {
        assert!(minimal >= threshold);
        assert_eq!(emitted, 1);
    }
}
