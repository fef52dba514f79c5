//! Walkthrough of the shrink search on strings and integers
//!
//! Run with `cargo run --example string_shrinking`. Each search prints its
//! trace to standard error, followed by a summary on standard output.

use shrinkage::{
    IntShrinker, PredicateError, ShrinkConfig, ShrinkEngine, ShrinkingMode, Shrinker,
    StringShrinker, catch_regressions,
};

fn example_1_length_threshold() {
    println!("=== Example 1: strings of length >= 4 fail ===");

    let engine = ShrinkEngine::with_config(ShrinkConfig::with_mode(ShrinkingMode::Unbounded));
    let result = engine.shrink(
        "97asd!@#ASD'''234)*safmasd".to_string(),
        &StringShrinker::default(),
        |s: &String| {
            if s.chars().count() >= 4 {
                Err(PredicateError::regression(format!("{:?} is too long", s)))
            } else {
                Ok(())
            }
        },
    );

    match result {
        Ok(result) => println!(
            "minimal: {:?} after {} attempts and {} accepted shrinks\n",
            result.minimal, result.attempts, result.shrink_steps
        ),
        Err(e) => println!("search aborted: {}\n", e),
    }
}

fn example_2_assertion_predicate() {
    println!("=== Example 2: panicking assertions as predicates ===");

    // keep the default panic hook from printing every caught assertion
    std::panic::set_hook(Box::new(|_| {}));

    let engine = ShrinkEngine::with_config(ShrinkConfig::with_mode(ShrinkingMode::Unbounded));
    let result = engine.shrink(
        "parse me: key=value; other#thing".to_string(),
        &StringShrinker::new('_'),
        catch_regressions(|s: &String| assert!(!s.contains('#'), "marker in {:?}", s)),
    );

    let _ = std::panic::take_hook();

    if let Ok(result) = result {
        println!("minimal: {:?} (completed: {})\n", result.minimal, result.completed);
    }
}

fn example_3_bounded_search() {
    println!("=== Example 3: bounded search on integers ===");

    for mode in [
        ShrinkingMode::Off,
        ShrinkingMode::Bounded(4),
        ShrinkingMode::Unbounded,
    ] {
        let engine = ShrinkEngine::with_config(ShrinkConfig::with_mode(mode).quiet());
        let result = engine.shrink(10_000i64, &IntShrinker, |n: &i64| {
            if *n > 37 {
                Err(PredicateError::regression("over the limit"))
            } else {
                Ok(())
            }
        });

        if let Ok(result) = result {
            println!(
                "{:>12}: minimal {} after {} attempts (completed: {})",
                mode.to_string(),
                result.minimal,
                result.attempts,
                result.completed
            );
        }
    }
    println!();
}

fn example_4_shrink_tree() {
    println!("=== Example 4: the candidate space as a tree ===");

    let shrinker = StringShrinker::default();
    let tree = shrinker.tree("xyz".to_string());
    print!("{}", tree.render(2));
    println!("nodes within depth 2: {}", tree.count_nodes(2));
}

fn main() {
    example_1_length_threshold();
    example_2_assertion_predicate();
    example_3_bounded_search();
    example_4_shrink_tree();
}
