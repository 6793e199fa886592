//! Replaying a check from its reported seed.

use crate::{arbitrary_seed, arg, assert_holds, fast_config};
use falsify::*;

fn run(seed: &str) -> PropertyCheckResult {
    let config = PropertyConfiguration::builder()
        .with_tries(100)
        .with_generation(GenerationMode::Randomized)
        .with_seed(seed)
        .build()
        .unwrap();
    Property::for_all(
        "pairs are ordered",
        config,
        vec![
            arbitraries::integers::<i32>().boxed(),
            arbitraries::strings().of_max_length(8).unwrap().boxed(),
        ],
    )
    .check(|args| arg::<i32>(args, 0) < 1000 || arg::<String>(args, 1).len() < 3)
    .unwrap()
}

/// Property: the same seed reproduces the same run
pub fn test_same_seed_same_result() {
    let result = Property::for_all(
        "same seed same result",
        fast_config(20),
        vec![arbitrary_seed()],
    )
    .check(|args| {
        let seed = arg::<u64>(args, 0).to_string();
        let first = run(&seed);
        let second = run(&seed);

        first.check_status == second.check_status
            && first.count_tries == second.count_tries
            && first.count_shrinking_steps == second.count_shrinking_steps
            && first.original_sample == second.original_sample
            && first.falsified_sample == second.falsified_sample
    });
    assert_holds("same seed same result", result);
}

/// Property: the result names the seed it ran with, negative ones included
pub fn test_seed_is_reported() {
    let result = Property::for_all(
        "seed is reported",
        fast_config(50),
        vec![arbitraries::integers::<i64>().boxed()],
    )
    .check(|args| {
        let seed = arg::<i64>(args, 0).to_string();
        run(&seed).random_seed == seed
    });
    assert_holds("seed is reported", result);
}
