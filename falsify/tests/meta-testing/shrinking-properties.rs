//! Shrinking correctness properties
//!
//! Candidates are always strictly smaller, and a shrunk sample still
//! falsifies and is minimal for simple monotonic predicates.

use crate::{arbitrary_seed, arg, assert_holds, fast_config};
use falsify::*;

fn inner_config(seed: u64) -> PropertyConfigurationBuilder {
    PropertyConfiguration::builder()
        .with_tries(200)
        .with_generation(GenerationMode::Randomized)
        .with_seed(seed.to_string())
}

/// Property: every candidate is closer to the target than its parent
pub fn test_candidates_are_smaller() {
    let result = Property::for_all(
        "candidates are smaller",
        fast_config(100),
        vec![
            arbitraries::integers::<i64>()
                .between(-100_000, 100_000)
                .unwrap()
                .boxed(),
            arbitraries::integers::<i64>().between(-50, 50).unwrap().boxed(),
        ],
    )
    .check(|args| {
        let value = i128::from(arg::<i64>(args, 0));
        let target = i128::from(arg::<i64>(args, 1));
        let shrinkable = Shrinkable::integral(value, target);

        shrinkable.shrink().iter().all(|candidate| {
            candidate.distance() < shrinkable.distance()
                && candidate.value().abs_diff(target) < value.abs_diff(target)
        })
    });
    assert_holds("candidates are smaller", result);
}

/// Property: `n < threshold` always shrinks to exactly `threshold`
pub fn test_shrinks_to_threshold() {
    let result = Property::for_all(
        "shrinks to threshold",
        fast_config(30),
        vec![
            arbitraries::integers::<i64>().between(0, 1000).unwrap().boxed(),
            arbitrary_seed(),
        ],
    )
    .check(|args| {
        let threshold: i64 = arg(args, 0);
        let inner = Property::for_all(
            "below threshold",
            inner_config(arg(args, 1)).build().unwrap(),
            vec![arbitraries::integers::<i64>()
                .between(0, 10_000)
                .unwrap()
                .boxed()],
        )
        .check(move |inner_args| arg::<i64>(inner_args, 0) < threshold)
        .unwrap();

        inner.is_failed() && inner.falsified_sample == Some(sample![threshold])
    });
    assert_holds("shrinks to threshold", result);
}

/// Property: a pair falsified by its second component shrinks to `(0, threshold)`
pub fn test_pairs_shrink_both_components() {
    let result = Property::for_all(
        "pairs shrink both components",
        fast_config(20),
        vec![
            arbitraries::integers::<i64>().between(0, 50).unwrap().boxed(),
            arbitrary_seed(),
        ],
    )
    .check(|args| {
        let threshold: i64 = arg(args, 0);
        let inner = Property::for_all(
            "second below threshold",
            inner_config(arg(args, 1)).build().unwrap(),
            vec![arbitraries::tuple2(
                arbitraries::integers::<i64>().between(0, 100).unwrap(),
                arbitraries::integers::<i64>().between(0, 100).unwrap(),
            )
            .boxed()],
        )
        .check(move |inner_args| arg::<(i64, i64)>(inner_args, 0).1 < threshold)
        .unwrap();

        inner.is_failed() && inner.falsified_sample == Some(sample![(0_i64, threshold)])
    });
    assert_holds("pairs shrink both components", result);
}

/// Property: a shrunk list still falsifies and is no longer than the original
pub fn test_shrunk_sample_still_falsifies() {
    let result = Property::for_all(
        "shrunk sample still falsifies",
        fast_config(20),
        vec![arbitrary_seed()],
    )
    .check(|args| {
        let sum_below_50 = |list: &Vec<u32>| list.iter().sum::<u32>() < 50;
        let inner = Property::for_all(
            "sum below 50",
            inner_config(arg(args, 0)).build().unwrap(),
            vec![arbitraries::lists(
                arbitraries::integers::<u32>().between(0, 100).unwrap(),
            )
            .boxed()],
        )
        .check(move |inner_args| sum_below_50(&arg(inner_args, 0)))
        .unwrap();

        let (Some(original), Some(shrunk)) = (inner.original_sample, inner.falsified_sample)
        else {
            return false;
        };
        let original: Vec<u32> = arg(&original, 0);
        let shrunk: Vec<u32> = arg(&shrunk, 0);
        !sum_below_50(&shrunk) && shrunk.len() <= original.len()
    });
    assert_holds("shrunk sample still falsifies", result);
}

/// Property: with shrinking off the reported sample is the original one
pub fn test_shrinking_off_keeps_original() {
    let result = Property::for_all(
        "shrinking off keeps original",
        fast_config(20),
        vec![arbitrary_seed()],
    )
    .check(|args| {
        let inner = Property::for_all(
            "never more than 10",
            inner_config(arg(args, 0))
                .with_shrinking(ShrinkingMode::Off)
                .build()
                .unwrap(),
            vec![arbitraries::integers::<u16>().boxed()],
        )
        .check(|inner_args| arg::<u16>(inner_args, 0) <= 10)
        .unwrap();

        inner.is_failed()
            && inner.count_shrinking_steps == 0
            && inner.original_sample.is_some()
            && inner.original_sample == inner.falsified_sample
    });
    assert_holds("shrinking off keeps original", result);
}
