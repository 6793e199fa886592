//! Edge cases and exhaustive enumeration of bounded integers.

use crate::{arg, assert_holds, fast_config};
use falsify::*;

fn bounds() -> Vec<BoxedArbitrary> {
    vec![
        arbitraries::integers::<i32>()
            .between(-200, 200)
            .unwrap()
            .boxed(),
        arbitraries::integers::<i32>().between(0, 60).unwrap().boxed(),
    ]
}

/// Property: edge cases lie in range and include both bounds
pub fn test_edge_cases_within_range() {
    let result = Property::for_all("edge cases within range", fast_config(100), bounds()).check(
        |args| {
            let min: i32 = arg(args, 0);
            let max = min + arg::<i32>(args, 1);
            let domain = arbitraries::integers::<i32>().between(min, max).unwrap();
            let edge_cases = domain.edge_cases().values();

            let mut deduped = edge_cases.clone();
            deduped.sort_unstable();
            deduped.dedup();

            edge_cases.iter().all(|n| (min..=max).contains(n))
                && edge_cases.contains(&min)
                && edge_cases.contains(&max)
                && deduped.len() == edge_cases.len()
        },
    );
    assert_holds("edge cases within range", result);
}

/// Property: exhaustive generation yields every value once, ascending
pub fn test_exhaustive_enumerates_each_value_once() {
    let result = Property::for_all(
        "exhaustive enumerates each value once",
        fast_config(100),
        bounds(),
    )
    .check(|args| {
        let min: i32 = arg(args, 0);
        let max = min + arg::<i32>(args, 1);
        let domain = arbitraries::integers::<i32>().between(min, max).unwrap();
        let Some(exhaustive) = domain.exhaustive(1000) else {
            return false;
        };
        let values: Vec<i32> = exhaustive.iter().collect();

        exhaustive.max_count() == values.len() as u64 && values == (min..=max).collect::<Vec<_>>()
    });
    assert_holds("exhaustive enumerates each value once", result);
}

/// Property: a single-value range always yields that value and never shrinks
pub fn test_single_value_ranges() {
    let result = Property::for_all(
        "single value ranges",
        fast_config(50),
        vec![
            arbitraries::integers::<i64>().boxed(),
            crate::arbitrary_seed(),
        ],
    )
    .check(|args| {
        let value: i64 = arg(args, 0);
        let domain = arbitraries::integers::<i64>().between(value, value).unwrap();
        let generator = domain.generator(Size::new(100));
        let mut random = Random::from_u64(arg(args, 1));

        (0..20).all(|_| {
            let drawn = generator.next(&mut random).unwrap();
            *drawn.value() == value && drawn.shrink().is_empty()
        })
    });
    assert_holds("single value ranges", result);
}
