//! Generator invariants
//!
//! Every drawn value, and every shrinking candidate of it, lies inside the
//! domain it was drawn from.

use crate::{arbitrary_seed, arbitrary_size, arg, assert_holds, fast_config};
use falsify::*;

const DRAWS: usize = 50;

/// Property: integers stay within their bounds, shrinks included
pub fn test_integers_stay_in_range() {
    let result = Property::for_all(
        "integers stay in range",
        fast_config(50),
        vec![
            arbitraries::integers::<i64>()
                .between(-1000, 1000)
                .unwrap()
                .boxed(),
            arbitraries::integers::<i64>().between(0, 500).unwrap().boxed(),
            arbitrary_size(),
            arbitrary_seed(),
        ],
    )
    .check(|args| {
        let min: i64 = arg(args, 0);
        let max = min + arg::<i64>(args, 1);
        let domain = arbitraries::integers::<i64>().between(min, max).unwrap();
        let generator = domain.generator(Size::new(arg(args, 2)));
        let mut random = Random::from_u64(arg(args, 3));

        (0..DRAWS).all(|_| {
            let drawn = generator.next(&mut random).unwrap();
            let in_range = |n: &i64| (min..=max).contains(n);
            in_range(drawn.value()) && drawn.shrink().iter().all(|c| in_range(c.value()))
        })
    });
    assert_holds("integers stay in range", result);
}

/// Property: list lengths stay within the configured sizes
pub fn test_lists_respect_size_bounds() {
    let result = Property::for_all(
        "lists respect size bounds",
        fast_config(50),
        vec![
            arbitraries::integers::<usize>().between(0, 5).unwrap().boxed(),
            arbitraries::integers::<usize>().between(0, 10).unwrap().boxed(),
            arbitrary_size(),
            arbitrary_seed(),
        ],
    )
    .check(|args| {
        let min: usize = arg(args, 0);
        let max = min + arg::<usize>(args, 1);
        let domain = arbitraries::lists(arbitraries::integers::<u8>())
            .of_min_size(min)
            .and_then(|lists| lists.of_max_size(max))
            .unwrap();
        let generator = domain.generator(Size::new(arg(args, 2)));
        let mut random = Random::from_u64(arg(args, 3));

        (0..DRAWS).all(|_| {
            let drawn = generator.next(&mut random).unwrap();
            let fits = |list: &Vec<u8>| (min..=max).contains(&list.len());
            fits(drawn.value()) && drawn.shrink().iter().all(|c| fits(c.value()))
        })
    });
    assert_holds("lists respect size bounds", result);
}

/// Property: doubles are multiples of their scale's unit
pub fn test_doubles_respect_scale() {
    let result = Property::for_all(
        "doubles respect scale",
        fast_config(30),
        vec![
            arbitraries::integers::<u32>().between(0, 4).unwrap().boxed(),
            arbitrary_seed(),
        ],
    )
    .check(|args| {
        let scale: u32 = arg(args, 0);
        let domain = arbitraries::doubles()
            .between(-10.0, 10.0)
            .and_then(|doubles| doubles.of_scale(scale))
            .unwrap();
        let generator = domain.generator(Size::new(100));
        let mut random = Random::from_u64(arg(args, 1));
        let factor = 10f64.powi(scale as i32);

        (0..DRAWS).all(|_| {
            let value = *generator.next(&mut random).unwrap().value();
            let units = value * factor;
            (-10.0..=10.0).contains(&value) && (units - units.round()).abs() < 1e-6
        })
    });
    assert_holds("doubles respect scale", result);
}

/// Property: a filtered domain only yields accepted values
pub fn test_filtered_values_satisfy_predicate() {
    let result = Property::for_all(
        "filtered values satisfy predicate",
        fast_config(30),
        vec![
            arbitraries::integers::<i32>().between(2, 7).unwrap().boxed(),
            arbitrary_seed(),
        ],
    )
    .check(|args| {
        let divisor: i32 = arg(args, 0);
        let domain = arbitraries::integers::<i32>()
            .between(0, 1000)
            .unwrap()
            .filter(move |n| n % divisor == 0);
        let generator = domain.generator(Size::new(100));
        let mut random = Random::from_u64(arg(args, 1));

        (0..DRAWS).all(|_| {
            let drawn = generator.next(&mut random).unwrap();
            drawn.value() % divisor == 0 && drawn.shrink().iter().all(|c| c.value() % divisor == 0)
        })
    });
    assert_holds("filtered values satisfy predicate", result);
}
