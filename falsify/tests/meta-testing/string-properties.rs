//! Character and string domains.

use crate::{arbitrary_seed, arbitrary_size, arg, assert_holds, fast_config};
use falsify::*;

/// Property: strings only contain chars of their domain, within the length bounds
pub fn test_strings_use_only_allowed_chars() {
    let result = Property::for_all(
        "strings use only allowed chars",
        fast_config(50),
        vec![
            arbitraries::integers::<usize>().between(0, 20).unwrap().boxed(),
            arbitrary_size(),
            arbitrary_seed(),
        ],
    )
    .check(|args| {
        let max_length: usize = arg(args, 0);
        let domain = arbitraries::strings()
            .with_chars("xyz".chars())
            .numeric()
            .of_max_length(max_length)
            .unwrap();
        let allowed = |s: &String| {
            s.chars().count() <= max_length
                && s.chars().all(|c| "xyz".contains(c) || c.is_ascii_digit())
        };
        let generator = domain.generator(Size::new(arg(args, 1)));
        let mut random = Random::from_u64(arg(args, 2));

        (0..50).all(|_| {
            let drawn = generator.next(&mut random).unwrap();
            allowed(drawn.value()) && drawn.shrink().iter().all(|c| allowed(c.value()))
        })
    });
    assert_holds("strings use only allowed chars", result);
}

/// Property: a char range yields only chars inside it
pub fn test_char_ranges() {
    let result = Property::for_all(
        "char ranges",
        fast_config(50),
        vec![
            arbitraries::chars().ascii().boxed(),
            arbitraries::integers::<u32>().between(0, 5000).unwrap().boxed(),
            arbitrary_seed(),
        ],
    )
    .check(|args| {
        let low: char = arg(args, 0);
        // ascii plus at most 5000 stays below the surrogates
        let high = char::from_u32(low as u32 + arg::<u32>(args, 1)).unwrap();
        let domain = arbitraries::chars().range(low, high).unwrap();
        let generator = domain.generator(Size::new(100));
        let mut random = Random::from_u64(arg(args, 2));

        (0..50).all(|_| (low..=high).contains(generator.next(&mut random).unwrap().value()))
    });
    assert_holds("char ranges", result);
}
