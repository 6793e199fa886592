//! Shows how falsified samples are shrunk, step by step.

use falsify::*;

fn main() -> Result<()> {
    let config = PropertyConfiguration::builder()
        .with_reporting(Reporting::Falsified)
        .with_generation(GenerationMode::Randomized)
        .build()?;
    let mut steps = |_key: &str, value: &str| println!("  shrunk to {value}");

    println!("Integers below 37");
    let result = Property::for_all(
        "below 37",
        config.clone(),
        vec![arbitraries::integers::<i32>().between(0, 10_000)?.boxed()],
    )
    .check_reporting(
        |args| args[0].downcast_ref::<i32>().map_or(true, |n| *n < 37),
        &mut steps,
    )?;
    println!(
        "  {:?} shrunk to {:?} in {} steps",
        result.original_sample, result.falsified_sample, result.count_shrinking_steps
    );
    println!();

    println!("Strings without the letter 'q'");
    let result = Property::for_all(
        "no q",
        config.clone(),
        vec![arbitraries::strings().alpha().boxed()],
    )
    .check_reporting(
        |args| {
            let text = args[0].downcast_ref::<String>().cloned().unwrap_or_default();
            if text.contains('q') {
                Err(Failure::assertion(format!("found q in {text:?}")))
            } else {
                Ok(true)
            }
        },
        &mut steps,
    )?;
    println!("  minimal: {:?}", result.falsified_sample);
    if let Some(failure) = &result.throwable {
        println!("  failure: {failure}");
    }
    println!();

    println!("Pairs whose sum stays below 100");
    let result = Property::for_all(
        "small sums",
        config,
        vec![
            arbitraries::integers::<u8>().boxed(),
            arbitraries::integers::<u8>().boxed(),
        ],
    )
    .check_reporting(
        |args| {
            let a = args[0].downcast_ref::<u8>().copied().unwrap_or_default();
            let b = args[1].downcast_ref::<u8>().copied().unwrap_or_default();
            u16::from(a) + u16::from(b) < 100
        },
        &mut steps,
    )?;
    println!("  minimal: {:?}", result.falsified_sample);

    Ok(())
}
