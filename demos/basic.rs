//! Basic example of checking properties with falsify.

use falsify::*;

fn report(result: Result<PropertyCheckResult>) {
    match result {
        Ok(result) => {
            println!("  status: {:?}", result.check_status);
            println!("  tries: {}, checks: {}", result.count_tries, result.count_checks);
            if let Some(sample) = &result.falsified_sample {
                println!("  falsified: {sample:?}");
                println!("  replay with seed {}", result.random_seed);
            }
        }
        Err(error) => println!("  could not check property: {error}"),
    }
    println!();
}

fn main() -> Result<()> {
    println!("falsify property checking examples");
    println!();

    println!("Booleans are either true or false (exhaustive)");
    report(
        Property::for_all(
            "bools",
            PropertyConfiguration::default(),
            vec![arbitraries::bools().boxed()],
        )
        .check(|args| args[0].downcast_ref::<bool>().is_some()),
    );

    println!("Reversing a list twice gives the list back");
    report(
        Property::for_all(
            "reverse twice",
            PropertyConfiguration::default(),
            vec![arbitraries::lists(arbitraries::integers::<i32>()).boxed()],
        )
        .check(|args| {
            let list = args[0].downcast_ref::<Vec<i32>>().cloned().unwrap_or_default();
            let mut twice = list.clone();
            twice.reverse();
            twice.reverse();
            twice == list
        }),
    );

    println!("All integers are positive (fails)");
    let config = PropertyConfiguration::builder().with_tries(20).build()?;
    report(
        Property::for_all(
            "positive",
            config,
            vec![arbitraries::integers::<i64>().between(-10, 10)?.boxed()],
        )
        .check(|args| args[0].downcast_ref::<i64>().map_or(false, |n| *n > 0)),
    );

    println!("Only even numbers are halved exactly (assumptions)");
    report(
        Property::for_all(
            "halving",
            PropertyConfiguration::default(),
            vec![arbitraries::integers::<u32>().boxed()],
        )
        .check(|args| {
            let n = args[0].downcast_ref::<u32>().copied().unwrap_or_default();
            assuming(n % 2 == 0, || n / 2 * 2 == n)
        }),
    );

    Ok(())
}
