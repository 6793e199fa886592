//! Checks running on several threads, and cancellation across threads.

use crate::{arg, assert_holds, fast_config};
use falsify::*;
use std::sync::mpsc;
use std::thread;

fn check_with_seed(seed: &str) -> PropertyCheckResult {
    let config = PropertyConfiguration::builder()
        .with_tries(300)
        .with_seed(seed)
        .build()
        .unwrap();
    Property::for_all(
        "reverse twice",
        config,
        vec![arbitraries::lists(arbitraries::integers::<i16>()).boxed()],
    )
    .check(|args| {
        let list: Vec<i16> = arg(args, 0);
        let mut reversed = list.clone();
        reversed.reverse();
        reversed.reverse();
        reversed == list && list.len() < 40
    })
    .unwrap()
}

/// Property: independent checks on separate threads agree with a sequential run
pub fn test_properties_agree_across_threads() {
    let result = Property::for_all(
        "checks agree across threads",
        fast_config(5),
        vec![crate::arbitrary_seed()],
    )
    .check(|args| {
        let seed = arg::<u64>(args, 0).to_string();
        let sequential = check_with_seed(&seed);
        let parallel: Vec<PropertyCheckResult> = thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| check_with_seed(&seed)))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });

        parallel.iter().all(|result| {
            result.check_status == sequential.check_status
                && result.count_tries == sequential.count_tries
                && result.falsified_sample == sequential.falsified_sample
        })
    });
    assert_holds("checks agree across threads", result);
}

/// A check cancelled from another thread stops after the current try.
pub fn test_cancellation_from_another_thread() {
    let cancellation = Cancellation::new();
    let (reached, on_reached) = mpsc::channel::<()>();
    let (acknowledge, on_acknowledged) = mpsc::channel::<()>();

    let canceller = {
        let cancellation = cancellation.clone();
        thread::spawn(move || {
            on_reached.recv().unwrap();
            cancellation.cancel();
            acknowledge.send(()).unwrap();
        })
    };

    let config = PropertyConfiguration::builder()
        .with_tries(100_000)
        .with_seed("17")
        .build()
        .unwrap();
    let result = Property::for_all(
        "cancelled",
        config,
        vec![arbitraries::integers::<u64>().boxed()],
    )
    .with_cancellation(cancellation)
    .check(move |_| {
        if reached.send(()).is_ok() {
            let _ = on_acknowledged.recv();
        }
        true
    })
    .unwrap();
    canceller.join().unwrap();

    assert_eq!(result.check_status, CheckStatus::Exhausted);
    assert!(result.interrupted);
    assert_eq!(result.count_tries, 1);
}
