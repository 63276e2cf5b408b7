//! Start-order and settle-order tests.
//!
//! Every test here runs on a paused clock: sleeps advance virtual time,
//! so the recorded event order is deterministic.

use std::time::Duration;

use fpkit::algebra::{Monoid, Semigroup, StringConcat};
use fpkit::task::{self, Task};

use crate::fixtures::{delayed, EventLog};

/// Test: chain runs strictly in sequence
/// Given a slow first Task and a fast second Task
/// When chained
/// Then the second does not start until the first has ended
#[tokio::test(start_paused = true)]
async fn test_chain_is_sequential() {
    let log = EventLog::new();
    let second = log.task("second", 1);
    let chained = log.task("first", 50).chain(move |_| second.clone());

    assert_eq!(chained.run().await.unwrap(), "second");
    assert_eq!(
        log.events(),
        vec!["start first", "end first", "start second", "end second"]
    );
}

/// Test: ap starts both operands before either finishes
/// Given a slow function Task and a fast value Task
/// When combined with ap
/// Then both start immediately and total time is the slower of the two
#[tokio::test(start_paused = true)]
async fn test_ap_runs_in_parallel() {
    let log = EventLog::new();
    let f = log
        .task("f", 40)
        .map(|_| |v: String| v.to_uppercase());
    let v = log.task("v", 40);

    let start = tokio::time::Instant::now();
    assert_eq!(task::ap(&f, &v).run().await.unwrap(), "V");
    assert!(start.elapsed() < Duration::from_millis(80));

    let events = log.events();
    assert_eq!(&events[..2], &["start f", "start v"]);
}

/// Test: lifted semigroup is sequential
/// Given two Tasks concatenated with the lifted string semigroup
/// When run
/// Then the second starts after the first ends and total time is the sum
#[tokio::test(start_paused = true)]
async fn test_semigroup_takes_sum_of_durations() {
    let log = EventLog::new();
    let s = task::get_semigroup(StringConcat);
    let joined = s.concat(log.task("x", 30), log.task("y", 30));

    let start = tokio::time::Instant::now();
    assert_eq!(joined.run().await.unwrap(), "xy");
    assert!(start.elapsed() >= Duration::from_millis(60));
    assert_eq!(log.events(), vec!["start x", "end x", "start y", "end y"]);
}

/// Test: race settles with the faster operand
/// Given two Tasks of different speeds, in either order
/// When raced
/// Then the faster value wins and the slower one is not waited for
#[tokio::test(start_paused = true)]
async fn test_race_takes_the_faster() {
    let m = task::get_race_monoid();
    let slow = delayed("slow", 100);
    let fast = delayed("fast", 10);

    let start = tokio::time::Instant::now();
    assert_eq!(m.concat(slow.clone(), fast.clone()).run().await.unwrap(), "fast");
    assert_eq!(m.concat(fast, slow).run().await.unwrap(), "fast");
    assert!(start.elapsed() < Duration::from_millis(100));
}

/// Test: race over many operands
/// Given several Tasks folded with the race monoid from its identity
/// When run
/// Then the fastest value wins
#[tokio::test(start_paused = true)]
async fn test_race_fold_from_identity() {
    let m = task::get_race_monoid();
    let raced = [40u64, 15, 70, 25]
        .iter()
        .map(|ms| delayed(*ms, *ms))
        .fold(m.empty(), |acc, t| m.concat(acc, t));
    assert_eq!(raced.run().await.unwrap(), 15);
}

/// Test: the race loser keeps running
/// Given a race whose losing operand records its end
/// When the race settles and time moves on
/// Then the loser still reaches its end
#[tokio::test(start_paused = true)]
async fn test_race_loser_is_not_cancelled() {
    let log = EventLog::new();
    let raced = task::race(&log.task("winner", 5), &log.task("loser", 20));

    assert_eq!(raced.run().await.unwrap(), "winner");
    assert!(!log.events().contains(&"end loser".to_string()));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(log.events().contains(&"end loser".to_string()));
}

/// Test: never never settles
/// Given never()
/// When awaited with a timeout
/// Then the timeout fires
#[tokio::test(start_paused = true)]
async fn test_never_times_out() {
    let result = tokio::time::timeout(Duration::from_secs(3600), task::never::<()>().run()).await;
    assert!(result.is_err());
}

/// Test: ap starts the value even when the function never settles
/// Given a never-settling function Task and a recording value Task
/// When ap is awaited with a timeout
/// Then the value Task's producer still started and finished
#[tokio::test(start_paused = true)]
async fn test_ap_starts_value_beside_never() {
    let log = EventLog::new();
    let f = task::never::<fn(String) -> String>();
    let applied = task::ap(&f, &log.task("value", 10));

    let result = tokio::time::timeout(Duration::from_millis(100), applied.run()).await;
    assert!(result.is_err());
    assert_eq!(log.events(), vec!["start value", "end value"]);
}

/// Test: racing against the identity leaves nothing behind
/// Given the race monoid's identity and a resolving Task
/// When concatenated and run many times, in both orders
/// Then every run resolves and no runtime task is left alive
#[tokio::test]
async fn test_race_identity_leaves_no_tasks() {
    let m = task::get_race_monoid();
    for n in 0..1000u32 {
        let t = Task::of(n);
        assert_eq!(m.concat(m.empty(), t.clone()).run().await.unwrap(), n);
        assert_eq!(m.concat(t, m.empty()).run().await.unwrap(), n);
    }
    tokio::task::yield_now().await;
    assert_eq!(tokio::runtime::Handle::current().metrics().num_alive_tasks(), 0);
}
