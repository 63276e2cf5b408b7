//! `traverse`/`sequence` together with the array helpers.

use std::time::Duration;

use fpkit::algebra::Natural;
use fpkit::array;
use fpkit::task::{self, Task};
use fpkit::{Left, Right};

use crate::fixtures::{delayed, delayed_rejection, EventLog};

/// Test: traverse keeps input order regardless of completion order
/// Given items whose Tasks finish in reverse order
/// When traversed
/// Then results line up with the input
#[tokio::test(start_paused = true)]
async fn test_traverse_preserves_input_order() {
    let items = [50u64, 40, 30, 20, 10];
    let task = task::traverse(&items, |ms| delayed(format!("item-{}", ms), *ms));
    assert_eq!(
        task.run().await.unwrap(),
        array::map(&items, |ms| format!("item-{}", ms))
    );
}

/// Test: traverse starts every element Task together
/// Given five 100ms Tasks
/// When traversed
/// Then the whole traversal takes about 100ms, not 500ms
#[tokio::test(start_paused = true)]
async fn test_traverse_is_parallel() {
    let log = EventLog::new();
    let names = ["a", "b", "c", "d", "e"];
    let task = task::traverse(&names, |name| log.task(*name, 100));

    let start = tokio::time::Instant::now();
    let results = task.run().await.unwrap();
    assert_eq!(results, vec!["a", "b", "c", "d", "e"]);
    assert!(start.elapsed() < Duration::from_millis(200));

    let starts = array::take_while(&log.events(), |e| e.starts_with("start"));
    assert_eq!(starts.len(), names.len());
}

#[tokio::test(start_paused = true)]
async fn test_sequence_first_rejection_wins() {
    let tasks = vec![
        delayed(1, 100),
        delayed_rejection("late", 50),
        delayed_rejection("early", 10),
    ];
    let err = task::sequence(&tasks).run().await.unwrap_err();
    assert_eq!(err.to_string(), "Rejected: early");
}

#[tokio::test]
async fn test_sequence_of_nothing() {
    let tasks: Vec<Task<u8>> = Vec::new();
    assert_eq!(task::sequence(&tasks).run().await.unwrap(), Vec::<u8>::new());
}

/// Test: traverse then post-process with the array helpers
/// Given a batch where some lookups fail
/// When each lookup is attempted and the batch sequenced
/// Then the results split into failures and successes in input order
#[tokio::test]
async fn test_traverse_with_attempt_and_partition() {
    let ids = [3u32, 8, 1, 12, 5];
    let lookups = task::traverse(&ids, |id| {
        let lookup = if id % 2 == 0 {
            Task::rejected(format!("id {} missing", id))
        } else {
            Task::of(*id * 10)
        };
        lookup.attempt(|e| e.to_string())
    });

    let outcomes = lookups.run().await.unwrap();
    let split = array::partition_map(&outcomes, |o| o.clone());
    assert_eq!(split.right, vec![30, 10, 50]);
    assert_eq!(
        split.left,
        vec!["Rejected: id 8 missing", "Rejected: id 12 missing"]
    );

    let found = array::sort(&Natural, &array::rights(&outcomes));
    assert_eq!(found, vec![10, 30, 50]);
    assert_eq!(array::lefts(&outcomes).len(), 2);
    assert_eq!(outcomes[1], Left("Rejected: id 8 missing".to_string()));
    assert_eq!(outcomes[0], Right(30));
}

#[tokio::test]
async fn test_traverse_chunks() {
    let xs: Vec<u32> = array::unfoldr(1u32, |n| if n <= 6 { Some((n, n + 1)) } else { None });
    let chunks = array::chain(&[0usize, 2, 4], |start| {
        vec![array::take(2, &array::drop(*start, &xs))]
    });
    let sums = task::traverse(&chunks, |chunk| Task::of(chunk.iter().sum::<u32>()));
    assert_eq!(sums.run().await.unwrap(), vec![3, 7, 11]);
}

/// Test: traversal at realistic sizes
/// Given 100_000 items, each mapped to a Task with its own delay
/// When traversed and sequenced
/// Then every result comes back in input order within one delay window
#[tokio::test(start_paused = true)]
async fn test_traverse_large_batch() {
    let items: Vec<u64> = (0..100_000).collect();
    let task = task::traverse(&items, |n| delayed(*n, n % 50));

    let start = tokio::time::Instant::now();
    let results = task.run().await.unwrap();
    assert_eq!(results, items);
    assert!(start.elapsed() < Duration::from_millis(100));

    let tasks: Vec<Task<u64>> = array::map(&items, |n| Task::of(n + 1));
    let sequenced = task::sequence(&tasks).run().await.unwrap();
    assert_eq!(sequenced.len(), items.len());
    assert_eq!(sequenced.last(), Some(&100_000));
}

#[tokio::test(start_paused = true)]
async fn test_large_sequence_rejects_on_failure() {
    let mut tasks: Vec<Task<u32>> = (0..50_000).map(|n| delayed(n, 20)).collect();
    tasks.push(delayed_rejection("tail failed", 5));
    let err = task::sequence(&tasks).run().await.unwrap_err();
    assert_eq!(err.to_string(), "Rejected: tail failed");
}
