use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::channel::unbounded;
use sk_algorithms::{AlgorithmRegistry, RunOptions, Sorter};
use sk_common::{AlgorithmKind, EngineConfig, SortError};

fn input(len: usize) -> Vec<i64> {
    (0..len as i64).rev().collect()
}

fn paced_sorter(kind: AlgorithmKind) -> Arc<Sorter> {
    let config = EngineConfig {
        pace_steps: true,
        pause_poll_interval_ms: 10,
        ..EngineConfig::default()
    };
    AlgorithmRegistry::new(config).get(kind)
}

#[test]
fn concurrent_run_on_same_sorter_is_rejected() {
    let sorter = paced_sorter(AlgorithmKind::BubbleSort);
    let (tx, rx) = unbounded();

    let worker = {
        let sorter = Arc::clone(&sorter);
        thread::spawn(move || {
            sorter.sort_with(
                &input(6),
                RunOptions::with_delay(5).events(tx),
            )
        })
    };

    // Wait until the first run has appended a step.
    rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(
        sorter.sort(&[2, 1], 5).unwrap_err(),
        SortError::SortInProgress
    );

    let contested = worker.join().unwrap().unwrap();
    let undisturbed = sorter.sort(&input(6), 5).unwrap();
    assert_eq!(contested, undisturbed);
}

#[test]
fn stop_from_another_thread_fails_the_run() {
    let sorter = paced_sorter(AlgorithmKind::InsertionSort);
    let (tx, rx) = unbounded();

    let worker = {
        let sorter = Arc::clone(&sorter);
        thread::spawn(move || {
            sorter.sort_with(
                &input(30),
                RunOptions::with_delay(20).events(tx),
            )
        })
    };

    for _ in 0..3 {
        rx.recv_timeout(Duration::from_secs(5)).unwrap();
    }
    sorter.stop();

    let err = worker.join().unwrap().unwrap_err();
    match err {
        SortError::SortStopped { recorded } => {
            // The steps seen so far plus at most the one in flight.
            assert!(recorded >= 3);
            assert!(recorded <= 3 + rx.try_iter().count() + 1);
        }
        other => panic!("expected SortStopped, got {other:?}"),
    }
    assert!(!sorter.is_running());
}

#[test]
fn pause_blocks_new_steps_until_resume() {
    let sorter = paced_sorter(AlgorithmKind::SelectionSort);
    let (tx, rx) = unbounded();

    let worker = {
        let sorter = Arc::clone(&sorter);
        thread::spawn(move || {
            sorter.sort_with(
                &input(5),
                RunOptions::with_delay(40).events(tx),
            )
        })
    };

    for _ in 0..3 {
        rx.recv_timeout(Duration::from_secs(5)).unwrap();
    }
    sorter.pause();

    // At most one step was already past its checkpoint.
    thread::sleep(Duration::from_millis(100));
    let in_flight = rx.try_iter().count();
    assert!(in_flight <= 1);

    thread::sleep(Duration::from_millis(150));
    assert_eq!(rx.try_iter().count(), 0, "steps appended while paused");
    assert!(sorter.is_running());

    sorter.resume();
    let steps = worker.join().unwrap().unwrap();
    assert!(steps.last().unwrap().is_terminal());
    assert_eq!(steps.last().unwrap().values(), (0..5).collect::<Vec<i64>>());
}

#[test]
fn stop_while_paused_unblocks_the_run() {
    let sorter = paced_sorter(AlgorithmKind::HeapSort);
    let (tx, rx) = unbounded();

    let worker = {
        let sorter = Arc::clone(&sorter);
        thread::spawn(move || {
            sorter.sort_with(
                &input(12),
                RunOptions::with_delay(5).events(tx),
            )
        })
    };

    rx.recv_timeout(Duration::from_secs(5)).unwrap();
    sorter.pause();
    thread::sleep(Duration::from_millis(50));
    sorter.stop();

    let err = worker.join().unwrap().unwrap_err();
    assert!(err.is_stopped());
}
