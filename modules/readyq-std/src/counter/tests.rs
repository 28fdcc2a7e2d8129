use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc, Mutex,
};

use core::time::Duration;

use serde_json::{json, Value};
use tokio::time::{sleep, Instant};

use super::{CompletionCounter, UnitCompletionCounter};

fn fire_count(counter: &CompletionCounter<Value>) -> Arc<AtomicUsize> {
  let fired = Arc::new(AtomicUsize::new(0));
  let hits = fired.clone();
  counter.subscribe_fn(move |_| {
    hits.fetch_add(1, Ordering::SeqCst);
  });
  fired
}

#[tokio::test(flavor = "current_thread")]
async fn ready_fires_after_deadline_with_zero_count() {
  let counter: CompletionCounter<Value> = CompletionCounter::with_deadline(0, Duration::from_millis(50));
  let fired = fire_count(&counter);
  let started = Instant::now();

  let results = counter.wait().await;
  let elapsed = started.elapsed();

  assert!(results.is_empty());
  assert!(elapsed >= Duration::from_millis(50));
  assert!(elapsed < Duration::from_millis(1000));
  assert!(counter.is_terminal());
  assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn ready_fires_once_after_five_completions() {
  let counter: CompletionCounter<Value> = CompletionCounter::with_count(5);
  let fired = fire_count(&counter);

  for _ in 0..4 {
    counter.complete(None);
    assert!(!counter.is_terminal());
  }
  assert_eq!(fired.load(Ordering::SeqCst), 0);

  counter.complete(None);

  assert!(counter.is_terminal());
  assert_eq!(fired.load(Ordering::SeqCst), 1);
  assert!(counter.wait().await.is_empty());
}

#[tokio::test]
async fn registration_raises_the_expected_count() {
  let counter: CompletionCounter<Value> = CompletionCounter::with_count(5);
  let fired = fire_count(&counter);
  counter.register();

  for _ in 0..5 {
    counter.complete(None);
  }
  assert!(!counter.is_terminal());
  assert_eq!(fired.load(Ordering::SeqCst), 0);

  counter.complete(None);

  assert!(counter.is_terminal());
  assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn results_match_arrival_order() {
  let items = [json!("a"), json!("something"), json!(60), json!(false), json!(null), json!(16.4)];
  let counter: CompletionCounter<Value> = CompletionCounter::with_count(items.len());

  let seen: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
  let sink = seen.clone();
  counter.subscribe_fn(move |results| {
    sink.lock().unwrap().extend(results.iter().cloned());
  });

  for item in &items {
    counter.complete(Some(item.clone()));
  }

  assert!(counter.is_terminal());
  assert_eq!(*seen.lock().unwrap(), items);
  assert_eq!(counter.wait().await.as_slice(), items);
}

#[tokio::test]
async fn over_completion_terminates_immediately() {
  let counter: CompletionCounter<Value> = CompletionCounter::new();
  let fired = fire_count(&counter);

  counter.complete(None);

  assert!(counter.is_terminal());
  assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn post_termination_calls_mutate_nothing() {
  let counter: CompletionCounter<Value> = CompletionCounter::with_count(1);
  let fired = fire_count(&counter);

  counter.complete(Some(json!(1)));
  counter.complete(Some(json!(2)));
  counter.register();
  counter.complete(Some(json!(3)));

  assert_eq!(fired.load(Ordering::SeqCst), 1);
  assert_eq!(counter.wait().await.as_slice(), [json!(1)]);
}

#[tokio::test(flavor = "current_thread")]
async fn deadline_is_cancelled_on_normal_termination() {
  let counter: CompletionCounter<Value> = CompletionCounter::with_deadline(1, Duration::from_millis(50));
  let fired = fire_count(&counter);

  counter.complete(None);
  assert!(counter.is_terminal());

  sleep(Duration::from_millis(120)).await;
  assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn late_completion_after_deadline_is_dropped() {
  let counter: CompletionCounter<Value> = CompletionCounter::with_deadline(2, Duration::from_millis(20));
  let fired = fire_count(&counter);

  counter.complete(Some(json!("early")));
  sleep(Duration::from_millis(60)).await;
  assert!(counter.is_terminal());

  counter.complete(Some(json!("late")));

  assert_eq!(fired.load(Ordering::SeqCst), 1);
  assert_eq!(counter.wait().await.as_slice(), [json!("early")]);
}

#[tokio::test(flavor = "current_thread")]
async fn registered_work_runs_on_a_later_turn() {
  let counter: CompletionCounter<Value> = CompletionCounter::new();
  counter.register_fn(|handle| handle.complete(Some(json!("work"))));
  // Deferred scheduling: the work unit cannot complete before this same-tick
  // registration has raised the pending count.
  counter.register();
  assert!(!counter.is_terminal());

  tokio::task::yield_now().await;
  assert!(!counter.is_terminal());

  counter.complete(None);
  let results = counter.wait().await;
  assert_eq!(results.as_slice(), [json!("work")]);
}

#[tokio::test(flavor = "current_thread")]
async fn duplicate_handle_completions_are_ignored() {
  let counter: CompletionCounter<Value> = CompletionCounter::with_count(1);
  let fired = fire_count(&counter);
  counter.register_fn(|handle| {
    handle.complete(Some(json!(1)));
    handle.complete(Some(json!(2)));
    handle.complete(None);
  });

  tokio::task::yield_now().await;
  assert!(!counter.is_terminal());
  assert_eq!(fired.load(Ordering::SeqCst), 0);

  counter.complete(None);
  assert_eq!(counter.wait().await.as_slice(), [json!(1)]);
  assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn listeners_run_in_subscription_order_with_the_same_snapshot() {
  let counter: CompletionCounter<Value> = CompletionCounter::with_count(1);
  let order: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
  for id in 0..3 {
    let order = order.clone();
    counter.subscribe_fn(move |results| {
      assert_eq!(results.as_slice(), [json!("v")]);
      order.lock().unwrap().push(id);
    });
  }

  counter.complete(Some(json!("v")));

  assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
}

#[tokio::test]
async fn late_subscription_replays_the_snapshot() {
  let counter: CompletionCounter<Value> = CompletionCounter::with_count(1);
  counter.complete(Some(json!("done")));
  assert!(counter.is_terminal());

  let fired = fire_count(&counter);
  assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn waiters_resolve_with_the_snapshot() {
  let counter: UnitCompletionCounter = CompletionCounter::with_count(2);
  let completer = counter.clone();

  let wait_fut = counter.wait();
  let worker = async move {
    completer.complete(Some(()));
    completer.complete(Some(()));
  };

  let (results, ()) = tokio::join!(wait_fut, worker);
  assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn work_units_may_complete_without_values() {
  let counter: UnitCompletionCounter = CompletionCounter::new();
  for _ in 0..3 {
    counter.register_fn(|handle| handle.complete(None));
  }

  let results = counter.wait().await;
  assert!(counter.is_terminal());
  assert!(results.is_empty());
}
