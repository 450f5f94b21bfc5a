//! Behavioral tests for the runtime: serialized transitions, effect
//! execution, subscription lifecycle, and stop semantics.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;

use tealoop::sources::{ChannelSource, IterSource};
use tealoop::{
    Config, Effect, EventSource, ObserverFn, Program, Runtime, RuntimeError, SubscriptionId,
    Subscriptions,
};

const WAIT: Duration = Duration::from_secs(2);

/// Records every observed model value, in transition order.
fn recorder<P>(
    log: Arc<Mutex<Vec<P::Model>>>,
) -> ObserverFn<impl Fn(&P::Model, &Effect<P::Message>) + Send + Sync + 'static>
where
    P: Program,
    P::Model: Clone,
{
    ObserverFn::new(move |model: &P::Model, _effect: &Effect<P::Message>| {
        log.lock().unwrap().push(model.clone());
    })
}

/// Spawns `run()` and returns the runtime plus the loop's join handle.
fn start<P: Program>(
    runtime: Runtime<P>,
) -> (
    Arc<Runtime<P>>,
    tokio::task::JoinHandle<Result<(), RuntimeError>>,
) {
    let runtime = Arc::new(runtime);
    let loop_task = tokio::spawn({
        let runtime = Arc::clone(&runtime);
        async move { runtime.run().await }
    });
    (runtime, loop_task)
}

/// Waits until the watched model satisfies `check`.
async fn wait_model<P, F>(runtime: &Runtime<P>, check: F)
where
    P: Program,
    F: Fn(&P::Model) -> bool,
{
    let mut rx = runtime.watch_model();
    timeout(WAIT, rx.wait_for(|m| m.as_deref().is_some_and(&check)))
        .await
        .expect("model reached expected value in time")
        .expect("runtime alive");
}

/// Polls until `check` passes or the wait budget is exhausted.
async fn wait_until(check: impl Fn() -> bool) {
    let deadline = tokio::time::Instant::now() + WAIT;
    while !check() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not reached in time"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

// ---- Counter: no effects, no subscriptions ----

struct Counter;

enum CounterMsg {
    Increment,
    Decrement,
}

impl Program for Counter {
    type Model = i64;
    type Message = CounterMsg;

    fn init(&self) -> (i64, Effect<CounterMsg>) {
        (0, Effect::none())
    }

    fn update(&self, model: &i64, message: CounterMsg) -> (i64, Effect<CounterMsg>) {
        match message {
            CounterMsg::Increment => (model + 1, Effect::none()),
            CounterMsg::Decrement => (model - 1, Effect::none()),
        }
    }
}

#[tokio::test]
async fn initial_model_is_observed_first() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let runtime = Runtime::builder(Counter)
        .observe(recorder::<Counter>(Arc::clone(&log)))
        .build();
    let (runtime, loop_task) = start(runtime);

    wait_model(&runtime, |m| *m == 0).await;
    assert_eq!(log.lock().unwrap().first(), Some(&0));

    runtime.stop();
    loop_task.await.unwrap().unwrap();
}

#[tokio::test]
async fn sends_fold_in_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let runtime = Runtime::builder(Counter)
        .observe(recorder::<Counter>(Arc::clone(&log)))
        .build();
    let (runtime, loop_task) = start(runtime);
    let handle = runtime.handle();

    handle.send(CounterMsg::Increment);
    handle.send(CounterMsg::Decrement);
    handle.send(CounterMsg::Increment);
    handle.send(CounterMsg::Increment);
    handle.send(CounterMsg::Decrement);

    wait_model(&runtime, |m| *m == 1).await;
    handle.stop();
    loop_task.await.unwrap().unwrap();

    assert_eq!(*log.lock().unwrap(), vec![0, 1, 0, 1, 2, 1]);
}

#[tokio::test]
async fn buffered_messages_survive_stop_and_later_sends_do_not() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let runtime = Runtime::builder(Counter)
        .observe(recorder::<Counter>(Arc::clone(&log)))
        .build();
    let handle = runtime.handle();

    // Enqueued before run(): applied in order after the seed.
    handle.send(CounterMsg::Increment);
    handle.send(CounterMsg::Increment);
    handle.send(CounterMsg::Increment);

    let (runtime, loop_task) = start(runtime);
    wait_model(&runtime, |m| *m == 3).await;

    handle.stop();
    loop_task.await.unwrap().unwrap();

    handle.send(CounterMsg::Increment);
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(runtime.current_model().map(|m| *m), Some(3));
    assert_eq!(*log.lock().unwrap(), vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn run_twice_and_run_after_stop_fail_fast() {
    let (runtime, loop_task) = start(Runtime::new(Counter));

    wait_model(&runtime, |m| *m == 0).await;
    assert!(matches!(
        runtime.run().await,
        Err(RuntimeError::AlreadyStarted)
    ));

    runtime.stop();
    loop_task.await.unwrap().unwrap();
    assert!(matches!(
        runtime.run().await,
        Err(RuntimeError::AlreadyStopped)
    ));
}

// ---- Task chain: init effect re-armed until the model reaches 3 ----

struct TaskChain;

struct Bump;

impl TaskChain {
    fn step() -> Effect<Bump> {
        Effect::task(async { Bump })
    }
}

impl Program for TaskChain {
    type Model = i64;
    type Message = Bump;

    fn init(&self) -> (i64, Effect<Bump>) {
        (0, Self::step())
    }

    fn update(&self, model: &i64, _message: Bump) -> (i64, Effect<Bump>) {
        let next = model + 1;
        let effect = if next < 3 { Self::step() } else { Effect::none() };
        (next, effect)
    }
}

#[tokio::test]
async fn task_effects_chain_until_done() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let effects_after_three = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&effects_after_three);

    let runtime = Runtime::builder(TaskChain)
        .observe(recorder::<TaskChain>(Arc::clone(&log)))
        .observe(ObserverFn::new(move |model: &i64, effect: &Effect<Bump>| {
            if *model >= 3 && !effect.is_none() {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        }))
        .build();
    let (runtime, loop_task) = start(runtime);

    wait_model(&runtime, |m| *m == 3).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    runtime.stop();
    loop_task.await.unwrap().unwrap();

    assert_eq!(*log.lock().unwrap(), vec![0, 1, 2, 3]);
    assert_eq!(effects_after_three.load(Ordering::SeqCst), 0);
}

// ---- Batch: k children, each one message, delivered exactly once ----

struct Fanout {
    width: usize,
}

struct Slot(usize);

impl Program for Fanout {
    type Model = Vec<usize>;
    type Message = Slot;

    fn init(&self) -> (Vec<usize>, Effect<Slot>) {
        let children = (0..self.width).map(|i| Effect::task(async move { Slot(i) }));
        (vec![0; self.width], Effect::batch(children))
    }

    fn update(&self, model: &Vec<usize>, message: Slot) -> (Vec<usize>, Effect<Slot>) {
        let mut next = model.clone();
        next[message.0] += 1;
        (next, Effect::none())
    }
}

#[tokio::test]
async fn batch_delivers_each_child_message_exactly_once() {
    let width = 8;
    let (runtime, loop_task) = start(Runtime::new(Fanout { width }));

    wait_model(&runtime, |m| m.iter().all(|&hits| hits >= 1)).await;

    runtime.stop();
    loop_task.await.unwrap().unwrap();

    let model = runtime.current_model().expect("model seeded");
    assert_eq!(*model, vec![1; width]);
}

// ---- Subscriptions ----

/// Counts how many forwarders ever started polling it, then stays silent.
struct StartCounting {
    starts: Arc<AtomicUsize>,
    counted: bool,
}

impl StartCounting {
    fn new(starts: Arc<AtomicUsize>) -> Self {
        Self {
            starts,
            counted: false,
        }
    }
}

#[async_trait]
impl EventSource<CounterMsg> for StartCounting {
    async fn next(&mut self) -> Option<CounterMsg> {
        if !self.counted {
            self.counted = true;
            self.starts.fetch_add(1, Ordering::SeqCst);
        }
        std::future::pending().await
    }
}

/// Counter that keeps one "watcher" subscription while the model is below 10.
struct Subscribed {
    starts: Arc<AtomicUsize>,
}

impl Program for Subscribed {
    type Model = i64;
    type Message = CounterMsg;

    fn init(&self) -> (i64, Effect<CounterMsg>) {
        (0, Effect::none())
    }

    fn update(&self, model: &i64, message: CounterMsg) -> (i64, Effect<CounterMsg>) {
        match message {
            CounterMsg::Increment => (model + 1, Effect::none()),
            CounterMsg::Decrement => (model - 1, Effect::none()),
        }
    }

    fn subscriptions(&self, model: &i64) -> Subscriptions<CounterMsg> {
        if *model < 10 {
            // A fresh source value every computation; identity decides reuse.
            Subscriptions::new().with("watcher", StartCounting::new(Arc::clone(&self.starts)))
        } else {
            Subscriptions::new()
        }
    }
}

#[tokio::test]
async fn kept_id_is_never_restarted() {
    let starts = Arc::new(AtomicUsize::new(0));
    let (runtime, loop_task) = start(Runtime::new(Subscribed {
        starts: Arc::clone(&starts),
    }));
    let handle = runtime.handle();
    let watcher = SubscriptionId::from("watcher");

    wait_model(&runtime, |m| *m == 0).await;
    wait_until(|| handle.is_subscribed(&watcher)).await;

    for _ in 0..5 {
        handle.send(CounterMsg::Increment);
    }
    wait_model(&runtime, |m| *m == 5).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(handle.is_subscribed(&watcher));
    assert_eq!(starts.load(Ordering::SeqCst), 1, "forwarder restarted");

    runtime.stop();
    loop_task.await.unwrap().unwrap();
}

#[tokio::test]
async fn removed_id_is_torn_down() {
    let starts = Arc::new(AtomicUsize::new(0));
    let (runtime, loop_task) = start(Runtime::new(Subscribed {
        starts: Arc::clone(&starts),
    }));
    let handle = runtime.handle();
    let watcher = SubscriptionId::from("watcher");

    wait_until(|| handle.is_subscribed(&watcher)).await;

    // Drive the model to 10: the desired set no longer contains the id,
    // even though the source itself never completed.
    for _ in 0..10 {
        handle.send(CounterMsg::Increment);
    }
    wait_model(&runtime, |m| *m == 10).await;
    wait_until(|| !handle.is_subscribed(&watcher)).await;
    assert!(handle.active_subscriptions().is_empty());

    runtime.stop();
    loop_task.await.unwrap().unwrap();
}

/// Program with one finite replay subscription that is always desired.
struct Replay;

impl Program for Replay {
    type Model = i64;
    type Message = CounterMsg;

    fn init(&self) -> (i64, Effect<CounterMsg>) {
        (0, Effect::none())
    }

    fn update(&self, model: &i64, message: CounterMsg) -> (i64, Effect<CounterMsg>) {
        match message {
            CounterMsg::Increment => (model + 1, Effect::none()),
            CounterMsg::Decrement => (model - 1, Effect::none()),
        }
    }

    fn subscriptions(&self, _model: &i64) -> Subscriptions<CounterMsg> {
        Subscriptions::new().with("replay", IterSource::new(vec![CounterMsg::Increment]))
    }
}

#[tokio::test]
async fn exhausted_source_deregisters_itself() {
    let (runtime, loop_task) = start(Runtime::new(Replay));
    let handle = runtime.handle();
    let replay = SubscriptionId::from("replay");

    // One replayed event, then natural completion. No further transition
    // happens, so nothing re-adds the id.
    wait_model(&runtime, |m| *m == 1).await;
    wait_until(|| !handle.is_subscribed(&replay)).await;

    runtime.stop();
    loop_task.await.unwrap().unwrap();
}

/// Two externally driven subscriptions: "forward" adds, "backward" subtracts.
struct TwoFeeds {
    forward: ChannelSource<CounterMsg>,
    backward: ChannelSource<CounterMsg>,
}

impl Program for TwoFeeds {
    type Model = i64;
    type Message = CounterMsg;

    fn init(&self) -> (i64, Effect<CounterMsg>) {
        (0, Effect::none())
    }

    fn update(&self, model: &i64, message: CounterMsg) -> (i64, Effect<CounterMsg>) {
        match message {
            CounterMsg::Increment => (model + 1, Effect::none()),
            CounterMsg::Decrement => (model - 1, Effect::none()),
        }
    }

    fn subscriptions(&self, _model: &i64) -> Subscriptions<CounterMsg> {
        Subscriptions::new()
            .with("forward", self.forward.clone())
            .with("backward", self.backward.clone())
    }
}

#[tokio::test]
async fn alternating_subscriptions_interleave_through_the_queue() {
    let (fwd_tx, forward) = ChannelSource::channel();
    let (back_tx, backward) = ChannelSource::channel();

    let log = Arc::new(Mutex::new(Vec::new()));
    let runtime = Runtime::builder(TwoFeeds { forward, backward })
        .observe(recorder::<TwoFeeds>(Arc::clone(&log)))
        .build();
    let (runtime, loop_task) = start(runtime);
    let handle = runtime.handle();

    wait_until(|| {
        handle.is_subscribed(&SubscriptionId::from("forward"))
            && handle.is_subscribed(&SubscriptionId::from("backward"))
    })
    .await;

    // Alternate one event per source, waiting each out so the realized
    // queue order is deterministic.
    fwd_tx.send(CounterMsg::Increment).unwrap();
    wait_model(&runtime, |m| *m == 1).await;
    back_tx.send(CounterMsg::Decrement).unwrap();
    wait_model(&runtime, |m| *m == 0).await;
    fwd_tx.send(CounterMsg::Increment).unwrap();
    wait_model(&runtime, |m| *m == 1).await;
    back_tx.send(CounterMsg::Decrement).unwrap();
    wait_model(&runtime, |m| *m == 0).await;

    runtime.stop();
    loop_task.await.unwrap().unwrap();

    assert_eq!(*log.lock().unwrap(), vec![0, 1, 0, 1, 0]);
}

/// Source whose `next` parks the worker thread once entered, so it cannot
/// react to cancellation within a short grace.
struct BlockingSource {
    entered: Arc<AtomicBool>,
}

#[async_trait]
impl EventSource<CounterMsg> for BlockingSource {
    async fn next(&mut self) -> Option<CounterMsg> {
        self.entered.store(true, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(300));
        None
    }
}

/// Counter with one permanently desired blocking subscription.
struct Anchored {
    entered: Arc<AtomicBool>,
}

impl Program for Anchored {
    type Model = i64;
    type Message = CounterMsg;

    fn init(&self) -> (i64, Effect<CounterMsg>) {
        (0, Effect::none())
    }

    fn update(&self, model: &i64, message: CounterMsg) -> (i64, Effect<CounterMsg>) {
        match message {
            CounterMsg::Increment => (model + 1, Effect::none()),
            CounterMsg::Decrement => (model - 1, Effect::none()),
        }
    }

    fn subscriptions(&self, _model: &i64) -> Subscriptions<CounterMsg> {
        Subscriptions::new().with(
            "anchor",
            BlockingSource {
                entered: Arc::clone(&self.entered),
            },
        )
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn stuck_forwarder_trips_the_shutdown_grace() {
    let entered = Arc::new(AtomicBool::new(false));
    let runtime = Runtime::builder(Anchored {
        entered: Arc::clone(&entered),
    })
    .with_config(Config {
        grace: Duration::from_millis(50),
    })
    .build();
    let (runtime, loop_task) = start(runtime);

    // Stop only once the forwarder is parked inside `next`; from there it
    // cannot observe cancellation until well past the grace.
    wait_until(|| entered.load(Ordering::SeqCst)).await;
    runtime.stop();

    match loop_task.await.unwrap() {
        Err(RuntimeError::GraceExceeded { grace, stuck }) => {
            assert_eq!(grace, Duration::from_millis(50));
            assert_eq!(stuck, vec![SubscriptionId::from("anchor")]);
        }
        other => panic!("expected a grace overrun, got {other:?}"),
    }
}
