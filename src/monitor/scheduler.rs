//! Recurring trigger for fetch cycles

use std::future::Future;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::{debug, error, info};

/// Source of scheduler ticks
///
/// The scheduler drops a pending `tick()` future whenever another event wins
/// the race, so `tick` must be cancel safe: a dropped call must not consume a
/// tick.
#[async_trait::async_trait]
pub trait Ticker: Send + 'static {
    /// Completes when the next cycle is due
    async fn tick(&mut self);
}

/// Ticks at a fixed period, starting one period from now
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    /// # Panics
    /// Panics if `period` is zero.
    pub fn new(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

#[async_trait::async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

/// Ticks once per message sent on the paired sender
///
/// Never ticks again once every sender is dropped.
pub struct ChannelTicker {
    rx: mpsc::UnboundedReceiver<()>,
}

impl ChannelTicker {
    pub fn new() -> (mpsc::UnboundedSender<()>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }
}

#[async_trait::async_trait]
impl Ticker for ChannelTicker {
    async fn tick(&mut self) {
        if self.rx.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }
}

/// Runs a cycle immediately and then on every tick of its ticker
pub struct Scheduler<T: Ticker> {
    ticker: T,
}

impl<T: Ticker> Scheduler<T> {
    pub fn new(ticker: T) -> Self {
        Self { ticker }
    }

    /// Start the scheduler loop in a background task
    ///
    /// Every cycle is spawned as its own task, so a slow cycle does not delay
    /// the next tick and cycles may overlap. Dropping the returned handle
    /// without calling [`SchedulerHandle::stop`] leaves the scheduler running
    /// for the rest of the process.
    pub fn start<F, Fut>(self, cycle: F) -> SchedulerHandle
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (stop_tx, mut stop_rx) = oneshot::channel();
        let mut ticker = self.ticker;

        let task = tokio::spawn(async move {
            info!("Scheduler started");
            let mut cycles = JoinSet::new();
            let mut detached = false;

            cycles.spawn(cycle());

            loop {
                tokio::select! {
                    stop = &mut stop_rx, if !detached => match stop {
                        Ok(()) => break,
                        Err(_) => {
                            debug!("Scheduler handle dropped, running until process exit");
                            detached = true;
                        }
                    },
                    _ = ticker.tick() => {
                        debug!("Scheduler tick, {} cycles in flight", cycles.len());
                        cycles.spawn(cycle());
                    }
                    Some(result) = cycles.join_next(), if !cycles.is_empty() => {
                        if let Err(e) = result {
                            error!("Fetch cycle task failed: {}", e);
                        }
                    }
                }
            }

            cycles.shutdown().await;
            info!("Scheduler stopped");
        });

        SchedulerHandle { stop_tx, task }
    }
}

/// Handle to a running scheduler
pub struct SchedulerHandle {
    stop_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop ticking, abort in-flight cycles and wait for the loop to exit
    pub async fn stop(self) {
        let _ = self.stop_tx.send(());
        if let Err(e) = self.task.await {
            error!("Scheduler task failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Cycle function that reports its sequence number; cycles listed in
    /// `stall` never finish
    fn counting_cycle(
        stall: &'static [usize],
    ) -> (
        impl Fn() -> std::pin::Pin<Box<dyn Future<Output = ()> + Send>> + Send + 'static,
        mpsc::UnboundedReceiver<usize>,
    ) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (done_tx, done_rx) = mpsc::unbounded_channel();

        let cycle = move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            let done_tx = done_tx.clone();
            Box::pin(async move {
                if stall.contains(&n) {
                    std::future::pending::<()>().await;
                }
                let _ = done_tx.send(n);
            }) as std::pin::Pin<Box<dyn Future<Output = ()> + Send>>
        };

        (cycle, done_rx)
    }

    #[tokio::test]
    async fn start_runs_cycle_immediately_and_on_each_tick() {
        let (tick_tx, ticker) = ChannelTicker::new();
        let (cycle, mut done_rx) = counting_cycle(&[]);

        let handle = Scheduler::new(ticker).start(cycle);

        assert_eq!(done_rx.recv().await, Some(1));
        tick_tx.send(()).unwrap();
        assert_eq!(done_rx.recv().await, Some(2));
        tick_tx.send(()).unwrap();
        assert_eq!(done_rx.recv().await, Some(3));

        handle.stop().await;
    }

    #[tokio::test]
    async fn stop_ends_the_loop() {
        let (tick_tx, ticker) = ChannelTicker::new();
        let (cycle, mut done_rx) = counting_cycle(&[]);

        let handle = Scheduler::new(ticker).start(cycle);
        assert_eq!(done_rx.recv().await, Some(1));

        handle.stop().await;

        // The ticker was dropped with the loop, so no further tick can be delivered
        assert!(tick_tx.send(()).is_err());
        assert_eq!(done_rx.recv().await, None);
    }

    #[tokio::test]
    async fn stop_aborts_stalled_cycles() {
        let (_tick_tx, ticker) = ChannelTicker::new();
        let (cycle, mut done_rx) = counting_cycle(&[1]);

        let handle = Scheduler::new(ticker).start(cycle);
        handle.stop().await;

        assert_eq!(done_rx.recv().await, None);
    }

    #[tokio::test]
    async fn cycles_overlap_when_previous_cycle_is_still_running() {
        let (tick_tx, ticker) = ChannelTicker::new();
        let (cycle, mut done_rx) = counting_cycle(&[1]);

        let handle = Scheduler::new(ticker).start(cycle);
        tick_tx.send(()).unwrap();

        assert_eq!(done_rx.recv().await, Some(2));

        handle.stop().await;
    }

    #[tokio::test]
    async fn dropped_handle_keeps_scheduler_running() {
        let (tick_tx, ticker) = ChannelTicker::new();
        let (cycle, mut done_rx) = counting_cycle(&[]);

        drop(Scheduler::new(ticker).start(cycle));

        assert_eq!(done_rx.recv().await, Some(1));
        tick_tx.send(()).unwrap();
        assert_eq!(done_rx.recv().await, Some(2));
    }

    #[tokio::test]
    async fn ticks_are_not_lost_while_cycles_finish() {
        let (tick_tx, ticker) = ChannelTicker::new();
        let (cycle, mut done_rx) = counting_cycle(&[]);

        let handle = Scheduler::new(ticker).start(cycle);
        for _ in 0..3 {
            tick_tx.send(()).unwrap();
        }

        let mut done = Vec::new();
        for _ in 0..4 {
            done.push(done_rx.recv().await.unwrap());
        }
        done.sort();
        assert_eq!(done, vec![1, 2, 3, 4]);

        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn interval_ticker_runs_one_cycle_per_period() {
        let period = Duration::from_secs(3600);
        let (cycle, mut done_rx) = counting_cycle(&[]);

        let handle = Scheduler::new(IntervalTicker::new(period)).start(cycle);

        assert_eq!(done_rx.recv().await, Some(1));
        tokio::time::sleep(period - Duration::from_secs(1)).await;
        assert!(done_rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(done_rx.recv().await, Some(2));
        assert!(done_rx.try_recv().is_err());

        handle.stop().await;
    }
}
