use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    Tick { generation: u64, question: usize },
}

/// Per-question countdown. Each `start` cancels the previous timer thread and
/// spawns a fresh one tagged with a new generation, so ticks from an earlier
/// question can be recognised and dropped.
pub struct Countdown {
    tx: mpsc::Sender<TimerEvent>,
    interval: Duration,
    generation: u64,
    question: Option<usize>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Countdown {
    pub fn new(interval: Duration) -> (Self, mpsc::Receiver<TimerEvent>) {
        let (tx, rx) = mpsc::channel();
        let countdown = Self {
            tx,
            interval,
            generation: 0,
            question: None,
            cancel: None,
        };
        (countdown, rx)
    }

    pub fn every_second() -> (Self, mpsc::Receiver<TimerEvent>) {
        Self::new(Duration::from_secs(1))
    }

    pub fn start(&mut self, question: usize) {
        self.cancel();
        self.generation += 1;
        self.question = Some(question);

        let cancel = Arc::new(AtomicBool::new(false));
        self.cancel = Some(Arc::clone(&cancel));
        spawn_ticker(
            self.tx.clone(),
            self.interval,
            cancel,
            self.generation,
            question,
        );
        debug!("countdown started for question {} (generation {})", question + 1, self.generation);
    }

    pub fn cancel(&mut self) {
        if let Some(flag) = self.cancel.take() {
            flag.store(true, Ordering::SeqCst);
        }
        self.question = None;
    }

    pub fn is_running(&self) -> bool {
        self.cancel.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn question(&self) -> Option<usize> {
        self.question
    }

    /// Whether a tick belongs to the timer currently running for `current_question`.
    pub fn accepts(&self, event: &TimerEvent, current_question: usize) -> bool {
        match event {
            TimerEvent::Tick {
                generation,
                question,
            } => {
                self.is_running()
                    && *generation == self.generation
                    && self.question == Some(*question)
                    && *question == current_question
            }
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn spawn_ticker(
    tx: mpsc::Sender<TimerEvent>,
    interval: Duration,
    cancel: Arc<AtomicBool>,
    generation: u64,
    question: usize,
) {
    thread::spawn(move || loop {
        thread::sleep(interval);

        if cancel.load(Ordering::SeqCst) {
            break;
        }

        if tx
            .send(TimerEvent::Tick {
                generation,
                question,
            })
            .is_err()
        {
            break;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_only_current_generation() {
        let (mut countdown, _rx) = Countdown::new(Duration::from_secs(3600));
        countdown.start(0);
        let old = TimerEvent::Tick {
            generation: countdown.generation(),
            question: 0,
        };
        assert!(countdown.accepts(&old, 0));

        countdown.start(1);
        assert!(!countdown.accepts(&old, 1));
        let fresh = TimerEvent::Tick {
            generation: countdown.generation(),
            question: 1,
        };
        assert!(countdown.accepts(&fresh, 1));
        assert!(!countdown.accepts(&fresh, 0));
    }

    #[test]
    fn test_cancel_rejects_everything() {
        let (mut countdown, _rx) = Countdown::new(Duration::from_secs(3600));
        countdown.start(0);
        let tick = TimerEvent::Tick {
            generation: countdown.generation(),
            question: 0,
        };
        countdown.cancel();
        assert!(!countdown.is_running());
        assert!(!countdown.accepts(&tick, 0));
    }

    #[test]
    fn test_ticks_arrive_and_stop_after_cancel() {
        let (mut countdown, rx) = Countdown::new(Duration::from_millis(10));
        countdown.start(0);
        let ev = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(countdown.accepts(&ev, 0));

        countdown.cancel();
        // Drain anything sent before the flag was observed.
        thread::sleep(Duration::from_millis(50));
        while rx.try_recv().is_ok() {}
        thread::sleep(Duration::from_millis(50));
        assert!(rx.try_recv().is_err());
    }
}
