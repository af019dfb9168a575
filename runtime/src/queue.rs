use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

/// Something a collaborator asks the render loop to do.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Signal {
    /// Raw pointer press in surface pixels.
    Press { x: f32, y: f32 },
    /// Throw the round away and start a new one.
    Reset,
    /// Only wakes the consumer, carries no work.
    Wake,
}

/// A signal together with its submission number.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Queued {
    seq: u64,
    signal: Signal,
}

impl Queued {
    pub const fn signal(&self) -> Signal {
        self.signal
    }
}

/// Creates the producer and consumer ends of a new input queue.
pub fn channel() -> (InputHandle, InputQueue) {
    let (sender, receiver) = mpsc::channel();
    let next_seq = Arc::new(AtomicU64::new(0));
    let handle = InputHandle {
        sender,
        next_seq: Arc::clone(&next_seq),
    };
    let queue = InputQueue {
        receiver,
        next_seq,
        early: None,
        parked: VecDeque::new(),
    };
    (handle, queue)
}

/// Producer end, cheap to clone and usable from any thread. Submitting never
/// blocks.
#[derive(Clone, Debug)]
pub struct InputHandle {
    sender: Sender<Queued>,
    next_seq: Arc<AtomicU64>,
}

impl InputHandle {
    pub fn submit_pointer_press(&self, x: f32, y: f32) {
        self.send(Signal::Press { x, y });
    }

    pub fn request_reset(&self) {
        self.send(Signal::Reset);
    }

    pub(crate) fn wake(&self) {
        self.send(Signal::Wake);
    }

    fn send(&self, signal: Signal) {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        if self.sender.send(Queued { seq, signal }).is_err() {
            log::trace!("Input queue closed, dropped {:?}", signal);
        }
    }
}

/// Consumer end, owned by the render loop.
///
/// Each [`drain`](Self::drain) hands out exactly what was submitted before it
/// started, in submission order. Anything submitted later waits for the next
/// drain even if it is already in the channel.
#[derive(Debug)]
pub struct InputQueue {
    receiver: Receiver<Queued>,
    next_seq: Arc<AtomicU64>,
    /// Received while draining but submitted past the cutoff.
    early: Option<Queued>,
    /// Handed out before and put back by the consumer.
    parked: VecDeque<Queued>,
}

impl InputQueue {
    pub fn drain(&mut self) -> Vec<Queued> {
        let cutoff = self.cutoff();
        self.drain_until(cutoff)
    }

    /// Sequence number of the next submission. Signals below it were
    /// submitted before this call.
    pub fn cutoff(&self) -> u64 {
        self.next_seq.load(Ordering::SeqCst)
    }

    /// Like [`drain`](Self::drain) with a cutoff taken earlier.
    pub fn drain_until(&mut self, cutoff: u64) -> Vec<Queued> {
        let mut drained: Vec<_> = self.parked.drain(..).collect();

        if let Some(queued) = self.early.take() {
            if queued.seq >= cutoff {
                self.early = Some(queued);
                return drained;
            }
            drained.push(queued);
        }

        while let Ok(queued) = self.receiver.try_recv() {
            if queued.seq >= cutoff {
                self.early = Some(queued);
                break;
            }
            drained.push(queued);
        }
        drained
    }

    /// Puts signals back in front of the queue, they come out first on the
    /// next drain. Parked signals do not wake [`wait`](Self::wait).
    pub fn requeue(&mut self, signals: impl IntoIterator<Item = Queued>) {
        let mut signals: VecDeque<_> = signals.into_iter().collect();
        signals.append(&mut self.parked);
        self.parked = signals;
    }

    /// Discards everything submitted so far.
    pub fn clear(&mut self) {
        let cutoff = self.cutoff();
        self.clear_until(cutoff);
    }

    /// Discards everything submitted before `cutoff`.
    pub fn clear_until(&mut self, cutoff: u64) {
        let dropped = self.drain_until(cutoff).len();
        if dropped > 0 {
            log::trace!("Discarded {} queued signals", dropped);
        }
    }

    pub fn parked_len(&self) -> usize {
        self.parked.len()
    }

    /// Blocks until a new signal arrives or `timeout` passes, forever when
    /// `timeout` is `None`. Returns whether a signal is ready.
    pub fn wait(&mut self, timeout: Option<Duration>) -> bool {
        if self.early.is_some() {
            return true;
        }

        let received = match timeout {
            Some(timeout) => self.receiver.recv_timeout(timeout),
            None => self
                .receiver
                .recv()
                .map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(queued) => {
                self.early = Some(queued);
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                log::warn!("All input handles dropped");
                false
            }
        }
    }
}
