//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus is the **notification sink** between the catalog core and the
//! denormalized search index: after a state change the core publishes a
//! fire-and-forget signal and moves on. Delivery is at-least-once and the
//! index is rebuildable, so consumers must be idempotent.
//!
//! The contract is intentionally lightweight:
//!
//! - **Transport-agnostic**: works with in-memory channels, a broker, etc.
//! - **No acknowledgment**: the core never waits on consumers
//! - **No persistence**: the stores remain the source of truth; a lost
//!   signal means a stale index row until the next rebuild, nothing more

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A subscription to a published message stream.
///
/// Each subscription gets a copy of every message published after it was
/// created (broadcast semantics). Designed for single-threaded consumption;
/// the typical consumer is a projection loop on its own thread.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// `publish()` may fail (full buffer, transport error); callers treat the
/// signal as best-effort and must not let a publish failure roll back the
/// state change that triggered it.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
