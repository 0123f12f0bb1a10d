//! Non-blocking channel readers over the radio receiver seams.
//!
//! All three channels follow the same contract: check the queue depth,
//! consume at most what is pending, never block. An empty queue is the
//! normal "no new data this tick" outcome, not an error. The per-channel
//! draining policy lives in the tick loop: the supervisor and ball channels
//! take at most one record per tick, the team channel is drained fully.

use std::marker::PhantomData;

use eyre::WrapErr;

use crate::ball::BallSignal;
use crate::error::{Report, Result};
use crate::hw_error::map_hw_error;
use crate::wire::WireRecord;
use striker_traits::{IrReceiver, Receiver};

/// Typed reader over a byte-packet receiver.
pub struct ChannelReader<R: Receiver, T: WireRecord> {
    rx: R,
    _record: PhantomData<T>,
}

impl<R: Receiver, T: WireRecord> ChannelReader<R, T> {
    pub fn new(rx: R) -> Self {
        Self {
            rx,
            _record: PhantomData,
        }
    }

    /// Non-blocking queue-depth check.
    pub fn has_pending(&self) -> bool {
        self.rx.queue_len() > 0
    }

    /// Consume exactly one pending record and advance the channel.
    ///
    /// Callers check `has_pending` first; reading an empty queue surfaces
    /// the backend's error. A buffer that does not decode is fatal for the
    /// tick: it is logged here and propagated.
    pub fn read_one(&mut self) -> Result<T> {
        let bytes = self
            .rx
            .read()
            .map_err(|e| Report::new(map_hw_error(&*e)))
            .wrap_err_with(|| format!("{} channel read", T::CHANNEL))?;
        match T::decode(&bytes) {
            Ok(record) => Ok(record),
            Err(e) => {
                tracing::error!(channel = %T::CHANNEL, error = %e, "malformed packet");
                Err(Report::new(e))
            }
        }
    }

    /// At most one record this tick; backlog beyond the head stays queued.
    pub fn read_next(&mut self) -> Result<Option<T>> {
        if self.has_pending() {
            Ok(Some(self.read_one()?))
        } else {
            Ok(None)
        }
    }

    /// Drain everything pending, in arrival order.
    pub fn drain_all(&mut self) -> Result<Vec<T>> {
        let mut records = Vec::new();
        while self.has_pending() {
            records.push(self.read_one()?);
        }
        Ok(records)
    }
}

/// Reader over the infra-red ball receiver. Same queue contract as
/// `ChannelReader`, but the record arrives through the direction/strength
/// query instead of payload bytes.
pub struct BallReader<B: IrReceiver> {
    rx: B,
}

impl<B: IrReceiver> BallReader<B> {
    pub fn new(rx: B) -> Self {
        Self { rx }
    }

    pub fn has_pending(&self) -> bool {
        self.rx.queue_len() > 0
    }

    pub fn read_one(&mut self) -> Result<BallSignal> {
        let (direction, strength) = self
            .rx
            .read()
            .map_err(|e| Report::new(map_hw_error(&*e)))
            .wrap_err("ball channel read")?;
        Ok(BallSignal {
            direction,
            strength,
        })
    }

    /// At most one reading this tick; backlog stays queued.
    pub fn read_next(&mut self) -> Result<Option<BallSignal>> {
        if self.has_pending() {
            Ok(Some(self.read_one()?))
        } else {
            Ok(None)
        }
    }
}
