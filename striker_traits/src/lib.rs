pub mod sensors;

pub use sensors::{Compass, DistanceSensor, Gps};

type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Byte-packet radio receiver (supervisor and team channels).
///
/// Packets queue in arrival order; `read` consumes the head packet and
/// advances the queue. Reading never blocks: callers check `queue_len`
/// first, and an empty queue is a normal "no new data" condition.
pub trait Receiver {
    fn queue_len(&self) -> usize;
    fn read(&mut self) -> Result<Vec<u8>, DynError>;
}

/// Infra-red receiver (ball channel).
///
/// The platform exposes this channel through direction/strength queries
/// rather than raw payload bytes: `read` yields the emitter direction in
/// the robot's local frame plus the received signal strength, consuming
/// one queued reading.
pub trait IrReceiver {
    fn queue_len(&self) -> usize;
    fn read(&mut self) -> Result<([f64; 3], f64), DynError>;
}

pub trait Emitter {
    fn send(&mut self, payload: &[u8]) -> Result<(), DynError>;
}

/// Wheel motor in velocity-control mode (radians per second).
pub trait Motor {
    fn set_velocity(&mut self, rad_per_s: f64) -> Result<(), DynError>;
}

/// Step-advance seam to the surrounding simulation.
///
/// `step` blocks until the next tick boundary and returns `false` once the
/// simulation has terminated. It is the loop's only suspension point.
pub trait Runtime {
    fn step(&mut self, step_ms: u32) -> Result<bool, DynError>;
}

impl<T: Receiver + ?Sized> Receiver for Box<T> {
    fn queue_len(&self) -> usize {
        (**self).queue_len()
    }
    fn read(&mut self) -> Result<Vec<u8>, DynError> {
        (**self).read()
    }
}

impl<T: IrReceiver + ?Sized> IrReceiver for Box<T> {
    fn queue_len(&self) -> usize {
        (**self).queue_len()
    }
    fn read(&mut self) -> Result<([f64; 3], f64), DynError> {
        (**self).read()
    }
}

impl<T: Emitter + ?Sized> Emitter for Box<T> {
    fn send(&mut self, payload: &[u8]) -> Result<(), DynError> {
        (**self).send(payload)
    }
}

impl<T: Motor + ?Sized> Motor for Box<T> {
    fn set_velocity(&mut self, rad_per_s: f64) -> Result<(), DynError> {
        (**self).set_velocity(rad_per_s)
    }
}

impl<T: Runtime + ?Sized> Runtime for Box<T> {
    fn step(&mut self, step_ms: u32) -> Result<bool, DynError> {
        (**self).step(step_ms)
    }
}
