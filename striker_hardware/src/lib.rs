//! Simulated pitch backends for the `striker_traits` device seams.
//!
//! Everything here is single-threaded: the simulation owns all devices on
//! one thread, so shared handles are `Rc`-based. Scenario code
//! keeps a handle to each device it wants to script and mutates it between
//! steps; the engine only ever sees the trait object side.

pub mod error;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use striker_traits::{Compass, DistanceSensor, Emitter, Gps, IrReceiver, Motor, Receiver, Runtime};

use crate::error::HwError;

type DynError = Box<dyn std::error::Error + Send + Sync>;

/// One radio channel: a shared packet queue with an emitter end and a
/// receiver end. Clone the link to keep a scripting handle.
#[derive(Clone, Default)]
pub struct RadioLink {
    queue: Rc<RefCell<VecDeque<Vec<u8>>>>,
}

impl RadioLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a packet as if a peer had transmitted it.
    pub fn push(&self, bytes: Vec<u8>) {
        self.queue.borrow_mut().push_back(bytes);
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    pub fn emitter(&self, name: &'static str) -> SimulatedEmitter {
        SimulatedEmitter {
            name,
            queue: self.queue.clone(),
        }
    }

    pub fn receiver(&self, name: &'static str) -> SimulatedReceiver {
        SimulatedReceiver {
            name,
            queue: self.queue.clone(),
        }
    }
}

/// Receiving end of a [`RadioLink`].
pub struct SimulatedReceiver {
    name: &'static str,
    queue: Rc<RefCell<VecDeque<Vec<u8>>>>,
}

impl Receiver for SimulatedReceiver {
    fn queue_len(&self) -> usize {
        self.queue.borrow().len()
    }

    fn read(&mut self) -> Result<Vec<u8>, DynError> {
        match self.queue.borrow_mut().pop_front() {
            Some(bytes) => Ok(bytes),
            None => Err(Box::new(HwError::QueueEmpty(self.name))),
        }
    }
}

/// Transmitting end of a [`RadioLink`].
pub struct SimulatedEmitter {
    name: &'static str,
    queue: Rc<RefCell<VecDeque<Vec<u8>>>>,
}

impl Emitter for SimulatedEmitter {
    fn send(&mut self, payload: &[u8]) -> Result<(), DynError> {
        tracing::trace!(emitter = self.name, bytes = payload.len(), "packet sent");
        self.queue.borrow_mut().push_back(payload.to_vec());
        Ok(())
    }
}

/// The infra-red ball channel: queued direction/strength readings.
#[derive(Clone, Default)]
pub struct IrLink {
    queue: Rc<RefCell<VecDeque<([f64; 3], f64)>>>,
}

impl IrLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one ball sighting for the next read.
    pub fn push(&self, direction: [f64; 3], strength: f64) {
        self.queue.borrow_mut().push_back((direction, strength));
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    pub fn receiver(&self, name: &'static str) -> SimulatedIrReceiver {
        SimulatedIrReceiver {
            name,
            queue: self.queue.clone(),
        }
    }
}

/// Receiving end of an [`IrLink`].
pub struct SimulatedIrReceiver {
    name: &'static str,
    queue: Rc<RefCell<VecDeque<([f64; 3], f64)>>>,
}

impl IrReceiver for SimulatedIrReceiver {
    fn queue_len(&self) -> usize {
        self.queue.borrow().len()
    }

    fn read(&mut self) -> Result<([f64; 3], f64), DynError> {
        match self.queue.borrow_mut().pop_front() {
            Some(reading) => Ok(reading),
            None => Err(Box::new(HwError::QueueEmpty(self.name))),
        }
    }
}

/// Scripting handle for a 3-axis sensor value.
#[derive(Clone, Default)]
pub struct VectorHandle(Rc<Cell<[f64; 3]>>);

impl VectorHandle {
    pub fn set(&self, v: [f64; 3]) {
        self.0.set(v);
    }

    pub fn get(&self) -> [f64; 3] {
        self.0.get()
    }
}

/// Simulated GPS returning whatever fix the scenario last scripted.
pub struct SimulatedGps {
    fix: VectorHandle,
}

impl SimulatedGps {
    pub fn new(initial: [f64; 3]) -> (Self, VectorHandle) {
        let fix = VectorHandle::default();
        fix.set(initial);
        (Self { fix: fix.clone() }, fix)
    }
}

impl Gps for SimulatedGps {
    fn position(&mut self) -> Result<[f64; 3], DynError> {
        Ok(self.fix.get())
    }
}

/// Simulated compass returning a scripted north vector.
pub struct SimulatedCompass {
    north: VectorHandle,
}

impl SimulatedCompass {
    pub fn new(initial: [f64; 3]) -> (Self, VectorHandle) {
        let north = VectorHandle::default();
        north.set(initial);
        (Self { north: north.clone() }, north)
    }
}

impl Compass for SimulatedCompass {
    fn north(&mut self) -> Result<[f64; 3], DynError> {
        Ok(self.north.get())
    }
}

/// Scripting handle for a scalar sensor value.
#[derive(Clone, Default)]
pub struct ScalarHandle(Rc<Cell<f64>>);

impl ScalarHandle {
    pub fn set(&self, v: f64) {
        self.0.set(v);
    }

    pub fn get(&self) -> f64 {
        self.0.get()
    }
}

/// Simulated sonar transducer returning a scripted range.
pub struct SimulatedSonar {
    range: ScalarHandle,
}

impl SimulatedSonar {
    pub fn new(initial: f64) -> (Self, ScalarHandle) {
        let range = ScalarHandle::default();
        range.set(initial);
        (Self { range: range.clone() }, range)
    }
}

impl DistanceSensor for SimulatedSonar {
    fn distance(&mut self) -> Result<f64, DynError> {
        Ok(self.range.get())
    }
}

/// Simulated wheel motor; the handle reads back the last commanded
/// velocity so scenarios can integrate motion.
pub struct SimulatedMotor {
    name: &'static str,
    velocity: ScalarHandle,
}

impl SimulatedMotor {
    pub fn new(name: &'static str) -> (Self, ScalarHandle) {
        let velocity = ScalarHandle::default();
        (
            Self {
                name,
                velocity: velocity.clone(),
            },
            velocity,
        )
    }
}

impl Motor for SimulatedMotor {
    fn set_velocity(&mut self, rad_per_s: f64) -> Result<(), DynError> {
        tracing::trace!(motor = self.name, rad_per_s, "velocity set");
        self.velocity.set(rad_per_s);
        Ok(())
    }
}

/// Simulated match runtime: advances a virtual clock for a fixed duration,
/// invoking an optional per-step script with the elapsed time before each
/// step.
pub struct SimulatedPitch {
    elapsed_ms: u64,
    duration_ms: u64,
    script: Option<Box<dyn FnMut(u64)>>,
}

impl SimulatedPitch {
    pub fn with_duration_ms(duration_ms: u64) -> Self {
        Self {
            elapsed_ms: 0,
            duration_ms,
            script: None,
        }
    }

    pub fn with_script(duration_ms: u64, script: impl FnMut(u64) + 'static) -> Self {
        Self {
            elapsed_ms: 0,
            duration_ms,
            script: Some(Box::new(script)),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }
}

impl Runtime for SimulatedPitch {
    fn step(&mut self, step_ms: u32) -> Result<bool, DynError> {
        if self.elapsed_ms >= self.duration_ms {
            return Ok(false);
        }
        if let Some(script) = self.script.as_mut() {
            script(self.elapsed_ms);
        }
        self.elapsed_ms += u64::from(step_ms);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radio_link_delivers_in_order() {
        let link = RadioLink::new();
        let mut tx = link.emitter("team emitter");
        let mut rx = link.receiver("team receiver");

        tx.send(&[1, 2]).unwrap();
        tx.send(&[3]).unwrap();
        assert_eq!(rx.queue_len(), 2);
        assert_eq!(rx.read().unwrap(), vec![1, 2]);
        assert_eq!(rx.read().unwrap(), vec![3]);
        assert_eq!(rx.queue_len(), 0);
    }

    #[test]
    fn empty_queue_read_names_the_device() {
        let link = RadioLink::new();
        let mut rx = link.receiver("supervisor receiver");
        let err = rx.read().unwrap_err();
        assert!(err.to_string().contains("supervisor receiver"));
    }

    #[test]
    fn motor_handle_reads_back_last_velocity() {
        let (mut motor, velocity) = SimulatedMotor::new("left wheel");
        motor.set_velocity(-10.0).unwrap();
        motor.set_velocity(8.0).unwrap();
        assert_eq!(velocity.get(), 8.0);
    }
}
