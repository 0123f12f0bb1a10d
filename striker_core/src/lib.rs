#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core decision loop for a differential-drive soccer robot (hardware-agnostic).
//!
//! This crate provides the per-tick fusion-and-decision engine. All device
//! interactions go through the `striker_traits` seams, so the same engine
//! drives simulated and real backends.
//!
//! ## Architecture
//!
//! - **Wire records**: fixed-layout radio packets (`wire` module)
//! - **Channel readers**: non-blocking has-pending/read-one/drain-all
//!   (`channel` module)
//! - **Ball localization**: per-tick direction + strength estimate (`ball`)
//! - **Classification**: deadband lateral-offset classifier (`classify`)
//! - **Role arbitration**: team-topology role selection with pluggable
//!   policies (`role`)
//! - **Motion**: differential-drive primitives and the waypoint controller
//!   (`motion`)
//! - **Tick loop**: `StrikerCore::tick` fuses one step; `runner::run`
//!   drives it against a `Runtime`
//!
//! ## Tick contract
//!
//! A tick with no pending supervisor packet reads nothing and commands
//! nothing. An acting tick reads the channels under the per-channel policy
//! (supervisor and ball: at most one record; team: full drain), refreshes
//! the sensor state, classifies the ball direction, broadcasts its own
//! position to the team, and dispatches exactly one role policy. State
//! never survives a tick except as the baseline the next acting tick
//! overwrites.

// Module declarations
pub mod ball;
pub mod channel;
pub mod classify;
pub mod config;
pub mod conversions;
pub mod error;
pub mod hw_error;
pub mod motion;
pub mod role;
pub mod runner;
pub mod state;
pub mod util;
pub mod wire;

pub use ball::{BallEstimate, BallSignal};
pub use channel::{BallReader, ChannelReader};
pub use classify::{Direction, classify};
pub use config::{ControlCfg, RuntimeCfg};
pub use error::{BuildError, Result, StrikerError};
pub use motion::Drivetrain;
pub use role::{AttackPolicy, DefensePolicy, Policy, Role, RoleArbiter};
pub use state::{Identity, Point2, RobotState, SonarReadings, Team};
pub use wire::{BallRecord, Channel, SupervisorSignal, TeamPositionRecord, WireRecord};

use std::marker::PhantomData;

use eyre::WrapErr;

use crate::error::Report;
use crate::hw_error::map_hw_error;
use striker_traits::{Compass, DistanceSensor, Emitter, Gps, IrReceiver, Motor, Receiver};

/// The four sonar transducers as one rig, by mounting position.
pub struct SonarRig<D: DistanceSensor> {
    pub left: D,
    pub right: D,
    pub front: D,
    pub back: D,
}

impl<D: DistanceSensor> SonarRig<D> {
    fn read_all(&mut self) -> Result<SonarReadings> {
        Ok(SonarReadings {
            left: self
                .left
                .distance()
                .map_err(|e| Report::new(map_hw_error(&*e)))
                .wrap_err("left sonar read")?,
            right: self
                .right
                .distance()
                .map_err(|e| Report::new(map_hw_error(&*e)))
                .wrap_err("right sonar read")?,
            front: self
                .front
                .distance()
                .map_err(|e| Report::new(map_hw_error(&*e)))
                .wrap_err("front sonar read")?,
            back: self
                .back
                .distance()
                .map_err(|e| Report::new(map_hw_error(&*e)))
                .wrap_err("back sonar read")?,
        })
    }
}

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// No supervisor packet was pending: nothing was read or commanded.
    Idle,
    /// The full fusion pass ran and a role policy was dispatched.
    Acted(TickSummary),
}

/// Observability data from one acting tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    pub waiting_for_kickoff: bool,
    pub role: Role,
    pub direction: Direction,
    pub teammates_seen: usize,
}

/// Unified engine for both dynamic (boxed) and generic (static dispatch)
/// variants.
pub struct StrikerCore<R, B, E, G, C, D, M>
where
    R: Receiver,
    B: IrReceiver,
    E: Emitter,
    G: Gps,
    C: Compass,
    D: DistanceSensor,
    M: Motor,
{
    state: RobotState,
    control: ControlCfg,
    runtime: RuntimeCfg,
    supervisor: ChannelReader<R, SupervisorSignal>,
    team_rx: ChannelReader<R, TeamPositionRecord>,
    team_tx: E,
    ball: BallReader<B>,
    gps: G,
    compass: C,
    sonar: SonarRig<D>,
    drive: Drivetrain<M>,
    arbiter: RoleArbiter,
    attack: AttackPolicy,
    defense: DefensePolicy,
}

impl<R, B, E, G, C, D, M> core::fmt::Debug for StrikerCore<R, B, E, G, C, D, M>
where
    R: Receiver,
    B: IrReceiver,
    E: Emitter,
    G: Gps,
    C: Compass,
    D: DistanceSensor,
    M: Motor,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StrikerCore")
            .field("robot", &self.state.identity.name())
            .field("direction", &self.state.direction)
            .field("ball_detected", &self.state.ball_direction.is_some())
            .finish()
    }
}

fn validate_cfg(control: &ControlCfg, runtime: &RuntimeCfg) -> Result<()> {
    if !control.deadband.is_finite() || control.deadband <= 0.0 {
        return Err(Report::new(BuildError::InvalidConfig(
            "deadband must be > 0",
        )));
    }
    if control.deadband >= 1.0 {
        return Err(Report::new(BuildError::InvalidConfig(
            "deadband must be < 1.0",
        )));
    }
    if !control.cruise_speed.is_finite() || control.cruise_speed <= 0.0 {
        return Err(Report::new(BuildError::InvalidConfig(
            "cruise_speed must be > 0",
        )));
    }
    if !control.turn_gain.is_finite() || control.turn_gain <= 0.0 {
        return Err(Report::new(BuildError::InvalidConfig(
            "turn_gain must be > 0",
        )));
    }
    if !control.pivot_speed.is_finite() || control.pivot_speed <= 0.0 {
        return Err(Report::new(BuildError::InvalidConfig(
            "pivot_speed must be > 0",
        )));
    }
    if !control.heading_tolerance_deg.is_finite()
        || control.heading_tolerance_deg <= 0.0
        || control.heading_tolerance_deg >= 180.0
    {
        return Err(Report::new(BuildError::InvalidConfig(
            "heading_tolerance_deg must be in (0, 180)",
        )));
    }
    if runtime.time_step_ms == 0 {
        return Err(Report::new(BuildError::InvalidConfig(
            "time_step_ms must be >= 1",
        )));
    }
    Ok(())
}

impl<R, B, E, G, C, D, M> StrikerCore<R, B, E, G, C, D, M>
where
    R: Receiver,
    B: IrReceiver,
    E: Emitter,
    G: Gps,
    C: Compass,
    D: DistanceSensor,
    M: Motor,
{
    /// Assemble an engine from already-typed devices, validating the
    /// configuration.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        identity: Identity,
        supervisor: R,
        team_rx: R,
        team_tx: E,
        ball: B,
        gps: G,
        compass: C,
        sonar: SonarRig<D>,
        left_motor: M,
        right_motor: M,
        control: ControlCfg,
        runtime: RuntimeCfg,
    ) -> Result<Self> {
        validate_cfg(&control, &runtime)?;
        Ok(Self {
            state: RobotState::new(identity),
            control,
            runtime,
            supervisor: ChannelReader::new(supervisor),
            team_rx: ChannelReader::new(team_rx),
            team_tx,
            ball: BallReader::new(ball),
            gps,
            compass,
            sonar,
            drive: Drivetrain::new(left_motor, right_motor, control),
            arbiter: RoleArbiter,
            attack: AttackPolicy,
            defense: DefensePolicy,
        })
    }

    /// The fused state as of the last acting tick.
    pub fn state(&self) -> &RobotState {
        &self.state
    }

    pub fn identity(&self) -> Identity {
        self.state.identity
    }

    /// Step duration the surrounding runtime should be advanced by.
    pub fn time_step_ms(&self) -> u32 {
        self.runtime.time_step_ms
    }

    /// One full fusion-and-decision pass.
    ///
    /// The whole acting path is gated on the supervisor channel: with no
    /// supervisor packet pending, nothing at all is read or written this
    /// tick. Channel and sensor faults propagate after logging; absence of
    /// data never does.
    pub fn tick(&mut self) -> Result<TickStatus> {
        let Some(signal) = self.supervisor.read_next()? else {
            tracing::trace!("no supervisor data; idle tick");
            return Ok(TickStatus::Idle);
        };

        let teammates = self.team_rx.drain_all()?;
        let ball_reading = self.ball.read_next()?;
        self.state.apply_ball(BallEstimate::from_reading(ball_reading));

        let north = self
            .compass
            .north()
            .map_err(|e| Report::new(map_hw_error(&*e)))
            .wrap_err("compass read")?;
        self.state.heading = util::heading_from_north(north);

        let fix = self
            .gps
            .position()
            .map_err(|e| Report::new(map_hw_error(&*e)))
            .wrap_err("gps read")?;
        let position = Point2 {
            x: fix[0],
            y: fix[1],
        };
        self.state.position = Some(position);
        self.state.sonar = self.sonar.read_all()?;

        self.state.direction = match self.state.ball_direction {
            Some(v) => classify(v[1], self.control.deadband),
            None => Direction::Forward,
        };
        tracing::trace!(
            direction = ?self.state.direction,
            ball_detected = self.state.ball_direction.is_some(),
            heading = self.state.heading,
            "state fused"
        );

        self.broadcast_position(position)?;

        let role = self
            .arbiter
            .select(self.state.identity.team, position.y, &teammates);
        match role {
            Role::Attack => self.attack.act(&self.state, &mut self.drive)?,
            Role::Defense => self.defense.act(&self.state, &mut self.drive)?,
        }

        if signal.waiting_for_kickoff {
            tracing::debug!("supervisor reports kickoff wait");
        }
        Ok(TickStatus::Acted(TickSummary {
            waiting_for_kickoff: signal.waiting_for_kickoff,
            role,
            direction: self.state.direction,
            teammates_seen: teammates.len(),
        }))
    }

    /// Broadcast our own position record on the team channel.
    fn broadcast_position(&mut self, position: Point2) -> Result<()> {
        let record = TeamPositionRecord {
            player_id: i32::from(self.state.identity.player_id),
            x: position.x as f32,
            y: position.y as f32,
        };
        self.team_tx
            .send(&record.encode())
            .map_err(|e| Report::new(map_hw_error(&*e)))
            .wrap_err("team broadcast")
    }
}

type DynReceiver = Box<dyn Receiver>;
type DynIrReceiver = Box<dyn IrReceiver>;
type DynEmitter = Box<dyn Emitter>;
type DynGps = Box<dyn Gps>;
type DynCompass = Box<dyn Compass>;
type DynDistanceSensor = Box<dyn DistanceSensor>;
type DynMotor = Box<dyn Motor>;

/// Boxed sonar rig for the dynamic-dispatch wrapper.
pub type SonarArray = SonarRig<DynDistanceSensor>;

/// The radio transceivers of one robot, boxed for the builder.
pub struct RadioSet {
    pub supervisor: DynReceiver,
    pub team_rx: DynReceiver,
    pub team_tx: DynEmitter,
    pub ball: DynIrReceiver,
}

/// The non-radio sensors of one robot, boxed for the builder.
pub struct SensorSet {
    pub gps: DynGps,
    pub compass: DynCompass,
    pub sonar: SonarArray,
}

/// Public dynamic (boxed) robot that preserves the ergonomic API via
/// composition.
pub struct Striker {
    inner: StrikerCore<DynReceiver, DynIrReceiver, DynEmitter, DynGps, DynCompass, DynDistanceSensor, DynMotor>,
}

impl core::fmt::Debug for Striker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Striker")
            .field("robot", &self.inner.state().identity.name())
            .field("direction", &self.inner.state().direction)
            .finish()
    }
}

impl Striker {
    /// Start building a Striker.
    pub fn builder() -> StrikerBuilder<Missing, Missing, Missing, Missing> {
        StrikerBuilder::default()
    }

    /// One full fusion-and-decision pass. See [`StrikerCore::tick`].
    pub fn tick(&mut self) -> Result<TickStatus> {
        self.inner.tick()
    }

    /// The fused state as of the last acting tick.
    pub fn state(&self) -> &RobotState {
        self.inner.state()
    }

    pub fn identity(&self) -> Identity {
        self.inner.identity()
    }

    pub fn time_step_ms(&self) -> u32 {
        self.inner.time_step_ms()
    }

    /// Drive the loop against a runtime until it terminates. See
    /// [`runner::run`].
    pub fn run<RT: striker_traits::Runtime>(
        &mut self,
        runtime: &mut RT,
        opts: runner::RunOptions,
        shutdown: Option<&std::sync::atomic::AtomicBool>,
    ) -> Result<runner::RunReport> {
        runner::run(runtime, &mut self.inner, opts, shutdown)
    }
}

// Type-state markers for the builder
pub struct Missing;
pub struct Set;

/// Builder for `Striker`. Devices arrive in grouped seats; everything is
/// validated on `build()`.
pub struct StrikerBuilder<R, S, D, I> {
    radios: Option<RadioSet>,
    sensors: Option<SensorSet>,
    motors: Option<(DynMotor, DynMotor)>,
    identity: Option<Identity>,
    control: Option<ControlCfg>,
    runtime: Option<RuntimeCfg>,
    // Type-state markers
    _r: PhantomData<R>,
    _s: PhantomData<S>,
    _d: PhantomData<D>,
    _i: PhantomData<I>,
}

impl Default for StrikerBuilder<Missing, Missing, Missing, Missing> {
    fn default() -> Self {
        Self {
            radios: None,
            sensors: None,
            motors: None,
            identity: None,
            control: None,
            runtime: None,
            _r: PhantomData,
            _s: PhantomData,
            _d: PhantomData,
            _i: PhantomData,
        }
    }
}

impl<R, S, D, I> StrikerBuilder<R, S, D, I> {
    /// Fallible build available in any type-state; returns a detailed
    /// `BuildError` for missing pieces.
    pub fn try_build(self) -> Result<Striker> {
        let StrikerBuilder {
            radios,
            sensors,
            motors,
            identity,
            control,
            runtime,
            _r: _,
            _s: _,
            _d: _,
            _i: _,
        } = self;

        let radios = radios.ok_or_else(|| Report::new(BuildError::MissingRadios))?;
        let sensors = sensors.ok_or_else(|| Report::new(BuildError::MissingSensors))?;
        let (left, right) = motors.ok_or_else(|| Report::new(BuildError::MissingDrivetrain))?;
        let identity = identity.ok_or_else(|| Report::new(BuildError::MissingIdentity))?;

        let control = control.unwrap_or_default();
        let runtime = runtime.unwrap_or_default();

        let inner = StrikerCore::new(
            identity,
            radios.supervisor,
            radios.team_rx,
            radios.team_tx,
            radios.ball,
            sensors.gps,
            sensors.compass,
            sensors.sonar,
            left,
            right,
            control,
            runtime,
        )?;
        Ok(Striker { inner })
    }

    /// Override the motion/classification constants (defaults otherwise).
    pub fn with_control(mut self, control: ControlCfg) -> Self {
        self.control = Some(control);
        self
    }

    /// Override the simulation pacing constants (defaults otherwise).
    pub fn with_runtime(mut self, runtime: RuntimeCfg) -> Self {
        self.runtime = Some(runtime);
        self
    }
}

impl<S, D, I> StrikerBuilder<Missing, S, D, I> {
    pub fn with_radios(self, radios: RadioSet) -> StrikerBuilder<Set, S, D, I> {
        StrikerBuilder {
            radios: Some(radios),
            sensors: self.sensors,
            motors: self.motors,
            identity: self.identity,
            control: self.control,
            runtime: self.runtime,
            _r: PhantomData,
            _s: PhantomData,
            _d: PhantomData,
            _i: PhantomData,
        }
    }
}

impl<R, D, I> StrikerBuilder<R, Missing, D, I> {
    pub fn with_sensors(self, sensors: SensorSet) -> StrikerBuilder<R, Set, D, I> {
        StrikerBuilder {
            radios: self.radios,
            sensors: Some(sensors),
            motors: self.motors,
            identity: self.identity,
            control: self.control,
            runtime: self.runtime,
            _r: PhantomData,
            _s: PhantomData,
            _d: PhantomData,
            _i: PhantomData,
        }
    }
}

impl<R, S, I> StrikerBuilder<R, S, Missing, I> {
    pub fn with_drivetrain(
        self,
        left: impl Motor + 'static,
        right: impl Motor + 'static,
    ) -> StrikerBuilder<R, S, Set, I> {
        StrikerBuilder {
            radios: self.radios,
            sensors: self.sensors,
            motors: Some((Box::new(left), Box::new(right))),
            identity: self.identity,
            control: self.control,
            runtime: self.runtime,
            _r: PhantomData,
            _s: PhantomData,
            _d: PhantomData,
            _i: PhantomData,
        }
    }
}

impl<R, S, D> StrikerBuilder<R, S, D, Missing> {
    pub fn with_identity(self, identity: Identity) -> StrikerBuilder<R, S, D, Set> {
        StrikerBuilder {
            radios: self.radios,
            sensors: self.sensors,
            motors: self.motors,
            identity: Some(identity),
            control: self.control,
            runtime: self.runtime,
            _r: PhantomData,
            _s: PhantomData,
            _d: PhantomData,
            _i: PhantomData,
        }
    }
}

impl StrikerBuilder<Set, Set, Set, Set> {
    /// Build once every seat is filled; only config validation can fail.
    pub fn build(self) -> Result<Striker> {
        self.try_build()
    }
}
