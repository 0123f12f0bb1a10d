use std::collections::VecDeque;
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use striker_core::runner::RunOptions;
use striker_core::{
    Channel, Direction, Identity, Point2, RadioSet, Role, SensorSet, SonarRig, Striker,
    StrikerError, SupervisorSignal, TeamPositionRecord, TickStatus, TickSummary, WireRecord,
};
use striker_traits::{Compass, DistanceSensor, Emitter, Gps, IrReceiver, Motor, Receiver, Runtime};

/// Byte-packet receiver over a shared queue, so tests can feed packets
/// between ticks.
#[derive(Default, Clone)]
struct SharedReceiver {
    queue: Arc<Mutex<VecDeque<Vec<u8>>>>,
}
impl SharedReceiver {
    fn push(&self, bytes: Vec<u8>) {
        self.queue.lock().unwrap().push_back(bytes);
    }
    fn len(&self) -> usize {
        self.queue.lock().unwrap().len()
    }
}
impl Receiver for SharedReceiver {
    fn queue_len(&self) -> usize {
        self.queue.lock().unwrap().len()
    }
    fn read(&mut self) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
        match self.queue.lock().unwrap().pop_front() {
            Some(bytes) => Ok(bytes),
            None => Err("queue empty".into()),
        }
    }
}

#[derive(Default, Clone)]
struct SharedIr {
    queue: Arc<Mutex<VecDeque<([f64; 3], f64)>>>,
}
impl SharedIr {
    fn push(&self, direction: [f64; 3], strength: f64) {
        self.queue.lock().unwrap().push_back((direction, strength));
    }
    fn len(&self) -> usize {
        self.queue.lock().unwrap().len()
    }
}
impl IrReceiver for SharedIr {
    fn queue_len(&self) -> usize {
        self.queue.lock().unwrap().len()
    }
    fn read(&mut self) -> Result<([f64; 3], f64), Box<dyn Error + Send + Sync>> {
        match self.queue.lock().unwrap().pop_front() {
            Some(reading) => Ok(reading),
            None => Err("queue empty".into()),
        }
    }
}

struct SpyEmitter {
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
}
impl Emitter for SpyEmitter {
    fn send(&mut self, payload: &[u8]) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.sent.lock().unwrap().push(payload.to_vec());
        Ok(())
    }
}

struct SharedGps {
    fix: Arc<Mutex<[f64; 3]>>,
}
impl Gps for SharedGps {
    fn position(&mut self) -> Result<[f64; 3], Box<dyn Error + Send + Sync>> {
        Ok(*self.fix.lock().unwrap())
    }
}

struct SharedCompass {
    north: Arc<Mutex<[f64; 3]>>,
}
impl Compass for SharedCompass {
    fn north(&mut self) -> Result<[f64; 3], Box<dyn Error + Send + Sync>> {
        Ok(*self.north.lock().unwrap())
    }
}

struct FixedSonar(f64);
impl DistanceSensor for FixedSonar {
    fn distance(&mut self) -> Result<f64, Box<dyn Error + Send + Sync>> {
        Ok(self.0)
    }
}

#[derive(Default, Clone)]
struct SpyMotor {
    log: Arc<Mutex<Vec<f64>>>,
}
impl SpyMotor {
    fn cmds(&self) -> Vec<f64> {
        self.log.lock().unwrap().clone()
    }
}
impl Motor for SpyMotor {
    fn set_velocity(&mut self, rad_per_s: f64) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.log.lock().unwrap().push(rad_per_s);
        Ok(())
    }
}

/// Test-side handles into every scripted device of one robot.
struct Harness {
    supervisor: SharedReceiver,
    team: SharedReceiver,
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
    ball: SharedIr,
    gps: Arc<Mutex<[f64; 3]>>,
    north: Arc<Mutex<[f64; 3]>>,
    left: SpyMotor,
    right: SpyMotor,
}

impl Harness {
    fn kickoff(&self, waiting: bool) {
        self.supervisor.push(
            SupervisorSignal {
                waiting_for_kickoff: waiting,
            }
            .encode(),
        );
    }

    fn teammate(&self, player_id: i32, x: f32, y: f32) {
        self.team
            .push(TeamPositionRecord { player_id, x, y }.encode());
    }
}

fn rig(name: &str) -> (Striker, Harness) {
    let supervisor = SharedReceiver::default();
    let team = SharedReceiver::default();
    let ball = SharedIr::default();
    let sent = Arc::new(Mutex::new(Vec::new()));
    let gps = Arc::new(Mutex::new([0.0f64; 3]));
    let north = Arc::new(Mutex::new([0.0, 1.0, 0.0]));
    let left = SpyMotor::default();
    let right = SpyMotor::default();

    let striker = Striker::builder()
        .with_radios(RadioSet {
            supervisor: Box::new(supervisor.clone()),
            team_rx: Box::new(team.clone()),
            team_tx: Box::new(SpyEmitter { sent: sent.clone() }),
            ball: Box::new(ball.clone()),
        })
        .with_sensors(SensorSet {
            gps: Box::new(SharedGps { fix: gps.clone() }),
            compass: Box::new(SharedCompass {
                north: north.clone(),
            }),
            sonar: SonarRig {
                left: Box::new(FixedSonar(0.8)),
                right: Box::new(FixedSonar(0.8)),
                front: Box::new(FixedSonar(1.2)),
                back: Box::new(FixedSonar(1.2)),
            },
        })
        .with_drivetrain(left.clone(), right.clone())
        .with_identity(Identity::parse(name).expect("identity"))
        .build()
        .expect("build striker");

    (
        striker,
        Harness {
            supervisor,
            team,
            sent,
            ball,
            gps,
            north,
            left,
            right,
        },
    )
}

fn acted(striker: &mut Striker) -> TickSummary {
    match striker.tick().expect("tick") {
        TickStatus::Acted(summary) => summary,
        TickStatus::Idle => panic!("expected an acting tick"),
    }
}

#[test]
fn no_supervisor_packet_means_nothing_happens() {
    let (mut striker, h) = rig("B1");
    h.teammate(2, 1.0, 1.0);
    h.ball.push([0.9, 0.5, 0.0], 0.6);

    assert_eq!(striker.tick().expect("tick"), TickStatus::Idle);

    // Pending data on the other channels stays queued, nothing is
    // commanded, nothing is broadcast.
    assert_eq!(h.team.len(), 1);
    assert_eq!(h.ball.len(), 1);
    assert!(h.sent.lock().unwrap().is_empty());
    assert!(h.left.cmds().is_empty());
    assert!(h.right.cmds().is_empty());
}

#[test]
fn supervisor_backlog_is_consumed_one_per_tick() {
    let (mut striker, h) = rig("B1");
    h.kickoff(false);
    h.kickoff(false);

    acted(&mut striker);
    assert_eq!(h.supervisor.len(), 1);
    acted(&mut striker);
    assert_eq!(h.supervisor.len(), 0);
    assert_eq!(striker.tick().expect("tick"), TickStatus::Idle);
}

#[test]
fn ball_ahead_cruises_forward() {
    let (mut striker, h) = rig("B1");
    h.kickoff(false);
    h.ball.push([0.9, 0.05, 0.0], 0.5);

    let summary = acted(&mut striker);
    assert_eq!(summary.direction, Direction::Forward);
    assert_eq!(summary.role, Role::Attack);
    assert_eq!(h.left.cmds(), vec![-10.0]);
    assert_eq!(h.right.cmds(), vec![-10.0]);
}

#[test]
fn ball_to_the_left_turns_left() {
    let (mut striker, h) = rig("B1");
    h.kickoff(false);
    h.ball.push([0.8, 0.5, 0.0], 0.5);

    let summary = acted(&mut striker);
    assert_eq!(summary.direction, Direction::Left);
    assert_eq!(h.left.cmds(), vec![-8.0]);
    assert_eq!(h.right.cmds(), vec![8.0]);
}

#[test]
fn ball_to_the_right_turns_right() {
    let (mut striker, h) = rig("B1");
    h.kickoff(false);
    h.ball.push([0.8, -0.5, 0.0], 0.5);

    let summary = acted(&mut striker);
    assert_eq!(summary.direction, Direction::Right);
    assert_eq!(h.left.cmds(), vec![8.0]);
    assert_eq!(h.right.cmds(), vec![-8.0]);
}

#[test]
fn no_ball_means_no_drive_command() {
    let (mut striker, h) = rig("B1");
    h.kickoff(false);

    let summary = acted(&mut striker);
    // Forward is the default direction, but the attack policy refuses to
    // act without a detected ball.
    assert_eq!(summary.direction, Direction::Forward);
    assert!(h.left.cmds().is_empty());
    assert!(h.right.cmds().is_empty());
}

#[test]
fn stale_ball_is_cleared_on_a_quiet_tick() {
    let (mut striker, h) = rig("B1");
    h.kickoff(false);
    h.ball.push([0.9, 0.2, 0.0], 0.5);
    acted(&mut striker);
    assert!(striker.state().ball_direction.is_some());

    h.kickoff(false);
    acted(&mut striker);
    assert!(striker.state().ball_direction.is_none());
    assert_eq!(striker.state().ball_strength, 0.0);
    // No new wheel command on the second tick.
    assert_eq!(h.left.cmds().len(), 1);
    assert_eq!(h.right.cmds().len(), 1);
}

#[test]
fn ball_channel_takes_one_reading_per_tick() {
    let (mut striker, h) = rig("B1");
    h.kickoff(false);
    h.kickoff(false);
    h.ball.push([0.8, 0.5, 0.0], 0.5);
    h.ball.push([0.8, -0.5, 0.0], 0.5);

    assert_eq!(acted(&mut striker).direction, Direction::Left);
    assert_eq!(h.ball.len(), 1);
    assert_eq!(acted(&mut striker).direction, Direction::Right);
    assert_eq!(h.ball.len(), 0);
}

#[test]
fn team_channel_is_drained_fully() {
    let (mut striker, h) = rig("B1");
    h.kickoff(false);
    h.kickoff(false);
    h.teammate(2, 0.0, 0.5);
    h.teammate(3, 1.0, -1.0);
    h.teammate(2, 0.1, 0.6);

    assert_eq!(acted(&mut striker).teammates_seen, 3);
    assert_eq!(h.team.len(), 0);
    assert_eq!(acted(&mut striker).teammates_seen, 0);
}

#[test]
fn own_position_is_broadcast_and_decodable() {
    let (mut striker, h) = rig("B2");
    *h.gps.lock().unwrap() = [1.25, -0.75, 0.0];
    h.kickoff(false);
    acted(&mut striker);

    let sent = h.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let record = TeamPositionRecord::decode(&sent[0]).expect("peer decode");
    assert_eq!(record.player_id, 2);
    assert_eq!(record.x, 1.25);
    assert_eq!(record.y, -0.75);
}

#[test]
fn sensors_land_in_state() {
    let (mut striker, h) = rig("B1");
    *h.gps.lock().unwrap() = [1.25, -0.75, 0.0];
    *h.north.lock().unwrap() = [1.0, 0.0, 0.0];
    h.kickoff(false);
    acted(&mut striker);

    let state = striker.state();
    assert_eq!(state.position, Some(Point2 { x: 1.25, y: -0.75 }));
    assert!((state.heading - std::f64::consts::PI).abs() < 1e-12);
    assert_eq!(state.sonar.left, 0.8);
    assert_eq!(state.sonar.front, 1.2);
}

#[test]
fn kickoff_wait_flag_passes_through() {
    let (mut striker, h) = rig("B1");
    h.kickoff(true);
    assert!(acted(&mut striker).waiting_for_kickoff);
}

#[test]
fn rearmost_player_still_attacks() {
    // B1 sits deeper than both reported teammates; the arbiter still
    // resolves to attack and the robot chases the ball.
    let (mut striker, h) = rig("B1");
    *h.gps.lock().unwrap() = [0.0, 2.0, 0.0];
    h.kickoff(false);
    h.teammate(2, 0.0, 0.5);
    h.teammate(3, 0.0, -1.0);
    h.ball.push([0.9, 0.0, 0.0], 0.5);

    let summary = acted(&mut striker);
    assert_eq!(summary.role, Role::Attack);
    assert_eq!(h.left.cmds(), vec![-10.0]);
    assert_eq!(h.right.cmds(), vec![-10.0]);
}

#[test]
fn malformed_team_packet_fails_the_tick() {
    let (mut striker, h) = rig("B1");
    h.kickoff(false);
    h.team.push(vec![0u8; 5]);

    let err = striker.tick().expect_err("short packet must fail");
    match err.downcast_ref::<StrikerError>() {
        Some(StrikerError::MalformedPacket {
            channel,
            expected,
            got,
        }) => {
            assert_eq!(*channel, Channel::Team);
            assert_eq!(*expected, 12);
            assert_eq!(*got, 5);
        }
        other => panic!("unexpected error: {other:?} ({err})"),
    }
}

struct ScriptedRuntime {
    steps: u32,
}
impl Runtime for ScriptedRuntime {
    fn step(&mut self, _step_ms: u32) -> Result<bool, Box<dyn Error + Send + Sync>> {
        if self.steps == 0 {
            return Ok(false);
        }
        self.steps -= 1;
        Ok(true)
    }
}

#[test]
fn run_counts_acted_and_idle_ticks() {
    let (mut striker, h) = rig("B1");
    h.kickoff(false);
    h.kickoff(false);

    let mut runtime = ScriptedRuntime { steps: 5 };
    let report = striker
        .run(&mut runtime, RunOptions::default(), None)
        .expect("run");
    assert_eq!(report.ticks, 5);
    assert_eq!(report.acted, 2);
    assert_eq!(report.idle, 3);
}

#[test]
fn run_respects_the_tick_budget() {
    let (mut striker, _h) = rig("B1");
    let mut runtime = ScriptedRuntime { steps: 100 };
    let report = striker
        .run(
            &mut runtime,
            RunOptions {
                max_ticks: Some(3),
            },
            None,
        )
        .expect("run");
    assert_eq!(report.ticks, 3);
}

#[test]
fn run_honors_a_raised_shutdown_flag() {
    let (mut striker, _h) = rig("B1");
    let mut runtime = ScriptedRuntime { steps: 100 };
    let stop = AtomicBool::new(true);
    stop.store(true, Ordering::SeqCst);
    let report = striker
        .run(&mut runtime, RunOptions::default(), Some(&stop))
        .expect("run");
    assert_eq!(report.ticks, 0);
}
