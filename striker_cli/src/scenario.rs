//! Scripted pitch scenario: a supervisor that releases the kickoff, an
//! orbiting ball, broadcasting teammates, and drifting own-position fixes.
//!
//! The script runs inside `Runtime::step`, so every queue the robot reads
//! on tick N was filled at the step boundary for tick N.

use striker_config::ROBOT_NAMES;
use striker_core::wire::WireRecord;
use striker_core::{
    ControlCfg, Identity, RadioSet, RuntimeCfg, SensorSet, SonarRig, Striker, SupervisorSignal,
    Team, TeamPositionRecord,
};
use striker_hardware::{
    IrLink, RadioLink, ScalarHandle, SimulatedCompass, SimulatedGps, SimulatedMotor,
    SimulatedPitch, SimulatedSonar,
};

/// How long the supervisor holds play before releasing the kickoff.
const KICKOFF_HOLD_MS: u64 = 512;

/// One ready-to-run simulated match.
pub struct Scenario {
    pub striker: Striker,
    pub pitch: SimulatedPitch,
    /// Outbound team frames, as queued by the robot's own emitter.
    pub team_out: RadioLink,
    /// Last commanded wheel velocities (rad/s).
    pub left: ScalarHandle,
    pub right: ScalarHandle,
}

/// Assemble a robot from simulated devices and wire a per-step script that
/// plays the other side of every channel.
pub fn build(
    robot: &str,
    cfg: &striker_config::Config,
    duration_ms: u64,
) -> eyre::Result<Scenario> {
    let identity = Identity::parse(robot)?;

    let supervisor = RadioLink::new();
    let team_in = RadioLink::new();
    let team_out = RadioLink::new();
    let ball = IrLink::new();

    let (gps, own_pos) = SimulatedGps::new([0.0, home_depth(identity), 0.0]);
    let (compass, north) = SimulatedCompass::new([0.0, 1.0, 0.0]);
    let (sonar_left, _) = SimulatedSonar::new(0.6);
    let (sonar_right, _) = SimulatedSonar::new(0.6);
    let (sonar_front, _) = SimulatedSonar::new(1.2);
    let (sonar_back, _) = SimulatedSonar::new(0.3);
    let (motor_left, left) = SimulatedMotor::new("left");
    let (motor_right, right) = SimulatedMotor::new("right");

    let striker = Striker::builder()
        .with_identity(identity)
        .with_radios(RadioSet {
            supervisor: Box::new(supervisor.receiver("supervisor")),
            team_rx: Box::new(team_in.receiver("team")),
            team_tx: Box::new(team_out.emitter("team")),
            ball: Box::new(ball.receiver("ball")),
        })
        .with_sensors(SensorSet {
            gps: Box::new(gps),
            compass: Box::new(compass),
            sonar: SonarRig {
                left: Box::new(sonar_left),
                right: Box::new(sonar_right),
                front: Box::new(sonar_front),
                back: Box::new(sonar_back),
            },
        })
        .with_drivetrain(motor_left, motor_right)
        .with_control(ControlCfg::from(&cfg.control))
        .with_runtime(RuntimeCfg::from(&cfg.runtime))
        .build()?;

    let peers = roster_peers(identity);
    let pitch = SimulatedPitch::with_script(duration_ms, move |elapsed| {
        let t = elapsed as f64 / 1000.0;

        // Supervisor broadcasts its gate every step.
        supervisor.push(
            SupervisorSignal {
                waiting_for_kickoff: elapsed < KICKOFF_HOLD_MS,
            }
            .encode(),
        );

        // The ball orbits, sweeping its bearing through all three steer
        // bands; signal strength fades as it swings wide.
        let lateral = 0.6 * (1.3 * t).sin();
        ball.push([0.8, lateral, 0.05], 1.0 / (1.0 + lateral.abs()));

        // Both peers report each step; their depths oscillate out of phase
        // so the rearmost comparison keeps flipping.
        for (i, peer) in peers.iter().enumerate() {
            let phase = 0.7 * t + i as f64;
            let record = TeamPositionRecord {
                player_id: i32::from(peer.player_id),
                x: (0.5 * phase.cos()) as f32,
                y: (0.4 * phase.sin()) as f32,
            };
            team_in.push(record.encode());
        }

        // Own GPS fix drifts on a slow arc; north swings so the heading
        // estimate stays live.
        own_pos.set([
            0.25 * (0.5 * t).sin(),
            home_depth(identity) + 0.1 * (0.3 * t).cos(),
            0.0,
        ]);
        north.set([(0.2 * t).sin(), (0.2 * t).cos(), 0.0]);
    });

    Ok(Scenario {
        striker,
        pitch,
        team_out,
        left,
        right,
    })
}

/// Nominal starting depth, by team half.
fn home_depth(identity: Identity) -> f64 {
    match identity.team {
        Team::Blue => 0.3,
        Team::Yellow => -0.3,
    }
}

/// Roster identities on the same team, excluding the robot itself.
fn roster_peers(identity: Identity) -> Vec<Identity> {
    ROBOT_NAMES
        .iter()
        .filter_map(|name| Identity::parse(name).ok())
        .filter(|peer| peer.team == identity.team && peer.player_id != identity.player_id)
        .collect()
}
