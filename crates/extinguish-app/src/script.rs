//! Scripted trainee: drives a drill through Pull, Aim, Squeeze, Sweep.
//!
//! The script only reads snapshots and answers with input commands, the way
//! a real grab/input layer would. It never touches the engine directly.

use glam::{DQuat, DVec3};
use serde::Serialize;
use tracing::{debug, info};

use extinguish_core::commands::InputCommand;
use extinguish_core::config::DrillConfig;
use extinguish_core::enums::DrillPhase;
use extinguish_core::events::SimEvent;
use extinguish_core::state::{DrillSnapshot, ExtinguisherView, FireView, PinView};
use extinguish_core::types::{ObjectId, Pose};
use extinguish_sim::engine::{SimConfig, SimulationEngine};

/// Nozzle counts as on target within this angle.
const AIM_TOLERANCE_DEG: f64 = 5.0;

/// Tank level at which a trainee waiting on an empty tank squeezes again.
const RESUME_PRESSURE01: f64 = 0.5;

/// Pin travel per step, as a fraction of the configured pull distance.
const PULL_STEP_FRACTION: f64 = 0.25;

/// Produces input commands from the latest snapshot.
pub trait CommandSource {
    fn next_commands(&mut self, snapshot: &DrillSnapshot) -> Vec<InputCommand>;
}

/// Where the trainee is in the drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    Grab,
    PullPin,
    Aim,
    Squeeze,
    /// Tank ran dry: trigger released until pressure recovers.
    Recharge,
    Done,
}

/// Scripted PASS trainee for the first extinguisher in the snapshot.
pub struct PassDrill {
    nozzle_offset: DVec3,
    nozzle_forward: DVec3,
    pull_axis: DVec3,
    pull_step: f64,
    pull_target: f64,
    stage: Stage,
    pin_seat: Option<DVec3>,
    travel: f64,
}

impl PassDrill {
    pub fn new(config: &DrillConfig) -> Self {
        let pin = &config.pin;
        Self {
            nozzle_offset: config.extinguisher.nozzle_offset,
            nozzle_forward: config
                .extinguisher
                .nozzle_forward
                .try_normalize()
                .unwrap_or(DVec3::Z),
            pull_axis: pin.pull_direction.try_normalize().unwrap_or(DVec3::X),
            pull_step: pin.pull_distance * PULL_STEP_FRACTION,
            pull_target: pin.pull_distance * 1.25,
            stage: Stage::Grab,
            pin_seat: None,
            travel: 0.0,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Extinguisher pose that points the nozzle at `target`, keeping the
    /// current position. Two passes settle the rotated nozzle offset.
    pub fn aim_pose(&self, ext: &ExtinguisherView, target: DVec3) -> Option<Pose> {
        let position = ext.pose.position;
        let mut rotation = ext.pose.rotation;
        for _ in 0..2 {
            let origin = position + rotation * self.nozzle_offset;
            let desired = (target - origin).try_normalize()?;
            rotation = DQuat::from_rotation_arc(self.nozzle_forward, desired);
        }
        Some(Pose::new(position, rotation))
    }

    fn aim(&self, ext: &ExtinguisherView, fire: &FireView, commands: &mut Vec<InputCommand>) {
        if let Some(pose) = self.aim_pose(ext, fire.position) {
            commands.push(InputCommand::PoseSample {
                object: ext.id,
                pose,
            });
        }
    }

    fn pull_pin(&mut self, ext: &ExtinguisherView, pin: &PinView, commands: &mut Vec<InputCommand>) {
        let seat = *self.pin_seat.get_or_insert(pin.position);
        if !pin.held {
            commands.push(InputCommand::HoldBegin { object: pin.id });
        }
        self.travel = (self.travel + self.pull_step).min(self.pull_target);
        let axis = ext.pose.transform_direction(self.pull_axis);
        commands.push(InputCommand::PoseSample {
            object: pin.id,
            pose: Pose::from_position(seat + axis * self.travel),
        });
    }
}

impl CommandSource for PassDrill {
    fn next_commands(&mut self, snapshot: &DrillSnapshot) -> Vec<InputCommand> {
        let mut commands = Vec::new();
        let Some(ext) = snapshot.extinguishers.first() else {
            return commands;
        };

        if snapshot.phase == DrillPhase::Complete {
            if self.stage != Stage::Done {
                commands.push(InputCommand::TriggerEnd { object: ext.id });
                commands.push(InputCommand::HoldEnd { object: ext.id });
                self.stage = Stage::Done;
                info!(secs = ?snapshot.score.completion_secs, "all fires out");
            }
            return commands;
        }
        if snapshot.phase != DrillPhase::Active {
            return commands;
        }

        let target = nearest_burning_fire(snapshot, ext);
        let pin = pin_for(snapshot, ext.id);

        match self.stage {
            Stage::Grab => {
                commands.push(InputCommand::HoldBegin { object: ext.id });
                self.stage = Stage::PullPin;
            }
            Stage::PullPin => {
                if ext.pin_pulled {
                    if let Some(pin) = pin.filter(|p| p.held) {
                        commands.push(InputCommand::HoldEnd { object: pin.id });
                    }
                    debug!(extinguisher = %ext.id, "pin out, aiming");
                    self.stage = Stage::Aim;
                } else if let Some(pin) = pin {
                    self.pull_pin(ext, pin, &mut commands);
                }
            }
            Stage::Aim => {
                if let Some(fire) = target {
                    self.aim(ext, fire, &mut commands);
                    if is_aimed_at(ext, fire.position) {
                        commands.push(InputCommand::TriggerBegin { object: ext.id });
                        self.stage = Stage::Squeeze;
                    }
                }
            }
            Stage::Squeeze => {
                // Sweep: keep the nozzle on the nearest burning fire
                if let Some(fire) = target {
                    self.aim(ext, fire, &mut commands);
                }
                if ext.trigger_held && !ext.spraying {
                    commands.push(InputCommand::TriggerEnd { object: ext.id });
                    debug!(extinguisher = %ext.id, "tank empty, waiting for pressure");
                    self.stage = Stage::Recharge;
                } else if !ext.trigger_held {
                    commands.push(InputCommand::TriggerBegin { object: ext.id });
                }
            }
            Stage::Recharge => {
                if ext.pressure01 >= RESUME_PRESSURE01 {
                    commands.push(InputCommand::TriggerBegin { object: ext.id });
                    self.stage = Stage::Squeeze;
                }
            }
            Stage::Done => {}
        }
        commands
    }
}

fn pin_for(snapshot: &DrillSnapshot, extinguisher: ObjectId) -> Option<&PinView> {
    snapshot.pins.iter().find(|p| p.extinguisher == extinguisher)
}

fn nearest_burning_fire<'s>(snapshot: &'s DrillSnapshot, ext: &ExtinguisherView) -> Option<&'s FireView> {
    snapshot
        .fires
        .iter()
        .filter(|f| !f.is_out)
        .min_by(|a, b| {
            let da = a.position.distance(ext.nozzle_origin);
            let db = b.position.distance(ext.nozzle_origin);
            da.total_cmp(&db)
        })
}

fn is_aimed_at(ext: &ExtinguisherView, target: DVec3) -> bool {
    match (target - ext.nozzle_origin).try_normalize() {
        Some(direction) => {
            ext.nozzle_forward.dot(direction) >= AIM_TOLERANCE_DEG.to_radians().cos()
        }
        None => true,
    }
}

/// Outcome of a scripted drill run.
#[derive(Debug, Clone, Serialize)]
pub struct DrillReport {
    pub ticks: u64,
    pub stage: Stage,
    /// Every event emitted during the run, in order.
    pub events: Vec<SimEvent>,
    pub final_snapshot: DrillSnapshot,
}

/// Run a PASS drill on a fresh engine as fast as possible, for at most
/// `max_secs` of simulated time.
pub fn run_pass_drill(config: SimConfig, max_secs: f64) -> DrillReport {
    let mut script = PassDrill::new(&config.drill);
    let dt = config.drill.tick_rate.dt();
    let max_ticks = (max_secs.max(0.0) / dt).ceil() as u64;

    let mut engine = SimulationEngine::new(config);
    engine.queue_command(InputCommand::StartDrill);
    let mut snapshot = engine.step();
    let mut events = snapshot.events.clone();
    let mut ticks = 1;

    while ticks < max_ticks && script.stage() != Stage::Done {
        engine.queue_commands(script.next_commands(&snapshot));
        snapshot = engine.step();
        events.extend(snapshot.events.iter().cloned());
        ticks += 1;
    }

    DrillReport {
        ticks,
        stage: script.stage(),
        events,
        final_snapshot: snapshot,
    }
}
