//! Simulation engine: the core of the drill.
//!
//! `SimulationEngine` owns the hecs ECS world, processes input commands,
//! runs all systems, and produces `DrillSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use glam::DVec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use extinguish_core::commands::InputCommand;
use extinguish_core::components::{Extinguisher, PinLink, RigidBody, SprayController};
use extinguish_core::config::DrillConfig;
use extinguish_core::enums::{ColliderShape, DrillPhase, SprayStopReason};
use extinguish_core::events::SimEvent;
use extinguish_core::state::DrillSnapshot;
use extinguish_core::types::{LayerMask, ObjectId, Pose, SimTime};
use extinguish_gesture::{PullGesture, ReleaseOutcome};

use crate::arming::{ArmingState, ArmingTransition};
use crate::heat::HeatState;
use crate::pressure::PressureResource;
use crate::registry::ObjectRegistry;
use crate::spatial;
use crate::systems;
use crate::systems::spray;
use crate::world_setup::{self, ExtinguisherHandles};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same drill layout.
    pub seed: u64,
    pub drill: DrillConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            drill: DrillConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    registry: ObjectRegistry,
    time: SimTime,
    phase: DrillPhase,
    config: DrillConfig,
    rng: ChaCha8Rng,
    command_queue: VecDeque<InputCommand>,
    events: Vec<SimEvent>,
    completion_secs: Option<f64>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            registry: ObjectRegistry::new(),
            time: SimTime::default(),
            phase: DrillPhase::default(),
            config: config.drill,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            completion_secs: None,
        }
    }

    /// Queue an input command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: InputCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = InputCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    ///
    /// Commands are applied first, then (while the drill is active) pins,
    /// spray, fires and free bodies, in that order.
    pub fn tick(&mut self, dt: f64) -> DrillSnapshot {
        self.process_commands();

        if self.phase == DrillPhase::Active {
            let dt = dt.max(0.0);
            self.run_systems(dt);
            self.time.advance(dt);
            self.check_completion();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            events,
            self.completion_secs,
        )
    }

    /// Advance by one fixed tick at the configured tick rate.
    pub fn step(&mut self) -> DrillSnapshot {
        self.tick(self.config.tick_rate.dt())
    }

    /// Get the current drill phase.
    pub fn phase(&self) -> DrillPhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &DrillConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Entity behind an object id.
    pub fn entity(&self, id: ObjectId) -> Option<Entity> {
        self.registry.entity(id)
    }

    /// Spawn an extinguisher (and its pin) at `pose`.
    pub fn spawn_extinguisher(&mut self, pose: Pose) -> ExtinguisherHandles {
        world_setup::spawn_extinguisher(&mut self.world, &mut self.registry, pose, &self.config)
    }

    /// Spawn a burning fire at `position`.
    pub fn spawn_fire(&mut self, position: DVec3) -> ObjectId {
        world_setup::spawn_fire(
            &mut self.world,
            &mut self.registry,
            position,
            &self.config.fire,
        )
    }

    /// Spawn an extra collider owned by `fire`.
    pub fn spawn_fire_part(&mut self, fire: ObjectId, pose: Pose, shape: ColliderShape) -> ObjectId {
        world_setup::spawn_fire_part(&mut self.world, &mut self.registry, fire, pose, shape)
    }

    /// Spawn a loose prop that falls and can be pushed.
    pub fn spawn_prop(&mut self, position: DVec3, radius: f64, mass: f64) -> ObjectId {
        world_setup::spawn_prop(&mut self.world, &mut self.registry, position, radius, mass)
    }

    pub fn pressure(&self, extinguisher: ObjectId) -> Option<PressureResource> {
        self.component::<PressureResource>(extinguisher)
    }

    pub fn heat(&self, fire: ObjectId) -> Option<HeatState> {
        self.component::<HeatState>(fire)
    }

    pub fn arming(&self, extinguisher: ObjectId) -> Option<ArmingState> {
        self.component::<ArmingState>(extinguisher)
    }

    pub fn pose(&self, object: ObjectId) -> Option<Pose> {
        self.component::<Pose>(object)
    }

    fn component<T: hecs::Component + Clone>(&self, id: ObjectId) -> Option<T> {
        let entity = self.registry.entity(id)?;
        self.world.get::<&T>(entity).ok().map(|c| (*c).clone())
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single input command.
    fn handle_command(&mut self, command: InputCommand) {
        match command {
            InputCommand::StartDrill => {
                if self.phase != DrillPhase::Setup {
                    debug!(phase = ?self.phase, "start ignored, drill already started");
                    return;
                }
                let has_extinguisher = self
                    .world
                    .query::<&Extinguisher>()
                    .iter()
                    .next()
                    .is_some();
                if !has_extinguisher {
                    world_setup::setup_drill(
                        &mut self.world,
                        &mut self.registry,
                        &mut self.rng,
                        &self.config,
                    );
                }
                self.phase = DrillPhase::Active;
                self.time = SimTime::default();
                self.completion_secs = None;
                info!(objects = self.registry.len(), "drill started");
            }
            InputCommand::Pause => {
                if self.phase == DrillPhase::Active {
                    self.phase = DrillPhase::Paused;
                }
            }
            InputCommand::Resume => {
                if self.phase == DrillPhase::Paused {
                    self.phase = DrillPhase::Active;
                }
            }
            InputCommand::HoldBegin { object } => self.hold(object, true),
            InputCommand::HoldEnd { object } => self.hold(object, false),
            InputCommand::TriggerBegin { object } => self.trigger(object, true),
            InputCommand::TriggerEnd { object } => self.trigger(object, false),
            InputCommand::PoseSample { object, pose } => self.pose_sample(object, pose),
            InputCommand::ResetPin { pin } => self.reset_pin(pin),
            InputCommand::RadialImpulse {
                origin,
                force,
                radius,
            } => {
                let pushed =
                    spatial::apply_radial_force(&mut self.world, origin, force, radius, LayerMask::ALL);
                debug!(pushed, force, radius, "radial impulse");
            }
        }
    }

    fn lookup(&self, object: ObjectId) -> Option<Entity> {
        let entity = self.registry.entity(object);
        if entity.is_none() {
            warn!(%object, "command for unknown object");
        }
        entity
    }

    fn hold(&mut self, object: ObjectId, held: bool) {
        let Some(entity) = self.lookup(object) else {
            return;
        };

        let transition = self.world.get::<&mut ArmingState>(entity).ok().map(|mut arming| {
            let changed = arming.is_held() != held;
            (changed, arming.notify_held(held))
        });
        if let Some((changed, transition)) = transition {
            if changed {
                self.events.push(if held {
                    SimEvent::Grabbed {
                        extinguisher: object,
                    }
                } else {
                    SimEvent::Dropped {
                        extinguisher: object,
                    }
                });
            }
            self.apply_arming(entity, object, transition);
            return;
        }

        if self.world.get::<&PullGesture>(entity).is_ok() {
            if held {
                self.grab_pin(entity);
            } else {
                self.release_pin(entity, object);
            }
            return;
        }

        warn!(%object, "object cannot be held");
    }

    fn grab_pin(&mut self, entity: Entity) {
        let Ok((gesture, body)) = self
            .world
            .query_one_mut::<(&mut PullGesture, &mut RigidBody)>(entity)
        else {
            return;
        };
        gesture.begin_hold();
        // A detached pin picked up again rides the hand, not gravity
        if gesture.is_pulled() {
            body.kinematic = false;
            body.use_gravity = false;
            body.velocity = DVec3::ZERO;
        }
    }

    fn release_pin(&mut self, entity: Entity, pin: ObjectId) {
        let Some(frame) = self.pin_frame(entity) else {
            warn!(%pin, "released pin has no extinguisher frame");
            return;
        };
        let gravity = self.config.pin.gravity_after_release;
        let Ok((pose, gesture, body)) =
            self.world
                .query_one_mut::<(&Pose, &mut PullGesture, &mut RigidBody)>(entity)
        else {
            return;
        };
        match gesture.end_hold(pose, &frame) {
            ReleaseOutcome::NotHeld => {}
            ReleaseOutcome::SnapBack => {
                self.events.push(SimEvent::PinSnapBack { pin });
            }
            ReleaseOutcome::Detached => {
                body.kinematic = false;
                body.use_gravity = gravity;
                self.events.push(SimEvent::PinDropped { pin });
                debug!(%pin, gravity, "pin dropped");
            }
        }
    }

    /// World pose of the extinguisher a pin belongs to.
    fn pin_frame(&self, pin: Entity) -> Option<Pose> {
        let link = *self.world.get::<&PinLink>(pin).ok()?;
        self.pose(link.extinguisher)
    }

    fn trigger(&mut self, object: ObjectId, pressed: bool) {
        let Some(entity) = self.lookup(object) else {
            return;
        };
        let Ok((controller, pressure)) = self
            .world
            .query_one_mut::<(&mut SprayController, &mut PressureResource)>(entity)
        else {
            warn!(%object, "trigger on an object without a sprayer");
            return;
        };
        if !controller.enabled {
            debug!(%object, "trigger ignored, not armed");
            return;
        }
        controller.trigger_held = pressed;
        if pressed {
            spray::start_spray(object, controller, pressure, &mut self.events);
        } else {
            spray::stop_spray(
                object,
                controller,
                pressure,
                SprayStopReason::TriggerReleased,
                &mut self.events,
            );
        }
    }

    fn pose_sample(&mut self, object: ObjectId, sample: Pose) {
        let Some(entity) = self.lookup(object) else {
            return;
        };
        let movable = self.world.get::<&Extinguisher>(entity).is_ok()
            || self
                .world
                .get::<&PullGesture>(entity)
                .map(|gesture| gesture.is_held())
                .unwrap_or(false);
        if !movable {
            debug!(%object, "pose sample ignored, object not in hand");
            return;
        }
        if let Ok(mut pose) = self.world.get::<&mut Pose>(entity) {
            *pose = sample;
        }
    }

    fn reset_pin(&mut self, pin: ObjectId) {
        let Some(entity) = self.lookup(pin) else {
            return;
        };
        let Some(frame) = self.pin_frame(entity) else {
            warn!(%pin, "reset of a pin without an extinguisher");
            return;
        };
        let Ok((pose, gesture, body, link)) = self
            .world
            .query_one_mut::<(&mut Pose, &mut PullGesture, &mut RigidBody, &PinLink)>(entity)
        else {
            return;
        };
        gesture.reset();
        *body = world_setup::seated_body();
        *pose = frame.compose(&gesture.seat());
        let extinguisher = link.extinguisher;
        self.events.push(SimEvent::PinReset { pin });

        let Some(ext_entity) = self.registry.entity(extinguisher) else {
            return;
        };
        let transition = self
            .world
            .get::<&mut ArmingState>(ext_entity)
            .ok()
            .map(|mut arming| arming.reset_pin());
        if let Some(transition) = transition {
            self.apply_arming(ext_entity, extinguisher, transition);
        }
    }

    fn apply_arming(&mut self, entity: Entity, id: ObjectId, transition: ArmingTransition) {
        spray::apply_arming_transition(&mut self.world, entity, id, transition, &mut self.events);
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        systems::pins::run(&mut self.world, &self.registry, dt, &mut self.events);
        systems::spray::run(
            &mut self.world,
            &self.registry,
            &self.config.extinguisher,
            dt,
            &mut self.events,
        );
        systems::fires::run(&mut self.world, dt, &mut self.events);
        systems::movement::run(&mut self.world, dt);
    }

    /// End the drill once every fire is out.
    fn check_completion(&mut self) {
        let (total, out) = {
            let mut query = self.world.query::<&HeatState>();
            query
                .iter()
                .fold((0usize, 0usize), |(total, out), (_, heat)| {
                    (total + 1, out + usize::from(heat.is_out()))
                })
        };
        if total > 0 && out == total {
            self.phase = DrillPhase::Complete;
            self.completion_secs = Some(self.time.elapsed_secs);
            self.events.push(SimEvent::DrillComplete {
                elapsed_secs: self.time.elapsed_secs,
            });
            info!(elapsed_secs = self.time.elapsed_secs, fires = total, "drill complete");
        }
    }
}
