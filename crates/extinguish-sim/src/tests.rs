//! Tests for the simulation engine: arming, pin gesture, spray, fires and drill flow.

use glam::{DQuat, DVec3};

use extinguish_core::commands::InputCommand;
use extinguish_core::components::RigidBody;
use extinguish_core::config::DrillConfig;
use extinguish_core::constants::FLOOR_Y;
use extinguish_core::enums::*;
use extinguish_core::events::SimEvent;
use extinguish_core::state::DrillSnapshot;
use extinguish_core::types::{ObjectId, Pose};

use crate::engine::{SimConfig, SimulationEngine};
use crate::world_setup::ExtinguisherHandles;

const DT: f64 = 0.05;

fn engine_with(drill: DrillConfig) -> SimulationEngine {
    SimulationEngine::new(SimConfig { seed: 7, drill })
}

/// Extinguisher at (0, 1, 0) facing +z, drill started, nothing held.
fn setup(drill: DrillConfig) -> (SimulationEngine, ExtinguisherHandles) {
    let mut engine = engine_with(drill);
    let handles = engine.spawn_extinguisher(Pose::from_position(DVec3::new(0.0, 1.0, 0.0)));
    engine.queue_command(InputCommand::StartDrill);
    engine.tick(DT);
    (engine, handles)
}

/// Point on the spray axis `distance` meters in front of the nozzle.
fn ahead_of_nozzle(distance: f64) -> DVec3 {
    DVec3::new(0.0, 1.25, 0.12 + distance)
}

/// Hold the pin and move it `travel` meters along the pull axis.
fn move_pin(engine: &mut SimulationEngine, handles: &ExtinguisherHandles, travel: f64) -> DrillSnapshot {
    let seat = engine.pose(handles.pin).unwrap();
    engine.queue_commands([
        InputCommand::HoldBegin { object: handles.pin },
        InputCommand::PoseSample {
            object: handles.pin,
            pose: Pose::from_position(seat.position + DVec3::X * travel),
        },
    ]);
    engine.tick(DT)
}

/// Grab, pull the pin. Returns the events of both ticks.
fn arm(engine: &mut SimulationEngine, handles: &ExtinguisherHandles) -> Vec<SimEvent> {
    engine.queue_command(InputCommand::HoldBegin {
        object: handles.extinguisher,
    });
    let mut events = engine.tick(DT).events;
    events.extend(move_pin(engine, handles, 0.09).events);
    events
}

fn squeeze(engine: &mut SimulationEngine, handles: &ExtinguisherHandles) -> DrillSnapshot {
    engine.queue_command(InputCommand::TriggerBegin {
        object: handles.extinguisher,
    });
    engine.tick(DT)
}

fn run_for(engine: &mut SimulationEngine, ticks: usize, events: &mut Vec<SimEvent>) -> DrillSnapshot {
    let mut last = engine.tick(DT);
    events.extend(last.events.clone());
    for _ in 1..ticks {
        last = engine.tick(DT);
        events.extend(last.events.clone());
    }
    last
}

// ---- Drill flow ----

#[test]
fn test_full_drill_pass() {
    let (mut engine, handles) = setup(DrillConfig::default());
    let fire = engine.spawn_fire(ahead_of_nozzle(2.0));

    let events = arm(&mut engine, &handles);
    assert!(events.contains(&SimEvent::Grabbed {
        extinguisher: handles.extinguisher
    }));
    assert!(events.contains(&SimEvent::PinPulled {
        pin: handles.pin,
        extinguisher: handles.extinguisher
    }));
    assert!(events.contains(&SimEvent::Armed {
        extinguisher: handles.extinguisher
    }));
    assert!(events.contains(&SimEvent::PromptChanged {
        extinguisher: handles.extinguisher,
        prompt: Prompt::Ready
    }));

    let snap = squeeze(&mut engine, &handles);
    assert!(snap.extinguisher(handles.extinguisher).unwrap().spraying);
    assert!(snap.fire(fire).unwrap().heat < 100.0);

    let mut events = Vec::new();
    let mut last = snap;
    for _ in 0..400 {
        last = engine.tick(DT);
        events.extend(last.events.clone());
        if engine.phase() == DrillPhase::Complete {
            break;
        }
    }

    assert_eq!(engine.phase(), DrillPhase::Complete);
    assert!(events.contains(&SimEvent::FireExtinguished { fire }));
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::DrillComplete { .. })));
    assert_eq!(last.score.fires_out, 1);
    assert!(last.score.completion_secs.is_some());
    assert!(last.score.spray_secs > 0.0);
    let view = last.fire(fire).unwrap();
    assert!(view.is_out);
    assert_eq!(view.heat, 0.0);
    assert_eq!(view.effects.emission_rate, 0.0);
}

#[test]
fn test_prompt_follows_hold_and_pin() {
    let (mut engine, handles) = setup(DrillConfig::default());
    let snap = engine.tick(DT);
    let view = snap.extinguisher(handles.extinguisher).unwrap();
    assert_eq!(view.prompt, Prompt::Grab);
    assert_eq!(view.prompt_text, "Grab the extinguisher");
    assert!(!view.gauge.visible);

    engine.queue_command(InputCommand::HoldBegin {
        object: handles.extinguisher,
    });
    let snap = engine.tick(DT);
    let view = snap.extinguisher(handles.extinguisher).unwrap();
    assert_eq!(view.prompt_text, "P: Pull the pin");
    assert!(view.gauge.visible);
    assert_eq!(view.gauge.label, "100/100");

    let snap = move_pin(&mut engine, &handles, 0.09);
    let view = snap.extinguisher(handles.extinguisher).unwrap();
    assert_eq!(view.prompt_text, "Ready to spray!");
    assert!(view.armed);
}

#[test]
fn test_trigger_ignored_until_armed() {
    let (mut engine, handles) = setup(DrillConfig::default());
    engine.queue_command(InputCommand::HoldBegin {
        object: handles.extinguisher,
    });
    let snap = squeeze(&mut engine, &handles);
    let view = snap.extinguisher(handles.extinguisher).unwrap();
    assert!(!view.spraying);
    assert!(!view.trigger_held);
    assert_eq!(view.pressure, 100.0);
    assert!(snap.events.iter().all(|e| !matches!(e, SimEvent::SprayStarted { .. })));
}

#[test]
fn test_pin_pulled_before_grab_arms_on_grab() {
    let (mut engine, handles) = setup(DrillConfig::default());
    let snap = move_pin(&mut engine, &handles, 0.09);
    let view = snap.extinguisher(handles.extinguisher).unwrap();
    assert!(view.pin_pulled);
    assert!(!view.armed);
    assert_eq!(view.prompt, Prompt::Grab);

    engine.queue_command(InputCommand::HoldBegin {
        object: handles.extinguisher,
    });
    let snap = engine.tick(DT);
    assert!(snap.extinguisher(handles.extinguisher).unwrap().armed);
    assert!(snap.events.contains(&SimEvent::Armed {
        extinguisher: handles.extinguisher
    }));
}

#[test]
fn test_drop_disarms_and_stops_spray() {
    let (mut engine, handles) = setup(DrillConfig::default());
    arm(&mut engine, &handles);
    squeeze(&mut engine, &handles);

    engine.queue_command(InputCommand::HoldEnd {
        object: handles.extinguisher,
    });
    let snap = engine.tick(DT);
    assert!(snap.events.contains(&SimEvent::SprayStopped {
        extinguisher: handles.extinguisher,
        reason: SprayStopReason::Disarmed
    }));
    assert!(snap.events.contains(&SimEvent::Disarmed {
        extinguisher: handles.extinguisher
    }));
    let view = snap.extinguisher(handles.extinguisher).unwrap();
    assert!(!view.spraying);
    assert!(!view.armed);
    assert_eq!(view.emission_rate, 0.0);
    assert_eq!(view.prompt, Prompt::Grab);

    // Re-grab: pin stays pulled, so armed again, but the jet does not resume
    engine.queue_command(InputCommand::HoldBegin {
        object: handles.extinguisher,
    });
    let snap = engine.tick(DT);
    let view = snap.extinguisher(handles.extinguisher).unwrap();
    assert!(view.armed);
    assert!(!view.spraying);
}

#[test]
fn test_repeated_hold_reports_one_grab_and_one_drop() {
    let (mut engine, handles) = setup(DrillConfig::default());
    let hold = |held: bool| {
        if held {
            InputCommand::HoldBegin {
                object: handles.extinguisher,
            }
        } else {
            InputCommand::HoldEnd {
                object: handles.extinguisher,
            }
        }
    };
    let grabbed = SimEvent::Grabbed {
        extinguisher: handles.extinguisher,
    };
    let dropped = SimEvent::Dropped {
        extinguisher: handles.extinguisher,
    };

    engine.queue_command(hold(true));
    assert!(engine.tick(DT).events.contains(&grabbed));
    engine.queue_command(hold(true));
    assert!(!engine.tick(DT).events.contains(&grabbed));

    engine.queue_command(hold(false));
    assert!(engine.tick(DT).events.contains(&dropped));
    engine.queue_command(hold(false));
    assert!(!engine.tick(DT).events.contains(&dropped));
}

#[test]
fn test_start_drill_is_one_shot() {
    let (mut engine, _handles) = setup(DrillConfig::default());
    let elapsed = engine.time().elapsed_secs;
    engine.queue_command(InputCommand::StartDrill);
    engine.tick(DT);
    assert_eq!(engine.phase(), DrillPhase::Active);
    assert!(engine.time().elapsed_secs > elapsed);
}

#[test]
fn test_pause_freezes_time_and_systems() {
    let (mut engine, handles) = setup(DrillConfig::default());
    arm(&mut engine, &handles);
    squeeze(&mut engine, &handles);
    let pressure = engine.pressure(handles.extinguisher).unwrap().current();

    engine.queue_command(InputCommand::Pause);
    let time = engine.tick(DT).time;
    for _ in 0..10 {
        engine.tick(DT);
    }
    assert_eq!(engine.phase(), DrillPhase::Paused);
    assert_eq!(engine.time(), time);
    assert_eq!(engine.pressure(handles.extinguisher).unwrap().current(), pressure);

    engine.queue_command(InputCommand::Resume);
    engine.tick(DT);
    assert_eq!(engine.phase(), DrillPhase::Active);
    assert!(engine.pressure(handles.extinguisher).unwrap().current() < pressure);
}

#[test]
fn test_unknown_object_is_ignored() {
    let (mut engine, _handles) = setup(DrillConfig::default());
    engine.queue_commands([
        InputCommand::HoldBegin { object: ObjectId(999) },
        InputCommand::TriggerBegin { object: ObjectId(999) },
        InputCommand::ResetPin { pin: ObjectId(999) },
    ]);
    let snap = engine.tick(DT);
    assert!(snap.events.is_empty());
}

// ---- Pressure ----

#[test]
fn test_spray_and_recharge_pressure() {
    let (mut engine, handles) = setup(DrillConfig::default());
    arm(&mut engine, &handles);

    // 3 s of spray at 10/s, then 2 s idle at 2/s
    engine.queue_command(InputCommand::TriggerBegin {
        object: handles.extinguisher,
    });
    let mut events = Vec::new();
    run_for(&mut engine, 60, &mut events);
    let level = engine.pressure(handles.extinguisher).unwrap().current();
    assert!((level - 70.0).abs() < 1e-9, "pressure after spray = {level}");

    engine.queue_command(InputCommand::TriggerEnd {
        object: handles.extinguisher,
    });
    let snap = run_for(&mut engine, 40, &mut events);
    let level = engine.pressure(handles.extinguisher).unwrap().current();
    assert!((level - 74.0).abs() < 1e-9, "pressure after recharge = {level}");
    assert_eq!(snap.extinguisher(handles.extinguisher).unwrap().gauge.label, "74/100");
    assert!(events.contains(&SimEvent::SprayStopped {
        extinguisher: handles.extinguisher,
        reason: SprayStopReason::TriggerReleased
    }));
}

#[test]
fn test_emission_tracks_pressure() {
    let (mut engine, handles) = setup(DrillConfig::default());
    arm(&mut engine, &handles);
    let snap = squeeze(&mut engine, &handles);
    let view = snap.extinguisher(handles.extinguisher).unwrap();
    // lerp(8, 60, 0.995)
    assert!((view.emission_rate - (8.0 + 52.0 * 0.995)).abs() < 1e-9);
}

#[test]
fn test_depletion_stops_spray_until_trigger_repressed() {
    let mut drill = DrillConfig::default();
    drill.extinguisher.consume_per_sec = 500.0;
    let (mut engine, handles) = setup(drill);
    arm(&mut engine, &handles);
    squeeze(&mut engine, &handles);

    let mut events = Vec::new();
    let snap = run_for(&mut engine, 4, &mut events);
    assert!(events.contains(&SimEvent::SprayStopped {
        extinguisher: handles.extinguisher,
        reason: SprayStopReason::Depleted
    }));
    let view = snap.extinguisher(handles.extinguisher).unwrap();
    assert!(!view.spraying);
    assert!(view.trigger_held);
    assert!(view.pressure > 0.0, "idle tank recharges");

    // Trigger still down but no auto-resume
    let snap = engine.tick(DT);
    assert!(!snap.extinguisher(handles.extinguisher).unwrap().spraying);

    engine.queue_command(InputCommand::TriggerEnd {
        object: handles.extinguisher,
    });
    engine.tick(DT);
    // A fresh press restarts the jet while any pressure is left
    let snap = squeeze(&mut engine, &handles);
    assert!(snap.events.contains(&SimEvent::SprayStarted {
        extinguisher: handles.extinguisher
    }));
}

// ---- Cone and heat ----

#[test]
fn test_off_axis_fire_untouched() {
    let (mut engine, handles) = setup(DrillConfig::default());
    let bearing = 60f64.to_radians();
    let fire = engine.spawn_fire(DVec3::new(bearing.sin() * 2.0, 1.25, 0.12 + bearing.cos() * 2.0));
    arm(&mut engine, &handles);
    squeeze(&mut engine, &handles);
    let mut events = Vec::new();
    run_for(&mut engine, 20, &mut events);
    assert_eq!(engine.heat(fire).unwrap().heat(), 100.0);
}

#[test]
fn test_out_of_range_fire_untouched() {
    let (mut engine, handles) = setup(DrillConfig::default());
    let fire = engine.spawn_fire(ahead_of_nozzle(3.5 + 0.35));
    arm(&mut engine, &handles);
    squeeze(&mut engine, &handles);
    let mut events = Vec::new();
    run_for(&mut engine, 20, &mut events);
    assert_eq!(engine.heat(fire).unwrap().heat(), 100.0);
}

#[test]
fn test_child_collider_cools_parent() {
    let (mut engine, handles) = setup(DrillConfig::default());
    // Parent fire far out of range, child collider right in the jet
    let fire = engine.spawn_fire(ahead_of_nozzle(40.0));
    engine.spawn_fire_part(
        fire,
        Pose::from_position(ahead_of_nozzle(1.0)),
        ColliderShape::Sphere { radius: 0.1 },
    );
    arm(&mut engine, &handles);
    squeeze(&mut engine, &handles);

    let heat = engine.heat(fire).unwrap().heat();
    // 0.9 m to the child's surface: weight 1 - 0.7 * 0.3 = 0.79
    let expected = 100.0 - 35.0 * 0.79 * DT;
    assert!((heat - expected).abs() < 1e-9, "heat = {heat}");
}

#[test]
fn test_two_jets_on_one_fire_add_up() {
    let heat_drop = |jets: usize| {
        let (mut engine, first) = setup(DrillConfig::default());
        let fire = engine.spawn_fire(ahead_of_nozzle(1.0));
        let mut all = vec![first];
        for _ in 1..jets {
            all.push(engine.spawn_extinguisher(Pose::from_position(DVec3::new(0.0, 1.0, 0.0))));
        }
        for handles in &all {
            arm(&mut engine, handles);
            squeeze(&mut engine, handles);
        }
        let before = engine.heat(fire).unwrap().heat();
        engine.tick(DT);
        before - engine.heat(fire).unwrap().heat()
    };
    let single = heat_drop(1);
    let double = heat_drop(2);
    assert!(single > 0.0);
    assert!((double - 2.0 * single).abs() < 1e-9, "single = {single}, double = {double}");
}

#[test]
fn test_damage_scales_with_pressure_only_when_enabled() {
    let loss = |scale: bool| {
        let mut drill = DrillConfig::default();
        drill.extinguisher.scale_damage_with_pressure = scale;
        let (mut engine, handles) = setup(drill);
        let fire = engine.spawn_fire(ahead_of_nozzle(1.0));
        arm(&mut engine, &handles);
        squeeze(&mut engine, &handles);
        100.0 - engine.heat(fire).unwrap().heat()
    };
    let flat = loss(false);
    let scaled = loss(true);
    assert!(flat > 0.0);
    assert!((scaled - flat * 0.995).abs() < 1e-9);
}

#[test]
fn test_reignite_after_delay() {
    let mut drill = DrillConfig::default();
    drill.fire.reignite_delay_secs = 1.0;
    let (mut engine, handles) = setup(drill);
    let fire = engine.spawn_fire(ahead_of_nozzle(0.5));
    // Second fire keeps the drill running
    let spare = engine.spawn_fire(DVec3::new(0.0, 1.25, -5.0));
    arm(&mut engine, &handles);
    squeeze(&mut engine, &handles);

    let mut events = Vec::new();
    for _ in 0..200 {
        events.extend(engine.tick(DT).events);
        if engine.heat(fire).unwrap().is_out() {
            break;
        }
    }
    assert!(events.contains(&SimEvent::FireExtinguished { fire }));
    engine.queue_command(InputCommand::TriggerEnd {
        object: handles.extinguisher,
    });

    let mut events = Vec::new();
    run_for(&mut engine, 25, &mut events);
    assert!(events.contains(&SimEvent::FireReignited { fire, heat: 30.0 }));
    let heat = engine.heat(fire).unwrap();
    assert!(!heat.is_out());
    assert_eq!(heat.heat(), 30.0);
    assert_eq!(engine.heat(spare).unwrap().heat(), 100.0);
    assert_eq!(engine.phase(), DrillPhase::Active);
}

// ---- Pin ----

#[test]
fn test_partial_pull_snaps_back_to_seat() {
    let (mut engine, handles) = setup(DrillConfig::default());
    let seat = engine.pose(handles.pin).unwrap().position;

    let snap = move_pin(&mut engine, &handles, 0.04);
    let pin = snap.pin(handles.pin).unwrap();
    assert_eq!(pin.phase, PinPhase::Tracking);
    assert!(pin.progress01 > 0.0 && pin.progress01 < 1.0);

    engine.queue_command(InputCommand::HoldEnd { object: handles.pin });
    let snap = engine.tick(DT);
    assert!(snap.events.contains(&SimEvent::PinSnapBack { pin: handles.pin }));
    assert!(snap.pin(handles.pin).unwrap().snapping_back);

    let mut events = Vec::new();
    let snap = run_for(&mut engine, 4, &mut events);
    assert!(events.contains(&SimEvent::PinSeated { pin: handles.pin }));
    let pin = snap.pin(handles.pin).unwrap();
    assert_eq!(pin.phase, PinPhase::Idle);
    assert!(!pin.snapping_back);
    assert!((pin.position - seat).length() < 1e-9);
    assert!(!snap.extinguisher(handles.extinguisher).unwrap().pin_pulled);
}

#[test]
fn test_lateral_drift_does_not_pull() {
    let (mut engine, handles) = setup(DrillConfig::default());
    let seat = engine.pose(handles.pin).unwrap();
    engine.queue_commands([
        InputCommand::HoldBegin { object: handles.pin },
        InputCommand::PoseSample {
            object: handles.pin,
            pose: Pose::from_position(seat.position + DVec3::new(0.09, 0.03, 0.0)),
        },
    ]);
    let snap = engine.tick(DT);
    let pin = snap.pin(handles.pin).unwrap();
    assert_eq!(pin.phase, PinPhase::Tracking);
    assert_eq!(pin.progress01, 0.0);
}

#[test]
fn test_pulled_pin_falls_after_release() {
    let (mut engine, handles) = setup(DrillConfig::default());
    move_pin(&mut engine, &handles, 0.09);

    engine.queue_command(InputCommand::HoldEnd { object: handles.pin });
    let snap = engine.tick(DT);
    assert!(snap.events.contains(&SimEvent::PinDropped { pin: handles.pin }));

    // Samples for a pin no longer in hand are ignored
    engine.queue_command(InputCommand::PoseSample {
        object: handles.pin,
        pose: Pose::from_position(DVec3::new(0.0, 5.0, 0.0)),
    });
    let mut events = Vec::new();
    let snap = run_for(&mut engine, 60, &mut events);
    let pin = snap.pin(handles.pin).unwrap();
    assert_eq!(pin.phase, PinPhase::Pulled);
    assert_eq!(pin.position.y, FLOOR_Y);
}

#[test]
fn test_regrabbed_pulled_pin_follows_hand_without_gravity() {
    let (mut engine, handles) = setup(DrillConfig::default());
    move_pin(&mut engine, &handles, 0.09);
    engine.queue_command(InputCommand::HoldEnd { object: handles.pin });
    let mut events = Vec::new();
    run_for(&mut engine, 60, &mut events);

    engine.queue_command(InputCommand::HoldBegin { object: handles.pin });
    let hand = Pose::from_position(DVec3::new(0.3, 1.5, 0.2));
    for _ in 0..20 {
        engine.queue_command(InputCommand::PoseSample {
            object: handles.pin,
            pose: hand,
        });
        engine.tick(DT);
    }
    assert_eq!(engine.pose(handles.pin).unwrap().position, hand.position);
    let entity = engine.entity(handles.pin).unwrap();
    let body = *engine.world().get::<&RigidBody>(entity).unwrap();
    assert_eq!(body.velocity, DVec3::ZERO);
    assert!(!body.use_gravity);
    assert!(!body.kinematic);

    // Released again it drops from the hand, not with stored speed
    engine.queue_command(InputCommand::HoldEnd { object: handles.pin });
    engine.tick(DT);
    let y = engine.pose(handles.pin).unwrap().position.y;
    assert!(y > 1.4, "y = {y}");
}

#[test]
fn test_pulled_pin_floats_when_gravity_disabled() {
    let mut drill = DrillConfig::default();
    drill.pin.gravity_after_release = false;
    let (mut engine, handles) = setup(drill);
    move_pin(&mut engine, &handles, 0.09);
    let before = engine.pose(handles.pin).unwrap().position;
    engine.queue_command(InputCommand::HoldEnd { object: handles.pin });
    let mut events = Vec::new();
    run_for(&mut engine, 20, &mut events);
    assert_eq!(engine.pose(handles.pin).unwrap().position, before);
}

#[test]
fn test_reset_pin_disarms() {
    let (mut engine, handles) = setup(DrillConfig::default());
    arm(&mut engine, &handles);
    squeeze(&mut engine, &handles);

    engine.queue_command(InputCommand::ResetPin { pin: handles.pin });
    let snap = engine.tick(DT);
    assert!(snap.events.contains(&SimEvent::PinReset { pin: handles.pin }));
    assert!(snap.events.contains(&SimEvent::SprayStopped {
        extinguisher: handles.extinguisher,
        reason: SprayStopReason::Disarmed
    }));
    assert!(snap.events.contains(&SimEvent::PromptChanged {
        extinguisher: handles.extinguisher,
        prompt: Prompt::PullPin
    }));
    let view = snap.extinguisher(handles.extinguisher).unwrap();
    assert!(!view.armed);
    assert!(!view.pin_pulled);
    assert_eq!(snap.pin(handles.pin).unwrap().phase, PinPhase::Idle);

    // The pin can be pulled again
    let snap = move_pin(&mut engine, &handles, 0.09);
    assert!(snap.extinguisher(handles.extinguisher).unwrap().armed);
}

#[test]
fn test_seated_pin_follows_extinguisher() {
    let (mut engine, handles) = setup(DrillConfig::default());
    let turned = Pose::new(
        DVec3::new(1.0, 1.0, 0.0),
        DQuat::from_rotation_y(std::f64::consts::FRAC_PI_2),
    );
    engine.queue_commands([
        InputCommand::HoldBegin {
            object: handles.extinguisher,
        },
        InputCommand::PoseSample {
            object: handles.extinguisher,
            pose: turned,
        },
    ]);
    let snap = engine.tick(DT);
    let view = snap.extinguisher(handles.extinguisher).unwrap();
    // +z rotated a quarter turn about y points along +x
    assert!((view.nozzle_forward - DVec3::X).length() < 1e-9);

    let expected = turned.transform_point(DVec3::new(0.03, 0.2, 0.0));
    assert!((snap.pin(handles.pin).unwrap().position - expected).length() < 1e-9);
}

// ---- Free bodies ----

#[test]
fn test_radial_impulse_pushes_props_not_seated_pins() {
    let (mut engine, handles) = setup(DrillConfig::default());
    let prop = engine.spawn_prop(DVec3::new(0.5, 1.0, 0.0), 0.1, 1.0);
    let pin_before = engine.pose(handles.pin).unwrap().position;

    engine.queue_command(InputCommand::RadialImpulse {
        origin: DVec3::new(0.0, 1.0, 0.0),
        force: 10.0,
        radius: 2.0,
    });
    engine.tick(DT);
    assert!(engine.pose(prop).unwrap().position.x > 0.5);
    assert_eq!(engine.pose(handles.pin).unwrap().position, pin_before);
}

// ---- Default drill ----

#[test]
fn test_default_drill_layout() {
    let mut engine = engine_with(DrillConfig::default());
    engine.queue_command(InputCommand::StartDrill);
    let snap = engine.tick(DT);

    assert_eq!(engine.phase(), DrillPhase::Active);
    assert_eq!(snap.extinguishers.len(), 1);
    assert_eq!(snap.pins.len(), 1);
    assert_eq!(snap.fires.len(), 2);
    assert_eq!(snap.score.fires_total, 2);
    for fire in &snap.fires {
        let flat = DVec3::new(fire.position.x, 0.0, fire.position.z);
        assert!((flat.length() - 1.6).abs() < 0.25);
        assert!(fire.position.z > 0.0);
        assert!(!fire.is_out);
    }
}

#[test]
fn test_determinism_same_seed() {
    let run = |seed: u64| {
        let mut engine = SimulationEngine::new(SimConfig {
            seed,
            ..Default::default()
        });
        engine.queue_command(InputCommand::StartDrill);
        (0..50)
            .map(|_| serde_json::to_string(&engine.tick(DT)).unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(run(12345), run(12345));
}

#[test]
fn test_determinism_different_seeds() {
    let layout = |seed: u64| {
        let mut engine = SimulationEngine::new(SimConfig {
            seed,
            ..Default::default()
        });
        engine.queue_command(InputCommand::StartDrill);
        engine
            .tick(DT)
            .fires
            .iter()
            .map(|f| f.position)
            .collect::<Vec<_>>()
    };
    assert_ne!(layout(111), layout(222));
}
