//! Fixed collision-response scripts.
//!
//! Every recognized bump maps to a four-step script: back off, pause,
//! turn away from the obstacle, pause. Only the turn direction and
//! duration vary with which switch fired. The table is compiled in and
//! immutable for the life of the process.

use heapless::Vec;

use crate::motor::MotionPrimitive;
use crate::switches::{BumpSwitch, NUM_SWITCHES};

pub const MAX_MANEUVER_STEPS: usize = 4;

const MANEUVER_DUTY: u16 = 500;
const BACKWARD_TICKS: u32 = 100;
const PAUSE_TICKS: u32 = 100;

// extended recovery, historically the scheduler variant's default branch
const RECOVERY_PAUSE_TICKS: u32 = 400;
const RECOVERY_TURN_TICKS: u32 = 150;

/// Turn step per switch, nose-left to nose-right. Left-side bumps turn
/// the robot left away along the obstacle, right-side bumps turn right;
/// switches nearer the nose center get the longest turn.
const TURNS: [(MotionPrimitive, u32); NUM_SWITCHES] = [
    (MotionPrimitive::PivotLeft, 50),
    (MotionPrimitive::PivotLeft, 100),
    (MotionPrimitive::PivotLeft, 150),
    (MotionPrimitive::PivotRight, 150),
    (MotionPrimitive::PivotRight, 100),
    (MotionPrimitive::PivotRight, 50),
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ManeuverStep {
    pub primitive: MotionPrimitive,
    pub duty: u16,
    pub ticks: u32,
}

impl ManeuverStep {
    pub const fn new(primitive: MotionPrimitive, duty: u16, ticks: u32) -> ManeuverStep {
        ManeuverStep {
            primitive,
            duty,
            ticks,
        }
    }
}

/// An ordered, straight-line sequence of motion steps. No branching, no
/// mid-sequence sensing.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Maneuver {
    steps: Vec<ManeuverStep, MAX_MANEUVER_STEPS>,
}

impl Maneuver {
    fn from_steps(list: &[ManeuverStep]) -> Maneuver {
        let mut steps = Vec::new();
        for step in list {
            // capacity bounds every script at MAX_MANEUVER_STEPS
            let _ = steps.push(*step);
        }
        Maneuver { steps }
    }

    /// The stock response shape: backward, pause, turn, pause.
    pub fn backoff_and_turn(turn: MotionPrimitive, turn_ticks: u32) -> Maneuver {
        Maneuver::from_steps(&[
            ManeuverStep::new(MotionPrimitive::Backward, MANEUVER_DUTY, BACKWARD_TICKS),
            ManeuverStep::new(MotionPrimitive::Stop, 0, PAUSE_TICKS),
            ManeuverStep::new(turn, MANEUVER_DUTY, turn_ticks),
            ManeuverStep::new(MotionPrimitive::Stop, 0, PAUSE_TICKS),
        ])
    }

    /// Longer back-off with extended pauses, used for simultaneous
    /// multi-switch hits under [`MultiPressPolicy::ExtendedRecovery`].
    pub fn extended_recovery() -> Maneuver {
        Maneuver::from_steps(&[
            ManeuverStep::new(MotionPrimitive::Backward, MANEUVER_DUTY, BACKWARD_TICKS),
            ManeuverStep::new(MotionPrimitive::Stop, 0, RECOVERY_PAUSE_TICKS),
            ManeuverStep::new(MotionPrimitive::PivotRight, MANEUVER_DUTY, RECOVERY_TURN_TICKS),
            ManeuverStep::new(MotionPrimitive::Stop, 0, RECOVERY_PAUSE_TICKS),
        ])
    }

    pub fn steps(&self) -> &[ManeuverStep] {
        &self.steps
    }
}

/// What to do when more than one bump switch is latched at once. Both
/// behaviors were observed in the field; the choice is fixed at
/// responder construction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MultiPressPolicy {
    /// Fall through with no motion (the interrupt-driven variant).
    Ignore,
    /// Run the extended recovery script (the scheduler variant).
    ExtendedRecovery,
}

/// One maneuver per logical switch.
#[derive(Clone, Debug)]
pub struct ManeuverTable {
    maneuvers: [Maneuver; NUM_SWITCHES],
}

impl ManeuverTable {
    pub fn stock() -> ManeuverTable {
        ManeuverTable {
            maneuvers: TURNS.map(|(turn, ticks)| Maneuver::backoff_and_turn(turn, ticks)),
        }
    }

    pub fn for_switch(&self, switch: BumpSwitch) -> &Maneuver {
        &self.maneuvers[switch.index()]
    }
}

impl Default for ManeuverTable {
    fn default() -> ManeuverTable {
        ManeuverTable::stock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_table_covers_every_switch_with_the_same_shape() {
        let table = ManeuverTable::stock();
        for switch in BumpSwitch::ALL {
            let steps = table.for_switch(switch).steps();
            assert_eq!(steps.len(), 4);
            assert_eq!(steps[0].primitive, MotionPrimitive::Backward);
            assert_eq!(steps[0].duty, 500);
            assert_eq!(steps[0].ticks, 100);
            assert_eq!(steps[1].primitive, MotionPrimitive::Stop);
            assert!(matches!(
                steps[2].primitive,
                MotionPrimitive::PivotLeft | MotionPrimitive::PivotRight
            ));
            assert_eq!(steps[3].primitive, MotionPrimitive::Stop);
        }
    }

    #[test]
    fn turn_durations_are_tuned_per_switch_position() {
        let table = ManeuverTable::stock();
        let turns: std::vec::Vec<(MotionPrimitive, u32)> = BumpSwitch::ALL
            .iter()
            .map(|&s| {
                let step = &table.for_switch(s).steps()[2];
                (step.primitive, step.ticks)
            })
            .collect();
        assert_eq!(turns, TURNS.to_vec());
    }

    #[test]
    fn extended_recovery_backs_off_and_swings_right() {
        let steps = Maneuver::extended_recovery();
        let steps = steps.steps();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].primitive, MotionPrimitive::Backward);
        assert_eq!(steps[1].ticks, 400);
        assert_eq!(steps[2].primitive, MotionPrimitive::PivotRight);
        assert_eq!(steps[2].ticks, 150);
        assert_eq!(steps[3].ticks, 400);
    }
}
