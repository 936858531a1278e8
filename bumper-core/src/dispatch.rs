/*
 * Collision response dispatcher. This is the single consumer of bump
 * events; it owns the motor driver for the life of the program.
 *
 * ASSUMPTIONS:
 * 1. Exactly one responder exists and nothing else drives the motor
 *   outputs while it lives; mutual exclusion is by ownership, not locks.
 * 2. respond() is always driven to completion before the next event is
 *   handed over, mirroring a non-nesting interrupt handler. A bump
 *   arriving mid-maneuver is observed only after the sequence finishes.
 * 3. The event latch is cleared exactly once per serviced event, on
 *   every path including no-ops and errors, so the source can never be
 *   left masked.
 */

use crate::maneuver::{Maneuver, ManeuverTable, MultiPressPolicy};
use crate::motor::{DelaySource, MotorDriver, MotorError, MotorOutputs};
use crate::switches::{BumpEvent, BumpSwitch};

/// The pending-interrupt-flag seam. Implementations acknowledge the edge
/// latch so an identical event can trigger again.
pub trait EventLatch {
    fn clear(&mut self);
}

/// For event sources whose pending state is consumed by awaiting the
/// edge itself; clearing is then a no-op.
pub struct NoopLatch;

impl EventLatch for NoopLatch {
    fn clear(&mut self) {}
}

/// What a serviced event resulted in.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// No motion: idle vector, unrecognized code, or an ignored
    /// multi-press.
    None,
    /// The per-switch script ran to completion.
    Maneuver(BumpSwitch),
    /// The multi-press recovery script ran to completion.
    ExtendedRecovery,
}

pub struct CollisionResponder<O, D> {
    motors: MotorDriver<O, D>,
    table: ManeuverTable,
    policy: MultiPressPolicy,
}

impl<O: MotorOutputs, D: DelaySource> CollisionResponder<O, D> {
    pub fn new(
        motors: MotorDriver<O, D>,
        table: ManeuverTable,
        policy: MultiPressPolicy,
    ) -> CollisionResponder<O, D> {
        CollisionResponder {
            motors,
            table,
            policy,
        }
    }

    pub fn motors(&mut self) -> &mut MotorDriver<O, D> {
        &mut self.motors
    }

    pub fn policy(&self) -> MultiPressPolicy {
        self.policy
    }

    /// Services one bump event: decode, run the selected maneuver to
    /// completion, clear the latch. Runs its full duration; there is no
    /// abort path.
    pub async fn respond(
        &mut self,
        event: BumpEvent,
        latch: &mut impl EventLatch,
    ) -> Result<Response, MotorError> {
        let result = self.dispatch(event).await;
        latch.clear();
        result
    }

    async fn dispatch(&mut self, event: BumpEvent) -> Result<Response, MotorError> {
        if event.pattern.count() > 1 {
            return match self.policy {
                MultiPressPolicy::Ignore => Ok(Response::None),
                MultiPressPolicy::ExtendedRecovery => {
                    self.run(&Maneuver::extended_recovery()).await?;
                    Ok(Response::ExtendedRecovery)
                }
            };
        }

        match event.switch {
            None => Ok(Response::None),
            Some(switch) => {
                let maneuver = self.table.for_switch(switch).clone();
                self.run(&maneuver).await?;
                Ok(Response::Maneuver(switch))
            }
        }
    }

    async fn run(&mut self, maneuver: &Maneuver) -> Result<(), MotorError> {
        for step in maneuver.steps() {
            self.motors
                .drive(step.primitive, step.duty, step.ticks)
                .await?;
        }
        Ok(())
    }
}
