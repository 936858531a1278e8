//! Differential-drive motion primitives over software-timed PWM.
//!
//! The motor hardware is two direction lines and two enable lines; speed
//! control is a first-order software PWM with a 1000 us period, one cycle
//! per duration tick. GPIO and timing are reached through the
//! [`MotorOutputs`] and [`DelaySource`] seams so hosts can drive the whole
//! engine with fakes and assert exact call sequences.

/// Software PWM period. Duty is the high time in us out of this period.
pub const PWM_PERIOD_US: u32 = 1000;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WheelDirection {
    Forward,
    Reverse,
}

/// The five motion primitives. Pivot turns drive one wheel only (a wide
/// pivot about the stationary wheel, matching the drive hardware), so
/// `PivotLeft` powers the right wheel and `PivotRight` the left.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPrimitive {
    Forward,
    Backward,
    PivotLeft,
    PivotRight,
    Stop,
}

impl MotionPrimitive {
    /// Direction-bit configuration for (left, right).
    pub fn directions(self) -> (WheelDirection, WheelDirection) {
        match self {
            MotionPrimitive::Backward => (WheelDirection::Reverse, WheelDirection::Reverse),
            _ => (WheelDirection::Forward, WheelDirection::Forward),
        }
    }

    /// Which enable lines the PWM loop toggles, as (left, right).
    pub fn enables(self) -> (bool, bool) {
        match self {
            MotionPrimitive::Forward | MotionPrimitive::Backward => (true, true),
            MotionPrimitive::PivotLeft => (false, true),
            MotionPrimitive::PivotRight => (true, false),
            MotionPrimitive::Stop => (false, false),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Duty must lie in (0, 1000) exclusive; 0 and 1000 degenerate to
    /// always-off/always-on and are rejected before any output change.
    InvalidDuty,
}

/// The GPIO seam: two direction bits and two enable bits.
pub trait MotorOutputs {
    fn set_direction(&mut self, left: WheelDirection, right: WheelDirection);
    fn set_enable(&mut self, left: bool, right: bool);
}

/// The timing seam. On target this yields through the time driver; host
/// tests substitute a fake clock.
pub trait DelaySource {
    async fn delay_us(&mut self, us: u32);
}

/// Open-loop drive of the two wheel motors. Every primitive re-asserts
/// its direction bits, runs its full duration, and only then returns;
/// there is no cancellation path and no feedback.
pub struct MotorDriver<O, D> {
    outputs: O,
    delay: D,
}

impl<O: MotorOutputs, D: DelaySource> MotorDriver<O, D> {
    pub fn new(outputs: O, delay: D) -> MotorDriver<O, D> {
        MotorDriver { outputs, delay }
    }

    pub async fn forward(&mut self, duty: u16, ticks: u32) -> Result<(), MotorError> {
        self.drive(MotionPrimitive::Forward, duty, ticks).await
    }

    pub async fn backward(&mut self, duty: u16, ticks: u32) -> Result<(), MotorError> {
        self.drive(MotionPrimitive::Backward, duty, ticks).await
    }

    pub async fn pivot_left(&mut self, duty: u16, ticks: u32) -> Result<(), MotorError> {
        self.drive(MotionPrimitive::PivotLeft, duty, ticks).await
    }

    pub async fn pivot_right(&mut self, duty: u16, ticks: u32) -> Result<(), MotorError> {
        self.drive(MotionPrimitive::PivotRight, duty, ticks).await
    }

    /// Deasserts both direction and both enable outputs, then holds for
    /// `ticks` full PWM periods.
    pub async fn stop(&mut self, ticks: u32) {
        self.outputs
            .set_direction(WheelDirection::Forward, WheelDirection::Forward);
        self.outputs.set_enable(false, false);
        for _ in 0..ticks {
            self.delay.delay_us(PWM_PERIOD_US).await;
        }
    }

    /// Runs one primitive for `ticks` PWM cycles: enable on, hold `duty`
    /// us, enable off, hold the complement. `ticks = 0` performs zero
    /// cycles.
    pub async fn drive(
        &mut self,
        primitive: MotionPrimitive,
        duty: u16,
        ticks: u32,
    ) -> Result<(), MotorError> {
        if let MotionPrimitive::Stop = primitive {
            self.stop(ticks).await;
            return Ok(());
        }

        let high_us = u32::from(duty);
        if high_us == 0 || high_us >= PWM_PERIOD_US {
            return Err(MotorError::InvalidDuty);
        }
        let low_us = PWM_PERIOD_US - high_us;

        let (left_dir, right_dir) = primitive.directions();
        let (left_en, right_en) = primitive.enables();
        self.outputs.set_direction(left_dir, right_dir);

        for _ in 0..ticks {
            self.outputs.set_enable(left_en, right_en);
            self.delay.delay_us(high_us).await;
            self.outputs.set_enable(false, false);
            self.delay.delay_us(low_us).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::rc::Rc;

    use embassy_futures::block_on;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Ev {
        Dir(WheelDirection, WheelDirection),
        En(bool, bool),
        Wait(u32),
    }

    #[derive(Clone, Default)]
    struct Recorder {
        events: Rc<RefCell<Vec<Ev>>>,
    }

    impl Recorder {
        fn take(&self) -> Vec<Ev> {
            self.events.borrow_mut().drain(..).collect()
        }
    }

    impl MotorOutputs for Recorder {
        fn set_direction(&mut self, left: WheelDirection, right: WheelDirection) {
            self.events.borrow_mut().push(Ev::Dir(left, right));
        }

        fn set_enable(&mut self, left: bool, right: bool) {
            self.events.borrow_mut().push(Ev::En(left, right));
        }
    }

    impl DelaySource for Recorder {
        async fn delay_us(&mut self, us: u32) {
            self.events.borrow_mut().push(Ev::Wait(us));
        }
    }

    fn make_driver() -> (MotorDriver<Recorder, Recorder>, Recorder) {
        let rec = Recorder::default();
        (MotorDriver::new(rec.clone(), rec.clone()), rec)
    }

    #[test]
    fn forward_runs_one_pwm_cycle_per_tick() {
        let (mut driver, rec) = make_driver();
        block_on(driver.forward(300, 2)).unwrap();
        assert_eq!(
            rec.take(),
            vec![
                Ev::Dir(WheelDirection::Forward, WheelDirection::Forward),
                Ev::En(true, true),
                Ev::Wait(300),
                Ev::En(false, false),
                Ev::Wait(700),
                Ev::En(true, true),
                Ev::Wait(300),
                Ev::En(false, false),
                Ev::Wait(700),
            ]
        );
    }

    #[test]
    fn backward_reverses_both_wheels() {
        let (mut driver, rec) = make_driver();
        block_on(driver.backward(500, 1)).unwrap();
        assert_eq!(
            rec.take()[0],
            Ev::Dir(WheelDirection::Reverse, WheelDirection::Reverse)
        );
    }

    #[test]
    fn pivots_drive_one_wheel_only() {
        let (mut driver, rec) = make_driver();

        block_on(driver.pivot_left(500, 1)).unwrap();
        assert_eq!(rec.take()[1], Ev::En(false, true));

        block_on(driver.pivot_right(500, 1)).unwrap();
        assert_eq!(rec.take()[1], Ev::En(true, false));
    }

    #[test]
    fn zero_ticks_performs_zero_cycles() {
        let (mut driver, rec) = make_driver();
        block_on(driver.forward(500, 0)).unwrap();
        // direction is asserted but no enable toggles and no waits happen
        assert_eq!(
            rec.take(),
            vec![Ev::Dir(WheelDirection::Forward, WheelDirection::Forward)]
        );
    }

    #[test]
    fn boundary_duties_compute_complement_safely() {
        let (mut driver, rec) = make_driver();

        block_on(driver.forward(1, 1)).unwrap();
        let waits: Vec<Ev> = rec
            .take()
            .into_iter()
            .filter(|e| matches!(e, Ev::Wait(_)))
            .collect();
        assert_eq!(waits, vec![Ev::Wait(1), Ev::Wait(999)]);

        block_on(driver.forward(999, 1)).unwrap();
        let waits: Vec<Ev> = rec
            .take()
            .into_iter()
            .filter(|e| matches!(e, Ev::Wait(_)))
            .collect();
        assert_eq!(waits, vec![Ev::Wait(999), Ev::Wait(1)]);
    }

    #[test]
    fn degenerate_duties_are_rejected_before_any_output() {
        let (mut driver, rec) = make_driver();
        assert_eq!(block_on(driver.forward(0, 10)), Err(MotorError::InvalidDuty));
        assert_eq!(
            block_on(driver.backward(1000, 10)),
            Err(MotorError::InvalidDuty)
        );
        assert_eq!(
            block_on(driver.pivot_left(1500, 10)),
            Err(MotorError::InvalidDuty)
        );
        assert!(rec.take().is_empty());
    }

    #[test]
    fn stop_deasserts_everything_from_any_prior_state() {
        let (mut driver, rec) = make_driver();
        block_on(driver.backward(500, 1)).unwrap();
        rec.take();

        block_on(driver.stop(3));
        assert_eq!(
            rec.take(),
            vec![
                Ev::Dir(WheelDirection::Forward, WheelDirection::Forward),
                Ev::En(false, false),
                Ev::Wait(1000),
                Ev::Wait(1000),
                Ev::Wait(1000),
            ]
        );
    }
}
