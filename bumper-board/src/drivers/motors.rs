use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_time::Timer;

use bumper_core::motor::{DelaySource, MotorOutputs, WheelDirection};

use crate::pins::{LeftMotorDirPin, LeftMotorEnablePin, RightMotorDirPin, RightMotorEnablePin};

/// Direction/enable outputs for the two wheel motors. A high direction
/// line reverses that wheel; enable lines gate the drive stage.
pub struct DriveOutputs {
    left_dir: Output<'static>,
    left_enable: Output<'static>,
    right_dir: Output<'static>,
    right_enable: Output<'static>,
}

impl DriveOutputs {
    pub fn new(
        left_dir: Output<'static>,
        left_enable: Output<'static>,
        right_dir: Output<'static>,
        right_enable: Output<'static>,
    ) -> Self {
        Self {
            left_dir,
            left_enable,
            right_dir,
            right_enable,
        }
    }

    /// Everything starts deasserted: wheels forward, drive stage off.
    pub fn new_from_pins(
        left_dir: LeftMotorDirPin,
        left_enable: LeftMotorEnablePin,
        right_dir: RightMotorDirPin,
        right_enable: RightMotorEnablePin,
    ) -> Self {
        Self::new(
            Output::new(left_dir, Level::Low, Speed::Low),
            Output::new(left_enable, Level::Low, Speed::Low),
            Output::new(right_dir, Level::Low, Speed::Low),
            Output::new(right_enable, Level::Low, Speed::Low),
        )
    }

    #[inline]
    fn apply_direction(pin: &mut Output<'static>, direction: WheelDirection) {
        match direction {
            WheelDirection::Forward => pin.set_low(),
            WheelDirection::Reverse => pin.set_high(),
        }
    }

    #[inline]
    fn apply_enable(pin: &mut Output<'static>, on: bool) {
        if on {
            pin.set_high();
        } else {
            pin.set_low();
        }
    }
}

impl MotorOutputs for DriveOutputs {
    fn set_direction(&mut self, left: WheelDirection, right: WheelDirection) {
        Self::apply_direction(&mut self.left_dir, left);
        Self::apply_direction(&mut self.right_dir, right);
    }

    fn set_enable(&mut self, left: bool, right: bool) {
        Self::apply_enable(&mut self.left_enable, left);
        Self::apply_enable(&mut self.right_enable, right);
    }
}

/// Delay source backed by the embassy time driver. Waits yield to the
/// executor, so bump edges are observed no later than the end of the
/// current PWM phase.
pub struct TimerDelay;

impl DelaySource for TimerDelay {
    async fn delay_us(&mut self, us: u32) {
        Timer::after_micros(u64::from(us)).await;
    }
}
