use embassy_futures::select::select_array;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::Pull;

use bumper_core::switches::{BumpEvent, BumpSwitch, SwitchPattern, NUM_SWITCHES};

use crate::pins::{
    Bump0Exti, Bump0Pin, Bump1Exti, Bump1Pin, Bump2Exti, Bump2Pin, Bump3Exti, Bump3Pin,
    Bump4Exti, Bump4Pin, Bump5Exti, Bump5Pin,
};

/// The six chassis bump switches, pulled up and falling-edge sensitive.
/// Switch contacts are not debounced; a mechanical bounce can produce a
/// repeated event.
pub struct BumpSensors {
    inputs: [ExtiInput<'static>; NUM_SWITCHES],
}

impl BumpSensors {
    /// Inputs in logical order, nose-left to nose-right. Construct each
    /// with `Pull::Up`; the lines are active low.
    pub fn new(inputs: [ExtiInput<'static>; NUM_SWITCHES]) -> Self {
        Self { inputs }
    }

    pub fn new_from_pins(
        b0: Bump0Pin,
        b0_exti: Bump0Exti,
        b1: Bump1Pin,
        b1_exti: Bump1Exti,
        b2: Bump2Pin,
        b2_exti: Bump2Exti,
        b3: Bump3Pin,
        b3_exti: Bump3Exti,
        b4: Bump4Pin,
        b4_exti: Bump4Exti,
        b5: Bump5Pin,
        b5_exti: Bump5Exti,
    ) -> Self {
        Self::new([
            ExtiInput::new(b0, b0_exti, Pull::Up),
            ExtiInput::new(b1, b1_exti, Pull::Up),
            ExtiInput::new(b2, b2_exti, Pull::Up),
            ExtiInput::new(b3, b3_exti, Pull::Up),
            ExtiInput::new(b4, b4_exti, Pull::Up),
            ExtiInput::new(b5, b5_exti, Pull::Up),
        ])
    }

    /// Instantaneous positive-logic pattern. Polling only; does not
    /// consume or affect the edge latch.
    pub fn read_raw(&self) -> SwitchPattern {
        let mut levels = [false; NUM_SWITCHES];
        for (level, input) in levels.iter_mut().zip(self.inputs.iter()) {
            *level = input.is_high();
        }
        SwitchPattern::from_levels(levels)
    }

    /// Completes on the first falling edge among the six lines. The
    /// ready branch index stands in for the vectored interrupt value;
    /// the raw pattern is sampled at that instant.
    pub async fn wait_for_bump(&mut self) -> BumpEvent {
        let [b0, b1, b2, b3, b4, b5] = &mut self.inputs;
        let (_, ind) = select_array([
            b0.wait_for_falling_edge(),
            b1.wait_for_falling_edge(),
            b2.wait_for_falling_edge(),
            b3.wait_for_falling_edge(),
            b4.wait_for_falling_edge(),
            b5.wait_for_falling_edge(),
        ])
        .await;

        BumpEvent::new(BumpSwitch::from_index(ind), self.read_raw())
    }
}
