#![no_std]
#![no_main]

use defmt::{info, warn};
use defmt_rtt as _;
use panic_probe as _;

use embassy_executor::Spawner;

use bumper_board::drivers::motors::{DriveOutputs, TimerDelay};
use bumper_board::drivers::status_led::{StatusColor, StatusLed};
use bumper_board::system::get_system_config;
use bumper_core::motor::{MotionPrimitive, MotorDriver};

const TEST_DUTY: u16 = 500;
const TEST_TICKS: u32 = 200;
const PAUSE_TICKS: u32 = 100;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_stm32::init(get_system_config());
    info!("motor hwtest: cycling primitives forever");

    let outputs = DriveOutputs::new_from_pins(p.PB12, p.PB13, p.PB14, p.PB15);
    let mut led = StatusLed::new_from_pins(p.PE0, p.PE1, p.PE2);

    let mut motors = MotorDriver::new(outputs, TimerDelay);

    loop {
        for primitive in [
            MotionPrimitive::Forward,
            MotionPrimitive::Backward,
            MotionPrimitive::PivotLeft,
            MotionPrimitive::PivotRight,
        ] {
            info!("primitive: {}", primitive);
            led.set(StatusColor::for_motion(primitive));
            if motors.drive(primitive, TEST_DUTY, TEST_TICKS).await.is_err() {
                warn!("duty {} rejected", TEST_DUTY);
            }
            led.set(StatusColor::Off);
            motors.stop(PAUSE_TICKS).await;
        }
    }
}
