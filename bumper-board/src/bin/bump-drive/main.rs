#![no_std]
#![no_main]

use defmt::{info, warn};
use defmt_rtt as _;
use panic_probe as _;

use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::Pull;

use bumper_board::drivers::bump::BumpSensors;
use bumper_board::drivers::motors::{DriveOutputs, TimerDelay};
use bumper_board::drivers::status_led::{StatusColor, StatusLed};
use bumper_board::system::get_system_config;
use bumper_core::dispatch::{CollisionResponder, NoopLatch};
use bumper_core::maneuver::{ManeuverTable, MultiPressPolicy};
use bumper_core::motor::MotorDriver;

const CRUISE_DUTY: u16 = 500;
const CRUISE_CHUNK_TICKS: u32 = 100;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_stm32::init(get_system_config());
    info!("bump drive startup");

    let mut user_btn = ExtiInput::new(p.PD6, p.EXTI6, Pull::Up);

    let mut bump = BumpSensors::new_from_pins(
        p.PC0, p.EXTI0, p.PC1, p.EXTI1, p.PC2, p.EXTI2, p.PC3, p.EXTI3, p.PC4, p.EXTI4, p.PC5,
        p.EXTI5,
    );

    let outputs = DriveOutputs::new_from_pins(p.PB12, p.PB13, p.PB14, p.PB15);
    let mut led = StatusLed::new_from_pins(p.PE0, p.PE1, p.PE2);

    let motors = MotorDriver::new(outputs, TimerDelay);
    let mut responder =
        CollisionResponder::new(motors, ManeuverTable::default(), MultiPressPolicy::Ignore);
    let mut latch = NoopLatch;

    info!("waiting for start button");
    user_btn.wait_for_falling_edge().await;
    info!("rolling");

    loop {
        led.set(StatusColor::White);
        let cruise = responder.motors().forward(CRUISE_DUTY, CRUISE_CHUNK_TICKS);
        match select(cruise, bump.wait_for_bump()).await {
            Either::First(Ok(())) => {}
            Either::First(Err(e)) => warn!("cruise rejected: {}", e),
            Either::Second(event) => {
                // the forward chunk is abandoned mid-cycle; the maneuver
                // overrides whatever state it left behind
                info!("bump: {}", event);
                led.set(StatusColor::Green);
                match responder.respond(event, &mut latch).await {
                    Ok(response) => info!("response complete: {}", response),
                    Err(e) => warn!("response failed: {}", e),
                }
            }
        }
    }
}
