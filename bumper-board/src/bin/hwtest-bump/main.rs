#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use panic_probe as _;

use embassy_executor::Spawner;

use bumper_board::drivers::bump::BumpSensors;
use bumper_board::system::get_system_config;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_stm32::init(get_system_config());
    info!("bump switch hwtest");

    let mut bump = BumpSensors::new_from_pins(
        p.PC0, p.EXTI0, p.PC1, p.EXTI1, p.PC2, p.EXTI2, p.PC3, p.EXTI3, p.PC4, p.EXTI4, p.PC5,
        p.EXTI5,
    );

    loop {
        let event = bump.wait_for_bump().await;
        info!("event: {}, raw now: {}", event, bump.read_raw());
    }
}
