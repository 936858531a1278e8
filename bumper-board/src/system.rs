use embassy_stm32::Config;

pub fn get_system_config() -> Config {
    // HSI defaults. All motor timing flows through the embassy time
    // driver, so there is no tight sysclk requirement to encode here.
    Config::default()
}
