#![no_std]

#![allow(clippy::too_many_arguments)]  // functions passing pins to device drivers exceed the bound

pub mod drivers;
pub mod pins;
pub mod system;
