#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

pub mod dispatch;
pub mod maneuver;
pub mod motor;
pub mod switches;
