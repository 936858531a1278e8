use embassy_stm32::peripherals::*;

/////////////////////
//  Motor Outputs  //
/////////////////////

pub type LeftMotorDirPin = PB12;
pub type LeftMotorEnablePin = PB13;
pub type RightMotorDirPin = PB14;
pub type RightMotorEnablePin = PB15;

/////////////////////
//  Bump Switches  //
/////////////////////

pub type Bump0Pin = PC0;
pub type Bump0Exti = EXTI0;
pub type Bump1Pin = PC1;
pub type Bump1Exti = EXTI1;
pub type Bump2Pin = PC2;
pub type Bump2Exti = EXTI2;
pub type Bump3Pin = PC3;
pub type Bump3Exti = EXTI3;
pub type Bump4Pin = PC4;
pub type Bump4Exti = EXTI4;
pub type Bump5Pin = PC5;
pub type Bump5Exti = EXTI5;

///////////////
//  User IO  //
///////////////

pub type UserBtnPin = PD6;
pub type UserBtnExti = EXTI6;

pub type RedStatusLedPin = PE0;
pub type GreenStatusLedPin = PE1;
pub type BlueStatusLedPin = PE2;
