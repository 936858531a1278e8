use defmt::Format;
use embassy_stm32::gpio::{Level, Output, Speed};

use bumper_core::motor::MotionPrimitive;

use crate::pins::{BlueStatusLedPin, GreenStatusLedPin, RedStatusLedPin};

// Color    LED(s)
// dark     ---
// red      R--
// green    -G-
// yellow   RG-
// blue     --B
// pink     R-B
// sky blue -GB
// white    RGB
#[derive(Clone, Copy, Eq, PartialEq, Debug, Format)]
pub enum StatusColor {
    Off,
    Red,
    Green,
    Yellow,
    Blue,
    Pink,
    SkyBlue,
    White,
}

impl StatusColor {
    fn channels(self) -> (bool, bool, bool) {
        match self {
            StatusColor::Off => (false, false, false),
            StatusColor::Red => (true, false, false),
            StatusColor::Green => (false, true, false),
            StatusColor::Yellow => (true, true, false),
            StatusColor::Blue => (false, false, true),
            StatusColor::Pink => (true, false, true),
            StatusColor::SkyBlue => (false, true, true),
            StatusColor::White => (true, true, true),
        }
    }

    /// Drive-state color code: white forward, green backward, yellow
    /// left, blue right, dark stopped.
    pub fn for_motion(primitive: MotionPrimitive) -> StatusColor {
        match primitive {
            MotionPrimitive::Forward => StatusColor::White,
            MotionPrimitive::Backward => StatusColor::Green,
            MotionPrimitive::PivotLeft => StatusColor::Yellow,
            MotionPrimitive::PivotRight => StatusColor::Blue,
            MotionPrimitive::Stop => StatusColor::Off,
        }
    }
}

pub struct StatusLed {
    red: Output<'static>,
    green: Output<'static>,
    blue: Output<'static>,
}

impl StatusLed {
    pub fn new(red: Output<'static>, green: Output<'static>, blue: Output<'static>) -> Self {
        Self { red, green, blue }
    }

    pub fn new_from_pins(red: RedStatusLedPin, green: GreenStatusLedPin, blue: BlueStatusLedPin) -> Self {
        Self::new(
            Output::new(red, Level::Low, Speed::Low),
            Output::new(green, Level::Low, Speed::Low),
            Output::new(blue, Level::Low, Speed::Low),
        )
    }

    pub fn set(&mut self, color: StatusColor) {
        let (r, g, b) = color.channels();
        if r {
            self.red.set_high();
        } else {
            self.red.set_low();
        }
        if g {
            self.green.set_high();
        } else {
            self.green.set_low();
        }
        if b {
            self.blue.set_high();
        } else {
            self.blue.set_low();
        }
    }
}
