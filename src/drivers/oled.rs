//! SSD1306 128×64 monochrome OLED over I2C.
//!
//! Keeps a 1 KiB page-ordered frame buffer on the stack side of the driver
//! struct and implements `embedded-graphics`' [`DrawTarget`], so drawing is
//! pure memory work; [`Ssd1306::flush`] pushes the whole buffer in a single
//! I2C transaction (~25 ms at 400 kHz, which is why refreshes are throttled).

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_hal::i2c::{I2c, Operation};
use log::info;

use crate::error::DisplayError;

/// Default 7-bit address (SA0 low).
pub const OLED_ADDR: u8 = 0x3C;
pub const OLED_WIDTH: u32 = 128;
pub const OLED_HEIGHT: u32 = 64;
const BUFFER_SIZE: usize = (OLED_WIDTH * OLED_HEIGHT / 8) as usize; // 1024

/// Control byte: command stream follows.
const CONTROL_COMMAND: u8 = 0x00;
/// Control byte: display RAM data follows.
const CONTROL_DATA: u8 = 0x40;

/// Power-on sequence for the common 128×64 module with internal charge pump.
const INIT_SEQUENCE: [u8; 26] = [
    CONTROL_COMMAND,
    0xAE, // display off
    0xD5, 0x80, // clock divide
    0xA8, 0x3F, // multiplex 1/64
    0xD3, 0x00, // no display offset
    0x40, // start line 0
    0x8D, 0x14, // charge pump on
    0x20, 0x00, // horizontal addressing
    0xA1, // segment remap
    0xC8, // COM scan descending
    0xDA, 0x12, // COM pins alt
    0x81, 0xCF, // contrast
    0xD9, 0xF1, // pre-charge
    0xDB, 0x40, // VCOMH
    0xA4, // follow RAM
    0xA6, // normal (not inverted)
    0xAF, // display on
];

/// Full-screen column/page window for a flush.
const ADDRESS_WINDOW: [u8; 7] = [CONTROL_COMMAND, 0x21, 0, 127, 0x22, 0, 7];

pub struct Ssd1306<I2C> {
    bus: I2C,
    address: u8,
    buffer: [u8; BUFFER_SIZE],
}

impl<I2C: I2c> Ssd1306<I2C> {
    pub fn new(bus: I2C) -> Self {
        Self {
            bus,
            address: OLED_ADDR,
            buffer: [0; BUFFER_SIZE],
        }
    }

    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.bus
            .write(self.address, &INIT_SEQUENCE)
            .map_err(|_| DisplayError::BusWriteFailed)?;
        self.clear_buffer();
        self.flush()?;
        info!("SSD1306 initialised ({}x{})", OLED_WIDTH, OLED_HEIGHT);
        Ok(())
    }

    pub fn clear_buffer(&mut self) {
        self.buffer = [0; BUFFER_SIZE];
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, on: bool) {
        if x >= OLED_WIDTH || y >= OLED_HEIGHT {
            return;
        }
        let index = (x + (y / 8) * OLED_WIDTH) as usize;
        let bit = 1u8 << (y % 8);
        if on {
            self.buffer[index] |= bit;
        } else {
            self.buffer[index] &= !bit;
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x >= OLED_WIDTH || y >= OLED_HEIGHT {
            return false;
        }
        self.buffer[(x + (y / 8) * OLED_WIDTH) as usize] & (1 << (y % 8)) != 0
    }

    /// Send the whole frame buffer to display RAM.
    pub fn flush(&mut self) -> Result<(), DisplayError> {
        self.bus
            .write(self.address, &ADDRESS_WINDOW)
            .map_err(|_| DisplayError::BusWriteFailed)?;
        self.bus
            .transaction(
                self.address,
                &mut [Operation::Write(&[CONTROL_DATA]), Operation::Write(&self.buffer)],
            )
            .map_err(|_| DisplayError::BusWriteFailed)
    }

    pub fn buffer(&self) -> &[u8; BUFFER_SIZE] {
        &self.buffer
    }

    pub fn release(self) -> I2C {
        self.bus
    }
}

impl<I2C> DrawTarget for Ssd1306<I2C>
where
    I2C: I2c,
{
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set_pixel(point.x as u32, point.y as u32, color.is_on());
            }
        }
        Ok(())
    }
}

impl<I2C> OriginDimensions for Ssd1306<I2C> {
    fn size(&self) -> Size {
        Size::new(OLED_WIDTH, OLED_HEIGHT)
    }
}
