use core::fmt;

use crate::poll::Timeout;

/// Which half of an I2C transaction stopped answering.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum I2cStage {
    Command,
    Read,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// The I2C busy flag never cleared.
    I2cTimeout { stage: I2cStage, attempts: u32 },
    /// The board layout would probe tiles outside the 32×32 map.
    LayoutOutOfBounds,
}

impl Error {
    pub(crate) fn from_timeout(stage: I2cStage, t: Timeout) -> Self {
        Error::I2cTimeout {
            stage,
            attempts: t.attempts,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2cTimeout { stage, attempts } => {
                let stage = match stage {
                    I2cStage::Command => "command",
                    I2cStage::Read => "read",
                };
                write!(f, "i2c {} still busy after {} polls", stage, attempts)
            }
            Error::LayoutOutOfBounds => write!(f, "board layout exceeds the tile map"),
        }
    }
}
