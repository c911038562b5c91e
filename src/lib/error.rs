use crate::sensors::SensorError;
use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    Sensor(SensorError),
    // the log sink refused a write
    Log,
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Error {
        Error::Sensor(e)
    }
}

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Error {
        Error::Log
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Sensor(e) => write!(f, "sensor error: {}", e),
            Error::Log => write!(f, "log write failed"),
        }
    }
}
