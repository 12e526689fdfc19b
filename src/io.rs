// SPDX-License-Identifier: Apache-2.0

use crate::signal::Flow;

/// Represents the direction (`Input` or `Output`) and bit width of a port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IO {
    Input(usize),
    Output(usize),
}

impl IO {
    /// Returns the width of the port in bits.
    pub fn width(&self) -> usize {
        match self {
            IO::Input(width) => *width,
            IO::Output(width) => *width,
        }
    }

    /// Returns a new IO enum with the same width but the opposite direction.
    pub fn flip(&self) -> IO {
        match self {
            IO::Input(width) => IO::Output(*width),
            IO::Output(width) => IO::Input(*width),
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self, IO::Input(_))
    }

    pub fn is_output(&self) -> bool {
        matches!(self, IO::Output(_))
    }

    /// Direction of a port that faces a host: host-driven signals come in,
    /// device-driven signals go out.
    pub(crate) fn facing_host(flow: Flow, width: usize) -> IO {
        match flow {
            Flow::HostToDevice => IO::Input(width),
            Flow::DeviceToHost => IO::Output(width),
        }
    }

    /// Direction of a port that faces a device; the mirror of
    /// [`IO::facing_host`].
    pub(crate) fn facing_device(flow: Flow, width: usize) -> IO {
        IO::facing_host(flow, width).flip()
    }

    /// Single-letter suffix used in port names.
    pub(crate) fn suffix(&self) -> &'static str {
        match self {
            IO::Input(_) => "i",
            IO::Output(_) => "o",
        }
    }
}
