// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// The two kinds of endpoint a fabric connects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Host,
    Device,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Host => "host",
            EntityKind::Device => "device",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Broad classification of a [`FabricError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed configuration: unknown property, bad value, bad name.
    Config,
    /// A host or device name that does not resolve.
    Reference,
    /// A name or connection declared twice, or a name shared by a host and a
    /// device.
    Duplicate,
    /// No hosts or no devices were declared.
    EmptyTopology,
    /// Two distinct logical wires derive the same identifier.
    Naming,
    /// The synthesized netlist failed its width check.
    Internal,
}

/// Errors raised while loading a topology or synthesizing a fabric. Every
/// error aborts the run; nothing is emitted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FabricError {
    #[error("unknown property '{key}' in {kind} section '{entity}'")]
    UnknownProperty {
        kind: EntityKind,
        entity: String,
        key: String,
    },

    #[error("invalid value '{value}' for property '{key}' in {kind} section '{entity}': {reason}")]
    InvalidValue {
        kind: EntityKind,
        entity: String,
        key: String,
        value: String,
        reason: &'static str,
    },

    #[error("unknown endian '{0}', expected 'big' or 'little'")]
    UnknownEndian(String),

    #[error("'{name}' is not a valid {what} name")]
    InvalidName { what: &'static str, name: String },

    #[error("{kind} '{name}' does not exist")]
    UnknownEntity { kind: EntityKind, name: String },

    #[error("{kind} '{name}' is already declared")]
    DuplicateEntity { kind: EntityKind, name: String },

    #[error("'{0}' is declared both as a host and as a device")]
    SharedName(String),

    #[error("host '{host}' is already connected to device '{device}'")]
    DuplicateConnection { host: String, device: String },

    #[error("topology has no {0}s")]
    EmptyTopology(EntityKind),

    #[error("identifier '{name}' is derived by both {first} and {second}")]
    NameCollision {
        name: String,
        first: String,
        second: String,
    },

    #[error("{instance}.{port} expects {expected} bit(s) but is connected to {actual}")]
    WidthMismatch {
        instance: String,
        port: String,
        expected: usize,
        actual: usize,
    },

    #[error("{instance} has no port '{port}'")]
    UnknownPort { instance: String, port: String },

    #[error("{instance}.{port} is unconnected")]
    Unconnected { instance: String, port: String },

    #[error("'{0}' is neither a port nor a declared wire")]
    UndeclaredNet(String),

    #[error("{0} is driven {1} times")]
    MultipleDrivers(String, usize),

    #[error("{0} is not driven")]
    Undriven(String),
}

impl FabricError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FabricError::UnknownProperty { .. }
            | FabricError::InvalidValue { .. }
            | FabricError::UnknownEndian(_)
            | FabricError::InvalidName { .. } => ErrorKind::Config,
            FabricError::UnknownEntity { .. } => ErrorKind::Reference,
            FabricError::DuplicateEntity { .. }
            | FabricError::SharedName(_)
            | FabricError::DuplicateConnection { .. } => ErrorKind::Duplicate,
            FabricError::EmptyTopology(_) => ErrorKind::EmptyTopology,
            FabricError::NameCollision { .. } => ErrorKind::Naming,
            FabricError::WidthMismatch { .. }
            | FabricError::UnknownPort { .. }
            | FabricError::Unconnected { .. }
            | FabricError::UndeclaredNet(_)
            | FabricError::MultipleDrivers(..)
            | FabricError::Undriven(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, FabricError>;
