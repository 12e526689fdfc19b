// SPDX-License-Identifier: Apache-2.0

//! Synthesizes a Wishbone interconnect fabric from a declaration of which
//! hosts may reach which devices.
//!
//! The result of [`synthesize`] is a [`Fabric`]: an ordered netlist of
//! multiplexer, arbiter and resizer instances, the table of wires that join
//! them, the port list of the generated module, a wrapper port list for a
//! parent integration template, and bus-interface descriptors. Turning that
//! value into Verilog (or any other text) is left to the caller.

mod attrs;
pub use attrs::{AttrValue, Attrs, attrs};

mod config;
pub use config::{Endian, FabricConfig};

mod decode;
pub use decode::Decode;

mod diagnostics;
pub use diagnostics::Warning;

mod error;
pub use error::{EntityKind, ErrorKind, FabricError, Result};

mod export;
pub use export::{ModulePort, Wrapper, WrapperPort};

mod fabric;
pub use fabric::Fabric;

mod intf;
pub use intf::{BusInterface, BusType, InterfaceDescriptor, InterfaceMode, PortMap};

mod io;
pub use io::IO;

mod naming;
pub use naming::{LogicalWire, WireAllocator};

mod netlist;
pub use netlist::{
    ComponentKind, Connection, Instance, Literal, Netlist, ParameterValue, WireTable,
};

mod signal;
pub use signal::{BUS_WIDTH, DEVICE_SIGNALS, Flow, HOST_SIGNALS, Signal, bus_signals};

mod synth;
pub use synth::synthesize;

mod topology;
pub use topology::{Declarations, Device, DeviceDecl, Host, HostDecl, Topology};

mod util;
