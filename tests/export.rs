// SPDX-License-Identifier: Apache-2.0

use busstitch::*;

fn soc() -> Fabric {
    let decls = Declarations::new()
        .host("cpu", ["ram", "uart"])
        .host("dma", ["uart"])
        .device("ram", attrs([("offset", 0), ("size", 0x10000)]))
        .device(
            "uart",
            attrs([("datawidth", 8), ("offset", 0x2000_0000), ("size", 0x100)]),
        );
    let topology = Topology::load(&decls).unwrap();
    synthesize(&topology, &FabricConfig::default()).unwrap()
}

#[test]
fn test_wrapper() {
    let fabric = soc();
    let wrapper = &fabric.wrapper;

    assert_eq!(wrapper.module_name, "wb_intercon");
    assert_eq!(wrapper.instance_name, "wb_intercon0");
    assert_eq!(wrapper.ports.len(), fabric.ports.len());

    let pairs: Vec<(&str, &str)> = wrapper
        .ports
        .iter()
        .take(4)
        .map(|p| (p.port.as_str(), p.wire.as_str()))
        .collect();
    assert_eq!(
        pairs,
        [
            ("wb_clk_i", "wb_clk"),
            ("wb_rst_i", "wb_rst"),
            ("wb_cpu_adr_i", "wb_m2s_cpu_adr"),
            ("wb_cpu_dat_i", "wb_m2s_cpu_dat"),
        ]
    );

    let lookup = |port: &str| {
        wrapper
            .ports
            .iter()
            .find(|p| p.port == port)
            .map(|p| p.wire.as_str())
    };
    assert_eq!(lookup("wb_cpu_dat_o"), Some("wb_s2m_cpu_dat"));
    assert_eq!(lookup("wb_uart_adr_o"), Some("wb_m2s_uart_adr"));
    assert_eq!(lookup("wb_uart_ack_i"), Some("wb_s2m_uart_ack"));
    assert_eq!(lookup("wb_uart_sel_o"), None);

    // The parent provides the clock and reset.
    assert!(!wrapper.wires.contains_key("wb_clk"));
    assert!(!wrapper.wires.contains_key("wb_rst"));
    assert_eq!(wrapper.wires.len(), 12 + 12 + 12 + 11);
    assert_eq!(wrapper.wires.get("wb_m2s_cpu_sel"), Some(&4));
    assert_eq!(wrapper.wires.get("wb_m2s_uart_dat"), Some(&8));
    assert_eq!(wrapper.wires.get("wb_s2m_uart_dat"), Some(&8));
    assert_eq!(wrapper.wires.get("wb_m2s_ram_dat"), Some(&32));
}

#[test]
fn test_wrapper_wire_widths_match_ports() {
    let fabric = soc();
    for (port, wrapped) in fabric.ports.iter().zip(&fabric.wrapper.ports) {
        assert_eq!(port.name, wrapped.port);
        if let Some(width) = fabric.wrapper.wires.get(&wrapped.wire) {
            assert_eq!(*width, port.io.width(), "{}", port.name);
        }
    }
}

#[test]
fn test_bus_interfaces() {
    let fabric = soc();
    let interfaces = &fabric.interfaces;

    assert_eq!(interfaces.clock.name, "wb_clk_i");
    assert_eq!(interfaces.reset.name, "wb_rst_i");
    assert_eq!(interfaces.clock.io, IO::Input(1));

    let names: Vec<&str> = interfaces
        .interfaces
        .iter()
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(names, ["wb_cpu", "wb_dma", "wb_ram", "wb_uart"]);

    let cpu = interfaces.get_interface("wb_cpu").unwrap();
    assert_eq!(cpu.mode, InterfaceMode::Slave);
    assert_eq!(cpu.datawidth, 32);
    assert_eq!(cpu.bus_type.vlnv(), "librecores.org:wishbone:wishbone:b3");
    assert_eq!(cpu.port_maps.len(), 12);
    assert_eq!(
        cpu.get_port_map("adr_o"),
        Some(&PortMap {
            logical: "adr_o".to_string(),
            physical: "wb_cpu_adr_i".to_string(),
            io: IO::Input(32),
        })
    );
    assert_eq!(
        cpu.get_port_map("ack_i").map(|m| m.physical.as_str()),
        Some("wb_cpu_ack_o")
    );

    let ram = interfaces.get_interface("wb_ram").unwrap();
    assert_eq!(ram.mode, InterfaceMode::Master);
    assert_eq!(
        ram.get_port_map("sel_o").map(|m| m.physical.as_str()),
        Some("wb_ram_sel_o")
    );

    let uart = interfaces.get_interface("wb_uart").unwrap();
    assert_eq!(uart.mode, InterfaceMode::Master);
    assert_eq!(uart.datawidth, 8);
    assert_eq!(uart.bus_type.name, "wishbone8");
    assert_eq!(
        uart.abstraction_type.vlnv(),
        "librecores.org:wishbone:wishbone8.absDef:b3"
    );
    assert!(uart.get_port_map("sel_o").is_none());
    assert_eq!(
        uart.get_port_map("dat_o"),
        Some(&PortMap {
            logical: "dat_o".to_string(),
            physical: "wb_uart_dat_o".to_string(),
            io: IO::Output(8),
        })
    );
    assert_eq!(
        uart.get_port_map("dat_i").map(|m| m.io),
        Some(IO::Input(8))
    );
}

#[test]
fn test_interface_ports_are_module_ports() {
    let fabric = soc();
    for interface in &fabric.interfaces.interfaces {
        for map in &interface.port_maps {
            assert_eq!(
                fabric.get_port(&map.physical).map(|p| p.io),
                Some(map.io),
                "{}.{}",
                interface.name,
                map.logical
            );
        }
    }
}

#[test]
fn test_custom_module_name() {
    let decls = Declarations::new()
        .host("cpu", ["ram"])
        .device("ram", Attrs::new());
    let topology = Topology::load(&decls).unwrap();
    let config = FabricConfig::new("periph_bus", "big").unwrap();
    let fabric = synthesize(&topology, &config).unwrap();
    assert_eq!(fabric.wrapper.module_name, "periph_bus");
    assert_eq!(fabric.wrapper.instance_name, "periph_bus0");
}
