// SPDX-License-Identifier: Apache-2.0

use busstitch::*;

fn tieoffs(fabric: &Fabric) -> Vec<String> {
    fabric
        .netlist
        .tieoffs
        .iter()
        .map(|(port, literal)| format!("{port} = {}'h{:x}", literal.width, literal.value))
        .collect()
}

#[test]
fn test_dead_host() {
    let _ = env_logger::builder().is_test(true).try_init();

    let decls = Declarations::new()
        .host("cpu", Vec::<String>::new())
        .host("dma", ["ram"])
        .device("ram", attrs([("size", 0x1000)]));
    let topology = Topology::load(&decls).unwrap();
    let fabric = synthesize(&topology, &FabricConfig::default()).unwrap();

    assert_eq!(
        fabric.warnings,
        [Warning::DeadHost {
            host: "cpu".to_string()
        }]
    );
    assert_eq!(
        fabric.warnings[0].to_string(),
        "unreachable host `cpu`: no devices connected"
    );

    // The host keeps its ports; nothing decodes its requests.
    assert!(fabric.netlist.get_instance("mux_cpu").is_none());
    assert!(fabric.netlist.get_instance("mux_dma").is_some());
    assert_eq!(fabric.get_port("wb_cpu_adr_i").unwrap().io, IO::Input(32));
    assert_eq!(fabric.get_port("wb_cpu_dat_o").unwrap().io, IO::Output(32));
    assert_eq!(
        tieoffs(&fabric),
        [
            "wb_cpu_dat_o = 32'h0",
            "wb_cpu_ack_o = 1'h0",
            "wb_cpu_err_o = 1'h0",
            "wb_cpu_rty_o = 1'h0",
        ]
    );
    assert!(fabric.interfaces.get_interface("wb_cpu").is_some());

    fabric.check().unwrap();
}

#[test]
fn test_unreachable_device() {
    let decls = Declarations::new()
        .host("cpu", ["ram"])
        .device("ram", attrs([("size", 0x1000)]))
        .device("rom", attrs([("offset", 0x1000), ("size", 0x1000)]));
    let topology = Topology::load(&decls).unwrap();
    let fabric = synthesize(&topology, &FabricConfig::default()).unwrap();

    assert_eq!(
        fabric.warnings,
        [Warning::UnreachableDevice {
            device: "rom".to_string()
        }]
    );
    assert_eq!(fabric.netlist.instances.len(), 1);
    assert_eq!(
        tieoffs(&fabric),
        [
            "wb_rom_adr_o = 32'h0",
            "wb_rom_dat_o = 32'h0",
            "wb_rom_sel_o = 4'h0",
            "wb_rom_we_o = 1'h0",
            "wb_rom_cyc_o = 1'h0",
            "wb_rom_stb_o = 1'h0",
            "wb_rom_cti_o = 3'h0",
            "wb_rom_bte_o = 2'h0",
        ]
    );

    fabric.check().unwrap();
}

#[test]
fn test_unreachable_narrow_device_keeps_resizer() {
    let decls = Declarations::new()
        .host("cpu", ["ram"])
        .device("ram", attrs([("size", 0x1000)]))
        .device("uart", attrs([("datawidth", 8), ("offset", 0x1000), ("size", 0x100)]));
    let topology = Topology::load(&decls).unwrap();
    let fabric = synthesize(&topology, &FabricConfig::default()).unwrap();

    assert_eq!(
        fabric.warnings,
        [Warning::UnreachableDevice {
            device: "uart".to_string()
        }]
    );
    assert!(fabric.netlist.get_instance("arbiter_uart").is_none());

    let resize = fabric.netlist.get_instance("resize_uart").unwrap();
    assert_eq!(resize.get_parameter("sdw").and_then(|v| v.as_int()), Some(8));
    assert_eq!(
        resize.get_port("wbm_cyc_i"),
        Some(&Connection::Wire("wb_m2s_resize_uart_cyc".to_string()))
    );
    assert_eq!(
        resize.get_port("wbs_dat_o"),
        Some(&Connection::Wire("wb_uart_dat_o".to_string()))
    );

    // The resizer drives the device; its idle host side is tied off.
    assert_eq!(
        tieoffs(&fabric),
        [
            "wb_m2s_resize_uart_adr = 32'h0",
            "wb_m2s_resize_uart_dat = 32'h0",
            "wb_m2s_resize_uart_sel = 4'h0",
            "wb_m2s_resize_uart_we = 1'h0",
            "wb_m2s_resize_uart_cyc = 1'h0",
            "wb_m2s_resize_uart_stb = 1'h0",
            "wb_m2s_resize_uart_cti = 3'h0",
            "wb_m2s_resize_uart_bte = 2'h0",
        ]
    );
    assert_eq!(fabric.wires.len(), 12);
    assert_eq!(fabric.wires.get("wb_s2m_resize_uart_dat"), Some(&32));

    fabric.check().unwrap();
}

#[test]
fn test_overlapping_regions() {
    let decls = Declarations::new()
        .host("cpu", ["ram", "rom", "uart"])
        .device("ram", attrs([("offset", 0), ("size", 0x10000)]))
        .device("rom", attrs([("offset", 0x8000), ("size", 0x1000)]))
        .device("uart", attrs([("offset", 0x9000_0000i64), ("size", 0x100)]));
    let topology = Topology::load(&decls).unwrap();
    let fabric = synthesize(&topology, &FabricConfig::default()).unwrap();

    assert_eq!(
        fabric.warnings,
        [Warning::OverlappingRegions {
            host: "cpu".to_string(),
            first: "ram".to_string(),
            second: "rom".to_string(),
        }]
    );

    // The parameters are emitted as declared; the multiplexer's priority
    // settles the overlap.
    let mux = fabric.netlist.get_instance("mux_cpu").unwrap();
    assert_eq!(
        mux.get_parameter("MATCH_ADDR").unwrap().as_words(),
        Some(&[0, 0x8000, 0x9000_0000][..])
    );
}

#[test]
fn test_unaligned_offset() {
    let decls = Declarations::new()
        .host("cpu", ["ram"])
        .device("ram", attrs([("offset", "0x1080"), ("size", "0x1000")]));
    let topology = Topology::load(&decls).unwrap();
    let fabric = synthesize(&topology, &FabricConfig::default()).unwrap();

    assert_eq!(
        fabric.warnings,
        [Warning::UnalignedOffset {
            device: "ram".to_string(),
            offset: 0x1080,
            size: 0x1000,
        }]
    );
    assert_eq!(
        fabric.warnings[0].to_string(),
        "offset 0x00001080 of device `ram` is not aligned to its size 0x1000"
    );
}

#[test]
fn test_default_region_covers_everything() {
    let decls = Declarations::new()
        .host("cpu", ["ram"])
        .device("ram", Attrs::new());
    let topology = Topology::load(&decls).unwrap();
    let ram = topology.get_device("ram").unwrap();
    assert_eq!(ram.size(), 1 << 32);
    assert_eq!(ram.mask(), 0);
    assert!(Decode::of(ram).matches(0xffff_fffc));

    let fabric = synthesize(&topology, &FabricConfig::default()).unwrap();
    assert!(fabric.warnings.is_empty());
}
