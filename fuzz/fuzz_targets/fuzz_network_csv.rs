// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
#![no_main]

use libfuzzer_sys::fuzz_target;
use shipgraph::network::NetworkBuilder;
use shipgraph::table::{CsvOptions, Table};
use shipgraph::types::EdgeMode;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    let Ok(table) = Table::from_reader(Path::new("fuzz.csv"), data, CsvOptions::default()) else {
        return;
    };

    for mode in [EdgeMode::Contiguous, EdgeMode::Grouped] {
        if let Ok(network) = NetworkBuilder::new().edge_mode(mode).build(&table) {
            let total: u64 = network.links.iter().map(|l| l.value).sum();
            assert_eq!(total, network.rows as u64);
            let json = network.to_json(false).expect("network serializes");
            let _: serde_json::Value = serde_json::from_str(&json).expect("output is valid JSON");
        }
    }
});
