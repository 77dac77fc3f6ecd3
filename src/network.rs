// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Company trade network built from shipment rows
//!
//! Each input row is one shipment from the company in the source column to
//! the company in the target column. The network holds one node per
//! company, links between them and per-company export/import tallies.

use crate::error::Result;
use crate::table::Table;
use crate::types::{EdgeMode, Link, Node, NodeCount};
use petgraph::algo::connected_components;
use petgraph::graph::DiGraph;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// Builder settings for a [`ShipmentNetwork`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkBuilder {
    source_column: usize,
    target_column: usize,
    edge_mode: EdgeMode,
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkBuilder {
    /// Source in column 0, target in column 1, contiguous runs
    #[must_use]
    pub fn new() -> Self {
        Self {
            source_column: 0,
            target_column: 1,
            edge_mode: EdgeMode::Contiguous,
        }
    }

    /// Set the exporter and importer columns
    #[must_use]
    pub fn columns(mut self, source: usize, target: usize) -> Self {
        self.source_column = source;
        self.target_column = target;
        self
    }

    /// Set how repeated pairs are folded into links
    #[must_use]
    pub fn edge_mode(mut self, mode: EdgeMode) -> Self {
        self.edge_mode = mode;
        self
    }

    /// Build the network from a loaded table
    pub fn build(&self, table: &Table) -> Result<ShipmentNetwork> {
        let mut pairs = Vec::with_capacity(table.len());
        for row in 0..table.len() {
            pairs.push((
                table.field(row, self.source_column)?,
                table.field(row, self.target_column)?,
            ));
        }

        let network = ShipmentNetwork::from_pairs(&pairs, self.edge_mode);
        info!(
            "Built network from {}: {} nodes, {} links",
            table.path().display(),
            network.nodes.len(),
            network.links.len()
        );
        Ok(network)
    }
}

/// Interning table from company name to node index
struct NodeIndex<'a> {
    lookup: HashMap<&'a str, usize>,
    nodes: Vec<Node>,
}

impl<'a> NodeIndex<'a> {
    fn new() -> Self {
        Self {
            lookup: HashMap::new(),
            nodes: Vec::new(),
        }
    }

    fn intern(&mut self, name: &'a str) -> usize {
        if let Some(&idx) = self.lookup.get(name) {
            return idx;
        }
        let idx = self.nodes.len();
        self.lookup.insert(name, idx);
        self.nodes.push(Node {
            name: name.to_string(),
            index: idx,
        });
        idx
    }

    fn get(&self, name: &str) -> usize {
        self.lookup[name]
    }
}

/// The trade network document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShipmentNetwork {
    /// Companies, indexed in first-encounter order
    pub nodes: Vec<Node>,
    /// Aggregated shipments between companies
    pub links: Vec<Link>,
    /// Rows per company as exporter, in node order
    pub exports: Vec<NodeCount>,
    /// Rows per company as importer, in node order
    pub imports: Vec<NodeCount>,
    /// Number of shipment rows folded in
    #[serde(skip)]
    pub rows: usize,
}

impl ShipmentNetwork {
    /// Build a network from (source, target) pairs in file order
    ///
    /// Source names are indexed first so their indices follow the source
    /// column alone; names seen only as targets are appended afterwards.
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &str)], mode: EdgeMode) -> Self {
        let mut index = NodeIndex::new();
        for &(source, _) in pairs {
            index.intern(source);
        }
        let source_nodes = index.nodes.len();
        for &(_, target) in pairs {
            index.intern(target);
        }
        debug!(
            "Indexed {} source companies, {} target-only",
            source_nodes,
            index.nodes.len() - source_nodes
        );

        let mut exported = vec![0u64; index.nodes.len()];
        let mut imported = vec![0u64; index.nodes.len()];
        let resolved: Vec<(usize, usize)> = pairs
            .iter()
            .map(|&(s, t)| (index.get(s), index.get(t)))
            .collect();
        for &(s, t) in &resolved {
            exported[s] += 1;
            imported[t] += 1;
        }

        let links = match mode {
            EdgeMode::Contiguous => contiguous_links(&resolved),
            EdgeMode::Grouped => grouped_links(&resolved),
        };

        let tally = |counts: Vec<u64>| -> Vec<NodeCount> {
            index
                .nodes
                .iter()
                .zip(counts)
                .map(|(node, count)| NodeCount {
                    name: node.name.clone(),
                    count,
                })
                .collect()
        };
        let exports = tally(exported);
        let imports = tally(imported);

        Self {
            nodes: index.nodes,
            links,
            exports,
            imports,
            rows: pairs.len(),
        }
    }

    /// Get node count
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get link count
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Check if the network is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find a node by company name
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Export tally for a company, zero if unknown
    #[must_use]
    pub fn exports_of(&self, name: &str) -> u64 {
        count_of(&self.exports, name)
    }

    /// Import tally for a company, zero if unknown
    #[must_use]
    pub fn imports_of(&self, name: &str) -> u64 {
        count_of(&self.imports, name)
    }

    /// Directed petgraph view, one edge per link weighted by its value
    #[must_use]
    pub fn to_graph(&self) -> DiGraph<&str, u64> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.links.len());
        let indices: Vec<_> = self
            .nodes
            .iter()
            .map(|n| graph.add_node(n.name.as_str()))
            .collect();
        for link in &self.links {
            graph.add_edge(indices[link.source], indices[link.target], link.value);
        }
        graph
    }

    /// Number of weakly connected trading clusters
    #[must_use]
    pub fn component_count(&self) -> usize {
        connected_components(&self.to_graph())
    }

    /// Export to DOT format for Graphviz
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph shipments {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box, style=rounded];\n\n");

        for node in &self.nodes {
            dot.push_str(&format!(
                "  n{} [label=\"{}\"];\n",
                node.index,
                escape_dot(&node.name)
            ));
        }

        dot.push('\n');

        for link in &self.links {
            dot.push_str(&format!(
                "  n{} -> n{} [label=\"{}\"];\n",
                link.source, link.target, link.value
            ));
        }

        dot.push_str("}\n");
        dot
    }

    /// Export to JSON
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

fn count_of(counts: &[NodeCount], name: &str) -> u64 {
    counts
        .iter()
        .find(|c| c.name == name)
        .map_or(0, |c| c.count)
}

fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// One link per maximal run of identical consecutive pairs
fn contiguous_links(pairs: &[(usize, usize)]) -> Vec<Link> {
    let mut links: Vec<Link> = Vec::new();
    for &(source, target) in pairs {
        match links.last_mut() {
            Some(last) if last.source == source && last.target == target => last.value += 1,
            _ => links.push(Link {
                source,
                target,
                value: 1,
            }),
        }
    }
    links
}

/// One link per distinct pair, ordered by first occurrence
fn grouped_links(pairs: &[(usize, usize)]) -> Vec<Link> {
    let mut position: HashMap<(usize, usize), usize> = HashMap::new();
    let mut links: Vec<Link> = Vec::new();
    for &(source, target) in pairs {
        let slot = *position.entry((source, target)).or_insert_with(|| {
            links.push(Link {
                source,
                target,
                value: 0,
            });
            links.len() - 1
        });
        links[slot].value += 1;
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CsvOptions;
    use std::path::Path;

    fn load(data: &str) -> Table {
        Table::from_reader(Path::new("shipments.csv"), data.as_bytes(), CsvOptions::default())
            .unwrap()
    }

    const SHIPMENTS: &str = "\
ACME PLATING,US ECOLOGY
ACME PLATING,US ECOLOGY
ACME PLATING,CLEAN HARBORS
ACME PLATING,US ECOLOGY
BAJA METALS,US ECOLOGY
";

    #[test]
    fn test_nodes_in_first_encounter_order() {
        let network = NetworkBuilder::new().build(&load(SHIPMENTS)).unwrap();

        let names: Vec<_> = network.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(
            names,
            ["ACME PLATING", "BAJA METALS", "US ECOLOGY", "CLEAN HARBORS"]
        );
        for (i, node) in network.nodes.iter().enumerate() {
            assert_eq!(node.index, i);
        }
    }

    #[test]
    fn test_contiguous_runs_are_not_grouped() {
        let network = NetworkBuilder::new().build(&load(SHIPMENTS)).unwrap();

        assert_eq!(
            network.links,
            vec![
                Link { source: 0, target: 2, value: 2 },
                Link { source: 0, target: 3, value: 1 },
                Link { source: 0, target: 2, value: 1 },
                Link { source: 1, target: 2, value: 1 },
            ]
        );
    }

    #[test]
    fn test_trailing_run_is_flushed() {
        let network = NetworkBuilder::new()
            .build(&load("A,B\nC,D\nC,D\nC,D\n"))
            .unwrap();

        assert_eq!(network.links.last().unwrap().value, 3);
        let total: u64 = network.links.iter().map(|l| l.value).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_grouped_mode_merges_every_repeat() {
        let network = NetworkBuilder::new()
            .edge_mode(EdgeMode::Grouped)
            .build(&load(SHIPMENTS))
            .unwrap();

        assert_eq!(network.link_count(), 3);
        assert_eq!(network.links[0], Link { source: 0, target: 2, value: 3 });
    }

    #[test]
    fn test_export_import_counts() {
        let network = NetworkBuilder::new().build(&load(SHIPMENTS)).unwrap();

        assert_eq!(network.exports_of("ACME PLATING"), 4);
        assert_eq!(network.exports_of("US ECOLOGY"), 0);
        assert_eq!(network.imports_of("US ECOLOGY"), 4);
        assert_eq!(network.imports_of("CLEAN HARBORS"), 1);
        assert_eq!(network.exports.len(), network.nodes.len());
    }

    #[test]
    fn test_custom_columns() {
        let network = NetworkBuilder::new()
            .columns(2, 0)
            .build(&load("X,unused,Y\n"))
            .unwrap();

        assert_eq!(network.nodes[0].name, "Y");
        assert_eq!(network.links[0], Link { source: 0, target: 1, value: 1 });
    }

    #[test]
    fn test_short_row_fails() {
        let err = NetworkBuilder::new().build(&load("A,B\nC\n")).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_json_document_shape() {
        let network = NetworkBuilder::new().build(&load("A,B\n")).unwrap();
        let json = network.to_json(false).unwrap();

        assert_eq!(
            json,
            r#"{"nodes":[{"name":"A","index":0},{"name":"B","index":1}],"links":[{"source":0,"target":1,"value":1}],"exports":[{"A":1},{"B":0}],"imports":[{"A":0},{"B":1}]}"#
        );
    }

    #[test]
    fn test_to_dot() {
        let network = NetworkBuilder::new().build(&load("\"A \"\"X\"\"\",B\n")).unwrap();
        let dot = network.to_dot();

        assert!(dot.contains("digraph shipments"));
        assert!(dot.contains(r#"n0 [label="A \"X\""];"#));
        assert!(dot.contains(r#"n0 -> n1 [label="1"];"#));
    }

    #[test]
    fn test_component_count() {
        let network = NetworkBuilder::new()
            .build(&load("A,B\nB,C\nD,E\n"))
            .unwrap();
        assert_eq!(network.component_count(), 2);
    }

    #[test]
    fn test_empty_table() {
        let network = NetworkBuilder::new().build(&load("")).unwrap();
        assert!(network.is_empty());
        assert_eq!(network.component_count(), 0);
    }
}
