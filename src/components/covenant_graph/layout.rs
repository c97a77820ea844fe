use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use super::types::Covenant;

/// Share of the shorter container side used as the ring radius.
pub const LAYOUT_RADIUS_FACTOR: f64 = 0.35;

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub covenant: Covenant,
	pub x: f64,
	pub y: f64,
	pub radius: f64,
}

impl Node {
	pub fn id(&self) -> &str {
		&self.covenant.id
	}

	pub fn contains(&self, x: f64, y: f64) -> bool {
		let (dx, dy) = (self.x - x, self.y - y);
		(dx * dx + dy * dy).sqrt() <= self.radius
	}
}

/// Directed dependency, from the owning covenant to the one it references.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
	pub source: String,
	pub target: String,
}

impl Edge {
	pub fn touches(&self, id: &str) -> bool {
		self.source == id || self.target == id
	}
}

/// Positioned nodes and resolved edges for one container size.
///
/// Built fresh on every recomputation; hold ids, not nodes, across one.
#[derive(Clone, Debug, Default)]
pub struct GraphLayout {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
	index: HashMap<String, usize>,
}

impl GraphLayout {
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}
}

/// Place covenants evenly on a ring around the container center, first one on
/// top and the rest clockwise, and resolve their dependency edges.
pub fn compute_layout(covenants: &[Covenant], width: f64, height: f64) -> GraphLayout {
	if covenants.is_empty() {
		return GraphLayout::default();
	}

	let (cx, cy) = (width / 2.0, height / 2.0);
	let ring = width.min(height) * LAYOUT_RADIUS_FACTOR;
	let count = covenants.len() as f64;

	let mut index = HashMap::with_capacity(covenants.len());
	let nodes: Vec<Node> = covenants
		.iter()
		.enumerate()
		.map(|(i, covenant)| {
			// Duplicate ids resolve to the first occurrence.
			index.entry(covenant.id.clone()).or_insert(i);
			let angle = (i as f64 / count) * 2.0 * PI - PI / 2.0;
			Node {
				covenant: covenant.clone(),
				x: cx + angle.cos() * ring,
				y: cy + angle.sin() * ring,
				radius: covenant.materiality.node_radius(),
			}
		})
		.collect();

	let mut seen = HashSet::new();
	let mut edges = Vec::new();
	for covenant in covenants {
		for dep in &covenant.dependencies {
			if !index.contains_key(dep) {
				continue;
			}
			let edge = Edge {
				source: covenant.id.clone(),
				target: dep.clone(),
			};
			if seen.insert(edge.clone()) {
				edges.push(edge);
			}
		}
	}

	GraphLayout {
		nodes,
		edges,
		index,
	}
}
