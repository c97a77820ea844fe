use std::collections::HashSet;

use log::{debug, trace};

use super::layout::{Edge, GraphLayout, Node, compute_layout};
use super::types::Covenant;

pub const DEFAULT_WIDTH: f64 = 800.0;
pub const DEFAULT_HEIGHT: f64 = 600.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
	pub width: f64,
	pub height: f64,
}

impl Default for Dimensions {
	fn default() -> Self {
		Self {
			width: DEFAULT_WIDTH,
			height: DEFAULT_HEIGHT,
		}
	}
}

impl Dimensions {
	/// A container that has not been laid out yet reports zero; such sizes would
	/// collapse the ring.
	pub fn is_measurable(&self) -> bool {
		self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
	}
}

/// Whatever the graph is drawn into, asked for its current size.
pub trait Surface {
	fn measure(&self) -> Option<Dimensions>;
}

/// Selection change the controller asks its owner to make.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionRequest {
	Select(Covenant),
	Clear,
}

impl SelectionRequest {
	pub fn into_selection(self) -> Option<Covenant> {
		match self {
			Self::Select(covenant) => Some(covenant),
			Self::Clear => None,
		}
	}
}

pub struct CovenantGraphState {
	dimensions: Dimensions,
	covenants: Vec<Covenant>,
	layout: GraphLayout,
	hovered: Option<String>,
	selected: Option<String>,
	highlighted: HashSet<String>,
}

impl CovenantGraphState {
	pub fn new(covenants: Vec<Covenant>, dimensions: Dimensions) -> Self {
		let mut state = Self {
			dimensions,
			covenants,
			layout: GraphLayout::default(),
			hovered: None,
			selected: None,
			highlighted: HashSet::new(),
		};
		state.recompute();
		state
	}

	pub fn dimensions(&self) -> Dimensions {
		self.dimensions
	}

	pub fn layout(&self) -> &GraphLayout {
		&self.layout
	}

	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	pub fn selected(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	pub fn set_covenants(&mut self, covenants: Vec<Covenant>) {
		self.covenants = covenants;
		self.recompute();
	}

	/// Re-measure the surface. Returns whether the layout was recomputed.
	pub fn on_resize(&mut self, surface: &impl Surface) -> bool {
		let Some(measured) = surface.measure() else {
			trace!("surface size unavailable, keeping {:?}", self.dimensions);
			return false;
		};
		if !measured.is_measurable() {
			trace!("ignoring unusable surface size {measured:?}");
			return false;
		}
		if measured == self.dimensions {
			return false;
		}
		self.dimensions = measured;
		self.recompute();
		true
	}

	pub fn on_pointer_enter(&mut self, id: &str) {
		if self.layout.node(id).is_none() {
			return;
		}
		self.hovered = Some(id.to_owned());
		self.refresh_highlight();
	}

	pub fn on_pointer_leave(&mut self) {
		self.hovered = None;
		self.refresh_highlight();
	}

	/// Pointer-move form of enter/leave. Returns whether the hover changed.
	pub fn set_hover(&mut self, id: Option<&str>) -> bool {
		if self.hovered.as_deref() == id {
			return false;
		}
		match id {
			Some(id) => self.on_pointer_enter(id),
			None => self.on_pointer_leave(),
		}
		self.hovered.as_deref() == id
	}

	/// Mirror the selection owned by the caller.
	pub fn set_selected(&mut self, id: Option<String>) {
		if self.selected == id {
			return;
		}
		self.selected = id;
		self.refresh_highlight();
	}

	/// Toggle rule for a click on `id`. Unknown ids are ignored; the selection
	/// itself only changes once the owner feeds it back through `set_selected`.
	pub fn activate(&self, id: &str) -> Option<SelectionRequest> {
		let node = self.layout.node(id)?;
		if self.selected.as_deref() == Some(id) {
			Some(SelectionRequest::Clear)
		} else {
			Some(SelectionRequest::Select(node.covenant.clone()))
		}
	}

	pub fn is_focused(&self, id: &str) -> bool {
		self.hovered() == Some(id) || self.is_selected(id)
	}

	pub fn is_selected(&self, id: &str) -> bool {
		self.selected() == Some(id)
	}

	pub fn is_node_highlighted(&self, id: &str) -> bool {
		self.highlighted.contains(id)
	}

	pub fn is_edge_highlighted(&self, edge: &Edge) -> bool {
		self.focus().any(|id| edge.touches(id))
	}

	/// Node behind the tooltip, if the hovered covenant still exists.
	pub fn hovered_node(&self) -> Option<&Node> {
		self.layout.node(self.hovered.as_deref()?)
	}

	/// Topmost node under the point; later nodes are drawn over earlier ones.
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<&Node> {
		self.layout.nodes.iter().rev().find(|node| node.contains(x, y))
	}

	fn focus(&self) -> impl Iterator<Item = &str> {
		self.hovered.as_deref().into_iter().chain(self.selected.as_deref())
	}

	fn recompute(&mut self) {
		self.layout = compute_layout(
			&self.covenants,
			self.dimensions.width,
			self.dimensions.height,
		);
		debug!(
			"layout: {} nodes, {} edges at {}x{}",
			self.layout.nodes.len(),
			self.layout.edges.len(),
			self.dimensions.width,
			self.dimensions.height
		);
		self.refresh_highlight();
	}

	fn refresh_highlight(&mut self) {
		let mut highlighted = HashSet::new();
		for id in self.focus() {
			if self.layout.node(id).is_none() {
				continue;
			}
			highlighted.insert(id.to_owned());
			for edge in &self.layout.edges {
				if edge.source == id {
					highlighted.insert(edge.target.clone());
				} else if edge.target == id {
					highlighted.insert(edge.source.clone());
				}
			}
		}
		self.highlighted = highlighted;
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use pretty_assertions::assert_eq;

	use super::*;

	struct FakeSurface(Cell<Option<Dimensions>>);

	impl FakeSurface {
		fn sized(width: f64, height: f64) -> Self {
			Self(Cell::new(Some(Dimensions { width, height })))
		}
	}

	impl Surface for FakeSurface {
		fn measure(&self) -> Option<Dimensions> {
			self.0.get()
		}
	}

	fn covenants() -> Vec<Covenant> {
		vec![
			Covenant::fixture("A", &["B"]),
			Covenant::fixture("B", &[]),
			Covenant::fixture("C", &["Z"]),
		]
	}

	fn state() -> CovenantGraphState {
		CovenantGraphState::new(covenants(), Dimensions::default())
	}

	/// Feed a request back the way the owning page does.
	fn apply(state: &mut CovenantGraphState, request: Option<SelectionRequest>) {
		if let Some(request) = request {
			state.set_selected(request.into_selection().map(|c| c.id));
		}
	}

	#[test]
	fn starts_at_default_dimensions() {
		let state = state();
		assert_eq!(state.dimensions(), Dimensions { width: 800.0, height: 600.0 });
		assert_eq!(state.layout().nodes.len(), 3);
	}

	#[test]
	fn activating_twice_clears_the_selection() {
		let mut state = state();

		let request = state.activate("A");
		assert_eq!(request, Some(SelectionRequest::Select(covenants()[0].clone())));
		apply(&mut state, request);
		assert_eq!(state.selected(), Some("A"));

		let request = state.activate("A");
		assert_eq!(request, Some(SelectionRequest::Clear));
		apply(&mut state, request);
		assert_eq!(state.selected(), None);
	}

	#[test]
	fn activating_another_node_moves_the_selection() {
		let mut state = state();
		let request = state.activate("A");
		apply(&mut state, request);
		let request = state.activate("B");
		apply(&mut state, request);
		assert_eq!(state.selected(), Some("B"));
	}

	#[test]
	fn activate_does_not_touch_selection_by_itself() {
		let state = state();
		assert!(state.activate("A").is_some());
		assert_eq!(state.selected(), None);
	}

	#[test]
	fn activating_an_unknown_id_is_a_no_op() {
		let mut state = state();
		state.set_selected(Some("A".into()));
		assert_eq!(state.activate("Z"), None);
		assert_eq!(state.selected(), Some("A"));
	}

	#[test]
	fn zero_sized_measurement_is_ignored() {
		let mut state = state();
		let before = state.layout().nodes.clone();

		assert!(!state.on_resize(&FakeSurface::sized(0.0, 0.0)));
		assert!(!state.on_resize(&FakeSurface::sized(1024.0, 0.0)));
		assert!(!state.on_resize(&FakeSurface(Cell::new(None))));

		assert_eq!(state.dimensions(), Dimensions::default());
		assert_eq!(state.layout().nodes, before);
	}

	#[test]
	fn resize_recomputes_only_on_change() {
		let mut state = state();
		let surface = FakeSurface::sized(600.0, 600.0);

		assert!(state.on_resize(&surface));
		assert!(!state.on_resize(&surface));

		let a = state.layout().node("A").expect("A is laid out");
		assert!((a.x - 300.0).abs() < 1e-9);
		assert!((a.y - 90.0).abs() < 1e-9);
	}

	#[test]
	fn hover_and_selection_neighborhoods_are_highlighted() {
		let mut state = state();
		state.set_selected(Some("A".into()));
		state.on_pointer_enter("B");

		let edge = &state.layout().edges[0];
		assert!(state.is_edge_highlighted(edge));
		assert!(state.is_node_highlighted("A"));
		assert!(state.is_node_highlighted("B"));
		assert!(!state.is_node_highlighted("C"));
		assert!(state.is_focused("A"));
		assert!(state.is_focused("B"));
		assert!(!state.is_focused("C"));
	}

	#[test]
	fn hovering_alone_highlights_neighbors() {
		let mut state = state();
		state.on_pointer_enter("B");

		assert!(state.is_node_highlighted("A"));
		assert!(!state.is_node_highlighted("C"));
		assert!(state.is_focused("B"));
		assert!(!state.is_focused("A"));
	}

	#[test]
	fn hover_and_selection_are_independent() {
		let mut state = state();
		state.on_pointer_enter("C");
		state.set_selected(Some("A".into()));
		state.on_pointer_leave();

		assert_eq!(state.hovered(), None);
		assert_eq!(state.selected(), Some("A"));
		assert!(state.is_node_highlighted("A"));
		assert!(state.is_node_highlighted("B"));
	}

	#[test]
	fn rapid_enter_leave_keeps_last_write() {
		let mut state = state();
		state.on_pointer_enter("A");
		state.on_pointer_leave();
		state.on_pointer_enter("C");
		state.on_pointer_leave();
		state.on_pointer_enter("B");

		assert_eq!(state.hovered(), Some("B"));
		assert!(!state.set_hover(Some("B")));
		assert!(state.set_hover(None));
		assert!(["A", "B", "C"].iter().all(|id| !state.is_node_highlighted(id)));
	}

	#[test]
	fn hovering_an_unknown_id_is_ignored() {
		let mut state = state();
		state.on_pointer_enter("A");
		assert!(!state.set_hover(Some("Z")));
		assert_eq!(state.hovered(), Some("A"));
	}

	#[test]
	fn removed_covenant_drops_out_of_lookups() {
		let mut state = state();
		state.on_pointer_enter("C");
		assert_eq!(state.hovered_node().map(Node::id), Some("C"));

		state.set_covenants(covenants().into_iter().take(2).collect());

		assert_eq!(state.hovered(), Some("C"));
		assert!(state.hovered_node().is_none());
		assert!(!state.is_node_highlighted("C"));
		assert_eq!(state.layout().nodes.len(), 2);
	}

	#[test]
	fn removed_selection_highlights_nothing() {
		let mut state = state();
		state.set_selected(Some("C".into()));
		assert!(state.is_node_highlighted("C"));

		state.set_covenants(covenants().into_iter().take(2).collect());

		assert_eq!(state.selected(), Some("C"));
		assert!(["A", "B", "C"].iter().all(|id| !state.is_node_highlighted(id)));
		assert!(state.layout().edges.iter().all(|e| !state.is_edge_highlighted(e)));
		assert_eq!(state.activate("C"), None);
	}

	#[test]
	fn data_change_keeps_measured_dimensions() {
		let mut state = state();
		state.on_resize(&FakeSurface::sized(400.0, 300.0));
		state.set_covenants(vec![Covenant::fixture("solo", &[])]);

		let solo = state.layout().node("solo").expect("solo is laid out");
		assert!((solo.x - 200.0).abs() < 1e-9);
		assert!((solo.y - (150.0 - 105.0)).abs() < 1e-9);
	}

	#[test]
	fn hit_test_finds_the_node_under_the_pointer() {
		let state = state();
		let b = state.layout().node("B").expect("B is laid out").clone();

		assert_eq!(state.node_at_position(b.x + 5.0, b.y - 5.0).map(Node::id), Some("B"));
		assert!(state.node_at_position(400.0, 300.0).is_none());
	}
}
