//! Hover and selection state and the emphasis rules derived from it.

use super::types::EdgeKey;

/// Hover and selection for one pattern web instance.
///
/// The three slots are independent: hovering never touches the selection and
/// vice versa. Only pointer events mutate them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
	/// Last clicked node.
	pub selected_node: Option<String>,
	/// Node under the pointer.
	pub hovered_node: Option<String>,
	/// Edge whose hit region is under the pointer.
	pub hovered_edge: Option<EdgeKey>,
}

/// Emitted when a node is clicked. Reported on every click, even when the
/// node was already selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeClicked(pub String);

impl InteractionState {
	/// Pointer entered node `id`.
	pub fn pointer_enter_node(&mut self, id: &str) {
		self.hovered_node = Some(id.to_owned());
	}

	/// Pointer left the hovered node.
	pub fn pointer_leave_node(&mut self) {
		self.hovered_node = None;
	}

	/// Pointer entered the hit region of `edge`.
	pub fn pointer_enter_edge(&mut self, edge: &EdgeKey) {
		self.hovered_edge = Some(edge.clone());
	}

	/// Pointer left the hovered edge.
	pub fn pointer_leave_edge(&mut self) {
		self.hovered_edge = None;
	}

	/// Selects `id`. Reselecting the current node leaves state untouched.
	pub fn click_node(&mut self, id: &str) -> NodeClicked {
		if self.selected_node.as_deref() != Some(id) {
			self.selected_node = Some(id.to_owned());
		}
		NodeClicked(id.to_owned())
	}

	/// Nothing hovered or selected.
	pub fn is_idle(&self) -> bool {
		self.selected_node.is_none() && self.hovered_node.is_none() && self.hovered_edge.is_none()
	}

	/// Whether `id` is the selected node.
	pub fn is_selected(&self, id: &str) -> bool {
		self.selected_node.as_deref() == Some(id)
	}

	/// Whether `id` is the hovered node.
	pub fn is_hovered(&self, id: &str) -> bool {
		self.hovered_node.as_deref() == Some(id)
	}

	/// An edge lights up when either endpoint is hovered or selected, or it is hovered itself.
	pub fn is_edge_emphasized(&self, edge: &EdgeKey) -> bool {
		self.hovered_node.as_deref().is_some_and(|id| edge.touches(id))
			|| self.selected_node.as_deref().is_some_and(|id| edge.touches(id))
			|| self.hovered_edge.as_ref() == Some(edge)
	}

	/// `highlight_edge_endpoints` also lights up both ends of the hovered edge.
	pub fn is_node_emphasized(&self, id: &str, highlight_edge_endpoints: bool) -> bool {
		self.is_selected(id)
			|| self.is_hovered(id)
			|| (highlight_edge_endpoints
				&& self.hovered_edge.as_ref().is_some_and(|edge| edge.touches(id)))
	}
}
