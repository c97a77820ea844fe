use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::state::CovenantGraphState;

const BACKGROUND: &str = "#0d0f13";
const NODE_FILL: &str = "#12151a";
const LABEL_COLOR: &str = "245, 243, 239";
const STATUS_DOT_RADIUS: f64 = 6.0;
const FOCUS_RING_GAP: f64 = 10.0;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
	#[error("canvas has no 2d context")]
	NoContext,
	#[error("canvas call failed: {0}")]
	Js(String),
}

impl From<JsValue> for RenderError {
	fn from(value: JsValue) -> Self {
		Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, RenderError> {
	canvas
		.get_context("2d")?
		.ok_or(RenderError::NoContext)?
		.dyn_into()
		.map_err(|_| RenderError::NoContext)
}

pub fn render(state: &CovenantGraphState, ctx: &CanvasRenderingContext2d) -> Result<(), RenderError> {
	let size = state.dimensions();
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, size.width, size.height);
	draw_edges(state, ctx)?;
	draw_nodes(state, ctx)
}

fn draw_edges(state: &CovenantGraphState, ctx: &CanvasRenderingContext2d) -> Result<(), RenderError> {
	let layout = state.layout();
	let dashed = js_sys::Array::of2(&JsValue::from_f64(4.0), &JsValue::from_f64(4.0));
	let solid = js_sys::Array::new();

	for edge in &layout.edges {
		// Both ends resolve by construction; a miss means a stale edge and is skipped.
		let (Some(from), Some(to)) = (layout.node(&edge.source), layout.node(&edge.target)) else {
			continue;
		};
		let (dx, dy) = (to.x - from.x, to.y - from.y);
		if (dx * dx + dy * dy).sqrt() < 0.001 {
			continue;
		}

		let (color, width, dash) = if state.is_edge_highlighted(edge) {
			("rgba(204, 167, 82, 0.8)", 2.0, &solid)
		} else {
			("rgba(58, 63, 74, 0.3)", 1.0, &dashed)
		};
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(width);
		ctx.set_line_dash(dash)?;
		ctx.begin_path();
		ctx.move_to(from.x, from.y);
		ctx.line_to(to.x, to.y);
		ctx.stroke();
	}
	ctx.set_line_dash(&solid)?;
	Ok(())
}

fn label_opacity(state: &CovenantGraphState, id: &str) -> f64 {
	if state.is_node_highlighted(id) { 1.0 } else { 0.7 }
}

fn draw_nodes(state: &CovenantGraphState, ctx: &CanvasRenderingContext2d) -> Result<(), RenderError> {
	for node in &state.layout().nodes {
		let (x, y, id) = (node.x, node.y, node.id());
		let color = node.covenant.status.color();

		if state.is_focused(id) {
			ctx.set_global_alpha(0.3);
			ctx.begin_path();
			ctx.arc(x, y, node.radius + FOCUS_RING_GAP, 0.0, 2.0 * PI)?;
			ctx.set_stroke_style_str(color);
			ctx.set_line_width(2.0);
			ctx.stroke();
			ctx.set_global_alpha(1.0);
		}

		ctx.begin_path();
		ctx.arc(x, y, node.radius, 0.0, 2.0 * PI)?;
		ctx.set_fill_style_str(NODE_FILL);
		ctx.fill();
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(if state.is_selected(id) { 3.0 } else { 2.0 });
		ctx.stroke();

		ctx.begin_path();
		ctx.arc(x, y, STATUS_DOT_RADIUS, 0.0, 2.0 * PI)?;
		ctx.set_fill_style_str(color);
		ctx.fill();

		ctx.set_fill_style_str(&format!("rgba({LABEL_COLOR}, {})", label_opacity(state, id)));
		ctx.set_font("500 11px sans-serif");
		ctx.set_text_align("center");
		ctx.fill_text(&node.covenant.name, x, y + node.radius + 18.0)?;
	}
	Ok(())
}
