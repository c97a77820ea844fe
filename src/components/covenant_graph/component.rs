use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use log::warn;
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::render;
use super::state::{CovenantGraphState, Dimensions, Surface};
use super::tooltip::CovenantTooltip;
use super::types::Covenant;

/// Second measurement after mount, for containers whose size settles late.
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Out of flow, so the canvas never props its container open and every
/// measurement reflects the container alone.
const CANVAS_STYLE: &str = "position: absolute; inset: 0; display: block; cursor: pointer;";

#[derive(Clone, Copy)]
struct Sizing {
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
}

impl Sizing {
	/// Fixed props win per axis; otherwise the window when fullscreen, else the
	/// parent's client box.
	fn resolve(&self, window: Option<Dimensions>, parent: Option<Dimensions>) -> Option<Dimensions> {
		let measured = if self.fullscreen { window } else { parent };
		Some(Dimensions {
			width: self.width.or_else(|| measured.map(|d| d.width))?,
			height: self.height.or_else(|| measured.map(|d| d.height))?,
		})
	}
}

/// The canvas as a measurable surface.
struct CanvasSurface<'a> {
	canvas: &'a HtmlCanvasElement,
	sizing: Sizing,
}

impl Surface for CanvasSurface<'_> {
	fn measure(&self) -> Option<Dimensions> {
		let window = if self.sizing.fullscreen {
			web_sys::window().and_then(|w| {
				Some(Dimensions {
					width: w.inner_width().ok()?.as_f64()?,
					height: w.inner_height().ok()?.as_f64()?,
				})
			})
		} else {
			None
		};
		// Client box: excludes the parent's border, so the canvas fits inside it.
		let parent = self.canvas.parent_element().map(|p| Dimensions {
			width: p.client_width() as f64,
			height: p.client_height() as f64,
		});
		self.sizing.resolve(window, parent)
	}
}

fn pointer_position(canvas_ref: NodeRef<html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas = canvas_ref.get_untracked()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

#[component]
pub fn CovenantGraphCanvas(
	#[prop(into)] covenants: Signal<Vec<Covenant>>,
	#[prop(into, default = Signal::stored(None))] selected: Signal<Option<String>>,
	#[prop(optional)] on_select: Option<Callback<Option<Covenant>>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<html::Canvas>::new();
	let sizing = Sizing {
		fullscreen,
		width,
		height,
	};
	let state = Rc::new(RefCell::new(CovenantGraphState::new(
		covenants.get_untracked(),
		Dimensions::default(),
	)));
	let tooltip = RwSignal::new(None::<Covenant>);

	let redraw: Rc<dyn Fn()> = {
		let state = state.clone();
		Rc::new(move || {
			let Some(canvas) = canvas_ref.get_untracked() else {
				return;
			};
			let state = state.borrow();
			let drawn = render::context_2d(&canvas).and_then(|ctx| render::render(&state, &ctx));
			if let Err(err) = drawn {
				warn!("covenant graph redraw failed: {err}");
			}
			let hovered = state.hovered_node().map(|node| node.covenant.clone());
			if tooltip.with_untracked(|current| *current != hovered) {
				tooltip.set(hovered);
			}
		})
	};

	let remeasure: Rc<dyn Fn()> = {
		let (state, redraw) = (state.clone(), redraw.clone());
		Rc::new(move || {
			let Some(canvas) = canvas_ref.get_untracked() else {
				return;
			};
			let resized = state.borrow_mut().on_resize(&CanvasSurface {
				canvas: &canvas,
				sizing,
			});
			if resized {
				let size = state.borrow().dimensions();
				canvas.set_width(size.width as u32);
				canvas.set_height(size.height as u32);
				redraw();
			}
		})
	};

	// Mount: size the canvas to the starting dimensions, then measure for real.
	let (state_mount, remeasure_mount, redraw_mount) =
		(state.clone(), remeasure.clone(), redraw.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let size = state_mount.borrow().dimensions();
		canvas.set_width(size.width as u32);
		canvas.set_height(size.height as u32);
		remeasure_mount();
		redraw_mount();
	});

	let (state_data, redraw_data) = (state.clone(), redraw.clone());
	Effect::new(move |_| {
		let data = covenants.get();
		state_data.borrow_mut().set_covenants(data);
		redraw_data();
	});

	let (state_sel, redraw_sel) = (state.clone(), redraw.clone());
	Effect::new(move |_| {
		let id = selected.get();
		state_sel.borrow_mut().set_selected(id);
		redraw_sel();
	});

	let resize_listener = {
		let remeasure = remeasure.clone();
		window_event_listener(ev::resize, move |_| remeasure())
	};
	let settle_timer = set_timeout_with_handle(move || remeasure(), SETTLE_DELAY)
		.map_err(|err| warn!("could not schedule re-measurement: {err:?}"))
		.ok();
	on_cleanup(move || {
		resize_listener.remove();
		if let Some(timer) = settle_timer {
			timer.clear();
		}
	});

	let (state_mm, redraw_mm) = (state.clone(), redraw.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let changed = {
			let mut s = state_mm.borrow_mut();
			let hit = s.node_at_position(x, y).map(|node| node.id().to_owned());
			s.set_hover(hit.as_deref())
		};
		if changed {
			redraw_mm();
		}
	};

	let (state_ml, redraw_ml) = (state.clone(), redraw.clone());
	let on_mouseleave = move |_: MouseEvent| {
		if state_ml.borrow_mut().set_hover(None) {
			redraw_ml();
		}
	};

	let state_cl = state;
	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let request = {
			let s = state_cl.borrow();
			s.node_at_position(x, y).and_then(|node| s.activate(node.id()))
		};
		if let (Some(request), Some(on_select)) = (request, on_select) {
			on_select.run(request.into_selection());
		}
	};

	view! {
		<div class="covenant-graph" style="position: relative; width: 100%; height: 100%; min-height: 400px; overflow: hidden;">
			<canvas
				node_ref=canvas_ref
				class="covenant-graph-canvas"
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				on:click=on_click
				style=CANVAS_STYLE
			/>
			{move || tooltip.get().map(|covenant| view! { <CovenantTooltip covenant=covenant /> })}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	const PARENT: Dimensions = Dimensions {
		width: 648.0,
		height: 500.0,
	};

	fn sizing(fullscreen: bool, width: Option<f64>, height: Option<f64>) -> Sizing {
		Sizing {
			fullscreen,
			width,
			height,
		}
	}

	#[test]
	fn canvas_is_taken_out_of_flow() {
		assert!(CANVAS_STYLE.contains("position: absolute"));
		assert!(CANVAS_STYLE.contains("inset: 0"));
	}

	#[test]
	fn parent_box_sizes_the_graph() {
		let window = Dimensions {
			width: 1000.0,
			height: 800.0,
		};
		assert_eq!(sizing(false, None, None).resolve(Some(window), Some(PARENT)), Some(PARENT));
		assert_eq!(sizing(true, None, None).resolve(Some(window), Some(PARENT)), Some(window));
	}

	#[test]
	fn fixed_props_override_per_axis() {
		assert_eq!(
			sizing(false, Some(320.0), None).resolve(None, Some(PARENT)),
			Some(Dimensions {
				width: 320.0,
				height: 500.0,
			})
		);
		assert_eq!(sizing(false, None, Some(200.0)).resolve(None, None), None);
	}
}
