use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::error::CanvasError;
use super::render;
use super::state::PatternWebState;
use super::types::{Pattern, PatternWebOptions, Point};

const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);
const MAX_FRAME_SECS: f64 = 0.1;

/// Circular node-link view of `patterns` drawn on a canvas that fills its parent.
///
/// Hovering a node or edge emphasizes it and its connections; clicking a node
/// selects it and reports its id through `on_node_click`.
#[component]
pub fn PatternWeb(
	/// Nodes and their outgoing links, in layout order.
	#[prop(into)]
	patterns: Signal<Vec<Pattern>>,
	/// Called with the node id on every node click.
	#[prop(optional, into)]
	on_node_click: Option<Callback<String>>,
	/// Edge style, arrowheads and emphasis policy.
	#[prop(optional)]
	options: PatternWebOptions,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<PatternWebState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let patterns = patterns.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = measure(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		{
			let mut slot = state_init.borrow_mut();
			match slot.as_mut() {
				Some(s) => s.update(patterns, w, h),
				None => *slot = Some(PatternWebState::new(patterns, options, w, h)),
			}
		}

		// Listeners and the frame loop only need wiring once.
		if animate_init.borrow().is_some() {
			return;
		}
		if let Err(err) = start(
			&canvas,
			state_init.clone(),
			animate_init.clone(),
			resize_cb_init.clone(),
		) {
			error!("pattern web disabled: {err}");
		}
	});

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let p = pointer_position(&canvas, &ev);

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.pointer_move(p) {
				set_cursor(&canvas, s.cursor());
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_leave();
		}
		if let Some(canvas) = canvas_ref.get() {
			set_cursor(&canvas, "default");
		}
	};

	let state_cl = state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let p = pointer_position(&canvas, &ev);

		let clicked = state_cl
			.borrow_mut()
			.as_mut()
			.and_then(|s| s.click(p));
		if let Some(clicked) = clicked {
			info!("pattern {:?} clicked", clicked.0);
			if let Some(cb) = on_node_click {
				cb.run(clicked.0);
			}
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="pattern-web-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			on:click=on_click
			style="display: block; cursor: default;"
		/>
	}
}

/// Hooks up the window resize listener and the animation frame loop.
fn start(
	canvas: &HtmlCanvasElement,
	state: Rc<RefCell<Option<PatternWebState>>>,
	animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
) -> Result<(), CanvasError> {
	let window: Window = web_sys::window().ok_or(CanvasError::NoWindow)?;
	let ctx = context_2d(canvas)?;

	let (state_resize, canvas_resize) = (state.clone(), canvas.clone());
	*resize_cb.borrow_mut() = Some(Closure::new(move || {
		let (nw, nh) = measure(&canvas_resize);
		canvas_resize.set_width(nw as u32);
		canvas_resize.set_height(nh as u32);
		if let Some(ref mut s) = *state_resize.borrow_mut() {
			s.resize(nw, nh);
		}
	}));
	if let Some(ref cb) = *resize_cb.borrow() {
		window
			.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
			.map_err(|e| CanvasError::Listener {
				event: "resize",
				reason: format!("{e:?}"),
			})?;
	}

	let last_frame = Rc::new(Cell::new(js_sys::Date::now()));
	let (state_anim, animate_inner) = (state, animate.clone());
	*animate.borrow_mut() = Some(Closure::new(move || {
		let now = js_sys::Date::now();
		let dt = ((now - last_frame.replace(now)) / 1000.0).clamp(0.0, MAX_FRAME_SECS);
		if let Some(ref mut s) = *state_anim.borrow_mut() {
			s.tick(dt);
			render::render(s, &ctx);
		}
		if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
			let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	}));
	if let Some(ref cb) = *animate.borrow() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
	Ok(())
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, CanvasError> {
	canvas
		.get_context("2d")
		.map_err(|e| CanvasError::ContextLookup(format!("{e:?}")))?
		.ok_or(CanvasError::NoContext)?
		.dyn_into()
		.map_err(|_| CanvasError::WrongContextType)
}

/// Size of the containing element; the canvas always fills its parent.
fn measure(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.unwrap_or(FALLBACK_SIZE)
}

fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Point {
	let rect = canvas.get_bounding_client_rect();
	Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn set_cursor(canvas: &HtmlCanvasElement, cursor: &str) {
	// `ElementExt::style` from the leptos prelude shadows the web-sys getter.
	let _ = web_sys::HtmlElement::style(canvas).set_property("cursor", cursor);
}
