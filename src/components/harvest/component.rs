//! Leptos component wrapping the harvest canvas.
//!
//! The component creates an HTML canvas element and wires up mouse, wheel
//! and keyboard handlers. Clicks on fruits and window resizes become session
//! inputs; dragging, panning and zooming stay view-local. An animation loop
//! runs via `requestAnimationFrame`, stepping the layout and drawing the
//! resulting frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent, Window,
};

use super::handle::HarvestHandle;
use super::render;
use super::scale::ScaleConfig;
use super::state::{CanvasState, DRAG_THRESHOLD};
use super::theme::Theme;
use crate::protocol::Input;

/// Canvas state plus visual configuration.
struct CanvasContext {
	state: CanvasState,
	scale: ScaleConfig,
	theme: Theme,
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn canvas_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.unwrap_or((800.0, 600.0))
}

/// Pointer position relative to the canvas.
fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders the harvest and feeds canvas interactions into the session.
///
/// The canvas sizes itself to its parent by default; set `fullscreen = true`
/// to fill the viewport. Either way, size changes are reported to the
/// session as [`Input::ViewportResized`].
#[component]
pub fn HarvestCanvas(
	/// Session to draw and to feed clicks into.
	handle: HarvestHandle,
	/// Colors for everything except the fruits themselves.
	#[prop(default = Theme::default())]
	theme: Theme,
	/// Fill the viewport instead of the parent element.
	#[prop(default = false)]
	fullscreen: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<CanvasContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			canvas_size(&canvas)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					warn!("harvest: 2d context has an unexpected type");
					return;
				}
			},
			_ => {
				warn!("harvest: canvas has no 2d context");
				return;
			}
		};

		*context_init.borrow_mut() = Some(CanvasContext {
			state: CanvasState::new(w, h),
			scale: ScaleConfig::default(),
			theme: theme.clone(),
		});
		handle.dispatch(Input::ViewportResized {
			width: w,
			height: h,
		});

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let size = if fullscreen {
				web_sys::window().and_then(|win| window_size(&win))
			} else {
				Some(canvas_size(&canvas_resize))
			};
			let Some((nw, nh)) = size else {
				return;
			};
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.state.resize(nw, nh);
			}
			handle.dispatch(Input::ViewportResized {
				width: nw,
				height: nh,
			});
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let dt = 0.016;
				if let Some(frame) = handle.advance(dt as f32) {
					c.state.frame = frame;
				}
				handle
					.highlighted
					.with_untracked(|targets| c.state.highlight.set_targets(targets));
				c.state.highlight.tick(dt);
				handle.with_graph(|graph| render::render(&c.state, graph, &ctx, &c.scale, &c.theme));
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			if let Some(vertex) = c.state.vertex_at_position(x, y, &c.scale) {
				let (nx, ny) = c.state.position_of(vertex).unwrap_or((0.0, 0.0));
				c.state.drag.active = true;
				c.state.drag.vertex = Some(vertex);
				c.state.drag.moved = false;
				c.state.drag.start_x = x;
				c.state.drag.start_y = y;
				c.state.drag.node_start_x = nx;
				c.state.drag.node_start_y = ny;
			} else {
				c.state.pan.active = true;
				c.state.pan.start_x = x;
				c.state.pan.start_y = y;
				c.state.pan.transform_start_x = c.state.transform.x;
				c.state.pan.transform_start_y = c.state.transform.y;
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.state.drag.active {
				let (sdx, sdy) = (x - c.state.drag.start_x, y - c.state.drag.start_y);
				if (sdx * sdx + sdy * sdy).sqrt() > DRAG_THRESHOLD {
					c.state.drag.moved = true;
				}
				if let (Some(vertex), true) = (c.state.drag.vertex, c.state.drag.moved) {
					let k = c.state.transform.k;
					handle.drag_vertex(
						vertex,
						c.state.drag.node_start_x + sdx / k,
						c.state.drag.node_start_y + sdy / k,
					);
				}
			} else if c.state.pan.active {
				c.state.transform.x = c.state.pan.transform_start_x + (x - c.state.pan.start_x);
				c.state.transform.y = c.state.pan.transform_start_y + (y - c.state.pan.start_y);
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = match *context_mu.borrow_mut() {
			Some(ref mut c) => {
				let clicked = c.state.drag.vertex.filter(|_| c.state.drag.active && !c.state.drag.moved);
				c.state.drag = Default::default();
				c.state.pan.active = false;
				clicked
			}
			None => None,
		};
		if let Some(vertex) = clicked {
			handle.dispatch(Input::VertexChosen(vertex));
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.drag = Default::default();
			c.state.pan.active = false;
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (c.state.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / c.state.transform.k;
			c.state.transform.x = x - (x - c.state.transform.x) * ratio;
			c.state.transform.y = y - (y - c.state.transform.y) * ratio;
			c.state.transform.k = new_k;
		}
	};

	let on_keydown = move |ev: KeyboardEvent| {
		if ev.key() == "Delete" || ev.key() == "Backspace" {
			ev.prevent_default();
			handle.dispatch(Input::DeleteSelectionRequested);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="harvest-canvas"
			tabindex="0"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			on:keydown=on_keydown
			style="display: block; cursor: grab;"
		/>
	}
}
