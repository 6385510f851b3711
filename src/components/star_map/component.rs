//! Leptos component wrapping the star map canvas.
//!
//! The component creates a full-viewport canvas and forwards DOM input
//! (mouse, wheel, Escape, window resize) into the [`StarMapState`] input
//! queue. A `requestAnimationFrame` loop drains the queue, advances viewport
//! animations and redraws. Selection changes flow back out through the
//! `selected` signal; writes to that signal from outside (search results, the
//! detail view's close button) are forwarded into the engine.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent, Window,
};

use super::config::StarMapConfig;
use super::curve::Point;
use super::interaction::SelectionEvent;
use super::render;
use super::state::{InputEvent, StarMapState};
use super::theme::Theme;
use super::types::Club;

type Callback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Engine state plus the visual theme it is drawn with.
struct MapContext {
	state: StarMapState,
	theme: Theme,
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Pointer position relative to the canvas.
fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<Point> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders the interactive star map on a full-viewport canvas.
///
/// `selected` holds the ordinal of the club shown in the detail view. The map
/// writes it on star or edge clicks and clears it on Escape; setting it from
/// outside selects (or deselects) that club on the map.
#[component]
pub fn StarMapCanvas(
	#[prop(into)] clubs: Signal<Vec<Club>>,
	#[prop(optional)] config: StarMapConfig,
	selected: RwSignal<Option<usize>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<MapContext>>> = Rc::new(RefCell::new(None));
	let animate: Callback = Rc::new(RefCell::new(None));
	let resize_cb: Callback = Rc::new(RefCell::new(None));
	let keydown_cb: Rc<RefCell<Option<Closure<dyn FnMut(KeyboardEvent)>>>> =
		Rc::new(RefCell::new(None));
	let has_moved = RwSignal::new(false);

	let push = {
		let context = context.clone();
		move |event: InputEvent| {
			if let Ok(mut guard) = context.try_borrow_mut() {
				if let Some(c) = guard.as_mut() {
					c.state.push(event);
				}
			}
		}
	};

	let (context_init, animate_init) = (context.clone(), animate.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let (w, h) = window_size(&window).unwrap_or((800.0, 600.0));
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::warn!("club-starmap: canvas 2d context unavailable");
			return;
		};

		let mut state = StarMapState::new(&config, clubs.get_untracked(), w, h);
		state.push(InputEvent::Resize {
			width: w,
			height: h,
		});
		*context_init.borrow_mut() = Some(MapContext {
			state,
			theme: Theme::default(),
		});

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
				return;
			};
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.state.push(InputEvent::Resize {
					width: nw,
					height: nh,
				});
			}
		}));
		if let Some(ref cb) = *resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let context_key = context_init.clone();
		*keydown_cb.borrow_mut() = Some(Closure::new(move |ev: KeyboardEvent| {
			if ev.key() == "Escape" {
				if let Some(ref mut c) = *context_key.borrow_mut() {
					c.state.push(InputEvent::Escape);
				}
			}
		}));
		if let Some(ref cb) = *keydown_cb.borrow() {
			let _ = window.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		let last_frame = Rc::new(Cell::new(js_sys::Date::now()));
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = now - last_frame.replace(now);

			let mut events = Vec::new();
			let mut moved = None;
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				events = c.state.frame(dt);
				moved = Some(c.state.viewport.has_moved());
				render::render(&c.state, &ctx, &c.theme);
			}
			// Signals are written after the borrow ends so effects can re-enter.
			if let Some(moved) = moved {
				if has_moved.get_untracked() != moved {
					has_moved.set(moved);
				}
			}
			for SelectionEvent::Changed(club) in events {
				selected.set(club);
			}

			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_clubs = context.clone();
	Effect::new(move |_| {
		let clubs = clubs.get();
		if let Ok(mut guard) = context_clubs.try_borrow_mut() {
			if let Some(c) = guard.as_mut() {
				c.state.scene.set_clubs(clubs);
			}
		}
	});

	// Forward outside selection writes that the engine does not already hold.
	let context_sel = context.clone();
	Effect::new(move |_| {
		let wanted = selected.get();
		let Ok(mut guard) = context_sel.try_borrow_mut() else {
			return;
		};
		let Some(c) = guard.as_mut() else {
			return;
		};
		if c.state.interaction.state().selected_club != wanted {
			c.state.push(match wanted {
				Some(ordinal) => InputEvent::SelectClub(ordinal),
				None => InputEvent::CloseDetail,
			});
		}
	});

	let push_md = push.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some(at) = local_point(canvas_ref, &ev) {
			push_md(InputEvent::PointerDown(at));
		}
	};

	let push_mm = push.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(at) = local_point(canvas_ref, &ev) {
			push_mm(InputEvent::PointerMove(at));
		}
	};

	let push_mu = push.clone();
	let on_mouseup = move |_: MouseEvent| push_mu(InputEvent::PointerUp);

	let push_ml = push.clone();
	let on_mouseleave = move |_: MouseEvent| push_ml(InputEvent::PointerLeave);

	let push_click = push.clone();
	let on_click = move |ev: MouseEvent| {
		if let Some(at) = local_point(canvas_ref, &ev) {
			push_click(InputEvent::Click(at));
		}
	};

	let push_wh = push.clone();
	let on_wheel = move |ev: WheelEvent| {
		let browser_zoom = ev.ctrl_key() || ev.meta_key();
		if !browser_zoom {
			ev.prevent_default();
		}
		push_wh(InputEvent::Wheel {
			delta_y: ev.delta_y(),
			browser_zoom,
		});
	};

	// Shown only while the view differs from its default.
	let push_reset = push;
	let on_reset = move |_: MouseEvent| push_reset(InputEvent::ResetView);

	view! {
		<div class="star-map">
			<canvas
				node_ref=canvas_ref
				class="star-map-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:click=on_click
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<button
				class="reset-view"
				style:display=move || if has_moved.get() { "block" } else { "none" }
				on:click=on_reset
			>
				"Reset View"
			</button>
		</div>
	}
}
