//! club-starmap: Interactive star map of clubs.
//!
//! This crate provides a WASM-based star map that places clubs on a seeded
//! star field, links related clubs with curved constellation edges, and
//! supports pan, zoom, hover tooltips and click-to-select.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

use components::chat::ClubChat;
use components::club_card::ClubCard;
use components::club_search::ClubSearch;
pub use components::star_map::{Club, StarMapCanvas, StarMapConfig};
use components::star_map::types::parse_clubs;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("club-starmap: logging initialized");
}

/// Parse the JSON text of the script element with the given id.
///
/// Returns `None` when the element is absent or its content is malformed.
fn load_script_json<T: DeserializeOwned>(id: &str) -> Option<T> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<T>(&json_text) {
		Ok(value) => Some(value),
		Err(e) => {
			warn!("club-starmap: failed to parse #{}: {}", id, e);
			None
		}
	}
}

/// Load club records from a script element with id="club-data".
/// Expected format: JSON array of club objects.
/// Malformed records are skipped one by one.
fn load_club_data() -> Option<Vec<Club>> {
	let records: Vec<serde_json::Value> = load_script_json("club-data")?;
	let total = records.len();
	let clubs = parse_clubs(records);
	if clubs.len() < total {
		warn!("club-starmap: {} of {} club records skipped", total - clubs.len(), total);
	}
	info!("club-starmap: loaded {} clubs", clubs.len());
	Some(clubs)
}

/// Load optional overrides from a script element with id="star-map-config".
fn load_config() -> Option<StarMapConfig> {
	load_script_json("star-map-config")
}

/// Main application component.
/// Loads clubs from the DOM and renders the star map with its panels.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let clubs = load_club_data().unwrap_or_default();
	let config = load_config().unwrap_or_default();
	let clubs = Signal::derive(move || clubs.clone());
	let selected = RwSignal::new(None::<usize>);

	let selected_club = Signal::derive(move || {
		selected
			.get()
			.and_then(|ordinal| clubs.with(|c| c.get(ordinal).cloned()))
	});
	// Chat picks that are not on the map.
	let picked = RwSignal::new(None::<Club>);
	let card_club = Signal::derive(move || selected_club.get().or_else(|| picked.get()));
	let on_close = Callback::new(move |_: ()| {
		selected.set(None);
		picked.set(None);
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Club Star Map" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-map">
			<StarMapCanvas clubs=clubs config=config selected=selected />
			<div class="map-overlay">
				<h1>"Club Star Map"</h1>
				<p class="subtitle">"Drag to pan. Scroll to zoom. Click a star to meet its club."</p>
			</div>
			<ClubSearch clubs=clubs selected=selected />
			<ClubChat clubs=clubs selected=selected picked=picked />
			<ClubCard club=card_club on_close=on_close />
		</div>
	}
}
