//! harvest: interactive graph authoring on top of a force-directed layout.
//!
//! Text selected on the page becomes tags on fruits (vertices); vines
//! (edges) connect fruits and are edited through a small picker. The model,
//! controller and layout bridge are plain Rust and run anywhere; the
//! [`components`] module wires them into a Leptos CSR page.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, MouseEvent, Window};

#[cfg(target_arch = "wasm32")]
use getrandom as _;

pub mod components;
pub mod config;
pub mod controller;
pub mod layout;
pub mod model;
pub mod protocol;
pub mod session;

pub use components::harvest::{
	EdgePicker, HarvestCanvas, HarvestHandle, Theme, VertexPicker, current_selection,
};
pub use config::{HarvestConfig, SimulationConfig};
pub use controller::{Mode, SelectionController};
pub use layout::{ForceSimulation, Frame, LayoutBridge, Simulation};
pub use model::{Graph, PersistError};
pub use protocol::{Input, Instruction};
pub use session::GraphSession;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("harvest: logging initialized");
}

/// Text content of the script element with the given id.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load settings from `<script id="harvest-config">`, falling back to defaults.
fn load_config() -> HarvestConfig {
	let Some(json) = script_text("harvest-config") else {
		return HarvestConfig::default();
	};
	match HarvestConfig::from_json(&json) {
		Ok(config) => config,
		Err(e) => {
			warn!("harvest: failed to parse config, using defaults: {}", e);
			HarvestConfig::default()
		}
	}
}

/// Main application component.
/// Restores any saved graph from the DOM and renders the editor.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let saved = script_text("harvest-state");
	let handle = HarvestHandle::new(GraphSession::load_or_empty(
		saved.as_deref(),
		&config,
		800.0,
		600.0,
	));
	let theme = Theme::by_name(&config.theme).unwrap_or_else(|| {
		warn!("harvest: unknown theme {:?}, using default", config.theme);
		Theme::default()
	});

	let on_new_fruit = move |_: MouseEvent| {
		handle.dispatch(Input::CreateVertexRequested(current_selection()))
	};
	let on_new_vine = move |_: MouseEvent| handle.dispatch(Input::CreateEdgeRequested);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Harvest" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="harvest-layout">
			<div id="farm" contenteditable="true" class="farm"></div>
			<div class="toolbar">
				<button id="btn_vertex" on:mouseup=on_new_fruit>"New fruit"</button>
				<button id="btn_edge" on:mouseup=on_new_vine>"New vine"</button>
			</div>
			<VertexPicker handle=handle />
			<EdgePicker handle=handle />
			<div id="harvest" class="harvest">
				<HarvestCanvas handle=handle theme=theme />
			</div>
		</div>
	}
}
