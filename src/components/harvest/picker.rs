//! Picker panels for the selected fruit or vine.

use leptos::prelude::*;
use web_sys::MouseEvent;

use super::handle::{EdgePickerView, HarvestHandle, VertexPickerView, current_selection};
use crate::model::EndpointSlot;
use crate::protocol::Input;

/// One button per attribute of the selected vertex, then an append slot.
///
/// Releasing the pointer on a slot replaces it with the current text
/// selection; the append slot adds a new tag.
#[component]
pub fn VertexPicker(
	/// Session whose selected vertex is shown.
	handle: HarvestHandle,
) -> impl IntoView {
	move || {
		handle.vertex_picker.get().map(|picker| {
			let VertexPickerView {
				vertex,
				labels,
				append_slot,
				background,
				border,
			} = picker;
			let style = format!("background: {}; border: 1px solid {};", background, border);
			let slots = labels
				.into_iter()
				.enumerate()
				.map(|(index, label)| {
					let on_mouseup = move |_: MouseEvent| {
						handle.dispatch(Input::AttributeClicked {
							vertex,
							index: index as isize,
							selection: current_selection(),
						})
					};
					view! {
						<button class="tag" style=style.clone() on:mouseup=on_mouseup>
							{label}
						</button>
					}
				})
				.collect_view();
			view! {
				<div id="fruit_picker" class="picker">
					{slots}
					<button
						class="tag append"
						style=style
						on:mouseup=move |_| {
							handle.dispatch(Input::AttributeClicked {
								vertex,
								index: -1,
								selection: current_selection(),
							})
						}
					>
						{append_slot}
					</button>
				</div>
			}
		})
	}
}

/// From-end, direction toggle and to-end of the selected vine.
///
/// Clicking an end arms it; the next fruit clicked on the canvas fills it.
#[component]
pub fn EdgePicker(
	/// Session whose selected edge is shown.
	handle: HarvestHandle,
) -> impl IntoView {
	move || {
		handle.edge_picker.get().map(|picker| {
			let EdgePickerView {
				from_label,
				direction_glyph,
				to_label,
				armed,
			} = picker;
			let slot_class = move |slot: EndpointSlot| {
				if armed == Some(slot) {
					"end armed"
				} else {
					"end"
				}
			};
			view! {
				<div id="vine_picker" class="picker">
					<button
						class=slot_class(EndpointSlot::From)
						on:mouseup=move |_| handle.dispatch(Input::EndpointSlotClicked(EndpointSlot::From))
					>
						{from_label}
					</button>
					<button
						class="direction"
						on:mouseup=move |_| handle.dispatch(Input::DirectionToggled)
					>
						{direction_glyph}
					</button>
					<button
						class=slot_class(EndpointSlot::To)
						on:mouseup=move |_| handle.dispatch(Input::EndpointSlotClicked(EndpointSlot::To))
					>
						{to_label}
					</button>
				</div>
			}
		})
	}
}
