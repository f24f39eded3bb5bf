//! Canvas and picker components for the harvest view.
//!
//! The view owns nothing but presentation state. Every edit goes through a
//! [`HarvestHandle`], which runs it on the session and turns the resulting
//! instructions into signals:
//! - [`HarvestCanvas`] draws fruits and vines and reports clicks and resizes
//! - [`VertexPicker`] shows the selected fruit's tags
//! - [`EdgePicker`] shows the selected vine's ends and direction
//!
//! # Example
//!
//! ```ignore
//! use harvest::components::harvest::{HarvestCanvas, HarvestHandle};
//! use harvest::{GraphSession, HarvestConfig};
//!
//! let config = HarvestConfig::default();
//! let handle = HarvestHandle::new(GraphSession::new(&config, 800.0, 600.0));
//!
//! view! { <HarvestCanvas handle=handle fullscreen=true /> }
//! ```

mod component;
mod handle;
mod picker;
mod render;
mod scale;
mod state;
pub mod theme;

pub use component::HarvestCanvas;
pub use handle::{EdgePickerView, HarvestHandle, VertexPickerView, current_selection};
pub use picker::{EdgePicker, VertexPicker};
pub use theme::Theme;
