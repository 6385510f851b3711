//! Club star map.
//!
//! Places clubs on a procedurally generated star field and draws them on an
//! HTML canvas with:
//! - A deterministic field derived from a seed string
//! - Curved constellation edges between related clubs
//! - Pan with inertia, stepped zoom, and an animated reset
//! - Hover tooltips and click-to-select
//!
//! Everything except [`StarMapCanvas`] and the renderer is plain Rust and runs
//! outside the browser.
//!
//! # Example
//!
//! ```ignore
//! use club_starmap::components::star_map::StarMapCanvas;
//!
//! let selected = RwSignal::new(None);
//! view! { <StarMapCanvas clubs=clubs selected=selected /> }
//! ```

mod component;
pub mod config;
pub mod constellation;
pub mod curve;
pub mod field;
pub mod interaction;
pub mod mapping;
mod render;
pub mod scale;
pub mod seed;
pub mod state;
pub mod theme;
pub mod types;
pub mod viewport;

pub use component::StarMapCanvas;
pub use config::StarMapConfig;
pub use state::{InputEvent, StarMapState};
pub use theme::Theme;
pub use types::{Club, Meeting, Members};
