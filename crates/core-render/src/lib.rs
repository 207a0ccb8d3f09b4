//! Menu drawing.
//!
//! A frame is assembled into a `writer::Writer` command list and flushed to
//! the terminal in one go. The menu occupies one row (horizontal bar or
//! display-only message) or `1 + lines` rows (vertical list), at the top or
//! bottom of the screen.
//!
//! Every item is drawn as a padded cell: one blank column on each side of the
//! text. `CellMeasure` reports the same padded width to the paginator, so the
//! window computed by the core and the cells drawn here always agree.

pub mod measure;
pub mod render_engine;
pub mod theme;
pub mod writer;

pub use measure::{CellMeasure, PADDING, sanitize};
pub use render_engine::{BarGeometry, Placement, RenderEngine, RenderOptions};
pub use theme::{Theme, parse_color};
