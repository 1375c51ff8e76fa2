//! Mouse dragging with a ghost placeholder for browser elements
//!
//! ```rust,ignore
//! let draggable = Draggable::new(
//!     card,
//!     DraggableParams::new()
//!         .container(board)
//!         .on_drag(|| zoon::println!("picked up"))
//!         .on_drop(|rect| zoon::println!("dropped at {rect:?}")),
//! )?;
//! ```

pub mod dataflow;
pub mod dom;
pub mod draggable;
pub mod error;
pub mod ghost;
pub mod logging;

pub use draggable::{Draggable, DraggableParams};
pub use error::DragError;
pub use ghost::{Ghost, GhostParams};
pub use shared::{DragConfig, Point, Rect, Size};
