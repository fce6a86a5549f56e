//! Sheetcrop Core - interactive crop-rectangle engine
//!
//! This crate holds everything needed to let a user frame a worksheet photo
//! with a draggable crop box: letterbox fitting and coordinate mapping,
//! handle hit-testing, the drag state machine, heuristic initial bounds,
//! and the store that owns the committed rectangle. Decoding photos and
//! exporting the final crop are provided as thin collaborators.
//!
//! Coordinate spaces are kept apart by type: [`ImagePoint`]/[`ImageRect`]
//! are full-resolution image pixels, [`ScreenPoint`]/[`ScreenRect`] are
//! container units.

pub mod config;
pub mod decode;
pub mod drag;
pub mod export;
pub mod fit;
pub mod geometry;
pub mod handles;
pub mod luminance;
pub mod session;
pub mod store;
pub mod suggest;

pub use config::{ConfigError, CropConfig, DefaultRegion, SuggesterConfig};
pub use drag::{DragController, DragSession, DragState, MinSize};
pub use fit::{CoordinateMapper, Fit};
pub use geometry::{
    ImageDescriptor, ImagePoint, ImageRect, PixelRect, ScreenPoint, ScreenRect, Size,
};
pub use handles::{Handle, HandleSet, DEFAULT_HANDLE_SIZE};
pub use session::{CropFrame, CropSession, SuggestionOutcome, SuggestionRequest, SuggestionStatus};
pub use store::{Provenance, RectangleStore, SubscriptionId};
pub use suggest::{BoundsSuggester, InkBounds, Margins, RgbaFrame, RowDensity, SuggestError};
