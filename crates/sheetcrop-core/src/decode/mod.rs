//! Photo decoding and scan-frame preparation.
//!
//! This is the decode collaborator of a crop session: it turns photo bytes
//! into an upright [`DecodedImage`], whose dimensions become the session's
//! [`ImageDescriptor`](crate::geometry::ImageDescriptor), and produces the
//! small RGBA [`RgbaFrame`](crate::suggest::RgbaFrame) that bounds
//! suggesters scan.
//!
//! All operations are synchronous. A host that wants the UI to stay
//! responsive runs them off the main thread and hands the results back.

mod photo;
mod scan;
mod types;

pub use photo::{decode_photo, read_orientation};
pub use scan::scan_frame;
pub use types::{DecodeError, DecodedImage, Orientation};
