//! Signature pad capability.
//!
//! The engine never talks to a concrete widget; it only needs the three
//! imperative operations every pad implementation can offer.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Capability interface over an imperatively-queried signature widget.
pub trait SignaturePad {
    fn is_empty(&self) -> bool;

    /// PNG-encoded image of the current strokes, or `None` when there
    /// is nothing to export.
    fn export_png(&self) -> Option<Vec<u8>>;

    fn clear(&mut self);
}

/// Capture the pad into a draft-storable value.
///
/// An empty pad yields `None` -- the signature is optional, not an
/// error.
pub fn capture(pad: &dyn SignaturePad) -> Option<String> {
    if pad.is_empty() {
        return None;
    }
    pad.export_png()
        .map(|png| format!("data:image/png;base64,{}", BASE64.encode(png)))
}
