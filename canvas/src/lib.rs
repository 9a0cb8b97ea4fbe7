//! Page-layout engine for the photobook editor.
//!
//! This crate owns the in-memory model of a photobook being designed: the
//! pages, the photo placements on each page, and the rules that keep every
//! placement inside its page. It translates pointer gestures and tool
//! actions into placement mutations and reports them as [`engine::Action`]s.
//! It performs no I/O; the `editor` crate persists the resulting pages.
//!
//! All geometry is expressed as percentages of the page bounding box
//! (0–100). Pixels only appear at the interaction boundary, where
//! [`camera::PageRect`] and [`camera::Size`] convert them.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EngineCore`]: placement operations, selection, spread navigation |
//! | [`doc`] | Placement, page and photobook types plus the [`doc::PageStore`] |
//! | [`wire`] | JSON request/response shapes exchanged with photobook storage |
//! | [`camera`] | Pixel ↔ percentage conversions against the rendered page |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against placements on a page |
//! | [`consts`] | Shared numeric constants (default sizes, minimums, offsets) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod wire;
