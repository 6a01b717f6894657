#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/**
 * The closed-form surplus computation.
 */
mod surplus;
pub use surplus::*;

/**
 * Sampling of the demand curve into drawable series.
 */
mod series;
pub use series::*;

mod intro;
pub use intro::Introduction;

mod presenter;
pub use presenter::*;

/// Writers for the chart, the summary and the full page.
#[cfg(feature = "export")]
pub mod export;
