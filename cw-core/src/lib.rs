#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Core domain models for the consumer welfare visualizer.
///
/// This module contains the fundamental data structures: the scenario
/// constants, the validated slope, the pivoting demand curve, the surplus
/// result record and the drawable chart geometry.
///
/// The models are primarily data structures with minimal business logic,
/// separating the domain entities from the computation and presentation
/// implementations that consume them.
pub mod models;

/// Interface traits for the consumer welfare visualizer.
///
/// This module contains the "ports" through which computed frames reach the
/// outside world. A charting library or a text renderer implements these
/// traits; the computation never depends on any of them.
pub mod ports;
