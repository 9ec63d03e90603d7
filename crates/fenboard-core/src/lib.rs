//! fenboard Core Types and Definitions
//!
//! This crate provides the foundational types used to rasterize chess boards.
//! It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Raster**: An RGBA canvas with compositing and sprite transforms ([`raster::Canvas`])
//! - **Text**: Measurable, drawable label fonts ([`text`] module)

pub mod color;
pub mod geometry;
pub mod raster;
pub mod text;
