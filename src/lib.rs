//! Photomosaic - rebuild a picture from a pool of tile images
//!
//! Image loading, PNG codecs and the tiny-skia output surface around the
//! `mosaic-core` composition engine. This library exposes modules for
//! integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
