#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time fractal renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which repeatedly squaring a number and adding `c` never runs
//! off to infinity.  Points outside the set do run off, some quickly
//! and some only after many passes, and the number of passes it took
//! (the "escape time") is what colors the image.
//!
//! The crate is split the way the data flows:
//!
//! * [`palette`] turns escape times into colors,
//! * [`escape`] computes escape times,
//! * [`render`] walks the canvas and assembles the image,
//! * [`output`] names and encodes it,
//! * [`sink`] stores it somewhere.
//!
//! The first three do no I/O.  [`webhook`] is an unrelated chat-bot
//! plugin that ships in the same binary bundle.

extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate reqwest;
extern crate serde;
extern crate serde_json;

#[cfg(test)]
extern crate tempfile;

pub mod error;
pub mod escape;
pub mod output;
pub mod palette;
pub mod planes;
pub mod render;
pub mod sink;
pub mod webhook;

pub use error::{RenderError, SinkError, WebhookError};
pub use escape::{escape_time, Fractal};
pub use palette::Palette;
pub use render::{render, RenderParams, Renderer};
pub use sink::{DirectorySink, HttpSink, Sink};
