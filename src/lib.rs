//! # imgr
//!
//! A command-line image transformer: decode one image, optionally rotate it
//! by a quarter turn, fit it within bounds or clip a region, and re-encode it
//! in the format named by the output file.
//!
//! # Architecture: A Linear Pipeline
//!
//! Every invocation runs a fixed sequence of stages over a single pixel
//! buffer, which is moved from stage to stage:
//!
//! ```text
//! transform:  decode → rotate → fit → scale → resolve format → encode
//! clip:       decode → clip → resolve format → encode
//! ```
//!
//! Stages that have nothing to do return the buffer untouched, so a plain
//! format conversion is pixel-exact. The first failing stage ends the run and
//! nothing is written.
//!
//! - **Pure geometry**: the fit computation ([`imaging::fit_within`]) works on
//!   integers only, so its laws are property-tested without any pixels.
//! - **A backend seam**: decoding and encoding sit behind
//!   [`imaging::ImageBackend`], so the orchestrator is tested against a mock.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Geometry, rotation, clipping, scaling, format resolution and the pipeline |
//! | [`config`] | Optional TOML file with defaults for quality, no-enlarge and JSON output |
//! | [`types`] | Serializable results (`TransformOutcome`, `ImageInfo`) |
//! | [`output`] | Text and JSON-envelope rendering of results and errors |
//!
//! # Design Decisions
//!
//! ## Extension Decides the Output Format
//!
//! The output file's extension picks the encoder. When it names nothing this
//! tool writes, the input's own format is reused where possible and JPEG is
//! the last resort, so conversions never fail merely for a strange suffix.
//!
//! ## Pure-Rust Codecs
//!
//! The `image` crate covers the common formats and `rav1d` decodes AVIF, so
//! the binary has no system image libraries to install. HEIC needs an HEVC
//! decoder, which has no pure-Rust implementation; such files are reported as
//! undecodable rather than silently mishandled.

pub mod config;
pub mod imaging;
pub mod output;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
