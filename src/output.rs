//! CLI output formatting for every command.
//!
//! # Output Format
//!
//! ## transform / clip
//!
//! ```text
//! Resizing photo.jpg [jpeg] from 1920x1080 to 800x450 (fit within 800x600)
//! ✓ Saved to out.jpg
//! ```
//!
//! ## info
//!
//! ```text
//! File:         photo.jpg
//! Path:         shots/photo.jpg
//! Format:       JPEG
//! Dimensions:   1920 × 1080 pixels
//! Aspect Ratio: 1.78:1
//! Transparency: false
//! Color Model:  Rgb8
//! File Size:    482133 bytes (470.83 KB)
//! ```
//!
//! ## JSON
//!
//! With `--json` every command prints a single envelope on stdout instead:
//! `{"success": true, "data": …}` or
//! `{"success": false, "error": {"message": …, "kind": …}}`.
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>` or a JSON
//! string) for testability and a `print_*` wrapper that writes to stdout.
//! Format functions are pure: no I/O, no side effects.

use crate::types::{ImageInfo, TransformOutcome};
use serde::Serialize;
use serde_json::json;

// ============================================================================
// Text
// ============================================================================

pub fn format_outcome(outcome: &TransformOutcome) -> Vec<String> {
    vec![
        outcome.message.clone(),
        format!("✓ Saved to {}", outcome.output_file),
    ]
}

pub fn print_outcome(outcome: &TransformOutcome) {
    for line in format_outcome(outcome) {
        println!("{}", line);
    }
}

pub fn format_info(info: &ImageInfo) -> Vec<String> {
    let rows = [
        ("File", info.file.clone()),
        ("Path", info.path.clone()),
        ("Format", info.format.to_uppercase()),
        (
            "Dimensions",
            format!("{} × {} pixels", info.width, info.height),
        ),
        ("Aspect Ratio", format!("{:.2}:1", info.aspect_ratio)),
        ("Transparency", info.has_alpha.to_string()),
        ("Color Model", info.color_model.clone()),
        (
            "File Size",
            format!("{} bytes ({:.2} KB)", info.file_size, info.file_size_kb),
        ),
    ];
    rows.into_iter()
        .map(|(label, value)| format!("{:<14}{}", format!("{label}:"), value))
        .collect()
}

pub fn print_info(info: &ImageInfo) {
    for line in format_info(info) {
        println!("{}", line);
    }
}

// ============================================================================
// JSON envelope
// ============================================================================

/// Wrap `data` in a success envelope, pretty-printed.
pub fn format_json_success<T: Serialize>(data: &T) -> Result<String, serde_json::Error> {
    let envelope = json!({
        "success": true,
        "data": serde_json::to_value(data)?,
    });
    Ok(format!("{:#}", envelope))
}

/// Failure envelope; `kind` is the snake_case error category.
pub fn format_json_error(message: &str, kind: &str) -> String {
    let envelope = json!({
        "success": false,
        "error": {
            "message": message,
            "kind": kind,
        },
    });
    format!("{:#}", envelope)
}

pub fn print_json_success<T: Serialize>(data: &T) -> Result<(), serde_json::Error> {
    println!("{}", format_json_success(data)?);
    Ok(())
}

pub fn print_json_error(message: &str, kind: &str) {
    println!("{}", format_json_error(message, kind));
}
