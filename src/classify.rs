//! Content sniffing for files without an extension.
//!
//! A file with no suffix is grouped by what its first few lines look like:
//! printable ASCII only means [`ExtensionLabel::Text`], anything else means
//! [`ExtensionLabel::Binary`]. Files that cannot be opened are grouped as
//! [`ExtensionLabel::UnknownFormat`].

use crate::data::ExtensionLabel;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Number of leading lines inspected.
pub const SAMPLE_LINES: usize = 10;

/// Longest line inspected. A longer line is sampled in segments of this
/// size, each counting as one line, so at most
/// `SAMPLE_LINES * MAX_LINE_BYTES` bytes are ever read.
pub const MAX_LINE_BYTES: u64 = 64 * 1024;

/// Returns true when `byte` lies in the printable ASCII range [32, 126].
#[inline]
fn is_printable(byte: u8) -> bool {
    (32..=126).contains(&byte)
}

/// Classifies the content of an extension-less file.
///
/// Reads at most [`SAMPLE_LINES`] newline-terminated lines. Any byte outside
/// the printable ASCII range in any sampled line marks the file binary; line
/// terminators (`\n`, and a `\r` directly before it) are not inspected.
/// A read error part-way through keeps the verdict reached so far.
///
/// The file handle is dropped on every return path.
pub fn classify(path: &Path) -> ExtensionLabel {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(err) => {
            debug!("cannot open {} for sampling: {}", path.display(), err);
            return ExtensionLabel::UnknownFormat;
        }
    };

    if sample_is_binary(BufReader::new(file), path) {
        ExtensionLabel::Binary
    } else {
        ExtensionLabel::Text
    }
}

/// Scans up to [`SAMPLE_LINES`] lines from `reader` for non-printable bytes.
fn sample_is_binary<R: BufRead>(mut reader: R, path: &Path) -> bool {
    let mut line = Vec::with_capacity(256);

    for _ in 0..SAMPLE_LINES {
        line.clear();
        match (&mut reader).take(MAX_LINE_BYTES).read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                debug!("read error while sampling {}: {}", path.display(), err);
                break;
            }
        }

        let mut content = line.as_slice();
        if let Some(rest) = content.strip_suffix(b"\n") {
            content = rest.strip_suffix(b"\r").unwrap_or(rest);
        }

        if content.iter().any(|&b| !is_printable(b)) {
            return true;
        }
    }

    false
}
