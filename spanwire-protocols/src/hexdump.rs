//! Offset/hex/ASCII dump of a byte buffer, 16 bytes per line.

use std::fmt::Write;

const BYTES_PER_LINE: usize = 16;

/// Formats `data` as a classic hex dump:
///
/// ```text
///   0000  10 01 00 64 00 00 00 00 ff ff ff ff ff ff 00 00  ...d............
/// ```
pub fn hexdump(data: &[u8]) -> String {
    if data.is_empty() {
        return "  ZERO LENGTH\n".to_string();
    }

    let mut out = String::new();
    for (line, chunk) in data.chunks(BYTES_PER_LINE).enumerate() {
        let _ = write!(out, "  {:04x} ", line * BYTES_PER_LINE);
        for byte in chunk {
            let _ = write!(out, " {:02x}", byte);
        }
        for _ in chunk.len()..BYTES_PER_LINE {
            out.push_str("   ");
        }
        out.push_str("  ");
        out.extend(chunk.iter().map(|&b| printable(b)));
        out.push('\n');
    }
    out
}

fn printable(byte: u8) -> char {
    if (0x20..=0x7e).contains(&byte) {
        byte as char
    } else {
        '.'
    }
}
