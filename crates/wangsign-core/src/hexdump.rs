const BYTES_PER_LINE: usize = 16;

/// Canonical hex dump: offset, sixteen hex bytes in two groups, ASCII column.
///
/// # Examples
/// ```
/// use wangsign_core::hex_dump;
///
/// let dump = hex_dump(b"wang\0\0");
/// assert_eq!(
///     dump,
///     "00000000  77 61 6e 67 00 00                                 |wang..|\n"
/// );
/// ```
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(BYTES_PER_LINE) * 79);
    for (line, chunk) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        out.push_str(&format!("{:08x}  ", line * BYTES_PER_LINE));
        for i in 0..BYTES_PER_LINE {
            match chunk.get(i) {
                Some(byte) => out.push_str(&format!("{byte:02x} ")),
                None => out.push_str("   "),
            }
            if i == 7 {
                out.push(' ');
            }
        }
        out.push_str(" |");
        out.extend(chunk.iter().map(|&b| printable(b)));
        out.push_str("|\n");
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
