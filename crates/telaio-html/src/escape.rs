//! Minimal HTML escaping.

use bytes::BytesMut;

/// Escapes character data: `&`, `<`, and `>`.
pub fn escape_text(value: &str, out: &mut BytesMut) {
    escape(value, out, false);
}

/// Escapes an attribute value: `&`, `<`, `>`, and `"`.
pub fn escape_attribute(value: &str, out: &mut BytesMut) {
    escape(value, out, true);
}

fn escape(value: &str, out: &mut BytesMut, quotes: bool) {
    let bytes = value.as_bytes();
    let mut flushed = 0;
    for (index, &byte) in bytes.iter().enumerate() {
        let entity: &[u8] = match byte {
            b'&' => b"&amp;",
            b'<' => b"&lt;",
            b'>' => b"&gt;",
            b'"' if quotes => b"&quot;",
            _ => continue,
        };
        out.extend_from_slice(&bytes[flushed..index]);
        out.extend_from_slice(entity);
        flushed = index + 1;
    }
    out.extend_from_slice(&bytes[flushed..]);
}
