// Header module - container sniffing
//
// Only the RIFF magic is checked. Nothing past the first four bytes is
// parsed, so a truncated or bogus WAVE header still counts as "looks like".

/// RIFF container magic
pub const RIFF_MAGIC: [u8; 4] = *b"RIFF";

/// Returns true when `buffer` starts with the RIFF magic
///
/// Buffers shorter than the magic are never wave files.
pub fn looks_like_wave(buffer: &[u8]) -> bool {
    buffer.len() >= RIFF_MAGIC.len() && buffer[..RIFF_MAGIC.len()] == RIFF_MAGIC
}
