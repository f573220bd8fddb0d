//! Fixed-stride text chunking
//!
//! Documents are split into contiguous chunks of at most [`CHUNK_SIZE`]
//! characters, purely by position. The split is lossless: concatenating the
//! chunks in order reconstructs the input. Slide decks get a double pass:
//! the text is first split on the slide boundary marker, then each slide is
//! chunked independently.

/// Maximum chunk length, in characters.
pub const CHUNK_SIZE: usize = 2048;

/// Boundary marker between slides in extracted presentation text.
pub const SLIDE_SEPARATOR: &str = "\n\n";

/// Lazy iterator over fixed-stride chunks of a text.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    remaining: &'a str,
    size: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.remaining.is_empty() {
            return None;
        }
        // Byte offset of the size-th character, or the whole remainder.
        let split = self
            .remaining
            .char_indices()
            .nth(self.size)
            .map(|(i, _)| i)
            .unwrap_or(self.remaining.len());
        let (chunk, rest) = self.remaining.split_at(split);
        self.remaining = rest;
        Some(chunk)
    }
}

/// Split `text` into strides of [`CHUNK_SIZE`] characters.
///
/// Empty text yields no chunks; the final chunk may be shorter.
pub fn chunks(text: &str) -> Chunks<'_> {
    chunks_of(text, CHUNK_SIZE)
}

/// Split `text` into strides of `size` characters.
pub fn chunks_of(text: &str, size: usize) -> Chunks<'_> {
    assert!(size > 0, "chunk size must be non-zero");
    Chunks {
        remaining: text,
        size,
    }
}

/// Chunk slide-separated text: split on [`SLIDE_SEPARATOR`] (separators are
/// consumed), chunk each slide independently, and yield all chunks in slide
/// order then intra-slide order.
pub fn slide_chunks(text: &str) -> impl Iterator<Item = &str> {
    text.split(SLIDE_SEPARATOR).flat_map(chunks)
}
