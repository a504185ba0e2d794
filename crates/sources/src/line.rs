//! Line assembler - chunk stream to complete lines

#[cfg(test)]
#[path = "line_test.rs"]
mod line_test;

/// Accumulates byte chunks and yields complete text lines
///
/// Bytes are buffered until a `\n` arrives, so a line split across chunk
/// boundaries (including mid UTF-8 sequence) is reassembled intact. Lines
/// are decoded with lossy UTF-8: malformed sequences become replacement
/// characters and never abort the stream.
///
/// The buffer is unbounded. An upstream process that emits bytes but never
/// a newline will grow it without limit; callers accept that risk, matching
/// the pipe-fed receivers this is written for.
#[derive(Debug, Default)]
pub struct LineAssembler {
    buf: Vec<u8>,
}

impl LineAssembler {
    /// Create an empty assembler
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return the lines it completed, in order
    ///
    /// The trailing partial line (possibly empty) is retained for the next
    /// call. Returned lines do not include their `\n` terminator.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let Some(last_newline) = self.buf.iter().rposition(|&b| b == b'\n') else {
            return Vec::new();
        };

        let rest = self.buf.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.buf, rest);

        complete[..last_newline]
            .split(|&b| b == b'\n')
            .map(|line| String::from_utf8_lossy(line).into_owned())
            .collect()
    }

    /// Bytes currently buffered without a terminator
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}
