// src/input.rs

use crate::error::{PmError, Result};
use std::io::Read;

/// Reads the reader to end-of-stream into memory. No size limit.
pub fn slurp<R: Read>(mut reader: R) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(PmError::Stdin)?;
    log::debug!("read {} bytes from stdin", buf.len());
    Ok(buf)
}

/// Decodes the buffer as UTF-8. Invalid input is refused, never rewritten.
pub fn into_text(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| PmError::NotUtf8(e.utf8_error().valid_up_to()))
}

/// Slurps the reader and decodes it as text.
pub fn read_text<R: Read>(reader: R) -> Result<String> {
    slurp(reader).and_then(into_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream closed"))
        }
    }

    /// Hands out one byte per call, like a slow pipe.
    struct Trickle(Vec<u8>, usize);

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.1 >= self.0.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[self.1];
            self.1 += 1;
            Ok(1)
        }
    }

    #[test]
    fn reads_everything_including_newlines() {
        let text = read_text(Cursor::new("Oct 16 sshd[1]: accepted\nsecond line\n")).unwrap();
        assert_eq!(text, "Oct 16 sshd[1]: accepted\nsecond line\n");
    }

    #[test]
    fn empty_stream_gives_empty_text() {
        assert_eq!(read_text(io::empty()).unwrap(), "");
    }

    #[test]
    fn accumulates_partial_reads() {
        let payload = "x".repeat(1000) + "\nend";
        let got = slurp(Trickle(payload.clone().into_bytes(), 0)).unwrap();
        assert_eq!(got, payload.as_bytes());
    }

    #[test]
    fn read_failure_is_a_stdin_error() {
        let err = slurp(FailingReader).unwrap_err();
        assert!(matches!(err, PmError::Stdin(_)));
        assert_eq!(err.exit_code(), crate::error::EXIT_STDIN);
    }

    #[test]
    fn invalid_utf8_is_refused() {
        let err = read_text(Cursor::new(vec![b'o', b'k', 0xff, b'!'])).unwrap_err();
        assert!(matches!(err, PmError::NotUtf8(2)));
        assert_eq!(err.exit_code(), crate::error::EXIT_FAILURE);
    }

    #[test]
    fn multibyte_text_passes_through() {
        assert_eq!(into_text("température °C\n".as_bytes().to_vec()).unwrap(), "température °C\n");
    }
}
