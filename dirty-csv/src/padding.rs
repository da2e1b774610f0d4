use std::io::{self, Read, Write};

use log::info;

use crate::error::GenError;

/// Byte appended to reach the target size.
pub const FILLER: u8 = b' ';

/// Number of [`FILLER`] bytes needed to grow `unpadded` bytes of output to exactly `target`.
/// Only meaningful for the length of unpadded output.
///
/// # Errors
/// Errors with [`GenError::Oversize`] when the output is already longer than `target`; it is
/// never cut since that would break the last record.
pub fn pad_to_size(unpadded: u64, target: u64) -> Result<u64, GenError> {
    if unpadded > target {
        return Err(GenError::Oversize {
            actual: unpadded,
            target,
        });
    }
    let missing = target - unpadded;
    info!(
        "Padding {} bytes up to {} with {} filler bytes",
        unpadded, target, missing
    );
    Ok(missing)
}

/// Streams `count` [`FILLER`] bytes into `writer` without buffering them.
///
/// # Errors
/// Errors if the writer fails.
pub fn write_filler<W: Write + ?Sized>(writer: &mut W, count: u64) -> io::Result<u64> {
    io::copy(&mut io::repeat(FILLER).take(count), writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pads_exactly() {
        let mut buf = b"a,b\n1,2\n".to_vec();
        let missing = pad_to_size(buf.len() as u64, 20).unwrap();
        assert_eq!(missing, 12);
        assert_eq!(write_filler(&mut buf, missing).unwrap(), 12);
        assert_eq!(buf.len(), 20);
        assert_eq!(&buf[..8], b"a,b\n1,2\n");
        assert!(buf[8..].iter().all(|b| *b == b' '));
    }

    #[test]
    fn test_exact_size_adds_nothing() {
        assert_eq!(pad_to_size(4, 4).unwrap(), 0);
        let mut buf = Vec::new();
        assert_eq!(write_filler(&mut buf, 0).unwrap(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_oversize_is_reported() {
        match pad_to_size(8, 5) {
            Err(GenError::Oversize { actual, target }) => {
                assert_eq!(actual, 8);
                assert_eq!(target, 5);
            }
            other => panic!("expected oversize, got {:?}", other),
        }
    }

    #[test]
    fn test_fifty_megabyte_example() {
        assert_eq!(pad_to_size(52_300_000, 52_428_800).unwrap(), 128_800);
    }

    #[test]
    fn test_huge_target_is_only_counted() {
        let target = 1_u64 << 62;
        assert_eq!(pad_to_size(1_000, target).unwrap(), target - 1_000);
    }
}
