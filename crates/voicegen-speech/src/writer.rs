use crate::error::{TTSError, TTSResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write `bytes` to `path` in `chunk_size` pieces, truncating any existing file.
///
/// Returns the number of bytes written. The handle is closed when this
/// returns, on success or error; a partial file is left in place on failure.
pub fn write_chunked(path: &Path, bytes: &[u8], chunk_size: usize) -> TTSResult<u64> {
    if chunk_size == 0 {
        return Err(TTSError::InvalidConfiguration(
            "chunk_size must be at least 1".to_string(),
        ));
    }

    let mut file = File::create(path).map_err(|e| TTSError::io(path, e))?;
    let mut written = 0u64;
    for chunk in bytes.chunks(chunk_size) {
        log::trace!("{}: writing {} bytes", path.display(), chunk.len());
        file.write_all(chunk).map_err(|e| TTSError::io(path, e))?;
        written += chunk.len() as u64;
    }
    file.flush().map_err(|e| TTSError::io(path, e))?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_in_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alloy1.mp3");
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();

        let written = write_chunked(&path, &data, 4096).unwrap();

        assert_eq!(written, 10_000);
        assert_eq!(std::fs::read(&path).unwrap(), data);
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alloy1.mp3");
        std::fs::write(&path, vec![7u8; 9_000]).unwrap();

        write_chunked(&path, b"short", 4096).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"short");
    }

    #[test]
    fn test_empty_payload_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.mp3");

        assert_eq!(write_chunked(&path, &[], 4096).unwrap(), 0);
        assert!(path.exists());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never.mp3");

        let err = write_chunked(&path, b"data", 0).unwrap_err();
        assert!(matches!(err, TTSError::InvalidConfiguration(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_directory_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("alloy1.mp3");

        match write_chunked(&path, b"data", 4096) {
            Err(TTSError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }
}
