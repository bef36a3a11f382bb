use std::io::Write;
use std::path::Path;

/// Write `content` to `path` atomically: the bytes land in a temp file in
/// the same directory, which is then renamed over the target. Readers never
/// observe a half-written file.
pub fn atomic_write_str(path: &Path, content: &str) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Trim an optional string, collapsing empty/whitespace-only values to None.
pub fn trimmed_or_none(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_write_replaces_contents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.json");

        atomic_write_str(&path, "first").unwrap();
        atomic_write_str(&path, "second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_trimmed_or_none() {
        assert_eq!(trimmed_or_none(None), None);
        assert_eq!(trimmed_or_none(Some("".to_string())), None);
        assert_eq!(trimmed_or_none(Some("   ".to_string())), None);
        assert_eq!(
            trimmed_or_none(Some("  Asheville, NC ".to_string())),
            Some("Asheville, NC".to_string())
        );
    }
}
