//! All-or-nothing file output

// standard library
use std::fs::File;
use std::io;
use std::path::Path;

// external crates
use tempfile::NamedTempFile;

/// Write a file in full or not at all
///
/// The closure writes into a temporary file next to `path`, which only
/// replaces the destination once the closure succeeds. On any error the
/// temporary file is removed and an existing destination is left as it was.
///
/// ```rust
/// # use std::io::Write;
/// # use strata_utils::write_atomic;
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("out.txt");
///
/// write_atomic(&path, |file| -> std::io::Result<()> { file.write_all(b"first") }).unwrap();
/// let failed = write_atomic(&path, |file| -> std::io::Result<()> {
///     file.write_all(b"partial")?;
///     Err(std::io::Error::other("interrupted"))
/// });
///
/// assert!(failed.is_err());
/// assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");
/// ```
pub fn write_atomic<P, F, E>(path: P, write: F) -> Result<(), E>
where
    P: AsRef<Path>,
    F: FnOnce(&mut File) -> Result<(), E>,
    E: From<io::Error>,
{
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(parent)?;
    write(staged.as_file_mut())?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| E::from(e.error))?;
    Ok(())
}

#[cfg(test)]
mod atomic_tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    #[test]
    fn failure_keeps_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.dat");
        fs::write(&path, "old contents").unwrap();

        let result = write_atomic(&path, |file| -> io::Result<()> {
            writeln!(file, "header")?;
            writeln!(file, "1 2 3")?;
            Err(io::Error::other("row formatting failed"))
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "old contents");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn success_replaces_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.dat");
        fs::write(&path, "old contents that are longer").unwrap();

        write_atomic(&path, |file| -> io::Result<()> { file.write_all(b"new") }).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
