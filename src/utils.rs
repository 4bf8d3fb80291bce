use std::path::Path;
use tempfile::NamedTempFile;

/// Creates a temporary file in `dir` for a write-then-rename.
///
/// On unix the file is opened with mode `0o666` so that, once persisted, it
/// carries the same umask-filtered permissions as a file made by
/// `std::fs::write` instead of tempfile's owner-only `0o600`.
pub(crate) fn staging_file_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// Directory that holds `path`, `.` for a bare file name.
pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_parent_dir_of_bare_name() {
        assert_eq!(parent_dir(Path::new("Municipios.csv")), Path::new("."));
        assert_eq!(
            parent_dir(Path::new("data/output/Municipios.csv")),
            Path::new("data/output")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_persisted_file_has_default_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let plain = dir.path().join("plain.csv");
        std::fs::write(&plain, b"x").unwrap();

        let staged = dir.path().join("staged.csv");
        let mut temp_file = staging_file_in(dir.path()).unwrap();
        temp_file.write_all(b"x").unwrap();
        temp_file.persist(&staged).unwrap();

        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&staged), mode(&plain));
    }
}
