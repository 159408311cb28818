use crate::common::*;
use std::ffi::OsStr;

/// Fail with a descriptive message if the directory does not exist.
pub fn ensure_dir(path: impl AsRef<Path>, what: &str) -> Result<()> {
    let path = path.as_ref();
    ensure!(
        path.is_dir(),
        "{} directory '{}' does not exist",
        what,
        path.display()
    );
    Ok(())
}

/// List the names of regular files in a directory, sorted by name.
///
/// Hidden files are skipped. If `extension` is set, only files with that
/// extension are listed.
pub fn list_file_names(dir: impl AsRef<Path>, extension: Option<&str>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut names: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("unable to list directory '{}'", dir.display()))?
        .map(|entry| -> Result<_> {
            let entry = entry?;
            let name = PathBuf::from(entry.file_name());

            let is_hidden = name.to_string_lossy().starts_with('.');
            let is_file = entry.path().is_file();
            let ext_matches = match extension {
                Some(ext) => name.extension() == Some(OsStr::new(ext)),
                None => true,
            };
            Ok((is_file && !is_hidden && ext_matches).then(|| name))
        })
        .filter_map(|name| name.transpose())
        .try_collect()?;
    names.sort();

    debug!("found {} files in '{}'", names.len(), dir.display());
    Ok(names)
}

/// Read a list of sample names, one name per line.
///
/// Surrounding whitespace and blank lines are ignored. Duplicated names are
/// kept once.
pub fn load_name_list(path: impl AsRef<Path>) -> Result<IndexSet<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("unable to read name list '{}'", path.display()))?;
    let lines: Vec<_> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let names: IndexSet<_> = lines.iter().map(|&line| line.to_owned()).collect();

    if names.len() != lines.len() {
        warn!(
            "{} duplicated names found in '{}'",
            lines.len() - names.len(),
            path.display()
        );
    }
    Ok(names)
}
