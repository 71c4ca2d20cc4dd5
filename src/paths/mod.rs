use crate::error::Result;
use globset::GlobBuilder;
use std::fs::File;
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

#[cfg(test)]
mod path_tests;

/// Normalize a path to an absolute form:
/// - Relative paths are joined onto the current directory
/// - `.` components are dropped
/// - `..` components pop their parent lexically
///
/// Symlinks are not followed and the path need not exist.
pub fn normalize(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => continue,
            // `..` at the root stays at the root
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }

    Ok(normalized)
}

/// Last file extension of `path`, lower-cased, without the dot
///
/// Returns an empty string when there is no extension.
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default()
}

/// Best-effort recovery of the path an open file was opened from
pub fn path_of_file(file: &File) -> Option<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        use std::os::unix::io::AsRawFd;
        let link = format!("/proc/self/fd/{}", file.as_raw_fd());
        std::fs::read_link(link).ok().filter(|p| p.is_absolute())
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = file;
        None
    }
}

/// Expand paths and glob patterns into a sorted, de-duplicated file list
///
/// Plain paths are returned as given, whether or not they exist. Patterns
/// containing `*`, `?`, `[` or `{` are matched against files under the
/// longest directory prefix free of glob characters.
pub fn expand_paths<P: AsRef<Path>>(patterns: &[P]) -> Result<Vec<PathBuf>> {
    let mut expanded = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        if !is_glob(pattern) {
            expanded.push(pattern.to_path_buf());
            continue;
        }

        let matcher = GlobBuilder::new(&pattern.to_string_lossy())
            .literal_separator(true)
            .build()?
            .compile_matcher();
        let base = glob_base(pattern);

        for entry in WalkDir::new(base.as_deref().unwrap_or(Path::new("."))) {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            // Relative patterns are matched without the implicit "./" prefix
            let candidate = match base {
                Some(_) => entry.path(),
                None => entry.path().strip_prefix(".").unwrap_or(entry.path()),
            };
            if matcher.is_match(candidate) {
                expanded.push(candidate.to_path_buf());
            }
        }
    }

    expanded.sort();
    expanded.dedup();
    Ok(expanded)
}

fn is_glob(path: &Path) -> bool {
    path.to_string_lossy().contains(['*', '?', '[', '{'])
}

/// Directory prefix of `pattern` before its first glob component, if any
fn glob_base(pattern: &Path) -> Option<PathBuf> {
    let mut base = PathBuf::new();
    for component in pattern.components() {
        if is_glob(Path::new(component.as_os_str())) {
            break;
        }
        base.push(component.as_os_str());
    }

    (!base.as_os_str().is_empty()).then_some(base)
}
