#[cfg(test)]
mod tests {
    use crate::paths::{expand_paths, file_extension, normalize, path_of_file};
    use std::fs;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_normalize_absolute_path_unchanged() {
        let result = normalize(Path::new("/tmp/cfg.json")).unwrap();
        assert_eq!(result, PathBuf::from("/tmp/cfg.json"));
    }

    #[test]
    fn test_normalize_resolves_dot_components() {
        let result = normalize(Path::new("/a/./b/../c/cfg.yml")).unwrap();
        assert_eq!(result, PathBuf::from("/a/c/cfg.yml"));
    }

    #[test]
    fn test_normalize_parent_at_root_stays_at_root() {
        let result = normalize(Path::new("/../../etc/passwd")).unwrap();
        assert_eq!(result, PathBuf::from("/etc/passwd"));
    }

    #[test]
    fn test_normalize_relative_path_is_absolute() {
        let result = normalize(Path::new("conf/../cfg.toml")).unwrap();
        let expected = std::env::current_dir().unwrap().join("cfg.toml");
        assert!(result.is_absolute());
        assert_eq!(result, expected);
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension(Path::new("/a/b/c")), "");
        assert_eq!(file_extension(Path::new("/a/b.txt")), "txt");
        assert_eq!(file_extension(Path::new("/a/b/c.tar.xz")), "xz");
        assert_eq!(file_extension(Path::new("CONFIG.JSON")), "json");
        assert_eq!(file_extension(Path::new(".hidden")), "");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_path_of_file_recovers_open_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, "{}").unwrap();

        let file = fs::File::open(&path).unwrap();
        let recovered = path_of_file(&file).unwrap();
        assert_eq!(recovered, fs::canonicalize(&path).unwrap());
    }

    #[test]
    fn test_expand_single_path() {
        let paths = expand_paths(&["/no/such/file.json"]).unwrap();
        assert_eq!(paths, vec![PathBuf::from("/no/such/file.json")]);
    }

    #[test]
    fn test_expand_glob_patterns() {
        let workdir = tempfile::tempdir().unwrap();
        let tdir = workdir.path().join("a").join("b").join("c");
        fs::create_dir_all(&tdir).unwrap();
        fs::write(tdir.join("d.txt"), "").unwrap();
        fs::write(tdir.join("e.txt"), "").unwrap();
        fs::write(tdir.join("f.json"), "{\"a\": 1}\n").unwrap();

        let flat = expand_paths(&[tdir.join("*.txt")]).unwrap();
        assert_eq!(flat, vec![tdir.join("d.txt"), tdir.join("e.txt")]);

        let parent = tdir.parent().unwrap();
        let nested = expand_paths(&[parent.join("**").join("*.txt")]).unwrap();
        assert_eq!(nested, vec![tdir.join("d.txt"), tdir.join("e.txt")]);

        let all = expand_paths(&[parent.join("**").join("*.*")]).unwrap();
        assert_eq!(
            all,
            vec![tdir.join("d.txt"), tdir.join("e.txt"), tdir.join("f.json")]
        );

        // `*` must not cross directory boundaries
        let shallow = expand_paths(&[parent.join("*.txt")]).unwrap();
        assert!(shallow.is_empty());
    }

    #[test]
    fn test_expand_multiple_paths_sorted() {
        let paths = expand_paths(&["/w/e.txt", "/w/d.txt", "/w/e.txt"]).unwrap();
        assert_eq!(paths, vec![PathBuf::from("/w/d.txt"), PathBuf::from("/w/e.txt")]);
    }
}
