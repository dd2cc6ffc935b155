use std::path::{Component, Path, PathBuf};

/// Lexically normalizes `path`: drops `.` components and resolves `..`
/// against preceding normal components. Leading `..` of relative paths and
/// the root of absolute paths are kept.
pub fn clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component> = vec![];
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            _ => out.push(component),
        }
    }
    out.iter().collect()
}

/// Joins `name` onto `root` and returns the cleaned result if it is `root`
/// itself or lies below it.
pub fn enclosed_path(root: &Path, name: &str) -> Option<PathBuf> {
    let root = clean(root);
    let candidate = clean(&root.join(name));
    let rest = candidate.strip_prefix(&root).ok()?;
    if rest
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_paths() {
        assert_eq!(clean(Path::new("a/./b/../c")), Path::new("a/c"));
        assert_eq!(clean(Path::new("../a/b/../../..")), Path::new("../.."));
        assert_eq!(clean(Path::new("/../a")), Path::new("/a"));
        assert_eq!(clean(Path::new("./")), Path::new(""));
    }

    #[test]
    fn inside_root() {
        let root = Path::new("output");
        assert_eq!(
            enclosed_path(root, "app/bin/tool"),
            Some(PathBuf::from("output/app/bin/tool"))
        );
        assert_eq!(
            enclosed_path(root, "app/../lib/x.so"),
            Some(PathBuf::from("output/lib/x.so"))
        );
        assert_eq!(enclosed_path(root, "app/.."), Some(PathBuf::from("output")));
        assert_eq!(enclosed_path(root, "./"), Some(PathBuf::from("output")));
    }

    #[test]
    fn escaping_root() {
        let root = Path::new("output");
        assert_eq!(enclosed_path(root, "../../etc/passwd"), None);
        assert_eq!(enclosed_path(root, "a/../../x"), None);
        assert_eq!(enclosed_path(root, "/etc/passwd"), None);
        assert_eq!(enclosed_path(Path::new("out/put"), "../putty/x"), None);
    }

    #[test]
    fn relative_roots() {
        assert_eq!(enclosed_path(Path::new("."), "a/b"), Some(PathBuf::from("a/b")));
        assert_eq!(enclosed_path(Path::new("."), "../a"), None);
        assert_eq!(
            enclosed_path(Path::new("../out"), "a"),
            Some(PathBuf::from("../out/a"))
        );
        assert_eq!(enclosed_path(Path::new(".."), "../a"), None);
    }

    #[test]
    fn absolute_root() {
        assert_eq!(
            enclosed_path(Path::new("/tmp/out/"), "a/b"),
            Some(PathBuf::from("/tmp/out/a/b"))
        );
        assert_eq!(enclosed_path(Path::new("/tmp/out"), "../out2/a"), None);
    }
}
