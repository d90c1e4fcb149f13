//! Lexical path joining with Node `path.join` semantics.
//!
//! Unlike [`Path::join`], an absolute tail does not replace the base: its
//! root is dropped and its segments are appended. `.` segments are removed
//! and `..` segments pop the previous normal segment. A trailing separator
//! is kept, so a directory-only target stays recognizable. Nothing here
//! touches the filesystem.

use std::path::{is_separator, Component, Path, PathBuf};

/// Join `tail` onto `base` and normalize the result lexically.
///
/// Returns `.` when everything cancels out on a relative base.
#[must_use]
pub fn join_normalized(base: &Path, tail: &str) -> PathBuf {
    let mut out = PathBuf::new();

    for component in base.components() {
        push_component(&mut out, component, true);
    }
    for component in Path::new(tail).components() {
        push_component(&mut out, component, false);
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }

    let trailing = if tail.is_empty() {
        base.as_os_str().to_string_lossy().ends_with(is_separator)
    } else {
        tail.ends_with(is_separator)
    };
    if trailing {
        // Pushing an empty segment appends a separator unless one is already there.
        out.push("");
    }
    out
}

/// Normalize a single path lexically (`a/./b/../c` -> `a/c`).
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    join_normalized(path, "")
}

fn push_component(out: &mut PathBuf, component: Component<'_>, keep_root: bool) {
    match component {
        Component::Prefix(_) | Component::RootDir => {
            if keep_root {
                out.push(component.as_os_str());
            }
        }
        Component::CurDir => {}
        Component::ParentDir => match out.components().next_back() {
            Some(Component::Normal(_)) => {
                out.pop();
            }
            // `..` above the root stays at the root
            Some(Component::RootDir | Component::Prefix(_)) => {}
            _ => out.push(".."),
        },
        Component::Normal(segment) => out.push(segment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn join(base: &str, tail: &str) -> String {
        join_normalized(Path::new(base), tail)
            .to_string_lossy()
            .replace('\\', "/")
    }

    #[test]
    fn test_join_simple() {
        assert_eq!(join("/base", "mapped/foo"), "/base/mapped/foo");
    }

    #[test]
    fn test_join_strips_cur_dir() {
        assert_eq!(join("/base", "./lib2/x"), "/base/lib2/x");
        assert_eq!(join("/base/./src", "x"), "/base/src/x");
    }

    #[test]
    fn test_join_parent_dir() {
        assert_eq!(join("/base/src", "../lib/x"), "/base/lib/x");
        assert_eq!(join("/", "../x"), "/x");
    }

    #[test]
    fn test_join_absolute_tail_is_appended() {
        assert_eq!(join("/base", "/abs/x"), "/base/abs/x");
    }

    #[test]
    fn test_join_relative_base() {
        assert_eq!(join("base", "../../x"), "../x");
        assert_eq!(join("a", ".."), ".");
    }

    #[test]
    fn test_join_trailing_slash() {
        assert_eq!(join("/base/", "types/"), "/base/types/");
        assert_eq!(join("/base", "pkgs/x/"), "/base/pkgs/x/");
        assert_eq!(join("/base/", "types"), "/base/types");
        assert_eq!(join("/base", "/"), "/base/");
        assert_eq!(join("a", "../"), "./");
    }

    #[test]
    fn test_normalize() {
        let normalized = normalize(Path::new("/a/./b/../c"));
        assert_eq!(normalized.to_string_lossy().replace('\\', "/"), "/a/c");

        let normalized = normalize(Path::new("/a/b/../c/"));
        assert_eq!(normalized.to_string_lossy().replace('\\', "/"), "/a/c/");
    }
}
