//! Workspace path handling
//!
//! Inputs are given relative to the repository checkout (the workspace).
//! Outputs are reported relative to it as well, because later workflow
//! steps may see the workspace mounted at a different location than this
//! process does.

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` and fold `..` into its parent
///
/// Symlinks are not resolved and the filesystem is not touched.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = match out.components().next_back() {
                    Some(Component::Normal(_)) => out.pop(),
                    Some(Component::RootDir) | Some(Component::Prefix(_)) => true,
                    _ => false,
                };
                if !popped {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Resolve an input path against the workspace
///
/// Absolute paths are only normalized.
pub fn resolve_path(workspace: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&workspace.join(path))
    }
}

/// Express `path` relative to the workspace
///
/// Paths outside the workspace get `..` components. When the two paths have
/// no common root (e.g. one of them is relative), `path` is returned as-is.
pub fn workspace_relpath(workspace: &Path, path: &Path) -> PathBuf {
    let ws = normalize(workspace);
    let target = normalize(path);

    if ws.is_absolute() != target.is_absolute() {
        return target;
    }

    let ws_parts: Vec<Component<'_>> = ws.components().collect();
    let target_parts: Vec<Component<'_>> = target.components().collect();

    let common = ws_parts
        .iter()
        .zip(target_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    if common == 0 {
        return target;
    }

    let mut rel = PathBuf::new();
    for _ in common..ws_parts.len() {
        rel.push("..");
    }
    for part in &target_parts[common..] {
        rel.push(part.as_os_str());
    }

    if rel.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        rel
    }
}
