//! Syntactic path resolution.
//!
//! Nothing here touches the tree: resolution only rewrites strings, so a
//! resolved path may name a node that does not exist.

/// Resolve `expr` against the absolute directory `current_dir`.
///
/// `.` is dropped, `..` pops one component (never above root), a leading `/`
/// restarts from root, and doubled or trailing slashes are ignored. The
/// result is absolute and canonical, with root rendered as `/`.
pub fn resolve(current_dir: &str, expr: &str) -> String {
    if expr == current_dir {
        return expr.to_string();
    }

    let mut stack: Vec<&str> = current_dir.split('/').filter(|s| !s.is_empty()).collect();
    for (i, segment) in expr.split('/').enumerate() {
        match segment {
            "." => {},
            ".." => {
                stack.pop();
            },
            "" if i == 0 => stack.clear(),
            "" => {},
            other => stack.push(other),
        }
    }

    if stack.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", stack.join("/"))
    }
}

/// Split a resolved absolute path into `(parent, leaf)`.
///
/// Root splits into `("/", "")`.
pub fn split_parent(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(0) => ("/", &path[1..]),
        Some(i) => (&path[..i], &path[i + 1..]),
        None => ("/", path),
    }
}

/// Last component of an absolute path, or `/` for root.
pub fn basename(path: &str) -> &str {
    match split_parent(path) {
        (_, "") => "/",
        (_, leaf) => leaf,
    }
}
