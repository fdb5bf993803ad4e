//! Windows path and command-line string helpers
//!
//! Registered paths are Windows paths regardless of where a plan is
//! computed, so these helpers work on strings rather than `std::path`,
//! which would not split on `\` when previewing from another OS.

/// Whether `path` is absolute in the Windows sense (`C:\`, `\\server`, `\`)
pub fn is_absolute(path: &str) -> bool {
    let bytes = path.as_bytes();
    if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        return is_separator(bytes[2] as char);
    }
    path.starts_with('\\') || path.starts_with('/')
}

/// Directory part of `path`, without the trailing separator
pub fn parent(path: &str) -> &str {
    match path.rfind(is_separator) {
        Some(0) => &path[..1],
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Join `rel` onto `base` and resolve `.` and `..` segments
pub fn join(base: &str, rel: &str) -> String {
    let joined = if base.is_empty() {
        rel.to_string()
    } else {
        format!("{}\\{}", base, rel)
    };
    normalize(&joined)
}

/// Collapse separators and resolve `.` and `..` segments
///
/// `..` never climbs above the root (drive, UNC prefix or leading `\`).
pub fn normalize(path: &str) -> String {
    let (root, rest) = split_root(path);
    let mut parts: Vec<&str> = Vec::new();
    for segment in rest.split(is_separator) {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|p| *p != "..") {
                    parts.pop();
                } else if root.is_empty() {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }
    format!("{}{}", root, parts.join("\\"))
}

/// Wrap `value` in double quotes, escaping embedded quotes as `\"`
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

fn is_separator(c: char) -> bool {
    c == '\\' || c == '/'
}

fn split_root(path: &str) -> (String, &str) {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        let rest = &path[2..];
        if rest.starts_with(is_separator) {
            return (format!("{}\\", &path[..2]), &rest[1..]);
        }
        return (path[..2].to_string(), rest);
    }
    if path.starts_with("\\\\") || path.starts_with("//") {
        return ("\\\\".to_string(), &path[2..]);
    }
    if path.starts_with(is_separator) {
        return ("\\".to_string(), &path[1..]);
    }
    (String::new(), path)
}
