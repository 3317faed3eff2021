//! Helpers for `/`-separated vault references

/// Separator used inside references regardless of platform
pub const SEPARATOR: char = '/';

/// Bring a raw path into namespace-relative form.
///
/// Backslashes count as separators, empty and `.` segments are dropped and
/// `..` pops a segment. `..` at the root is discarded, so the result never
/// points outside the vault and never starts with a separator.
pub fn clean(raw: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in raw.split(|c: char| c == SEPARATOR || c == '\\') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    segments.join("/")
}

/// Containing directory of a reference, `""` for top-level documents
pub fn parent_of(reference: &str) -> String {
    let cleaned = clean(reference);
    match cleaned.rsplit_once(SEPARATOR) {
        Some((parent, _)) => parent.to_string(),
        None => String::new(),
    }
}

/// Last segment of a reference
pub fn file_name(reference: &str) -> &str {
    let trimmed = reference.trim_end_matches(|c: char| c == SEPARATOR || c == '\\');
    trimmed
        .rsplit(|c: char| c == SEPARATOR || c == '\\')
        .next()
        .unwrap_or(trimmed)
}

/// Whether the file name of a reference carries the given extension
pub fn has_extension(reference: &str, extension: &str) -> bool {
    let name = file_name(reference);
    match name.rsplit_once('.') {
        Some((stem, ext)) => !stem.is_empty() && ext.eq_ignore_ascii_case(extension),
        None => false,
    }
}

/// Append `.extension` unless the reference already ends with it
pub fn with_extension(reference: &str, extension: &str) -> String {
    if has_extension(reference, extension) {
        reference.to_string()
    } else {
        format!("{}.{}", reference, extension)
    }
}

/// Whether a directory reference denotes the vault root
pub fn is_root(dir: &str) -> bool {
    dir.chars().all(|c| c == SEPARATOR || c == '\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean() {
        assert_eq!(clean("/Notes/Main.md"), "Notes/Main.md");
        assert_eq!(clean("Notes\\Sub\\Part.md"), "Notes/Sub/Part.md");
        assert_eq!(clean("Notes/./Sub//Part.md"), "Notes/Sub/Part.md");
        assert_eq!(clean("Notes/Sub/../Part.md"), "Notes/Part.md");
        assert_eq!(clean("../../Part.md"), "Part.md");
        assert_eq!(clean("/"), "");
    }

    #[test]
    fn test_parent_of() {
        assert_eq!(parent_of("Main.md"), "");
        assert_eq!(parent_of("Notes/Main.md"), "Notes");
        assert_eq!(parent_of("/a/b/c.md"), "a/b");
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension("Main.md", "md"));
        assert!(has_extension("Notes/Main.MD", "md"));
        assert!(!has_extension("Main", "md"));
        assert!(!has_extension("Notes.md/Main", "md"));
        assert!(!has_extension(".md", "md"));
        assert!(!has_extension("image.png", "md"));
    }

    #[test]
    fn test_with_extension() {
        assert_eq!(with_extension("Main", "md"), "Main.md");
        assert_eq!(with_extension("Main.md", "md"), "Main.md");
        assert_eq!(with_extension("Result.txt", "md"), "Result.txt.md");
    }

    #[test]
    fn test_is_root() {
        assert!(is_root(""));
        assert!(is_root("/"));
        assert!(!is_root("Notes"));
    }
}
