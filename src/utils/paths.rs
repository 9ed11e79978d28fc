//! Filename helpers

/// Extension of a path or bare filename: the final component from its last
/// `.` onward, lowercased (`"src/Main.PY"` → `".py"`).
///
/// Returns `None` when the final component has no dot or ends with one.
pub fn extension_of(filename: &str) -> Option<String> {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let dot = name.rfind('.')?;
    let ext = &name[dot..];
    if ext.len() == 1 {
        return None;
    }
    Some(ext.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::extension_of;

    #[test]
    fn takes_last_dot_of_final_component() {
        assert_eq!(extension_of("main.py").as_deref(), Some(".py"));
        assert_eq!(extension_of("bundle.min.JS").as_deref(), Some(".js"));
        assert_eq!(extension_of("/srv/app.d/run").as_deref(), None);
        assert_eq!(extension_of(r"C:\work\Program.CS").as_deref(), Some(".cs"));
    }

    #[test]
    fn handles_missing_or_trailing_dots() {
        assert_eq!(extension_of("Makefile"), None);
        assert_eq!(extension_of("notes."), None);
        assert_eq!(extension_of(""), None);
        assert_eq!(extension_of(".bashrc").as_deref(), Some(".bashrc"));
    }
}
