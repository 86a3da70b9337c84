use compact_str::CompactString;

/// One workspace as rendered in the bar
///
/// Rebuilt from host state on every refresh, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceEntry {
    pub index: usize,
    /// Custom name if one is configured at this index, else the 1-based
    /// position as a string.
    pub name: CompactString,
    pub active: bool,
    pub empty: bool,
}

impl WorkspaceEntry {
    /// CSS class for the workspace label. The four combinations of
    /// (active, empty) map to four mutually exclusive classes.
    pub fn style_class(&self) -> &'static str {
        match (self.active, self.empty) {
            (true, true) => "workspace-label-empty-active",
            (true, false) => "workspace-label-nonempty-active",
            (false, true) => "workspace-label-empty-inactive",
            (false, false) => "workspace-label-nonempty-inactive",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(active: bool, empty: bool) -> WorkspaceEntry {
        WorkspaceEntry {
            index: 0,
            name: "1".into(),
            active,
            empty,
        }
    }

    #[test]
    fn test_style_classes_are_mutually_exclusive() {
        let classes = [
            entry(true, true).style_class(),
            entry(true, false).style_class(),
            entry(false, true).style_class(),
            entry(false, false).style_class(),
        ];

        for (i, a) in classes.iter().enumerate() {
            for b in classes.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_style_class_encodes_both_flags() {
        assert_eq!(entry(true, true).style_class(), "workspace-label-empty-active");
        assert_eq!(entry(false, false).style_class(), "workspace-label-nonempty-inactive");
    }
}
