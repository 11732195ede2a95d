use crate::value::Value;

/// Per-call rendering state threaded through the recursion.
///
/// Each child receives its own appended copy via [`RenderContext::child`];
/// a context is never mutated after being handed to a deeper call, so
/// ancestors never observe a descendant's state.
#[derive(Debug, Clone)]
pub struct RenderContext {
    depth: usize,
    last_flags: Vec<bool>,
    path: Vec<usize>,
}

impl RenderContext {
    pub fn root() -> Self {
        Self {
            depth: 0,
            last_flags: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Context for descending into the child at `index`, extending the
    /// is-last stack and the index path by one level.
    pub fn child(&self, index: usize, is_last: bool) -> Self {
        let mut last_flags = self.last_flags.clone();
        last_flags.push(is_last);
        let mut path = self.path.clone();
        path.push(index);
        Self {
            depth: self.depth + 1,
            last_flags,
            path,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether the ancestor at `level` still has siblings below it, meaning
    /// its vertical line must continue through this row.
    pub fn continues_at(&self, level: usize) -> bool {
        self.last_flags.get(level).map(|last| !last).unwrap_or(false)
    }

    /// Dotted zero-based index path accumulated from the root, e.g. "1.2".
    pub fn index_path(&self) -> String {
        self.path
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Index path of the child at `index`, without building its context.
    pub fn child_path(&self, index: usize) -> String {
        if self.path.is_empty() {
            index.to_string()
        } else {
            format!("{}.{index}", self.index_path())
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::root()
    }
}

/// How a value renders: with named children, positional children, or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Keyed,
    Indexed,
    Leaf,
}

/// Classification strategy applied to every value encountered.
///
/// The default maps the value variants predictably (maps keyed; lists,
/// tuples and sets indexed; everything else leaf). A custom classifier can
/// demote a container to a leaf, collapsing it to a single line with its
/// summary form.
pub trait Classify {
    fn classify(&self, value: &Value) -> NodeKind;
}

/// The standard classification table.
pub struct DefaultClassifier;

impl Classify for DefaultClassifier {
    fn classify(&self, value: &Value) -> NodeKind {
        match value {
            Value::Map(_) => NodeKind::Keyed,
            Value::List(_) | Value::Tuple(_) | Value::Set(_) => NodeKind::Indexed,
            Value::Leaf(_) => NodeKind::Leaf,
            Value::Shared(cell) => self.classify(&cell.borrow()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Leaf;

    #[test]
    fn child_context_is_an_appended_copy() {
        let root = RenderContext::root();
        let child = root.child(2, false);
        let grandchild = child.child(0, true);

        // ancestors untouched
        assert_eq!(root.depth(), 0);
        assert_eq!(root.index_path(), "");
        assert_eq!(child.index_path(), "2");

        assert_eq!(grandchild.depth(), 2);
        assert_eq!(grandchild.index_path(), "2.0");
        assert!(grandchild.continues_at(0));
        assert!(!grandchild.continues_at(1));
    }

    #[test]
    fn child_path_matches_built_context() {
        let ctx = RenderContext::root().child(1, true);
        assert_eq!(ctx.child_path(2), "1.2");
        assert_eq!(ctx.child(2, true).index_path(), "1.2");
        assert_eq!(RenderContext::root().child_path(0), "0");
    }

    #[test]
    fn default_classification_table() {
        let classifier = DefaultClassifier;
        assert_eq!(
            classifier.classify(&Value::map([("k", Value::from(1))])),
            NodeKind::Keyed
        );
        assert_eq!(classifier.classify(&Value::list([])), NodeKind::Indexed);
        assert_eq!(classifier.classify(&Value::tuple([])), NodeKind::Indexed);
        assert_eq!(classifier.classify(&Value::set([])), NodeKind::Indexed);
        assert_eq!(
            classifier.classify(&Value::Leaf(Leaf::Null)),
            NodeKind::Leaf
        );
        assert_eq!(
            classifier.classify(&Value::shared(Value::list([]))),
            NodeKind::Indexed
        );
    }
}
