use std::io::{self, Write};
use std::rc::Rc;

use tracing::debug;

use crate::error::{RenderError, Result};
use crate::renderer::components::{LineComposer, Palette};
use crate::renderer::traits::{Classify, DefaultClassifier, NodeKind, RenderContext};
use crate::value::Value;

/// Default nesting limit before rendering fails with
/// [`RenderError::InputTooDeep`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Renders a [`Value`] as a color-annotated tree, one line per node,
/// depth-first pre-order, writing each line as it is produced.
///
/// The renderer holds no per-invocation state; independent renders on
/// independent values never interfere.
pub struct TreeRenderer {
    palette: Palette,
    classifier: Box<dyn Classify>,
    max_depth: usize,
}

impl TreeRenderer {
    pub fn new() -> Self {
        Self {
            palette: Palette::colored(),
            classifier: Box::new(DefaultClassifier),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// A renderer with all styling disabled.
    pub fn plain() -> Self {
        Self::new().with_palette(Palette::plain())
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_classifier(mut self, classifier: Box<dyn Classify>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Render to stdout.
    pub fn render(&self, value: &Value) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.render_to(value, &mut out)
    }

    /// Render into a string instead of a stream.
    pub fn render_to_string(&self, value: &Value) -> Result<String> {
        let mut buf = Vec::new();
        self.render_to(value, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Render to an arbitrary writer.
    pub fn render_to<W: Write>(&self, value: &Value, out: &mut W) -> Result<()> {
        let mut active = Vec::new();
        let mut lines = 0usize;
        self.render_root(value, &RenderContext::root(), &mut active, &mut lines, out)?;
        debug!(lines, "rendered value tree");
        Ok(())
    }

    /// The root is the one place a node prints without a parent loop: a
    /// bare leaf or an empty container gets a single elbow line with no
    /// index path; a populated container contributes no header of its own
    /// and its children become the top-level lines.
    fn render_root<W: Write>(
        &self,
        value: &Value,
        ctx: &RenderContext,
        active: &mut Vec<usize>,
        lines: &mut usize,
        out: &mut W,
    ) -> Result<()> {
        if let Value::Shared(cell) = value {
            let ptr = Rc::as_ptr(cell) as usize;
            if active.contains(&ptr) {
                return Err(RenderError::CyclicStructure {
                    path: ctx.index_path(),
                });
            }
            active.push(ptr);
            let inner = cell.borrow();
            let result = self.render_root(&inner, ctx, active, lines, out);
            active.pop();
            return result;
        }

        let composer = LineComposer::new(&self.palette);
        match self.classifier.classify(value) {
            NodeKind::Leaf => {
                writeln!(
                    out,
                    "{}{}{}",
                    composer.connector(0, true),
                    composer.label(&value.type_label()),
                    composer.leaf_tail(&value.to_string())
                )?;
                *lines += 1;
                Ok(())
            }
            NodeKind::Keyed | NodeKind::Indexed if value.is_empty_container() => {
                writeln!(
                    out,
                    "{}{}",
                    composer.connector(0, true),
                    composer.label(&value.type_label())
                )?;
                *lines += 1;
                Ok(())
            }
            NodeKind::Keyed | NodeKind::Indexed => {
                self.render_children(value, ctx, active, lines, out)
            }
        }
    }

    /// Print the entries of `value`, recursing into container children.
    fn render_children<W: Write>(
        &self,
        value: &Value,
        ctx: &RenderContext,
        active: &mut Vec<usize>,
        lines: &mut usize,
        out: &mut W,
    ) -> Result<()> {
        if ctx.depth() >= self.max_depth {
            return Err(RenderError::InputTooDeep {
                depth: ctx.depth(),
                limit: self.max_depth,
            });
        }

        match value {
            Value::Map(entries) => {
                let len = entries.len();
                for (i, (key, child)) in entries.iter().enumerate() {
                    self.emit_child(child, Some(key), i, i + 1 == len, ctx, active, lines, out)?;
                }
            }
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => {
                let len = items.len();
                for (i, child) in items.iter().enumerate() {
                    self.emit_child(child, None, i, i + 1 == len, ctx, active, lines, out)?;
                }
            }
            // callers only descend into containers
            Value::Leaf(_) | Value::Shared(_) => {}
        }
        Ok(())
    }

    /// Print one child line and, for container children, its subtree.
    ///
    /// Shared cells resolve here: the cell's identity joins the active path
    /// for the duration of the descent, so a cell that reaches itself again
    /// fails with `CyclicStructure` instead of recursing forever. The same
    /// cell at two sibling positions is fine.
    #[allow(clippy::too_many_arguments)]
    fn emit_child<W: Write>(
        &self,
        child: &Value,
        key: Option<&str>,
        index: usize,
        is_last: bool,
        ctx: &RenderContext,
        active: &mut Vec<usize>,
        lines: &mut usize,
        out: &mut W,
    ) -> Result<()> {
        if let Value::Shared(cell) = child {
            let ptr = Rc::as_ptr(cell) as usize;
            if active.contains(&ptr) {
                return Err(RenderError::CyclicStructure {
                    path: ctx.child_path(index),
                });
            }
            active.push(ptr);
            let inner = cell.borrow();
            let result = self.emit_child(&inner, key, index, is_last, ctx, active, lines, out);
            active.pop();
            return result;
        }

        let composer = LineComposer::new(&self.palette);
        let mut line = composer.prefix(ctx);
        line.push_str(&composer.connector(ctx.depth(), is_last));
        line.push_str(&composer.index(&ctx.child_path(index)));
        line.push(' ');
        if let Some(key) = key {
            line.push_str(&composer.key(key));
            line.push(' ');
        }
        line.push_str(&composer.label(&child.type_label()));

        match self.classifier.classify(child) {
            NodeKind::Leaf => {
                line.push_str(&composer.leaf_tail(&child.to_string()));
                writeln!(out, "{line}")?;
                *lines += 1;
            }
            NodeKind::Keyed | NodeKind::Indexed => {
                writeln!(out, "{line}")?;
                *lines += 1;
                self.render_children(child, &ctx.child(index, is_last), active, lines, out)?;
            }
        }
        Ok(())
    }
}

impl Default for TreeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Leaf;
    use pretty_assertions::assert_eq;

    fn render_plain(value: &Value) -> String {
        TreeRenderer::plain()
            .render_to_string(value)
            .expect("render should succeed")
    }

    #[test]
    fn map_with_nested_list() {
        let value = Value::map([
            ("a", Value::from(1)),
            ("b", Value::list([Value::from(2), Value::from(3)])),
        ]);
        let expected = "\
├── 0 a (int) ▶ 1
╰── 1 b (list)
    ├── 1.0 (int) ▶ 2
    ╰── 1.1 (int) ▶ 3
";
        assert_eq!(render_plain(&value), expected);
    }

    #[test]
    fn bare_leaf_root() {
        assert_eq!(render_plain(&Value::from(42)), "╰── (int) ▶ 42\n");
    }

    #[test]
    fn empty_root_containers_print_one_header() {
        assert_eq!(render_plain(&Value::list([])), "╰── (list)\n");
        assert_eq!(render_plain(&Value::map::<&str, _>([])), "╰── (map)\n");
    }

    #[test]
    fn nested_empty_container_has_header_and_no_children() {
        let value = Value::list([Value::map::<&str, _>([]), Value::from(1)]);
        let expected = "\
├── 0 (map)
╰── 1 (int) ▶ 1
";
        assert_eq!(render_plain(&value), expected);
    }

    #[test]
    fn continuation_lines_follow_unfinished_ancestors() {
        // first child is a container, so its subtree rows need the pipe
        let value = Value::map([
            ("inner", Value::list([Value::from(1), Value::from(2)])),
            ("tail", Value::from(3)),
        ]);
        let expected = "\
├── 0 inner (list)
│   ├── 0.0 (int) ▶ 1
│   ╰── 0.1 (int) ▶ 2
╰── 1 tail (int) ▶ 3
";
        assert_eq!(render_plain(&value), expected);
    }

    #[test]
    fn line_count_matches_node_count() {
        let value = Value::map([
            ("primitives", Value::list([Value::from(1), Value::from(2.5)])),
            ("flags", Value::tuple([Value::from(true), Value::null()])),
            ("tags", Value::set([Value::from("x")])),
        ]);
        // 3 container headers + 5 leaves
        let output = render_plain(&value);
        assert_eq!(output.lines().count(), 8);
    }

    #[test]
    fn preorder_keeps_subtrees_contiguous() {
        let value = Value::list([
            Value::list([Value::from("a1"), Value::from("a2")]),
            Value::list([Value::from("b1")]),
        ]);
        let output = render_plain(&value);
        let a2 = output.find("a2").expect("a2 rendered");
        let b_header = output.find("1 (list)").expect("b header rendered");
        assert!(a2 < b_header, "subtree A must finish before B starts");
    }

    #[test]
    fn shared_node_renders_at_each_position() {
        let cell = Rc::new(std::cell::RefCell::new(Value::from(9)));
        let value = Value::list([
            Value::Shared(Rc::clone(&cell)),
            Value::Shared(Rc::clone(&cell)),
        ]);
        let expected = "\
├── 0 (int) ▶ 9
╰── 1 (int) ▶ 9
";
        assert_eq!(render_plain(&value), expected);
    }

    #[test]
    fn cyclic_structure_is_an_error() {
        let cell = Rc::new(std::cell::RefCell::new(Value::null()));
        *cell.borrow_mut() = Value::list([Value::Shared(Rc::clone(&cell))]);
        let root = Value::Shared(cell);

        let err = TreeRenderer::plain()
            .render_to_string(&root)
            .expect_err("cycle must be detected");
        assert!(matches!(err, RenderError::CyclicStructure { path } if path == "0"));
    }

    #[test]
    fn depth_limit_is_enforced() {
        let deep = (0..10).fold(Value::from(1), |acc, _| Value::list([acc]));
        let err = TreeRenderer::plain()
            .with_max_depth(4)
            .render_to_string(&deep)
            .expect_err("limit must trip");
        assert!(matches!(
            err,
            RenderError::InputTooDeep { depth: 4, limit: 4 }
        ));
    }

    #[test]
    fn default_depth_limit_handles_reasonable_nesting() {
        let deep = (0..100).fold(Value::from(1), |acc, _| Value::list([acc]));
        assert!(TreeRenderer::plain().render_to_string(&deep).is_ok());
    }

    #[test]
    fn exotic_leaves_render_without_error() {
        let value = Value::list([
            Value::Leaf(Leaf::Bytes(vec![0x01, 0x02, 0x03])),
            Value::Leaf(Leaf::Class("User".into())),
            Value::Leaf(Leaf::Function("calculate_score".into())),
            Value::Leaf(Leaf::Error {
                kind: "ValueError".into(),
                message: "Sample error".into(),
            }),
        ]);
        let output = render_plain(&value);
        assert_eq!(output.lines().count(), 4);
        assert!(output.contains("(bytes) ▶ 0x010203"));
        assert!(output.contains("(class: User)"));
        assert!(output.contains("(function: calculate_score)"));
        assert!(output.contains("(ValueError) ▶ Sample error"));
    }

    #[test]
    fn colored_output_keeps_structure() {
        let value = Value::map([("k", Value::from(1))]);
        let colored = TreeRenderer::new()
            .render_to_string(&value)
            .expect("render should succeed");
        assert!(colored.contains('\x1b'));

        // stripping escapes recovers the plain rendering
        let mut stripped = String::new();
        let mut chars = colored.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                for d in chars.by_ref() {
                    if d == 'm' {
                        break;
                    }
                }
            } else {
                stripped.push(c);
            }
        }
        assert_eq!(stripped, render_plain(&value));
    }
}
