use owo_colors::{OwoColorize, Style};

use crate::renderer::traits::RenderContext;

/// Branch connector: this node has siblings below it.
pub const TEE: &str = "├── ";
/// Terminal connector: last sibling at its level.
pub const ELBOW: &str = "╰── ";
/// Vertical continuation drawn for ancestors that were not last.
pub const PIPE: &str = "│   ";
/// Padding of equal visual width for ancestors that were last.
pub const BLANK: &str = "    ";

/// Styling palette for rendered lines.
///
/// Structure (connector choice, ordering, index paths, labels) is the
/// contract; the palette only decorates it and can be swapped out or
/// disabled wholesale with [`Palette::plain`].
#[derive(Debug, Clone)]
pub struct Palette {
    /// Connector colors, rotated by depth modulo the palette length.
    pub connectors: Vec<Style>,
    /// Index paths and type names.
    pub index: Style,
    /// Parentheses around type labels.
    pub paren: Style,
    /// Map keys.
    pub key: Style,
    /// Leaf values.
    pub value: Style,
    /// The arrow between label and value.
    pub arrow: Style,
}

impl Palette {
    /// The reference scheme: five rotating connector colors, grey indices
    /// and type names, yellow parentheses, bright-cyan values.
    pub fn colored() -> Self {
        Self {
            connectors: vec![
                Style::new().cyan(),
                Style::new().magenta(),
                Style::new().green(),
                Style::new().blue(),
                Style::new().red(),
            ],
            index: Style::new().bright_black(),
            paren: Style::new().yellow(),
            key: Style::new().white(),
            value: Style::new().bright_cyan(),
            arrow: Style::new().white(),
        }
    }

    /// No styling at all. Output is the bare structural text.
    pub fn plain() -> Self {
        Self {
            connectors: vec![Style::new()],
            index: Style::new(),
            paren: Style::new(),
            key: Style::new(),
            value: Style::new(),
            arrow: Style::new(),
        }
    }

    /// Connector style for a depth level, rotating through the palette.
    pub fn connector(&self, depth: usize) -> Style {
        self.connectors[depth % self.connectors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::colored()
    }
}

/// Builds the styled text fragments of one rendered line.
pub struct LineComposer<'a> {
    palette: &'a Palette,
}

impl<'a> LineComposer<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self { palette }
    }

    /// Indentation columns for every ancestor level: a colored vertical
    /// continuation where the ancestor still has siblings below, blank
    /// padding where it was last.
    pub fn prefix(&self, ctx: &RenderContext) -> String {
        let mut out = String::new();
        for level in 0..ctx.depth() {
            if ctx.continues_at(level) {
                out.push_str(&PIPE.style(self.palette.connector(level)).to_string());
            } else {
                out.push_str(BLANK);
            }
        }
        out
    }

    /// Tee for a node with siblings below it, elbow for the last sibling,
    /// colored for the node's own depth.
    pub fn connector(&self, depth: usize, is_last: bool) -> String {
        let glyph = if is_last { ELBOW } else { TEE };
        glyph.style(self.palette.connector(depth)).to_string()
    }

    pub fn index(&self, path: &str) -> String {
        path.style(self.palette.index).to_string()
    }

    pub fn key(&self, key: &str) -> String {
        key.style(self.palette.key).to_string()
    }

    /// Type label in parentheses, e.g. `(int)` or `(class: User)`.
    pub fn label(&self, label: &str) -> String {
        format!(
            "{}{}{}",
            "(".style(self.palette.paren),
            label.style(self.palette.index),
            ")".style(self.palette.paren)
        )
    }

    /// Arrow plus literal value, appended to leaf lines only.
    pub fn leaf_tail(&self, value: &str) -> String {
        format!(
            "{}{}",
            " ▶ ".style(self.palette.arrow),
            value.style(self.palette.value)
        )
    }
}
