//! # datatree
//!
//! Visualize nested data structures as a color-annotated tree on the
//! terminal: one line per node, rotating connector colors per depth level,
//! type labels in parentheses, and a dotted index path (e.g. `1.2`) for
//! navigating to any element.
//!
//! ```
//! use datatree::{TreeRenderer, Value};
//!
//! let value = Value::map([
//!     ("name", Value::from("Alice")),
//!     ("scores", Value::list([Value::from(95), Value::from(88)])),
//! ]);
//!
//! let text = TreeRenderer::plain().render_to_string(&value)?;
//! assert_eq!(text.lines().count(), 4);
//! # Ok::<(), datatree::RenderError>(())
//! ```
//!
//! Rendering is a single synchronous depth-first traversal. Cyclic inputs
//! (constructible only through [`Value::Shared`] cells) fail with
//! [`RenderError::CyclicStructure`]; nesting past the configured limit
//! fails with [`RenderError::InputTooDeep`]. Everything else renders.

pub mod error;
pub mod renderer;
pub mod value;

pub use error::{RenderError, Result};
pub use renderer::{
    Classify, DefaultClassifier, LineComposer, NodeKind, Palette, RenderContext, TreeRenderer,
};
pub use value::{Leaf, Value};
