//! Value representation for renderable data.

mod json;
mod types;

pub use types::{Leaf, Value};
