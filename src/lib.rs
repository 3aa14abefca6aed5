//! Immutable builder for HTML `<select>` controls.
//!
//! A [`Select`] carries a bound value and a tree of `<option>`/`<optgroup>`
//! nodes. Every builder call returns a fresh `Select`, and every call that
//! touches either the value or the tree re-runs selection propagation so that
//! each option's `selected` flag matches the bound value.
//!
//! ```
//! use html_select::Select;
//!
//! let select = Select::new()
//!     .name("color")
//!     .options([("r", "Red"), ("g", "Green")])
//!     .value("g");
//!
//! assert_eq!(
//!     select.render(),
//!     "<select name=\"color\"><option value=\"r\">Red</option>\
//!      <option value=\"g\" selected>Green</option></select>"
//! );
//! ```

mod element;
mod propagate;
mod render;
mod select;
mod value;

pub use element::{Attributes, Element, Node, Optgroup, OptionElement, Selectable};
pub use propagate::{has_any_selection, propagate};
pub use select::{MULTIPLE_NAME_SUFFIX, OptionEntry, PLACEHOLDER_VALUE, Select};
pub use value::{BoundValue, Scalar, ValueSet};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
