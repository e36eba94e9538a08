pub mod error;
pub mod http;
pub mod node;
pub mod selectors;
pub mod session;
pub mod walker;

pub use error::{Result, WalkError};
pub use http::{HtmlFragment, HttpSession};
pub use node::CategoryNode;
pub use selectors::{SelectorConfig, SelectorTarget, resolve_first};
pub use session::{DomElement, PageSession};
pub use walker::{HierarchyWalker, ProgressCallback, WalkOutcome, resolve_link};
