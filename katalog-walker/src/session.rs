use crate::error::Result;

/// A queryable element handle. Implementations own whatever markup they need,
/// so handles stay valid across navigations and await points.
pub trait DomElement: Sized {
    /// Concatenated descendant text with whitespace collapsed and trimmed.
    fn text(&self) -> String;

    /// Attribute value on the element itself.
    fn attr(&self, name: &str) -> Option<String>;

    /// Matches scoped to this element's subtree, in document order.
    fn select(&self, selector: &str) -> Result<Vec<Self>>;
}

/// The navigation capability the walker runs against. One page is interacted
/// with at a time; the handle is owned by a single run and released through
/// `close` on every exit path.
pub trait PageSession {
    type Element: DomElement;

    /// Load a URL and hand back the document root.
    async fn goto(&mut self, url: &str) -> Result<Self::Element>;

    /// Trigger whatever interaction (hover, click) the site needs before
    /// hidden submenu content renders under `element`. Must happen before
    /// child-selector resolution is attempted on that element.
    async fn reveal(&mut self, element: &Self::Element) -> Result<()>;

    /// Bounded pause between a reveal, or a resolution attempt that found
    /// nothing, and the next attempt. The session decides how long a settle
    /// takes; it must always return.
    async fn settle(&mut self);

    /// Release the underlying session resource.
    async fn close(&mut self);
}
