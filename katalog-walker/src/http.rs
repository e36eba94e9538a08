use crate::error::{Result, WalkError};
use crate::session::{DomElement, PageSession};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::debug;

/// An owned slice of markup. scraper's parsed documents are not `Send`, so
/// handles keep the raw HTML and re-parse per query; that lets them survive
/// navigations and await points without borrowing a live document.
#[derive(Debug, Clone)]
pub struct HtmlFragment {
    html: String,
    is_document: bool,
}

impl HtmlFragment {
    pub fn from_document(html: &str) -> Self {
        Self {
            html: html.to_string(),
            is_document: true,
        }
    }

    pub fn from_fragment(html: &str) -> Self {
        Self {
            html: html.to_string(),
            is_document: false,
        }
    }

    fn parse(&self) -> Html {
        if self.is_document {
            Html::parse_document(&self.html)
        } else {
            Html::parse_fragment(&self.html)
        }
    }

    /// The element this fragment was cut from. Fragments get wrapped in a
    /// synthetic root when re-parsed, so step one level down.
    fn own_element<'a>(&self, doc: &'a Html) -> Option<ElementRef<'a>> {
        let root = doc.root_element();
        if self.is_document {
            Some(root)
        } else {
            root.children().find_map(ElementRef::wrap)
        }
    }
}

impl DomElement for HtmlFragment {
    fn text(&self) -> String {
        let doc = self.parse();
        let Some(element) = self.own_element(&doc) else {
            return String::new();
        };
        element
            .text()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn attr(&self, name: &str) -> Option<String> {
        let doc = self.parse();
        self.own_element(&doc)
            .and_then(|el| el.value().attr(name))
            .map(str::to_string)
    }

    fn select(&self, selector: &str) -> Result<Vec<Self>> {
        let parsed = Selector::parse(selector).map_err(|e| WalkError::BadSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;
        let doc = self.parse();
        Ok(doc
            .select(&parsed)
            .map(|el| HtmlFragment::from_fragment(&el.html()))
            .collect())
    }
}

/// Live session over plain HTTP. Server-rendered storefront markup already
/// contains submenu content, so `reveal` has nothing to trigger here; the
/// hover/click contract matters for richer session implementations.
pub struct HttpSession {
    client: Client,
    settle_delay: Duration,
    closed: bool,
}

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0 katalog/0.2";

impl HttpSession {
    pub fn new() -> Result<Self> {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| WalkError::SessionFatal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            settle_delay: Duration::from_millis(250),
            closed: false,
        })
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}

impl PageSession for HttpSession {
    type Element = HtmlFragment;

    async fn goto(&mut self, url: &str) -> Result<HtmlFragment> {
        if self.closed {
            return Err(WalkError::SessionFatal("session already closed".to_string()));
        }
        debug!(url, "fetching");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WalkError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(WalkError::NavigationFailed {
                url: url.to_string(),
                reason: format!("status {status}"),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| WalkError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(HtmlFragment::from_document(&body))
    }

    async fn reveal(&mut self, _element: &HtmlFragment) -> Result<()> {
        debug!("reveal is a no-op for static HTML sessions");
        Ok(())
    }

    async fn settle(&mut self) {
        tokio::time::sleep(self.settle_delay).await;
    }

    async fn close(&mut self) {
        debug!("closing HTTP session");
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::SelectorConfig;
    use crate::walker::HierarchyWalker;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    #[test]
    fn test_fragment_text_collapses_whitespace() {
        let el = HtmlFragment::from_fragment("<a href=\"/x\">  Home \n &amp; Garden </a>");
        assert_eq!(el.text(), "Home & Garden");
    }

    #[test]
    fn test_fragment_attr_reads_own_element() {
        let el = HtmlFragment::from_fragment("<a href=\"/cat\" class=\"nav\">Cat</a>");
        assert_eq!(el.attr("href").as_deref(), Some("/cat"));
        assert_eq!(el.attr("missing"), None);
    }

    #[test]
    fn test_select_is_scoped_and_ordered() {
        let el = HtmlFragment::from_document(
            "<html><body><nav><a href=\"/1\">One</a><a href=\"/2\">Two</a></nav>\
             <footer><a href=\"/3\">Three</a></footer></body></html>",
        );
        let links = el.select("nav a").unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].text(), "One");
        assert_eq!(links[1].attr("href").as_deref(), Some("/2"));
    }

    #[test]
    fn test_select_rejects_malformed_selector() {
        let el = HtmlFragment::from_fragment("<div></div>");
        let err = el.select("[unclosed").unwrap_err();
        assert!(matches!(err, WalkError::BadSelector { .. }));
    }

    #[test]
    fn test_nested_select_on_fragment() {
        let el = HtmlFragment::from_fragment(
            "<div class=\"filter\"><h4>Brand</h4><ul><li>Acme</li><li>Zed</li></ul></div>",
        );
        let labels = el.select("h4").unwrap();
        assert_eq!(labels[0].text(), "Brand");
        let values = el.select("ul li").unwrap();
        assert_eq!(values.len(), 2);
    }

    fn storefront_config() -> SelectorConfig {
        SelectorConfig {
            top_links: vec!["#legacy-nav a".to_string(), "nav.mega a".to_string()],
            sub_links: vec!["ul.subnav a".to_string()],
            filter_section: vec!["[data-testid=\"filter\"]".to_string()],
            filter_label: vec!["h4".to_string()],
            filter_value: vec!["ul li".to_string()],
            ..Default::default()
        }
    }

    async fn mount_page(server: &MockServer, route: &str, body: String) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string(body),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_walk_over_mock_storefront() {
        let server = MockServer::start().await;

        mount_page(
            &server,
            "/",
            "<html><body><nav class=\"mega\">\
             <a href=\"/electronics\">Electronics</a>\
             <a href=\"/fashion\">Fashion</a>\
             </nav></body></html>"
                .to_string(),
        )
        .await;

        mount_page(
            &server,
            "/electronics",
            "<html><body>\
             <ul class=\"subnav\"><a href=\"/electronics/phones\">Phones</a></ul>\
             <div data-testid=\"filter\"><h4>Brand</h4><ul><li>Acme</li><li>Zed</li></ul></div>\
             </body></html>"
                .to_string(),
        )
        .await;

        mount_page(
            &server,
            "/fashion",
            "<html><body><p>nothing to drill into</p></body></html>".to_string(),
        )
        .await;

        mount_page(
            &server,
            "/electronics/phones",
            "<html><body>\
             <div data-testid=\"filter\"><h4>Storage</h4><ul><li>64 GB</li><li>128 GB</li></ul></div>\
             </body></html>"
                .to_string(),
        )
        .await;

        let session = HttpSession::with_timeout(5)
            .unwrap()
            .with_settle_delay(Duration::from_millis(1));
        let outcome = HierarchyWalker::new(session, storefront_config())
            .with_max_depth(2)
            .with_resolve_retries(0)
            .walk(&server.uri())
            .await
            .unwrap();

        assert_eq!(outcome.categories.len(), 2);

        let electronics = &outcome.categories[0];
        assert_eq!(electronics.name, "Electronics");
        assert_eq!(electronics.attributes["Brand"], vec!["Acme", "Zed"]);
        assert_eq!(electronics.children.len(), 1);

        let phones = &electronics.children[0];
        assert_eq!(phones.name, "Phones");
        assert_eq!(phones.attributes["Storage"], vec!["64 GB", "128 GB"]);

        let fashion = &outcome.categories[1];
        assert!(fashion.children.is_empty());
        assert!(fashion.attributes.is_empty());
    }

    #[tokio::test]
    async fn test_http_404_is_navigation_failure() {
        let server = MockServer::start().await;
        mount_page(
            &server,
            "/",
            "<html><body><nav class=\"mega\">\
             <a href=\"/gone\">Gone</a><a href=\"/alive\">Alive</a>\
             </nav></body></html>"
                .to_string(),
        )
        .await;
        mount_page(&server, "/alive", "<html><body></body></html>".to_string()).await;
        // /gone is unmatched and returns wiremock's 404

        let session = HttpSession::with_timeout(5)
            .unwrap()
            .with_settle_delay(Duration::from_millis(1));
        let outcome = HierarchyWalker::new(session, storefront_config())
            .with_resolve_retries(0)
            .walk(&server.uri())
            .await
            .unwrap();

        let names: Vec<_> = outcome.categories.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Alive"]);
        assert_eq!(outcome.nav_failures, 1);
    }

    #[tokio::test]
    async fn test_goto_after_close_is_fatal() {
        let mut session = HttpSession::with_timeout(5).unwrap();
        session.close().await;
        let err = session.goto("http://127.0.0.1:1/").await.unwrap_err();
        assert!(err.is_fatal());
    }
}
