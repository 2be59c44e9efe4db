use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::data_models::ResultEntry;
use crate::errors::ConfigError;

const LINK_ATTR: &str = "href";

/// Compiled selectors describing one site's result markup.
///
/// `title` and `link` are matched inside each `container`; the first match
/// of each wins.
#[derive(Debug, Clone)]
pub struct ResultSelectors {
    container: Selector,
    title: Selector,
    link: Selector,
    container_src: String,
}

impl ResultSelectors {
    pub fn new(container: &str, title: &str, link: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            container: compile("container", container)?,
            title: compile("title", title)?,
            link: compile("link", link)?,
            container_src: container.to_string(),
        })
    }
}

fn compile(name: &'static str, selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|_| ConfigError::Selector {
        name,
        selector: selector.to_string(),
    })
}

pub struct Extractor {
    selectors: ResultSelectors,
}

impl Extractor {
    pub fn new(selectors: ResultSelectors) -> Self {
        Self { selectors }
    }

    pub fn parse(body: &str) -> Html {
        Html::parse_document(body)
    }

    /// Lazily yields a (title, link) pair per well-formed result container,
    /// in document order. Each call walks the document again from the top.
    pub fn extract<'a>(&'a self, document: &'a Html) -> impl Iterator<Item = ResultEntry> + 'a {
        let mut containers = document
            .select(&self.selectors.container)
            .enumerate()
            .peekable();

        if containers.peek().is_none() {
            warn!(
                selector = %self.selectors.container_src,
                "no results found, the site structure may have changed"
            );
        }

        containers.filter_map(move |(position, container)| self.entry(position, container))
    }

    fn entry(&self, position: usize, container: ElementRef<'_>) -> Option<ResultEntry> {
        let Some(title) = container.select(&self.selectors.title).next() else {
            warn!(position, "skipping result without a title element");
            return None;
        };
        let Some(anchor) = container.select(&self.selectors.link).next() else {
            warn!(position, "skipping result without a link element");
            return None;
        };
        let Some(link) = anchor.value().attr(LINK_ATTR) else {
            warn!(position, "skipping result whose link has no {LINK_ATTR}");
            return None;
        };

        let title = title.text().collect::<String>().trim().to_string();
        Some(ResultEntry::new(title, link))
    }
}
