//! Exclusive page switching

/// Tracks which named page section (and matching nav link) is active
#[derive(Debug, Clone, Default)]
pub struct PageNavigator {
    pages: Vec<String>,
    active: Option<usize>,
}

impl PageNavigator {
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
            active: None,
        }
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn active(&self) -> Option<&str> {
        self.active.map(|i| self.pages[i].as_str())
    }

    pub fn is_active(&self, page: &str) -> bool {
        self.active() == Some(page)
    }

    /// Make `page` the single active page
    ///
    /// Unknown ids leave the current selection untouched and return `false`.
    pub fn show(&mut self, page: &str) -> bool {
        match self.pages.iter().position(|p| p == page) {
            Some(index) => {
                self.active = Some(index);
                tracing::debug!(page, "page shown");
                true
            }
            None => {
                tracing::warn!(page, "no such page");
                false
            }
        }
    }

    /// `href` of the nav link pointing at `page`
    pub fn link_href(page: &str) -> String {
        format!("#{}", page)
    }

    /// Page id targeted by an in-page `#id` link
    pub fn page_from_href(href: &str) -> Option<&str> {
        href.strip_prefix('#').filter(|id| !id.is_empty())
    }
}
