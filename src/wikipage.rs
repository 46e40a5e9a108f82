use std::collections::HashMap;
use std::fmt::Display;

use serde::Deserialize;

use crate::client::{Client, Config};
use crate::error::{Error, Result};
use crate::params;

/// A Wikipedia page, by slug (`Douglas_Adams`) or title (`Douglas Adams`).
#[derive(Debug, Eq, PartialEq, Clone, Hash, Default)]
pub struct WikiPage(pub String);

impl Display for WikiPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl WikiPage {
    pub fn query_url(&self, config: &Config) -> Result<String> {
        if self.0.trim().is_empty() {
            return Err(Error::validation("page slug must not be empty"));
        }
        let mut url = params::action_url(&config.wikipedia_api, "query");
        url.push_str(&params::param("prop", ["pageprops"]));
        url.push_str(&params::param("titles", [&self.0]));
        Ok(url)
    }

    /// WikiData item id linked to this page, empty if the page has none.
    pub async fn item(&self, client: &Client) -> Result<String> {
        let url = self.query_url(client.config())?;
        let res: PagePropsQuery = client.query(&url).await?;
        Ok(res.first_item())
    }
}

/// Shorthand for [`WikiPage::item`].
pub async fn get_page_item(client: &Client, slug: &str) -> Result<String> {
    WikiPage(slug.to_owned()).item(client).await
}

/// Commons thumbnail of `image_name` scaled to `width` pixels.
pub fn image_resizer_url(config: &Config, image_name: &str, width: u32) -> String {
    format!(
        "{}?width={width}&f={}",
        config.image_resizer,
        urlencoding::encode(image_name)
    )
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PagePropsQuery {
    query: PagesQuery,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PagesQuery {
    pages: HashMap<String, PageEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PageEntry {
    pageprops: PageProps,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PageProps {
    wikibase_item: String,
}

impl PagePropsQuery {
    // a single title yields a single page
    fn first_item(self) -> String {
        self.query
            .pages
            .into_values()
            .next()
            .map(|page| page.pageprops.wikibase_item)
            .unwrap_or_default()
    }
}
