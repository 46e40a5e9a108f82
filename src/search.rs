//! `wbsearchentities` and its paging.

use std::fmt;

use serde::Deserialize;

use crate::client::{Client, Config};
use crate::error::{Error, Result};
use crate::params;

/// Page size the API uses when `limit` is not given.
pub const DEFAULT_LIMIT: u32 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EntityType {
    #[default]
    Item,
    Property,
    Lexeme,
    Form,
    Sense,
}

impl EntityType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Item => "item",
            EntityType::Property => "property",
            EntityType::Lexeme => "lexeme",
            EntityType::Form => "form",
            EntityType::Sense => "sense",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// <https://www.wikidata.org/w/api.php?action=help&modules=wbsearchentities>
///
/// Besides the URL the request remembers its settings so that a result page
/// can ask for the page after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntitiesRequest {
    url: String,
    api: String,
    search: String,
    language: String,
    limit: u32,
    entity_type: Option<EntityType>,
    props: Vec<String>,
    strict_language: bool,
    continue_from: u64,
}

impl SearchEntitiesRequest {
    pub fn new(search: &str, language: &str) -> Result<Self> {
        Self::new_with(&Config::default(), search, language)
    }

    pub fn new_with(config: &Config, search: &str, language: &str) -> Result<Self> {
        Self::at(&config.wikidata_api, search, language)
    }

    fn at(api: &str, search: &str, language: &str) -> Result<Self> {
        if search.trim().is_empty() {
            return Err(Error::validation("search text must not be empty"));
        }
        if language.trim().is_empty() {
            return Err(Error::validation("language must not be empty"));
        }
        let mut url = params::action_url(api, "wbsearchentities");
        url.push_str(&params::param("search", [search]));
        url.push_str(&params::param("language", [language]));
        Ok(Self {
            url,
            api: api.to_string(),
            search: search.to_string(),
            language: language.to_string(),
            limit: DEFAULT_LIMIT,
            entity_type: None,
            props: Vec::new(),
            strict_language: false,
            continue_from: 0,
        })
    }

    fn push(mut self, part: String) -> Self {
        self.url.push_str(&part);
        self
    }

    /// Results per page. `0` means the API default.
    pub fn limit(mut self, limit: u32) -> Self {
        let limit = if limit == 0 { DEFAULT_LIMIT } else { limit };
        self.limit = limit;
        self.push(params::param("limit", [limit.to_string()]))
    }

    pub fn strict_language(mut self, strict: bool) -> Self {
        if strict {
            self.strict_language = true;
            self.push(params::flag("strictlanguage"))
        } else {
            self
        }
    }

    pub fn entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = Some(entity_type);
        self.push(params::param("type", [entity_type.as_str()]))
    }

    /// Default on the API side: `url`.
    pub fn props<S: AsRef<str>>(mut self, props: &[S]) -> Self {
        self.props = props.iter().map(|p| p.as_ref().to_string()).collect();
        self.push(params::param("props", props))
    }

    /// Offset of the first result.
    pub fn continue_from(mut self, offset: u64) -> Self {
        self.continue_from = offset;
        self.push(params::param("continue", [offset.to_string()]))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn page_size(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.continue_from
    }

    /// Same search, same settings, starting one page further.
    pub fn next_page(&self) -> Self {
        // Rebuilding from validated fields cannot fail.
        let mut next = Self {
            url: params::action_url(&self.api, "wbsearchentities"),
            api: self.api.clone(),
            search: self.search.clone(),
            language: self.language.clone(),
            limit: DEFAULT_LIMIT,
            entity_type: None,
            props: Vec::new(),
            strict_language: false,
            continue_from: 0,
        };
        next.url.push_str(&params::param("search", [&self.search]));
        next.url.push_str(&params::param("language", [&self.language]));

        next = next.limit(self.limit);
        if let Some(entity_type) = self.entity_type {
            next = next.entity_type(entity_type);
        }
        if !self.props.is_empty() {
            next = next.props(&self.props[..]);
        }
        if self.strict_language {
            next = next.strict_language(true);
        }
        next.continue_from(self.continue_from + u64::from(self.limit))
    }

    pub async fn get(&self, client: &Client) -> Result<SearchEntitiesResponse> {
        let page: SearchPage = client.query(&self.url).await?;
        Ok(SearchEntitiesResponse {
            searchinfo: page.searchinfo,
            search: page.search,
            search_continue: page.search_continue,
            success: page.success,
            current_continue: self.continue_from,
            request: self.clone(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchPage {
    searchinfo: SearchInfo,
    search: Vec<SearchEntity>,
    #[serde(rename = "search-continue")]
    search_continue: Option<u64>,
    success: u32,
}

/// One page of search hits.
#[derive(Debug, Clone)]
pub struct SearchEntitiesResponse {
    pub searchinfo: SearchInfo,
    pub search: Vec<SearchEntity>,
    /// Offset of the next page as reported by the API, absent on the last page.
    pub search_continue: Option<u64>,
    pub success: u32,
    /// Offset this page was fetched with.
    pub current_continue: u64,
    pub request: SearchEntitiesRequest,
}

impl SearchEntitiesResponse {
    pub fn has_next(&self) -> bool {
        self.search_continue.is_some()
    }

    pub fn next_request(&self) -> SearchEntitiesRequest {
        self.request.next_page()
    }

    pub async fn next(&self, client: &Client) -> Result<SearchEntitiesResponse> {
        self.next_request().get(client).await
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchInfo {
    pub search: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchEntity {
    pub repository: String,
    pub id: String,
    pub concepturi: String,
    pub title: String,
    pub pageid: u64,
    pub url: String,
    pub label: String,
    pub description: String,
    #[serde(rename = "match")]
    pub match_info: SearchMatch,
    /// Only present on properties.
    pub datatype: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchMatch {
    /// `label`, `alias`, `description` or `entityId`.
    #[serde(rename = "type")]
    pub match_type: String,
    pub language: String,
    pub text: String,
}
