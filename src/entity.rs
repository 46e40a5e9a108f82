use std::collections::HashMap;

use serde::Deserialize;

use crate::claims::{Claim, GetClaimsRequest};
use crate::client::{Client, Config};
use crate::error::Result;
use crate::params;

/// `wbgetentities`
///
/// <https://www.wikidata.org/w/api.php?action=help&modules=wbgetentities>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetEntitiesRequest {
    url: String,
}

impl GetEntitiesRequest {
    pub fn new<S: AsRef<str>>(ids: &[S]) -> Result<Self> {
        Self::new_with(&Config::default(), ids)
    }

    pub fn new_with<S: AsRef<str>>(config: &Config, ids: &[S]) -> Result<Self> {
        params::check_entity_ids(ids)?;
        let mut url = params::action_url(&config.wikidata_api, "wbgetentities");
        url.push_str(&params::param("ids", ids));
        Ok(Self { url })
    }

    fn push(mut self, part: String) -> Self {
        self.url.push_str(&part);
        self
    }

    pub fn sites<S: AsRef<str>>(self, sites: &[S]) -> Self {
        self.push(params::param("sites", sites))
    }

    pub fn titles<S: AsRef<str>>(self, titles: &[S]) -> Self {
        self.push(params::param("titles", titles))
    }

    pub fn redirects(self, follow: bool) -> Self {
        let value = if follow { "yes" } else { "no" };
        self.push(params::param("redirects", [value]))
    }

    /// Default on the API side: `info|sitelinks|aliases|labels|descriptions|claims|datatype`.
    pub fn props<S: AsRef<str>>(self, props: &[S]) -> Self {
        self.push(params::param("props", props))
    }

    pub fn languages<S: AsRef<str>>(self, languages: &[S]) -> Self {
        self.push(params::param("languages", languages))
    }

    pub fn language_fallback(self, fallback: bool) -> Self {
        if fallback {
            self.push(params::flag("languagefallback"))
        } else {
            self
        }
    }

    pub fn normalize(self, normalize: bool) -> Self {
        if normalize {
            self.push(params::flag("normalize"))
        } else {
            self
        }
    }

    pub fn site_filter<S: AsRef<str>>(self, sites: &[S]) -> Self {
        self.push(params::param("sitefilter", sites))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Entities keyed by id.
    pub async fn get(&self, client: &Client) -> Result<HashMap<String, Entity>> {
        let res: GetEntitiesResponse = client.query(&self.url).await?;
        Ok(res.entities)
    }
}

#[derive(Debug, Deserialize)]
struct GetEntitiesResponse {
    #[serde(default)]
    entities: HashMap<String, Entity>,
}

/// An item, property or lexeme record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Entity {
    pub id: String,
    pub pageid: u64,
    pub ns: i64,
    pub title: String,
    pub lastrevid: u64,
    pub modified: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Only present on properties.
    pub datatype: Option<String>,
    pub labels: HashMap<String, Label>,
    pub descriptions: HashMap<String, Description>,
    pub aliases: HashMap<String, Vec<Alias>>,
    pub claims: HashMap<String, Vec<Claim>>,
    pub sitelinks: HashMap<String, SiteLink>,
    /// Set (to an empty string) when the requested id does not exist.
    pub missing: Option<String>,
}

impl Entity {
    pub fn label(&self, language: &str) -> Option<&str> {
        self.labels.get(language).map(|l| l.value.as_str())
    }

    pub fn description(&self, language: &str) -> Option<&str> {
        self.descriptions.get(language).map(|d| d.value.as_str())
    }

    pub fn aliases(&self, language: &str) -> impl Iterator<Item = &str> {
        self.aliases
            .get(language)
            .into_iter()
            .flatten()
            .map(|a| a.value.as_str())
    }

    pub fn is_missing(&self) -> bool {
        self.missing.is_some()
    }

    /// `wbgetclaims` for this entity.
    pub fn claims_request(&self) -> Result<GetClaimsRequest> {
        GetClaimsRequest::for_entity(&self.id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Label {
    pub language: String,
    pub value: String,
    /// Set when the label came from a fallback language.
    #[serde(rename = "for-language")]
    pub for_language: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Description {
    pub language: String,
    pub value: String,
    #[serde(rename = "for-language")]
    pub for_language: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Alias {
    pub language: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteLink {
    pub site: String,
    pub title: String,
    pub badges: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const BASE: &str = "https://www.wikidata.org/w/api.php?action=wbgetentities&format=json";

    #[test]
    fn single_id_url() {
        let req = GetEntitiesRequest::new(&["Q1"]).unwrap();
        assert_eq!(req.url(), format!("{BASE}&ids=Q1"));
    }

    #[test]
    fn languages_are_pipe_joined() {
        let req = GetEntitiesRequest::new(&["Q1"]).unwrap().languages(&["en", "fr"]);
        assert_eq!(req.url(), format!("{BASE}&ids=Q1&languages=en|fr"));
    }

    #[test]
    fn setters_append_in_call_order() {
        let req = GetEntitiesRequest::new(&["Q1", "Q42"])
            .unwrap()
            .props(&["labels", "claims"])
            .redirects(false)
            .language_fallback(true)
            .normalize(false)
            .site_filter(&["enwiki"]);
        assert_eq!(
            req.url(),
            format!(
                "{BASE}&ids=Q1|Q42&props=labels|claims&redirects=no&languagefallback=&sitefilter=enwiki"
            )
        );
    }

    #[test]
    fn sites_and_titles() {
        let req = GetEntitiesRequest::new(&["Q1"])
            .unwrap()
            .sites(&["enwiki"])
            .titles(&["Big Bang"])
            .redirects(true)
            .normalize(true);
        assert!(req
            .url()
            .ends_with("&sites=enwiki&titles=Big%20Bang&redirects=yes&normalize="));
    }

    #[test]
    fn lowercase_ids_are_accepted() {
        let req = GetEntitiesRequest::new(&["q42", "p31"]).unwrap();
        assert_eq!(req.url(), format!("{BASE}&ids=q42|p31"));
    }

    #[test]
    fn no_ids_is_validation_error() {
        let ids: Vec<String> = Vec::new();
        let err = GetEntitiesRequest::new(&ids).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn custom_endpoint() {
        let config = Config {
            wikidata_api: "http://localhost:8080/api.php".into(),
            ..Config::default()
        };
        let req = GetEntitiesRequest::new_with(&config, &["P31"]).unwrap();
        assert_eq!(
            req.url(),
            "http://localhost:8080/api.php?action=wbgetentities&format=json&ids=P31"
        );
    }

    #[test]
    fn decodes_entity_and_helpers() {
        let json = r#"{
            "entities": {
                "Q42": {
                    "type": "item", "id": "Q42", "pageid": 138, "ns": 0,
                    "title": "Q42", "lastrevid": 1, "modified": "2024-01-01T00:00:00Z",
                    "labels": {"en": {"language": "en", "value": "Douglas Adams"}},
                    "descriptions": {"en": {"language": "en", "value": "English writer"}},
                    "aliases": {"en": [{"language": "en", "value": "DNA"}]},
                    "sitelinks": {"enwiki": {"site": "enwiki", "title": "Douglas Adams", "badges": []}},
                    "claims": {
                        "P31": [{
                            "id": "Q42$F078E5B3", "rank": "normal", "type": "statement",
                            "mainsnak": {
                                "snaktype": "value", "property": "P31", "hash": "ad7d",
                                "datatype": "wikibase-item",
                                "datavalue": {
                                    "type": "wikibase-entityid",
                                    "value": {"entity-type": "item", "numeric-id": 5, "id": "Q5"}
                                }
                            }
                        }]
                    }
                },
                "Q0": {"id": "Q0", "missing": ""}
            },
            "success": 1
        }"#;
        let res: GetEntitiesResponse = serde_json::from_str(json).unwrap();
        let douglas = &res.entities["Q42"];
        assert_eq!(douglas.label("en"), Some("Douglas Adams"));
        assert_eq!(douglas.description("en"), Some("English writer"));
        assert_eq!(douglas.label("fr"), None);
        assert_eq!(douglas.aliases("en").collect::<Vec<_>>(), vec!["DNA"]);
        assert!(!douglas.is_missing());

        let claim = &douglas.claims["P31"][0];
        let value = &claim.mainsnak.datavalue.as_ref().unwrap().value;
        assert_eq!(value.as_fields().unwrap().id, "Q5");

        assert!(res.entities["Q0"].is_missing());
    }

    #[test]
    fn claims_request_for_entity() {
        let entity = Entity {
            id: "Q1".into(),
            ..Entity::default()
        };
        let req = entity.claims_request().unwrap();
        assert!(req.url().ends_with("action=wbgetclaims&format=json&entity=Q1"));
    }
}
