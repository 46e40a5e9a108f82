use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use crate::client::{Client, Config};
use crate::error::{Error, Result};
use crate::params;
use crate::value::DynamicValue;

/// Statement rank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Deprecated,
    #[default]
    Normal,
    Preferred,
}

impl Rank {
    pub fn as_str(self) -> &'static str {
        match self {
            Rank::Deprecated => "deprecated",
            Rank::Normal => "normal",
            Rank::Preferred => "preferred",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `wbgetclaims`
///
/// <https://www.wikidata.org/w/api.php?action=help&modules=wbgetclaims>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetClaimsRequest {
    url: String,
}

impl GetClaimsRequest {
    /// Exactly one of `entity` and `claim` (a statement GUID) must be given.
    /// Empty strings count as absent.
    pub fn new(entity: Option<&str>, claim: Option<&str>) -> Result<Self> {
        Self::new_with(&Config::default(), entity, claim)
    }

    pub fn new_with(config: &Config, entity: Option<&str>, claim: Option<&str>) -> Result<Self> {
        let entity = entity.filter(|s| !s.is_empty());
        let claim = claim.filter(|s| !s.is_empty());
        let part = match (entity, claim) {
            (Some(entity), None) => {
                if !params::is_entity_id(entity) {
                    return Err(Error::validation(format!("malformed entity id {entity:?}")));
                }
                params::param("entity", [entity])
            }
            (None, Some(claim)) => params::param("claim", [claim]),
            (None, None) => return Err(Error::validation("either entity or claim must be provided")),
            (Some(_), Some(_)) => {
                return Err(Error::validation("entity and claim are mutually exclusive"))
            }
        };
        let mut url = params::action_url(&config.wikidata_api, "wbgetclaims");
        url.push_str(&part);
        Ok(Self { url })
    }

    pub fn for_entity(entity: &str) -> Result<Self> {
        Self::new(Some(entity), None)
    }

    pub fn for_claim(claim: &str) -> Result<Self> {
        Self::new(None, Some(claim))
    }

    fn push(mut self, part: String) -> Self {
        self.url.push_str(&part);
        self
    }

    pub fn property(self, property: &str) -> Self {
        self.push(params::param("property", [property]))
    }

    pub fn rank(self, rank: Rank) -> Self {
        self.push(params::param("rank", [rank.as_str()]))
    }

    /// Default on the API side: `references`.
    pub fn props<S: AsRef<str>>(self, props: &[S]) -> Self {
        self.push(params::param("props", props))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Claims keyed by property id.
    pub async fn get(&self, client: &Client) -> Result<HashMap<String, Vec<Claim>>> {
        let res: GetClaimsResponse = client.query(&self.url).await?;
        Ok(res.claims)
    }
}

#[derive(Debug, Deserialize)]
struct GetClaimsResponse {
    #[serde(default)]
    claims: HashMap<String, Vec<Claim>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Claim {
    pub id: String,
    pub rank: Rank,
    #[serde(rename = "type")]
    pub claim_type: String,
    pub mainsnak: Snak,
    pub qualifiers: HashMap<String, Vec<Snak>>,
    #[serde(rename = "qualifiers-order")]
    pub qualifiers_order: Vec<String>,
    pub references: Vec<Reference>,
}

/// A property/value pair.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Snak {
    /// `value`, `somevalue` or `novalue`.
    pub snaktype: String,
    pub property: String,
    pub hash: String,
    pub datatype: String,
    /// Absent unless `snaktype` is `value`.
    pub datavalue: Option<DataValue>,
}

impl Snak {
    pub fn value(&self) -> Option<&DynamicValue> {
        self.datavalue.as_ref().map(|dv| &dv.value)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataValue {
    #[serde(rename = "type")]
    pub value_type: String,
    pub value: DynamicValue,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Reference {
    pub hash: String,
    pub snaks: HashMap<String, Vec<Snak>>,
    #[serde(rename = "snaks-order")]
    pub snaks_order: Vec<String>,
}
