use serde::Deserialize;

use crate::client::Client;
use crate::error::Result;
use crate::params;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BadgesResponse {
    badges: Vec<String>,
}

/// Item ids usable as sitelink badges (`wbavailablebadges`).
pub async fn get_available_badges(client: &Client) -> Result<Vec<String>> {
    let url = params::action_url(&client.config().wikidata_api, "wbavailablebadges");
    let res: BadgesResponse = client.query(&url).await?;
    Ok(res.badges)
}
