//! Typed access to the WikiData action API and the Wikipedia query API.
//!
//! ```no_run
//! # async fn run() -> wikidata_client::Result<()> {
//! use wikidata_client::{Client, GetEntitiesRequest};
//!
//! let client = Client::new()?;
//! let entities = GetEntitiesRequest::new(&["Q42"])?
//!     .languages(&["en"])
//!     .get(&client)
//!     .await?;
//! println!("{:?}", entities["Q42"].label("en"));
//! # Ok(())
//! # }
//! ```

pub mod badges;
pub mod claims;
pub mod client;
pub mod entity;
pub mod error;
mod params;
pub mod search;
pub mod value;
pub mod wikipage;

pub use badges::get_available_badges;
pub use claims::{Claim, DataValue, GetClaimsRequest, Rank, Reference, Snak};
pub use client::{Client, Config};
pub use entity::{Alias, Description, Entity, GetEntitiesRequest, Label, SiteLink};
pub use error::{Error, ErrorKind, Result};
pub use search::{EntityType, SearchEntitiesRequest, SearchEntitiesResponse, SearchEntity};
pub use value::{DataValueFields, DynamicValue, ValueKind};
pub use wikipage::{get_page_item, image_resizer_url, WikiPage};
