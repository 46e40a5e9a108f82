//! Query string assembly for the action API.
//!
//! Every request URL has the shape `<api>?action=<action>&format=json` with
//! one `&key=value` pair appended per configured parameter. Multi-valued
//! parameters are joined with `|`, which the API uses as its list separator.

use itertools::Itertools;
use regex::Regex;

use crate::error::{Error, Result};

lazy_static::lazy_static! {
    static ref ENTITY_ID: Regex =
        Regex::new(r"(?i)^(?:[QPM][1-9]\d*|L[1-9]\d*(?:-[FS][1-9]\d*)?)$").expect("valid entity id regex");
}

pub(crate) fn action_url(api: &str, action: &str) -> String {
    format!("{api}?action={action}&format=json")
}

/// `&key=v1|v2|...`, each value percent-encoded on its own.
pub(crate) fn param<I, S>(key: &str, values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = values
        .into_iter()
        .map(|v| urlencoding::encode(v.as_ref()).into_owned())
        .join("|");
    format!("&{key}={joined}")
}

/// Presence-only flag, e.g. `&normalize=`.
pub(crate) fn flag(key: &str) -> String {
    format!("&{key}=")
}

pub(crate) fn is_entity_id(id: &str) -> bool {
    ENTITY_ID.is_match(id)
}

pub(crate) fn check_entity_ids<S: AsRef<str>>(ids: &[S]) -> Result<()> {
    if ids.is_empty() {
        return Err(Error::validation("no ids provided"));
    }
    match ids.iter().map(|id| id.as_ref()).find(|id| !is_entity_id(id)) {
        Some(bad) => Err(Error::validation(format!("malformed entity id {bad:?}"))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_values_with_pipe() {
        assert_eq!(param("languages", ["en", "fr"]), "&languages=en|fr");
        assert_eq!(param("ids", ["Q1"]), "&ids=Q1");
    }

    #[test]
    fn encodes_each_value_but_not_the_separator() {
        assert_eq!(param("search", ["big bang"]), "&search=big%20bang");
        assert_eq!(param("titles", ["A&B", "C|D"]), "&titles=A%26B|C%7CD");
    }

    #[test]
    fn action_url_shape() {
        assert_eq!(
            action_url("https://www.wikidata.org/w/api.php", "wbgetentities"),
            "https://www.wikidata.org/w/api.php?action=wbgetentities&format=json"
        );
    }

    #[test]
    fn entity_id_shapes() {
        for id in ["Q1", "P31", "M7", "L7", "L7-F2", "L7-S1", "q42", "p31", "l7-f2"] {
            assert!(is_entity_id(id), "{id}");
        }
        for id in ["", "Q", "Q01", "X5", "Q1 ", "L7-X1"] {
            assert!(!is_entity_id(id), "{id}");
        }
    }

    #[test]
    fn rejects_empty_or_malformed_ids() {
        let none: [&str; 0] = [];
        assert!(check_entity_ids(&none).is_err());
        assert!(check_entity_ids(&["Q1", "nope"]).is_err());
        assert!(check_entity_ids(&["Q1", "P2"]).is_ok());
    }
}
