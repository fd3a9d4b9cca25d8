//! Country directory collaborator.
//!
//! Fetches name / dial-code / flag triples from the restcountries API for
//! the phone sign-in form.  The directory is best-effort: any failure
//! (network, status, decode, or an empty result) degrades to a static
//! fallback list and is never surfaced as an error.

use serde::{Deserialize, Serialize};
use tracing::warn;

use causerie_shared::constants::COUNTRY_DIRECTORY_URL;

/// A dialable country as shown in the sign-in form.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub name: String,
    pub cca2: String,
    pub dial_code: String,
    pub flag: String,
}

// Wire shape of the restcountries response.

#[derive(Debug, Deserialize)]
pub(crate) struct RawCountry {
    name: RawName,
    #[serde(default)]
    cca2: String,
    #[serde(default)]
    idd: RawIdd,
    #[serde(default)]
    flag: String,
}

#[derive(Debug, Deserialize)]
struct RawName {
    common: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawIdd {
    root: Option<String>,
    #[serde(default)]
    suffixes: Vec<String>,
}

/// Fetch the country list, falling back to [`fallback_countries`] on any
/// failure.
pub async fn fetch_countries() -> Vec<Country> {
    match fetch_remote().await {
        Ok(countries) if !countries.is_empty() => countries,
        Ok(_) => {
            warn!("country directory returned no usable entries; using fallback");
            fallback_countries()
        }
        Err(err) => {
            warn!(error = %err, "country directory unavailable; using fallback");
            fallback_countries()
        }
    }
}

async fn fetch_remote() -> Result<Vec<Country>, reqwest::Error> {
    let response = reqwest::get(COUNTRY_DIRECTORY_URL)
        .await?
        .error_for_status()?;
    let raw: Vec<RawCountry> = response.json().await?;
    Ok(map_countries(raw))
}

/// Map the wire shape to [`Country`]: entries without a dial root are
/// dropped, the dial code is the root plus the first suffix, and the
/// result is sorted by name.
pub(crate) fn map_countries(raw: Vec<RawCountry>) -> Vec<Country> {
    let mut countries: Vec<Country> = raw
        .into_iter()
        .filter_map(|entry| {
            let root = entry.idd.root?;
            let suffix = entry.idd.suffixes.first().map(String::as_str).unwrap_or("");
            Some(Country {
                name: entry.name.common,
                cca2: entry.cca2,
                dial_code: format!("{root}{suffix}"),
                flag: entry.flag,
            })
        })
        .collect();

    countries.sort_by(|a, b| a.name.cmp(&b.name));
    countries
}

/// The static list used when the directory is unreachable.
pub fn fallback_countries() -> Vec<Country> {
    [
        ("India", "IN", "+91", "🇮🇳"),
        ("United States", "US", "+1", "🇺🇸"),
        ("United Kingdom", "GB", "+44", "🇬🇧"),
        ("China", "CN", "+86", "🇨🇳"),
        ("Japan", "JP", "+81", "🇯🇵"),
        ("Germany", "DE", "+49", "🇩🇪"),
        ("France", "FR", "+33", "🇫🇷"),
        ("Italy", "IT", "+39", "🇮🇹"),
        ("Russia", "RU", "+7", "🇷🇺"),
        ("Brazil", "BR", "+55", "🇧🇷"),
    ]
    .into_iter()
    .map(|(name, cca2, dial_code, flag)| Country {
        name: name.to_string(),
        cca2: cca2.to_string(),
        dial_code: dial_code.to_string(),
        flag: flag.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> Vec<RawCountry> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_mapping_builds_dial_code_from_root_and_first_suffix() {
        let countries = map_countries(raw(
            r#"[{"name":{"common":"India"},"cca2":"IN","idd":{"root":"+9","suffixes":["1"]},"flag":"🇮🇳"}]"#,
        ));

        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].dial_code, "+91");
        assert_eq!(countries[0].name, "India");
    }

    #[test]
    fn test_mapping_drops_entries_without_dial_root() {
        let countries = map_countries(raw(
            r#"[
                {"name":{"common":"Antarctica"},"cca2":"AQ","idd":{},"flag":"🇦🇶"},
                {"name":{"common":"France"},"cca2":"FR","idd":{"root":"+3","suffixes":["3"]},"flag":"🇫🇷"}
            ]"#,
        ));

        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].cca2, "FR");
    }

    #[test]
    fn test_mapping_sorts_by_name() {
        let countries = map_countries(raw(
            r#"[
                {"name":{"common":"Brazil"},"cca2":"BR","idd":{"root":"+5","suffixes":["5"]},"flag":"🇧🇷"},
                {"name":{"common":"Albania"},"cca2":"AL","idd":{"root":"+3","suffixes":["55"]},"flag":"🇦🇱"}
            ]"#,
        ));

        let names: Vec<_> = countries.into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Albania", "Brazil"]);
    }

    #[test]
    fn test_missing_suffix_uses_root_alone() {
        let countries = map_countries(raw(
            r#"[{"name":{"common":"Russia"},"cca2":"RU","idd":{"root":"+7","suffixes":[]},"flag":"🇷🇺"}]"#,
        ));

        assert_eq!(countries[0].dial_code, "+7");
    }

    #[test]
    fn test_fallback_has_the_usual_suspects() {
        let fallback = fallback_countries();

        assert_eq!(fallback.len(), 10);
        assert!(fallback
            .iter()
            .any(|c| c.cca2 == "IN" && c.dial_code == "+91"));
    }
}
