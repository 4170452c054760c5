use serde::Deserialize;

use super::fetch::{
    fetch_typed,
    JsonFetcher,
};
use crate::{
    catalog::creature::NameEntry,
    core::ZukanError,
};

pub const FALLBACK_NAME: &str = "N/A";

/// Any resource carrying a `names` list (abilities, types, species).
#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedResource {
    #[serde(default)]
    pub names: Vec<NameEntry>,
}

/// First entry whose language tag equals `language` exactly. Tags are
/// compared case-sensitively.
pub fn lookup_localized_name<'a>(names: &'a [NameEntry], language: &str) -> Option<&'a str> {
    names.iter().find(|entry| entry.language.name == language).map(|entry| entry.name.as_str())
}

/// Fetches `resource_url` and returns its name for `language`, or
/// [`FALLBACK_NAME`] when the resource has no entry for it. Only transport,
/// status and shape failures are errors.
pub async fn resolve_localized_name<F>(
    fetcher: &F,
    resource_url: &str,
    language: &str,
) -> Result<String, ZukanError>
where
    F: JsonFetcher + ?Sized,
{
    let resource: LocalizedResource = fetch_typed(fetcher, resource_url).await?;

    match lookup_localized_name(&resource.names, language) {
        Some(name) => Ok(name.to_string()),
        None => {
            tracing::debug!(resource_url, language, "no localized name, using fallback");
            Ok(FALLBACK_NAME.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::core::fetch::testing::FakeFetcher;

    fn names(entries: &[(&str, &str)]) -> Vec<NameEntry> {
        let list = entries
            .iter()
            .map(|(name, lang)| json!({ "name": name, "language": { "name": lang, "url": "" } }))
            .collect();
        serde_json::from_value(serde_json::Value::Array(list)).unwrap()
    }

    #[test]
    fn test_lookup_exact_match_first_wins() {
        let list =
            names(&[("Overgrow", "en"), ("しんりょく", "ja-Hrkt"), ("深緑", "ja-Hrkt")]);
        assert_eq!(lookup_localized_name(&list, "ja-Hrkt"), Some("しんりょく"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let list = names(&[("しんりょく", "ja-Hrkt")]);
        assert_eq!(lookup_localized_name(&list, "ja-hrkt"), None);
        assert_eq!(lookup_localized_name(&list, "ja"), None);
    }

    #[tokio::test]
    async fn test_resolve_returns_localized_name() {
        let fetcher = FakeFetcher::new().with(
            "https://pokeapi.co/api/v2/ability/65/",
            json!({ "names": [
                { "name": "Overgrow", "language": { "name": "en", "url": "" } },
                { "name": "しんりょく", "language": { "name": "ja-Hrkt", "url": "" } }
            ]}),
        );

        let name =
            resolve_localized_name(&fetcher, "https://pokeapi.co/api/v2/ability/65/", "ja-Hrkt")
                .await
                .unwrap();
        assert_eq!(name, "しんりょく");
    }

    #[tokio::test]
    async fn test_resolve_falls_back_when_language_missing() {
        let fetcher = FakeFetcher::new()
            .with(
                "http://x/ability/1/",
                json!({ "names": [{ "name": "Stench", "language": { "name": "en", "url": "" } }] }),
            )
            .with("http://x/ability/2/", json!({ "id": 2 }));

        let name = resolve_localized_name(&fetcher, "http://x/ability/1/", "ja-Hrkt").await;
        assert_eq!(name.unwrap(), FALLBACK_NAME);

        // No `names` list at all is still a fallback, not an error
        let name = resolve_localized_name(&fetcher, "http://x/ability/2/", "ja-Hrkt").await;
        assert_eq!(name.unwrap(), FALLBACK_NAME);
    }

    #[tokio::test]
    async fn test_resolve_propagates_fetch_failure() {
        let fetcher = FakeFetcher::new().failing("http://x/type/1/");
        let result = resolve_localized_name(&fetcher, "http://x/type/1/", "ja-Hrkt").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_resolve_refetches_every_call() {
        let fetcher = FakeFetcher::new().with("http://x/type/1/", json!({ "names": [] }));
        for _ in 0..2 {
            resolve_localized_name(&fetcher, "http://x/type/1/", "ja-Hrkt").await.unwrap();
        }
        assert_eq!(fetcher.calls().len(), 2);
    }
}
