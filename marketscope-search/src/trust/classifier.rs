//! Domain classifier: URL → trust tier by host-suffix allow-lists.
//!
//! Matching is case-insensitive and respects label boundaries, so the
//! entry `example.com` matches `example.com` and `www.example.com` but
//! never `notexample.com`.

use url::Url;

use super::registry::TrustRegistry;
use crate::error::SearchError;
use crate::types::TrustTier;

/// Tiers that carry an allow-list, in precedence order.
const MATCHED_TIERS: [TrustTier; 3] = [
    TrustTier::Government,
    TrustTier::ResearchFirm,
    TrustTier::EconomicMedia,
];

impl TrustRegistry {
    /// Classify a URL into a trust tier.
    ///
    /// Lists are checked in precedence order (government, research firm,
    /// economic media); the first match wins. A host on no list is
    /// [`TrustTier::Other`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedUrl`] if `url` does not parse or has
    /// no host.
    pub fn classify(&self, url: &str) -> Result<TrustTier, SearchError> {
        let host = extract_host(url)?;
        let tier = MATCHED_TIERS
            .into_iter()
            .find(|tier| {
                self.domains(*tier)
                    .iter()
                    .any(|suffix| host_matches(&host, suffix))
            })
            .unwrap_or(TrustTier::Other);
        Ok(tier)
    }

    /// Classify a URL, degrading malformed URLs to [`TrustTier::Other`].
    pub fn classify_or_other(&self, url: &str) -> TrustTier {
        match self.classify(url) {
            Ok(tier) => tier,
            Err(err) => {
                tracing::debug!(error = %err, "degrading unclassifiable result to other tier");
                TrustTier::Other
            }
        }
    }
}

/// Extract the lowercase host of `url`, without a trailing root dot.
pub fn extract_host(url: &str) -> Result<String, SearchError> {
    let parsed =
        Url::parse(url.trim()).map_err(|e| SearchError::MalformedUrl(format!("{url}: {e}")))?;
    let host = parsed
        .host_str()
        .map(|h| h.trim_end_matches('.').to_ascii_lowercase())
        .filter(|h| !h.is_empty())
        .ok_or_else(|| SearchError::MalformedUrl(format!("{url}: no host")))?;
    Ok(host)
}

/// Whether `host` equals `suffix` or is a subdomain of it.
///
/// Both arguments are expected lowercase.
pub fn host_matches(host: &str, suffix: &str) -> bool {
    match host.strip_suffix(suffix) {
        Some("") => true,
        Some(rest) => rest.ends_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trust::registry::TrustConfig;

    fn registry_with(government: &[&str], research: &[&str], media: &[&str]) -> TrustRegistry {
        let config = TrustConfig {
            government: government.iter().map(|s| (*s).to_owned()).collect(),
            research_firm: research.iter().map(|s| (*s).to_owned()).collect(),
            economic_media: media.iter().map(|s| (*s).to_owned()).collect(),
            ..Default::default()
        };
        TrustRegistry::from_config(&config).expect("valid config")
    }

    #[test]
    fn subdomain_of_government_entry_is_government() {
        let registry = TrustRegistry::default();
        let tier = registry
            .classify("https://www.economie.gouv.fr/facileco")
            .expect("classify");
        assert_eq!(tier, TrustTier::Government);
    }

    #[test]
    fn exact_host_matches() {
        let registry = TrustRegistry::default();
        assert_eq!(
            registry.classify("https://statista.com/statistics/1").expect("classify"),
            TrustTier::ResearchFirm
        );
    }

    #[test]
    fn suffix_match_respects_label_boundary() {
        let registry = registry_with(&[], &["example.com"], &[]);
        assert_eq!(
            registry.classify("https://notexample.com/x").expect("classify"),
            TrustTier::Other
        );
        assert_eq!(
            registry.classify("https://example.com/x").expect("classify"),
            TrustTier::ResearchFirm
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let registry = TrustRegistry::default();
        assert_eq!(
            registry.classify("HTTPS://WWW.Reuters.COM/markets").expect("classify"),
            TrustTier::EconomicMedia
        );
    }

    #[test]
    fn trailing_root_dot_is_ignored() {
        let registry = TrustRegistry::default();
        assert_eq!(
            registry.classify("https://www.ft.com./content").expect("classify"),
            TrustTier::EconomicMedia
        );
    }

    #[test]
    fn unknown_host_is_other() {
        let registry = TrustRegistry::default();
        assert_eq!(
            registry.classify("https://blog.example.org/post").expect("classify"),
            TrustTier::Other
        );
    }

    #[test]
    fn tld_entry_matches_any_host_under_it() {
        let registry = TrustRegistry::default();
        assert_eq!(
            registry.classify("https://www.census.gov/data").expect("classify"),
            TrustTier::Government
        );
        // `gov` must not match a host that merely ends in the letters.
        assert_eq!(
            registry.classify("https://mygov.io").expect("classify"),
            TrustTier::Other
        );
    }

    #[test]
    fn path_mentioning_trusted_domain_does_not_match() {
        let registry = TrustRegistry::default();
        assert_eq!(
            registry
                .classify("https://spam.example/redirect?to=statista.com")
                .expect("classify"),
            TrustTier::Other
        );
    }

    #[test]
    fn overlapping_lists_resolve_by_precedence() {
        let registry = registry_with(&["data.example"], &["example"], &["data.example"]);
        assert_eq!(
            registry.classify("https://stats.data.example").expect("classify"),
            TrustTier::Government
        );

        let registry = registry_with(&[], &["example"], &["example"]);
        assert_eq!(
            registry.classify("https://www.example").expect("classify"),
            TrustTier::ResearchFirm
        );
    }

    #[test]
    fn unparseable_url_is_malformed() {
        let registry = TrustRegistry::default();
        let err = registry.classify("not a url").unwrap_err();
        assert!(matches!(err, SearchError::MalformedUrl(_)));
    }

    #[test]
    fn url_without_host_is_malformed() {
        let registry = TrustRegistry::default();
        let err = registry.classify("mailto:analyst@kpmg.com").unwrap_err();
        assert!(matches!(err, SearchError::MalformedUrl(_)));
        assert!(err.to_string().contains("no host"));
    }

    #[test]
    fn classify_or_other_degrades_malformed() {
        let registry = TrustRegistry::default();
        assert_eq!(registry.classify_or_other("::::"), TrustTier::Other);
        assert_eq!(
            registry.classify_or_other("https://www.oecd.org/fr"),
            TrustTier::Government
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let registry = TrustRegistry::default();
        let url = "https://www.mckinsey.com/industries";
        let first = registry.classify(url).expect("classify");
        for _ in 0..10 {
            assert_eq!(registry.classify(url).expect("classify"), first);
        }
    }

    #[test]
    fn host_matches_boundaries() {
        assert!(host_matches("example.com", "example.com"));
        assert!(host_matches("a.b.example.com", "example.com"));
        assert!(!host_matches("notexample.com", "example.com"));
        assert!(!host_matches("example.com.evil", "example.com"));
        assert!(!host_matches("com", "example.com"));
    }

    #[test]
    fn extract_host_lowercases() {
        assert_eq!(
            extract_host("https://WWW.LesEchos.FR/").expect("host"),
            "www.lesechos.fr"
        );
    }
}
