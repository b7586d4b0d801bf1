//! Immutable tier → score and tier → domain-suffix tables.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::orchestrator::scoring::score_for;
use crate::types::TrustTier;

/// Reliability score per trust tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierScores {
    /// Score for [`TrustTier::Government`].
    pub government: u8,
    /// Score for [`TrustTier::ResearchFirm`].
    pub research_firm: u8,
    /// Score for [`TrustTier::EconomicMedia`].
    pub economic_media: u8,
    /// Score for [`TrustTier::Other`].
    pub other: u8,
}

impl Default for TierScores {
    fn default() -> Self {
        Self {
            government: score_for(TrustTier::Government),
            research_firm: score_for(TrustTier::ResearchFirm),
            economic_media: score_for(TrustTier::EconomicMedia),
            other: score_for(TrustTier::Other),
        }
    }
}

impl TierScores {
    /// Returns the score assigned to `tier`.
    pub fn get(&self, tier: TrustTier) -> u8 {
        match tier {
            TrustTier::Government => self.government,
            TrustTier::ResearchFirm => self.research_firm,
            TrustTier::EconomicMedia => self.economic_media,
            TrustTier::Other => self.other,
        }
    }
}

/// Serializable source of a [`TrustRegistry`].
///
/// Domain entries are suffixes: `gouv.fr` matches `gouv.fr` and
/// `www.economie.gouv.fr` but not `notgouv.fr`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustConfig {
    /// Government and statistics-office domains.
    pub government: Vec<String>,
    /// Consulting and research-firm domains.
    pub research_firm: Vec<String>,
    /// Economic press domains.
    pub economic_media: Vec<String>,
    /// Score table.
    pub scores: TierScores,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            government: owned(&["gov", "gouv.fr", "gov.uk", "europa.eu", "oecd.org"]),
            research_firm: owned(&[
                "statista.com",
                "gartner.com",
                "forrester.com",
                "mckinsey.com",
                "bcg.com",
                "kpmg.com",
                "deloitte.com",
                "pwc.com",
                "accenture.com",
            ]),
            economic_media: owned(&[
                "lesechos.fr",
                "ft.com",
                "wsj.com",
                "bloomberg.com",
                "reuters.com",
                "economist.com",
                "challenges.fr",
            ]),
            scores: TierScores::default(),
        }
    }
}

fn owned(domains: &[&str]) -> Vec<String> {
    domains.iter().map(|d| (*d).to_owned()).collect()
}

/// Read-only trust configuration shared by every search.
///
/// Construct with [`TrustRegistry::from_config`] (validated) or
/// [`TrustRegistry::default`]. There is no way to mutate a registry after
/// construction; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustRegistry {
    pub(crate) government: Vec<String>,
    pub(crate) research_firm: Vec<String>,
    pub(crate) economic_media: Vec<String>,
    scores: TierScores,
}

impl Default for TrustRegistry {
    fn default() -> Self {
        // Built-in lists are already lowercase bare suffixes.
        let config = TrustConfig::default();
        Self {
            government: config.government,
            research_firm: config.research_firm,
            economic_media: config.economic_media,
            scores: config.scores,
        }
    }
}

impl TrustRegistry {
    /// Build a registry from configuration, normalising every suffix.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if a score exceeds 100 or a domain
    /// entry is empty or contains characters that cannot appear in a host.
    pub fn from_config(config: &TrustConfig) -> Result<Self, SearchError> {
        for tier in TrustTier::all() {
            let score = config.scores.get(*tier);
            if score > 100 {
                return Err(SearchError::Config(format!(
                    "score for {tier} must be <= 100, got {score}"
                )));
            }
        }

        Ok(Self {
            government: normalize_list(&config.government)?,
            research_firm: normalize_list(&config.research_firm)?,
            economic_media: normalize_list(&config.economic_media)?,
            scores: config.scores,
        })
    }

    /// Returns the reliability score for `tier`.
    pub fn score_for(&self, tier: TrustTier) -> u8 {
        self.scores.get(tier)
    }

    /// Returns the score table.
    pub fn scores(&self) -> &TierScores {
        &self.scores
    }

    /// Returns the normalised suffixes for `tier`. Always empty for
    /// [`TrustTier::Other`].
    pub fn domains(&self, tier: TrustTier) -> &[String] {
        match tier {
            TrustTier::Government => &self.government,
            TrustTier::ResearchFirm => &self.research_firm,
            TrustTier::EconomicMedia => &self.economic_media,
            TrustTier::Other => &[],
        }
    }
}

fn normalize_list(domains: &[String]) -> Result<Vec<String>, SearchError> {
    domains.iter().map(|d| normalize_suffix(d)).collect()
}

/// Lowercase a suffix and strip surrounding whitespace and dots.
fn normalize_suffix(raw: &str) -> Result<String, SearchError> {
    let suffix = raw.trim().trim_matches('.').to_ascii_lowercase();
    if suffix.is_empty() {
        return Err(SearchError::Config(format!(
            "trust domain entry {raw:?} is empty"
        )));
    }
    if suffix
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '/' | ':' | '@' | '?' | '#'))
    {
        return Err(SearchError::Config(format!(
            "trust domain entry {raw:?} is not a host suffix"
        )));
    }
    Ok(suffix)
}
