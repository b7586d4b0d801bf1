//! Market analysis composer.
//!
//! Turns a query and its trusted sources into a qualitative narrative and
//! four chart datasets. The narrative is a fixed template keyed on the
//! query subject; the language model only decides whether the service
//! reports itself as LLM-backed.

use marketscope_search::{ScoredResult, SearchError, SearchMode};
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::datasets::{Dataset, PriceSeries, QuantitativeData, attach_sources};
use crate::error::Result;

/// At most this many source URLs are cited in an analysis.
const MAX_CITED_SOURCES: usize = 5;

/// Words that suggest the user wants figures rather than context.
const DATA_KEYWORDS: &[&str] = &[
    "chiffre",
    "statisti",
    "taille",
    "part de marché",
    "croissance",
    "market size",
    "market share",
    "growth",
    "revenue",
    "cagr",
    "figures",
    "data",
    "%",
];

/// One titled block of the qualitative narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section heading.
    pub subtitle: String,
    /// Section body; bullet lists use `•` lines.
    pub content: String,
}

/// Narrative half of an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualitativeAnalysis {
    /// Analysis title.
    pub title: String,
    /// Overview, trends, key players, opportunities, risks.
    pub sections: Vec<Section>,
    /// Closing recommendation.
    pub recommendation: String,
    /// Cited source URLs.
    pub sources: Vec<String>,
}

/// A composed analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Narrative.
    pub qualitative: QualitativeAnalysis,
    /// Chart datasets.
    pub quantitative: QuantitativeData,
}

/// Structured reply to a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// The market the message is about.
    pub subject: String,
    /// Search mode best suited to the message.
    pub suggested_mode: SearchMode,
    /// Short text for the chat window.
    pub message: String,
}

/// Composes analyses and chat replies.
#[derive(Debug, Clone)]
pub struct LlmService {
    config: LlmConfig,
}

impl LlmService {
    /// Create a service from its configuration.
    pub fn new(config: LlmConfig) -> Self {
        Self { config }
    }

    /// Whether a usable API key is configured.
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Returns the configured model identifier.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Compose an analysis of `query` from `sources`.
    ///
    /// `web_context` is the rendered source list; when it is empty the
    /// overview says the analysis has no web backing. The first five
    /// source URLs are cited and distributed over the chart datasets.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidQuery`] for a blank query, or
    /// [`crate::MarketError::Analysis`] if a dataset fails validation.
    pub fn generate_analysis(
        &self,
        query: &str,
        web_context: &str,
        sources: &[ScoredResult],
    ) -> Result<Analysis> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidQuery("please provide a query".into()).into());
        }

        let source_urls: Vec<String> = sources
            .iter()
            .take(MAX_CITED_SOURCES)
            .map(|s| s.result.url.clone())
            .collect();

        tracing::debug!(
            model = %self.config.model,
            llm_configured = self.is_configured(),
            sources = source_urls.len(),
            "composing analysis"
        );

        let qualitative = qualitative(query, !web_context.trim().is_empty(), &source_urls);
        let mut quantitative = sample_datasets();
        attach_sources(&mut quantitative, &source_urls);
        quantitative.validate()?;

        Ok(Analysis {
            qualitative,
            quantitative,
        })
    }

    /// Read a chat message and suggest how to research it.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidQuery`] for a blank message.
    pub fn analyze_user_input(&self, message: &str) -> Result<ChatReply> {
        let subject = message.trim();
        if subject.is_empty() {
            return Err(SearchError::InvalidQuery("please provide a message".into()).into());
        }

        let lowered = subject.to_lowercase();
        let wants_figures = lowered.chars().any(|c| c.is_ascii_digit())
            || DATA_KEYWORDS.iter().any(|kw| lowered.contains(kw));
        let suggested_mode = if wants_figures {
            SearchMode::Data
        } else {
            SearchMode::General
        };

        let message = match suggested_mode {
            SearchMode::Data => format!(
                "I will look for figures on \"{subject}\" from government and research-firm sources."
            ),
            SearchMode::General => format!(
                "I will research the context, trends, and key players of \"{subject}\"."
            ),
        };

        Ok(ChatReply {
            subject: subject.to_owned(),
            suggested_mode,
            message,
        })
    }
}

fn qualitative(query: &str, has_web_context: bool, source_urls: &[String]) -> QualitativeAnalysis {
    let subject = query.to_lowercase();
    let backing = if has_web_context {
        format!("Based on {} trusted web sources, ", source_urls.len())
    } else {
        "Without web sources, ".to_owned()
    };

    let sections = vec![
        Section {
            subtitle: "Market overview".into(),
            content: format!(
                "{backing}the {subject} market shows dynamic growth driven by technological \
                 innovation and changing customer behaviour. Recent data points to a structural \
                 shift as new players and business models emerge."
            ),
        },
        Section {
            subtitle: "Key trends".into(),
            content: bullets(&[
                "Accelerating digitalisation of processes and services",
                "Rising demand for sustainable solutions",
                "Consolidation through mergers and acquisitions",
                "Continuous innovation in leading-edge technology",
                "International expansion of the main players",
            ]),
        },
        Section {
            subtitle: "Key players".into(),
            content: format!(
                "The {subject} market is led by a handful of major players investing heavily in \
                 innovation and expansion. Leaders benefit from economies of scale while new \
                 entrants bring disruption."
            ),
        },
        Section {
            subtitle: "Opportunities".into(),
            content: bullets(&[
                "Strong demand in premium segments",
                "Fast-growing emerging markets",
                "Disruptive technology opening new niches",
                "Strategic partnerships and ecosystems",
                "Value-added services and personalisation",
            ]),
        },
        Section {
            subtitle: "Challenges and risks".into(),
            content: bullets(&[
                "Intense competition and price pressure",
                "Tightening regulation",
                "Volatile raw material costs",
                "Cybersecurity and data protection",
                "Fast-changing customer preferences",
            ]),
        },
    ];

    QualitativeAnalysis {
        title: format!("Qualitative analysis: {}", title_case(query)),
        sections,
        recommendation: format!(
            "The {subject} market offers significant strategic opportunities. Focus on \
             innovation, differentiation, and targeted geographic expansion to maximise growth."
        ),
        sources: source_urls.to_vec(),
    }
}

fn sample_datasets() -> QuantitativeData {
    QuantitativeData {
        market_size: Dataset::new(
            ["2021", "2022", "2023", "2024", "2025 (proj.)"],
            vec![100.0, 125.0, 156.0, 195.0, 244.0],
        )
        .with_unit("bn EUR"),
        market_share: Dataset::new(
            ["Leader A", "Leader B", "Leader C", "Leader D", "Others"],
            vec![25.0, 18.0, 15.0, 12.0, 30.0],
        )
        .with_colors(["#0055B8", "#00A9E0", "#7AC143", "#FDB913", "#95A5A6"]),
        regional_growth: Dataset::new(
            ["Europe", "North America", "Asia-Pacific", "Latin America", "MEA"],
            vec![35.0, 28.0, 25.0, 8.0, 4.0],
        )
        .with_growth(vec![12.5, 15.8, 22.3, 18.5, 14.2]),
        price_evolution: PriceSeries {
            labels: ["2020", "2021", "2022", "2023", "2024"]
                .into_iter()
                .map(String::from)
                .collect(),
            avg_price: vec![100.0, 105.0, 108.0, 110.0, 112.0],
            market_value: vec![85.0, 100.0, 125.0, 156.0, 195.0],
            sources: Vec::new(),
        },
    }
}

fn bullets(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
