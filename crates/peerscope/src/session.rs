//! Session controller.
//!
//! A [`Session`] owns a loaded dataset and the user's view state: active
//! metrics, selected company, search text and ranking limit. It is the
//! single place that turns user intents into engine calls, so the engines
//! stay pure functions of their explicit arguments.

use crate::error::{DashboardError, Result};
use crate::query::QueryState;
use crate::selection::MetricSelection;
use peerscope_data::{Dataset, Record, SCORE_FALLBACK, ScoreField};
use peerscope_engine::{
    Neighbor, Ranking, RankingConfig, RankingEngine, RecordFilter, SearchQuery, SimilarityConfig,
    SimilarityEngine,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Symbol selected when the query state names none.
pub const DEFAULT_SYMBOL: &str = "AAPL";

/// Default number of ranking rows.
pub const DEFAULT_TOP_N: usize = 100;

/// Smallest accepted ranking limit.
pub const MIN_TOP_N: usize = 10;

/// Maximum number of typeahead suggestions.
pub const TYPEAHEAD_LIMIT: usize = 50;

/// View state of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Active score fields (default: all)
    pub metrics: MetricSelection,
    /// Selected symbol, if any
    pub selected: Option<String>,
    /// Ranking search text (default: empty, matching everything)
    pub search: String,
    /// Maximum ranking rows (default: 100)
    pub ranking_limit: usize,
    /// Similar-company search settings
    pub similarity: SimilarityConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            metrics: MetricSelection::default(),
            selected: None,
            search: String::new(),
            ranking_limit: DEFAULT_TOP_N,
            similarity: SimilarityConfig::default(),
        }
    }
}

/// Interactive session over a loaded dataset.
#[derive(Debug, Clone)]
pub struct Session {
    dataset: Arc<Dataset>,
    config: SessionConfig,
}

impl Session {
    /// Start a session with the default configuration.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self::with_config(dataset, SessionConfig::default())
    }

    /// Start a session with `config`.
    ///
    /// The ranking limit is clamped to the dataset and a selected symbol
    /// missing from the dataset is dropped.
    pub fn with_config(dataset: Arc<Dataset>, config: SessionConfig) -> Self {
        let mut session = Self { dataset, config };
        session.set_ranking_limit(session.config.ranking_limit);
        if let Some(symbol) = session.config.selected.take() {
            let symbol = symbol.trim().to_uppercase();
            if session.dataset.contains(&symbol) {
                session.config.selected = Some(symbol);
            }
        }
        session
    }

    /// The loaded dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Current view state.
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Active metric selection.
    pub const fn metrics(&self) -> &MetricSelection {
        &self.config.metrics
    }

    /// Active fields in canonical order.
    pub fn active_fields(&self) -> Vec<ScoreField> {
        self.config.metrics.active_fields()
    }

    /// The selected record.
    pub fn selected(&self) -> Option<&Record> {
        self.config
            .selected
            .as_deref()
            .and_then(|symbol| self.dataset.get(symbol))
    }

    /// Choose the initial selection: the query's `symbol`, then
    /// [`DEFAULT_SYMBOL`], then the first record. Empty datasets select
    /// nothing.
    pub fn resolve_initial(&mut self, query: &QueryState) -> Option<&Record> {
        let dataset = &self.dataset;
        let symbol = query
            .symbol()
            .filter(|s| dataset.contains(s))
            .or_else(|| {
                dataset
                    .contains(DEFAULT_SYMBOL)
                    .then(|| DEFAULT_SYMBOL.to_string())
            })
            .or_else(|| dataset.first().map(|r| r.symbol.clone()));

        debug!(symbol = ?symbol, "resolved initial selection");
        self.config.selected = symbol;
        self.selected()
    }

    /// Select `symbol` (case-insensitive).
    ///
    /// # Errors
    ///
    /// [`DashboardError::InvalidSelection`] when the symbol is unknown. The
    /// selection is cleared in that case.
    pub fn select(&mut self, symbol: &str) -> Result<&Record> {
        let symbol = symbol.trim().to_uppercase();
        match self.dataset.get(&symbol) {
            Some(record) => {
                self.config.selected = Some(symbol);
                Ok(record)
            }
            None => {
                warn!(symbol = %symbol, "unknown symbol, clearing selection");
                self.config.selected = None;
                Err(DashboardError::InvalidSelection(symbol))
            }
        }
    }

    /// Deselect the current company.
    pub fn clear_selection(&mut self) {
        self.config.selected = None;
    }

    /// Turn a metric on or off.
    ///
    /// # Errors
    ///
    /// [`DashboardError::RejectedToggle`] when turning off the last active
    /// metric. The selection is left unchanged.
    pub fn toggle_metric(&mut self, field: ScoreField, on: bool) -> Result<()> {
        if self.config.metrics.toggle(field, on) {
            Ok(())
        } else {
            warn!(field = %field, "rejected toggle of last active metric");
            Err(DashboardError::RejectedToggle(field))
        }
    }

    /// Current ranking search text.
    pub fn search(&self) -> &str {
        &self.config.search
    }

    /// Replace the ranking search text.
    pub fn set_search(&mut self, text: &str) {
        self.config.search = text.to_string();
    }

    /// Current ranking limit.
    pub const fn ranking_limit(&self) -> usize {
        self.config.ranking_limit
    }

    /// Set the ranking limit, clamped to `[MIN_TOP_N, max(len, MIN_TOP_N)]`.
    /// Returns the limit in effect.
    pub fn set_ranking_limit(&mut self, limit: usize) -> usize {
        let upper = self.dataset.len().max(MIN_TOP_N);
        self.config.ranking_limit = limit.clamp(MIN_TOP_N, upper);
        self.config.ranking_limit
    }

    /// Companies most similar to the selection over the active metrics.
    ///
    /// # Errors
    ///
    /// [`DashboardError::EmptyResultSet`] when nothing is selected or the
    /// selection has no peers.
    pub fn similar(&self) -> Result<Vec<Neighbor<'_>>> {
        let target = self.selected().ok_or_else(|| {
            DashboardError::EmptyResultSet(
                "Select a company to populate similar companies.".to_string(),
            )
        })?;

        let engine = SimilarityEngine::new(self.config.similarity.clone());
        let neighbors = engine.find(target, self.dataset.records(), &self.active_fields())?;
        if neighbors.is_empty() {
            return Err(DashboardError::EmptyResultSet(
                "No similar companies found for this selection.".to_string(),
            ));
        }
        Ok(neighbors)
    }

    /// Blended ranking of the companies matching the search text.
    ///
    /// # Errors
    ///
    /// [`DashboardError::EmptyResultSet`] when no company matches the search.
    pub fn rankings(&self) -> Result<Ranking<'_>> {
        let engine = RankingEngine::new(RankingConfig {
            limit: self.config.ranking_limit,
            fallback: SCORE_FALLBACK,
        });
        let query = SearchQuery::new(&self.config.search);
        let ranking = engine.rank(self.dataset.records(), &self.active_fields(), Some(&query))?;

        if ranking.is_empty() {
            return Err(DashboardError::EmptyResultSet(
                "No companies match your search. Try broadening the filters.".to_string(),
            ));
        }
        Ok(ranking)
    }

    /// Suggestions for a partially typed company: up to [`TYPEAHEAD_LIMIT`]
    /// records whose symbol or name contains `text`. All records are
    /// suggested when `text` is blank or matches nothing.
    pub fn typeahead(&self, text: &str) -> Vec<&Record> {
        let query = SearchQuery::names(text);
        let records = self.dataset.records();

        let mut matches: Vec<&Record> = records.iter().filter(|r| query.matches(r)).collect();
        if matches.is_empty() {
            matches = records.iter().collect();
        }
        matches.truncate(TYPEAHEAD_LIMIT);
        matches
    }

    /// Resolve submitted search text to a company and select it.
    ///
    /// Tried in order: blank text selects the first record; an exact symbol;
    /// an exact short or long name (case-insensitive); the first record whose
    /// symbol or name contains the text.
    ///
    /// # Errors
    ///
    /// [`DashboardError::EmptyResultSet`] when nothing matches or the dataset
    /// is empty. The current selection is kept in that case.
    pub fn commit_search(&mut self, text: &str) -> Result<&Record> {
        let trimmed = text.trim();
        let records = self.dataset.records();

        let symbol = if trimmed.is_empty() {
            records.first().map(|r| r.symbol.clone())
        } else if self.dataset.contains(&trimmed.to_uppercase()) {
            Some(trimmed.to_uppercase())
        } else {
            let lower = trimmed.to_lowercase();
            let same_name = |name: Option<&str>| name.is_some_and(|n| n.to_lowercase() == lower);
            let query = SearchQuery::names(trimmed);

            records
                .iter()
                .find(|r| same_name(r.short_name.as_deref()) || same_name(r.long_name.as_deref()))
                .or_else(|| records.iter().find(|r| query.matches(r)))
                .map(|r| r.symbol.clone())
        };

        match symbol {
            Some(symbol) => self.select(&symbol),
            None => Err(DashboardError::EmptyResultSet(format!(
                "No companies match \"{trimmed}\". Adjust your search or clear the query."
            ))),
        }
    }

    /// Addressable state for the current selection.
    pub fn query_state(&self) -> QueryState {
        self.update_query(QueryState::default())
    }

    /// `query` with its `symbol` parameter reflecting the current selection.
    /// Other parameters are kept.
    pub fn update_query(&self, query: QueryState) -> QueryState {
        query.with_symbol(self.config.selected.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dataset(symbols: &[&str]) -> Arc<Dataset> {
        let records = symbols
            .iter()
            .enumerate()
            .map(|(i, s)| Record::new(*s).with_score(ScoreField::Eps, Some(i as f64 * 10.0)))
            .collect();
        Arc::new(Dataset::new(records))
    }

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.ranking_limit, DEFAULT_TOP_N);
        assert_eq!(config.similarity.count, 5);
        assert_eq!(config.metrics.len(), ScoreField::COUNT);
        assert!(config.selected.is_none());
    }

    #[test]
    fn test_ranking_limit_clamped() {
        let mut small = Session::new(dataset(&["A", "B", "C"]));
        assert_eq!(small.ranking_limit(), MIN_TOP_N);
        assert_eq!(small.set_ranking_limit(3), MIN_TOP_N);

        let symbols: Vec<String> = (0..150).map(|i| format!("S{i:03}")).collect();
        let refs: Vec<&str> = symbols.iter().map(String::as_str).collect();
        let mut large = Session::new(dataset(&refs));
        assert_eq!(large.ranking_limit(), DEFAULT_TOP_N);
        assert_eq!(large.set_ranking_limit(500), 150);
        assert_eq!(large.set_ranking_limit(0), MIN_TOP_N);
        assert_eq!(large.set_ranking_limit(42), 42);
    }

    #[test]
    fn test_with_config_drops_unknown_selection() {
        let config = SessionConfig {
            selected: Some("zzzz".to_string()),
            ..Default::default()
        };
        let session = Session::with_config(dataset(&["A"]), config);
        assert!(session.selected().is_none());

        let config = SessionConfig {
            selected: Some("a".to_string()),
            ..Default::default()
        };
        let session = Session::with_config(dataset(&["A"]), config);
        assert_eq!(session.selected().unwrap().symbol, "A");
    }

    #[test]
    fn test_toggle_metric() {
        let mut session = Session::new(dataset(&["A"]));
        for field in &ScoreField::ALL[1..] {
            session.toggle_metric(*field, false).unwrap();
        }
        assert_eq!(session.active_fields(), vec![ScoreField::MarketCap]);

        let err = session
            .toggle_metric(ScoreField::MarketCap, false)
            .unwrap_err();
        assert!(matches!(err, DashboardError::RejectedToggle(ScoreField::MarketCap)));
        assert_eq!(session.active_fields(), vec![ScoreField::MarketCap]);
    }

    #[test]
    fn test_similar_requires_selection() {
        let session = Session::new(dataset(&["A", "B"]));
        assert!(matches!(
            session.similar(),
            Err(DashboardError::EmptyResultSet(_))
        ));
    }

    #[test]
    fn test_similar_with_single_record() {
        let mut session = Session::new(dataset(&["A"]));
        session.select("a").unwrap();
        assert!(matches!(
            session.similar(),
            Err(DashboardError::EmptyResultSet(_))
        ));
    }

    #[test]
    fn test_similar_uses_active_fields() {
        let mut session = Session::new(dataset(&["A", "B", "C"]));
        for field in ScoreField::ALL {
            if field != ScoreField::Eps {
                session.toggle_metric(field, false).unwrap();
            }
        }
        session.select("B").unwrap();

        let peers = session.similar().unwrap();
        assert_eq!(peers.len(), 2);
        assert_eq!(peers[0].peer.symbol, "A");
        assert_relative_eq!(peers[0].distance, 10.0);
    }
}
