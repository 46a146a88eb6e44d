//! Integration tests for the similarity and ranking engines.

use approx::assert_relative_eq;
use peerscope_data::{Dataset, Record, SCORE_FALLBACK, ScoreField};
use peerscope_engine::{
    EngineError, RankingConfig, RankingEngine, SearchQuery, SimilarityEngine, nearest, rank,
};

fn dataset() -> Dataset {
    let rows = [
        ("AAPL", "Technology", [99.8, 99.6, 40.2, 99.8, 2.1, 22.0, 20.1, 80.2, 99.9]),
        ("MSFT", "Technology", [99.6, 99.8, 70.1, 99.6, 12.0, 20.4, 30.2, 93.1, 90.3]),
        ("NVDA", "Technology", [99.7, 99.0, 99.9, 99.7, 1.0, 5.0, 2.0, 60.0, 99.5]),
        ("XOM", "Energy", [90.1, 96.3, 10.5, 90.1, 70.2, 75.0, 85.0, 88.0, 60.0]),
        ("CVX", "Energy", [88.0, 94.0, 8.0, 88.0, 72.0, 70.0, 90.0, 86.0, 55.0]),
        ("NEE", "Utilities", [80.0, 85.0, 30.0, 80.0, 50.0, 40.0, 80.0, 50.0, 40.0]),
    ];

    let records = rows
        .iter()
        .map(|(symbol, sector, scores)| {
            ScoreField::ALL
                .iter()
                .zip(scores)
                .fold(
                    Record::new(*symbol).with_classification(*sector, "Industry"),
                    |r, (&field, &value)| r.with_score(field, Some(value)),
                )
        })
        .collect();
    Dataset::new(records)
}

#[test]
fn test_energy_peers_cluster_together() {
    let dataset = dataset();
    let xom = dataset.get("XOM").unwrap();

    let peers = nearest(xom, dataset.records(), &ScoreField::ALL, 2).unwrap();
    assert_eq!(peers[0].peer.symbol, "CVX");
    assert!(peers.iter().all(|n| n.peer.symbol != "XOM"));
    assert!(peers[0].distance <= peers[1].distance);
}

#[test]
fn test_neighbours_never_exceed_pool() {
    let dataset = dataset();
    let target = dataset.get("AAPL").unwrap();
    let engine = SimilarityEngine::default();

    let peers = engine
        .find(target, dataset.records(), &[ScoreField::Eps])
        .unwrap();
    assert_eq!(peers.len(), 5);

    let all = nearest(target, dataset.records(), &[ScoreField::Eps], 100).unwrap();
    assert_eq!(all.len(), dataset.len() - 1);
}

#[test]
fn test_subset_of_fields_changes_ranking() {
    let dataset = dataset();

    let growth = rank(dataset.records(), &[ScoreField::RevenueGrowth], None, 1).unwrap();
    assert_eq!(growth.entries[0].record.symbol, "NVDA");

    let yield_only = rank(dataset.records(), &[ScoreField::DividendYield], None, 1).unwrap();
    assert_eq!(yield_only.entries[0].record.symbol, "CVX");
}

#[test]
fn test_ranking_with_search_filter() {
    let dataset = dataset();
    let engine = RankingEngine::new(RankingConfig {
        limit: 10,
        ..Default::default()
    });
    let query = SearchQuery::new("ENERGY");

    let ranking = engine
        .rank(dataset.records(), &ScoreField::ALL, Some(&query))
        .unwrap();
    let symbols: Vec<&str> = ranking.iter().map(|e| e.record.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["XOM", "CVX"]);
    assert_eq!(ranking.matched, 2);
}

#[test]
fn test_missing_scores_rank_as_average() {
    let pool = vec![
        Record::new("BLANK"),
        Record::new("LOW").with_score(ScoreField::Roe, Some(49.0)),
        Record::new("HIGH").with_score(ScoreField::Roe, Some(51.0)),
    ];
    let ranking = rank(&pool, &[ScoreField::Roe], None, 3).unwrap();
    let symbols: Vec<&str> = ranking.iter().map(|e| e.record.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["HIGH", "BLANK", "LOW"]);
    assert_relative_eq!(ranking.entries[1].average_score, SCORE_FALLBACK);
}

#[test]
fn test_empty_fields_are_invalid_for_both_engines() {
    let dataset = dataset();
    let target = dataset.get("AAPL").unwrap();
    assert_eq!(
        nearest(target, dataset.records(), &[], 5).unwrap_err(),
        EngineError::EmptyFields
    );
    assert_eq!(
        rank(dataset.records(), &[], None, 5).unwrap_err(),
        EngineError::EmptyFields
    );
}
