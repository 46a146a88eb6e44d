//! Rendering a loaded dataset end to end.

use peerscope_data::{Dataset, ScoreField, load_csv};
use peerscope_engine::{SimilarityEngine, rank};
use peerscope_output::{
    ExportFormat, Exporter, NeighborExport, RankingExport, details_table, radar_readings,
    ranking_table,
};

const CSV: &str = "\
Symbol,Shortname,Sector,Industry,Exchange,Marketcap,Dividend Yield,ROE,Marketcap Score,Dividend Yield Score,ROE Score
MSFT,Microsoft Corporation,Technology,Software,NMS,3150000000000,0.72,0.3567,99.6,30.2,90.3
AAPL,Apple Inc.,Technology,Consumer Electronics,NMS,3846000000000,0.44,1.5708,99.8,20.1,
XOM,Exxon Mobil Corporation,Energy,Oil & Gas Integrated,NYQ,467000000000,3.4,0.1427,90.1,85.0,60.0
";

fn dataset() -> Dataset {
    Dataset::new(load_csv(CSV.as_bytes()).unwrap())
}

#[test]
fn test_radar_tooltips_use_field_metadata() {
    let dataset = dataset();
    let apple = dataset.get("AAPL").unwrap();
    let readings = radar_readings(apple, &ScoreField::ALL);

    assert_eq!(readings.len(), ScoreField::COUNT);
    let tooltip = |field: ScoreField| {
        readings
            .iter()
            .find(|r| r.field == field)
            .unwrap()
            .tooltip_lines()
    };

    assert_eq!(
        tooltip(ScoreField::MarketCap),
        ["Marketcap: 99.8".to_string(), "Raw: $3,846,000,000,000".to_string()]
    );
    assert_eq!(
        tooltip(ScoreField::DividendYield),
        ["Dividend Yield: 20.1".to_string(), "Raw: 0.44%".to_string()]
    );
    // Score missing but raw present: the plotted value falls back while the
    // raw line still shows the metric.
    assert_eq!(
        tooltip(ScoreField::Roe),
        ["ROE: 50.0".to_string(), "Raw: 157.08%".to_string()]
    );
    assert_eq!(
        tooltip(ScoreField::Eps)[1],
        "Raw: Unavailable (defaulted to 50)"
    );
}

#[test]
fn test_details_and_ranking_render() {
    let dataset = dataset();
    let xom = dataset.get("XOM").unwrap();

    let details = details_table(xom);
    assert!(details.contains("Energy · Oil & Gas Integrated"));
    assert!(details.contains("NYQ"));
    assert!(details.contains("3.4%"));
    assert!(details.contains("14.27%"));

    let fields = [ScoreField::DividendYield, ScoreField::Roe];
    let ranking = rank(dataset.records(), &fields, None, 10).unwrap();
    let table = ranking_table(&ranking, &fields);
    assert!(table.contains("Showing top 3 of 3 companies · Metrics: Dividend Yield, ROE"));
    assert!(table.find("XOM").unwrap() < table.find("MSFT").unwrap());
}

#[test]
fn test_exports_carry_selection() {
    let dataset = dataset();
    let msft = dataset.get("MSFT").unwrap();
    let fields = [ScoreField::MarketCap];

    let peers = SimilarityEngine::default()
        .find(msft, dataset.records(), &fields)
        .unwrap();
    let export = NeighborExport::new(msft, &peers, &fields);
    assert_eq!(export.rows[0].symbol, "AAPL");
    let json = export.export_to_string(ExportFormat::Json).unwrap();
    assert!(json.contains("\"target\":\"MSFT\""));

    let ranking = rank(dataset.records(), &fields, None, 2).unwrap();
    let export = RankingExport::new(&ranking, &fields);
    assert_eq!(export.matched, 3);
    assert_eq!(export.rows.len(), 2);
    assert_eq!(export.rows[0].name.as_deref(), Some("Apple Inc."));
}
