//! Load → map → format → fundamentals against real files.

use std::fs;
use std::path::Path;

use indmap::{CsvSource, DatasetConfig, IndustryMapper, MapperError, Symbol, export_mapping_csv};
use tempfile::TempDir;

fn write_dataset(dir: &Path, mapping: &str) {
    fs::write(
        dir.join("Industry Analytics.csv"),
        "IT - Software\nPrivate Sector Bank\nRefineries & Marketing\nAirlines\n",
    )
    .unwrap();
    fs::write(dir.join("Basic RS Setup.csv"), mapping).unwrap();
    fs::write(
        dir.join("Results Calendar.csv"),
        "Stock Name,Quarterly Results Date,QoQ % Net Profit Latest,QoQ % EPS Latest,YoY% EPS Latest,QoQ % Sales Latest,YoY % Sales Latest\n\
         tcs,09/01/2025,5.5,5.1,12.0,3.2,5.6\n\
         WIPRO,17/01/2025,1.0,1.0,2.0,0.5,-0.7\n",
    )
    .unwrap();
}

const MAPPING: &str = "Stock Name,Basic Industry\n\
                       TCS,IT - Software\n\
                       INFY,IT - Software\n\
                       WIPRO,IT - Software\n\
                       HDFCBANK,Private Sector Bank\n\
                       RELIANCE,Refineries & Marketing\n";

async fn load(dir: &Path) -> indmap::Result<IndustryMapper> {
    IndustryMapper::load(&CsvSource::new(DatasetConfig::new(dir))).await
}

#[tokio::test]
async fn test_full_request() {
    let dir = TempDir::new().unwrap();
    write_dataset(dir.path(), MAPPING);
    let mapper = load(dir.path()).await.unwrap();

    let stats = mapper.stats();
    assert_eq!(stats.total_symbols, 5);
    assert_eq!(stats.total_industries, 4);
    assert_eq!(stats.mapped_industries, 3);

    let result = mapper
        .map_symbols("NSE:Reliance, reliance\ntcs; infy, XYZCO, wipro")
        .unwrap();
    assert_eq!(result.unmatched(), &[Symbol::new("XYZCO")]);
    assert_eq!(
        mapper.format_grouped(&result),
        "###IT - Software(3),NSE:INFY,NSE:TCS,NSE:WIPRO,###Refineries & Marketing(1),NSE:RELIANCE"
    );
    assert_eq!(
        mapper.format_flat(&result),
        "NSE:INFY,NSE:RELIANCE,NSE:TCS,NSE:WIPRO"
    );

    let export = export_mapping_csv(&result.sorted_by_industry_frequency()).unwrap();
    assert_eq!(
        export,
        "Symbol,Industry\nTCS,IT - Software\nINFY,IT - Software\nWIPRO,IT - Software\nRELIANCE,Refineries & Marketing\n"
    );

    let symbols: Vec<Symbol> = result.symbols().cloned().collect();
    let table = mapper.fundamentals_for(&symbols);
    let found: Vec<&str> = table.records().iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(found, vec!["TCS", "WIPRO"]);
    assert_eq!(table.records()[1].results_date, "17 Jan 2025");
    assert_eq!(table.to_frame().unwrap().height(), 2);
}

#[tokio::test]
async fn test_unknown_industry_blocks_load() {
    let dir = TempDir::new().unwrap();
    write_dataset(
        dir.path(),
        "Stock Name,Basic Industry\nTCS,IT - Software\nZOMATO,Food Delivery\n",
    );

    let err = load(dir.path()).await.unwrap_err();
    assert!(err.is_load_error());
    assert!(matches!(
        err,
        MapperError::UnknownIndustries { ref labels } if labels == &["Food Delivery"]
    ));
}

#[tokio::test]
async fn test_missing_calendar_disables_fundamentals_only() {
    let dir = TempDir::new().unwrap();
    write_dataset(dir.path(), MAPPING);
    fs::remove_file(dir.path().join("Results Calendar.csv")).unwrap();

    let mapper = load(dir.path()).await.unwrap();
    let result = mapper.map_symbols("TCS").unwrap();
    assert_eq!(result.matched().len(), 1);
    assert!(mapper.fundamentals_for(&[Symbol::new("TCS")]).is_empty());
}

#[tokio::test]
async fn test_validation_leaves_mapper_usable() {
    let dir = TempDir::new().unwrap();
    write_dataset(dir.path(), MAPPING);
    let mapper = load(dir.path()).await.unwrap();

    let too_many: Vec<String> = (0..1000).map(|i| format!("S{i}")).collect();
    let err = mapper.map_symbols(&too_many.join("\n")).unwrap_err();
    assert!(err.is_validation_error());

    let result = mapper.map_symbols(&too_many[..999].join("\n")).unwrap();
    assert_eq!(result.unmatched().len(), 999);
    assert!(mapper.map_symbols("TCS").is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_share_dataset() {
    let dir = TempDir::new().unwrap();
    write_dataset(dir.path(), MAPPING);
    let mapper = load(dir.path()).await.unwrap();

    let inputs = ["TCS, INFY", "HDFCBANK", "WIPRO; RELIANCE; XYZCO", "infy\ntcs"];
    let handles: Vec<_> = inputs
        .iter()
        .map(|raw| {
            let mapper = mapper.clone();
            let raw = raw.to_string();
            tokio::spawn(async move {
                let result = mapper.map_symbols(&raw).unwrap();
                mapper.format_flat(&result)
            })
        })
        .collect();

    let mut outputs = Vec::new();
    for handle in handles {
        outputs.push(handle.await.unwrap());
    }

    assert_eq!(
        outputs,
        vec![
            "NSE:INFY,NSE:TCS",
            "NSE:HDFCBANK",
            "NSE:RELIANCE,NSE:WIPRO",
            "NSE:INFY,NSE:TCS",
        ]
    );
}
