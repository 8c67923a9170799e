//! Integration tests for the full load -> derive -> reshape flow

use medviz::pipeline::*;
use medviz::report::{build_export, ExportParams};

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_full_pipeline_from_csv() {
    let mut df = create_exam_dataframe();
    let (_temp_dir, csv_path) = create_temp_csv(&mut df);

    let raw = load_dataset(&csv_path, 100).unwrap();
    let df = derive_features(&raw, DEFAULT_BMI_THRESHOLD).unwrap();
    assert_has_columns(&df, &["overweight"]);

    // Categorical path
    let counts = count_risk_factors(&df).unwrap();
    assert_eq!(counts.len(), 24);
    assert_eq!(counts.total_for(0, "overweight", 1), 4);
    assert_eq!(counts.total_for(1, "cholesterol", 1), 3);
    assert_eq!(counts.total_for(0, "active", 0), 3);

    // Heat map path
    let heat_map = prepare_heat_map(&df, DEFAULT_LOWER_QUANTILE, DEFAULT_UPPER_QUANTILE).unwrap();
    assert_eq!(heat_map.retained_rows, 6);
    assert_eq!(heat_map.mask.size(), heat_map.matrix.len());
    assert!(heat_map.matrix.is_symmetric(1e-12));
}

#[test]
fn test_paths_share_base_table_without_mutation() {
    let df = derive_features(&create_exam_dataframe(), DEFAULT_BMI_THRESHOLD).unwrap();
    let before = df.clone();

    let _counts = count_risk_factors(&df).unwrap();
    let _heat_map = prepare_heat_map(&df, 0.025, 0.975).unwrap();

    assert!(df.equals(&before));
}

#[test]
fn test_heat_map_columns_in_table_order() {
    let df = derive_features(&create_exam_dataframe(), DEFAULT_BMI_THRESHOLD).unwrap();
    let heat_map = prepare_heat_map(&df, 0.025, 0.975).unwrap();

    let expected: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    assert_eq!(heat_map.matrix.columns(), expected.as_slice());
}

#[test]
fn test_export_reflects_pipeline() {
    let df = derive_features(&create_exam_dataframe(), DEFAULT_BMI_THRESHOLD).unwrap();
    let counts = count_risk_factors(&df).unwrap();
    let heat_map = prepare_heat_map(&df, 0.025, 0.975).unwrap();
    let params = ExportParams {
        input_file: "medical_examination.csv",
        bmi_threshold: DEFAULT_BMI_THRESHOLD,
        lower_quantile: 0.025,
        upper_quantile: 0.975,
    };

    let value = serde_json::to_value(build_export(counts.rows(), &heat_map, &params)).unwrap();

    let gluc = heat_map
        .matrix
        .columns()
        .iter()
        .position(|c| c == "gluc")
        .unwrap();
    // NaN correlations are exported as null
    assert!(value["correlation"]["matrix"][gluc][gluc].is_null());
    assert_eq!(value["correlation"]["matrix"][0][0], 1.0);
    assert_eq!(value["category_counts"][0]["variable"], "active");
    assert_eq!(value["category_counts"][0]["total"], 3);
}

#[test]
fn test_large_random_dataset() {
    let df = derive_features(&create_random_exam_dataframe(5000, 3), DEFAULT_BMI_THRESHOLD).unwrap();

    let counts = count_risk_factors(&df).unwrap();
    let total: u32 = counts.rows().iter().map(|r| r.total).sum();
    assert_eq!(total as usize, 5000 * RISK_VARIABLES.len());

    let heat_map = prepare_heat_map(&df, 0.025, 0.975).unwrap();
    assert!(heat_map.retained_rows < 5000);
    assert!(heat_map.retained_rows > 0);
}
