//! Unit tests for derived risk features

use medviz::pipeline::{binarize_expr, derive_features, overweight_expr, DEFAULT_BMI_THRESHOLD};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

use common::int_values;

#[test]
fn test_overweight_matches_hand_computed_bmi() {
    let df = derive_features(&common::create_exam_dataframe(), DEFAULT_BMI_THRESHOLD).unwrap();

    assert_eq!(
        int_values(&df, "overweight"),
        vec![0, 1, 0, 1, 0, 1, 1, 1, 1, 1]
    );
}

#[test]
fn test_levels_are_binarized() {
    let df = derive_features(&common::create_exam_dataframe(), DEFAULT_BMI_THRESHOLD).unwrap();

    assert_eq!(
        int_values(&df, "cholesterol"),
        vec![0, 1, 1, 0, 0, 1, 1, 1, 0, 0]
    );
    assert_eq!(int_values(&df, "gluc"), vec![0, 0, 0, 0, 0, 1, 0, 1, 0, 0]);
}

#[test]
fn test_all_risk_columns_binary_after_derivation() {
    let raw = common::create_random_exam_dataframe(500, 7);
    let df = derive_features(&raw, DEFAULT_BMI_THRESHOLD).unwrap();

    for name in ["cholesterol", "gluc", "overweight", "smoke", "alco", "active", "cardio"] {
        assert!(
            int_values(&df, name).iter().all(|v| *v == 0 || *v == 1),
            "Column '{}' should only contain 0/1",
            name
        );
    }
}

#[test]
fn test_overweight_appended_last() {
    let raw = common::create_exam_dataframe();
    let df = derive_features(&raw, DEFAULT_BMI_THRESHOLD).unwrap();

    assert_eq!(df.width(), raw.width() + 1);
    let names = df.get_column_names();
    assert_eq!(names.last().unwrap().as_str(), "overweight");
    assert_eq!(df.height(), raw.height());
}

#[test]
fn test_bmi_exactly_at_threshold_is_not_overweight() {
    // 100 / 2.0^2 = 25.0
    let df = df! {
        "height" => [200i64, 200],
        "weight" => [100.0f64, 100.5],
        "cholesterol" => [1i64, 1],
        "gluc" => [1i64, 1],
    }
    .unwrap();
    let derived = derive_features(&df, 25.0).unwrap();
    assert_eq!(int_values(&derived, "overweight"), vec![0, 1]);
}

#[test]
fn test_custom_bmi_threshold() {
    let df = derive_features(&common::create_exam_dataframe(), 30.0).unwrap();
    // BMIs above 30: rows 1 (34.9) and 6 (37.7)
    assert_eq!(
        int_values(&df, "overweight"),
        vec![0, 1, 0, 0, 0, 0, 1, 0, 0, 0]
    );
}

#[test]
fn test_level_codes_below_one_fall_back_to_zero() {
    let df = df! {
        "height" => [170i64, 170, 170, 170, 170],
        "weight" => [60.0f64, 60.0, 60.0, 60.0, 60.0],
        "cholesterol" => [0i64, -1, 1, 2, 3],
        "gluc" => [0i64, -1, 1, 2, 3],
    }
    .unwrap();
    let derived = derive_features(&df, DEFAULT_BMI_THRESHOLD).unwrap();

    assert_eq!(int_values(&derived, "cholesterol"), vec![0, 0, 0, 1, 1]);
    assert_eq!(int_values(&derived, "gluc"), vec![0, 0, 0, 1, 1]);
}

#[test]
fn test_expression_builders_standalone() {
    let df = df! {
        "height" => [200i64, 200, 160],
        "weight" => [100.0f64, 100.5, 50.0],
        "gluc" => [1i64, 2, 3],
    }
    .unwrap();
    let out = df
        .lazy()
        .select([binarize_expr("gluc"), overweight_expr(25.0)])
        .collect()
        .unwrap();

    assert_eq!(int_values(&out, "gluc"), vec![0, 1, 1]);
    assert_eq!(int_values(&out, "overweight"), vec![0, 1, 0]);
}

#[test]
fn test_rebinarizing_keeps_normal_values_at_zero() {
    let df = derive_features(&common::create_exam_dataframe(), DEFAULT_BMI_THRESHOLD).unwrap();
    let twice = derive_features(&df, DEFAULT_BMI_THRESHOLD).unwrap();

    // 0 stays 0 under the rule; 1 is not above 1 and collapses to 0
    assert!(int_values(&twice, "cholesterol").iter().all(|v| *v == 0));
    assert!(int_values(&twice, "gluc").iter().all(|v| *v == 0));
    assert_eq!(int_values(&twice, "overweight"), int_values(&df, "overweight"));
}
