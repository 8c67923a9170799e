//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a raw 10-record examination table with hand-checked characteristics
///
/// After feature derivation:
/// - `cardio` = 0 for rows 0, 4, 5, 6, 8, 9 and 1 for rows 1, 2, 3, 7
/// - `overweight` = [0, 1, 0, 1, 0, 1, 1, 1, 1, 1]
/// - `cholesterol` = [0, 1, 1, 0, 0, 1, 1, 1, 0, 0]
/// - `gluc` = [0, 0, 0, 0, 0, 1, 0, 1, 0, 0]
/// - row 2 has `ap_lo > ap_hi`
pub fn create_exam_dataframe() -> DataFrame {
    df! {
        "id" => [0i64, 1, 2, 3, 4, 5, 6, 7, 8, 9],
        "age" => [18393i64, 20228, 18857, 17623, 17474, 21914, 22113, 22584, 17668, 19834],
        "gender" => [2i64, 1, 1, 2, 1, 1, 1, 2, 1, 1],
        "height" => [168i64, 156, 165, 169, 156, 151, 157, 178, 158, 164],
        "weight" => [62.0f64, 85.0, 64.0, 82.0, 56.0, 67.0, 93.0, 95.0, 71.0, 68.0],
        "ap_hi" => [110i64, 140, 100, 150, 100, 120, 130, 130, 110, 110],
        "ap_lo" => [80i64, 90, 110, 100, 60, 80, 80, 90, 70, 60],
        "cholesterol" => [1i64, 3, 3, 1, 1, 2, 3, 3, 1, 1],
        "gluc" => [1i64, 1, 1, 1, 1, 2, 1, 3, 1, 1],
        "smoke" => [0i64, 0, 0, 1, 0, 0, 0, 0, 0, 1],
        "alco" => [0i64, 0, 0, 0, 0, 0, 0, 1, 0, 1],
        "active" => [1i64, 1, 0, 1, 0, 0, 1, 1, 1, 0],
        "cardio" => [0i64, 1, 1, 1, 0, 0, 0, 1, 0, 0],
    }
    .unwrap()
}

/// Create a derived-style table (all risk columns already binary)
pub fn create_binary_risk_dataframe(
    cardio: &[i32],
    active: &[i32],
    alco: &[i32],
    cholesterol: &[i32],
    gluc: &[i32],
    overweight: &[i32],
    smoke: &[i32],
) -> DataFrame {
    df! {
        "cardio" => cardio,
        "active" => active,
        "alco" => alco,
        "cholesterol" => cholesterol,
        "gluc" => gluc,
        "overweight" => overweight,
        "smoke" => smoke,
    }
    .unwrap()
}

/// Create a larger random examination table for stress tests
pub fn create_random_exam_dataframe(rows: usize, seed: u64) -> DataFrame {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    let mut rng = StdRng::seed_from_u64(seed);

    let height: Vec<i64> = (0..rows).map(|_| rng.gen_range(140..200)).collect();
    let weight: Vec<f64> = (0..rows).map(|_| rng.gen_range(40.0..130.0)).collect();
    let ap_hi: Vec<i64> = (0..rows).map(|_| rng.gen_range(90..180)).collect();
    let ap_lo: Vec<i64> = (0..rows).map(|_| rng.gen_range(50..120)).collect();
    let level = |rng: &mut StdRng| -> Vec<i64> { (0..rows).map(|_| rng.gen_range(1..4)).collect() };
    let cholesterol = level(&mut rng);
    let gluc = level(&mut rng);
    let flag = |rng: &mut StdRng| -> Vec<i64> { (0..rows).map(|_| rng.gen_range(0..2)).collect() };
    let smoke = flag(&mut rng);
    let alco = flag(&mut rng);
    let active = flag(&mut rng);
    let cardio = flag(&mut rng);

    df! {
        "id" => (0..rows as i64).collect::<Vec<_>>(),
        "height" => height,
        "weight" => weight,
        "ap_hi" => ap_hi,
        "ap_lo" => ap_lo,
        "cholesterol" => cholesterol,
        "gluc" => gluc,
        "smoke" => smoke,
        "alco" => alco,
        "active" => active,
        "cardio" => cardio,
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("medical_examination.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("medical_examination.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Read an integer column back as plain values
pub fn int_values(df: &DataFrame, name: &str) -> Vec<i64> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Int64)
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect()
}
