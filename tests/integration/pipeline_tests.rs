/*!
 * End-to-end runs of the read-translate-write pipeline with mock providers
 */

use anyhow::Result;
use std::fs;
use sheet_translate::app_controller::Controller;
use sheet_translate::providers::mock::MockProvider;
use sheet_translate::table::CellValue;
use rust_xlsxwriter::{Format, Workbook};
use crate::common;

/// Test the example column with an identity provider: output equals input
#[tokio::test]
async fn test_run_withIdentityProvider_shouldWriteIdenticalColumn() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let questions = ["Hello {name}!", "{id}", "Good morning"];
    let input = common::create_question_workbook(temp_dir.path(), "questions.xlsx", &questions)?;
    let output_dir = temp_dir.path().join("out");

    let provider = MockProvider::identity();
    let controller = Controller::with_provider(common::test_config(&input, &output_dir), Box::new(provider.clone()));
    let report = controller.run().await?;

    let name = report.output_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("translated_output_ml_"), "unexpected name {}", name);
    assert!(name.ends_with(".xlsx"));
    assert_eq!(report.output_path.parent(), Some(output_dir.as_path()));

    let column = common::read_column(&report.output_path, "Question")?;
    assert_eq!(column, questions.iter().map(|q| CellValue::text(*q)).collect::<Vec<_>>());

    assert_eq!(report.total_cells, 3);
    assert_eq!(report.translated, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed, 0);
    assert!(report.is_clean());
    assert_eq!(provider.request_count(), 2);
    Ok(())
}

/// Test that the translated column changes while other columns stay put
#[tokio::test]
async fn test_run_withWorkingProvider_shouldOnlyTouchDesignatedColumn() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_question_workbook(temp_dir.path(), "questions.xlsx", &["Hi {user}", "Bye"])?;

    let controller = Controller::with_provider(
        common::test_config(&input, temp_dir.path()),
        Box::new(MockProvider::working()),
    );
    let report = controller.run().await?;

    assert_eq!(
        common::read_column(&report.output_path, "Question")?,
        vec![CellValue::text("[ml] Hi {user}"), CellValue::text("[ml] Bye")]
    );
    assert_eq!(
        common::read_column(&report.output_path, "Id")?,
        vec![CellValue::Number(1.0), CellValue::Number(2.0)]
    );
    Ok(())
}

/// Test failure isolation: the third of five rows fails, the run still succeeds
#[tokio::test]
async fn test_run_withFailureOnThirdRow_shouldKeepOriginalAndContinue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let questions = ["One", "Two", "Three {n}", "Four", "Five"];
    let input = common::create_question_workbook(temp_dir.path(), "questions.xlsx", &questions)?;

    let mut config = common::test_config(&input, temp_dir.path());
    config.failed_cells_report = Some(temp_dir.path().join("failed.json"));

    let failing = MockProvider::fail_on_call(3).with_custom_response(|req| format!("T:{}", req.text));
    let controller = Controller::with_provider(config, Box::new(failing.clone()));
    let report = controller.run().await?;

    let column = common::read_column(&report.output_path, "Question")?;
    assert_eq!(
        column,
        vec![
            CellValue::text("T:One"),
            CellValue::text("T:Two"),
            CellValue::text("Three {n}"),
            CellValue::text("T:Four"),
            CellValue::text("T:Five"),
        ]
    );

    assert_eq!(report.translated, 4);
    assert_eq!(report.failed, 1);
    assert!(!report.is_clean());
    assert_eq!(report.failures[0].row, 4);
    assert_eq!(report.failures[0].original, "Three {n}");
    assert_eq!(failing.request_count(), 5);

    let failed_report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp_dir.path().join("failed.json"))?)?;
    assert_eq!(failed_report["column"], "Question");
    assert_eq!(failed_report["failures"][0]["row"], 4);
    assert_eq!(failed_report["failures"][0]["original"], "Three {n}");
    Ok(())
}

/// Test that failures are marked against the right text, not the call order
#[tokio::test]
async fn test_run_withFailOnText_shouldOnlyFailMatchingCell() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_question_workbook(
        temp_dir.path(),
        "questions.xlsx",
        &["Alpha", "Beta", "Gamma", "Delta", "Epsilon"],
    )?;

    let provider = MockProvider::fail_on_text("Gamma").with_custom_response(|req| format!("T:{}", req.text));
    let controller = Controller::with_provider(common::test_config(&input, temp_dir.path()), Box::new(provider));
    let report = controller.run().await?;

    let column = common::read_column(&report.output_path, "Question")?;
    assert_eq!(column[1], CellValue::text("T:Beta"));
    assert_eq!(column[2], CellValue::text("Gamma"));
    assert_eq!(column[3], CellValue::text("T:Delta"));
    assert_eq!(report.failed, 1);
    assert_eq!(report.failures[0].row, 4);
    Ok(())
}

/// Test that symbolic-only cells never reach the provider
#[tokio::test]
async fn test_run_withSymbolicOnlyColumn_shouldMakeNoProviderCalls() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let questions = ["{id}", "?!", "{a} - {b}", "..."];
    let input = common::create_question_workbook(temp_dir.path(), "questions.xlsx", &questions)?;

    let provider = MockProvider::working();
    let controller = Controller::with_provider(common::test_config(&input, temp_dir.path()), Box::new(provider.clone()));
    let report = controller.run().await?;

    assert_eq!(provider.request_count(), 0);
    assert_eq!(report.skipped, 4);
    assert_eq!(
        common::read_column(&report.output_path, "Question")?,
        questions.iter().map(|q| CellValue::text(*q)).collect::<Vec<_>>()
    );
    Ok(())
}

/// Test that repeated questions are translated once
#[tokio::test]
async fn test_run_withRepeatedCells_shouldUseCache() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_question_workbook(
        temp_dir.path(),
        "questions.xlsx",
        &["Hello {a}", "Hello {b}", "Hello {a}"],
    )?;

    let provider = MockProvider::working();
    let controller = Controller::with_provider(common::test_config(&input, temp_dir.path()), Box::new(provider.clone()));
    let report = controller.run().await?;

    // All three send "Hello <<0>>"
    assert_eq!(provider.request_count(), 1);
    assert_eq!(report.provider_calls, 1);
    assert_eq!(
        common::read_column(&report.output_path, "Question")?,
        vec![
            CellValue::text("[ml] Hello {a}"),
            CellValue::text("[ml] Hello {b}"),
            CellValue::text("[ml] Hello {a}"),
        ]
    );
    Ok(())
}

/// Test the CSV path: csv in, csv out, numeric fields untouched
#[tokio::test]
async fn test_run_withCsvInput_shouldWriteCsvOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "questions.csv",
        "id,question,weight\n1,\"Hello, {name}\",0.50\n2,42,1\n",
    )?;

    let mut config = common::test_config(&input, temp_dir.path());
    config.target_language = "fr".to_string();

    let provider = MockProvider::working();
    let controller = Controller::with_provider(config, Box::new(provider.clone()));
    let report = controller.run().await?;

    let name = report.output_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("translated_output_fr_"));
    assert!(name.ends_with(".csv"));

    let written = fs::read_to_string(&report.output_path)?;
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "id,question,weight");
    assert_eq!(lines[1], "1,\"[fr] Hello, {name}\",0.50");
    assert_eq!(lines[2], "2,42,1");
    assert_eq!(provider.request_count(), 1);
    Ok(())
}

/// Test that two runs in the same directory never overwrite each other
#[tokio::test]
async fn test_run_twice_shouldProduceDistinctOutputs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_question_workbook(temp_dir.path(), "questions.xlsx", &["Hi"])?;
    let output_dir = temp_dir.path().join("out");

    for _ in 0..2 {
        let controller = Controller::with_provider(
            common::test_config(&input, &output_dir),
            Box::new(MockProvider::identity()),
        );
        controller.run().await?;
    }

    assert_eq!(common::output_files(&output_dir)?.len(), 2);
    Ok(())
}

/// Test that date cells outside the designated column come back as dates
#[tokio::test]
async fn test_run_withDateColumn_shouldPreserveDates() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = temp_dir.path().join("dated.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    worksheet.write_string(0, 0, "Due")?;
    worksheet.write_string(0, 1, "Question")?;
    // 2024-01-15
    worksheet.write_number_with_format(1, 0, 45306.0, &date_format)?;
    worksheet.write_string(1, 1, "Hello")?;
    workbook.save(&input)?;

    let controller = Controller::with_provider(
        common::test_config(&input, temp_dir.path()),
        Box::new(MockProvider::identity()),
    );
    let report = controller.run().await?;

    assert_eq!(common::read_column(&report.output_path, "Due")?, vec![CellValue::DateTime(45306.0)]);
    assert_eq!(common::read_column(&report.output_path, "Question")?, vec![CellValue::text("Hello")]);
    Ok(())
}
