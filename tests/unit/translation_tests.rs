/*!
 * Tests for placeholder protection and per-cell translation
 */

use std::sync::Arc;
use sheet_translate::app_config::TranslationCommonConfig;
use sheet_translate::providers::mock::MockProvider;
use sheet_translate::table::CellValue;
use sheet_translate::translation::{
    is_symbolic_only, is_symbolic_text, CellOutcome, CellTranslator, PlaceholderSet, TranslationService,
};

fn translator(provider: MockProvider, target_language: &str) -> CellTranslator {
    let service = TranslationService::with_provider(Box::new(provider), &TranslationCommonConfig::default());
    CellTranslator::new(Arc::new(service), "en", target_language)
}

/// Test that plain text passes through extraction unchanged
#[test]
fn test_extract_withoutPlaceholders_shouldKeepText() {
    let set = PlaceholderSet::extract("How are you today?");

    assert!(set.is_empty());
    assert_eq!(set.marked_text(), "How are you today?");
}

/// Test that several distinct placeholders round-trip through an identity translator
#[test]
fn test_extractRestore_withDistinctPlaceholders_shouldRoundTrip() {
    let text = "Dear {first_name} {last_name}, your order {order.id} ships on {date:%Y-%m-%d}.";
    let set = PlaceholderSet::extract(text);

    assert_eq!(set.len(), 4);
    assert_eq!(set.marked_text(), "Dear <<0>> <<1>>, your order <<2>> ships on <<3>>.");

    let restored = set.restore(set.marked_text());
    assert!(restored.is_complete());
    assert_eq!(restored.text, text);
}

/// Test duplicate tokens get one marker per occurrence
#[test]
fn test_extract_withDuplicateTokens_shouldNumberEachOccurrence() {
    let set = PlaceholderSet::extract("{a} and {a}");

    assert_eq!(set.tokens(), ["{a}", "{a}"]);
    assert_eq!(set.marked_text(), "<<0>> and <<1>>");
    assert_eq!(set.restore("<<1>> y <<0>>").text, "{a} y {a}");
}

/// Test symbolic-only detection
#[test]
fn test_isSymbolicText_withVariousInputs_shouldDetectPunctuationOnly() {
    assert!(is_symbolic_text("{x}! ??"));
    assert!(is_symbolic_text("{a}{b}"));
    assert!(is_symbolic_text("— … «»"));
    assert!(!is_symbolic_text("{count} items"));
    assert!(!is_symbolic_text("7"));
    assert!(!is_symbolic_text("नमस्ते"));

    assert!(is_symbolic_only(&CellValue::Int(7)));
    assert!(!is_symbolic_only(&CellValue::text("7")));
}

/// Test the end-to-end column example with an identity provider
#[tokio::test]
async fn test_translateCell_withIdentityProvider_shouldReturnInputs() {
    let provider = MockProvider::identity();
    let translator = translator(provider.clone(), "ml");

    let inputs = ["Hello {name}!", "{id}", "Good morning"];
    let mut outputs = Vec::new();
    for input in inputs {
        outputs.push(translator.translate_cell(&CellValue::text(input)).await.into_value());
    }

    assert_eq!(outputs, inputs.iter().map(|s| CellValue::text(*s)).collect::<Vec<_>>());
    // "{id}" never reaches the provider
    assert_eq!(provider.request_count(), 2);
}

/// Test that a failing provider leaves the original text
#[tokio::test]
async fn test_translateCell_withFailingProvider_shouldReturnFailedOutcome() {
    let translator = translator(MockProvider::failing(), "fr");

    let outcome = translator.translate_cell(&CellValue::text("Where is {place}?")).await;

    match outcome {
        CellOutcome::Failed { original, reason } => {
            assert_eq!(original, CellValue::text("Where is {place}?"));
            assert!(reason.contains("Simulated provider failure"));
        }
        other => panic!("expected a failed outcome, got {:?}", other),
    }
}

/// Test that providers adding spaces inside markers are tolerated
#[tokio::test]
async fn test_translateCell_withSpacedMarkers_shouldStillRestore() {
    let provider = MockProvider::identity()
        .with_custom_response(|req| req.text.replace("<<0>>", "<< 0 >>").replace("Hi", "Salut"));
    let translator = translator(provider, "fr");

    let outcome = translator.translate_cell(&CellValue::text("Hi {user}")).await;

    assert_eq!(
        outcome,
        CellOutcome::Translated {
            value: CellValue::text("Salut {user}"),
            missing_markers: vec![],
        }
    );
}
