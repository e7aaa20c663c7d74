/*!
 * Integration tests for structure-preserving document translation.
 */

use serde_json::{Value, json};

use hybrid_translator::errors::{ProviderError, TranslationError};
use hybrid_translator::language::LanguagePair;
use hybrid_translator::providers::{FnTranslator, MockTranslator};
use hybrid_translator::translation::TranslationDriver;

use crate::common;

/// Same shape: identical keys in order, identical array lengths, identical non-string values
fn assert_same_shape(input: &Value, output: &Value) {
    match (input, output) {
        (Value::Object(a), Value::Object(b)) => {
            assert_eq!(a.keys().collect::<Vec<_>>(), b.keys().collect::<Vec<_>>());
            for (key, child) in a {
                assert_same_shape(child, &b[key]);
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            assert_eq!(a.len(), b.len());
            for (x, y) in a.iter().zip(b) {
                assert_same_shape(x, y);
            }
        }
        (Value::String(_), Value::String(_)) => {}
        (a, b) => assert_eq!(a, b),
    }
}

fn admin_document() -> Value {
    json!({
        "menu": {
            "login": "Giriş",
            "logout": "<a href=\"/cikis\">Çıkış</a>",
            "rates": "Döviz Kurları"
        },
        "dashboard": {
            "widgets": ["Bayiler", "Siparişler", 12, null],
            "help": "<p>Yardım için <b>destek</b> ekibine yazın.</p>",
            "enabled": true
        },
        "empty": "",
        "version": 3.5
    })
}

#[tokio::test]
async fn test_translate_tree_withUppercasingTranslator_shouldPreserveShapeAndTags() {
    let driver = TranslationDriver::new(common::sample_dictionary());
    let translator = FnTranslator::new(LanguagePair::TURKISH_TO_ENGLISH, |text: &str| Ok(text.to_uppercase()));

    let input = admin_document();
    let output = driver.translate_tree(&input, &translator).await.unwrap();

    assert_same_shape(&input, &output);
    assert_eq!(output["menu"]["logout"], "<a href=\"/cikis\">ÇIKIŞ</a>");
    assert_eq!(output["dashboard"]["help"], "<p>YARDIM IÇIN <b>DESTEK</b> EKIBINE YAZIN.</p>");
    assert_eq!(output["empty"], "");
}

#[tokio::test]
async fn test_translate_tree_twoStages_shouldChainThroughEnglish() {
    let driver = TranslationDriver::new(common::sample_dictionary());
    let first = MockTranslator::table(LanguagePair::TURKISH_TO_ENGLISH, &[("Giriş", "introduction"), ("Bayiler", "bayiers")]);
    let second = MockTranslator::table(LanguagePair::ENGLISH_TO_GERMAN, &[("Login", "Anmelden"), ("Dealers", "Händler")]);

    let input = json!({"a": "Giriş", "b": ["Bayiler"]});
    let english = driver.translate_tree(&input, &first).await.unwrap();
    let german = driver.translate_tree(&english, &second).await.unwrap();

    assert_eq!(english, json!({"a": "Login", "b": ["Dealers"]}));
    assert_eq!(german, json!({"a": "Anmelden", "b": ["Händler"]}));
    assert_eq!(second.requests(), vec!["Login", "Dealers"]);
}

#[tokio::test]
async fn test_translate_document_withMarkupLeaf_shouldTranslateTextSpansOnly() {
    let driver = TranslationDriver::new(common::sample_dictionary());
    let translator = MockTranslator::tagged(LanguagePair::TURKISH_TO_ENGLISH);

    let (output, stats) = driver
        .translate_document(&json!({"x": "<b>Merhaba</b> dünya"}), &translator)
        .await
        .unwrap();

    assert_eq!(output["x"], "<b>[EN] Merhaba</b> [EN] dünya");
    assert_eq!(translator.requests(), vec!["Merhaba", "dünya"]);
    assert_eq!(stats.leaves, 1);
    assert!(stats.flagged.is_empty());
}

#[tokio::test]
async fn test_translate_tree_withFailingLeaf_shouldAbortDocument() {
    let driver = TranslationDriver::new(common::sample_dictionary());
    let translator = MockTranslator::fail_on(LanguagePair::TURKISH_TO_ENGLISH, 2);

    let result = driver
        .translate_tree(&json!(["bir", "iki", "üç"]), &translator)
        .await;

    assert!(matches!(
        result,
        Err(TranslationError::Provider(ProviderError::ApiError { status_code: 503, .. }))
    ));
    assert_eq!(translator.request_count(), 2);
}

#[tokio::test]
async fn test_translate_document_withTerminologyFirst_shouldCountDictionaryHits() {
    let driver = TranslationDriver::new(common::sample_dictionary()).with_terminology_first(true);
    let translator = MockTranslator::echo(LanguagePair::TURKISH_TO_ENGLISH);

    let (output, stats) = driver
        .translate_document(&json!(["GİRİŞ", "çıkış", "Kaydet"]), &translator)
        .await
        .unwrap();

    assert_eq!(output[1], "Logout");
    assert_eq!(output[2], "Kaydet");
    assert_eq!(stats.from_terminology, 1);
    assert_eq!(translator.request_count(), 2);
}
