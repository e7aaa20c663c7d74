/*!
 * Tests for error types and conversions
 */

use hybrid_translator::errors::{AppError, ProviderError, TranslationError};

#[test]
fn test_provider_error_shouldConvertIntoAppError() {
    let error: AppError = ProviderError::EmptyResponse.into();

    assert!(matches!(error, AppError::Translation(TranslationError::Provider(ProviderError::EmptyResponse))));
    assert!(error.to_string().contains("empty response"));
}

#[test]
fn test_api_error_display_shouldIncludeStatus() {
    let error = ProviderError::ApiError {
        status_code: 404,
        message: "model not found".to_string(),
    };

    assert_eq!(error.to_string(), "API responded with error: 404 - model not found");
}

#[test]
fn test_io_and_json_errors_shouldBecomeFileErrors() {
    let io: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(io, AppError::File(_)));

    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let json: AppError = json_error.into();
    assert!(matches!(json, AppError::File(message) if message.starts_with("Invalid JSON")));
}
