use mento_prices_core::PriceHistoryError;

/// Tag an error with the source that produced it.
///
/// Errors that already identify a source (or aggregate several) pass through;
/// anything else becomes `Source { name, msg }`.
pub(crate) fn tag_err(source: &str, e: PriceHistoryError) -> PriceHistoryError {
    match e {
        e @ (PriceHistoryError::NotFound { .. }
        | PriceHistoryError::Source { .. }
        | PriceHistoryError::SourceTimeout { .. }
        | PriceHistoryError::AllSourcesFailed(_)
        | PriceHistoryError::AllSourcesTimedOut) => e,
        other => PriceHistoryError::source_failed(source, other.to_string()),
    }
}

/// Collapse the errors of every attempted source into one outcome.
///
/// Rules:
/// - If `errors` is empty → `InvalidArg` (no source was asked).
/// - If all errors are `SourceTimeout` → `AllSourcesTimedOut`.
/// - If `not_found_what` is `Some` and all errors are `NotFound` → `NotFound(what)`.
/// - Else → `AllSourcesFailed(errors)`.
pub(crate) fn collapse_errors(
    errors: Vec<PriceHistoryError>,
    not_found_what: Option<String>,
) -> PriceHistoryError {
    if errors.is_empty() {
        return PriceHistoryError::InvalidArg("no price sources to query".into());
    }
    if errors
        .iter()
        .all(|e| matches!(e, PriceHistoryError::SourceTimeout { .. }))
    {
        return PriceHistoryError::AllSourcesTimedOut;
    }
    if let Some(what) = not_found_what
        && errors
            .iter()
            .all(|e| matches!(e, PriceHistoryError::NotFound { .. }))
    {
        return PriceHistoryError::not_found(what);
    }
    PriceHistoryError::AllSourcesFailed(errors)
}
