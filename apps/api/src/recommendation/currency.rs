use crate::recommendation::error::RecommendationError;

/// Rejects rates that cannot produce a meaningful USD total.
pub fn validate_exchange_rate(exchange_rate: f64) -> Result<f64, RecommendationError> {
    if exchange_rate.is_finite() && exchange_rate > 0.0 {
        Ok(exchange_rate)
    } else {
        Err(RecommendationError::validation(
            "exchangeRate",
            format!("must be a positive finite number, got {exchange_rate}"),
        ))
    }
}

/// `round(total_krw × exchange_rate)`, with the rate given as USD per KRW.
pub fn krw_to_usd(total_krw: u64, exchange_rate: f64) -> u64 {
    (total_krw as f64 * exchange_rate).round() as u64
}
