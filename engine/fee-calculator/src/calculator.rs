//! Fee calculation entry points

use crate::breakdown::FeeBreakdown;
use crate::error::FeeError;
use crate::Result;

/// Check that a listing price is finite and non-negative
pub fn validate_price(price: f64) -> Result<f64> {
    if !price.is_finite() {
        return Err(FeeError::invalid_argument(format!("price must be finite, got {}", price)));
    }
    if price < 0.0 {
        return Err(FeeError::invalid_argument(format!(
            "price must be non-negative, got {}",
            price
        )));
    }
    // Normalizes -0.0 to 0.0
    Ok(price + 0.0)
}

/// Calculate the fee breakdown for a listing price in SOL
///
/// Zero and very small prices yield proportionally zero or near-zero fees.
/// Negative or non-finite prices are rejected with [`FeeError::InvalidArgument`].
pub fn calculate_fees(price: f64) -> Result<FeeBreakdown> {
    let price = validate_price(price)?;
    Ok(FeeBreakdown::compute(price))
}
