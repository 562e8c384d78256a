//! FeeCalculator - marketplace fee breakdown
//!
//! Computes the fee breakdown shown whenever an NFT is listed or a purchase is
//! previewed: market taker fee, creator royalty, community and operations cuts,
//! and the seller's net proceeds. The [`display`] module holds the shared
//! rounding and row layout used by every price breakdown view.

pub mod breakdown;
pub mod calculator;
pub mod display;
pub mod error;
pub mod rates;

pub use breakdown::FeeBreakdown;
pub use calculator::{calculate_fees, validate_price};
pub use display::{format_sol, format_usd, BreakdownLine, PriceBreakdown};
pub use error::FeeError;
pub use rates::FeeComponent;

// Result type alias
pub type Result<T> = std::result::Result<T, FeeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_flow() {
        let quote = PriceBreakdown::new(100.0).unwrap();
        assert!((quote.fees.seller_receives - 90.5).abs() < 1e-9);
        assert_eq!(quote.lines()[6].sol, "90.500 SOL");
    }

    #[test]
    fn test_fee_error_display() {
        let err = calculate_fees(-2.0).unwrap_err();
        assert!(err.to_string().starts_with("Invalid argument:"));
    }
}
