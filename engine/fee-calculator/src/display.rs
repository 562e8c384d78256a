//! Price breakdown presentation
//!
//! Listing, buy-preview and transaction views all render the same rows: the
//! listing price, each fee component, the totals, and optionally their USD
//! value at a caller-supplied SOL/USD rate. Amounts are rounded here and only
//! here; the calculator itself returns full precision.

use crate::breakdown::FeeBreakdown;
use crate::calculator::validate_price;
use crate::error::FeeError;
use crate::Result;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Default number of decimals shown for SOL amounts
pub const SOL_DISPLAY_DECIMALS: u32 = 3;

/// Maximum number of decimals shown for SOL amounts
pub const SOL_MAX_DISPLAY_DECIMALS: u32 = 4;

/// Decimals shown for USD amounts
pub const USD_DISPLAY_DECIMALS: u32 = 2;

/// Round half away from zero and render with exactly `decimals` places
fn format_fixed(amount: f64, decimals: u32) -> String {
    match Decimal::from_f64(amount) {
        Some(value) => {
            let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.*}", decimals as usize, rounded)
        }
        // Out of Decimal range or non-finite
        None => format!("{:.*}", decimals as usize, amount),
    }
}

/// Format a SOL amount, e.g. `"1.347 SOL"`
///
/// `decimals` is clamped to [`SOL_MAX_DISPLAY_DECIMALS`].
pub fn format_sol(amount: f64, decimals: u32) -> String {
    format!("{} SOL", format_fixed(amount, decimals.min(SOL_MAX_DISPLAY_DECIMALS)))
}

/// Format a USD amount, e.g. `"$164.25"`
pub fn format_usd(amount: f64) -> String {
    let formatted = format_fixed(amount.abs(), USD_DISPLAY_DECIMALS);
    if amount < 0.0 {
        format!("-${}", formatted)
    } else {
        format!("${}", formatted)
    }
}

/// One rendered row of a price breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub label: String,
    pub sol: String,
    pub usd: Option<String>,
}

/// Listing price together with its fees and display helpers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub price: f64,
    pub fees: FeeBreakdown,
    pub buyer_total: f64,
    pub sol_usd_rate: Option<f64>,
}

impl PriceBreakdown {
    /// Build a breakdown for a validated listing price
    ///
    /// Prices whose buyer total overflows `f64` are rejected.
    pub fn new(price: f64) -> Result<Self> {
        let price = validate_price(price)?;
        let fees = FeeBreakdown::compute(price);
        let buyer_total = fees.buyer_total(price);
        if !buyer_total.is_finite() {
            return Err(FeeError::invalid_argument(format!(
                "price {} is too large: buyer total is not finite",
                price
            )));
        }
        Ok(Self { price, fees, buyer_total, sol_usd_rate: None })
    }

    /// Attach a SOL/USD conversion rate
    pub fn with_usd_rate(mut self, rate: f64) -> Result<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(FeeError::invalid_argument(format!(
                "SOL/USD rate must be finite and positive, got {}",
                rate
            )));
        }
        // Buyer total is the largest amount converted
        if !(self.buyer_total * rate).is_finite() {
            return Err(FeeError::invalid_argument(format!(
                "SOL/USD rate {} is too large for price {}",
                rate, self.price
            )));
        }
        self.sol_usd_rate = Some(rate);
        Ok(self)
    }

    /// Convert a SOL amount to USD, if a rate is attached
    pub fn usd(&self, amount_sol: f64) -> Option<f64> {
        self.sol_usd_rate.map(|rate| amount_sol * rate)
    }

    fn line(&self, label: &str, amount_sol: f64, decimals: u32) -> BreakdownLine {
        BreakdownLine {
            label: label.to_string(),
            sol: format_sol(amount_sol, decimals),
            usd: self.usd(amount_sol).map(format_usd),
        }
    }

    /// Rows at the default SOL precision
    pub fn lines(&self) -> Vec<BreakdownLine> {
        self.lines_with_decimals(SOL_DISPLAY_DECIMALS)
    }

    /// Rows: price, each fee, total fees, seller receives, buyer pays
    pub fn lines_with_decimals(&self, decimals: u32) -> Vec<BreakdownLine> {
        let mut lines = Vec::with_capacity(8);
        lines.push(self.line("Listing price", self.price, decimals));
        for (component, amount) in self.fees.components() {
            lines.push(self.line(component.label(), amount, decimals));
        }
        lines.push(self.line("Total fees", self.fees.total_fees, decimals));
        lines.push(self.line("Seller receives", self.fees.seller_receives, decimals));
        lines.push(self.line("Buyer pays", self.buyer_total, decimals));
        lines
    }
}
