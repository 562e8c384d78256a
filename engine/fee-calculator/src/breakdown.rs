//! Fee breakdown value object

use crate::rates::FeeComponent;
use serde::{Deserialize, Serialize};

/// Fee breakdown for a single listing price, in SOL
///
/// Values keep full `f64` precision; rounding is a display concern handled by
/// [`crate::display`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeBreakdown {
    pub market_taker: f64,
    pub creator_royalty: f64,
    pub community: f64,
    pub operations: f64,
    pub total_fees: f64,
    pub seller_receives: f64,
}

impl FeeBreakdown {
    /// Compute the breakdown without validating `price`
    ///
    /// NaN or infinite input propagates into every field. Use
    /// [`crate::calculate_fees`] at trust boundaries.
    pub fn compute(price: f64) -> Self {
        let market_taker = price * FeeComponent::MarketTaker.rate();
        let creator_royalty = price * FeeComponent::CreatorRoyalty.rate();
        let community = price * FeeComponent::Community.rate();
        let operations = price * FeeComponent::Operations.rate();

        let total_fees = market_taker + creator_royalty + community + operations;

        Self {
            market_taker,
            creator_royalty,
            community,
            operations,
            total_fees,
            seller_receives: price - total_fees,
        }
    }

    /// Amount of a single component
    pub fn component(&self, component: FeeComponent) -> f64 {
        match component {
            FeeComponent::MarketTaker => self.market_taker,
            FeeComponent::CreatorRoyalty => self.creator_royalty,
            FeeComponent::Community => self.community,
            FeeComponent::Operations => self.operations,
        }
    }

    /// Components paired with their amounts, in display order
    pub fn components(&self) -> [(FeeComponent, f64); 4] {
        FeeComponent::ALL.map(|c| (c, self.component(c)))
    }

    /// Buyer-facing total: the listing price plus all fees
    pub fn buyer_total(&self, price: f64) -> f64 {
        price + self.total_fees
    }
}
