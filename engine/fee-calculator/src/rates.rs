//! Fixed marketplace fee rates
//!
//! Rates are expressed in basis points (1/10000th of the listing price) and are
//! compile-time constants. They are not configurable at runtime.

use serde::{Deserialize, Serialize};

/// Basis points per whole unit
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Platform taker fee (2%)
pub const MARKET_TAKER_FEE_BPS: u32 = 200;

/// Royalty routed to the collection creator (5%)
pub const CREATOR_ROYALTY_BPS: u32 = 500;

/// Community treasury cut (2%)
pub const COMMUNITY_FEE_BPS: u32 = 200;

/// Operations cut (0.5%)
pub const OPERATIONS_FEE_BPS: u32 = 50;

/// Combined rate of all components (9.5%)
pub const TOTAL_FEE_BPS: u32 =
    MARKET_TAKER_FEE_BPS + CREATOR_ROYALTY_BPS + COMMUNITY_FEE_BPS + OPERATIONS_FEE_BPS;

/// Individual fee components taken from a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeeComponent {
    MarketTaker,
    CreatorRoyalty,
    Community,
    Operations,
}

impl FeeComponent {
    /// All components in display order
    pub const ALL: [FeeComponent; 4] = [
        FeeComponent::MarketTaker,
        FeeComponent::CreatorRoyalty,
        FeeComponent::Community,
        FeeComponent::Operations,
    ];

    /// Rate in basis points
    pub const fn bps(self) -> u32 {
        match self {
            FeeComponent::MarketTaker => MARKET_TAKER_FEE_BPS,
            FeeComponent::CreatorRoyalty => CREATOR_ROYALTY_BPS,
            FeeComponent::Community => COMMUNITY_FEE_BPS,
            FeeComponent::Operations => OPERATIONS_FEE_BPS,
        }
    }

    /// Rate as a fraction of the price (e.g. 0.02)
    pub const fn rate(self) -> f64 {
        match self {
            FeeComponent::MarketTaker => 0.02,
            FeeComponent::CreatorRoyalty => 0.05,
            FeeComponent::Community => 0.02,
            FeeComponent::Operations => 0.005,
        }
    }

    /// Human-readable label used in price breakdowns
    pub const fn label(self) -> &'static str {
        match self {
            FeeComponent::MarketTaker => "Market taker fee",
            FeeComponent::CreatorRoyalty => "Creator royalty",
            FeeComponent::Community => "Community fee",
            FeeComponent::Operations => "Operations fee",
        }
    }
}

impl std::fmt::Display for FeeComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Combined rate as a fraction of the price
pub fn total_rate() -> f64 {
    FeeComponent::ALL.iter().map(|c| c.rate()).sum()
}
