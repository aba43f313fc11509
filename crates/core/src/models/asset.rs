use serde::{Deserialize, Serialize};

/// The three asset classes the simulator blends.
///
/// Serialized as the short wire keys (`btc`, `equity`, `bond`) used both in
/// query strings and in the per-asset value records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    /// Bitcoin, priced in USD
    #[serde(rename = "btc")]
    Bitcoin,
    /// S&P 500 index fund
    #[serde(rename = "equity")]
    Equity,
    /// Vanguard Total Bond Market fund (VBTLX), dividends reinvested
    #[serde(rename = "bond")]
    Bond,
}

impl AssetClass {
    /// All asset classes, in display order.
    pub const ALL: [AssetClass; 3] = [AssetClass::Bitcoin, AssetClass::Equity, AssetClass::Bond];

    /// Short key used on the wire (`btc`, `equity`, `bond`).
    pub fn key(&self) -> &'static str {
        match self {
            AssetClass::Bitcoin => "btc",
            AssetClass::Equity => "equity",
            AssetClass::Bond => "bond",
        }
    }

    /// Legend label for charts.
    pub fn label(&self) -> &'static str {
        match self {
            AssetClass::Bitcoin => "Bitcoin",
            AssetClass::Equity => "S&P",
            AssetClass::Bond => "Bonds (VBTLX)*",
        }
    }

    /// Line colour for charts.
    pub fn color(&self) -> &'static str {
        match self {
            AssetClass::Bitcoin => "#f7931a",
            AssetClass::Equity => "#2f4b7c",
            AssetClass::Bond => "#28a745",
        }
    }

    /// Name of the price field in this asset's static dataset.
    /// The snapshots were exported from different sources, so every file differs.
    pub fn price_field(&self) -> &'static str {
        match self {
            AssetClass::Bitcoin => "btc",
            AssetClass::Equity => "spy",
            AssetClass::Bond => "adjusted_value",
        }
    }

    /// File name of this asset's static dataset inside the data directory.
    pub fn dataset_file(&self) -> &'static str {
        match self {
            AssetClass::Bitcoin => "bitcoin.json",
            AssetClass::Equity => "spy.json",
            AssetClass::Bond => "vanguard-bond-total-with-dividends.json",
        }
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetClass::Bitcoin => write!(f, "Bitcoin"),
            AssetClass::Equity => write!(f, "Equity"),
            AssetClass::Bond => write!(f, "Bond"),
        }
    }
}

impl std::str::FromStr for AssetClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "btc" | "bitcoin" => Ok(AssetClass::Bitcoin),
            "equity" | "spy" | "sp500" => Ok(AssetClass::Equity),
            "bond" | "bonds" | "vbtlx" => Ok(AssetClass::Bond),
            other => Err(format!("unknown asset class '{other}'")),
        }
    }
}
