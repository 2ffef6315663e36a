use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    #[serde(rename = "buy")]
    EmaBuy,
    #[serde(rename = "sell")]
    EmaSell,
    #[serde(rename = "breakout_buy")]
    BreakoutBuy,
    #[serde(rename = "breakout_sell")]
    BreakoutSell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalCategory {
    EmaCrossover,
    Breakout,
}

impl SignalKind {
    pub fn category(&self) -> SignalCategory {
        match self {
            SignalKind::EmaBuy | SignalKind::EmaSell => SignalCategory::EmaCrossover,
            SignalKind::BreakoutBuy | SignalKind::BreakoutSell => SignalCategory::Breakout,
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, SignalKind::EmaBuy | SignalKind::BreakoutBuy)
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::EmaBuy => write!(f, "buy"),
            SignalKind::EmaSell => write!(f, "sell"),
            SignalKind::BreakoutBuy => write!(f, "breakout_buy"),
            SignalKind::BreakoutSell => write!(f, "breakout_sell"),
        }
    }
}

/// A discrete trading event at a bar index (never index 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalEvent {
    pub index: usize,
    pub kind: SignalKind,
}

impl SignalEvent {
    pub fn new(index: usize, kind: SignalKind) -> Self {
        Self { index, kind }
    }
}
