/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Months covered by a usage report
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UsagePeriod {
    /// First month, `YYYY-MM`
    pub start_month: String,
    /// Last month, `YYYY-MM`
    pub end_month: String,
}

/// Aggregated usage over the whole period
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct UsageTotals {
    /// Jobs processed
    pub jobs: u64,
    /// Tokens spent on transcription
    pub transcription_tokens: u64,
    /// Tokens spent on note generation
    pub note_tokens: u64,
    /// Cost before volume discounts
    pub base_cost: f64,
    /// Cost after volume discounts
    pub final_cost: f64,
    /// `base_cost - final_cost`
    pub savings: f64,
    /// Discount applied over the period, in percent
    pub effective_discount_percentage: f64,
    /// Free jobs remaining on the plan
    pub free_jobs_left: u64,
}

/// Usage for a single month
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct MonthlyUsage {
    /// Month, `YYYY-MM`
    pub month: String,
    /// Jobs processed
    pub jobs: u64,
    /// Tokens spent on transcription
    pub transcription_tokens: u64,
    /// Tokens spent on note generation
    pub note_tokens: u64,
    /// Cost before volume discounts
    pub base_cost: f64,
    /// Cost after volume discounts
    pub final_cost: f64,
    /// `base_cost - final_cost`
    pub savings: f64,
    /// Discount of the pricing tier reached this month, in percent
    pub current_tier_discount: f64,
    /// Jobs billed in each pricing tier
    pub tiers: HashMap<String, u64>,
}

/// Token consumption of a single API key
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct TokenUsage {
    /// Transcription tokens
    pub transcription: u64,
    /// Note generation tokens
    pub note_generation: u64,
}

/// Cost breakdown of a single API key
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CostBreakdown {
    /// Cost before discounts
    pub base: f64,
    /// Cost after discounts
    #[serde(rename = "final")]
    pub final_cost: f64,
    /// Discount amount
    pub savings: f64,
}

/// Usage attributed to one API key (masked in the report)
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ApiKeyUsage {
    /// Jobs processed with this key
    pub jobs: u64,
    /// Token consumption
    pub tokens: TokenUsage,
    /// Cost breakdown
    pub costs: CostBreakdown,
    /// Jobs billed in each pricing tier
    pub tiers: HashMap<String, u64>,
}

/// Usage report returned by `user/usage`
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct UsageReport {
    /// Months covered
    pub period: UsagePeriod,
    /// Totals over the period
    pub totals: UsageTotals,
    /// One entry per month, oldest first
    pub monthly_breakdown: Vec<MonthlyUsage>,
    /// Usage per masked API key
    pub api_keys: HashMap<String, ApiKeyUsage>,
}

impl UsageReport {
    /// Total jobs across all API keys in the report
    #[must_use]
    pub fn jobs_by_keys(&self) -> u64 {
        self.api_keys.values().map(|k| k.jobs).sum()
    }
}
