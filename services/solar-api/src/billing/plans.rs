//! Utility rate plans and their monthly cost.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tariff table loaded from YAML, keyed by lowercase region id.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TariffTable {
    #[serde(default)]
    pub regions: BTreeMap<String, RegionTariffs>,
}

impl TariffTable {
    pub fn region(&self, id: &str) -> Option<&RegionTariffs> {
        self.regions.get(&id.trim().to_lowercase())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RegionTariffs {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub plans: Vec<RatePlan>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanType {
    Flat,
    Tiered,
    Tou,
    Hybrid,
    /// Anything else is billed as flat
    Other,
}

impl PlanType {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "flat" => PlanType::Flat,
            "tiered" => PlanType::Tiered,
            "tou" => PlanType::Tou,
            "hybrid" => PlanType::Hybrid,
            _ => PlanType::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Tier {
    #[serde(rename = "start_kWh", default)]
    pub start_kwh: Option<f64>,
    #[serde(rename = "end_kWh", default)]
    pub end_kwh: Option<f64>,
    #[serde(rename = "price_per_kWh_usd")]
    pub price_per_kwh_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TouPeriod {
    #[serde(default)]
    pub period_name: Option<String>,
    #[serde(default)]
    pub start_hour: Option<i64>,
    #[serde(default)]
    pub end_hour: Option<i64>,
    #[serde(rename = "price_per_kWh_usd")]
    pub price_per_kwh_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AdditionalFee {
    #[serde(default)]
    pub name: Option<String>,
    pub amount_usd: f64,
    /// `kWh` for per-kWh fees, anything else for a flat monthly amount
    #[serde(default)]
    pub unit: Option<String>,
}

/// One utility rate plan, priced in USD.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RatePlan {
    pub plan_type: String,
    #[serde(default)]
    pub plan_name: Option<String>,
    #[serde(default)]
    pub utility_name: Option<String>,
    #[serde(rename = "price_per_kWh_usd", default)]
    pub price_per_kwh_usd: Option<f64>,
    #[serde(default)]
    pub tiers: Option<Vec<Tier>>,
    #[serde(default)]
    pub tou_periods: Option<Vec<TouPeriod>>,
    #[serde(default)]
    pub fixed_monthly_fee_usd: Option<f64>,
    #[serde(default)]
    pub additional_fees: Option<Vec<AdditionalFee>>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl RatePlan {
    pub fn kind(&self) -> PlanType {
        PlanType::from_str(&self.plan_type)
    }

    fn fixed_fee(&self) -> f64 {
        self.fixed_monthly_fee_usd.unwrap_or(0.0)
    }

    /// Total monthly cost for `kwh` of consumption, fees included.
    ///
    /// `None` when the plan lacks the prices its type needs.
    pub fn monthly_cost(&self, kwh: f64) -> Option<f64> {
        let base = match self.kind() {
            PlanType::Flat | PlanType::Other => self.flat_cost(kwh),
            PlanType::Tiered => self.tiered_cost(kwh),
            PlanType::Tou => self.tou_cost(kwh),
            PlanType::Hybrid => self.hybrid_cost(kwh),
        }?;
        Some(base + self.additional_fees(kwh))
    }

    pub fn flat_cost(&self, kwh: f64) -> Option<f64> {
        Some(kwh * self.price_per_kwh_usd? + self.fixed_fee())
    }

    /// Tiers are consumed in order. Anything left after the last tier is
    /// billed at the last tier's price.
    pub fn tiered_cost(&self, kwh: f64) -> Option<f64> {
        let tiers = self.tiers.as_deref().filter(|t| !t.is_empty())?;
        let mut remaining = kwh;
        let mut total = 0.0;

        for tier in tiers {
            let used = match (tier.start_kwh, tier.end_kwh) {
                (_, None) => remaining,
                (None, Some(end)) => remaining.min(end),
                (Some(start), Some(end)) => remaining.min(end - start),
            };
            total += used * tier.price_per_kwh_usd;
            remaining -= used;
            if remaining <= 0.0 {
                break;
            }
        }

        if remaining > 0.0 {
            total += remaining * tiers[tiers.len() - 1].price_per_kwh_usd;
        }
        Some(total + self.fixed_fee())
    }

    /// Hour-weighted average price when every period has hours, else the
    /// plain average. No periods costs nothing.
    pub fn tou_cost(&self, kwh: f64) -> Option<f64> {
        let periods = self.tou_periods.as_deref().unwrap_or_default();
        if periods.is_empty() {
            return Some(0.0);
        }

        let hours: Option<Vec<(i64, i64)>> = periods
            .iter()
            .map(|p| Some((p.start_hour?, p.end_hour?)))
            .collect();

        let effective_price = match hours {
            Some(hours) => {
                let mut total_hours = 0.0;
                let mut weighted = 0.0;
                for (period, (start, end)) in periods.iter().zip(hours) {
                    // same start and end hour covers the whole day
                    let span = match (end - start).rem_euclid(24) {
                        0 => 24.0,
                        h => h as f64,
                    };
                    total_hours += span;
                    weighted += period.price_per_kwh_usd * span;
                }
                weighted / total_hours
            }
            None => {
                periods.iter().map(|p| p.price_per_kwh_usd).sum::<f64>() / periods.len() as f64
            }
        };

        Some(kwh * effective_price + self.fixed_fee())
    }

    pub fn hybrid_cost(&self, kwh: f64) -> Option<f64> {
        if self.tiers.as_ref().is_some_and(|t| !t.is_empty()) {
            return self.tiered_cost(kwh);
        }
        if self.tou_periods.as_ref().is_some_and(|p| !p.is_empty()) {
            return self.tou_cost(kwh);
        }
        self.flat_cost(kwh)
    }

    pub fn additional_fees(&self, kwh: f64) -> f64 {
        self.additional_fees
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|fee| match fee.unit.as_deref() {
                Some(unit) if unit.eq_ignore_ascii_case("kwh") => fee.amount_usd * kwh,
                _ => fee.amount_usd,
            })
            .sum()
    }
}
