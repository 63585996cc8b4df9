//! Monthly bill impact of a rooftop array.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DC_TO_AC_DERATE: f64 = 0.85;
pub const DEFAULT_PANEL_WATTS: f64 = 400.0;
/// Only applied when synthesizing a config from the array maximum
pub const PERFORMANCE_RATIO: f64 = 0.75;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelConfigInput {
    pub panels_count: Option<f64>,
    pub yearly_energy_dc_kwh: Option<f64>,
}

/// The `solarPotential` fields the calculator reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolarPotentialInput {
    pub solar_panel_configs: Option<Vec<PanelConfigInput>>,
    pub max_array_panels_count: Option<f64>,
    pub max_sunshine_hours_per_year: Option<f64>,
    pub panel_capacity_watts: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSavings {
    pub panels_count: f64,
    pub yearly_energy_dc_kwh: f64,
    pub initial_ac_kwh_per_year: f64,
    pub monthly_bill_with_solar_usd: f64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub synthetic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsReport {
    pub monthly_bill_baseline_usd: f64,
    pub monthly_kwh_consumption: f64,
    #[serde(rename = "pricePerKWhUsd")]
    pub price_per_kwh_usd: f64,
    pub dc_to_ac_derate: f64,
    pub synthetic_config_used: bool,
    pub per_config: Vec<ConfigSavings>,
    pub recommended: Option<ConfigSavings>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SavingsError {
    #[error("Missing monthly bill or usage")]
    MissingUsage {
        have_monthly_bill: bool,
        have_monthly_kwh: bool,
    },

    #[error("No usable configs and cannot synthesize")]
    CannotSynthesize {
        have_max_array_panels_count: bool,
        have_max_sunshine_hours_per_year: bool,
    },
}

impl SavingsError {
    pub fn http_status_code(&self) -> u16 {
        match self {
            SavingsError::MissingUsage { .. } => 400,
            SavingsError::CannotSynthesize { .. } => 422,
        }
    }
}

/// Compare the current bill against each panel configuration.
///
/// Price per kWh is `bill / kwh`. Each config offsets
/// `yearlyEnergyDcKwh × DC_TO_AC_DERATE` of annual consumption. When the
/// record has no usable configs, one is synthesized from the array maximum.
pub fn calculate_savings(
    potential: &SolarPotentialInput,
    monthly_bill_usd: Option<f64>,
    monthly_kwh: Option<f64>,
) -> Result<SavingsReport, SavingsError> {
    let (bill, kwh) = match (monthly_bill_usd, monthly_kwh) {
        (Some(bill), Some(kwh)) if kwh > 0.0 => (bill, kwh),
        _ => {
            return Err(SavingsError::MissingUsage {
                have_monthly_bill: monthly_bill_usd.is_some(),
                have_monthly_kwh: monthly_kwh.is_some_and(|k| k > 0.0),
            })
        }
    };

    let price_per_kwh = bill / kwh;
    let annual_consumption = kwh * 12.0;

    let mut configs: Vec<(f64, f64, bool)> = potential
        .solar_panel_configs
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(|c| Some((c.panels_count?, c.yearly_energy_dc_kwh?, false)))
        .collect();

    let synthetic_used = configs.is_empty();
    if synthetic_used {
        match (potential.max_array_panels_count, potential.max_sunshine_hours_per_year) {
            (Some(panels), Some(sunshine)) => {
                let watts = potential.panel_capacity_watts.unwrap_or(DEFAULT_PANEL_WATTS);
                let yearly_dc = panels * watts * sunshine / 1000.0 * PERFORMANCE_RATIO;
                configs.push((panels.trunc(), yearly_dc, true));
            }
            (panels, sunshine) => {
                return Err(SavingsError::CannotSynthesize {
                    have_max_array_panels_count: panels.is_some(),
                    have_max_sunshine_hours_per_year: sunshine.is_some(),
                })
            }
        }
    }

    let per_config: Vec<ConfigSavings> = configs
        .into_iter()
        .map(|(panels_count, yearly_dc, synthetic)| {
            let initial_ac = yearly_dc * DC_TO_AC_DERATE;
            let remaining_annual = (annual_consumption - initial_ac).max(0.0);
            ConfigSavings {
                panels_count,
                yearly_energy_dc_kwh: yearly_dc,
                initial_ac_kwh_per_year: initial_ac,
                monthly_bill_with_solar_usd: remaining_annual * price_per_kwh / 12.0,
                synthetic,
            }
        })
        .collect();

    // strict < keeps the first config on ties
    let recommended = per_config
        .iter()
        .fold(None::<&ConfigSavings>, |best, c| match best {
            Some(b) if b.monthly_bill_with_solar_usd <= c.monthly_bill_with_solar_usd => Some(b),
            _ => Some(c),
        })
        .cloned();

    Ok(SavingsReport {
        monthly_bill_baseline_usd: bill,
        monthly_kwh_consumption: kwh,
        price_per_kwh_usd: price_per_kwh,
        dc_to_ac_derate: DC_TO_AC_DERATE,
        synthetic_config_used: synthetic_used,
        per_config,
        recommended,
    })
}
