//! Electricity bill calculations.

pub mod plans;
pub mod savings;

pub use plans::{AdditionalFee, PlanType, RatePlan, RegionTariffs, TariffTable, Tier, TouPeriod};
pub use savings::{calculate_savings, SavingsError, SavingsReport, SolarPotentialInput};
