//! House project generation
//!
//! Runs the full pipeline: quantities, priced materials, cost breakdown,
//! ancillary costs and construction schedule. The whole computation is a
//! pure function of the configuration and is re-run in full on every call.

use std::fmt;

use crate::costs::{compute_ancillary, compute_costs};
use crate::materials::price_materials;
use crate::models::{GenerationResult, HouseConfig};
use crate::quantities::estimate_quantities;
use crate::schedule::build_schedule;

/// Derive the complete project dataset from one configuration.
pub fn generate(config: &HouseConfig) -> GenerationResult {
    let mass_positions = estimate_quantities(config);
    let materials = price_materials(config, &mass_positions);
    let costs = compute_costs(config);
    let ancillary = compute_ancillary(costs.total());
    let phases = build_schedule(config);

    GenerationResult {
        config: config.clone(),
        mass_positions,
        materials,
        costs,
        ancillary,
        phases,
    }
}

/// Format a monetary amount as "1.234.567,89 EUR"
pub fn format_eur(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{}{},{:02} EUR", sign, grouped, frac)
}

/// Condensed view of a generation result for terminal output
#[derive(Debug)]
pub struct Summary {
    pub title: String,
    pub floor_area: f64,
    pub floors: u32,
    pub tier: String,
    pub cost_positions: Vec<(&'static str, f64)>,
    pub structural_total: f64,
    pub ancillary_total: f64,
    pub grand_total: f64,
    pub mass_count: usize,
    pub material_count: usize,
    pub phase_count: usize,
    pub total_weeks: u32,
}

/// Build the summary for a generation result.
pub fn summarize(result: &GenerationResult) -> Summary {
    let config = &result.config;
    let title = if config.project_name.is_empty() {
        format!("{} – Neubau", config.house_type.label())
    } else {
        config.project_name.clone()
    };

    Summary {
        title,
        floor_area: config.floor_area,
        floors: config.floors,
        tier: config.finish_tier.label().to_string(),
        cost_positions: result.costs.positions(),
        structural_total: result.costs.total(),
        ancillary_total: result.ancillary_total(),
        grand_total: result.grand_total(),
        mass_count: result.mass_positions.len(),
        material_count: result.materials.len(),
        phase_count: result.phases.len(),
        total_weeks: result.total_weeks(),
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Hausbau-Kalkulation ===")?;
        writeln!(f, "Projekt: {}", self.title)?;
        writeln!(
            f,
            "Flaeche: {} m², {} Geschoss(e), Ausstattung: {}",
            self.floor_area, self.floors, self.tier
        )?;
        writeln!(f)?;

        writeln!(f, "Baukosten nach Gewerk:")?;
        for (name, amount) in &self.cost_positions {
            writeln!(f, "  {:<20} {:>16}", name, format_eur(*amount))?;
        }
        writeln!(f)?;

        writeln!(f, "Baukosten:   {:>16}", format_eur(self.structural_total))?;
        writeln!(f, "Nebenkosten: {:>16}", format_eur(self.ancillary_total))?;
        writeln!(f, "Gesamt:      {:>16}", format_eur(self.grand_total))?;
        writeln!(f)?;

        writeln!(
            f,
            "{} Massenpositionen, {} Materialpositionen",
            self.mass_count, self.material_count
        )?;
        writeln!(
            f,
            "Bauzeit: {} Wochen ({} Phasen)",
            self.total_weeks, self.phase_count
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FinishTier;

    fn reference_config() -> HouseConfig {
        HouseConfig {
            floor_area: 140.0,
            floors: 2,
            basement: true,
            baths: 2,
            guest_wcs: 1,
            rooms: 5,
            kitchen: true,
            garage: false,
            underfloor_heating: false,
            solar: false,
            heat_pump: false,
            smart_home: false,
            ..HouseConfig::default()
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let config = reference_config();
        let a = generate(&config);
        let b = generate(&config);
        assert_eq!(a.mass_positions, b.mass_positions);
        assert_eq!(a.materials, b.materials);
        assert_eq!(a.costs, b.costs);
        assert_eq!(a.ancillary, b.ancillary);
        assert_eq!(a.phases, b.phases);
    }

    #[test]
    fn grand_total_is_structural_plus_ancillary() {
        let result = generate(&reference_config());
        let expected = result.costs.total() + result.ancillary.iter().map(|n| n.amount).sum::<f64>();
        assert_eq!(result.grand_total(), expected);
    }

    #[test]
    fn reference_result_has_expected_shape() {
        let result = generate(&reference_config());
        assert_eq!(result.mass_positions.len(), 22);
        assert_eq!(result.ancillary.len(), 11);
        assert_eq!(result.phases.len(), 18);
        assert_eq!(result.total_weeks(), 33);
        assert!(!result.materials.is_empty());
    }

    #[test]
    fn grand_total_rises_strictly_with_tier() {
        let totals: Vec<f64> = [FinishTier::Basic, FinishTier::Standard, FinishTier::Premium]
            .into_iter()
            .map(|finish_tier| {
                generate(&HouseConfig {
                    finish_tier,
                    ..reference_config()
                })
                .grand_total()
            })
            .collect();
        assert!(totals[0] < totals[1]);
        assert!(totals[1] < totals[2]);
    }

    #[test]
    fn procurement_list_carries_line_totals() {
        let result = generate(&reference_config());
        let list = result.procurement_list();
        assert_eq!(list.len(), result.materials.len());
        for (item, mat) in list.iter().zip(&result.materials) {
            assert_eq!(item.estimated_price, mat.quantity * mat.unit_price);
        }
    }

    #[test]
    fn degenerate_config_still_generates_a_full_result() {
        let config = HouseConfig {
            floor_area: 1.0,
            floors: 1,
            basement: false,
            baths: 0,
            guest_wcs: 0,
            rooms: 0,
            kitchen: false,
            ..reference_config()
        };
        let result = generate(&config);
        assert!(!result.mass_positions.is_empty());
        assert!(!result.phases.is_empty());
        assert!(result.grand_total() > 0.0);
    }

    #[test]
    fn eur_formatting_groups_thousands() {
        assert_eq!(format_eur(0.0), "0,00 EUR");
        assert_eq!(format_eur(950.5), "950,50 EUR");
        assert_eq!(format_eur(8500.0), "8.500,00 EUR");
        assert_eq!(format_eur(1_234_567.89), "1.234.567,89 EUR");
        assert_eq!(format_eur(-4000.0), "-4.000,00 EUR");
    }

    #[test]
    fn summary_uses_house_type_when_name_is_empty() {
        let result = generate(&reference_config());
        let summary = summarize(&result);
        assert_eq!(summary.title, "Einfamilienhaus – Neubau");

        let named = generate(&HouseConfig {
            project_name: "Haus Muster".into(),
            ..reference_config()
        });
        assert_eq!(summarize(&named).title, "Haus Muster");
    }
}
