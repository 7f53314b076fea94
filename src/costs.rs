//! Construction cost breakdown and ancillary costs
//!
//! The structural cost is a percentage split of (living area × finish-tier
//! rate) across ten trade buckets, BKI-style, plus flat surcharges for the
//! selected technical options. Ancillary costs are flat figures or
//! max(floor, percentage × structural total). All business constants live
//! here, separate from the traversal code.

use crate::materials::solar_panel_count;
use crate::models::{AncillaryCost, CostBreakdown, HouseConfig};

// Percentage shares of (area × tier rate), per trade bucket
const SHELL_SHARE: f64 = 0.28;
const SHELL_SHARE_BASEMENT: f64 = 0.32;
const ROOF_SHARE: f64 = 0.08;
const OPENINGS_SHARE: f64 = 0.07;
const ELECTRICAL_SHARE: f64 = 0.10;
const PLUMBING_SHARE: f64 = 0.08;
const HEATING_SHARE: f64 = 0.08;
const DRYWALL_SHARE: f64 = 0.05;
const SCREED_SHARE: f64 = 0.04;
const PAINTING_SHARE: f64 = 0.05;
const SITE_WORKS_SHARE: f64 = 0.04;

// Flat surcharges for technical options
const HEAT_PUMP_SURCHARGE: f64 = 6000.0;
const GARAGE_SURCHARGE: f64 = 8500.0;
const SOLAR_PANEL_PRICE: f64 = 280.0;
const SOLAR_INVERTER_PRICE: f64 = 3500.0;
const SMART_HOME_SURCHARGE: (f64, f64, f64) = (4000.0, 4000.0, 8000.0);

/// Split the per-area construction cost into trade buckets and apply the
/// option surcharges.
pub fn compute_costs(config: &HouseConfig) -> CostBreakdown {
    let base = config.floor_area * config.finish_tier.rate_per_sqm();

    let mut k = CostBreakdown {
        shell: base
            * if config.basement {
                SHELL_SHARE_BASEMENT
            } else {
                SHELL_SHARE
            },
        roof: base * ROOF_SHARE,
        openings: base * OPENINGS_SHARE,
        electrical: base * ELECTRICAL_SHARE,
        plumbing: base * PLUMBING_SHARE,
        heating: base * HEATING_SHARE,
        drywall: base * DRYWALL_SHARE,
        screed: base * SCREED_SHARE,
        painting: base * PAINTING_SHARE,
        site_works: base * SITE_WORKS_SHARE,
    };

    if config.heat_pump {
        k.heating += HEAT_PUMP_SURCHARGE;
    }
    if config.solar {
        k.electrical +=
            solar_panel_count(config) as f64 * SOLAR_PANEL_PRICE + SOLAR_INVERTER_PRICE;
    }
    if config.smart_home {
        k.electrical += config.finish_tier.pick(SMART_HOME_SURCHARGE);
    }
    if config.garage {
        k.site_works += GARAGE_SURCHARGE;
    }

    k
}

/// Fixed list of ancillary cost items (fees, permits, surveys, insurance),
/// each flat or max(floor, percentage × structural total). Order-preserving.
pub fn compute_ancillary(structural_total: f64) -> Vec<AncillaryCost> {
    let bk = structural_total;
    vec![
        AncillaryCost {
            description: "Architektenhonorar (HOAI)".into(),
            amount: bk * 0.10,
            detail: "Leistungsphasen 1-9 nach HOAI".into(),
        },
        AncillaryCost {
            description: "Statiker / Tragwerksplaner".into(),
            amount: (bk * 0.015).max(4000.0),
            detail: "Standsicherheitsnachweis + Positionsplaene".into(),
        },
        AncillaryCost {
            description: "Baugenehmigung".into(),
            amount: (bk * 0.005).max(500.0),
            detail: "Gebuehren Bauamt / Bauaufsicht".into(),
        },
        AncillaryCost {
            description: "Vermessung".into(),
            amount: 2800.0,
            detail: "Lageplan + Einmessung + Gebaeudeschlussvermessung".into(),
        },
        AncillaryCost {
            description: "Baugrundgutachten".into(),
            amount: 2000.0,
            detail: "Bodengutachten mit Bohrungen".into(),
        },
        AncillaryCost {
            description: "Energieberater / EnEV-Nachweis".into(),
            amount: 2500.0,
            detail: "GEG-Nachweis + Blower-Door-Test".into(),
        },
        AncillaryCost {
            description: "Pruefstatiker".into(),
            amount: (bk * 0.005).max(1500.0),
            detail: "Pruefingenieur fuer Standsicherheit".into(),
        },
        AncillaryCost {
            description: "Baustrom / Bauwasser".into(),
            amount: 800.0,
            detail: "Anschluss + Verbrauch waehrend Bauphase".into(),
        },
        AncillaryCost {
            description: "Versicherungen".into(),
            amount: 1800.0,
            detail: "Bauherrenhaftpflicht + Bauleistungsversicherung + Feuerrohbau".into(),
        },
        AncillaryCost {
            description: "Erschliessung".into(),
            amount: 8000.0,
            detail: "Kanal, Wasser, Strom, Gas/Fernwaerme, Telekom".into(),
        },
        AncillaryCost {
            description: "Aussen- und Gartenanlage".into(),
            amount: (bk * 0.03).max(5000.0),
            detail: "Zufahrt, Terrasse, Bepflanzung".into(),
        },
    ]
}
