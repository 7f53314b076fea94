//! Quantity takeoff ("Massenermittlung")
//!
//! Derives measured quantities per trade from a house configuration using
//! geometric approximations and heuristic multipliers. Pure and total: any
//! validated configuration produces a full list.

use crate::models::{HouseConfig, MassPosition, QuantityKind, Trade, Unit};

/// Story height assumed for all above-ground levels, in meters
const STORY_HEIGHT: f64 = 2.75;

/// German level name: EG, OG, 2.OG, ...
fn level_name(level: u32) -> String {
    match level {
        1 => "EG".to_string(),
        2 => "OG".to_string(),
        3 => "2.OG".to_string(),
        n => format!("{}.OG", n - 1),
    }
}

/// Derive the ordered quantity list for a configuration.
///
/// The footprint is treated as a square (perimeter = 4·√area); downstream
/// material factors and tests are calibrated to that simplification.
pub fn estimate_quantities(config: &HouseConfig) -> Vec<MassPosition> {
    let mut massen: Vec<MassPosition> = Vec::new();
    let footprint = config.area_per_level();
    let perimeter = footprint.sqrt() * 4.0;

    // Foundation: basement (excavation, slab, walls) or a simple slab
    if config.basement {
        massen.push(MassPosition {
            kind: QuantityKind::BasementExcavation,
            description: "Kellerwand-Aushub".into(),
            quantity: footprint * 3.0, // ~3m dig depth
            unit: Unit::CubicMeter,
            trade: Trade::Earthworks,
            detail: "Baugrubenaushub fuer Keller".into(),
        });
        massen.push(MassPosition {
            kind: QuantityKind::BasementSlab,
            description: "Kellerboden (Bodenplatte)".into(),
            quantity: footprint * 0.25,
            unit: Unit::CubicMeter,
            trade: Trade::Shell,
            detail: "Stahlbeton C25/30, d=25cm".into(),
        });
        massen.push(MassPosition {
            kind: QuantityKind::BasementWalls,
            description: "Kellerwaende".into(),
            quantity: perimeter * 2.5 * 0.24,
            unit: Unit::CubicMeter,
            trade: Trade::Shell,
            detail: "WU-Beton oder KS-Mauerwerk, h=2,50m".into(),
        });
    } else {
        massen.push(MassPosition {
            kind: QuantityKind::GroundSlab,
            description: "Bodenplatte".into(),
            quantity: footprint * 0.20,
            unit: Unit::CubicMeter,
            trade: Trade::Shell,
            detail: "Stahlbeton C25/30, d=20cm auf Sauberkeitsschicht".into(),
        });
    }

    // Exterior walls, one line per level
    for level in 1..=config.floors {
        massen.push(MassPosition {
            kind: QuantityKind::ExteriorWalls,
            description: format!("Aussenwaende {}", level_name(level)),
            quantity: perimeter * STORY_HEIGHT,
            unit: Unit::SquareMeter,
            trade: Trade::Shell,
            detail: "Mauerwerk 36,5cm (Poroton / KS mit WDVS)".into(),
        });
    }

    // Interior walls, a single aggregate line (~60% of exterior wall area)
    let interior_wall_area = perimeter * STORY_HEIGHT * 0.6 * config.floors as f64;
    massen.push(MassPosition {
        kind: QuantityKind::InteriorWalls,
        description: "Innenwaende (gesamt)".into(),
        quantity: interior_wall_area,
        unit: Unit::SquareMeter,
        trade: Trade::Shell,
        detail: "KS 11,5cm / Poroton 17,5cm".into(),
    });

    // Intermediate floor slabs, one per level boundary
    for level in 1..config.floors {
        massen.push(MassPosition {
            kind: QuantityKind::FloorSlab,
            description: format!("Geschossdecke ueber {}", level_name(level)),
            quantity: footprint,
            unit: Unit::SquareMeter,
            trade: Trade::Shell,
            detail: "Stahlbetondecke d=20cm".into(),
        });
    }

    // Roof
    let roof_area = footprint * config.roof_shape.area_factor();
    massen.push(MassPosition {
        kind: QuantityKind::RoofArea,
        description: format!("Dachflaeche ({})", config.roof_shape.label()),
        quantity: roof_area,
        unit: Unit::SquareMeter,
        trade: Trade::Roof,
        detail: "inkl. Dachstuhl, Eindeckung, Daemmung".into(),
    });

    // Windows (~1 per 8m² living area, at least 6)
    let window_count = ((config.floor_area / 8.0) as u32).max(6);
    massen.push(MassPosition {
        kind: QuantityKind::Windows,
        description: "Fenster".into(),
        quantity: window_count as f64,
        unit: Unit::Piece,
        trade: Trade::Openings,
        detail: "3-fach Verglasung, Kunststoff/Alu".into(),
    });

    // Doors
    let door_count = config.rooms + config.baths + config.guest_wcs + 2;
    massen.push(MassPosition {
        kind: QuantityKind::InteriorDoors,
        description: "Innentueren".into(),
        quantity: door_count as f64,
        unit: Unit::Piece,
        trade: Trade::Openings,
        detail: String::new(),
    });
    massen.push(MassPosition {
        kind: QuantityKind::EntryDoor,
        description: "Haustuer".into(),
        quantity: 1.0,
        unit: Unit::Piece,
        trade: Trade::Openings,
        detail: "Sicherheitstuer RC2".into(),
    });

    // Electrical
    let outlets = config.rooms * 6 + config.baths * 3 + if config.kitchen { 12 } else { 0 } + 10;
    massen.push(MassPosition {
        kind: QuantityKind::Outlets,
        description: "Steckdosen".into(),
        quantity: outlets as f64,
        unit: Unit::Piece,
        trade: Trade::Electrical,
        detail: String::new(),
    });
    massen.push(MassPosition {
        kind: QuantityKind::Switches,
        description: "Lichtschalter".into(),
        quantity: (config.rooms + config.baths + config.guest_wcs + 4) as f64,
        unit: Unit::Piece,
        trade: Trade::Electrical,
        detail: String::new(),
    });
    massen.push(MassPosition {
        kind: QuantityKind::ElectricalCable,
        description: "Elektro-Kabel (NYM)".into(),
        quantity: config.floor_area * 3.5,
        unit: Unit::LinearMeter,
        trade: Trade::Electrical,
        detail: "NYM-J 3x1,5 + 5x2,5".into(),
    });

    // Plumbing
    massen.push(MassPosition {
        kind: QuantityKind::Basins,
        description: "Waschtische".into(),
        quantity: (config.baths + config.guest_wcs) as f64,
        unit: Unit::Piece,
        trade: Trade::Plumbing,
        detail: String::new(),
    });
    massen.push(MassPosition {
        kind: QuantityKind::WcUnits,
        description: "WC-Anlagen".into(),
        quantity: (config.baths + config.guest_wcs) as f64,
        unit: Unit::Piece,
        trade: Trade::Plumbing,
        detail: String::new(),
    });
    massen.push(MassPosition {
        kind: QuantityKind::BathUnits,
        description: "Badewanne / Dusche".into(),
        quantity: config.baths as f64,
        unit: Unit::Piece,
        trade: Trade::Plumbing,
        detail: String::new(),
    });
    massen.push(MassPosition {
        kind: QuantityKind::DrainPipes,
        description: "Abwasserleitungen (HT-Rohr)".into(),
        quantity: config.floor_area * 0.8,
        unit: Unit::LinearMeter,
        trade: Trade::Plumbing,
        detail: "DN50 + DN100".into(),
    });
    massen.push(MassPosition {
        kind: QuantityKind::SupplyPipes,
        description: "Trinkwasserleitungen".into(),
        quantity: config.floor_area * 0.6,
        unit: Unit::LinearMeter,
        trade: Trade::Plumbing,
        detail: "Kupfer 15x1 / 22x1".into(),
    });

    // Screed
    massen.push(MassPosition {
        kind: QuantityKind::ScreedArea,
        description: "Estrich".into(),
        quantity: config.floor_area,
        unit: Unit::SquareMeter,
        trade: Trade::Screed,
        detail: if config.underfloor_heating {
            "Heizestrich CT-C25-F5, d=65mm".into()
        } else {
            "Zementestrich CT-C25-F4, d=45mm".into()
        },
    });

    // Drywall (suspended ceilings / stud walls, flat coefficient)
    let drywall_area = config.floor_area * 0.3;
    if drywall_area > 0.0 {
        massen.push(MassPosition {
            kind: QuantityKind::DrywallArea,
            description: "Trockenbau (Abhaengdecken / Vorsatzschalen)".into(),
            quantity: drywall_area,
            unit: Unit::SquareMeter,
            trade: Trade::Drywall,
            detail: String::new(),
        });
    }

    // Plaster / paint: exterior wall faces plus both faces of interior walls
    let paint_area = (perimeter * STORY_HEIGHT + interior_wall_area / config.floors as f64 * 2.0)
        * config.floors as f64;
    massen.push(MassPosition {
        kind: QuantityKind::PaintPlasterArea,
        description: "Innenputz / Malerarbeiten".into(),
        quantity: paint_area,
        unit: Unit::SquareMeter,
        trade: Trade::Painting,
        detail: "Kalkzementputz + 2x Dispersionsfarbe".into(),
    });

    // Underfloor heating
    if config.underfloor_heating {
        massen.push(MassPosition {
            kind: QuantityKind::HeatedFloorArea,
            description: "Fussbodenheizung".into(),
            quantity: config.floor_area * 0.85,
            unit: Unit::SquareMeter,
            trade: Trade::Heating,
            detail: "Verlegeabstand 15cm, Noppenplatte".into(),
        });
    }

    // Garage
    if config.garage {
        massen.push(MassPosition {
            kind: QuantityKind::PrefabGarage,
            description: "Garage (Fertiggarage)".into(),
            quantity: 1.0,
            unit: Unit::Piece,
            trade: Trade::SiteWorks,
            detail: "Betonfertiggarage ca. 6x3m".into(),
        });
    }

    massen
}

/// Sum of all quantities with the given kind
pub fn total_of(massen: &[MassPosition], kind: QuantityKind) -> f64 {
    massen
        .iter()
        .filter(|m| m.kind == kind)
        .map(|m| m.quantity)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoofShape;

    /// Scenario: 140m², 2 floors, basement, gable roof, 2 baths, 1 guest WC,
    /// 5 rooms, kitchen, no garage, all tech off, standard finish
    fn reference_config() -> HouseConfig {
        HouseConfig {
            floor_area: 140.0,
            floors: 2,
            basement: true,
            roof_shape: RoofShape::Gable,
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
    fn reference_config_yields_expected_position_count() {
        let massen = estimate_quantities(&reference_config());
        assert_eq!(massen.len(), 22);
        assert!((15..=25).contains(&massen.len()));
    }

    #[test]
    fn basement_produces_excavation_and_basement_walls() {
        let massen = estimate_quantities(&reference_config());
        assert!(massen.iter().any(|m| m.kind == QuantityKind::BasementExcavation));
        assert!(massen.iter().any(|m| m.description == "Kellerwaende"));
        assert!(!massen.iter().any(|m| m.kind == QuantityKind::GroundSlab));
    }

    #[test]
    fn no_basement_produces_ground_slab_only() {
        let config = HouseConfig {
            basement: false,
            ..reference_config()
        };
        let massen = estimate_quantities(&config);
        assert!(massen.iter().any(|m| m.kind == QuantityKind::GroundSlab));
        assert!(!massen.iter().any(|m| m.kind == QuantityKind::BasementExcavation));
        assert!(!massen.iter().any(|m| m.kind == QuantityKind::BasementWalls));
    }

    #[test]
    fn single_floor_has_no_intermediate_slabs() {
        let config = HouseConfig {
            floors: 1,
            ..reference_config()
        };
        let massen = estimate_quantities(&config);
        assert_eq!(massen.iter().filter(|m| m.kind == QuantityKind::FloorSlab).count(), 0);
    }

    #[test]
    fn two_floors_have_one_intermediate_slab_and_two_wall_lines() {
        let massen = estimate_quantities(&reference_config());
        assert_eq!(massen.iter().filter(|m| m.kind == QuantityKind::FloorSlab).count(), 1);
        let walls: Vec<_> = massen
            .iter()
            .filter(|m| m.kind == QuantityKind::ExteriorWalls)
            .collect();
        assert_eq!(walls.len(), 2);
        assert_eq!(walls[0].description, "Aussenwaende EG");
        assert_eq!(walls[1].description, "Aussenwaende OG");
    }

    #[test]
    fn window_count_has_floor_of_six() {
        let config = HouseConfig {
            floor_area: 30.0,
            floors: 1,
            ..reference_config()
        };
        let massen = estimate_quantities(&config);
        assert_eq!(total_of(&massen, QuantityKind::Windows), 6.0);
    }

    #[test]
    fn electrical_counts_follow_room_program() {
        let massen = estimate_quantities(&reference_config());
        // 5 rooms * 6 + 2 baths * 3 + kitchen 12 + 10
        assert_eq!(total_of(&massen, QuantityKind::Outlets), 58.0);
        // 5 + 2 + 1 + 4
        assert_eq!(total_of(&massen, QuantityKind::Switches), 12.0);
        assert_eq!(total_of(&massen, QuantityKind::ElectricalCable), 140.0 * 3.5);
    }

    #[test]
    fn roof_area_uses_shape_factor() {
        let config = reference_config();
        let massen = estimate_quantities(&config);
        let footprint = config.area_per_level();
        assert_eq!(total_of(&massen, QuantityKind::RoofArea), footprint * 1.4);

        let flat = HouseConfig {
            roof_shape: RoofShape::Flat,
            ..reference_config()
        };
        let massen = estimate_quantities(&flat);
        assert_eq!(total_of(&massen, QuantityKind::RoofArea), footprint * 1.05);
    }

    #[test]
    fn garage_adds_exactly_one_prefab_unit() {
        let config = HouseConfig {
            garage: true,
            ..reference_config()
        };
        let massen = estimate_quantities(&config);
        let garage: Vec<_> = massen
            .iter()
            .filter(|m| m.kind == QuantityKind::PrefabGarage)
            .collect();
        assert_eq!(garage.len(), 1);
        assert_eq!(garage[0].quantity, 1.0);
        assert_eq!(garage[0].trade, Trade::SiteWorks);
    }

    #[test]
    fn underfloor_heating_adds_heated_area_line() {
        let config = HouseConfig {
            underfloor_heating: true,
            ..reference_config()
        };
        let massen = estimate_quantities(&config);
        assert_eq!(total_of(&massen, QuantityKind::HeatedFloorArea), 140.0 * 0.85);

        let massen = estimate_quantities(&reference_config());
        assert_eq!(total_of(&massen, QuantityKind::HeatedFloorArea), 0.0);
    }

    #[test]
    fn estimation_is_deterministic() {
        let config = reference_config();
        assert_eq!(estimate_quantities(&config), estimate_quantities(&config));
    }

    #[test]
    fn all_quantities_are_non_negative() {
        for basement in [false, true] {
            for floors in [1, 2, 3] {
                let config = HouseConfig {
                    basement,
                    floors,
                    ..reference_config()
                };
                for m in estimate_quantities(&config) {
                    assert!(m.quantity >= 0.0, "{} is negative", m.description);
                }
            }
        }
    }

    #[test]
    fn doubling_area_increases_footprint_quantities() {
        let small = reference_config();
        let large = HouseConfig {
            floor_area: 280.0,
            ..reference_config()
        };
        let a = estimate_quantities(&small);
        let b = estimate_quantities(&large);
        for kind in [
            QuantityKind::BasementSlab,
            QuantityKind::BasementWalls,
            QuantityKind::ExteriorWalls,
            QuantityKind::RoofArea,
        ] {
            assert!(
                total_of(&b, kind) > total_of(&a, kind),
                "{:?} did not grow with the floor area",
                kind
            );
        }
    }

    #[test]
    fn degenerate_tiny_house_still_produces_a_full_list() {
        let config = HouseConfig {
            floor_area: 0.5,
            floors: 1,
            basement: false,
            baths: 0,
            guest_wcs: 0,
            rooms: 0,
            kitchen: false,
            ..reference_config()
        };
        let massen = estimate_quantities(&config);
        assert!(massen.len() >= 15);
        assert!(massen.iter().all(|m| m.quantity >= 0.0));
    }
}
