//! Material pricing
//!
//! Maps the quantity takeoff to priced material lines. Source quantities are
//! summed by `QuantityKind`; purchasable amounts are always rounded up to the
//! next whole unit so an order never falls short. Zero source quantities
//! simply produce no line.

use crate::models::{HouseConfig, MassPosition, MaterialPosition, QuantityKind, Trade, Unit};
use crate::quantities::total_of;

/// Reinforcing steel per m³ of concrete, in kg
const REBAR_KG_PER_M3: f64 = 80.0;

/// Price the quantity list for a configuration.
pub fn price_materials(config: &HouseConfig, massen: &[MassPosition]) -> Vec<MaterialPosition> {
    let mut mat: Vec<MaterialPosition> = Vec::new();
    let tier = config.finish_tier;

    // Concrete: basement slab + basement walls, or the ground slab
    let concrete = total_of(massen, QuantityKind::BasementSlab)
        + total_of(massen, QuantityKind::BasementWalls)
        + total_of(massen, QuantityKind::GroundSlab);
    if concrete > 0.0 {
        mat.push(MaterialPosition {
            title: "Transportbeton C25/30".into(),
            quantity: concrete.ceil(),
            unit: Unit::CubicMeter,
            unit_price: 95.0,
            trade: Trade::Shell,
            note: "inkl. Pumpe, Lieferung".into(),
        });
        mat.push(MaterialPosition {
            title: "Betonstahl BSt 500 S".into(),
            quantity: (concrete * REBAR_KG_PER_M3 / 1000.0).ceil(),
            unit: Unit::Tonne,
            unit_price: 950.0,
            trade: Trade::Shell,
            note: String::new(),
        });
    }

    // Exterior masonry
    let exterior_walls = total_of(massen, QuantityKind::ExteriorWalls);
    if exterior_walls > 0.0 {
        mat.push(MaterialPosition {
            title: "Poroton-Ziegel T8 (36,5cm)".into(),
            quantity: exterior_walls.ceil(),
            unit: Unit::SquareMeter,
            unit_price: 45.0,
            trade: Trade::Shell,
            note: "Planhochlochziegel mit Daemmfuellung".into(),
        });
        // Thin-bed mortar at 3 kg/m²
        mat.push(MaterialPosition {
            title: "Duennbettmoertel".into(),
            quantity: (exterior_walls * 3.0 / 1000.0).ceil(),
            unit: Unit::Tonne,
            unit_price: 280.0,
            trade: Trade::Shell,
            note: String::new(),
        });
    }

    // Interior masonry
    let interior_walls = total_of(massen, QuantityKind::InteriorWalls);
    if interior_walls > 0.0 {
        mat.push(MaterialPosition {
            title: "Kalksandstein KS 12-1.4 (11,5cm)".into(),
            quantity: interior_walls.ceil(),
            unit: Unit::SquareMeter,
            unit_price: 22.0,
            trade: Trade::Shell,
            note: String::new(),
        });
    }

    // Roof package
    let roof_area = total_of(massen, QuantityKind::RoofArea);
    if roof_area > 0.0 {
        mat.push(MaterialPosition {
            title: "Dachziegel (Tondachstein)".into(),
            quantity: roof_area.ceil(),
            unit: Unit::SquareMeter,
            unit_price: 35.0,
            trade: Trade::Roof,
            note: String::new(),
        });
        mat.push(MaterialPosition {
            title: "Dachlatten + Konterlattung".into(),
            quantity: (roof_area * 3.0).ceil(),
            unit: Unit::LinearMeter,
            unit_price: 2.5,
            trade: Trade::Roof,
            note: String::new(),
        });
        mat.push(MaterialPosition {
            title: "Zwischensparrendaemmung 200mm".into(),
            quantity: roof_area.ceil(),
            unit: Unit::SquareMeter,
            unit_price: 28.0,
            trade: Trade::Roof,
            note: String::new(),
        });
        // 10% extra for overlap
        mat.push(MaterialPosition {
            title: "Unterspannbahn (diffusionsoffen)".into(),
            quantity: (roof_area * 1.1).ceil(),
            unit: Unit::SquareMeter,
            unit_price: 3.5,
            trade: Trade::Roof,
            note: String::new(),
        });
    }

    // Windows and doors, unit price by finish tier
    let windows = total_of(massen, QuantityKind::Windows);
    if windows > 0.0 {
        mat.push(MaterialPosition {
            title: "Fenster 3-fach Verglasung".into(),
            quantity: windows,
            unit: Unit::Piece,
            unit_price: tier.pick((450.0, 600.0, 850.0)),
            trade: Trade::Openings,
            note: "Uw ≤ 0,95 W/(m²K)".into(),
        });
    }
    let interior_doors = total_of(massen, QuantityKind::InteriorDoors);
    if interior_doors > 0.0 {
        mat.push(MaterialPosition {
            title: "Zimmertuer (Roehrenspan)".into(),
            quantity: interior_doors,
            unit: Unit::Piece,
            unit_price: tier.pick((180.0, 280.0, 450.0)),
            trade: Trade::Openings,
            note: String::new(),
        });
    }
    mat.push(MaterialPosition {
        title: "Haustuer (RC2 Sicherheit)".into(),
        quantity: 1.0,
        unit: Unit::Piece,
        unit_price: tier.pick((1500.0, 2200.0, 3500.0)),
        trade: Trade::Openings,
        note: String::new(),
    });

    // Electrical: cable split 60/40 between the two gauges
    let cable = total_of(massen, QuantityKind::ElectricalCable);
    if cable > 0.0 {
        mat.push(MaterialPosition {
            title: "NYM-J 3x1,5mm²".into(),
            quantity: (cable * 0.6).ceil(),
            unit: Unit::LinearMeter,
            unit_price: 0.85,
            trade: Trade::Electrical,
            note: String::new(),
        });
        mat.push(MaterialPosition {
            title: "NYM-J 5x2,5mm²".into(),
            quantity: (cable * 0.4).ceil(),
            unit: Unit::LinearMeter,
            unit_price: 1.90,
            trade: Trade::Electrical,
            note: String::new(),
        });
    }
    let outlets = total_of(massen, QuantityKind::Outlets);
    if outlets > 0.0 {
        mat.push(MaterialPosition {
            title: "Schalterprogramm (Steckdosen + Schalter)".into(),
            quantity: outlets,
            unit: Unit::Piece,
            unit_price: tier.pick((8.0, 8.0, 18.0)),
            trade: Trade::Electrical,
            note: String::new(),
        });
        mat.push(MaterialPosition {
            title: "Leerrohr M20 flexibel".into(),
            quantity: (cable * 0.8).ceil(),
            unit: Unit::LinearMeter,
            unit_price: 0.65,
            trade: Trade::Electrical,
            note: String::new(),
        });
        // One distribution board per floor
        mat.push(MaterialPosition {
            title: "Unterputz-Verteilung (Sicherungskasten)".into(),
            quantity: config.floors as f64,
            unit: Unit::Piece,
            unit_price: tier.pick((250.0, 250.0, 450.0)),
            trade: Trade::Electrical,
            note: String::new(),
        });
    }

    // Plumbing fixtures
    let basins = total_of(massen, QuantityKind::Basins);
    if basins > 0.0 {
        mat.push(MaterialPosition {
            title: "Waschtisch inkl. Armatur".into(),
            quantity: basins,
            unit: Unit::Piece,
            unit_price: tier.pick((180.0, 350.0, 650.0)),
            trade: Trade::Plumbing,
            note: String::new(),
        });
    }
    let wc_units = total_of(massen, QuantityKind::WcUnits);
    if wc_units > 0.0 {
        mat.push(MaterialPosition {
            title: "WC-Anlage (Vorwand + Keramik)".into(),
            quantity: wc_units,
            unit: Unit::Piece,
            unit_price: tier.pick((280.0, 450.0, 800.0)),
            trade: Trade::Plumbing,
            note: String::new(),
        });
    }
    let bath_units = total_of(massen, QuantityKind::BathUnits);
    if bath_units > 0.0 {
        mat.push(MaterialPosition {
            title: "Dusche / Badewanne inkl. Armatur".into(),
            quantity: bath_units,
            unit: Unit::Piece,
            unit_price: tier.pick((400.0, 700.0, 1200.0)),
            trade: Trade::Plumbing,
            note: String::new(),
        });
    }
    let drains = total_of(massen, QuantityKind::DrainPipes);
    if drains > 0.0 {
        mat.push(MaterialPosition {
            title: "HT-Rohr DN50".into(),
            quantity: (drains * 0.6).ceil(),
            unit: Unit::LinearMeter,
            unit_price: 4.50,
            trade: Trade::Plumbing,
            note: String::new(),
        });
        mat.push(MaterialPosition {
            title: "HT-Rohr DN100".into(),
            quantity: (drains * 0.4).ceil(),
            unit: Unit::LinearMeter,
            unit_price: 7.80,
            trade: Trade::Plumbing,
            note: String::new(),
        });
    }
    let supply = total_of(massen, QuantityKind::SupplyPipes);
    if supply > 0.0 {
        mat.push(MaterialPosition {
            title: "Kupferrohr 15x1mm".into(),
            quantity: supply.ceil(),
            unit: Unit::LinearMeter,
            unit_price: 6.50,
            trade: Trade::Plumbing,
            note: String::new(),
        });
    }

    // Screed volume: 65mm heated screed, 45mm plain
    mat.push(MaterialPosition {
        title: if config.underfloor_heating {
            "Heizestrich CT-C25-F5".into()
        } else {
            "Zementestrich CT-C25-F4".into()
        },
        quantity: (config.floor_area * if config.underfloor_heating { 0.065 } else { 0.045 })
            .ceil(),
        unit: Unit::CubicMeter,
        unit_price: 95.0,
        trade: Trade::Screed,
        note: String::new(),
    });

    // Drywall package
    let drywall_area = total_of(massen, QuantityKind::DrywallArea);
    if drywall_area > 0.0 {
        // Two faces plus waste
        mat.push(MaterialPosition {
            title: "Gipskartonplatte GKB 12,5mm".into(),
            quantity: (drywall_area * 2.1).ceil(),
            unit: Unit::SquareMeter,
            unit_price: 5.50,
            trade: Trade::Drywall,
            note: String::new(),
        });
        // One stud every 62.5cm
        mat.push(MaterialPosition {
            title: "CW-Profil 75/50".into(),
            quantity: (drywall_area / 0.625).ceil(),
            unit: Unit::Piece,
            unit_price: 4.20,
            trade: Trade::Drywall,
            note: String::new(),
        });
        mat.push(MaterialPosition {
            title: "Mineralwolle 60mm WLG 035".into(),
            quantity: drywall_area.ceil(),
            unit: Unit::SquareMeter,
            unit_price: 8.50,
            trade: Trade::Drywall,
            note: String::new(),
        });
    }

    // Plaster and paint
    let paint_area = total_of(massen, QuantityKind::PaintPlasterArea);
    if paint_area > 0.0 {
        // 15mm plaster coat
        mat.push(MaterialPosition {
            title: "Kalkzement-Maschinenputz".into(),
            quantity: (paint_area * 0.015).ceil(),
            unit: Unit::Tonne,
            unit_price: 180.0,
            trade: Trade::Painting,
            note: String::new(),
        });
        // 6m² per litre, two coats
        mat.push(MaterialPosition {
            title: "Dispersionsfarbe (weiss)".into(),
            quantity: (paint_area / 6.0).ceil(),
            unit: Unit::Litre,
            unit_price: 4.50,
            trade: Trade::Painting,
            note: String::new(),
        });
    }

    // Heating
    if config.underfloor_heating {
        mat.push(MaterialPosition {
            title: "Fussbodenheizung Noppenplatte".into(),
            quantity: (config.floor_area * 0.85).ceil(),
            unit: Unit::SquareMeter,
            unit_price: 22.0,
            trade: Trade::Heating,
            note: String::new(),
        });
        // 15cm spacing plus 10% extra
        mat.push(MaterialPosition {
            title: "Heizrohr PE-Xa 17x2mm".into(),
            quantity: (config.floor_area * 0.85 / 0.15 * 1.1).ceil(),
            unit: Unit::LinearMeter,
            unit_price: 1.20,
            trade: Trade::Heating,
            note: String::new(),
        });
    }
    if config.heat_pump {
        mat.push(MaterialPosition {
            title: "Luft-Wasser-Waermepumpe".into(),
            quantity: 1.0,
            unit: Unit::Piece,
            unit_price: tier.pick((12000.0, 12000.0, 18000.0)),
            trade: Trade::Heating,
            note: "inkl. Pufferspeicher".into(),
        });
    } else {
        mat.push(MaterialPosition {
            title: "Gas-Brennwertkessel".into(),
            quantity: 1.0,
            unit: Unit::Piece,
            unit_price: tier.pick((4500.0, 4500.0, 6500.0)),
            trade: Trade::Heating,
            note: String::new(),
        });
    }

    // Solar package
    if config.solar {
        let panels = solar_panel_count(config);
        mat.push(MaterialPosition {
            title: "PV-Module (400Wp)".into(),
            quantity: panels as f64,
            unit: Unit::Piece,
            unit_price: 280.0,
            trade: Trade::Electrical,
            note: format!("{} kWp Anlage", panels * 400 / 1000),
        });
        mat.push(MaterialPosition {
            title: "Wechselrichter + Montagesystem".into(),
            quantity: 1.0,
            unit: Unit::Piece,
            unit_price: 3500.0,
            trade: Trade::Electrical,
            note: String::new(),
        });
    }

    // Smart home flat package
    if config.smart_home {
        mat.push(MaterialPosition {
            title: "SmartHome-Zentrale + Aktoren".into(),
            quantity: 1.0,
            unit: Unit::Flat,
            unit_price: tier.pick((4000.0, 4000.0, 8000.0)),
            trade: Trade::Electrical,
            note: "KNX / Loxone inkl. Programmierung".into(),
        });
    }

    // Garage
    if config.garage {
        mat.push(MaterialPosition {
            title: "Betonfertiggarage 6x3m".into(),
            quantity: 1.0,
            unit: Unit::Piece,
            unit_price: 8500.0,
            trade: Trade::SiteWorks,
            note: "inkl. Lieferung + Aufstellung".into(),
        });
    }

    mat
}

/// PV module count: one panel per 15m², at least 8
pub fn solar_panel_count(config: &HouseConfig) -> u32 {
    ((config.floor_area / 15.0) as u32).max(8)
}
