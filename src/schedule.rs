//! Construction schedule
//!
//! A fixed heuristic timeline, not a solver. Phases are declared as a table
//! of specs (duration, start offset, cursor advance) and laid out by a
//! single pass that threads the week cursor as a value. Several phases share
//! a start week on purpose: windows, electrical and plumbing rough-in run
//! concurrently after the roof, tiling overlaps flooring, and the finish
//! trades overlap the final paint.

use crate::models::{ConstructionPhase, HouseConfig, Trade};

/// One row of the phase table
struct PhaseSpec {
    name: &'static str,
    trade: Trade,
    duration: u32,
    /// Start at cursor + offset
    start_offset: u32,
    /// Cursor advance applied after placing this phase, measured from the
    /// current cursor. `None` leaves the cursor where it is (parallel phase).
    advance: Option<u32>,
    description: &'static str,
}

fn phase_specs(config: &HouseConfig) -> Vec<PhaseSpec> {
    let mut specs = Vec::new();

    if config.basement {
        specs.push(PhaseSpec {
            name: "Erdarbeiten + Keller",
            trade: Trade::Shell,
            duration: 4,
            start_offset: 0,
            advance: Some(4),
            description: "Aushub, Bodenplatte, Kellerwaende, Abdichtung",
        });
    } else {
        specs.push(PhaseSpec {
            name: "Erdarbeiten + Bodenplatte",
            trade: Trade::Shell,
            duration: 2,
            start_offset: 0,
            advance: Some(2),
            description: "Aushub, Sauberkeitsschicht, Bodenplatte",
        });
    }

    let shell_weeks = config.floors * 3 + 1;
    specs.push(PhaseSpec {
        name: "Rohbau (Mauerwerk + Decken)",
        trade: Trade::Shell,
        duration: shell_weeks,
        start_offset: 0,
        advance: Some(shell_weeks),
        description: "Mauern, Betonieren, Ringbalken, Stuerze",
    });

    let roof_weeks = if config.roof_shape == crate::models::RoofShape::Flat {
        2
    } else {
        3
    };
    specs.push(PhaseSpec {
        name: "Dachstuhl + Eindeckung",
        trade: Trade::Roof,
        duration: roof_weeks,
        start_offset: 0,
        advance: Some(roof_weeks),
        description: "Dachstuhl aufstellen, Lattung, Eindeckung, Daemmung",
    });

    // Windows and both rough-ins start together once the roof is tight
    specs.push(PhaseSpec {
        name: "Fenster + Haustuer",
        trade: Trade::Openings,
        duration: 2,
        start_offset: 0,
        advance: None,
        description: "Fenstereinbau, Abdichtung, Haustuer",
    });
    specs.push(PhaseSpec {
        name: "Elektro Rohinstallation",
        trade: Trade::Electrical,
        duration: 3,
        start_offset: 0,
        advance: None,
        description: "Schlitze, Leerrohre, Kabel, Dosen, Verteiler",
    });
    specs.push(PhaseSpec {
        name: "Sanitaer Rohinstallation",
        trade: Trade::Plumbing,
        duration: 3,
        start_offset: 0,
        advance: None,
        description: "Abwasser, Trinkwasser, Druckpruefung",
    });
    // Heating trails the rough-ins by a week; the cursor then jumps past
    // the whole parallel block
    specs.push(PhaseSpec {
        name: "Heizungsinstallation",
        trade: Trade::Heating,
        duration: 2,
        start_offset: 1,
        advance: Some(3),
        description: if config.underfloor_heating {
            "Fussbodenheizung verlegen, Heizkreisverteiler"
        } else {
            "Heizkoerper montieren, Rohrleitungen"
        },
    });

    specs.push(PhaseSpec {
        name: "Innenputz",
        trade: Trade::Painting,
        duration: 2,
        start_offset: 0,
        advance: Some(2),
        description: "Kalkzement-Maschinenputz alle Raeume",
    });

    let screed_weeks = if config.underfloor_heating { 5 } else { 4 };
    specs.push(PhaseSpec {
        name: "Estrich + Trocknungszeit",
        trade: Trade::Screed,
        duration: screed_weeks,
        start_offset: 0,
        advance: Some(screed_weeks),
        description: if config.underfloor_heating {
            "Heizestrich einbringen, 4 Wochen Trocknung, Aufheizprotokoll"
        } else {
            "Zementestrich einbringen, 3-4 Wochen Trocknung"
        },
    });

    specs.push(PhaseSpec {
        name: "Trockenbau",
        trade: Trade::Drywall,
        duration: 2,
        start_offset: 0,
        advance: Some(2),
        description: "Vorsatzschalen, Abhaengdecken, Spachteln",
    });

    // Tiling overlaps the other floor coverings
    specs.push(PhaseSpec {
        name: "Fliesen (Baeder + Kueche)",
        trade: Trade::Fitout,
        duration: 2,
        start_offset: 0,
        advance: None,
        description: "Abdichtung, Fliesen Wand + Boden",
    });
    specs.push(PhaseSpec {
        name: "Bodenbelaege (Parkett / Laminat)",
        trade: Trade::Fitout,
        duration: 2,
        start_offset: 0,
        advance: Some(2),
        description: "Trittschalldaemmung, Bodenbelag verlegen",
    });

    specs.push(PhaseSpec {
        name: "Innentueren",
        trade: Trade::Openings,
        duration: 1,
        start_offset: 0,
        advance: Some(1),
        description: "Zargen + Tuerblaetter montieren",
    });

    // Final paint and the fine installs share a start week
    specs.push(PhaseSpec {
        name: "Malerarbeiten (Finish)",
        trade: Trade::Painting,
        duration: 2,
        start_offset: 0,
        advance: None,
        description: "Spachteln, Schleifen, 2x Anstrich",
    });
    specs.push(PhaseSpec {
        name: "Sanitaer Feininstallation",
        trade: Trade::Plumbing,
        duration: 2,
        start_offset: 0,
        advance: None,
        description: "Waschtische, WCs, Armaturen montieren",
    });
    specs.push(PhaseSpec {
        name: "Elektro Feininstallation",
        trade: Trade::Electrical,
        duration: 2,
        start_offset: 0,
        advance: Some(2),
        description: "Steckdosen, Schalter, Leuchten, Abnahme",
    });

    specs.push(PhaseSpec {
        name: "Aussenanlagen",
        trade: Trade::SiteWorks,
        duration: 2,
        start_offset: 0,
        advance: None,
        description: "Zufahrt, Terrasse, Gartenanlage",
    });

    if config.solar {
        specs.push(PhaseSpec {
            name: "Photovoltaik-Anlage",
            trade: Trade::Electrical,
            duration: 1,
            start_offset: 0,
            advance: None,
            description: "PV-Module + Wechselrichter montieren",
        });
    }

    specs.push(PhaseSpec {
        name: "Endreinigung + Abnahme",
        trade: Trade::General,
        duration: 1,
        start_offset: 2,
        advance: None,
        description: "Baureinigung, Maengelprotokoll, Abnahme",
    });

    specs
}

/// Lay the phase table out on the week axis.
pub fn build_schedule(config: &HouseConfig) -> Vec<ConstructionPhase> {
    let specs = phase_specs(config);
    let mut phases = Vec::with_capacity(specs.len());
    let mut cursor: u32 = 0;

    for spec in specs {
        phases.push(ConstructionPhase {
            name: spec.name.to_string(),
            trade: spec.trade,
            duration_weeks: spec.duration,
            start_week: cursor + spec.start_offset,
            description: spec.description.to_string(),
        });
        if let Some(advance) = spec.advance {
            cursor += advance;
        }
    }

    phases
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoofShape;

    fn reference_config() -> HouseConfig {
        HouseConfig {
            floor_area: 140.0,
            floors: 2,
            basement: true,
            roof_shape: RoofShape::Gable,
            underfloor_heating: false,
            solar: false,
            ..HouseConfig::default()
        }
    }

    fn phase<'a>(phases: &'a [ConstructionPhase], name: &str) -> &'a ConstructionPhase {
        phases
            .iter()
            .find(|p| p.name == name)
            .unwrap_or_else(|| panic!("missing phase: {}", name))
    }

    #[test]
    fn basement_project_starts_with_four_week_excavation() {
        let phases = build_schedule(&reference_config());
        assert_eq!(phases[0].name, "Erdarbeiten + Keller");
        assert_eq!(phases[0].start_week, 0);
        assert_eq!(phases[0].duration_weeks, 4);
    }

    #[test]
    fn slab_only_project_starts_with_two_week_excavation() {
        let phases = build_schedule(&HouseConfig {
            basement: false,
            ..reference_config()
        });
        assert_eq!(phases[0].name, "Erdarbeiten + Bodenplatte");
        assert_eq!(phases[0].duration_weeks, 2);
    }

    #[test]
    fn reference_timeline_matches_week_by_week() {
        let phases = build_schedule(&reference_config());
        let expect: &[(&str, u32, u32)] = &[
            ("Erdarbeiten + Keller", 0, 4),
            ("Rohbau (Mauerwerk + Decken)", 4, 7),
            ("Dachstuhl + Eindeckung", 11, 3),
            ("Fenster + Haustuer", 14, 2),
            ("Elektro Rohinstallation", 14, 3),
            ("Sanitaer Rohinstallation", 14, 3),
            ("Heizungsinstallation", 15, 2),
            ("Innenputz", 17, 2),
            ("Estrich + Trocknungszeit", 19, 4),
            ("Trockenbau", 23, 2),
            ("Fliesen (Baeder + Kueche)", 25, 2),
            ("Bodenbelaege (Parkett / Laminat)", 25, 2),
            ("Innentueren", 27, 1),
            ("Malerarbeiten (Finish)", 28, 2),
            ("Sanitaer Feininstallation", 28, 2),
            ("Elektro Feininstallation", 28, 2),
            ("Aussenanlagen", 30, 2),
            ("Endreinigung + Abnahme", 32, 1),
        ];
        assert_eq!(phases.len(), expect.len());
        for (phase, &(name, start, duration)) in phases.iter().zip(expect) {
            assert_eq!(phase.name, name);
            assert_eq!(phase.start_week, start, "start of {}", name);
            assert_eq!(phase.duration_weeks, duration, "duration of {}", name);
        }
    }

    #[test]
    fn shell_duration_scales_with_floor_count() {
        let phases = build_schedule(&HouseConfig {
            floors: 3,
            ..reference_config()
        });
        assert_eq!(phase(&phases, "Rohbau (Mauerwerk + Decken)").duration_weeks, 10);
    }

    #[test]
    fn flat_roof_takes_two_weeks() {
        let phases = build_schedule(&HouseConfig {
            roof_shape: RoofShape::Flat,
            ..reference_config()
        });
        assert_eq!(phase(&phases, "Dachstuhl + Eindeckung").duration_weeks, 2);
    }

    #[test]
    fn rough_ins_run_in_parallel_after_the_roof() {
        let phases = build_schedule(&reference_config());
        let windows = phase(&phases, "Fenster + Haustuer");
        let electrical = phase(&phases, "Elektro Rohinstallation");
        let plumbing = phase(&phases, "Sanitaer Rohinstallation");
        let heating = phase(&phases, "Heizungsinstallation");
        assert_eq!(windows.start_week, electrical.start_week);
        assert_eq!(electrical.start_week, plumbing.start_week);
        assert_eq!(heating.start_week, electrical.start_week + 1);
    }

    #[test]
    fn heated_screed_needs_an_extra_cure_week() {
        let plain = build_schedule(&reference_config());
        let heated = build_schedule(&HouseConfig {
            underfloor_heating: true,
            ..reference_config()
        });
        assert_eq!(phase(&plain, "Estrich + Trocknungszeit").duration_weeks, 4);
        assert_eq!(phase(&heated, "Estrich + Trocknungszeit").duration_weeks, 5);
    }

    #[test]
    fn tiling_and_flooring_share_a_start_week() {
        let phases = build_schedule(&reference_config());
        assert_eq!(
            phase(&phases, "Fliesen (Baeder + Kueche)").start_week,
            phase(&phases, "Bodenbelaege (Parkett / Laminat)").start_week
        );
    }

    #[test]
    fn finish_trades_share_a_start_week() {
        let phases = build_schedule(&reference_config());
        let paint = phase(&phases, "Malerarbeiten (Finish)").start_week;
        assert_eq!(phase(&phases, "Sanitaer Feininstallation").start_week, paint);
        assert_eq!(phase(&phases, "Elektro Feininstallation").start_week, paint);
    }

    #[test]
    fn solar_install_shares_the_site_works_week() {
        let phases = build_schedule(&HouseConfig {
            solar: true,
            ..reference_config()
        });
        let solar = phase(&phases, "Photovoltaik-Anlage");
        assert_eq!(solar.start_week, phase(&phases, "Aussenanlagen").start_week);
        assert_eq!(solar.duration_weeks, 1);
    }

    #[test]
    fn cleaning_starts_two_weeks_after_site_works_begin() {
        let phases = build_schedule(&reference_config());
        let site = phase(&phases, "Aussenanlagen");
        let cleaning = phase(&phases, "Endreinigung + Abnahme");
        assert_eq!(cleaning.start_week, site.start_week + 2);
        assert_eq!(phases.last().unwrap().name, "Endreinigung + Abnahme");
    }

    #[test]
    fn advancing_phases_start_in_non_decreasing_order() {
        for (basement, ufh, solar) in
            [(true, false, false), (false, true, true), (true, true, false)]
        {
            let phases = build_schedule(&HouseConfig {
                basement,
                underfloor_heating: ufh,
                solar,
                ..reference_config()
            });
            let advancing = [
                "Rohbau (Mauerwerk + Decken)",
                "Dachstuhl + Eindeckung",
                "Innenputz",
                "Estrich + Trocknungszeit",
                "Trockenbau",
                "Aussenanlagen",
                "Endreinigung + Abnahme",
            ];
            let starts: Vec<u32> = advancing
                .iter()
                .map(|name| phase(&phases, name).start_week)
                .collect();
            assert!(starts.windows(2).all(|w| w[0] <= w[1]), "{:?}", starts);
        }
    }

    #[test]
    fn schedule_is_deterministic() {
        let config = reference_config();
        assert_eq!(build_schedule(&config), build_schedule(&config));
    }
}
