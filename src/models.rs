//! Data models for house configurations and the generated project data

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// House type being configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseType {
    SingleFamily,
    TwoFamily,
    SemiDetached,
    RowHouse,
}

impl HouseType {
    pub fn label(&self) -> &'static str {
        match self {
            HouseType::SingleFamily => "Einfamilienhaus",
            HouseType::TwoFamily => "Zweifamilienhaus",
            HouseType::SemiDetached => "Doppelhaushaelfte",
            HouseType::RowHouse => "Reihenhaus",
        }
    }
}

/// Roof shape, each with a footprint-to-roof-area factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoofShape {
    Gable,
    Hip,
    Flat,
    Pent,
}

impl RoofShape {
    pub fn label(&self) -> &'static str {
        match self {
            RoofShape::Gable => "Satteldach",
            RoofShape::Hip => "Walmdach",
            RoofShape::Flat => "Flachdach",
            RoofShape::Pent => "Pultdach",
        }
    }

    /// Roof area as a multiple of the footprint area
    pub fn area_factor(&self) -> f64 {
        match self {
            RoofShape::Gable => 1.4,
            RoofShape::Hip => 1.5,
            RoofShape::Flat => 1.05,
            RoofShape::Pent => 1.25,
        }
    }
}

/// Finish tier scaling per-area cost and unit prices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishTier {
    Basic,
    Standard,
    Premium,
}

impl FinishTier {
    pub fn label(&self) -> &'static str {
        match self {
            FinishTier::Basic => "Einfach",
            FinishTier::Standard => "Mittel",
            FinishTier::Premium => "Gehoben",
        }
    }

    /// Construction cost per m² of living area (net, excluding the plot)
    pub fn rate_per_sqm(&self) -> f64 {
        match self {
            FinishTier::Basic => 2000.0,
            FinishTier::Standard => 2500.0,
            FinishTier::Premium => 3200.0,
        }
    }

    /// Pick a unit price by tier: (basic, standard, premium)
    pub fn pick(&self, prices: (f64, f64, f64)) -> f64 {
        match self {
            FinishTier::Basic => prices.0,
            FinishTier::Standard => prices.1,
            FinishTier::Premium => prices.2,
        }
    }
}

/// Construction trade a position or phase belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trade {
    Earthworks,
    Shell,
    Roof,
    Openings,
    Electrical,
    Plumbing,
    Heating,
    Drywall,
    Screed,
    Painting,
    Fitout,
    SiteWorks,
    General,
}

impl Trade {
    pub const ALL: [Trade; 13] = [
        Trade::Earthworks,
        Trade::Shell,
        Trade::Roof,
        Trade::Openings,
        Trade::Electrical,
        Trade::Plumbing,
        Trade::Heating,
        Trade::Drywall,
        Trade::Screed,
        Trade::Painting,
        Trade::Fitout,
        Trade::SiteWorks,
        Trade::General,
    ];

    pub fn from_label(label: &str) -> Option<Trade> {
        Trade::ALL.into_iter().find(|t| t.label() == label)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trade::Earthworks => "Erdarbeiten",
            Trade::Shell => "Rohbau",
            Trade::Roof => "Dach",
            Trade::Openings => "Fenster & Tueren",
            Trade::Electrical => "Elektro",
            Trade::Plumbing => "Sanitaer",
            Trade::Heating => "Heizung",
            Trade::Drywall => "Trockenbau",
            Trade::Screed => "Estrich & Boden",
            Trade::Painting => "Malerarbeiten",
            Trade::Fitout => "Ausbau",
            Trade::SiteWorks => "Aussenanlagen",
            Trade::General => "Allgemein",
        }
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Measurement unit for quantities and material positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    SquareMeter,
    CubicMeter,
    Piece,
    LinearMeter,
    Tonne,
    Litre,
    Flat,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Unit::SquareMeter => "m²",
            Unit::CubicMeter => "m³",
            Unit::Piece => "Stk",
            Unit::LinearMeter => "lfm",
            Unit::Tonne => "t",
            Unit::Litre => "Liter",
            Unit::Flat => "Pauschal",
        };
        f.write_str(s)
    }
}

/// What a mass position measures. The pricer switches on this tag instead
/// of matching positions by description text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityKind {
    BasementExcavation,
    BasementSlab,
    BasementWalls,
    GroundSlab,
    ExteriorWalls,
    InteriorWalls,
    FloorSlab,
    RoofArea,
    Windows,
    InteriorDoors,
    EntryDoor,
    Outlets,
    Switches,
    ElectricalCable,
    Basins,
    WcUnits,
    BathUnits,
    DrainPipes,
    SupplyPipes,
    ScreedArea,
    DrywallArea,
    PaintPlasterArea,
    HeatedFloorArea,
    PrefabGarage,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Immutable input describing the house to be generated
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseConfig {
    #[serde(default = "new_id")]
    pub id: String,
    pub project_name: String,

    // Basic data
    pub house_type: HouseType,
    /// Living area in m²
    pub floor_area: f64,
    pub floors: u32,
    pub basement: bool,
    pub roof_shape: RoofShape,

    // Room program
    pub baths: u32,
    pub guest_wcs: u32,
    pub rooms: u32,
    pub kitchen: bool,
    pub garage: bool,

    // Technical options
    pub underfloor_heating: bool,
    pub solar: bool,
    pub heat_pump: bool,
    pub smart_home: bool,
    pub finish_tier: FinishTier,
}

impl Default for HouseConfig {
    fn default() -> Self {
        HouseConfig {
            id: new_id(),
            project_name: String::new(),
            house_type: HouseType::SingleFamily,
            floor_area: 140.0,
            floors: 2,
            basement: true,
            roof_shape: RoofShape::Gable,
            baths: 2,
            guest_wcs: 1,
            rooms: 5,
            kitchen: true,
            garage: false,
            underfloor_heating: true,
            solar: false,
            heat_pump: false,
            smart_home: false,
            finish_tier: FinishTier::Standard,
        }
    }
}

/// Validation errors for a house configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("floor area must be positive (got {0})")]
    NonPositiveArea(f64),
    #[error("floor count must be at least 1")]
    NoFloors,
}

impl HouseConfig {
    /// Check the invariants every downstream computation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.floor_area > 0.0) {
            return Err(ConfigError::NonPositiveArea(self.floor_area));
        }
        if self.floors < 1 {
            return Err(ConfigError::NoFloors);
        }
        Ok(())
    }

    /// Footprint area per level
    pub fn area_per_level(&self) -> f64 {
        if self.floors == 0 {
            return self.floor_area;
        }
        self.floor_area / self.floors as f64
    }

    /// Gross area including basement level and a standard ~30m² garage
    pub fn gross_area(&self) -> f64 {
        let mut total = self.floor_area;
        if self.basement {
            total += self.area_per_level();
        }
        if self.garage {
            total += 30.0;
        }
        total
    }
}

/// A measured quantity of work or material, before pricing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MassPosition {
    pub kind: QuantityKind,
    pub description: String,
    pub quantity: f64,
    pub unit: Unit,
    pub trade: Trade,
    pub detail: String,
}

/// A priced material line derived from one or more mass positions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialPosition {
    pub title: String,
    pub quantity: f64,
    pub unit: Unit,
    /// EUR per unit
    pub unit_price: f64,
    pub trade: Trade,
    pub note: String,
}

impl MaterialPosition {
    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// Construction cost split into ten trade buckets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostBreakdown {
    pub shell: f64,
    pub roof: f64,
    pub openings: f64,
    pub electrical: f64,
    pub plumbing: f64,
    pub heating: f64,
    pub drywall: f64,
    pub screed: f64,
    pub painting: f64,
    pub site_works: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.shell
            + self.roof
            + self.openings
            + self.electrical
            + self.plumbing
            + self.heating
            + self.drywall
            + self.screed
            + self.painting
            + self.site_works
    }

    /// Non-zero buckets with their display labels, in fixed order
    pub fn positions(&self) -> Vec<(&'static str, f64)> {
        [
            ("Rohbau", self.shell),
            ("Dach", self.roof),
            ("Fenster & Tueren", self.openings),
            ("Elektro", self.electrical),
            ("Sanitaer", self.plumbing),
            ("Heizung", self.heating),
            ("Trockenbau", self.drywall),
            ("Estrich & Boden", self.screed),
            ("Malerarbeiten", self.painting),
            ("Aussenanlagen", self.site_works),
        ]
        .into_iter()
        .filter(|&(_, amount)| amount > 0.0)
        .collect()
    }
}

/// A non-construction cost layered on top of the structural cost
#[derive(Debug, Clone, PartialEq)]
pub struct AncillaryCost {
    pub description: String,
    pub amount: f64,
    pub detail: String,
}

/// A scheduled block of work, possibly overlapping others
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstructionPhase {
    pub name: String,
    pub trade: Trade,
    pub duration_weeks: u32,
    /// Weeks from project start (week 0)
    pub start_week: u32,
    pub description: String,
}

impl ConstructionPhase {
    pub fn end_week(&self) -> u32 {
        self.start_week + self.duration_weeks
    }
}

/// One row of the derived procurement list
#[derive(Debug, Clone, PartialEq)]
pub struct ProcurementItem {
    pub title: String,
    pub quantity: f64,
    pub unit: Unit,
    pub trade: Trade,
    pub estimated_price: f64,
}

/// Everything the generator derives from one configuration
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub config: HouseConfig,
    pub mass_positions: Vec<MassPosition>,
    pub materials: Vec<MaterialPosition>,
    pub costs: CostBreakdown,
    pub ancillary: Vec<AncillaryCost>,
    pub phases: Vec<ConstructionPhase>,
}

impl GenerationResult {
    /// Shopping list with a computed line total per material
    pub fn procurement_list(&self) -> Vec<ProcurementItem> {
        self.materials
            .iter()
            .map(|mat| ProcurementItem {
                title: mat.title.clone(),
                quantity: mat.quantity,
                unit: mat.unit,
                trade: mat.trade,
                estimated_price: mat.line_total(),
            })
            .collect()
    }

    pub fn ancillary_total(&self) -> f64 {
        self.ancillary.iter().map(|nk| nk.amount).sum()
    }

    /// Structural cost plus all ancillary costs
    pub fn grand_total(&self) -> f64 {
        self.costs.total() + self.ancillary_total()
    }

    /// Project length in weeks (latest phase end)
    pub fn total_weeks(&self) -> u32 {
        self.phases.iter().map(|p| p.end_week()).max().unwrap_or(40)
    }
}
