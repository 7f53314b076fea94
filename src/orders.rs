//! Materialization of a generation result into persistable records
//!
//! Converts a `GenerationResult` into one project record plus one work order
//! per trade appearing in the material list. This is pure data conversion;
//! writing the records is the store's job (`db::save_materialization`).

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::generator::format_eur;
use crate::models::{GenerationResult, MaterialPosition, Trade};

/// One checklist step on a project or work order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub title: String,
    pub done: bool,
}

impl ChecklistItem {
    fn new(title: String) -> Self {
        ChecklistItem { title, done: false }
    }
}

/// A material line attached to a work order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub title: String,
    pub amount: String,
    pub unit: String,
    pub note: String,
}

/// Work order state; freshly materialized orders are always pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Done,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Done => "done",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "in_progress" => Some(OrderStatus::InProgress),
            "done" => Some(OrderStatus::Done),
            _ => None,
        }
    }
}

/// The persisted project/event record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub reference: String,
    pub title: String,
    pub house_type: String,
    /// Cost summary shown on the project
    pub notes: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// One item per schedule phase, with its week range
    pub checklist: Vec<ChecklistItem>,
}

/// One persisted work order, grouped by trade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrderRecord {
    pub id: String,
    pub reference: String,
    pub trade: Trade,
    pub title: String,
    pub assignee: String,
    pub status: OrderStatus,
    /// Name of the matching schedule phase, if any
    pub station: String,
    pub deadline: Option<NaiveDate>,
    pub line_items: Vec<OrderLineItem>,
    pub checklist: Vec<ChecklistItem>,
}

/// A full batch of records derived from one result. Persisted all-or-nothing.
#[derive(Debug, Clone)]
pub struct Materialization {
    pub project: ProjectRecord,
    pub orders: Vec<WorkOrderRecord>,
}

/// Checklist template for a trade: eight steps, or none for trades without
/// an established routine.
pub fn template_steps(trade: Trade) -> Option<[&'static str; 8]> {
    match trade {
        Trade::Shell => Some([
            "Schalung vorbereiten / pruefen",
            "Bewehrung einbauen (Stahlplan beachten)",
            "Bewehrung abnehmen lassen (Bauleiter)",
            "Beton bestellen (Menge + Guete pruefen)",
            "Betonieren + Verdichten",
            "Aushaertezeit einhalten / dokumentieren",
            "Schalung entfernen / Nachbehandlung",
            "Qualitaetskontrolle + Fotos",
        ]),
        Trade::Electrical => Some([
            "Schlitze / Durchbrueche markieren",
            "Leerrohre verlegen",
            "Kabel einziehen (nach Plan)",
            "Dosen / Verteiler setzen",
            "Anschluss / Verdrahtung",
            "Durchgangspruefung / Isolationstest",
            "Abnahme durch Elektrofachkraft",
            "Dokumentation (Stromlaufplan aktualisieren)",
        ]),
        Trade::Plumbing => Some([
            "Rohrleitungen vormontieren",
            "Wandschlitze / Kernbohrungen",
            "Leitungen verlegen (Warm/Kalt/Abwasser)",
            "Druckpruefung durchfuehren",
            "Daemmung anbringen",
            "Sanitaerobjekte montieren",
            "Dichtheitspruefung / Abnahme",
            "Dokumentation + Fotos",
        ]),
        Trade::Drywall => Some([
            "UW-/CW-Profile montieren (Unterkonstruktion)",
            "Daemmung einlegen",
            "Beplankung erste Seite (Gipskarton)",
            "Installationen pruefen (Elektro/Sanitaer)",
            "Beplankung zweite Seite",
            "Fugen verspachteln + schleifen",
            "Qualitaetskontrolle Ebenheit",
            "Freigabe fuer Maler",
        ]),
        Trade::Screed => Some([
            "Untergrund pruefen / reinigen",
            "Randdaemmstreifen verlegen",
            "Folie / Trennlage auslegen",
            "Heizungsrohre pruefen (bei Fussbodenheizung)",
            "Estrich einbringen + abziehen",
            "Trocknungszeit einhalten (Feuchtemessung)",
            "Schleifen / Grundierung",
            "Freigabe fuer Bodenbelag",
        ]),
        Trade::Painting => Some([
            "Untergrund pruefen (Risse, Unebenheiten)",
            "Spachteln + Schleifen",
            "Grundierung auftragen",
            "Abkleben / Abdecken",
            "1. Anstrich / Beschichtung",
            "2. Anstrich (nach Trocknungszeit)",
            "Abkleben entfernen / Nacharbeiten",
            "Endkontrolle + Freigabe",
        ]),
        _ => None,
    }
}

/// Whole quantities without decimals, everything else with one
fn format_amount(value: f64) -> String {
    if value == value.floor() {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

fn project_title(result: &GenerationResult) -> String {
    if result.config.project_name.is_empty() {
        format!("{} – Neubau", result.config.house_type.label())
    } else {
        result.config.project_name.clone()
    }
}

fn cost_notes(result: &GenerationResult) -> String {
    let config = &result.config;
    format!(
        "Generiert aus Haus-Konfigurator\n\
         Typ: {}\n\
         Flaeche: {} m², {} Geschoss(e)\n\
         Ausstattung: {}\n\
         \n\
         Baukosten: {}\n\
         Nebenkosten: {}\n\
         Gesamt: {}",
        config.house_type.label(),
        config.floor_area as i64,
        config.floors,
        config.finish_tier.label(),
        format_eur(result.costs.total()),
        format_eur(result.ancillary_total()),
        format_eur(result.grand_total()),
    )
}

/// Group materials by trade, ordered by trade label.
fn group_by_trade(materials: &[MaterialPosition]) -> Vec<(Trade, Vec<&MaterialPosition>)> {
    let mut groups: Vec<(Trade, Vec<&MaterialPosition>)> = Vec::new();
    for mat in materials {
        match groups.iter_mut().find(|(trade, _)| *trade == mat.trade) {
            Some((_, items)) => items.push(mat),
            None => groups.push((mat.trade, vec![mat])),
        }
    }
    groups.sort_by_key(|(trade, _)| trade.label());
    groups
}

/// Convert a generation result into persistable records: one project plus
/// one work order per trade in the material list.
pub fn materialize(result: &GenerationResult, start_date: NaiveDate) -> Materialization {
    let project_id = Uuid::new_v4().to_string();
    let reference = format!(
        "HK-{}",
        result.config.id.chars().take(8).collect::<String>().to_uppercase()
    );

    let checklist = result
        .phases
        .iter()
        .map(|phase| {
            ChecklistItem::new(format!(
                "{} (KW+{}–{})",
                phase.name,
                phase.start_week,
                phase.end_week()
            ))
        })
        .collect();

    let project = ProjectRecord {
        id: project_id,
        reference,
        title: project_title(result),
        house_type: result.config.house_type.label().to_string(),
        notes: cost_notes(result),
        start_date,
        end_date: start_date + Duration::weeks(result.total_weeks() as i64),
        checklist,
    };

    let orders = group_by_trade(&result.materials)
        .into_iter()
        .map(|(trade, materials)| {
            let id = Uuid::new_v4().to_string();
            let reference = format!(
                "{}-{}",
                trade.label().chars().take(3).collect::<String>().to_uppercase(),
                id.chars().take(4).collect::<String>()
            );

            let line_items = materials
                .iter()
                .map(|mat| OrderLineItem {
                    title: mat.title.clone(),
                    amount: format_amount(mat.quantity),
                    unit: mat.unit.to_string(),
                    note: mat.note.clone(),
                })
                .collect();

            let checklist = template_steps(trade)
                .map(|steps| steps.iter().map(|s| ChecklistItem::new(s.to_string())).collect())
                .unwrap_or_default();

            // Deadline from the first schedule phase of the same trade
            let matching_phase = result.phases.iter().find(|p| p.trade == trade);
            let station = matching_phase.map(|p| p.name.clone()).unwrap_or_default();
            let deadline = matching_phase
                .map(|p| start_date + Duration::weeks(p.end_week() as i64));

            WorkOrderRecord {
                id,
                reference,
                trade,
                title: format!("{} – {}", trade.label(), project_title(result)),
                assignee: String::new(),
                status: OrderStatus::Pending,
                station,
                deadline,
                line_items,
                checklist,
            }
        })
        .collect();

    Materialization { project, orders }
}
