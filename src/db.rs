//! Database schema and operations
//!
//! Persists materialized projects and their per-trade work orders. Line
//! items and checklists travel as a JSON payload column next to the
//! queryable header columns. A materialization is written inside one
//! transaction: either the project and all its orders land, or nothing does.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::models::Trade;
use crate::orders::{
    ChecklistItem, Materialization, OrderLineItem, OrderStatus, ProjectRecord, WorkOrderRecord,
};

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Materialized house projects
        CREATE TABLE IF NOT EXISTS projects (
            id TEXT PRIMARY KEY,
            reference TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL,
            house_type TEXT NOT NULL,
            notes TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            checklist TEXT NOT NULL
        );

        -- One work order per trade, owned by a project
        CREATE TABLE IF NOT EXISTS work_orders (
            id TEXT PRIMARY KEY,
            project_id TEXT NOT NULL REFERENCES projects(id),
            reference TEXT NOT NULL,
            trade TEXT NOT NULL,
            title TEXT NOT NULL,
            assignee TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT 'pending',
            deadline TEXT,
            payload TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_work_orders_project ON work_orders(project_id);
        "#,
    )?;
    Ok(())
}

/// Line items, checklist and station of a work order, stored as JSON
#[derive(Debug, Serialize, Deserialize)]
struct OrderPayload {
    station: String,
    line_items: Vec<OrderLineItem>,
    checklist: Vec<ChecklistItem>,
}

/// Persist a whole materialization batch atomically.
pub fn save_materialization(conn: &mut Connection, batch: &Materialization) -> Result<()> {
    let tx = conn.transaction()?;

    let project = &batch.project;
    tx.execute(
        "INSERT INTO projects (id, reference, title, house_type, notes, start_date, end_date, checklist)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        (
            &project.id,
            &project.reference,
            &project.title,
            &project.house_type,
            &project.notes,
            project.start_date.to_string(),
            project.end_date.to_string(),
            serde_json::to_string(&project.checklist)?,
        ),
    )?;

    for order in &batch.orders {
        let payload = OrderPayload {
            station: order.station.clone(),
            line_items: order.line_items.clone(),
            checklist: order.checklist.clone(),
        };
        tx.execute(
            "INSERT INTO work_orders (id, project_id, reference, trade, title, assignee, status, deadline, payload)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            (
                &order.id,
                &project.id,
                &order.reference,
                order.trade.label(),
                &order.title,
                &order.assignee,
                order.status.as_str(),
                order.deadline.map(|d| d.to_string()),
                serde_json::to_string(&payload)?,
            ),
        )?;
    }

    tx.commit()?;
    Ok(())
}

/// One row of the project listing
#[derive(Debug)]
pub struct ProjectRow {
    pub reference: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub order_count: i64,
}

/// List all persisted projects, newest reference last
pub fn list_projects(conn: &Connection) -> Result<Vec<ProjectRow>> {
    let mut stmt = conn.prepare(
        "SELECT p.reference, p.title, p.start_date, p.end_date,
                (SELECT COUNT(*) FROM work_orders w WHERE w.project_id = p.id)
         FROM projects p
         ORDER BY p.start_date, p.reference",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(ProjectRow {
            reference: row.get(0)?,
            title: row.get(1)?,
            start_date: row.get(2)?,
            end_date: row.get(3)?,
            order_count: row.get(4)?,
        })
    })?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// Load a project record by its reference code
pub fn load_project(conn: &Connection, reference: &str) -> Result<Option<ProjectRecord>> {
    let row: Option<(String, String, String, String, String, String, String)> = conn
        .query_row(
            "SELECT id, title, house_type, notes, start_date, end_date, checklist
             FROM projects WHERE reference = ?1",
            [reference],
            |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                ))
            },
        )
        .optional()?;

    let Some((id, title, house_type, notes, start_date, end_date, checklist)) = row else {
        return Ok(None);
    };

    Ok(Some(ProjectRecord {
        id,
        reference: reference.to_string(),
        title,
        house_type,
        notes,
        start_date: start_date.parse::<NaiveDate>()?,
        end_date: end_date.parse::<NaiveDate>()?,
        checklist: serde_json::from_str(&checklist)?,
    }))
}

/// Load all work orders of a project, ordered by trade label
pub fn load_orders(conn: &Connection, project_reference: &str) -> Result<Vec<WorkOrderRecord>> {
    let mut stmt = conn.prepare(
        "SELECT w.id, w.reference, w.trade, w.title, w.assignee, w.status, w.deadline, w.payload
         FROM work_orders w
         JOIN projects p ON p.id = w.project_id
         WHERE p.reference = ?1
         ORDER BY w.trade",
    )?;

    type OrderRow = (
        String,
        String,
        String,
        String,
        String,
        String,
        Option<String>,
        String,
    );
    let rows = stmt.query_map([project_reference], |row| {
        Ok::<OrderRow, rusqlite::Error>((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
            row.get(6)?,
            row.get(7)?,
        ))
    })?;

    let mut results = Vec::new();
    for row in rows {
        let (id, reference, trade, title, assignee, status, deadline, payload) = row?;
        let trade = Trade::from_label(&trade).ok_or_else(|| anyhow!("unknown trade: {}", trade))?;
        let status =
            OrderStatus::parse(&status).ok_or_else(|| anyhow!("unknown status: {}", status))?;
        let deadline = deadline.map(|d| d.parse::<NaiveDate>()).transpose()?;
        let payload: OrderPayload = serde_json::from_str(&payload)?;

        results.push(WorkOrderRecord {
            id,
            reference,
            trade,
            title,
            assignee,
            status,
            station: payload.station,
            deadline,
            line_items: payload.line_items,
            checklist: payload.checklist,
        });
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use crate::models::HouseConfig;
    use crate::orders::materialize;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn batch() -> Materialization {
        let config = HouseConfig {
            floor_area: 140.0,
            floors: 2,
            basement: true,
            garage: true,
            ..HouseConfig::default()
        };
        let result = generate(&config);
        materialize(&result, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
    }

    #[test]
    fn saved_project_appears_in_listing() {
        let mut conn = test_conn();
        let batch = batch();
        save_materialization(&mut conn, &batch).unwrap();

        let projects = list_projects(&conn).unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].reference, batch.project.reference);
        assert_eq!(projects[0].order_count, batch.orders.len() as i64);
    }

    #[test]
    fn project_record_round_trips() {
        let mut conn = test_conn();
        let batch = batch();
        save_materialization(&mut conn, &batch).unwrap();

        let loaded = load_project(&conn, &batch.project.reference)
            .unwrap()
            .expect("project should exist");
        assert_eq!(loaded.title, batch.project.title);
        assert_eq!(loaded.notes, batch.project.notes);
        assert_eq!(loaded.start_date, batch.project.start_date);
        assert_eq!(loaded.end_date, batch.project.end_date);
        assert_eq!(loaded.checklist, batch.project.checklist);
    }

    #[test]
    fn work_orders_round_trip_with_all_line_items() {
        let mut conn = test_conn();
        let batch = batch();
        save_materialization(&mut conn, &batch).unwrap();

        let loaded = load_orders(&conn, &batch.project.reference).unwrap();
        assert_eq!(loaded.len(), batch.orders.len());

        let mut saved_trades: Vec<Trade> = batch.orders.iter().map(|o| o.trade).collect();
        saved_trades.sort_by_key(|t| t.label());
        let loaded_trades: Vec<Trade> = loaded.iter().map(|o| o.trade).collect();
        assert_eq!(loaded_trades, saved_trades);

        for order in &loaded {
            let original = batch.orders.iter().find(|o| o.id == order.id).unwrap();
            assert_eq!(order.line_items, original.line_items);
            assert_eq!(order.checklist, original.checklist);
            assert_eq!(order.status, OrderStatus::Pending);
            assert_eq!(order.deadline, original.deadline);
            assert_eq!(order.station, original.station);
        }
    }

    #[test]
    fn duplicate_reference_fails_as_a_single_error() {
        let mut conn = test_conn();
        let batch = batch();
        save_materialization(&mut conn, &batch).unwrap();

        // Same project reference again: the whole batch must be rejected
        assert!(save_materialization(&mut conn, &batch).is_err());
        let projects = list_projects(&conn).unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].order_count, batch.orders.len() as i64);
    }

    #[test]
    fn unknown_project_reference_loads_nothing() {
        let conn = test_conn();
        assert!(load_project(&conn, "HK-DOESNOTX").unwrap().is_none());
        assert!(load_orders(&conn, "HK-DOESNOTX").unwrap().is_empty());
    }
}
