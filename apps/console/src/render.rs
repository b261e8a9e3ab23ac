//! Plain-text tables and JSON for command output.

use rentdesk_core::{Customer, Vehicle, ISO_DATE_FORMAT};
use serde::Serialize;

use crate::commands::rental::RentalRow;
use crate::error::ApiError;
use crate::state::ConfigState;

/// Left-aligned columns separated by two spaces, with a rule under the header.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(headers.to_vec()));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}

pub fn vehicles(list: &[Vehicle], config: &ConfigState) -> String {
    let rows: Vec<Vec<String>> = list
        .iter()
        .map(|v| {
            vec![
                v.id.to_string(),
                v.reg_no.clone(),
                v.make.clone(),
                v.model.clone(),
                v.year.to_string(),
                config.format_currency(v.rate()),
                v.status.to_string(),
            ]
        })
        .collect();
    table(
        &["id", "reg_no", "make", "model", "year", "rate/day", "status"],
        &rows,
    )
}

pub fn customers(list: &[Customer]) -> String {
    let rows: Vec<Vec<String>> = list
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.name.clone(),
                c.phone.clone(),
                c.email.clone(),
            ]
        })
        .collect();
    table(&["id", "name", "phone", "email"], &rows)
}

pub fn rentals(list: &[RentalRow], config: &ConfigState) -> String {
    let rows: Vec<Vec<String>> = list
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.vehicle_id.to_string(),
                r.customer_id.to_string(),
                r.start_date.format(ISO_DATE_FORMAT).to_string(),
                r.expected_return_date.format(ISO_DATE_FORMAT).to_string(),
                r.actual_return_date
                    .map(|d| d.format(ISO_DATE_FORMAT).to_string())
                    .unwrap_or_default(),
                r.status.to_string(),
                r.amount
                    .map(|a| config.format_currency(a))
                    .unwrap_or_default(),
            ]
        })
        .collect();
    table(
        &["id", "vehicle", "customer", "start", "expected", "actual", "status", "amount"],
        &rows,
    )
}

/// Pretty JSON for `--json`.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::internal(format!("Failed to encode output: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentdesk_core::VehicleStatus;

    #[test]
    fn test_table_pads_columns() {
        let out = table(
            &["id", "name"],
            &[
                vec!["1".into(), "Asha".into()],
                vec!["10".into(), "Bo".into()],
            ],
        );
        assert_eq!(out, "id  name\n--  ----\n1   Asha\n10  Bo");
    }

    #[test]
    fn test_vehicle_table_uses_currency_symbol() {
        let config = ConfigState {
            currency_symbol: "$".into(),
            ..ConfigState::default()
        };
        let out = vehicles(
            &[Vehicle {
                id: 1,
                reg_no: "KA-01".into(),
                make: "Tata".into(),
                model: "Nexon".into(),
                year: 2022,
                rate_per_day_cents: 5000,
                status: VehicleStatus::Available,
            }],
            &config,
        );
        assert!(out.contains("$50.00"));
        assert!(out.contains("available"));
    }
}
