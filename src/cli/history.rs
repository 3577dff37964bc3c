use super::{boundary, ui};
use crate::core::chart;
use crate::core::config::AppConfig;
use crate::core::state::AppState;
use anyhow::Result;
use comfy_table::Cell;
use std::path::Path;

/// Renders only the historical price series, without any projection.
pub fn run(config: &AppConfig, csv_path: Option<&Path>) -> Result<()> {
    let state = AppState::from_config(config).ingest_file(csv_path)?;

    boundary::render_with_fallback(|| render(&state, &config.currency));
    Ok(())
}

fn render(state: &AppState, currency: &str) {
    let series = chart::price_series(state.observations());
    if series.is_empty() {
        println!(
            "\n{}",
            ui::style_text("No price data loaded yet.", ui::StyleType::Subtle)
        );
        return;
    }

    println!(
        "\n{}\n",
        ui::style_text("Historical Credit Prices", ui::StyleType::Title)
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Week"),
        ui::header_cell(&format!("Price ({currency})")),
    ]);
    for point in &series {
        let price_cell = if point.value.is_nan() {
            ui::na_cell()
        } else {
            ui::value_cell(&format!("{:.2}", point.value))
        };
        table.add_row(vec![Cell::new(&point.label), price_cell]);
    }
    println!("{table}");

    println!(
        "\n{} {}",
        ui::style_text("Observations:", ui::StyleType::TotalLabel),
        series.len()
    );
}
