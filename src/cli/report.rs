use super::{boundary, ui};
use crate::core::chart::{self, SeriesPoint, TableRow};
use crate::core::config::AppConfig;
use crate::core::projection::Horizon;
use crate::core::state::AppState;
use anyhow::Result;
use comfy_table::Cell;
use std::path::Path;

const CHART_WIDTH: usize = 40;

/// Runs the full projection report: ingest, allocate, render.
///
/// CLI overrides flow through the state record's update entry points, so the
/// rendered projection is always derived from the final state.
pub fn run(
    config: &AppConfig,
    csv_path: Option<&Path>,
    credits_per_month: Option<f64>,
    years: Option<Horizon>,
) -> Result<()> {
    let mut state = AppState::from_config(config).ingest_file(csv_path)?;
    if let Some(credits) = credits_per_month {
        state = state.with_credits_per_month(credits);
    }
    if let Some(horizon) = years {
        state = state.with_horizon(horizon);
    }

    boundary::render_with_fallback(|| render(&state, &config.currency));
    Ok(())
}

fn render(state: &AppState, currency: &str) {
    let prices = chart::price_series(state.observations());
    if prices.is_empty() {
        println!(
            "\n{}",
            ui::style_text(
                "No price data loaded yet. Pass a CSV of weekly credit prices to project revenue.",
                ui::StyleType::Subtle,
            )
        );
        return;
    }

    print_price_chart(&prices, currency);

    let results = state.projection();
    print_revenue_chart(&chart::revenue_breakdown(&results), currency);
    print_results_table(&chart::revenue_rows(&results, currency), state, currency);

    if let Some(warning) = state.percentage_warning() {
        println!("\n{}", ui::style_text(&warning, ui::StyleType::Warning));
    }
}

fn finite_max(series: &[SeriesPoint]) -> f64 {
    series
        .iter()
        .map(|point| point.value)
        .filter(|value| value.is_finite())
        .fold(0.0, f64::max)
}

fn print_price_chart(series: &[SeriesPoint], currency: &str) {
    println!(
        "\n{}\n",
        ui::style_text("Historical Credit Prices", ui::StyleType::Title)
    );

    let max = finite_max(series);
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Week"),
        ui::header_cell(&format!("Price ({currency})")),
        ui::header_cell(""),
    ]);
    for point in series {
        let price_cell = if point.value.is_nan() {
            ui::na_cell()
        } else {
            ui::value_cell(&format!("{:.2}", point.value))
        };
        table.add_row(vec![
            Cell::new(&point.label),
            price_cell,
            Cell::new(ui::bar(point.value, max, CHART_WIDTH)),
        ]);
    }
    println!("{table}");
}

fn print_revenue_chart(series: &[SeriesPoint], currency: &str) {
    println!(
        "\n{}\n",
        ui::style_text("Projected Revenue by Entity", ui::StyleType::Title)
    );

    let max = finite_max(series);
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Entity"),
        ui::header_cell(&format!("Revenue ({currency})")),
        ui::header_cell(""),
    ]);
    for point in series {
        let revenue_cell = if point.value.is_nan() {
            ui::na_cell()
        } else {
            ui::value_cell(&format!("{:.2}", point.value))
        };
        table.add_row(vec![
            Cell::new(&point.label),
            revenue_cell,
            Cell::new(ui::bar(point.value, max, CHART_WIDTH)),
        ]);
    }
    println!("{table}");
}

fn print_results_table(rows: &[TableRow], state: &AppState, currency: &str) {
    println!(
        "\n{}\n",
        ui::style_text("Revenue Distribution", ui::StyleType::Title)
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Entity"), ui::header_cell("Revenue")]);
    for row in rows {
        table.add_row(vec![Cell::new(&row.entity), ui::value_cell(&row.revenue)]);
    }
    println!("{table}");

    // Intermediate figures below the table, in the order they are derived.
    if let Some(input) = state.projection_input() {
        println!(
            "\nLatest price: {currency}{:.2}  |  Monthly revenue: {currency}{:.2}  |  Annual revenue: {currency}{:.2}",
            input.latest_price,
            input.monthly_revenue(),
            input.annual_revenue(),
        );
        println!(
            "{} ({}): {}",
            ui::style_text("Projected Total", ui::StyleType::TotalLabel),
            state.horizon(),
            ui::style_text(
                &format!("{currency}{:.2}", input.total_revenue()),
                ui::StyleType::TotalValue,
            )
        );
    }

    ui::print_separator();
}
