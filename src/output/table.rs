use comfy_table::{Cell, Color, Table};

use crate::core::{Bounds, CostResult, GlobalSettings, total_cost};
use crate::output::format::{
    NumberFormat, create_styled_table, format_cost, format_count, format_range, header_cell,
    right_cell, styled_cell,
};
use crate::output::summary::summary_line;

#[derive(Debug, Clone, Copy)]
pub(crate) struct EstimateTableOptions {
    pub(crate) use_color: bool,
    pub(crate) compact: bool,
    pub(crate) number_format: NumberFormat,
}

fn build_header(opts: &EstimateTableOptions) -> Vec<Cell> {
    let c = opts.use_color;
    if opts.compact {
        vec![
            header_cell("Interaction", c),
            header_cell("Model", c),
            header_cell("Req", c),
            header_cell("In", c),
            header_cell("Out", c),
            header_cell("Cost", c),
        ]
    } else {
        vec![
            header_cell("Interaction", c),
            header_cell("Model", c),
            header_cell("Requests/mo", c),
            header_cell("Input Tokens", c),
            header_cell("Output Tokens", c),
            header_cell("Monthly Cost", c),
        ]
    }
}

fn token_text(bounds: &Bounds, opts: &EstimateTableOptions) -> String {
    format_range(bounds, |v| format_count(v, opts.number_format, opts.compact))
}

fn cost_text(bounds: &Bounds, nf: NumberFormat) -> String {
    format_range(bounds, |v| format_cost(v, nf))
}

/// Build the estimate table; one row per result plus a TOTAL row
pub(crate) fn build_estimate_table(results: &[CostResult], opts: &EstimateTableOptions) -> Table {
    let mut table = create_styled_table();
    table.set_header(build_header(opts));

    let nf = opts.number_format;
    let cost_color = if opts.use_color { Some(Color::Green) } else { None };
    let cyan = if opts.use_color { Some(Color::Cyan) } else { None };

    let mut requests = 0.0;
    let mut input = Bounds::default();
    let mut output = Bounds::default();

    for result in results {
        requests += result.monthly_request_volume;
        input.add(&result.input_tokens);
        output.add(&result.output_tokens);

        table.add_row(vec![
            Cell::new(&result.interaction_name),
            Cell::new(&result.model_name),
            right_cell(
                &format_count(result.monthly_request_volume, nf, opts.compact),
                None,
                false,
            ),
            right_cell(&token_text(&result.input_tokens, opts), None, false),
            right_cell(&token_text(&result.output_tokens, opts), None, false),
            right_cell(&cost_text(&result.cost, nf), cost_color, false),
        ]);
    }

    let total = total_cost(results);
    table.add_row(vec![
        styled_cell("TOTAL", cyan, true),
        Cell::new(""),
        right_cell(&format_count(requests, nf, opts.compact), cyan, true),
        right_cell(&token_text(&input, opts), cyan, true),
        right_cell(&token_text(&output, opts), cyan, true),
        right_cell(&cost_text(&total, nf), cost_color, true),
    ]);

    table
}

pub(crate) fn print_estimate_table(
    results: &[CostResult],
    settings: &GlobalSettings,
    options: EstimateTableOptions,
) {
    if results.is_empty() {
        println!("\n  No enabled interactions.\n");
        return;
    }

    let table = build_estimate_table(results, &options);
    println!("\n  Monthly AI Cost Estimate\n");
    println!("{table}");

    let line = summary_line(results, settings, options.number_format);
    if options.use_color {
        println!("\n  \x1b[36m{line}\x1b[0m\n");
    } else {
        println!("\n  {line}\n");
    }
}
