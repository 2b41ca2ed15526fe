use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use keypareto::core_types::Layout;
use keypareto::export::SolutionRecord;
use keypareto::scorer::{BigramBreakdown, CostVector, MetricBreakdown, ScoreDetails};

/// One row of the `stats` report.
pub struct LayoutStats {
    pub name: String,
    pub primary: ScoreDetails,
    pub secondary: ScoreDetails,
    pub weighted_score: f64,
}

pub fn print_layout_grid(name: &str, layout: &Layout) {
    println!("\nLayout: {}", name);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    for row in layout.grid() {
        let cells: Vec<Cell> = row
            .iter()
            .map(|c| {
                let s = c.map(String::from).unwrap_or_else(|| " ".to_string());
                Cell::new(s).set_alignment(CellAlignment::Center)
            })
            .collect();
        table.add_row(cells);
    }
    println!("{}", table);
}

fn metric_cells(c: &CostVector) -> Vec<Cell> {
    vec![
        Cell::new(format!("{:.2}", c.sfb)).fg(Color::Red),
        Cell::new(format!("{:.2}", c.scissors)),
        Cell::new(format!("{:.2}", c.lat_stretch)),
        Cell::new(format!("{:.2}", c.skip_bigrams)),
        Cell::new(format!("{:.2}", c.total())).add_attribute(Attribute::Bold),
    ]
}

fn right_align(table: &mut Table, from: usize, to: usize) {
    for i in from..=to {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

/// Metrics of the first `top` solutions of a front.
pub fn print_front_report(solutions: &[SolutionRecord], languages: (&str, &str), top: usize) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let (p, s) = languages;
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new(format!("{}\nSFB%", p)).fg(Color::Red),
        Cell::new("Scis%"),
        Cell::new("Lat%"),
        Cell::new("Skip%"),
        Cell::new("Total"),
        Cell::new(format!("{}\nSFB%", s)).fg(Color::Red),
        Cell::new("Scis%"),
        Cell::new("Lat%"),
        Cell::new("Skip%"),
        Cell::new("Total"),
        Cell::new("Weighted").fg(Color::Cyan),
        Cell::new("Keys"),
    ]);
    right_align(&mut table, 1, 11);

    for sol in solutions.iter().take(top) {
        let mut row = vec![Cell::new(sol.id).add_attribute(Attribute::Bold)];
        row.extend(metric_cells(&sol.primary.costs));
        row.extend(metric_cells(&sol.secondary.costs));
        row.push(Cell::new(format!("{:.3}", sol.weighted_score)).fg(Color::Cyan));
        row.push(Cell::new(&sol.typing_string));
        table.add_row(row);
    }
    println!("\n{}", table);

    if solutions.len() > top {
        println!("... and {} more solutions", solutions.len() - top);
    }
}

/// Objectives plus diagnostic rates, one block per language.
pub fn print_stats_report(results: &[LayoutStats], languages: (&str, &str)) {
    for (lang, is_primary) in [(languages.0, true), (languages.1, false)] {
        let mut table = Table::new();
        table
            .load_preset(ASCII_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.add_row(vec![
            Cell::new(format!("Layout ({})", lang)).add_attribute(Attribute::Bold),
            Cell::new("SFB%").fg(Color::Red),
            Cell::new("Scis%"),
            Cell::new("Lat%"),
            Cell::new("Skip%"),
            Cell::new("Total"),
            Cell::new("PnkSFB%"),
            Cell::new("RngSFB%"),
            Cell::new("WideScis%"),
            Cell::new("Length"),
        ]);
        right_align(&mut table, 1, 9);

        for r in results {
            let d = if is_primary { &r.primary } else { &r.secondary };
            let mut row = vec![Cell::new(&r.name).add_attribute(Attribute::Bold)];
            row.extend(metric_cells(&d.costs));
            row.push(Cell::new(format!("{:.2}", d.pinky_sfb)));
            row.push(Cell::new(format!("{:.2}", d.ring_sfb)));
            row.push(Cell::new(format!("{:.2}", d.wide_scissors)));
            row.push(Cell::new(d.total_length));
            table.add_row(row);
        }
        println!("\n{}", table);
    }

    print_comparison_report(results);
}

fn print_comparison_report(results: &[LayoutStats]) {
    let Some(best) = results
        .iter()
        .min_by(|a, b| a.weighted_score.total_cmp(&b.weighted_score))
    else {
        return;
    };

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new(format!("Comparison vs Best ({})", best.name)).add_attribute(Attribute::Bold),
        Cell::new("Weighted"),
        Cell::new("Delta"),
        Cell::new("% Diff"),
    ]);
    right_align(&mut table, 1, 3);

    for r in results {
        let delta = r.weighted_score - best.weighted_score;
        let pct = if best.weighted_score > 0.0 {
            (delta / best.weighted_score) * 100.0
        } else {
            0.0
        };

        let name_cell = if r.name == best.name {
            Cell::new(&r.name)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(&r.name).add_attribute(Attribute::Bold)
        };

        table.add_row(vec![
            name_cell,
            Cell::new(format!("{:.3}", r.weighted_score)),
            Cell::new(format!("{:.3}", delta)),
            Cell::new(format!("{:.1}%", pct)),
        ]);
    }
    println!("\n{}", table);
}

fn hit_cells(m: &MetricBreakdown, i: usize) -> [Cell; 2] {
    match m.worst.get(i) {
        Some(hit) => {
            let label = if hit.multiplier < 1.0 {
                format!("{:?} x{}", hit.bigram, hit.multiplier)
            } else {
                format!("{:?}", hit.bigram)
            };
            [Cell::new(label), Cell::new(format!("{:.3}", hit.percentage))]
        }
        None => [Cell::new(""), Cell::new("")],
    }
}

/// Worst bigrams per metric, side by side, with each metric's total.
pub fn print_breakdown(name: &str, language: &str, b: &BigramBreakdown) {
    let metrics = [
        ("SFB", &b.sfb),
        ("Scissors", &b.scissors),
        ("Lat Stretch", &b.lat_stretch),
        ("Skip", &b.skip_bigrams),
    ];

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = Vec::with_capacity(2 * metrics.len());
    for (label, m) in &metrics {
        header.push(Cell::new(format!("{} ({:.2}%)", label, m.total)).add_attribute(Attribute::Bold));
        header.push(Cell::new("%"));
    }
    table.add_row(header);
    for i in 0..metrics.len() {
        right_align(&mut table, 2 * i + 1, 2 * i + 1);
    }

    let depth = metrics.iter().map(|(_, m)| m.worst.len()).max().unwrap_or(0);
    for i in 0..depth {
        let row: Vec<Cell> = metrics.iter().flat_map(|(_, m)| hit_cells(m, i)).collect();
        table.add_row(row);
    }

    println!("\nWorst bigrams: {} ({})", name, language);
    println!("{}", table);
}
