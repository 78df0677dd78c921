use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use gapscore::gap::TaskScore;
use gapscore::import::{FileOutcome, ImportReport};

fn right_align(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn fmt_opt(v: Option<f64>, precision: usize) -> String {
    v.map(|x| format!("{:.*}", precision, x))
        .unwrap_or_else(|| "-".to_string())
}

pub fn print_import_report(report: &ImportReport) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("File").add_attribute(Attribute::Bold),
        Cell::new("Pilot"),
        Cell::new("Outcome"),
    ]);

    for d in &report.diagnostics {
        let name = d
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let row = match &d.outcome {
            FileOutcome::Imported(key) => vec![
                Cell::new(name),
                Cell::new(key),
                Cell::new("imported").fg(Color::Green),
            ],
            FileOutcome::Skipped(reason) => vec![
                Cell::new(name),
                Cell::new("-"),
                Cell::new(reason).fg(Color::Red),
            ],
        };
        table.add_row(row);
    }
    println!("\n{}", table);
    println!(
        "Imported: {} | Skipped: {} | Pilots without track: {}",
        report.imported(),
        report.skipped(),
        report.remaining.len()
    );
}

pub fn print_validity_report(score: &TaskScore) {
    let s = &score.statistics;
    let v = &score.validity;
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new(format!("Task {}", score.task_id)).add_attribute(Attribute::Bold),
        Cell::new("Value"),
    ]);
    right_align(&mut table, 1..=1);

    let rows: Vec<(&str, String)> = vec![
        ("Present", s.pilots_present.to_string()),
        ("Launched", s.launched.to_string()),
        ("ESS", s.ess.to_string()),
        ("Goal", s.goal.to_string()),
        ("Best distance (km)", format!("{:.2}", s.best_distance / 1000.0)),
        ("Fastest (s)", fmt_opt(s.fastest, 0)),
        ("Launch validity", format!("{:.4}", v.launch)),
        ("Distance validity", format!("{:.4}", v.distance)),
        ("Time validity", format!("{:.4}", v.time)),
        ("Stopped validity", fmt_opt(v.stopped, 4)),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table.add_row(vec![
        Cell::new("Day quality").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.4}", score.day_quality)).fg(Color::Cyan),
    ]);
    println!("\n{}", table);

    let a = &score.allocation;
    let w = &score.weights;
    let mut points = Table::new();
    points
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    points.add_row(vec![
        Cell::new("").add_attribute(Attribute::Bold),
        Cell::new("Distance"),
        Cell::new("Speed"),
        Cell::new("Leading"),
        Cell::new("Arrival"),
        Cell::new("Total").add_attribute(Attribute::Bold),
    ]);
    right_align(&mut points, 1..=5);
    points.add_row(vec![
        Cell::new("Weight"),
        Cell::new(format!("{:.4}", w.distance)),
        Cell::new(format!("{:.4}", w.speed)),
        Cell::new(format!("{:.4}", w.leading)),
        Cell::new(format!("{:.4}", w.arrival)),
        Cell::new(format!(
            "{:.4}",
            w.distance + w.speed + w.leading + w.arrival
        )),
    ]);
    points.add_row(vec![
        Cell::new("Available"),
        Cell::new(format!("{:.1}", a.distance)),
        Cell::new(format!("{:.1}", a.speed)),
        Cell::new(format!("{:.1}", a.leading)),
        Cell::new(format!("{:.1}", a.arrival)),
        Cell::new(format!("{:.1}", a.total())).fg(Color::Cyan),
    ]);
    println!("{}", points);
}

pub fn print_pilot_scores(score: &TaskScore) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Pilot"),
        Cell::new("Distance"),
        Cell::new("Speed"),
        Cell::new("Leading"),
        Cell::new("Total").fg(Color::Cyan),
    ]);
    right_align(&mut table, 2..=5);

    for (rank, p) in score.pilots.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(p.pilot_key),
            Cell::new(format!("{:.1}", p.distance)),
            Cell::new(format!("{:.1}", p.speed)),
            Cell::new(format!("{:.1}", p.leading)),
            Cell::new(format!("{:.1}", p.total())).add_attribute(Attribute::Bold),
        ]);
    }
    println!("\n{}", table);
}
