//! Plain-text rendering of the weekly grid.

use timetable_core::grid::{Cell, Grid};

/// Renders `grid` as a bordered table: one column per day, one row per
/// lesson hour. Occupied cells list lesson, teacher, code, time range and
/// entry id; empty cells show `-`.
pub fn render(grid: &Grid<'_>) -> String {
    let mut header = vec![vec!["Hour".to_string()]];
    header.extend(grid.days().iter().map(|day| vec![day.label().to_string()]));

    let rows: Vec<Vec<Vec<String>>> = grid
        .rows()
        .map(|(hour, cells)| {
            let mut row = vec![vec![format!("{}. Hour", hour)]];
            row.extend(cells.iter().map(cell_lines));
            row
        })
        .collect();

    let mut widths = vec![0; header.len()];
    for row in std::iter::once(&header).chain(rows.iter()) {
        for (column, lines) in row.iter().enumerate() {
            for line in lines {
                widths[column] = widths[column].max(line.chars().count());
            }
        }
    }

    let divider = widths
        .iter()
        .map(|width| "-".repeat(width + 2))
        .collect::<Vec<_>>()
        .join("+");

    let mut out = String::new();
    out.push_str(&divider);
    out.push('\n');
    write_row(&mut out, &header, &widths);
    out.push_str(&divider);
    out.push('\n');
    for row in &rows {
        write_row(&mut out, row, &widths);
        out.push_str(&divider);
        out.push('\n');
    }
    out
}

fn cell_lines(cell: &Cell<'_>) -> Vec<String> {
    let Some(slot) = cell.slot() else {
        return vec!["-".to_string()];
    };

    let mut lines = Vec::new();
    if let Some(name) = &slot.lesson_name {
        lines.push(name.clone());
    }
    if let Some(teacher) = &slot.teacher_name {
        lines.push(teacher.clone());
    }
    if let Some(code) = &slot.lesson_code {
        lines.push(code.clone());
    }
    lines.push(slot.time_range_label());
    lines.push(format!("#{}", slot.id));
    lines
}

fn write_row(out: &mut String, row: &[Vec<String>], widths: &[usize]) {
    let height = row.iter().map(Vec::len).max().unwrap_or(1);
    for index in 0..height {
        let line = row
            .iter()
            .zip(widths)
            .map(|(lines, width)| {
                let text = lines.get(index).map(String::as_str).unwrap_or("");
                format!(" {:<width$} ", text, width = width)
            })
            .collect::<Vec<_>>()
            .join("|");
        out.push_str(line.trim_end());
        out.push('\n');
    }
}
