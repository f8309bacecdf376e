//! Terminal implementations of the screen capabilities

use roomdesk_core::{
    capability::{Navigator, Notifier, Severity},
    service::TableView,
};

/// Prints notifications, errors to stderr
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show_message(&self, severity: Severity, text: &str) {
        match severity {
            Severity::Success => println!("[{severity}] {text}"),
            Severity::Error => eprintln!("[{severity}] {text}"),
        }
    }
}

/// There is no router in a terminal; show where the app would go
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn go_to(&self, path: &str) {
        println!("-> {path}");
    }
}

/// Render the table as aligned plain text, without the action column
pub fn render_table(view: &TableView) -> String {
    if view.loading {
        return "Loading...".to_string();
    }

    // Last column holds actions, nothing to print there
    let shown = view.columns.len().saturating_sub(1);
    let mut grid: Vec<Vec<String>> = Vec::with_capacity(view.rows.len() + 1);
    grid.push(view.columns.iter().take(shown).map(|(_, title)| title.clone()).collect());
    for row in &view.rows {
        grid.push(row.cells.iter().take(shown).map(|c| c.text().to_string()).collect());
    }

    let widths: Vec<usize> = (0..shown)
        .map(|i| grid.iter().map(|r| r[i].chars().count()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for cells in &grid {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    if view.rows.is_empty() {
        out.push_str("(no rooms)\n");
    } else if view.page_count > 1 {
        out.push_str(&format!("page {}/{}\n", view.page + 1, view.page_count));
    }
    out
}
