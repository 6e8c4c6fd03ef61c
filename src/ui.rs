//! Interface de terminal do usersync — spinner e saída colorida.
//!
//! Usa as crates `indicatif` para o spinner de leitura e `console` para
//! estilização com cores. O [`Report`] imprime registros, diagnósticos e
//! comparações.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use usersync::engine::{BatchOutcome, Comparison, Diagnostics};

/// Spinner exibido enquanto uma planilha é lida.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn start(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { pb }
    }

    pub fn finish(self) {
        self.pb.finish_and_clear();
    }
}

/// Relatórios coloridos no terminal.
pub struct Report {
    // Estilo verde para sucesso.
    green: Style,
    // Estilo amarelo para avisos.
    yellow: Style,
    // Estilo vermelho para erros.
    red: Style,
    dim: Style,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            green: Style::new().green().bold(),
            yellow: Style::new().yellow(),
            red: Style::new().red().bold(),
            dim: Style::new().dim(),
        }
    }
}

impl Report {
    /// Lista cada registro marcado como novo ou existente.
    pub fn print_batch(&self, outcome: &BatchOutcome) {
        for record in &outcome.records {
            let marker = if record.is_new {
                self.green.apply_to("+ new     ")
            } else {
                self.dim.apply_to("~ existing")
            };
            let extension = if record.extension_number.is_empty() {
                String::new()
            } else {
                format!(" [{}]", record.extension_number)
            };
            println!(
                "  {marker} {} ({}){extension}",
                record.display_name(),
                record.email
            );
        }
        println!();
        self.success(&format!(
            "{} users processed ({} new)",
            outcome.records.len(),
            outcome.new_count()
        ));
        self.print_diagnostics(&outcome.diagnostics);
    }

    pub fn print_diagnostics(&self, diagnostics: &Diagnostics) {
        if diagnostics.is_clean() {
            println!("  {}", self.dim.apply_to("no warnings"));
            return;
        }
        if diagnostics.skipped_rows > 0 {
            self.warn(&format!(
                "{} rows without email were skipped",
                diagnostics.skipped_rows
            ));
        }
        if !diagnostics.unmatched_teams.is_empty() {
            self.warn(&format!(
                "Teams not in the template: {}",
                join(&diagnostics.unmatched_teams)
            ));
        }
        if !diagnostics.teams_without_id.is_empty() {
            self.warn(&format!(
                "Could not generate extensions for teams without id: {}",
                join(&diagnostics.teams_without_id)
            ));
        }
        if !diagnostics.exhausted_teams.is_empty() {
            self.warn(&format!(
                "No free extensions left for: {}",
                join(&diagnostics.exhausted_teams)
            ));
        }
        if !diagnostics.invalid_chat_limits.is_empty() {
            self.warn(&format!(
                "Invalid chat limit cleared for: {}",
                join(&diagnostics.invalid_chat_limits)
            ));
        }
    }

    pub fn print_comparison(&self, comparison: &Comparison) {
        println!("{}", self.green.apply_to("─── Comparison ───"));
        println!("  Common:  {}", comparison.common.len());
        println!("  Added:   {}", comparison.added.len());
        println!("  Removed: {}", comparison.removed.len());
        println!();
        println!("{}", self.green.apply_to("Added:"));
        self.print_list(&comparison.added);
        println!("{}", self.red.apply_to("Removed:"));
        self.print_list(&comparison.removed);
    }

    fn print_list<'a>(&self, items: impl IntoIterator<Item = &'a String>) {
        let mut any = false;
        for item in items {
            println!("  - {item}");
            any = true;
        }
        if !any {
            println!("  {}", self.dim.apply_to("none"));
        }
    }

    pub fn success(&self, message: &str) {
        println!("  {} {message}", self.green.apply_to("✓"));
    }

    pub fn warn(&self, message: &str) {
        println!("  {} {message}", self.yellow.apply_to("!"));
    }

    pub fn error(&self, message: &str) {
        eprintln!("  {} {message}", self.red.apply_to("✗"));
    }
}

fn join<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
