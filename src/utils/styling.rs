//! Terminal styling utilities

use console::style;
use std::time::Duration;

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
     ██████╗██╗     ██╗ ██████╗
    ██╔════╝██║     ██║██╔═══██╗
    ██║     ██║     ██║██║   ██║
    ██║     ██║     ██║██║▄▄ ██║
    ╚██████╗███████╗██║╚██████╔╝
     ╚═════╝╚══════╝╚═╝ ╚══▀▀═╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {}",
        style("Feature redundancy clustering via clique decomposition").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the run configuration card
pub fn print_config(
    input: &std::path::Path,
    method: &str,
    alpha: f64,
    correct: bool,
    seed: Option<u64>,
) {
    println!("    {}", style("Configuration").cyan().bold());
    println!("    {}", style("─".repeat(50)).dim());
    println!("      Input:      {}", input.display());
    println!("      Method:     {}", style(method).yellow());
    println!("      Alpha:      {}", style(format!("{}", alpha)).yellow());
    println!(
        "      Correction: {}",
        style(if correct { "bonferroni" } else { "none" }).yellow()
    );
    match seed {
        Some(seed) => println!("      Seed:       {}", style(format!("{}", seed)).yellow()),
        None => println!("      Seed:       {}", style("arbitrary").dim()),
    }
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
}

/// Print a success line
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), message);
}

/// Print an informational line
pub fn print_info(message: &str) {
    println!("    {} {}", style("·").dim(), message);
}

/// Print a highlighted count line
pub fn print_count(label: &str, count: usize) {
    println!(
        "    {} {} {}",
        style("✓").green().bold(),
        style(count).yellow().bold(),
        label
    );
}

/// Print the elapsed time of a step
pub fn print_step_time(elapsed: Duration) {
    println!(
        "      {}",
        style(format!("({:.2}s)", elapsed.as_secs_f64())).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        style("✔").green().bold(),
        style("Done").white().bold()
    );
    println!();
}
