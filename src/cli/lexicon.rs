//! Lexicon command - validate and list the active pattern lexicon

use anyhow::Result;
use console::style;
use stylecoach::config::StyleConfig;
use stylecoach::lexicon::builtin_versions;

pub fn run(config: &StyleConfig, verbose: bool) -> Result<()> {
    let lexicon = config.load_lexicon()?;

    println!(
        "\n{} Lexicon {} ({} patterns)",
        style("✓").green(),
        style(lexicon.version()).cyan().bold(),
        lexicon.rule_count()
    );
    if let Some(description) = lexicon.description() {
        println!("  {}", style(description).dim());
    }
    match config.lexicon_path() {
        Some(path) => println!("  Source: {}", path.display()),
        None => println!("  Source: built-in (available: {})", builtin_versions().join(", ")),
    }
    println!();

    for (category, rules) in lexicon.iter() {
        println!(
            "  {:<24} {:>3} patterns",
            style(category.label()).bold(),
            rules.len()
        );
        if verbose {
            for rule in rules {
                println!("      {:<28} {}", rule.pattern, style(format!("×{}", rule.weight)).dim());
            }
        }
    }
    println!();
    Ok(())
}
