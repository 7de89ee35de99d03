mod config;
mod error;
mod scanner;

pub use config::{Config, OutputConfig, SourceConfig, CONFIG_FILE};
pub use error::{CodegenError, Result};
pub use scanner::{
    listing, scan_file, scan_source, Expansion, FileReport, Scanner, StructReport, ATTRIBUTE,
};

use console::style;
use std::path::Path;

pub fn check(config: &Config) -> Result<()> {
    let mut scanner = Scanner::new();
    scanner.check(config)
}

pub fn generate(config: &Config) -> Result<()> {
    let mut scanner = Scanner::new();
    scanner.generate(config)
}

/// Renders the constructors generated for one file. Structs that fail to
/// expand are listed with their diagnostic instead.
pub fn expand_file(path: &Path) -> Result<String> {
    let report = scan_file(path)?;
    let mut out = String::new();

    for item in &report.structs {
        match &item.outcome {
            Ok(expansion) => {
                out.push_str(&format!("// {}:{} {}\n", path.display(), item.line, item.name));
                out.push_str(&expansion.listing);
                out.push('\n');
            }
            Err(err) => {
                out.push_str(&format!(
                    "// {}:{} {}: error\n",
                    path.display(),
                    item.line,
                    item.name
                ));
                for line in err.report().lines() {
                    out.push_str(&format!("//   {}\n", line));
                }
                out.push('\n');
            }
        }
    }

    Ok(out)
}

pub fn watch(config: &Config) -> Result<()> {
    use notify::{
        event::{EventKind, ModifyKind},
        Config as NotifyConfig, RecommendedWatcher, RecursiveMode, Watcher,
    };

    println!("{}", style("memberwise").green().bold());
    println!("  {} Initial generation...", style("➜").green());
    report_generation(config);

    println!("  {} Watching for changes...", style("➜").cyan());
    let (tx, rx) = std::sync::mpsc::channel();

    let mut watcher = RecommendedWatcher::new(tx, NotifyConfig::default())?;
    for dir in &config.source.paths {
        watcher.watch(dir, RecursiveMode::Recursive)?;
    }

    let output_path = config
        .output
        .as_ref()
        .map(|output| output.path.canonicalize().unwrap_or_else(|_| output.path.clone()));
    let cwd = std::env::current_dir()?;

    for res in rx {
        match res {
            Ok(event) => {
                if output_path
                    .as_ref()
                    .is_some_and(|output| event.paths.contains(output))
                {
                    continue;
                }

                if !matches!(event.kind, EventKind::Modify(ModifyKind::Data(_))) {
                    continue;
                }

                let Some(changed_path) = event
                    .paths
                    .iter()
                    .find(|path| path.extension().is_some_and(|ext| ext == "rs"))
                else {
                    continue;
                };

                let relative_path = changed_path.strip_prefix(&cwd).unwrap_or(changed_path);
                println!(
                    "\n{} Changed: {}",
                    style("[⚡️GEN]").yellow().bold(),
                    style(relative_path.display()).cyan()
                );

                report_generation(config);
            }
            Err(e) => println!("  {} Watch error: {}", style("✖").red(), style(e).red()),
        }
    }

    Ok(())
}

fn report_generation(config: &Config) {
    match generate(config) {
        Ok(()) => println!("  {} Constructors regenerated successfully", style("➜").green()),
        Err(e) => println!("  {} Generation failed: {}", style("✖").red(), style(e).red()),
    }
}
