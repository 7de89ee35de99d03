use crate::config::Config;
use crate::error::{CodegenError, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use memberwise_core::prelude::{analyze, ConstructorPlan, MemberwiseError};
use memberwise_core::{synthesizer, tokens::source_text};
use quote::{quote, ToTokens};
use std::fs;
use std::path::{Path, PathBuf};
use syn::{Attribute, Item, ItemStruct, Meta};
use walkdir::WalkDir;

/// Name of the attribute the scanner looks for.
pub const ATTRIBUTE: &str = "memberwise_init";

/// Result of running the engine on one annotated struct.
#[derive(Debug)]
pub struct StructReport {
    pub name: String,
    /// 1-based line of the struct name, or of the error when it has one.
    pub line: usize,
    pub outcome: std::result::Result<Expansion, MemberwiseError>,
}

#[derive(Debug, Clone)]
pub struct Expansion {
    /// `pub fn new(host: String, port: u16 = 8080)`
    pub signature: String,
    /// The `impl` block holding the constructor, as Rust source.
    pub listing: String,
}

impl StructReport {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub structs: Vec<StructReport>,
}

impl FileReport {
    pub fn failures(&self) -> usize {
        self.structs.iter().filter(|report| !report.is_ok()).count()
    }
}

/// Parses one Rust source file and expands every `#[memberwise_init]` struct
/// in it, including those in inline modules.
pub fn scan_source(text: &str) -> syn::Result<Vec<StructReport>> {
    let file = syn::parse_file(text)?;
    let mut reports = Vec::new();
    scan_items(&file.items, &mut reports);
    Ok(reports)
}

fn scan_items(items: &[Item], reports: &mut Vec<StructReport>) {
    for item in items {
        match item {
            Item::Struct(item) => {
                if let Some(report) = scan_struct(item) {
                    reports.push(report);
                }
            }
            Item::Mod(module) => {
                if let Some((_, items)) = &module.content {
                    scan_items(items, reports);
                }
            }
            _ => {}
        }
    }
}

fn scan_struct(item: &ItemStruct) -> Option<StructReport> {
    let position = item.attrs.iter().position(is_memberwise_attr)?;

    let mut item = item.clone();
    let attr = item.attrs.remove(position);
    let args = match attr.meta {
        Meta::List(list) => list.tokens,
        _ => proc_macro2::TokenStream::new(),
    };

    let name = item.ident.to_string();
    let struct_line = item.ident.span().start().line;
    tracing::debug!(name = %name, line = struct_line, "expanding");

    let outcome = expand_struct(args, &item);
    let line = match &outcome {
        Err(err) if err.span().start().line > 0 => err.span().start().line,
        _ => struct_line,
    };

    Some(StructReport {
        name,
        line,
        outcome,
    })
}

fn is_memberwise_attr(attr: &Attribute) -> bool {
    attr.path()
        .segments
        .last()
        .is_some_and(|segment| segment.ident == ATTRIBUTE)
}

fn expand_struct(
    args: proc_macro2::TokenStream,
    item: &ItemStruct,
) -> std::result::Result<Expansion, MemberwiseError> {
    let analysis = analyze(args, item.to_token_stream())?;
    let plan = ConstructorPlan::new(&analysis.classification, analysis.directives.access);
    // Same path as the attribute, so anything that fails to emit is reported here too.
    synthesizer::emit(&analysis.host, &analysis.classification, &plan)?;

    let ident = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    let header = source_text(&quote!(impl #impl_generics #ident #ty_generics #where_clause));

    let mut listing = format!("{} {{\n", header);
    for line in plan.render().lines() {
        if line.is_empty() {
            listing.push('\n');
        } else {
            listing.push_str("    ");
            listing.push_str(line);
            listing.push('\n');
        }
    }
    listing.push_str("}\n");

    Ok(Expansion {
        signature: plan.describe(),
        listing,
    })
}

/// Reads and scans one file.
pub fn scan_file(path: &Path) -> Result<FileReport> {
    let content = fs::read_to_string(path)?;
    let structs = scan_source(&content).map_err(|err| CodegenError::Parse {
        path: path.to_path_buf(),
        line: err.span().start().line,
        message: err.to_string(),
    })?;
    Ok(FileReport {
        path: path.to_path_buf(),
        structs,
    })
}

/// Collects the reports of every annotated struct under the configured
/// source paths.
pub struct Scanner {
    files: Vec<FileReport>,
    failures: usize,
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            failures: 0,
        }
    }

    pub fn files(&self) -> &[FileReport] {
        &self.files
    }

    pub fn check(&mut self, config: &Config) -> Result<()> {
        self.scan_source_files(&config.source.paths)?;

        if self.failures > 0 {
            return Err(CodegenError::Failed(self.failures));
        }
        Ok(())
    }

    pub fn generate(&mut self, config: &Config) -> Result<()> {
        self.check(config)?;

        match &config.output {
            Some(output) => self.generate_output(&output.path),
            None => {
                tracing::info!("no output path configured, skipping listing");
                Ok(())
            }
        }
    }

    fn scan_source_files(&mut self, dirs: &[PathBuf]) -> Result<()> {
        let mut paths = Vec::new();
        for dir in dirs {
            let walker = WalkDir::new(dir)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| entry.file_name() != "target");
            for entry in walker {
                let entry = entry.map_err(|_| CodegenError::InvalidPath(dir.clone()))?;
                if entry.file_type().is_file()
                    && entry.path().extension().is_some_and(|ext| ext == "rs")
                {
                    paths.push(entry.into_path());
                }
            }
        }

        let bar = ProgressBar::new(paths.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?,
        );

        for path in paths {
            bar.set_message(path.display().to_string());
            match scan_file(&path) {
                Ok(report) => {
                    for failed in report.structs.iter().filter(|s| !s.is_ok()) {
                        if let Err(err) = &failed.outcome {
                            bar.suspend(|| print_diagnostic(&report.path, failed, err));
                        }
                    }
                    self.failures += report.failures();
                    if !report.structs.is_empty() {
                        self.files.push(report);
                    }
                }
                Err(err @ CodegenError::Parse { .. }) => {
                    bar.suspend(|| {
                        eprintln!("  {} {}", style("✖").red(), style(&err).red());
                    });
                    self.failures += 1;
                }
                Err(err) => {
                    bar.finish_and_clear();
                    return Err(err);
                }
            }
            bar.inc(1);
        }

        bar.finish_and_clear();
        tracing::info!(
            files = self.files.len(),
            structs = self.files.iter().map(|f| f.structs.len()).sum::<usize>(),
            failures = self.failures,
            "scan finished"
        );
        Ok(())
    }

    fn generate_output(&self, path: &Path) -> Result<()> {
        let mut content = String::new();
        content.push_str("// Generated by memberwise. Do not edit.\n");
        content.push_str(&listing(&self.files));
        fs::write(path, content)?;
        tracing::info!(path = %path.display(), "wrote expansion listing");
        Ok(())
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the expansions of `files`, grouped by file.
pub fn listing(files: &[FileReport]) -> String {
    let mut content = String::new();
    for file in files {
        content.push_str(&format!("\n// {}\n", file.path.display()));
        for report in &file.structs {
            if let Ok(expansion) = &report.outcome {
                content.push_str(&format!(
                    "\n// {}:{} {}\n{}",
                    file.path.display(),
                    report.line,
                    report.name,
                    expansion.listing
                ));
            }
        }
    }
    content
}

fn print_diagnostic(path: &Path, report: &StructReport, err: &MemberwiseError) {
    eprintln!(
        "\n{} {}:{} {}",
        style("error").red().bold(),
        path.display(),
        report.line,
        style(&report.name).cyan()
    );
    for line in err.report().lines() {
        eprintln!("  {}", line);
    }
}
