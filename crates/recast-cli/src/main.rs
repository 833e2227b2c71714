//! recast — apply Java migration recipes to a project tree.
//!
//! Resolves configuration (defaults < `recast.toml` < environment <
//! flags), selects the recipe for the target version, walks the
//! project's source directory plus its build descriptors, and rewrites
//! files in place unless `--dry-run` is set.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use ignore::WalkBuilder;
use tracing_subscriber::EnvFilter;

use recast_core::config::{CliOverrides, MigrationConfig};
use recast_core::recipe::ExecutionContext;
use recast_migrate::MigrationEngine;

/// Filenames at the project root that version rules may rewrite.
const BUILD_DESCRIPTORS: [&str; 3] = ["pom.xml", "build.gradle", "build.gradle.kts"];

#[derive(Parser, Debug)]
#[command(name = "recast", version, about = "Apply Java migration recipes to a project")]
struct Args {
    /// Project root to migrate.
    project_path: PathBuf,

    /// Target Java version (11, 17, and 21 have curated bundles).
    #[arg(long, short = 't')]
    target_version: Option<u32>,

    /// Source directory, relative to the project root.
    #[arg(long)]
    src: Option<String>,

    /// Report what would change without writing anything.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("recast: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let overrides = CliOverrides {
        target_version: args.target_version,
        source_dir: args.src.clone(),
        dry_run: args.dry_run.then_some(true),
    };
    let config = MigrationConfig::load(&args.project_path, Some(&overrides))
        .context("loading configuration")?;

    let engine = MigrationEngine::new(config.target_version, &config.base64)
        .context("building recipe")?;
    let recipe = engine.recipe();
    println!("Recipe: {}", recipe.display_name());
    println!("  {}", recipe.description());
    let effort = recipe.estimated_effort();
    if !effort.is_zero() {
        println!("  Estimated manual follow-up: {} min", effort.as_secs() / 60);
    }

    let files = collect_files(&args.project_path, &config.source_dir);
    if files.is_empty() {
        println!("No candidate files under {}", args.project_path.display());
        return Ok(());
    }

    let mut ctx = ExecutionContext::new();
    let mut changed = 0usize;
    for path in &files {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let outcome = engine.run_file(&path.display().to_string(), &bytes, &mut ctx)?;
        if outcome.changed {
            changed += 1;
            if config.dry_run {
                println!("would modify {}", path.display());
            } else {
                std::fs::write(path, outcome.content.as_bytes())
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("modified {}", path.display());
            }
        }
    }

    let reviews = ctx.manual_reviews();
    if !reviews.is_empty() {
        println!("\n{} file(s) need manual review:", reviews.len());
        for (path, reason) in reviews {
            println!("  {path}: {reason}");
        }
    }

    println!(
        "\n{changed} of {} file(s) {}",
        files.len(),
        if config.dry_run { "would change" } else { "changed" }
    );
    Ok(())
}

/// Every `.java` file under `<root>/<source_dir>`, respecting ignore
/// files, plus whichever build descriptors exist at the root. Sorted
/// for deterministic processing order.
fn collect_files(root: &Path, source_dir: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let src_root = root.join(source_dir);
    if src_root.is_dir() {
        for entry in WalkBuilder::new(&src_root).build().flatten() {
            let path = entry.into_path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "java") {
                files.push(path);
            }
        }
    } else {
        tracing::warn!(path = %src_root.display(), "source directory not found");
    }

    for name in BUILD_DESCRIPTORS {
        let descriptor = root.join(name);
        if descriptor.is_file() {
            files.push(descriptor);
        }
    }

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (rel, content) in files {
            let path = dir.path().join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }
        dir
    }

    #[test]
    fn test_collect_files_finds_sources_and_descriptors() {
        let dir = project(&[
            ("src/main/java/com/app/A.java", "class A {}"),
            ("src/main/java/com/app/B.java", "class B {}"),
            ("src/main/java/notes.txt", "skip me"),
            ("pom.xml", "<project/>"),
        ]);
        let files = collect_files(dir.path(), "src/main/java");
        assert_eq!(files.len(), 3);
        assert!(files.iter().any(|p| p.ends_with("A.java")));
        assert!(files.iter().any(|p| p.ends_with("B.java")));
        assert!(files.iter().any(|p| p.ends_with("pom.xml")));
    }

    #[test]
    fn test_collect_files_missing_source_dir_still_yields_descriptors() {
        let dir = project(&[("build.gradle", "sourceCompatibility = 8")]);
        let files = collect_files(dir.path(), "src/main/java");
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("build.gradle"));
    }

    #[test]
    fn test_run_rewrites_project_in_place() {
        let dir = project(&[
            (
                "src/main/java/S.java",
                "import sun.misc.BASE64Encoder;\nBASE64Encoder enc = new BASE64Encoder();\nString s = enc.encode(data);\n",
            ),
            ("pom.xml", "<maven.compiler.source>8</maven.compiler.source>"),
        ]);
        let args = Args {
            project_path: dir.path().to_path_buf(),
            target_version: Some(17),
            src: None,
            dry_run: false,
        };
        run(&args).unwrap();

        let pom = std::fs::read_to_string(dir.path().join("pom.xml")).unwrap();
        assert_eq!(pom, "<maven.compiler.source>17</maven.compiler.source>");
        let java = std::fs::read_to_string(dir.path().join("src/main/java/S.java")).unwrap();
        assert!(java.contains("import java.util.Base64;"));
        assert!(java.contains("Base64.getEncoder().encodeToString(data)"));
    }

    #[test]
    fn test_dry_run_leaves_files_untouched() {
        let before = "<maven.compiler.source>8</maven.compiler.source>";
        let dir = project(&[("pom.xml", before)]);
        let args = Args {
            project_path: dir.path().to_path_buf(),
            target_version: Some(17),
            src: None,
            dry_run: true,
        };
        run(&args).unwrap();
        let after = std::fs::read_to_string(dir.path().join("pom.xml")).unwrap();
        assert_eq!(after, before);
    }
}
