//! # Validate Subcommand
//!
//! Schema and rule validation of exam batch files.
//!
//! ```bash
//! aigp validate --schema schemas/aigp-exam-batch.schema.json 'data/**/*.json'
//! aigp validate --schema s.json --expect-20q-domain-mix --strict-analytics exam3.*.json
//! aigp --config aigp.yaml validate --format json data/*.json
//! ```
//!
//! Issues go to stdout; diagnostics go to the tracing subscriber on stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use aigp_schema::SchemaValidator;

use crate::config::ValidatorConfig;
use crate::discover::resolve_files;
use crate::report::OutputFormat;
use crate::run::ValidationRun;
use crate::EXIT_USAGE;

/// Arguments for the `aigp validate` subcommand.
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Batch JSON Schema. Required unless the config file names one.
    #[arg(long, value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Require the 4/6/6/4 domain mix (I/II/III/IV) in 20-question batches.
    #[arg(long = "expect-20q-domain-mix")]
    pub expect_20q_domain_mix: bool,

    /// Require the analytics block to match one recomputed from the questions.
    #[arg(long)]
    pub strict_analytics: bool,

    /// Report answer keys with a long run of the same letter.
    #[arg(long)]
    pub strict_pattern: bool,

    /// Longest tolerated same-letter run for --strict-pattern [default: 4].
    #[arg(long, value_name = "N")]
    pub max_answer_run: Option<usize>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Batch files or glob patterns (quote patterns to let aigp expand `**`).
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<String>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when every file is clean, 1 when any issue was
/// found, 2 when no file matched.
///
/// # Errors
///
/// Fails when no schema is configured, the schema cannot be compiled, or
/// the options are inconsistent. The binary maps these to exit code 2.
pub fn run_validate(args: &ValidateArgs, config: &ValidatorConfig) -> Result<u8> {
    let options = config.rule_options(args)?;
    let schema_path = config
        .schema_for(args)
        .context("no schema given: pass --schema or set `schema` in the config file")?;

    let schema = SchemaValidator::from_file(&schema_path)
        .with_context(|| format!("failed to load schema {}", schema_path.display()))?;

    let files = resolve_files(&args.files);
    if files.is_empty() {
        eprintln!("No files found to validate.");
        return Ok(EXIT_USAGE);
    }

    tracing::info!(
        files = files.len(),
        schema = %schema_path.display(),
        ?options,
        "starting validation run"
    );

    let mut run = ValidationRun::new(&schema, options);
    run.check_all(&files);
    let report = run.finish();

    print!("{}", report.render(args.format));
    Ok(report.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn repo_root() -> PathBuf {
        let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        dir.pop(); // crates/
        dir.pop(); // repo root
        dir
    }

    fn args_for(files: Vec<String>) -> ValidateArgs {
        ValidateArgs {
            schema: Some(repo_root().join("schemas/aigp-exam-batch.schema.json")),
            files,
            ..ValidateArgs::default()
        }
    }

    fn copy_sample(dir: &Path, name: &str) -> PathBuf {
        let dest = dir.join(name);
        std::fs::copy(repo_root().join("data/samples/exam-sample-1.json"), &dest).unwrap();
        dest
    }

    #[test]
    fn sample_batches_pass_every_check() {
        let mut args = args_for(vec![repo_root()
            .join("data/samples/*.json")
            .display()
            .to_string()]);
        args.expect_20q_domain_mix = true;
        args.strict_analytics = true;
        args.strict_pattern = true;

        let code = run_validate(&args, &ValidatorConfig::default()).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn no_matching_files_exits_2() {
        let dir = tempfile::tempdir().unwrap();
        let args = args_for(vec![format!("{}/*.json", dir.path().display())]);
        let code = run_validate(&args, &ValidatorConfig::default()).unwrap();
        assert_eq!(code, 2);
    }

    #[test]
    fn same_batch_twice_exits_1_on_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        copy_sample(dir.path(), "exam3.1.json");
        copy_sample(dir.path(), "exam3.2.json");

        let args = args_for(vec![format!("{}/*.json", dir.path().display())]);
        let code = run_validate(&args, &ValidatorConfig::default()).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn listing_one_file_twice_checks_it_once() {
        let dir = tempfile::tempdir().unwrap();
        let only = copy_sample(dir.path(), "exam.json");
        let literal = only.display().to_string();

        let args = args_for(vec![literal.clone(), literal]);
        let code = run_validate(&args, &ValidatorConfig::default()).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn unparsable_file_exits_1() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, b"not json").unwrap();

        let args = args_for(vec![path.display().to_string()]);
        let code = run_validate(&args, &ValidatorConfig::default()).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn missing_schema_is_an_error() {
        let args = ValidateArgs {
            files: vec!["whatever.json".to_string()],
            ..ValidateArgs::default()
        };
        let err = run_validate(&args, &ValidatorConfig::default()).unwrap_err();
        assert!(err.to_string().contains("no schema given"));
    }

    #[test]
    fn unreadable_schema_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = ValidateArgs {
            schema: Some(dir.path().join("absent.schema.json")),
            files: vec!["whatever.json".to_string()],
            ..ValidateArgs::default()
        };
        let err = run_validate(&args, &ValidatorConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load schema"));
    }

    #[test]
    fn config_supplies_schema_and_strictness() {
        let config = ValidatorConfig {
            schema: Some(repo_root().join("schemas/aigp-exam-batch.schema.json")),
            strict_analytics: true,
            ..ValidatorConfig::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let path = copy_sample(dir.path(), "exam.json");

        // Drop the analytics block: strict analytics from config must catch it.
        let mut doc: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        doc.as_object_mut().unwrap().remove("analytics");
        std::fs::write(&path, serde_json::to_vec(&doc).unwrap()).unwrap();

        let args = ValidateArgs {
            files: vec![path.display().to_string()],
            ..ValidateArgs::default()
        };
        assert_eq!(run_validate(&args, &config).unwrap(), 1);
        assert!(run_validate(&args, &ValidatorConfig::default()).is_err());
    }
}
