use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use tabview_core::{
    Frequency, FrequencyResampler, NodePath, ResampleRule, Resampler, ResolveOptions, Session,
    TreeOptions, combine,
};
use tabview_ingest::{SampleOptions, load_file, load_into, sample_workspace, save_json, write_csv};
use tabview_model::{Table, Value};
use tracing::{debug, info, info_span};

use crate::cli::{CombineArgs, GenerateArgs, SelectArgs, TreeArgs};
use tabview_cli::summary::print_selection;

pub fn run_tree(args: &TreeArgs) -> Result<()> {
    let session = load_session(&args.files)?;
    let options = TreeOptions {
        expand_depth: args.depth,
    };
    print!("{}", session.tree().render(&options));
    Ok(())
}

/// Returns false when at least one path was rejected.
pub fn run_select(args: &SelectArgs, styled: bool) -> Result<bool> {
    let session = load_session(&args.files)?;
    let paths: Vec<NodePath> = args.paths.iter().map(|p| NodePath::parse(p)).collect();
    let options = ResolveOptions {
        separator: args.separator.clone(),
    };
    let resolution = session
        .resolve_with(&paths, &options)
        .context("resolve selection")?;
    debug!(
        columns = resolution.table.width(),
        rows = resolution.table.height(),
        rejected = resolution.rejected.len(),
        "resolved selection"
    );

    let table = match &args.resample {
        Some(frequency) => {
            let frequency: Frequency = frequency
                .parse()
                .with_context(|| format!("parse frequency '{frequency}'"))?;
            let resampler = FrequencyResampler::new(ResampleRule {
                frequency,
                aggregation: args.aggregation.into(),
            });
            resampler
                .resample(&resolution.table)
                .context("resample selection")?
        }
        None => resolution.table.clone(),
    };

    print_selection(&resolution, &table, styled)?;
    Ok(resolution.rejected.is_empty())
}

pub fn run_combine(args: &CombineArgs) -> Result<()> {
    let lhs = load_file(&args.lhs).with_context(|| format!("load {}", args.lhs.display()))?;
    let rhs = load_file(&args.rhs).with_context(|| format!("load {}", args.rhs.display()))?;
    let op = args.op.into();
    let result = combine(&lhs, &rhs, op)
        .ok_or_else(|| anyhow!("cannot {op} a {} and a {}", lhs.kind(), rhs.kind()))?;
    save_json(&args.output, &result)
        .with_context(|| format!("write {}", args.output.display()))?;
    info!(output = %args.output.display(), kind = %result.kind(), "wrote combined value");
    Ok(())
}

/// Writes every sample as JSON, and the series and table samples also as CSV.
pub fn run_generate(args: &GenerateArgs) -> Result<Vec<PathBuf>> {
    let span = info_span!("generate", seed = args.seed);
    let _guard = span.enter();
    std::fs::create_dir_all(&args.dir)
        .with_context(|| format!("create {}", args.dir.display()))?;
    let workspace =
        sample_workspace(args.seed, &SampleOptions::default()).context("build samples")?;

    let mut written = Vec::new();
    for (name, value) in workspace.iter() {
        let path = args.dir.join(format!("{name}.json"));
        save_json(&path, value).with_context(|| format!("write {}", path.display()))?;
        written.push(path);

        let csv_table = match value {
            Value::Table(table) => Some(table.clone()),
            Value::Series(series) => Some(
                Table::from_series([(name, Arc::clone(series))])
                    .context("series as table")?,
            ),
            Value::Cube(_) | Value::Collection(_) => None,
        };
        if let Some(table) = csv_table {
            let path = args.dir.join(format!("{name}.csv"));
            write_csv(&path, &table).with_context(|| format!("write {}", path.display()))?;
            written.push(path);
        }
    }
    info!(files = written.len(), dir = %args.dir.display(), "wrote samples");
    Ok(written)
}

fn load_session(files: &[PathBuf]) -> Result<Session> {
    let mut session = Session::new();
    for path in files {
        load_into(&mut session, path).with_context(|| format!("load {}", path.display()))?;
    }
    Ok(session)
}
