// src/source.rs
use anyhow::{Context, Result};
use glob::glob;
use std::{
    collections::HashSet,
    fs::{self, File},
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Input used when none is given on the command line.
pub const DEFAULT_INPUT: &str = "Trips.csv";

/// Tried in order when none of the named inputs can be opened.
pub const DEFAULT_FALLBACKS: [&str; 2] = ["Trips.csv", "trips.csv"];

fn is_glob_pattern(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

fn can_open(path: &Path) -> bool {
    path.is_file() && File::open(path).is_ok()
}

/// Expand every input into concrete paths. Plain paths are passed through
/// untouched (even if missing); glob patterns expand to the files they match,
/// in the order `glob` yields them.
pub fn expand_inputs<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if !is_glob_pattern(input) {
            paths.push(PathBuf::from(input));
            continue;
        }

        let before = paths.len();
        for entry in glob(input).with_context(|| format!("invalid glob pattern `{}`", input))? {
            match entry {
                Ok(p) if p.is_file() => paths.push(p),
                Ok(_) => {}
                Err(e) => warn!("cannot read glob entry: {:?}", e),
            }
        }
        debug!(pattern = input, matched = paths.len() - before, "expanded glob");
    }
    Ok(paths)
}

/// Work out which trip files a run should read.
///
/// Returns every named input that can be opened, once each: paths that
/// canonicalise to an already listed file are dropped, keeping the first
/// occurrence. If none can be opened, the first openable entry of
/// `fallbacks` is used instead. An empty result means the source is
/// unavailable; callers report empty results rather than fail.
pub fn resolve_sources<S, F>(inputs: &[S], fallbacks: &[F]) -> Result<Vec<PathBuf>>
where
    S: AsRef<str>,
    F: AsRef<Path>,
{
    let mut found = Vec::new();
    let mut seen = HashSet::new();
    for path in expand_inputs(inputs)? {
        if !can_open(&path) {
            warn!(path = %path.display(), "cannot open trip source");
            continue;
        }
        let canonical = fs::canonicalize(&path)
            .with_context(|| format!("resolving trip source {:?}", path))?;
        if seen.insert(canonical) {
            found.push(path);
        } else {
            debug!(path = %path.display(), "skipping duplicate trip source");
        }
    }
    if !found.is_empty() {
        return Ok(found);
    }

    for candidate in fallbacks {
        let candidate = candidate.as_ref();
        if can_open(candidate) {
            info!(path = %candidate.display(), "using fallback trip source");
            return Ok(vec![candidate.to_path_buf()]);
        }
    }

    warn!("no readable trip source found");
    Ok(Vec::new())
}
