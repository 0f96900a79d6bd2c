use crate::error::SummaryError;
use crate::summary::aggregate::{Aggregator, RunStats};
use crate::summary::bucket_set::BucketSet;
use crate::summary::classify::Classifier;
use std::convert::Infallible;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::thread;

/// Where log lines come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSource {
    Stdin,
    File(PathBuf),
}

impl LogSource {
    pub fn path(&self) -> &Path {
        match self {
            LogSource::Stdin => Path::new("-"),
            LogSource::File(path) => path,
        }
    }

    /// Open the source. Nothing has been aggregated if this fails.
    pub fn open(&self) -> Result<Box<dyn BufRead>, SummaryError> {
        match self {
            LogSource::Stdin => Ok(Box::new(BufReader::new(io::stdin()))),
            LogSource::File(path) => {
                let file = File::open(path).map_err(|source| SummaryError::Source {
                    path: path.clone(),
                    source,
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

impl FromStr for LogSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "-" => LogSource::Stdin,
            path => LogSource::File(PathBuf::from(path)),
        })
    }
}

impl fmt::Display for LogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogSource::Stdin => f.write_str("<stdin>"),
            LogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Worker threads; 1 reads and folds line by line.
    pub jobs: usize,
    /// Abort on the first malformed line instead of skipping it.
    pub strict: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            strict: false,
        }
    }
}

/// Everything a single pass produced.
#[derive(Debug, Clone)]
pub struct Summary {
    pub buckets: BucketSet,
    pub stats: RunStats,
}

pub fn summarize(
    source: &LogSource,
    classifier: Arc<Classifier>,
    options: RunOptions,
) -> Result<Summary, SummaryError> {
    let reader = source.open()?;

    let aggregator = if options.jobs > 1 {
        aggregate_parallel(reader, source.path(), classifier, options)?
    } else {
        aggregate_reader(reader, source.path(), classifier, options.strict)?
    };

    let (buckets, stats) = aggregator.into_parts();

    if stats.skipped > 0 {
        tracing::warn!(
            skipped = stats.skipped,
            "{source}: skipped {} malformed lines",
            stats.skipped
        );
    }
    tracing::info!(
        lines = stats.lines,
        parsed = stats.parsed,
        skipped = stats.skipped,
        first = ?stats.first_timestamp,
        last = ?stats.last_timestamp,
        "finished reading {source}"
    );

    Ok(Summary { buckets, stats })
}

/// Fold every line of `reader` in order.
pub fn aggregate_reader<R: BufRead>(
    mut reader: R,
    path: &Path,
    classifier: Arc<Classifier>,
    strict: bool,
) -> Result<Aggregator, SummaryError> {
    let mut aggregator = Aggregator::new(classifier);
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| SummaryError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        if read == 0 {
            break;
        }

        line_no += 1;
        fold_line(&mut aggregator, line_no, &buf, strict)?;
    }

    Ok(aggregator)
}

/// Split the input into contiguous chunks, fold each on its own thread and
/// merge the partial results in input order.
fn aggregate_parallel<R: Read>(
    mut reader: R,
    path: &Path,
    classifier: Arc<Classifier>,
    options: RunOptions,
) -> Result<Aggregator, SummaryError> {
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .map_err(|source| SummaryError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let lines: Vec<&[u8]> = data.split_inclusive(|b| *b == b'\n').collect();
    let chunk_len = lines.len().div_ceil(options.jobs).max(1);

    tracing::debug!(
        lines = lines.len(),
        jobs = options.jobs,
        chunk_len,
        "aggregating in parallel"
    );

    let partials: Vec<Result<Aggregator, SummaryError>> = thread::scope(|scope| {
        let handles: Vec<_> = lines
            .chunks(chunk_len)
            .enumerate()
            .map(|(i, chunk)| {
                let classifier = Arc::clone(&classifier);
                let offset = (i * chunk_len) as u64;

                scope.spawn(move || {
                    let mut aggregator = Aggregator::new(classifier);
                    for (j, line) in chunk.iter().enumerate() {
                        fold_line(&mut aggregator, offset + j as u64 + 1, line, options.strict)?;
                    }
                    Ok(aggregator)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    });

    // Chunk order is input order, so the first error is the earliest line.
    let mut merged = Aggregator::new(classifier);
    for partial in partials {
        merged.merge(partial?);
    }

    Ok(merged)
}

fn fold_line(
    aggregator: &mut Aggregator,
    line_no: u64,
    line: &[u8],
    strict: bool,
) -> Result<(), SummaryError> {
    if let Err(e) = aggregator.process_line(line) {
        if strict {
            return Err(SummaryError::Malformed {
                line: line_no,
                source: e,
            });
        }
        tracing::debug!(line = line_no, "skipping malformed line: {e}");
    }
    Ok(())
}
