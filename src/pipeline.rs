use crate::checker::{FileOutcome, SpellScanner};
use crate::error::ScanError;
use crate::sink::FindingSink;
use crate::walker;
use crate::ScanSummary;
use rayon::ThreadPoolBuilder;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Outstanding-work counter shared by the walker and the scan tasks.
///
/// The walker calls [`WorkGroup::add`] before spawning a task and hands the
/// returned guard to it; dropping the guard marks the unit as done, including
/// when a task unwinds. The join itself is the enclosing `rayon` scope; this
/// counter is the accounting that [`run`] checks once the scope has returned.
#[derive(Debug, Default)]
pub struct WorkGroup {
    pending: AtomicUsize,
}

impl WorkGroup {
    pub fn add(&self) -> WorkGuard<'_> {
        self.pending.fetch_add(1, Ordering::SeqCst);
        WorkGuard { group: self }
    }

    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }
}

#[must_use = "dropping the guard immediately marks the work as done"]
#[derive(Debug)]
pub struct WorkGuard<'a> {
    group: &'a WorkGroup,
}

impl Drop for WorkGuard<'_> {
    fn drop(&mut self) {
        self.group.pending.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Default)]
struct Counters {
    scanned: AtomicUsize,
    skipped: AtomicUsize,
    failed: AtomicUsize,
    findings: AtomicUsize,
}

impl Counters {
    fn record(&self, outcome: Result<FileOutcome, ScanError>) {
        match outcome {
            Ok(FileOutcome::Scanned { findings }) => {
                self.scanned.fetch_add(1, Ordering::Relaxed);
                self.findings.fetch_add(findings, Ordering::Relaxed);
            }
            Ok(FileOutcome::Binary) => {
                self.skipped.fetch_add(1, Ordering::Relaxed);
            }
            Err(err) => {
                log::warn!("{}", err);
                self.failed.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

/// Walk every root and scan each regular file on its own task.
///
/// `jobs` caps how many files are scanned at once (`None` uses one thread per
/// CPU). Returns only after every spawned scan has finished.
pub fn run(
    scanner: &SpellScanner,
    roots: &[PathBuf],
    jobs: Option<usize>,
    sink: &dyn FindingSink,
) -> Result<ScanSummary, ScanError> {
    let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("spellfix-scan-{}", i));
    if let Some(jobs) = jobs {
        builder = builder.num_threads(jobs);
    }
    let pool = builder.build()?;

    let group = WorkGroup::default();
    let counters = Counters::default();
    let mut walk_errors = 0;

    {
        let group = &group;
        let counters = &counters;
        let walk_errors = &mut walk_errors;

        pool.scope(|scope| {
            for root in roots {
                let stats = walker::walk(root, |path| {
                    let guard = group.add();
                    scope.spawn(move |_| {
                        let _guard = guard;
                        counters.record(scanner.scan_file(&path, sink));
                    });
                });
                *walk_errors += stats.errors;
            }
        });
    }

    let leaked = group.pending();
    if leaked != 0 {
        log::error!("{} scan tasks still registered after join", leaked);
    }
    debug_assert_eq!(leaked, 0);

    let summary = ScanSummary {
        files_scanned: counters.scanned.into_inner(),
        files_skipped: counters.skipped.into_inner(),
        files_failed: counters.failed.into_inner(),
        walk_errors,
        findings: counters.findings.into_inner(),
    };
    log::info!(
        "Scanned {} files ({} binary skipped, {} unreadable), {} findings",
        summary.files_scanned,
        summary.files_skipped,
        summary.files_failed,
        summary.findings
    );
    Ok(summary)
}
