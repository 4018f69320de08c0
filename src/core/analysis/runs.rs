// src/core/analysis/runs.rs
//
// Shared run detection: maximal contiguous spans of frames satisfying a
// predicate. Silence and clipping detection are both built on this scan.

/// A maximal contiguous run of predicate-true frames.
/// `start` is inclusive, `end` exclusive, both in frame indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start: usize,
    pub end: usize,
}

impl Run {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Scan a per-frame level series in time order and return every maximal
/// run where `predicate(level)` holds.
///
/// Runs come back in time order, non-overlapping, each reported once.
/// A run still open at the end of the series is closed at the series end.
/// An empty series yields no runs; a series that is predicate-true
/// throughout yields exactly one run spanning it.
pub fn detect_runs<P>(levels: &[f64], predicate: P) -> Vec<Run>
where
    P: Fn(f64) -> bool,
{
    let mut runs = Vec::new();
    let mut current_start: Option<usize> = None;

    for (i, &level) in levels.iter().enumerate() {
        match (predicate(level), current_start) {
            (true, None) => current_start = Some(i),
            (false, Some(start)) => {
                runs.push(Run { start, end: i });
                current_start = None;
            }
            _ => {}
        }
    }

    if let Some(start) = current_start {
        runs.push(Run {
            start,
            end: levels.len(),
        });
    }

    runs
}
