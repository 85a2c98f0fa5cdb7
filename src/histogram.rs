//! Iteration-count histogram and the aggregator that fills it.
//!
//! Workers never touch the histogram directly.  They forward each
//! escape count down a bounded channel, and a single aggregator
//! thread owns the counters and increments them.  When every sender
//! has been dropped the aggregator has seen every count, and it hands
//! the finished histogram back to whoever joined it.

use crossbeam::channel::Receiver;

/// Frequency of every escape iteration in `0..limit`.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    counts: Vec<u64>,
}

impl Histogram {
    /// An empty histogram with one counter per possible escape count.
    pub fn new(limit: usize) -> Self {
        Histogram {
            counts: vec![0; limit],
        }
    }

    /// Count one escape at iteration `i`.
    pub fn record(&mut self, i: usize) {
        self.counts[i] += 1;
    }

    /// How many pixels escaped at iteration `i`.
    pub fn count(&self, i: usize) -> u64 {
        self.counts[i]
    }

    /// The number of counters, which is the iteration limit.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Total number of escaped pixels seen.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// The cumulative distribution of escape counts.
    pub fn cumulative(&self) -> CumulativeTable {
        CumulativeTable::new(self)
    }
}

/// Drains `counts` into a fresh histogram.  Returns once the channel is
/// closed and empty, so the result holds every count that was sent.
pub fn aggregate(counts: Receiver<usize>, limit: usize) -> Histogram {
    let mut histogram = Histogram::new(limit);
    for i in counts.iter() {
        histogram.record(i);
    }
    debug!("aggregator drained {} counts", histogram.total());
    histogram
}

/// Entry `i` is the fraction of escaped pixels that escaped strictly
/// before iteration `i`.  Built once, read-only afterward.
#[derive(Clone, Debug, PartialEq)]
pub struct CumulativeTable {
    fractions: Vec<f64>,
}

impl CumulativeTable {
    /// Builds the table with a running sum.  Each term is divided by
    /// the total before it is added, so entry `i` is bit-for-bit the
    /// left-to-right sum of `histogram[j] / total` over `j < i`.  With
    /// nothing escaped every fraction is zero.
    pub fn new(histogram: &Histogram) -> Self {
        let total = histogram.total();
        let mut fractions = Vec::with_capacity(histogram.len());
        let mut running = 0.0_f64;
        for &count in &histogram.counts {
            fractions.push(running);
            if total > 0 {
                running += (count as f64) / (total as f64);
            }
        }
        CumulativeTable { fractions }
    }

    /// The cumulative fraction for escape iteration `i`.
    pub fn fraction(&self, i: usize) -> f64 {
        self.fractions[i]
    }

    /// Number of entries, which is the iteration limit.
    pub fn len(&self) -> usize {
        self.fractions.len()
    }
}
