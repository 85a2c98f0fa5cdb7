//! The row worker pool.
//!
//! Rows are claimed, not pre-assigned: the coordinator feeds every row
//! of the buffer into a bounded channel and closes it, and each worker
//! pulls the next row whenever it finishes one.  Rows near the set take
//! far longer than rows at the edge of the image, so this keeps every
//! thread busy until the very end.
//!
//! Each row travels as a mutable slice of the buffer, so a row is
//! written by exactly one worker and no locks are involved.  Escape
//! counts destined for the histogram go down a second bounded channel
//! to a single aggregator thread.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossbeam;
use crossbeam::channel::{bounded, Receiver, Sender};

use color::{BitDepth, Coloring};
use errors::RenderError;
use escape::{escape_time, Escape};
use fractal::Fractal;
use histogram::{aggregate, Histogram};
use num_cpus;
use planes::{derived_height, Pixel, PlaneMapper};

/// How many escape counts may be in flight to the aggregator before
/// workers start waiting on it.
pub const HISTOGRAM_BUFFER: usize = 100;

/// Everything that describes a single run.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Maximum iterations per point.
    pub limit: usize,
    /// Coloring policy.
    pub coloring: Coloring,
    /// Gray sample depth of the output.
    pub depth: BitDepth,
    /// Worker thread count.
    pub threads: usize,
    /// Where the PNG goes.
    pub output: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: 1600,
            height: derived_height(1600),
            limit: 1000,
            coloring: Coloring::Histogram,
            depth: BitDepth::Sixteen,
            threads: num_cpus::get(),
            output: PathBuf::from("image.png"),
        }
    }
}

impl RenderConfig {
    /// Sets the width and re-derives the height from it.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self.height = derived_height(width);
        self
    }
}

/// The outcome of the parallel phase.
#[derive(Debug)]
pub struct Rendered {
    /// Every pixel's escape result.
    pub fractal: Fractal,
    /// Escape-count frequencies, when they were collected.
    pub histogram: Option<Histogram>,
    /// Wall-clock time spent by the workers.
    pub elapsed: Duration,
}

/// Computes a whole fractal buffer across a pool of threads.
#[derive(Clone, Debug)]
pub struct RowRenderer {
    plane: PlaneMapper,
    limit: usize,
    threads: usize,
    histogram: bool,
}

impl RowRenderer {
    /// A renderer for `plane` at `limit` iterations using `threads`
    /// workers.  Histogram collection is on by default.
    pub fn new(plane: PlaneMapper, limit: usize, threads: usize) -> Self {
        RowRenderer {
            plane,
            limit,
            threads: threads.max(1),
            histogram: true,
        }
    }

    /// A renderer configured from a `RenderConfig`.  The histogram is
    /// only collected for histogram coloring.
    pub fn from_config(config: &RenderConfig) -> Result<Self, RenderError> {
        let plane = PlaneMapper::mandelbrot(config.width, config.height)?;
        Ok(RowRenderer::new(plane, config.limit, config.threads)
            .with_histogram(config.coloring == Coloring::Histogram))
    }

    /// Turns escape-count forwarding on or off.
    pub fn with_histogram(mut self, histogram: bool) -> Self {
        self.histogram = histogram;
        self
    }

    /// Fills one row.  Escaped counts are forwarded when there is
    /// somewhere to send them.
    fn render_row(&self, y: usize, row: &mut [Escape], counts: Option<&Sender<usize>>) {
        for (x, slot) in row.iter_mut().enumerate() {
            let point = self.plane.pixel_to_point(&Pixel(x, y));
            *slot = escape_time(point, self.limit);
            if let (Escape::Escaped(i), Some(counts)) = (*slot, counts) {
                // The aggregator only stops once every sender is gone,
                // so this cannot fail while we hold one.
                let _ = counts.send(i);
            }
        }
    }

    /// Worker loop: claim rows until the queue is closed and empty.
    fn work(&self, rows: Receiver<(usize, &mut [Escape])>, counts: Option<Sender<usize>>) {
        let mut done = 0;
        for (y, row) in rows.iter() {
            self.render_row(y, row, counts.as_ref());
            done += 1;
        }
        trace!("worker finished after {} rows", done);
    }

    /// Renders every pixel.  Blocks until all workers have finished and
    /// the aggregator, if any, has drained every count.
    pub fn render(&self) -> Result<Rendered, RenderError> {
        let mut fractal = Fractal::new(self.plane);
        debug!(
            "rendering {}x{} at {} iterations on {} threads",
            self.plane.width(),
            self.plane.height(),
            self.limit,
            self.threads
        );

        let limit = self.limit;
        let collect = self.histogram;
        let mut elapsed = Duration::from_secs(0);
        let rows: Vec<(usize, &mut [Escape])> = fractal.rows_mut().enumerate().collect();

        let histogram = crossbeam::scope(|spawner| {
            let (count_tx, count_rx) = bounded::<usize>(HISTOGRAM_BUFFER);
            let aggregator = if collect {
                Some(spawner.spawn(move |_| aggregate(count_rx, limit)))
            } else {
                drop(count_rx);
                None
            };

            let start = Instant::now();
            let (row_tx, row_rx) = bounded::<(usize, &mut [Escape])>(self.threads);
            let workers: Vec<_> = (0..self.threads)
                .map(|_| {
                    let claims = row_rx.clone();
                    let counts = if collect { Some(count_tx.clone()) } else { None };
                    spawner.spawn(move |_| self.work(claims, counts))
                })
                .collect();
            drop(row_rx);
            drop(count_tx);

            for row in rows {
                if row_tx.send(row).is_err() {
                    // Every worker is gone; the joins below report why.
                    break;
                }
            }
            drop(row_tx);

            let mut panicked = false;
            for worker in workers {
                panicked |= worker.join().is_err();
            }
            elapsed = start.elapsed();
            info!("parallel phase took {:.3}s", elapsed.as_secs_f64());

            // Workers are joined, so their senders are dropped and the
            // aggregator is at the end of its channel.
            let histogram = match aggregator {
                Some(handle) => match handle.join() {
                    Ok(h) => Some(h),
                    Err(_) => return Err(RenderError::WorkerPanic),
                },
                None => None,
            };
            if panicked {
                return Err(RenderError::WorkerPanic);
            }
            Ok(histogram)
        })
        .map_err(|_| RenderError::WorkerPanic)??;

        Ok(Rendered {
            fractal,
            histogram,
            elapsed,
        })
    }
}
