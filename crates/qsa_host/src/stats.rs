//! Cycle-count statistics for feedback-loop profiling.
//!
//! Collects per-operation clock-tick measurements and reports min, max,
//! average and a histogram, so cycle-budget regressions in the control
//! path show up as a shifted distribution rather than a buried average.

/// Tracks clock-cycle statistics with minimal overhead.
pub struct CycleStats {
    pub min: u64,
    pub max: u64,
    pub sum: u64,
    pub count: u64,
    pub buckets: [u64; 16],
}

/// Histogram bucket width, in clock ticks.
const BUCKET_TICKS: u64 = 4;

impl CycleStats {
    /// Creates an empty tracker. Min starts at u64::MAX so the first
    /// measurement becomes the minimum.
    pub fn new() -> Self {
        Self {
            min: u64::MAX,
            max: 0,
            sum: 0,
            count: 0,
            buckets: [0; 16],
        }
    }

    /// Records one operation's cycle count.
    pub fn update(&mut self, ticks: u64) {
        if ticks < self.min {
            self.min = ticks;
        }
        if ticks > self.max {
            self.max = ticks;
        }
        self.sum += ticks;
        self.count += 1;

        let idx = (ticks / BUCKET_TICKS).min(15) as usize;
        self.buckets[idx] += 1;
    }

    /// Average cycle count, or 0.0 before any measurement.
    pub fn avg(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }

    /// Prints a formatted report of the collected statistics.
    pub fn print_report(&self) {
        println!("\nCycle Metrics");
        println!("Count: {}", self.count);
        println!("Min:   {} ticks", self.min);
        println!("Avg:   {:.2} ticks", self.avg());
        println!("Max:   {} ticks", self.max);

        println!("Distribution ({} tick buckets):", BUCKET_TICKS);
        for i in 0..16 {
            let count = self.buckets[i];
            if count > 0 {
                let range_end = if i == 15 { ">" } else { "" };
                let lower = i as u64 * BUCKET_TICKS;
                let upper = (i as u64 + 1) * BUCKET_TICKS;
                println!("[{:3}-{:3}{} ticks]: {}", lower, upper, range_end, count);
            }
        }
    }
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}
