use std::collections::VecDeque;

/// The default number of samples shown on the chart.
pub const DEFAULT_CAPACITY: usize = 40;

/// Receives the full data series after every push.
pub trait ChartFeed {
    /// Replaces the chart's labels and values. Labels are blank, one per value.
    fn replace_series(&mut self, labels: &[String], values: &[f64]);
}

/// A sliding window over the most recent samples of a metric.
#[derive(Clone, Debug)]
pub struct MetricsWindow {
    /// The samples, oldest first.
    samples: VecDeque<f64>,
    /// The maximum number of samples kept.
    capacity: usize,
}

impl Default for MetricsWindow {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl MetricsWindow {
    /// Creates an empty window. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Appends a sample, evicting the oldest once the window is full.
    pub fn push(&mut self, sample: f64) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Gets the number of samples held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if no samples have been pushed.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Gets the maximum number of samples kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns an iterator over the samples, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    /// Copies the samples into a vector, oldest first.
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Hands the whole series to a chart.
    pub fn feed(&mut self, chart: &mut (impl ChartFeed + ?Sized)) {
        let labels = vec![String::new(); self.samples.len()];
        chart.replace_series(&labels, self.samples.make_contiguous());
    }
}
