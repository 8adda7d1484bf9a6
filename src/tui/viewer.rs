//! Chart window and series visibility state.

use chrono::NaiveDateTime;

use crate::table::DemandTable;

/// Window widths in hours: day, week, month, quarter, year.
pub const WINDOW_HOURS: [usize; 5] = [24, 168, 744, 2208, 8784];

/// Upper bound on points handed to the chart per series.
const MAX_POINTS: usize = 1500;

/// One plotted column.
#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
    pub visible: bool,
}

/// Chart state: the visible hour window and which series are shown.
#[derive(Debug, Clone)]
pub struct PlotViewer {
    pub series: Vec<Series>,
    timestamps: Vec<NaiveDateTime>,
    /// Index into `WINDOW_HOURS`.
    pub window_idx: usize,
    /// First visible hour.
    pub offset: usize,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl PlotViewer {
    /// Starts with every series visible and the whole year in view.
    pub fn new(table: &DemandTable) -> Self {
        Self {
            series: table
                .columns()
                .iter()
                .map(|c| Series {
                    label: c.label.clone(),
                    values: c.values.clone(),
                    visible: true,
                })
                .collect(),
            timestamps: table.index().to_vec(),
            window_idx: WINDOW_HOURS.len() - 1,
            offset: 0,
            quit: false,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Width of the visible window in hours, never more than the data.
    pub fn window(&self) -> usize {
        WINDOW_HOURS[self.window_idx].min(self.len()).max(1)
    }

    /// Visible hour range, end exclusive.
    pub fn range(&self) -> (usize, usize) {
        let start = self.offset.min(self.len().saturating_sub(self.window()));
        (start, (start + self.window()).min(self.len()))
    }

    pub fn pan_left(&mut self) {
        let (start, _) = self.range();
        self.offset = start.saturating_sub(self.pan_step());
    }

    pub fn pan_right(&mut self) {
        let (start, _) = self.range();
        let max_start = self.len().saturating_sub(self.window());
        self.offset = (start + self.pan_step()).min(max_start);
    }

    /// Narrows the window, keeping its start.
    pub fn zoom_in(&mut self) {
        self.offset = self.range().0;
        self.window_idx = self.window_idx.saturating_sub(1);
    }

    /// Widens the window, keeping its start where possible.
    pub fn zoom_out(&mut self) {
        self.offset = self.range().0;
        if self.window_idx + 1 < WINDOW_HOURS.len() {
            self.window_idx += 1;
        }
        self.offset = self.range().0;
    }

    /// Whole-year view with every series shown.
    pub fn reset(&mut self) {
        self.window_idx = WINDOW_HOURS.len() - 1;
        self.offset = 0;
        for s in &mut self.series {
            s.visible = true;
        }
    }

    /// Shows or hides the series at `position`; out-of-range is ignored.
    pub fn toggle_series(&mut self, position: usize) {
        if let Some(s) = self.series.get_mut(position) {
            s.visible = !s.visible;
        }
    }

    /// Chart points of a series in the visible window.
    ///
    /// Long windows are reduced to bucket maxima so peaks stay visible.
    pub fn points(&self, position: usize) -> Vec<(f64, f64)> {
        let Some(series) = self.series.get(position) else {
            return Vec::new();
        };
        let (start, end) = self.range();
        let bucket = (end - start).div_ceil(MAX_POINTS).max(1);
        (start..end)
            .step_by(bucket)
            .map(|first| {
                let last = (first + bucket).min(end);
                let peak = series.values[first..last]
                    .iter()
                    .copied()
                    .fold(f64::NEG_INFINITY, f64::max);
                (first as f64, peak)
            })
            .collect()
    }

    /// Timestamp at an hour position, if any.
    pub fn timestamp(&self, hour: usize) -> Option<NaiveDateTime> {
        self.timestamps.get(hour).copied()
    }

    fn pan_step(&self) -> usize {
        (self.window() / 4).max(1)
    }
}
