//! Linear scales, tick generation, and axis formatting.

use std::sync::Arc;

use crate::view::Range;

/// Default number of ticks requested per axis.
pub const DEFAULT_TICK_COUNT: usize = 10;

/// Linear mapping from a data domain to a pixel range.
///
/// The pixel range may be inverted (for example `[height, 0]` on a Y axis so
/// that larger values are drawn higher up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: Range,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    /// Create a scale mapping `domain.min -> range_start` and
    /// `domain.max -> range_end`.
    ///
    /// A zero-span or non-finite domain falls back to `[0, 1]`.
    pub fn new(domain: Range, range_start: f64, range_end: f64) -> Self {
        let domain = if domain.is_valid() {
            domain
        } else {
            Range::new(0.0, 1.0)
        };
        Self {
            domain,
            range_start,
            range_end,
        }
    }

    /// Access the data domain.
    pub fn domain(&self) -> Range {
        self.domain
    }

    /// Access the pixel range as `(start, end)`.
    pub fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Map a data value to pixels.
    pub fn map(&self, value: f64) -> f64 {
        let t = (value - self.domain.min) / self.domain.span();
        self.range_start + t * (self.range_end - self.range_start)
    }

    /// Map a pixel position back to data space.
    pub fn invert(&self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return self.domain.min;
        }
        let t = (pixel - self.range_start) / span;
        self.domain.min + t * self.domain.span()
    }

    /// Build a scale with the same pixel range over a new domain.
    ///
    /// `domain_start` maps to the range start even when it is larger than
    /// `domain_end`.
    pub fn with_domain(&self, domain_start: f64, domain_end: f64) -> Self {
        if domain_start <= domain_end {
            Self::new(
                Range::new(domain_start, domain_end),
                self.range_start,
                self.range_end,
            )
        } else {
            Self::new(
                Range::new(domain_end, domain_start),
                self.range_end,
                self.range_start,
            )
        }
    }

    /// Generate round tick values covering the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.min, self.domain.max, count)
    }

    /// Distance between adjacent ticks for the given tick count.
    pub fn tick_step(&self, count: usize) -> f64 {
        tick_increment(self.domain.min, self.domain.max, count as f64)
            .map(|spec| spec.step())
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct TickSpec {
    first: i64,
    last: i64,
    increment: f64,
}

impl TickSpec {
    fn value(&self, index: i64) -> f64 {
        if self.increment < 0.0 {
            index as f64 / -self.increment
        } else {
            index as f64 * self.increment
        }
    }

    fn step(&self) -> f64 {
        if self.increment < 0.0 {
            1.0 / -self.increment
        } else {
            self.increment
        }
    }
}

fn tick_increment(start: f64, stop: f64, count: f64) -> Option<TickSpec> {
    if !(start.is_finite() && stop.is_finite()) || count <= 0.0 || stop <= start {
        return None;
    }
    let step = (stop - start) / count;
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= 50_f64.sqrt() {
        10.0
    } else if error >= 10_f64.sqrt() {
        5.0
    } else if error >= 2_f64.sqrt() {
        2.0
    } else {
        1.0
    };

    let mut first: i64;
    let mut last: i64;
    let increment: f64;
    if power < 0.0 {
        let inc = 10_f64.powf(-power) / factor;
        first = (start * inc).round() as i64;
        last = (stop * inc).round() as i64;
        if (first as f64) / inc < start {
            first += 1;
        }
        if (last as f64) / inc > stop {
            last -= 1;
        }
        increment = -inc;
    } else {
        let inc = 10_f64.powf(power) * factor;
        first = (start / inc).round() as i64;
        last = (stop / inc).round() as i64;
        if (first as f64) * inc < start {
            first += 1;
        }
        if (last as f64) * inc > stop {
            last -= 1;
        }
        increment = inc;
    }

    if last < first && (0.5..2.0).contains(&count) {
        return tick_increment(start, stop, count * 2.0);
    }
    Some(TickSpec {
        first,
        last,
        increment,
    })
}

/// Generate "nice" tick values (1, 2 or 5 times a power of ten) in
/// `[start, stop]`.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let Some(spec) = tick_increment(start, stop, count as f64) else {
        return Vec::new();
    };
    if spec.last < spec.first {
        return Vec::new();
    }
    (spec.first..=spec.last).map(|index| spec.value(index)).collect()
}

/// Number of fraction digits needed to tell ticks `step` apart.
pub fn precision_for_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    let exponent = step.abs().log10().floor() as i32;
    (-exponent).max(0) as usize
}

/// Format a value with fixed precision and thousands separators.
pub fn format_grouped(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*}", precision, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + integer.len() / 3 + 1);
    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    if negative {
        grouped.push('−');
    }
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// Formatter for axis tick labels.
#[derive(Clone, Default)]
pub enum AxisFormatter {
    /// Grouped decimal with precision derived from the tick step.
    #[default]
    Default,
    /// Custom formatter callback.
    Custom(Arc<dyn Fn(f64) -> String + Send + Sync>),
}

impl AxisFormatter {
    /// Format a tick value; `step` is the distance between adjacent ticks.
    pub fn format(&self, value: f64, step: f64) -> String {
        match self {
            Self::Default => format_grouped(value, precision_for_step(step)),
            Self::Custom(formatter) => formatter(value),
        }
    }
}

impl std::fmt::Debug for AxisFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "AxisFormatter::Default"),
            Self::Custom(_) => write!(f, "AxisFormatter::Custom(..)"),
        }
    }
}

/// Side of the plot area an axis is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrient {
    /// Horizontal axis below the plot area, labels underneath.
    Bottom,
    /// Vertical axis left of the plot area, labels to the left.
    Left,
}

/// Axis configuration.
#[derive(Debug, Clone)]
pub struct AxisConfig {
    orient: AxisOrient,
    title: Option<String>,
    tick_count: usize,
    formatter: AxisFormatter,
}

impl AxisConfig {
    /// Create an axis configuration for the given side.
    pub fn new(orient: AxisOrient) -> Self {
        Self {
            orient,
            title: None,
            tick_count: DEFAULT_TICK_COUNT,
            formatter: AxisFormatter::default(),
        }
    }

    /// Bottom axis.
    pub fn bottom() -> Self {
        Self::new(AxisOrient::Bottom)
    }

    /// Left axis.
    pub fn left() -> Self {
        Self::new(AxisOrient::Left)
    }

    /// Set the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the requested tick count.
    pub fn with_tick_count(mut self, count: usize) -> Self {
        self.tick_count = count.max(1);
        self
    }

    /// Set the axis formatter.
    pub fn with_formatter(mut self, formatter: AxisFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Access the axis side.
    pub fn orient(&self) -> AxisOrient {
        self.orient
    }

    /// Access the axis title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Access the requested tick count.
    pub fn tick_count(&self) -> usize {
        self.tick_count
    }

    /// Access the formatter.
    pub fn formatter(&self) -> &AxisFormatter {
        &self.formatter
    }

    /// Lay out ticks for a scale.
    pub fn layout(&self, scale: &LinearScale) -> AxisLayout {
        let step = scale.tick_step(self.tick_count);
        let ticks = scale
            .ticks(self.tick_count)
            .into_iter()
            .map(|value| AxisTick {
                value,
                position: scale.map(value) as f32,
                label: self.formatter.format(value, step),
            })
            .collect();
        let (start, end) = scale.range();
        AxisLayout {
            orient: self.orient,
            ticks,
            extent: (start.min(end) as f32, start.max(end) as f32),
        }
    }
}

/// A single tick mark with its label.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    /// Tick value in data space.
    pub value: f64,
    /// Offset along the axis in plot-area pixels.
    pub position: f32,
    /// Formatted label.
    pub label: String,
}

/// Ticks computed for one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayout {
    /// Axis side.
    pub orient: AxisOrient,
    /// Tick marks in axis order.
    pub ticks: Vec<AxisTick>,
    /// Pixel extent of the axis line along its direction.
    pub extent: (f32, f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_maps_and_inverts() {
        let scale = LinearScale::new(Range::new(0.0, 550.0), 400.0, 0.0);
        assert_eq!(scale.map(0.0), 400.0);
        assert_eq!(scale.map(550.0), 0.0);
        assert!((scale.invert(scale.map(123.4)) - 123.4).abs() < 1e-9);
    }

    #[test]
    fn degenerate_domain_falls_back_to_unit() {
        let scale = LinearScale::new(Range::new(3.0, 3.0), 0.0, 100.0);
        assert_eq!(scale.domain(), Range::new(0.0, 1.0));
    }

    #[test]
    fn ticks_use_round_steps() {
        assert_eq!(
            ticks(0.0, 10.0, 10),
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]
        );
        assert_eq!(ticks(0.0, 880.0, 10), {
            (0..=8).map(|i| i as f64 * 100.0).collect::<Vec<_>>()
        });
        let fine = ticks(0.0, 1.0, 5);
        assert_eq!(fine, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn ticks_empty_for_invalid_input() {
        assert!(ticks(5.0, 5.0, 10).is_empty());
        assert!(ticks(0.0, f64::NAN, 10).is_empty());
        assert!(ticks(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn precision_follows_step() {
        assert_eq!(precision_for_step(100.0), 0);
        assert_eq!(precision_for_step(0.5), 1);
        assert_eq!(precision_for_step(0.02), 2);
    }

    #[test]
    fn grouped_formatting() {
        assert_eq!(format_grouped(1200.0, 0), "1,200");
        assert_eq!(format_grouped(12.34, 1), "12.3");
        assert_eq!(format_grouped(-3.0, 0), "−3");
        assert_eq!(format_grouped(-0.0, 0), "0");
        assert_eq!(format_grouped(999.0, 0), "999");
    }

    #[test]
    fn layout_places_ticks_in_pixels() {
        let scale = LinearScale::new(Range::new(0.0, 100.0), 0.0, 700.0);
        let layout = AxisConfig::bottom().layout(&scale);
        let first = layout.ticks.first().unwrap();
        let last = layout.ticks.last().unwrap();
        assert_eq!(first.label, "0");
        assert_eq!(last.position, 700.0);
        assert_eq!(layout.extent, (0.0, 700.0));
    }
}
