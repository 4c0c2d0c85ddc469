// AutoEllipsis: shrink displayed text until no adjacent overlap remains.
// The allowed width walks down from the configured maximum; at every step
// each label is re-truncated from its origin text, never from the already
// truncated value.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::label::{Label, LabelContent, Margin};
use crate::overlap::has_overlap;
use crate::text_metrics::TextMeasurer;

// Coarse chunk size for the first phase of prefix search. Bounds the number
// of width-measurement calls, which dominate truncation cost.
const TRUNCATE_CHUNK: usize = 16;

const DEFAULT_ELLIPSIS: &str = "...";

/// Width decrement per resolution step: a pixel value, or a sample string
/// whose measured width becomes the step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EllipsisStep {
    Px(f64),
    Sample(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EllipsisOptions {
    /// Starting allowed width. Infinite means unbounded text and turns the
    /// whole strategy into a no-op; carried as `null` on the wire since
    /// JSON has no literal for infinity.
    #[serde(with = "unbounded")]
    pub max_length: f64,
    /// The walk stops once the allowed width would drop to this or below.
    pub min_length: f64,
    pub step: EllipsisStep,
    /// Marker appended to truncated plain text.
    pub ellipsis: String,
}

impl Default for EllipsisOptions {
    fn default() -> Self {
        Self {
            max_length: f64::INFINITY,
            min_length: 0.0,
            step: EllipsisStep::Px(8.0),
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
        }
    }
}

mod unbounded {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

// Truncation policy is type-dependent and selected once per axis.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Policy {
    Text,
    Number,
    Time,
}

pub fn auto_ellipsis(
    labels: &mut [Label],
    measurer: &dyn TextMeasurer,
    margin: Margin,
    options: &EllipsisOptions,
) {
    if labels.is_empty() || !options.max_length.is_finite() {
        return;
    }
    let step = match &options.step {
        EllipsisStep::Px(px) => *px,
        EllipsisStep::Sample(sample) => {
            measurer.measure(sample, labels[0].font_size, &labels[0].font_family)
        }
    }
    .max(1.0);

    let policy = select_policy(labels);
    let mut allowed = options.max_length;
    loop {
        apply_truncation(labels, measurer, allowed, &options.ellipsis, policy);
        if !has_overlap(labels, measurer, margin) {
            return;
        }
        allowed -= step;
        if allowed <= options.min_length {
            return;
        }
    }
}

fn select_policy(labels: &[Label]) -> Policy {
    let mut numbers = 0usize;
    let mut times = 0usize;
    for label in labels {
        match label.content {
            LabelContent::Number(_) => numbers += 1,
            LabelContent::Time(_) => times += 1,
            LabelContent::Text => {}
        }
    }
    if numbers == labels.len() {
        Policy::Number
    } else if times == labels.len() {
        Policy::Time
    } else {
        Policy::Text
    }
}

fn apply_truncation(
    labels: &mut [Label],
    measurer: &dyn TextMeasurer,
    allowed: f64,
    ellipsis: &str,
    policy: Policy,
) {
    match policy {
        Policy::Text => {
            for label in labels.iter_mut() {
                label.text = truncate_text(
                    &label.origin_text,
                    allowed,
                    measurer,
                    label.font_size,
                    &label.font_family,
                    ellipsis,
                );
            }
        }
        Policy::Number => apply_number_notation(labels, measurer, allowed),
        Policy::Time => apply_time_masks(labels, measurer, allowed),
    }
}

/// Longest prefix of `raw` whose width plus the ellipsis marker fits
/// `allowed`. Advances in fixed-size chunks first, then refines one
/// character at a time; both phases exist to bound measurement calls, not
/// for correctness. Idempotent at a fixed width: text that already fits is
/// returned unchanged, so a truncated value never grows a second marker.
pub fn truncate_text(
    raw: &str,
    allowed: f64,
    measurer: &dyn TextMeasurer,
    font_size: f64,
    font_family: &str,
    ellipsis: &str,
) -> String {
    if measurer.measure(raw, font_size, font_family) <= allowed {
        return raw.to_string();
    }
    let budget = allowed - measurer.measure(ellipsis, font_size, font_family);
    if budget <= 0.0 {
        return ellipsis.to_string();
    }
    let chars: Vec<char> = raw.chars().collect();
    let fits = |count: usize| {
        let prefix: String = chars[..count].iter().collect();
        measurer.measure(&prefix, font_size, font_family) <= budget
    };

    let mut kept = 0;
    while kept + TRUNCATE_CHUNK <= chars.len() && fits(kept + TRUNCATE_CHUNK) {
        kept += TRUNCATE_CHUNK;
    }
    while kept < chars.len() && fits(kept + 1) {
        kept += 1;
    }

    let mut out: String = chars[..kept].iter().collect();
    out.push_str(ellipsis);
    out
}

// --- number notation -------------------------------------------------------

/// Group the integer digits of a value with commas: `1234567.5` becomes
/// `"1,234,567.5"`.
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = value.abs().to_string();
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };
    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3);
    let digits = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// K-style magnitude suffix: `1500` becomes `"1.5K"`, `2000000` `"2M"`.
pub fn magnitude_notation(value: f64) -> String {
    const STEPS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
    if !value.is_finite() {
        return value.to_string();
    }
    let abs = value.abs();
    for (threshold, suffix) in STEPS {
        if abs >= threshold {
            return format!("{}{}", trim_trailing_zero(value / threshold), suffix);
        }
    }
    trim_trailing_zero(value)
}

/// Scientific notation with one fractional digit: `1234567` -> `"1.2e6"`.
pub fn scientific_notation(value: f64) -> String {
    format!("{value:.1e}")
}

fn trim_trailing_zero(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded:.1}")
    }
}

fn apply_number_notation(labels: &mut [Label], measurer: &dyn TextMeasurer, allowed: f64) {
    // The tick whose raw (grouped) text is visually longest bounds every
    // other tick for all three notations.
    let worst = labels
        .iter()
        .filter_map(|label| match label.content {
            LabelContent::Number(value) => Some((label, value)),
            _ => None,
        })
        .max_by(|a, b| {
            let wa = a.0.text_width_of(&group_thousands(a.1), measurer);
            let wb = b.0.text_width_of(&group_thousands(b.1), measurer);
            wa.partial_cmp(&wb).unwrap_or(std::cmp::Ordering::Equal)
        });
    let Some((worst_label, worst_value)) = worst else {
        return;
    };

    let formats: [fn(f64) -> String; 3] =
        [group_thousands, magnitude_notation, scientific_notation];
    let mut chosen = scientific_notation as fn(f64) -> String;
    for format in formats {
        let width = worst_label.text_width_of(&format(worst_value), measurer);
        if width <= allowed {
            chosen = format;
            break;
        }
    }

    for label in labels.iter_mut() {
        if let LabelContent::Number(value) = label.content {
            label.text = chosen(value);
        }
    }
}

impl Label {
    fn text_width_of(&self, text: &str, measurer: &dyn TextMeasurer) -> f64 {
        measurer.measure(text, self.font_size, &self.font_family)
    }
}

// --- time masks ------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq)]
enum TimeUnit {
    Year,
    Day,
}

// Candidate mask pairs from most to least detailed. The common mask renders
// on every tick; the key mask renders at series boundaries, detected by a
// rollover of the listed coarser unit.
const TIME_MASKS: [(&str, &str, TimeUnit); 5] = [
    ("%H:%M:%S", "%m-%d %H:%M:%S", TimeUnit::Day),
    ("%H:%M", "%m-%d %H:%M", TimeUnit::Day),
    ("%m-%d", "%Y-%m-%d", TimeUnit::Year),
    ("%Y-%m", "%Y-%m", TimeUnit::Year),
    ("%Y", "%Y", TimeUnit::Year),
];

fn unit_ordinal(time: &NaiveDateTime, unit: TimeUnit) -> i64 {
    match unit {
        TimeUnit::Year => time.year() as i64,
        TimeUnit::Day => time.date().num_days_from_ce() as i64,
    }
}

fn apply_time_masks(labels: &mut [Label], measurer: &dyn TextMeasurer, allowed: f64) {
    let times: Vec<NaiveDateTime> = labels
        .iter()
        .filter_map(|label| match label.content {
            LabelContent::Time(t) => Some(t),
            _ => None,
        })
        .collect();
    if times.is_empty() {
        return;
    }

    // Test against the key mask: it is the longer of the pair, so if the
    // widest key rendering fits, every tick fits.
    let mut chosen = TIME_MASKS[TIME_MASKS.len() - 1];
    for candidate in TIME_MASKS {
        let widest = times
            .iter()
            .zip(labels.iter())
            .map(|(time, label)| {
                label.text_width_of(&time.format(candidate.1).to_string(), measurer)
            })
            .fold(0.0f64, f64::max);
        if widest <= allowed {
            chosen = candidate;
            break;
        }
    }
    let (common_mask, key_mask, unit) = chosen;

    let mut previous: Option<NaiveDateTime> = None;
    for label in labels.iter_mut() {
        let LabelContent::Time(time) = label.content else {
            continue;
        };
        let is_key = match previous {
            None => true,
            Some(prev) => unit_ordinal(&time, unit) != unit_ordinal(&prev, unit),
        };
        let mask = if is_key { key_mask } else { common_mask };
        label.text = time.format(mask).to_string();
        previous = Some(time);
    }
}
