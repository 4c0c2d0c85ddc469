// AutoHide: toggle label visibility until no adjacent overlap remains.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::collision::CollisionRect;
use crate::label::{Label, Margin, Visibility};
use crate::overlap::{collision_rect, has_overlap_rects};
use crate::text_metrics::TextMeasurer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HideMethod {
    /// Keep the first label; keep each later label only if it clears the
    /// most recently kept one. Deterministic, converges in one pass.
    #[default]
    Greedy,
    /// Keep every `seq`-th label, retrying with `seq + 1` while overlap
    /// persists.
    Parity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HideOptions {
    pub method: HideMethod,
    /// Initial parity step. Ignored by the greedy method.
    pub seq: usize,
    /// Wall-clock budget for the parity retry loop.
    pub timeout_ms: u64,
}

impl Default for HideOptions {
    fn default() -> Self {
        Self {
            method: HideMethod::Greedy,
            seq: 2,
            timeout_ms: 1000,
        }
    }
}

pub fn auto_hide(
    labels: &mut [Label],
    measurer: &dyn TextMeasurer,
    margin: Margin,
    options: &HideOptions,
) {
    for label in labels.iter_mut() {
        label.visibility = Visibility::Visible;
    }
    if labels.len() <= 1 {
        return;
    }

    let deadline = Instant::now() + Duration::from_millis(options.timeout_ms);
    let rects: Vec<CollisionRect> = labels
        .iter()
        .map(|label| collision_rect(label, measurer, margin))
        .collect();
    let mut seq = options.seq.max(2);

    loop {
        match options.method {
            HideMethod::Greedy => reduce_greedy(labels, &rects),
            HideMethod::Parity => reduce_parity(labels, seq),
        }

        let visible: Vec<CollisionRect> = labels
            .iter()
            .zip(&rects)
            .filter(|(label, _)| label.is_visible())
            .map(|(_, rect)| *rect)
            .collect();
        if !has_overlap_rects(&visible) {
            return;
        }
        // Greedy enforces no adjacent collision among kept labels by
        // construction, so a second pass cannot improve on it.
        if options.method == HideMethod::Greedy {
            return;
        }
        if Instant::now() >= deadline {
            log::warn!(
                "auto_hide: overlap unresolved after {}ms, keeping partial visibility (parity seq {})",
                options.timeout_ms,
                seq
            );
            return;
        }
        for label in labels.iter_mut() {
            label.visibility = Visibility::Visible;
        }
        seq += 1;
    }
}

fn reduce_greedy(labels: &mut [Label], rects: &[CollisionRect]) {
    let mut last_kept = 0;
    for i in 1..labels.len() {
        if rects[last_kept].is_collision(&rects[i]) {
            labels[i].visibility = Visibility::Hidden;
        } else {
            last_kept = i;
        }
    }
}

fn reduce_parity(labels: &mut [Label], seq: usize) {
    for (i, label) in labels.iter_mut().enumerate() {
        if i % seq != 0 {
            label.visibility = Visibility::Hidden;
        }
    }
}
