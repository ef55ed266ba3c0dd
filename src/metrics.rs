//! Pipeline counters via the `metrics` facade.
//!
//! The library only records; installing an exporter/recorder is up to the host.
//! Without a recorder every call is a no-op.

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;

use crate::item::SentimentLabel;
use crate::validate::RejectReason;

pub const RUNS_TOTAL: &str = "pipeline_runs_total";
pub const ITEMS_FOUND_TOTAL: &str = "pipeline_items_found_total";
pub const ITEMS_REJECTED_TOTAL: &str = "pipeline_items_rejected_total";
pub const ITEMS_SCORED_TOTAL: &str = "pipeline_items_scored_total";
pub const EMPTY_TOTAL: &str = "pipeline_empty_total";

/// One-time metrics registration (so series show up with descriptions).
pub fn ensure_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(RUNS_TOTAL, "Pipeline runs started.");
        describe_counter!(ITEMS_FOUND_TOTAL, "Raw items handed to the pipeline.");
        describe_counter!(
            ITEMS_REJECTED_TOTAL,
            "Items dropped before scoring, by reason."
        );
        describe_counter!(ITEMS_SCORED_TOTAL, "Items scored, by sentiment label.");
        describe_counter!(
            EMPTY_TOTAL,
            "Runs ending without a result (no_input / no_survivors)."
        );
    });
}

pub(crate) fn record_run(found: usize) {
    counter!(RUNS_TOTAL).increment(1);
    counter!(ITEMS_FOUND_TOTAL).increment(found as u64);
}

pub(crate) fn record_rejected(reason: RejectReason) {
    counter!(ITEMS_REJECTED_TOTAL, "reason" => reason.as_str()).increment(1);
}

pub(crate) fn record_scored(label: SentimentLabel) {
    counter!(ITEMS_SCORED_TOTAL, "sentiment" => label.as_str()).increment(1);
}

pub(crate) fn record_empty(kind: &'static str) {
    counter!(EMPTY_TOTAL, "kind" => kind).increment(1);
}
