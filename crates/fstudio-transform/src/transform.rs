use std::collections::{BTreeMap, HashSet};

use fstudio_core::{CleanRecord, DedupKey, RawRecord};
use rust_decimal::Decimal;

use crate::error::RejectReason;
use crate::fields::{parse_count, parse_rating_value, parse_usd_amount, strip_label};
use crate::rules::TransformRules;

const SIZE_LABEL: &str = "Size:";
const GENDER_LABEL: &str = "Gender:";

/// Counts describing one transform pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub input: usize,
    pub rejected: BTreeMap<RejectReason, usize>,
    pub duplicates: usize,
    pub output: usize,
}

impl TransformReport {
    #[must_use]
    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }
}

/// Validates and normalizes `records`, dropping invalid and duplicate ones.
///
/// Output keeps the input's relative order.
#[must_use]
pub fn transform(records: &[RawRecord], rules: &TransformRules) -> Vec<CleanRecord> {
    transform_with_report(records, rules).0
}

/// Same as [`transform`], also returning per-reason rejection counts.
#[must_use]
pub fn transform_with_report(
    records: &[RawRecord],
    rules: &TransformRules,
) -> (Vec<CleanRecord>, TransformReport) {
    let mut report = TransformReport {
        input: records.len(),
        ..TransformReport::default()
    };

    let mut valid = Vec::with_capacity(records.len());
    for raw in records {
        match clean_record(raw, rules) {
            Ok(clean) => valid.push(clean),
            Err(reason) => {
                tracing::debug!(title = %raw.title, reason = %reason, "dropping record");
                *report.rejected.entry(reason).or_insert(0) += 1;
            }
        }
    }

    let before_dedup = valid.len();
    let output = dedup(valid, rules.dedup_key);
    report.duplicates = before_dedup - output.len();
    report.output = output.len();

    tracing::info!(
        input = report.input,
        rejected = report.rejected_total(),
        duplicates = report.duplicates,
        output = report.output,
        "transform finished"
    );

    (output, report)
}

/// Applies the per-record rules in order: title, price, rating, colours,
/// size, gender.
///
/// # Errors
///
/// Returns the [`RejectReason`] of the first rule the record fails.
pub fn clean_record(raw: &RawRecord, rules: &TransformRules) -> Result<CleanRecord, RejectReason> {
    let title = raw.title.trim();
    if title.is_empty() || title == rules.invalid_title {
        return Err(RejectReason::InvalidTitle);
    }

    let price_text = present(raw.price.as_deref()).ok_or(RejectReason::MissingPrice)?;
    let price_usd = parse_usd_amount(price_text)
        .filter(|p| *p > Decimal::ZERO)
        .ok_or(RejectReason::InvalidPrice)?;
    let price_idr = price_usd
        .checked_mul(rules.exchange_rate)
        .ok_or(RejectReason::InvalidPrice)?
        .normalize();

    let rating_text = present(raw.rating.as_deref()).ok_or(RejectReason::MissingRating)?;
    let rating = parse_rating_value(rating_text).ok_or(RejectReason::InvalidRating)?;
    if !rules.rating_in_range(rating) {
        return Err(RejectReason::RatingOutOfRange);
    }

    let colors_text = present(raw.colors.as_deref()).ok_or(RejectReason::MissingColors)?;
    let colors_count = parse_count(colors_text).ok_or(RejectReason::InvalidColors)?;

    let size = raw
        .size
        .as_deref()
        .and_then(|s| strip_label(s, SIZE_LABEL))
        .ok_or(RejectReason::MissingSize)?;
    let gender = raw
        .gender
        .as_deref()
        .and_then(|g| strip_label(g, GENDER_LABEL))
        .ok_or(RejectReason::MissingGender)?;

    Ok(CleanRecord {
        title: title.to_owned(),
        price_idr,
        rating: rating.normalize(),
        colors_count,
        size: size.to_owned(),
        gender: gender.to_owned(),
        extracted_at: raw.extracted_at,
    })
}

fn present(field: Option<&str>) -> Option<&str> {
    field.filter(|s| !s.trim().is_empty())
}

/// Drops repeats of an earlier record, keeping first-seen order.
fn dedup(records: Vec<CleanRecord>, key: DedupKey) -> Vec<CleanRecord> {
    match key {
        DedupKey::FullRow => {
            let mut seen: HashSet<CleanRecord> = HashSet::with_capacity(records.len());
            records
                .into_iter()
                .filter(|r| seen.insert(r.clone()))
                .collect()
        }
        DedupKey::Title => {
            let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
            records
                .into_iter()
                .filter(|r| seen.insert(r.title.clone()))
                .collect()
        }
    }
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod tests;
