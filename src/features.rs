//! Feature preprocessing for classifier inference.
//!
//! Builds the single-row feature table matching the schema the classifier was
//! trained on: coordinates collapsed into a distance, categorical columns
//! label-encoded, and the card number hashed into a small numeric range.

use crate::encoders::EncoderSet;
use crate::geo;
use crate::types::transaction::TransactionInput;
use std::hash::{DefaultHasher, Hash, Hasher};
use tracing::debug;

/// Column order the classifier was trained on.
pub const COLUMNS: [&str; 9] = [
    "merchant", "category", "amt", "distance", "hour", "day", "month", "gender", "cc_num",
];

/// Sentinel code for categorical values unseen during encoder fitting.
pub const UNSEEN_CATEGORY: i64 = -1;

const CARD_HASH_BUCKETS: u64 = 100;

/// One processed row, owned by a single prediction and discarded after
/// rendering. Field order mirrors [`COLUMNS`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub merchant: i64,
    pub category: i64,
    pub amt: f64,
    pub distance: f64,
    pub hour: u32,
    pub day: u32,
    pub month: u32,
    pub gender: i64,
    pub cc_num: i64,
}

impl FeatureRow {
    /// Feature vector in trained column order, as the classifier input dtype.
    pub fn to_model_input(&self) -> Vec<f32> {
        vec![
            self.merchant as f32,
            self.category as f32,
            self.amt as f32,
            self.distance as f32,
            self.hour as f32,
            self.day as f32,
            self.month as f32,
            self.gender as f32,
            self.cc_num as f32,
        ]
    }

    /// Column name/value pairs for display.
    pub fn display_values(&self) -> Vec<(&'static str, String)> {
        vec![
            ("merchant", self.merchant.to_string()),
            ("category", self.category.to_string()),
            ("amt", format!("{:.2}", self.amt)),
            ("distance", format!("{:.3}", self.distance)),
            ("hour", self.hour.to_string()),
            ("day", self.day.to_string()),
            ("month", self.month.to_string()),
            ("gender", self.gender.to_string()),
            ("cc_num", self.cc_num.to_string()),
        ]
    }

    /// Number of columns in the trained schema.
    pub fn column_count() -> usize {
        COLUMNS.len()
    }
}

/// Build the feature row for one validated transaction input.
///
/// The raw input is left untouched; processing only reads from it.
pub fn build_row(input: &TransactionInput, encoders: &EncoderSet) -> FeatureRow {
    let distance = geo::distance_km(input.lat, input.long, input.merch_lat, input.merch_long);

    FeatureRow {
        merchant: encode_categorical(encoders, "merchant", &input.merchant),
        category: encode_categorical(encoders, "category", &input.category),
        amt: input.amt,
        distance,
        hour: input.hour,
        day: input.day,
        month: input.month,
        gender: encode_categorical(encoders, "gender", input.gender.as_str()),
        cc_num: hash_card(&input.cc_num),
    }
}

/// Hash a card number into `[0, 99]`.
///
/// A deliberately lossy, non-cryptographic obfuscation matching the training
/// transform; not a security control.
pub fn hash_card(cc_num: &str) -> i64 {
    let mut hasher = DefaultHasher::new();
    cc_num.hash(&mut hasher);
    (hasher.finish() % CARD_HASH_BUCKETS) as i64
}

fn encode_categorical(encoders: &EncoderSet, column: &str, value: &str) -> i64 {
    match encoders.column(column).and_then(|enc| enc.transform(value)) {
        Some(code) => code,
        None => {
            debug!(column, value, "Unseen categorical value, using sentinel");
            UNSEEN_CATEGORY
        }
    }
}
