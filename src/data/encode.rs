use std::collections::BTreeSet;

use super::normalize::{NormalizeError, Result};

// ---------------------------------------------------------------------------
// Label encoding: distinct sorted strings → 0..k-1
// ---------------------------------------------------------------------------

/// Deterministic label encoder.
///
/// Classes are the distinct label strings in lexicographic order; codes are
/// their positions. Re-fitting on identical input always yields identical
/// codes.
#[derive(Debug, Clone)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Collect the distinct labels, sorted.
    pub fn fit(labels: &[String]) -> Self {
        let classes: BTreeSet<&String> = labels.iter().collect();
        LabelEncoder {
            classes: classes.into_iter().cloned().collect(),
        }
    }

    /// The distinct label strings, in code order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Map each label to its integer code.
    pub fn transform(&self, labels: &[String]) -> Result<Vec<usize>> {
        labels
            .iter()
            .map(|label| {
                self.classes.binary_search(label).map_err(|_| {
                    NormalizeError::Configuration(format!(
                        "label '{label}' was not seen during fit"
                    ))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn codes_follow_sorted_class_order() {
        let input = labels(&["b", "a", "b", "c"]);
        let encoder = LabelEncoder::fit(&input);
        assert_eq!(encoder.classes(), &["a", "b", "c"]);
        assert_eq!(encoder.transform(&input).unwrap(), vec![1, 0, 1, 2]);
    }

    #[test]
    fn encoding_is_deterministic() {
        let input = labels(&["7", "3", "7", "0", "3"]);
        let first = LabelEncoder::fit(&input).transform(&input).unwrap();
        let second = LabelEncoder::fit(&input).transform(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn sorting_is_lexicographic_not_numeric() {
        // String labels sort as strings: "10" comes before "2".
        let input = labels(&["2", "10"]);
        let encoder = LabelEncoder::fit(&input);
        assert_eq!(encoder.classes(), &["10", "2"]);
        assert_eq!(encoder.transform(&input).unwrap(), vec![1, 0]);
    }

    #[test]
    fn unknown_label_is_rejected() {
        let encoder = LabelEncoder::fit(&labels(&["a"]));
        assert!(encoder.transform(&labels(&["b"])).is_err());
    }
}
