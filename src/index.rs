use std::collections::HashMap;

/// Identifier index over one record set.
///
/// Every record sharing a key is retained, but `get` returns the last-seen
/// record per key — the behavior of the upstream spreadsheet tooling, kept
/// for output parity. Duplicate-key groups stay visible through
/// `duplicate_keys` so silently superseded rows can be surfaced instead of
/// vanishing.
pub struct KeyIndex<'a, T> {
    by_key: HashMap<&'a str, Vec<&'a T>>,
}

impl<'a, T> KeyIndex<'a, T> {
    pub fn build(records: &'a [T], key: impl Fn(&'a T) -> &'a str) -> Self {
        let mut by_key: HashMap<&str, Vec<&T>> = HashMap::new();
        for record in records {
            by_key.entry(key(record)).or_default().push(record);
        }
        Self { by_key }
    }

    /// Last-seen record for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&'a T> {
        self.by_key.get(key).and_then(|group| group.last().copied())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Keys carried by more than one record, sorted for stable output.
    pub fn duplicate_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .by_key
            .iter()
            .filter(|(_, group)| group.len() > 1)
            .map(|(key, _)| key.to_string())
            .collect();
        keys.sort();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rec {
        id: String,
        amount: f64,
    }

    fn rec(id: &str, amount: f64) -> Rec {
        Rec {
            id: id.to_string(),
            amount,
        }
    }

    fn build(records: &[Rec]) -> KeyIndex<'_, Rec> {
        KeyIndex::build(records, |r| r.id.as_str())
    }

    #[test]
    fn test_lookup() {
        let records = [rec("INV1", 100.0), rec("INV2", 50.0)];
        let index = build(&records);
        assert_eq!(index.get("INV1").unwrap().amount, 100.0);
        assert!(index.get("INV9").is_none());
        assert!(index.contains("INV2"));
        assert!(!index.contains(""));
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let records = [rec("INV1", 100.0), rec("INV1", 200.0), rec("INV2", 50.0)];
        let index = build(&records);
        assert_eq!(index.get("INV1").unwrap().amount, 200.0);
        assert_eq!(index.duplicate_keys(), vec!["INV1".to_string()]);
    }

    #[test]
    fn test_duplicate_keys_sorted() {
        let records = [
            rec("B", 1.0),
            rec("B", 2.0),
            rec("A", 1.0),
            rec("A", 2.0),
        ];
        let index = build(&records);
        assert_eq!(index.duplicate_keys(), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_no_duplicates() {
        let records = [rec("INV1", 100.0)];
        assert!(build(&records).duplicate_keys().is_empty());
    }
}
