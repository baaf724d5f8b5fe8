use serde::{Deserialize, Serialize};

/// Names kept in natural, case-insensitive order once [`NatOrdSet::sort`] is called
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct NatOrdSet(pub Vec<String>);

impl NatOrdSet {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, value: String) {
        self.0.push(value);
    }

    pub fn sort(&mut self) {
        self.0.sort_by(|a, b| natord::compare_ignore_case(a, b));
    }

    /// Exact match, names differing only by case are distinct
    pub fn position(&self, value: &str) -> Option<usize> {
        self.0.iter().position(|item| item == value)
    }

    pub fn get(&self, index: usize) -> Option<&String> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(names: &[&str]) -> NatOrdSet {
        let mut set = NatOrdSet::new();
        for name in names {
            set.push(name.to_string());
        }
        set.sort();
        set
    }

    #[test]
    fn sorts_numbers_naturally() {
        let set = set_of(&["img10.png", "img2.png", "img1.png"]);
        let sorted: Vec<_> = set.iter().map(String::as_str).collect();
        assert_eq!(sorted, ["img1.png", "img2.png", "img10.png"]);
    }

    #[test]
    fn sorting_ignores_case() {
        let set = set_of(&["b.png", "A.png", "c.png"]);
        assert_eq!(set.get(0).map(String::as_str), Some("A.png"));
        assert_eq!(set.position("b.png"), Some(1));
        assert_eq!(set.position("B.png"), None);
    }
}
