//! Ordered, duplicate-free keyword list.

use serde::{Deserialize, Serialize};

/// Keywords in the order the user added them.
///
/// Duplicates are detected by exact string match after trimming. A
/// deserialized list goes through [`add`](Self::add) like typed input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordList(Vec<String>);

impl KeywordList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyword. Returns `false` if it was empty or already present.
    pub fn add(&mut self, keyword: impl AsRef<str>) -> bool {
        let keyword = keyword.as_ref().trim();
        if keyword.is_empty() || self.contains(keyword) {
            return false;
        }
        self.0.push(keyword.to_string());
        true
    }

    /// Remove a keyword. Returns `false` if it was not present.
    pub fn remove(&mut self, keyword: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|k| k != keyword);
        self.0.len() != before
    }

    /// Check if a keyword is present.
    pub fn contains(&self, keyword: &str) -> bool {
        self.0.iter().any(|k| k == keyword)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Copy the keywords out for a request payload.
    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }

    /// Keywords joined with `separator`.
    pub fn joined(&self, separator: &str) -> String {
        self.0.join(separator)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<S: AsRef<str>> FromIterator<S> for KeywordList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = KeywordList::new();
        for keyword in iter {
            list.add(keyword);
        }
        list
    }
}

impl From<Vec<String>> for KeywordList {
    fn from(keywords: Vec<String>) -> Self {
        keywords.into_iter().collect()
    }
}

impl From<KeywordList> for Vec<String> {
    fn from(list: KeywordList) -> Self {
        list.0
    }
}

impl<S: AsRef<str>> Extend<S> for KeywordList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for keyword in iter {
            self.add(keyword);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent() {
        let mut list = KeywordList::new();
        assert!(list.add("설날선물"));
        assert!(!list.add("설날선물"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_add_preserves_order() {
        let list: KeywordList = ["달콤한", "제주과일", "명절선물"].into_iter().collect();
        assert_eq!(list.as_slice(), &["달콤한", "제주과일", "명절선물"]);
    }

    #[test]
    fn test_joined() {
        let list: KeywordList = ["a", "b"].into_iter().collect();
        assert_eq!(list.joined(""), "ab");
        assert_eq!(list.joined(", "), "a, b");
        assert_eq!(KeywordList::new().joined(","), "");
    }

    #[test]
    fn test_add_rejects_blank() {
        let mut list = KeywordList::new();
        assert!(!list.add(""));
        assert!(!list.add("   "));
        assert!(list.is_empty());
    }

    #[test]
    fn test_add_trims_before_matching() {
        let mut list = KeywordList::new();
        assert!(list.add(" 과일 "));
        assert!(!list.add("과일"));
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["과일"]);
    }

    #[test]
    fn test_match_is_exact() {
        let mut list = KeywordList::new();
        list.add("Apple");
        assert!(list.add("apple"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_deserialize_applies_add_rules() {
        let list: KeywordList = serde_json::from_str(r#"["a", "a", " ", " b "]"#).unwrap();
        assert_eq!(list.as_slice(), &["a", "b"]);
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"["a","b"]"#);
    }

    #[test]
    fn test_remove() {
        let mut list: KeywordList = ["a", "b", "c"].into_iter().collect();
        assert!(list.remove("b"));
        assert!(!list.remove("b"));
        assert_eq!(list.as_slice(), &["a", "c"]);
    }
}
