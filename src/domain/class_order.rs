use std::cmp::Ordering;

/// Total order over class labels, top tier first.
///
/// Configured labels rank in the order given. Labels that were never
/// configured rank after all configured ones, lexicographically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassOrder {
    labels: Vec<String>,
}

impl ClassOrder {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into().trim().to_string();
            if !label.is_empty() && !ordered.contains(&label) {
                ordered.push(label);
            }
        }
        Self { labels: ordered }
    }

    /// No configured labels: plain lexicographic ordering
    pub fn lexicographic() -> Self {
        Self::default()
    }

    pub fn is_configured(&self) -> bool {
        !self.labels.is_empty()
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.position(a)
            .cmp(&self.position(b))
            .then_with(|| a.cmp(b))
    }

    /// Distinct labels from `classes`, sorted top tier first
    pub fn arrange<'a, I>(&self, classes: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut arranged: Vec<String> = Vec::new();
        for class in classes {
            if !arranged.iter().any(|c| c == class) {
                arranged.push(class.to_string());
            }
        }
        arranged.sort_by(|a, b| self.compare(a, b));
        arranged
    }

    fn position(&self, label: &str) -> usize {
        self.labels
            .iter()
            .position(|l| l == label)
            .unwrap_or(self.labels.len())
    }
}
