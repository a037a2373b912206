use crate::catalog;
use crate::error::{NavigatorError, Result};
use crate::types::Category;
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

// ---------------------------------------------------------------------------
// AnswerSet
// ---------------------------------------------------------------------------

/// Selected option ids per question category.
///
/// Only membership matters. A category with no entry behaves exactly like one
/// with an empty selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    selections: BTreeMap<Category, BTreeSet<String>>,
}

/// Keys that name the same category (`respondent_role` and
/// `monitoring_capability`) are merged, not overwritten.
impl<'de> Deserialize<'de> for AnswerSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<String, BTreeSet<String>>::deserialize(deserializer)?;
        let mut selections: BTreeMap<Category, BTreeSet<String>> = BTreeMap::new();
        for (key, ids) in raw {
            let category: Category = key.parse().map_err(serde::de::Error::custom)?;
            selections.entry(category).or_default().extend(ids);
        }
        Ok(Self { selections })
    }
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns true if the option is now selected.
    pub fn toggle(&mut self, category: Category, id: &str) -> bool {
        let set = self.selections.entry(category).or_default();
        if set.remove(id) {
            false
        } else {
            set.insert(id.to_string());
            true
        }
    }

    pub fn select(&mut self, category: Category, id: &str) {
        self.selections
            .entry(category)
            .or_default()
            .insert(id.to_string());
    }

    pub fn deselect(&mut self, category: Category, id: &str) {
        if let Some(set) = self.selections.get_mut(&category) {
            set.remove(id);
        }
    }

    /// Replace the whole selection for `category`.
    pub fn set<I, S>(&mut self, category: Category, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = ids.into_iter().map(Into::into).collect();
        self.selections.insert(category, set);
    }

    pub fn contains(&self, category: Category, id: &str) -> bool {
        self.selections
            .get(&category)
            .map(|s| s.contains(id))
            .unwrap_or(false)
    }

    pub fn count(&self, category: Category) -> usize {
        self.selections.get(&category).map(|s| s.len()).unwrap_or(0)
    }

    /// Selected ids for `category`: catalogue order first, then any ids the
    /// catalogue does not know, sorted.
    pub fn selections(&self, category: Category) -> Vec<&str> {
        let Some(set) = self.selections.get(&category) else {
            return Vec::new();
        };
        let question = catalog::question(category);
        let mut ids: Vec<&str> = set.iter().map(String::as_str).collect();
        ids.sort_by_key(|id| (question.position(id).unwrap_or(usize::MAX), *id));
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.selections.values().all(|s| s.is_empty())
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }

    /// Reject ids outside the option catalogue.
    pub fn validate(&self) -> Result<()> {
        for (category, ids) in &self.selections {
            if let Some(bad) = ids.iter().find(|id| !catalog::is_known_option(*category, id)) {
                return Err(NavigatorError::UnknownOption {
                    category: category.to_string(),
                    option: bad.clone(),
                });
            }
        }
        Ok(())
    }

    // ---------------------------------------------------------------------------
    // Loading
    // ---------------------------------------------------------------------------

    pub fn from_yaml(data: &str) -> Result<Self> {
        if data.trim().is_empty() {
            return Ok(Self::new());
        }
        Ok(serde_yaml::from_str(data)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_yaml(&data)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn toggle_adds_then_removes() {
        let mut a = AnswerSet::new();
        assert!(a.toggle(Category::UserConcerns, "availability"));
        assert!(a.contains(Category::UserConcerns, "availability"));
        assert!(!a.toggle(Category::UserConcerns, "availability"));
        assert!(!a.contains(Category::UserConcerns, "availability"));
        assert!(a.is_empty());
    }

    #[test]
    fn missing_category_is_empty() {
        let a = AnswerSet::new();
        assert!(!a.contains(Category::BusinessImpact, "revenue_loss"));
        assert!(a.selections(Category::BusinessImpact).is_empty());
        assert_eq!(a.count(Category::BusinessImpact), 0);
    }

    #[test]
    fn selections_follow_catalogue_order() {
        let mut a = AnswerSet::new();
        a.select(Category::ServiceType, "backend");
        a.select(Category::ServiceType, "web");
        a.select(Category::ServiceType, "database");
        assert_eq!(
            a.selections(Category::ServiceType),
            vec!["web", "database", "backend"]
        );
    }

    #[test]
    fn set_replaces_previous_selection() {
        let mut a = AnswerSet::new();
        a.select(Category::ServiceType, "web");
        a.set(Category::ServiceType, ["api", "mobile"]);
        assert_eq!(a.selections(Category::ServiceType), vec!["mobile", "api"]);
    }

    #[test]
    fn deselect_and_clear() {
        let mut a = AnswerSet::new();
        a.select(Category::ServiceType, "web");
        a.select(Category::UserConcerns, "security");
        a.deselect(Category::ServiceType, "web");
        assert!(!a.contains(Category::ServiceType, "web"));
        a.clear();
        assert!(a.is_empty());
    }

    #[test]
    fn validate_rejects_unknown_option() {
        let mut a = AnswerSet::new();
        a.select(Category::UserConcerns, "availability");
        assert!(a.validate().is_ok());
        a.select(Category::UserConcerns, "vibes");
        match a.validate() {
            Err(NavigatorError::UnknownOption { category, option }) => {
                assert_eq!(category, "user_concerns");
                assert_eq!(option, "vibes");
            }
            other => panic!("expected UnknownOption, got {other:?}"),
        }
    }

    #[test]
    fn yaml_missing_keys_are_empty() {
        let a = AnswerSet::from_yaml("user_concerns: [availability]\n").unwrap();
        assert!(a.contains(Category::UserConcerns, "availability"));
        assert!(a.selections(Category::ServiceType).is_empty());
    }

    #[test]
    fn yaml_accepts_respondent_role_alias() {
        let a = AnswerSet::from_yaml("respondent_role: [sre, apm_tools]\n").unwrap();
        assert!(a.contains(Category::MonitoringCapability, "apm_tools"));
    }

    #[test]
    fn empty_file_is_empty_answer_set() {
        assert!(AnswerSet::from_yaml("").unwrap().is_empty());
    }

    #[test]
    fn load_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("answers.yaml");
        std::fs::write(&path, "service_type:\n  - database\n").unwrap();
        let a = AnswerSet::load(&path).unwrap();
        assert!(a.contains(Category::ServiceType, "database"));
    }

    #[test]
    fn yaml_merges_alias_with_canonical_key() {
        let a = AnswerSet::from_yaml(
            "respondent_role: [apm_tools]\nmonitoring_capability: [automated_ops]\n",
        )
        .unwrap();
        assert_eq!(
            a.selections(Category::MonitoringCapability),
            vec!["apm_tools", "automated_ops"]
        );
    }

    #[test]
    fn yaml_rejects_unknown_category() {
        let err = AnswerSet::from_yaml("vibes: [good]\n").unwrap_err();
        assert!(err.to_string().contains("unknown question category: vibes"), "{err}");
    }
}
