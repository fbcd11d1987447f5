//! Search form input and its validated form

use crate::catalog::{BUDGET_BUCKETS, is_brand, is_category};
use crate::error::ShopError;
use crate::query::format_query;
use serde::{Deserialize, Serialize};

/// Raw search form as submitted; every field may be empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchForm {
    pub category: String,
    pub specific_item: String,
    pub preferences: Vec<String>,
    pub budget_range: String,
    pub brand: String,
    pub additional_info: String,
}

impl SearchForm {
    /// Collect a form from decoded key/value pairs; `preferences` may repeat
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = Self::default();
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                "category" => form.category = value,
                "specific_item" => form.specific_item = value,
                "preferences" => form.preferences.push(value),
                "budget_range" => form.budget_range = value,
                "brand" => form.brand = value,
                "additional_info" => form.additional_info = value,
                _ => {}
            }
        }
        form
    }

    /// Validate the form, reporting every failing field
    pub fn validate(&self) -> Result<SearchSelection, Vec<ShopError>> {
        let mut errors = Vec::new();

        let category = self.category.trim();
        if category.is_empty() {
            errors.push(ShopError::MissingField("Category"));
        } else if !is_category(category) {
            errors.push(ShopError::InvalidChoice {
                field: "category",
                value: category.to_string(),
            });
        }

        let budget = self.budget_range.trim();
        if budget.is_empty() {
            errors.push(ShopError::MissingField("Budget"));
        } else if !BUDGET_BUCKETS.iter().any(|b| b.key == budget) {
            errors.push(ShopError::InvalidChoice {
                field: "budget range",
                value: budget.to_string(),
            });
        }

        let brand = self.brand.trim();
        if !is_brand(brand) {
            errors.push(ShopError::InvalidChoice {
                field: "brand",
                value: brand.to_string(),
            });
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let mut preferences: Vec<String> = Vec::with_capacity(self.preferences.len());
        for tag in self.preferences.iter().map(|p| p.trim()) {
            if !tag.is_empty() && !preferences.iter().any(|p| p == tag) {
                preferences.push(tag.to_string());
            }
        }

        Ok(SearchSelection {
            category: category.to_string(),
            specific_item: non_empty(&self.specific_item),
            preferences,
            budget_range: budget.to_string(),
            brand: non_empty(brand),
            additional_info: non_empty(&self.additional_info),
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// A validated search; fields are read-only once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSelection {
    category: String,
    specific_item: Option<String>,
    preferences: Vec<String>,
    budget_range: String,
    brand: Option<String>,
    additional_info: Option<String>,
}

impl SearchSelection {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn specific_item(&self) -> Option<&str> {
        self.specific_item.as_deref()
    }

    /// Preference tags in submission order, without duplicates
    pub fn preferences(&self) -> &[String] {
        &self.preferences
    }

    pub fn budget_range(&self) -> &str {
        &self.budget_range
    }

    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    pub fn additional_info(&self) -> Option<&str> {
        self.additional_info.as_deref()
    }

    /// The agent query for this selection
    pub fn to_query(&self) -> String {
        format_query(
            &self.category,
            self.specific_item.as_deref(),
            &self.preferences,
            &self.budget_range,
            self.brand.as_deref(),
            self.additional_info.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> SearchForm {
        SearchForm::from_pairs([
            ("category", "electronics"),
            ("specific_item", " headphones "),
            ("preferences", "eco_friendly"),
            ("preferences", "popular"),
            ("preferences", "eco_friendly"),
            ("budget_range", "1000-5000"),
            ("brand", "sony"),
            ("additional_info", ""),
            ("csrf_token", "ignored"),
        ])
    }

    #[test]
    fn test_from_pairs_collects_repeated_preferences() {
        let form = form();
        assert_eq!(form.preferences.len(), 3);
        assert_eq!(form.brand, "sony");
    }

    #[test]
    fn test_validate_normalizes() {
        let selection = form().validate().unwrap();
        assert_eq!(selection.specific_item(), Some("headphones"));
        assert_eq!(selection.preferences(), ["eco_friendly", "popular"]);
        assert_eq!(selection.additional_info(), None);
        assert_eq!(
            selection.to_query(),
            "I am looking for headphones from sony with the following preferences: eco_friendly, popular. Budget: between Rs. 1,000 and Rs. 5,000"
        );
    }

    #[test]
    fn test_missing_required_fields() {
        let errors = SearchForm::default().validate().unwrap_err();
        let messages: Vec<_> = errors.iter().map(ToString::to_string).collect();
        assert_eq!(messages, vec!["Category is required", "Budget is required"]);
    }

    #[test]
    fn test_unknown_choices_rejected() {
        let form = SearchForm {
            category: "cars".to_string(),
            budget_range: "1-2".to_string(),
            brand: "acme".to_string(),
            ..SearchForm::default()
        };
        assert_eq!(form.validate().unwrap_err().len(), 3);
    }

    #[test]
    fn test_any_brand_is_none() {
        let form = SearchForm {
            category: "books".to_string(),
            budget_range: "0-1000".to_string(),
            ..SearchForm::default()
        };
        let selection = form.validate().unwrap();
        assert_eq!(selection.brand(), None);
        assert_eq!(selection.to_query(), "I am looking for books. Budget: under Rs. 1,000");
    }

    #[test]
    fn test_selection_serde() {
        let selection = form().validate().unwrap();
        let json = serde_json::to_string(&selection).unwrap();
        let back: SearchSelection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, selection);
    }
}
