//! Static lookup tables for the search form

use serde::Serialize;

/// A form option: submitted value plus display label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

const fn choice(value: &'static str, label: &'static str) -> Choice {
    Choice { value, label }
}

/// A budget range bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetBucket {
    /// Submitted key, e.g. `1000-5000`
    pub key: &'static str,
    /// Phrase used in the agent query
    pub phrase: &'static str,
    /// Label shown in the form
    pub label: &'static str,
}

/// Phrase used when the budget key is not in [`BUDGET_BUCKETS`]
pub const FLEXIBLE_BUDGET: &str = "flexible budget";

pub const BUDGET_BUCKETS: [BudgetBucket; 6] = [
    BudgetBucket {
        key: "0-1000",
        phrase: "under Rs. 1,000",
        label: "Under ₹1,000",
    },
    BudgetBucket {
        key: "1000-5000",
        phrase: "between Rs. 1,000 and Rs. 5,000",
        label: "₹1,000 - ₹5,000",
    },
    BudgetBucket {
        key: "5000-10000",
        phrase: "between Rs. 5,000 and Rs. 10,000",
        label: "₹5,000 - ₹10,000",
    },
    BudgetBucket {
        key: "10000-20000",
        phrase: "between Rs. 10,000 and Rs. 20,000",
        label: "₹10,000 - ₹20,000",
    },
    BudgetBucket {
        key: "20000-50000",
        phrase: "between Rs. 20,000 and Rs. 50,000",
        label: "₹20,000 - ₹50,000",
    },
    BudgetBucket {
        key: "50000+",
        phrase: "above Rs. 50,000",
        label: "Above ₹50,000",
    },
];

pub const CATEGORIES: [Choice; 8] = [
    choice("electronics", "Electronics"),
    choice("clothing", "Clothing"),
    choice("footwear", "Footwear"),
    choice("home_appliances", "Home Appliances"),
    choice("beauty", "Beauty & Personal Care"),
    choice("sports", "Sports & Fitness"),
    choice("books", "Books"),
    choice("toys", "Toys & Games"),
];

/// Brands offered in the form; the empty value means any brand
pub const BRANDS: [Choice; 10] = [
    choice("", "Any Brand"),
    choice("samsung", "Samsung"),
    choice("apple", "Apple"),
    choice("nike", "Nike"),
    choice("adidas", "Adidas"),
    choice("sony", "Sony"),
    choice("lg", "LG"),
    choice("hp", "HP"),
    choice("dell", "Dell"),
    choice("lenovo", "Lenovo"),
];

pub const COMMON_PREFERENCES: [Choice; 4] = [
    choice("high_quality", "High Quality"),
    choice("popular", "Popular/Highly Rated"),
    choice("fast_delivery", "Fast Delivery"),
    choice("discounted", "On Discount/Sale"),
];

/// Category-specific preference tags; categories not listed have none
pub fn category_preferences(category: &str) -> &'static [Choice] {
    const ELECTRONICS: [Choice; 4] = [
        choice("energy_efficient", "Energy Efficient"),
        choice("warranty", "Extended Warranty"),
        choice("latest_model", "Latest Model"),
        choice("good_battery", "Good Battery Life"),
    ];
    const CLOTHING: [Choice; 4] = [
        choice("comfortable", "Comfortable"),
        choice("trendy", "Trendy/Fashionable"),
        choice("durable", "Durable/Long-lasting"),
        choice("easy_care", "Easy Care/Wash"),
    ];
    const FOOTWEAR: [Choice; 4] = [
        choice("comfortable", "Comfortable"),
        choice("durable", "Durable/Long-lasting"),
        choice("waterproof", "Waterproof"),
        choice("lightweight", "Lightweight"),
    ];
    const HOME_APPLIANCES: [Choice; 4] = [
        choice("energy_efficient", "Energy Efficient"),
        choice("warranty", "Extended Warranty"),
        choice("quiet_operation", "Quiet Operation"),
        choice("space_saving", "Space-saving"),
    ];
    const BEAUTY: [Choice; 4] = [
        choice("natural", "Natural/Organic"),
        choice("cruelty_free", "Cruelty-free"),
        choice("fragrance_free", "Fragrance-free"),
        choice("long_lasting", "Long-lasting"),
    ];
    const SPORTS: [Choice; 4] = [
        choice("durable", "Durable/Long-lasting"),
        choice("lightweight", "Lightweight"),
        choice("high_performance", "High Performance"),
        choice("waterproof", "Waterproof/Weather-resistant"),
    ];

    match category {
        "electronics" => &ELECTRONICS,
        "clothing" => &CLOTHING,
        "footwear" => &FOOTWEAR,
        "home_appliances" => &HOME_APPLIANCES,
        "beauty" => &BEAUTY,
        "sports" => &SPORTS,
        _ => &[],
    }
}

/// Common tags followed by the category's own tags
pub fn preferences_for(category: &str) -> Vec<Choice> {
    COMMON_PREFERENCES
        .iter()
        .chain(category_preferences(category))
        .copied()
        .collect()
}

/// Query phrase for a budget key
pub fn budget_phrase(key: &str) -> Option<&'static str> {
    BUDGET_BUCKETS
        .iter()
        .find(|bucket| bucket.key == key)
        .map(|bucket| bucket.phrase)
}

pub fn is_category(value: &str) -> bool {
    CATEGORIES.iter().any(|c| c.value == value)
}

pub fn is_brand(value: &str) -> bool {
    BRANDS.iter().any(|b| b.value == value)
}
