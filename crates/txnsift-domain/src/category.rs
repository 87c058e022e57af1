//! Category module - the closed budget-category enumeration

/// Budget category for a transaction
///
/// The set is closed: the extraction prompt enumerates exactly these labels
/// and instructs the model to fall back to `Other` for anything unfamiliar.
/// A model response carrying a label outside this set is rejected at the
/// validation boundary rather than stored as an open string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Vehicle purchase, fuel, parking, repairs
    Auto,

    /// Restaurants, groceries, coffee, delivery
    FoodAndDining,

    /// Pet food, vet, grooming
    Pet,

    /// Flights, hotels, rideshare while traveling
    Travel,

    /// Rent, mortgage, furniture, maintenance
    Home,

    /// Power, water, internet, phone
    Utilities,

    /// Gifts and charitable donations
    GiftsDonation,

    /// General retail and online shopping
    Shopping,

    /// Childcare, toys, kids' clothing
    BabyKid,

    /// Tax payments and preparation fees
    Taxes,

    /// Fallback for anything outside the above
    Other,
}

impl Category {
    /// Every member of the enumeration, in prompt order
    pub const ALL: [Category; 11] = [
        Category::Auto,
        Category::FoodAndDining,
        Category::Pet,
        Category::Travel,
        Category::Home,
        Category::Utilities,
        Category::GiftsDonation,
        Category::Shopping,
        Category::BabyKid,
        Category::Taxes,
        Category::Other,
    ];

    /// Get the category label as it appears in prompts and stored records
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Auto => "Auto",
            Category::FoodAndDining => "Food & Dining",
            Category::Pet => "Pet",
            Category::Travel => "Travel",
            Category::Home => "Home",
            Category::Utilities => "Utilities",
            Category::GiftsDonation => "Gifts/Donation",
            Category::Shopping => "Shopping",
            Category::BabyKid => "Baby/Kid",
            Category::Taxes => "Taxes",
            Category::Other => "Other",
        }
    }

    /// Parse a category from its exact label
    ///
    /// Returns `None` for any string outside the closed set. Callers decide
    /// whether that is a validation failure (extraction) or maps to
    /// [`Category::Other`] (prompt guidance to the model).
    pub fn parse(s: &str) -> Option<Self> {
        Category::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid category: {}", s))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_label_round_trips() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_unknown_label_rejected() {
        assert_eq!(Category::parse("Groceries"), None);
        assert_eq!(Category::parse("food & dining"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn test_fallback_member_is_in_set() {
        assert_eq!(Category::parse("Other"), Some(Category::Other));
    }

    #[test]
    fn test_from_str() {
        let parsed: Category = "Travel".parse().unwrap();
        assert_eq!(parsed, Category::Travel);

        let err = "Vacation".parse::<Category>().unwrap_err();
        assert!(err.contains("Vacation"));
    }
}
