use crate::models::Mentor;

/// Sentinel meaning "no restriction" for the category and city filters
pub const ALL: &str = "Все";

/// Check if a mentor's industry satisfies the category filter
///
/// Industries may be compound ("IT / Образование"), so this is a
/// substring check, not an equality check.
#[inline]
pub fn matches_category(mentor: &Mentor, category: &str) -> bool {
    category == ALL || mentor.industry.contains(category)
}

/// Check if a mentor's city satisfies the city filter (exact match)
#[inline]
pub fn matches_city(mentor: &Mentor, city: &str) -> bool {
    city == ALL || mentor.city == city
}

/// Check if a mentor's name or description contains the search text,
/// case-insensitively
#[inline]
pub fn matches_query(mentor: &Mentor, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    mentor.name.to_lowercase().contains(&needle)
        || mentor.description.to_lowercase().contains(&needle)
}

/// Conjunction of all three predicates
#[inline]
pub fn mentor_matches(mentor: &Mentor, category: &str, city: &str, query: &str) -> bool {
    matches_category(mentor, category) && matches_city(mentor, city) && matches_query(mentor, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_mentor(industry: &str, city: &str) -> Mentor {
        Mentor {
            id: "m1".to_string(),
            name: "Алексей Громов".to_string(),
            industry: industry.to_string(),
            city: city.to_string(),
            experience: "15 лет".to_string(),
            description: "Строил продуктовые команды с нуля".to_string(),
            achievements: vec![],
            request: "Ищу энергичных учеников".to_string(),
            values: vec!["честность".to_string()],
            video_url: String::new(),
            avatar_url: String::new(),
            single_price: 3000,
            group_price: 1000,
        }
    }

    #[test]
    fn test_category_sentinel_matches_everything() {
        let mentor = create_test_mentor("IT", "Москва");
        assert!(matches_category(&mentor, ALL));
    }

    #[test]
    fn test_category_substring_on_compound_industry() {
        let mentor = create_test_mentor("IT / Образование", "Москва");
        assert!(matches_category(&mentor, "IT"));
        assert!(matches_category(&mentor, "Образование"));
        assert!(!matches_category(&mentor, "Маркетинг"));
    }

    #[test]
    fn test_city_is_exact() {
        let mentor = create_test_mentor("IT", "Москва");
        assert!(matches_city(&mentor, "Москва"));
        assert!(!matches_city(&mentor, "Моск"));
        assert!(matches_city(&mentor, ALL));
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let mentor = create_test_mentor("IT", "Москва");
        assert!(matches_query(&mentor, "алексей"));
        assert!(matches_query(&mentor, "ПРОДУКТОВЫЕ"));
        assert!(!matches_query(&mentor, "блокчейн"));
    }

    #[test]
    fn test_empty_query_matches() {
        let mentor = create_test_mentor("IT", "Москва");
        assert!(matches_query(&mentor, ""));
    }

    #[test]
    fn test_conjunction_requires_all_three() {
        let mentor = create_test_mentor("IT", "Москва");
        assert!(mentor_matches(&mentor, "IT", "Москва", ""));
        // exactly one predicate failing excludes the mentor
        assert!(!mentor_matches(&mentor, "Маркетинг", "Москва", ""));
        assert!(!mentor_matches(&mentor, "IT", "Казань", ""));
        assert!(!mentor_matches(&mentor, "IT", "Москва", "блокчейн"));
    }
}
