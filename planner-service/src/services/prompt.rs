//! Prompt construction for plan generation.
//!
//! A prompt is the planner persona and output contract, at most one
//! regional hint picked from the query, and the user's request verbatim.

/// Line separating the instructions from the user's text.
pub const USER_REQUEST_MARKER: &str = "---_USER_REQUEST_---";

const PLANNER_PREAMBLE: &str = r#"
You are an expert Indian Wedding Planner AI. Your task is to create a detailed, practical, and culturally relevant wedding plan based on user requests. All budgetary figures must be in Indian Rupees (INR).

You must provide the plan ONLY in the following structured JSON format. Do not include any other text, explanations, or markdown formatting like ```json.
{
    "event_name": "string",
    "event_type": "string (e.g., Rajasthani Royal Wedding, Intimate Kerala Wedding)",
    "event_date": "YYYY-MM-DD (or a suggested month/season if not specified)",
    "number_of_guests": "integer",
    "budget": "float (in INR)",
    "required_components": [
        {"component_type": "Venue", "details": "string (e.g., Palace Hotel in Udaipur, Beach Resort in Goa)", "preferences": "string"},
        {"component_type": "Caterer", "details": "string (e.g., Authentic Punjabi cuisine, South Indian Sadhya)", "preferences": "string"},
        {"component_type": "Decorator", "details": "string (e.g., Marigold and Gota Patti theme, Modern minimalist theme)", "preferences": "string"},
        {"component_type": "Mehendi Artist", "details": "string", "preferences": "string"},
        {"component_type": "Photographer/Videographer", "details": "string (e.g., Candid and traditional mix)", "preferences": "string"},
        {"component_type": "Entertainment", "details": "string (e.g., Bollywood DJ, Live Sangeet band, Dhol players)", "preferences": "string"},
        {"component_type": "Pandit/Priest", "details": "string", "preferences": "string"},
        {"component_type": "Wedding Choreographer", "details": "string (for Sangeet performances)", "preferences": "string"}
    ],
    "action_items": ["string (a detailed list of tasks to be done)"]
}
"#;

const RAJASTHANI_HINT: &str = "Hint: For a Rajasthani wedding, suggest palace or fort venues, folk dancers like Ghoomar or Kalbelia, and a 'Gota Patti' decor theme.";
const KERALA_HINT: &str = "Hint: For a Kerala wedding, suggest backwater resort venues, a traditional Sadhya feast on banana leaves, and Chenda Melam percussionists.";
const GOAN_HINT: &str = "Hint: For a Goan wedding, suggest beach resort venues, a seaside ceremony, and a mix of Goan and continental cuisine. Mention options for both church weddings and Hindu ceremonies.";
const PUNJABI_HINT: &str = "Hint: For a Punjabi wedding, suggest farmhouse venues, high-energy Dhol players and a Jaggo night, and a rich menu with lots of tandoori items and chaat stalls.";
const DELHI_HINT: &str = "Hint: For a Delhi wedding, suggest luxury banquet halls or farmhouses in Chattarpur. The style can be very grand and modern.";
const MUMBAI_HINT: &str = "Hint: For a Mumbai wedding, suggest luxury hotels or rooftop bars. The style is often chic, modern, and space-conscious.";

/// A hint applied when the lowercased query mentions any of `keywords`.
#[derive(Debug, Clone, Copy)]
pub struct RegionalHint {
    pub keywords: &'static [&'static str],
    pub hint: &'static str,
}

impl RegionalHint {
    pub fn matches(&self, query_lower: &str) -> bool {
        self.keywords.iter().any(|k| query_lower.contains(k))
    }
}

/// Evaluated in order; the first match wins.
pub const REGIONAL_HINTS: &[RegionalHint] = &[
    RegionalHint {
        keywords: &["rajasthan", "udaipur", "jaipur"],
        hint: RAJASTHANI_HINT,
    },
    RegionalHint {
        keywords: &["kerala"],
        hint: KERALA_HINT,
    },
    RegionalHint {
        keywords: &["goa"],
        hint: GOAN_HINT,
    },
    RegionalHint {
        keywords: &["punjabi"],
        hint: PUNJABI_HINT,
    },
    RegionalHint {
        keywords: &["delhi"],
        hint: DELHI_HINT,
    },
    RegionalHint {
        keywords: &["mumbai"],
        hint: MUMBAI_HINT,
    },
];

/// The hint for `query`, if any region is mentioned.
pub fn regional_hint(query: &str) -> Option<&'static str> {
    let query_lower = query.to_lowercase();
    REGIONAL_HINTS
        .iter()
        .find(|h| h.matches(&query_lower))
        .map(|h| h.hint)
}

/// Build the full generation prompt for `query`.
pub fn build_prompt(query: &str) -> String {
    let hint = regional_hint(query)
        .map(|h| format!("\n{}", h))
        .unwrap_or_default();

    format!(
        "{}\n{}\n\nNow, generate a complete plan for the following user request:\n{}\n{}",
        PLANNER_PREAMBLE, hint, USER_REQUEST_MARKER, query
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn udaipur_adds_rajasthani_hint_once() {
        let prompt = build_prompt("A royal wedding in UDAIPUR for 300 guests");
        assert_eq!(prompt.matches(RAJASTHANI_HINT).count(), 1);
    }

    #[test]
    fn first_listed_region_wins() {
        // Kerala is listed before Mumbai
        let prompt = build_prompt("Mumbai couple wants a Kerala backwater wedding");

        assert!(prompt.contains(KERALA_HINT));
        assert!(!prompt.contains(MUMBAI_HINT));
    }

    #[test]
    fn rajasthan_outranks_later_regions() {
        assert_eq!(
            regional_hint("Punjabi family, Jaipur palace"),
            Some(RAJASTHANI_HINT)
        );
    }

    #[test]
    fn no_region_means_no_hint() {
        let prompt = build_prompt("Small intimate wedding by a lake");

        assert!(!prompt.contains("Hint:"));
        assert!(regional_hint("Small intimate wedding by a lake").is_none());
    }

    #[test]
    fn query_follows_marker_verbatim() {
        let query = "Goa beach wedding, 150 guests, budget 40 lakh";
        let prompt = build_prompt(query);

        let expected_tail = format!("{}\n{}", USER_REQUEST_MARKER, query);
        assert!(prompt.ends_with(&expected_tail));
        assert!(prompt.starts_with(PLANNER_PREAMBLE));
    }

    #[test]
    fn prompt_is_deterministic() {
        let query = "Delhi farmhouse wedding";
        assert_eq!(build_prompt(query), build_prompt(query));
    }

    #[test]
    fn every_region_has_a_matching_keyword() {
        for hint in REGIONAL_HINTS {
            for keyword in hint.keywords {
                assert_eq!(keyword.to_lowercase(), *keyword);
                assert!(hint.matches(keyword));
            }
        }
    }
}
