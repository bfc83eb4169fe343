use rand::{Rng, seq::SliceRandom};

use crate::Exercise;

const CARDIO_KEYWORDS: &[&str] = &["rowing", "run", "bike", "jump"];
const CORE_KEYWORDS: &[&str] = &["plank", "hollow", "crunch", "leg raise", "sit-up"];

const CARDIO_MINUTES: &[&str] = &["6–8", "8–10", "10–12"];
const CORE_SECONDS: &[&str] = &["20–30", "30–45", "45–60"];
const STRENGTH_REPS: &[&str] = &["6–8", "8–12", "10–15"];

const MAX_DESCRIPTION_CHARS: usize = 260;

#[derive(strum::Display, strum::EnumIter, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Cardio,
    Core,
    Strength,
}

#[must_use]
pub fn classify(exercise: &Exercise) -> Category {
    let name = exercise.name.to_lowercase();
    if CARDIO_KEYWORDS.iter().any(|k| name.contains(k)) {
        Category::Cardio
    } else if CORE_KEYWORDS.iter().any(|k| name.contains(k)) {
        Category::Core
    } else {
        Category::Strength
    }
}

/// Suggested volume for the exercise. The range is drawn anew on every call.
#[must_use]
pub fn prescribe(exercise: &Exercise, rng: &mut impl Rng) -> String {
    match classify(exercise) {
        Category::Cardio => format!(
            "Suggestion: {} minutes steady pace",
            draw(CARDIO_MINUTES, rng)
        ),
        Category::Core => format!("Suggestion: 3 sets × {} sec", draw(CORE_SECONDS, rng)),
        Category::Strength => format!("Suggestion: 3 sets × {} reps", draw(STRENGTH_REPS, rng)),
    }
}

fn draw(ranges: &[&'static str], rng: &mut impl Rng) -> &'static str {
    ranges.choose(rng).copied().unwrap_or_default()
}

/// Display tags: bodyweight or equipment, then the category, then up to two equipment names.
#[must_use]
pub fn tags(exercise: &Exercise) -> Vec<String> {
    let kind = if exercise.is_bodyweight() {
        "Bodyweight"
    } else {
        "Equipment"
    };
    let mut tags = vec![kind.to_string(), classify(exercise).to_string()];
    tags.extend(exercise.equipment.iter().take(2).cloned());
    tags
}

/// Description as plain text, shortened for display.
#[must_use]
pub fn plain_description(exercise: &Exercise) -> String {
    let text = strip_html(&exercise.description);
    let text = text.trim();
    if text.is_empty() {
        return String::from("No description available.");
    }
    text.chars().take(MAX_DESCRIPTION_CHARS).collect()
}

/// A `<` only opens a tag when followed by a letter, `/` or `!`. Otherwise it is kept as text.
fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut chars = html.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '<' if !in_tag && chars.peek().copied().is_some_and(opens_tag) => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    decode_entities(&text)
}

fn opens_tag(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '/' | '!')
}

fn decode_entities(text: &str) -> String {
    const ENTITIES: &[(&str, &str)] = &[
        ("&nbsp;", " "),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&#39;", "'"),
        ("&#039;", "'"),
        ("&apos;", "'"),
        ("&amp;", "&"),
    ];

    ENTITIES
        .iter()
        .fold(text.to_string(), |text, (entity, replacement)| {
            text.replace(entity, replacement)
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rand::{SeedableRng, rngs::StdRng};
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    fn exercise(name: &str, equipment: &[&str]) -> Exercise {
        Exercise {
            id: 1.into(),
            name: name.to_string(),
            description: String::from("<p>Keep your back <b>straight</b> &amp; breathe.</p>"),
            equipment: equipment.iter().map(|e| (*e).to_string()).collect(),
        }
    }

    #[rstest]
    #[case("Rowing Machine", Category::Cardio)]
    #[case("Running", Category::Cardio)]
    #[case("Jumping Jacks", Category::Cardio)]
    #[case("Stationary Bike", Category::Cardio)]
    #[case("Plank", Category::Core)]
    #[case("Hollow Hold", Category::Core)]
    #[case("Crunches", Category::Cardio)]
    #[case("Hanging Leg Raise", Category::Core)]
    #[case("Sit-up", Category::Core)]
    #[case("Jump Plank", Category::Cardio)]
    #[case("Push-up", Category::Strength)]
    #[case("Bench Press", Category::Strength)]
    fn test_classify(#[case] name: &str, #[case] expected: Category) {
        assert_eq!(classify(&exercise(name, &[])), expected);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(
            Category::iter().map(|c| c.to_string()).collect::<Vec<_>>(),
            vec!["Cardio", "Core", "Strength"]
        );
    }

    #[rstest]
    #[case(
        "Running",
        &[
            "Suggestion: 6–8 minutes steady pace",
            "Suggestion: 8–10 minutes steady pace",
            "Suggestion: 10–12 minutes steady pace",
        ]
    )]
    #[case(
        "Plank",
        &[
            "Suggestion: 3 sets × 20–30 sec",
            "Suggestion: 3 sets × 30–45 sec",
            "Suggestion: 3 sets × 45–60 sec",
        ]
    )]
    #[case(
        "Squat",
        &[
            "Suggestion: 3 sets × 6–8 reps",
            "Suggestion: 3 sets × 8–12 reps",
            "Suggestion: 3 sets × 10–15 reps",
        ]
    )]
    fn test_prescribe(#[case] name: &str, #[case] expected: &[&str]) {
        let exercise = exercise(name, &[]);
        let mut rng = StdRng::seed_from_u64(0);
        let prescriptions = (0..100)
            .map(|_| prescribe(&exercise, &mut rng))
            .collect::<HashSet<_>>();
        assert_eq!(
            prescriptions,
            expected
                .iter()
                .map(|p| (*p).to_string())
                .collect::<HashSet<_>>()
        );
    }

    #[rstest]
    #[case("Push-up", &[], &["Bodyweight", "Strength"])]
    #[case("Plank", &[], &["Bodyweight", "Core"])]
    #[case("Rowing", &["Rowing machine"], &["Equipment", "Cardio", "Rowing machine"])]
    #[case(
        "Bench Press",
        &["Barbell", "Bench", "Rack"],
        &["Equipment", "Strength", "Barbell", "Bench"]
    )]
    fn test_tags(#[case] name: &str, #[case] equipment: &[&str], #[case] expected: &[&str]) {
        let tags = tags(&exercise(name, equipment));
        assert_eq!(tags, expected);
    }

    #[test]
    fn test_tags_prefix_matches_exercise() {
        for (name, equipment) in [
            ("Squat", vec![]),
            ("Crunch", vec!["Mat"]),
            ("Bike", vec!["Bike", "Helmet", "Shoes"]),
        ] {
            let exercise = exercise(name, &equipment);
            let tags = tags(&exercise);
            assert!(tags.len() >= 2);
            assert_eq!(
                tags[0],
                if exercise.is_bodyweight() {
                    "Bodyweight"
                } else {
                    "Equipment"
                }
            );
            assert_eq!(tags[1], classify(&exercise).to_string());
        }
    }

    #[rstest]
    #[case(
        "<p>Keep your back <b>straight</b> &amp; breathe.</p>",
        "Keep your back straight & breathe."
    )]
    #[case("  ", "No description available.")]
    #[case("<p></p>", "No description available.")]
    #[case("1 &lt; 2", "1 < 2")]
    #[case("<p>Keep reps < 10 per set, rest 60s.</p>", "Keep reps < 10 per set, rest 60s.")]
    #[case("<!-- note --><b>Hold</b> 3<5", "Hold 3<5")]
    fn test_plain_description(#[case] description: &str, #[case] expected: &str) {
        let mut exercise = exercise("Squat", &[]);
        exercise.description = description.to_string();
        assert_eq!(plain_description(&exercise), expected);
    }

    #[test]
    fn test_plain_description_is_shortened() {
        let mut exercise = exercise("Squat", &[]);
        exercise.description = "a".repeat(300);
        assert_eq!(plain_description(&exercise).chars().count(), 260);
    }
}
