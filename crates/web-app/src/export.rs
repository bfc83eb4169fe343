//! Plain text representations of a workout for the clipboard, files and share targets.

use rand::Rng;
use workout_generator_domain as domain;

pub const SHARE_TITLE: &str = "Workout Generator";
pub const MAX_SHARE_CHARS: usize = 2000;
pub const MAX_MESSAGE_CHARS: usize = 1500;

const MESSAGE_URL: &str = "https://wa.me/?text=";

/// Numbered list of exercise names.
#[must_use]
pub fn copy_text(items: &[domain::Exercise]) -> String {
    let mut lines = vec![String::from("Workout:")];
    lines.extend(
        items
            .iter()
            .enumerate()
            .map(|(i, exercise)| format!("{}. {}", i + 1, exercise.name)),
    );
    lines.join("\n")
}

#[must_use]
pub fn export_title(muscle_name: &str) -> String {
    format!("Workout • {muscle_name}")
}

/// Detailed workout description with tags and a freshly drawn prescription per exercise.
#[must_use]
pub fn workout_to_text(items: &[domain::Exercise], title: &str, rng: &mut impl Rng) -> String {
    let mut lines = vec![title.to_string(), String::new()];
    for (i, exercise) in items.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, exercise.name));
        lines.push(format!("   Tags: {}", domain::tags(exercise).join(", ")));
        lines.push(format!("   {}", domain::prescribe(exercise, rng)));
        lines.push(String::new());
    }
    lines.join("\n")
}

#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[must_use]
pub fn share_text(text: &str) -> &str {
    truncate_chars(text, MAX_SHARE_CHARS)
}

#[must_use]
pub fn message_link(text: &str) -> String {
    format!(
        "{MESSAGE_URL}{}",
        encode_uri_component(truncate_chars(text, MAX_MESSAGE_CHARS))
    )
}

/// `workout-{muscle}.txt` in lower case with whitespace runs replaced by a dash.
#[must_use]
pub fn download_file_name(muscle_name: &str) -> String {
    let muscle_name = if muscle_name.is_empty() {
        "session"
    } else {
        muscle_name
    };
    let file_name = format!("workout-{muscle_name}.txt").to_lowercase();

    let mut result = String::with_capacity(file_name.len());
    let mut in_whitespace = false;
    for c in file_name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                result.push('-');
            }
            in_whitespace = true;
        } else {
            result.push(c);
            in_whitespace = false;
        }
    }
    result
}

/// Percent-encodes UTF-8 bytes of everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
#[must_use]
pub fn encode_uri_component(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for byte in text.bytes() {
        if byte.is_ascii_alphanumeric() || b"-_.!~*'()".contains(&byte) {
            result.push(char::from(byte));
        } else {
            result.push_str(&format!("%{byte:02X}"));
        }
    }
    result
}
