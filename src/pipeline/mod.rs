pub mod extraction;
pub mod interpretation;
pub mod safety;
pub mod recommendation;
pub mod processor; // Stage coordinator

pub use processor::*;

/// Uppercase the first letter of every alphabetic run: `"a1c"` → `"A1C"`,
/// `"white blood cells"` → `"White Blood Cells"`.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for ch in name.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
