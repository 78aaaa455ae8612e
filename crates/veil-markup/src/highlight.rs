//! Offset-corrected span highlighting

use crate::sanitizer::{escape, sanitize};
use veil_core::{Entity, EntityType};

/// Produce HTML markup with each entity span wrapped in a `<mark>` element.
///
/// Entities may arrive in any order; they are stable-sorted by `start`
/// (ties keep their relative order) and applied in a single walk over the
/// growing string, with a running offset for the length added by earlier
/// markup. Overlapping spans therefore produce an order-dependent result:
/// a later span whose offsets land inside previously inserted markup wraps
/// whatever now sits at those positions. That mirrors the behavior this
/// renderer is compatible with and is covered by tests rather than
/// corrected.
///
/// Total over its inputs: spans that do not land on valid boundaries of the
/// current string are skipped, never panicked on. The assembled markup gets
/// a final [`sanitize`] pass; with no entities the escaped text is returned
/// as-is.
///
/// Escaping is asymmetric by construction: only the wrapped span text and
/// the wrapper attributes are escaped, while the text surrounding the marks
/// passes through verbatim. Escaping the surroundings would shift every
/// length the offset walk depends on, so the [`sanitize`] pass is the layer
/// that neutralizes executable constructs there. The empty-entity path has
/// no offsets to protect and returns fully escaped text.
pub fn annotate(text: &str, entities: &[Entity]) -> String {
    if entities.is_empty() {
        return escape(text);
    }

    let mut sorted: Vec<&Entity> = entities.iter().collect();
    sorted.sort_by_key(|e| e.start);

    let mut rewritten = text.to_string();
    // Cumulative length added by markup inserted so far
    let mut offset = 0usize;

    for entity in sorted {
        let start = entity.start + offset;
        let end = entity.end + offset;

        let Some(span_text) = rewritten.get(start..end) else {
            continue;
        };

        let markup = mark_element(span_text, entity.entity_type, entity.score);
        offset += markup.len() - span_text.len();
        rewritten.replace_range(start..end, &markup);
    }

    sanitize(&rewritten)
}

/// Build the wrapper element for one highlighted span.
///
/// The span text and entity type are escaped before embedding; the score is
/// rendered with two decimals. No inline styles: presentation is left to a
/// stylesheet keyed on the class.
fn mark_element(span_text: &str, entity_type: EntityType, score: f64) -> String {
    let safe_text = escape(span_text);
    let safe_type = escape(entity_type.as_str());
    format!(
        "<mark class=\"pii\" data-entity-type=\"{safe_type}\" data-score=\"{score:.2}\" \
         title=\"{safe_type} ({score:.2})\">{safe_text}</mark>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(start: usize, end: usize, score: f64, ty: EntityType) -> Entity {
        Entity::new(start, end, score, ty)
    }

    #[test]
    fn test_no_entities_returns_escaped_text() {
        assert_eq!(annotate("plain text", &[]), "plain text");
        assert_eq!(annotate("a < b & c", &[]), "a &lt; b &amp; c");
    }

    #[test]
    fn test_single_entity_wrapped() {
        let text = "Contact me at jane@example.com today";
        let entities = vec![entity(14, 30, 0.9, EntityType::Email)];

        let markup = annotate(text, &entities);

        assert_eq!(
            markup,
            "Contact me at <mark class=\"pii\" data-entity-type=\"EMAIL\" data-score=\"0.90\" \
             title=\"EMAIL (0.90)\">jane@example.com</mark> today"
        );
    }

    #[test]
    fn test_entities_assembled_in_ascending_start_order() {
        let text = "mail jane@example.com or call 555-123-4567 now";
        // Deliberately out of input order
        let entities = vec![
            entity(30, 42, 0.85, EntityType::PhoneNumber),
            entity(5, 21, 0.9, EntityType::Email),
        ];

        let markup = annotate(text, &entities);

        let email_pos = markup.find("jane@example.com").unwrap();
        let phone_pos = markup.find("555-123-4567").unwrap();
        assert!(email_pos < phone_pos);

        // Both literals survive inside their wrappers, surrounding text intact
        assert!(markup.starts_with("mail <mark"));
        assert!(markup.ends_with("</mark> now"));
        assert!(markup.contains("data-entity-type=\"PHONE_NUMBER\""));
        assert!(markup.contains("data-score=\"0.85\""));
    }

    #[test]
    fn test_output_independent_of_input_order_for_disjoint_spans() {
        let text = "a 192.168.1.1 b 10/10/2010 c";
        let forward = vec![
            entity(2, 13, 0.85, EntityType::IpAddress),
            entity(16, 26, 0.8, EntityType::DateTime),
        ];
        let reversed: Vec<Entity> = forward.iter().rev().cloned().collect();

        assert_eq!(annotate(text, &forward), annotate(text, &reversed));
    }

    #[test]
    fn test_adjacent_spans() {
        let text = "ab";
        let entities = vec![
            entity(0, 1, 0.7, EntityType::Person),
            entity(1, 2, 0.7, EntityType::Person),
        ];

        let markup = annotate(text, &entities);

        assert_eq!(markup.matches("<mark").count(), 2);
        assert!(markup.contains(">a</mark>"));
        assert!(markup.contains(">b</mark>"));
    }

    #[test]
    fn test_entity_text_is_escaped_inside_wrapper() {
        let text = "x <Jane Smith> y";
        let entities = vec![entity(2, 14, 0.7, EntityType::Person)];

        let markup = annotate(text, &entities);

        assert!(markup.contains(">&lt;Jane Smith&gt;</mark>"));
        assert!(!markup.contains("><Jane Smith></mark>"));
    }

    #[test]
    fn test_surrounding_text_is_verbatim_but_sanitized() {
        // Text outside the marks is not escaped (escaping would shift the
        // offsets the walk relies on), but the final sanitize pass still
        // strips executable constructs from it.
        let text = "<b>x</b> jane@example.com <script>alert(1)</script>";
        let entities = vec![entity(9, 25, 0.9, EntityType::Email)];

        let markup = annotate(text, &entities);

        assert!(markup.starts_with("<b>x</b> <mark"));
        assert!(markup.contains(">jane@example.com</mark>"));
        assert!(!markup.contains("<script"));
        assert!(!markup.contains("alert(1)"));
    }

    #[test]
    fn test_overlapping_spans_are_order_dependent_but_total() {
        // Overlap is not conflict-resolved: the second span's offsets land
        // inside the first span's inserted markup. The call must still
        // return deterministically without panicking.
        let text = "abcdef";
        let entities = vec![
            entity(0, 4, 0.9, EntityType::Email),
            entity(2, 6, 0.85, EntityType::PhoneNumber),
        ];

        let first = annotate(text, &entities);
        let second = annotate(text, &entities);
        assert_eq!(first, second);
        assert!(first.contains("abcd"));
    }

    #[test]
    fn test_out_of_bounds_span_is_skipped() {
        let text = "short";
        let entities = vec![entity(2, 99, 0.9, EntityType::Email)];

        assert_eq!(annotate(text, &entities), "short");
    }

    #[test]
    fn test_score_formatting_two_decimals() {
        let text = "555-123-4567";
        let entities = vec![entity(0, 12, 0.85, EntityType::PhoneNumber)];

        let markup = annotate(text, &entities);
        assert!(markup.contains("data-score=\"0.85\""));
        assert!(markup.contains("title=\"PHONE_NUMBER (0.85)\""));
    }

    #[test]
    fn test_whole_text_span() {
        let text = "jane@example.com";
        let entities = vec![entity(0, 16, 0.9, EntityType::Email)];

        let markup = annotate(text, &entities);
        assert!(markup.starts_with("<mark"));
        assert!(markup.ends_with("</mark>"));
        assert!(markup.contains(">jane@example.com</mark>"));
    }
}
