use crate::structures::{ContextEntry, GoldSupport};

/// Scores retrieval against the gold label: 1 when correct, 0 otherwise.
///
/// With `NoSupport`, only an empty retrieval is correct; returning any
/// document for an unsupported question counts as a retrieval error.
/// With `HasSupport`, the gold document may appear at any position.
pub fn score_context_accuracy(contexts: &[ContextEntry], gold: &GoldSupport) -> u8 {
    match gold {
        GoldSupport::NoSupport => {
            if contexts.is_empty() { 1 } else { 0 }
        }
        GoldSupport::HasSupport(doc_id) => {
            if contexts.iter().any(|c| &c.doc_id == doc_id) { 1 } else { 0 }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(doc_id: &str) -> ContextEntry {
        ContextEntry::new(doc_id, "...")
    }

    // Empty retrieval scores as correct when nothing should be retrieved.
    // This reads backwards next to "success requires a matching document",
    // and is kept as-is on purpose.
    #[test]
    fn test_no_support_empty_context_scores_one() {
        assert_eq!(score_context_accuracy(&[], &GoldSupport::NoSupport), 1);
    }

    #[test]
    fn test_no_support_with_context_scores_zero() {
        let contexts = vec![ContextEntry::new("D9", "x")];
        assert_eq!(score_context_accuracy(&contexts, &GoldSupport::NoSupport), 0);
    }

    #[test]
    fn test_gold_matched_at_any_position() {
        let gold = GoldSupport::doc("D3");
        assert_eq!(score_context_accuracy(&[ctx("D3")], &gold), 1);
        assert_eq!(score_context_accuracy(&[ctx("D1"), ctx("D2"), ctx("D3")], &gold), 1);
        assert_eq!(score_context_accuracy(&[ctx("D3"), ctx("D1")], &gold), 1);
    }

    #[test]
    fn test_gold_unmatched() {
        let gold = GoldSupport::doc("D3");
        assert_eq!(score_context_accuracy(&[ctx("D1")], &gold), 0);
        assert_eq!(score_context_accuracy(&[], &gold), 0);
    }

    #[test]
    fn test_doc_id_match_is_exact() {
        let gold = GoldSupport::doc("D3");
        assert_eq!(score_context_accuracy(&[ctx("d3"), ctx("D30")], &gold), 0);
    }
}
