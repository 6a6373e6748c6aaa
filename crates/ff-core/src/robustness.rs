//! Advisory robustness scoring for selectors.
//!
//! Informational only; selector generation never consults it.

use crate::types::Robustness;

/// Selectors scoring at least this are considered robust.
pub const ROBUST_THRESHOLD: i32 = 70;

/// More `.` characters than this costs points.
const MAX_CLASS_DOTS: usize = 3;

/// Score `selector` from 0 to 100.
///
/// Positional pseudo-classes and long class chains lower the score; ids and
/// `data-*`, `name` and `role` attributes raise it.
pub fn score_selector(selector: &str) -> Robustness {
    if selector.trim().is_empty() {
        return Robustness {
            score: 0,
            issues: vec!["Empty or invalid selector".to_string()],
            is_robust: false,
        };
    }

    let mut score: i32 = 100;
    let mut issues = Vec::new();

    if selector.contains(":nth-of-type(") {
        score -= 20;
        issues.push("Uses nth-of-type (fragile)".to_string());
    }
    if selector.contains(":nth-child(") {
        score -= 25;
        issues.push("Uses nth-child (very fragile)".to_string());
    }
    if selector.matches('.').count() > MAX_CLASS_DOTS {
        score -= 15;
        issues.push("Many class dependencies".to_string());
    }

    if selector.contains('#') {
        score += 10;
    }
    for marker in ["[data-", "[name=", "[role="] {
        if selector.contains(marker) {
            score += 5;
        }
    }

    Robustness {
        score: score.clamp(0, 100) as u8,
        issues,
        is_robust: score >= ROBUST_THRESHOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_selector_scores_high() {
        let r = score_selector("button#submit-button");
        assert_eq!(r.score, 100);
        assert!(r.is_robust);
        assert!(r.issues.is_empty());
    }

    #[test]
    fn test_attribute_selector() {
        let r = score_selector(r#"input[name="email"][data-testid="e"][role="textbox"]"#);
        assert_eq!(r.score, 100);
        assert!(r.is_robust);
    }

    #[test]
    fn test_path_selector_penalties() {
        let r = score_selector("html > body > ul.menu.primary > li.a.b:nth-of-type(2)");
        assert_eq!(r.score, 65);
        assert!(!r.is_robust);
        assert_eq!(
            r.issues,
            vec!["Uses nth-of-type (fragile)", "Many class dependencies"]
        );
    }

    #[test]
    fn test_nth_child_and_nth_of_type() {
        let r = score_selector("div:nth-child(2) > span:nth-of-type(1)");
        assert_eq!(r.score, 55);
        assert_eq!(r.issues.len(), 2);
    }

    #[test]
    fn test_dots_are_counted_anywhere() {
        let r = score_selector(r#"a[href="https://a.b.c.d.e/"]"#);
        assert_eq!(r.score, 85);
        assert_eq!(r.issues, vec!["Many class dependencies"]);
        assert_eq!(score_selector("div.a.b.c").score, 100);
        assert_eq!(score_selector(r#"a[href="https://a.b.c.d/"]"#).score, 100);
    }

    #[test]
    fn test_threshold_boundary() {
        // 100 - 20 - 15 + 5 = 70
        let r = score_selector("div.a.b > p.c.d:nth-of-type(2)[data-x]");
        assert_eq!(r.score, 70);
        assert!(r.is_robust);
    }

    #[test]
    fn test_empty_selector() {
        let r = score_selector("");
        assert_eq!(r.score, 0);
        assert!(!r.is_robust);
        assert_eq!(r.issues, vec!["Empty or invalid selector"]);
    }
}
