// src/normalize.rs
//! Text normalization applied before validation and scoring.
//!
//! Removes URL tokens, `@mentions` and bare `#` markers (the tagged word stays),
//! then folds whitespace. Removal repeats until nothing changes, so the output is
//! a fixed point and `normalize(normalize(x)) == normalize(x)` holds for any input
//! (e.g. `h#ttp://x` only becomes a URL after the `#` is gone).

use once_cell::sync::OnceCell;
use regex::Regex;

fn re_url() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"(?i)http\S+|www\.\S+").unwrap())
}

fn re_mention() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"@\w+").unwrap())
}

/// Normalize raw item text. Total: never fails, empty in → empty out.
pub fn normalize(text: &str) -> String {
    let mut cur = fold_whitespace(text);
    loop {
        let next = strip_once(&cur);
        if next == cur {
            return cur;
        }
        cur = next;
    }
}

fn strip_once(s: &str) -> String {
    let out = s.replace('#', "");
    let out = re_url().replace_all(&out, "");
    let out = re_mention().replace_all(&out, "");
    fold_whitespace(&out)
}

/// Collapse any run of (Unicode) whitespace into one ASCII space and trim.
pub fn fold_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_urls_mentions_and_hash_markers() {
        let s = "Big win for #climate @greenpeace https://t.co/abc and www.example.com/x today";
        assert_eq!(normalize(s), "Big win for climate and today");
    }

    #[test]
    fn folds_whitespace_and_nbsp() {
        assert_eq!(normalize("  A\u{00A0}\n\tB   C  "), "A B C");
    }

    #[test]
    fn empty_and_blank_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t"), "");
        assert_eq!(normalize("@only #"), "");
    }

    #[test]
    fn removal_exposing_new_tokens_still_idempotent() {
        for s in [
            "h#ttp://evil.example look",
            "www@x.example.org fine",
            "@a@b@c words",
            "##tag ## # hash",
            "HTTP://Loud.EXAMPLE shout",
            "naïve café — ünïcode 😀 @user",
        ] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "input: {s:?}");
        }
    }

    #[test]
    fn url_removal_is_case_insensitive() {
        assert_eq!(normalize("see HTTPS://Example.com now"), "see now");
    }
}
