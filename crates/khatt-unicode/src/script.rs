//! Script resolution (UAX #24 plus propagation heuristics)
//!
//! The Unicode script property alone is not enough for shaping: spaces,
//! digits, and punctuation are `Common`, combining marks are `Inherited`,
//! and neither tells the shaper which rules to apply. The resolver walks
//! the paragraph once, making script-neutral characters adopt the most
//! recent strong script, with one refinement: paired punctuation is
//! matched on a stack so a closing bracket or quote takes the script its
//! opener resolved to, keeping the pair in one run even when the
//! bracketed text switches scripts.

use icu_properties::props::Script;
use icu_properties::script::ScriptWithExtensions;

use crate::stack::PairedStack;

/// Paired characters whose script should follow their counterpart rather
/// than their own Common classification. Openers sit at even indices,
/// their closers directly after; the table is sorted for binary search.
const PAIRED_CHARS: [char; 34] = [
    '(', ')', // ascii paired punctuation
    '<', '>',
    '[', ']',
    '{', '}',
    '\u{00ab}', '\u{00bb}', // guillemets
    '\u{2018}', '\u{2019}', // general punctuation
    '\u{201c}', '\u{201d}',
    '\u{2039}', '\u{203a}',
    '\u{3008}', '\u{3009}', // CJK paired punctuation
    '\u{300a}', '\u{300b}',
    '\u{300c}', '\u{300d}',
    '\u{300e}', '\u{300f}',
    '\u{3010}', '\u{3011}',
    '\u{3014}', '\u{3015}',
    '\u{3016}', '\u{3017}',
    '\u{3018}', '\u{3019}',
    '\u{301a}', '\u{301b}',
];

fn pair_index(ch: char) -> Option<usize> {
    PAIRED_CHARS.binary_search(&ch).ok()
}

fn is_open(pair_index: usize) -> bool {
    pair_index & 1 == 0
}

/// Index of the opener belonging to a closer's pair index
fn opening_of(pair_index: usize) -> usize {
    pair_index & !1
}

fn is_neutral(script: Script) -> bool {
    script == Script::Common || script == Script::Inherited
}

/// Resolves a concrete script for every code point.
///
/// After resolution no element is `Common` or `Inherited` unless the
/// whole paragraph lacks a strong script, in which case the initial
/// property values are kept as-is. Neutral characters ahead of the first
/// strong script are backfilled from it.
pub fn resolve_scripts(text: &[char]) -> Vec<Script> {
    let lookup = ScriptWithExtensions::new();
    let mut scripts: Vec<Script> = text.iter().map(|&ch| lookup.get_script_val(ch)).collect();

    // Last strong script seen, and the highest index already finalized.
    let mut last_script: Option<Script> = None;
    let mut last_set_index: Option<usize> = None;
    let mut stack = PairedStack::new(text.len());

    for i in 0..text.len() {
        let script = scripts[i];
        if script == Script::Common && last_script.is_some() {
            let last = last_script.unwrap();
            match pair_index(text[i]) {
                Some(pi) if is_open(pi) => {
                    scripts[i] = last;
                    last_set_index = Some(i);
                    stack.push(scripts[i], pi);
                }
                Some(pi) => {
                    // closer: unwind to the matching opener, if any survived
                    let open = opening_of(pi);
                    while stack.top().is_some_and(|entry| entry.pair_index != open) {
                        stack.pop();
                    }
                    if let Some(entry) = stack.top() {
                        scripts[i] = entry.script;
                        last_script = Some(entry.script);
                    } else {
                        scripts[i] = last;
                    }
                    last_set_index = Some(i);
                }
                None => {
                    scripts[i] = last;
                    last_set_index = Some(i);
                }
            }
        } else if script == Script::Inherited && last_script.is_some() {
            scripts[i] = last_script.unwrap();
            last_set_index = Some(i);
        } else if !is_neutral(script) {
            // strong script: backfill every index still waiting for one
            let from = last_set_index.map_or(0, |idx| idx + 1);
            for j in from..i {
                scripts[j] = script;
            }
            last_script = Some(script);
            last_set_index = Some(i);
        }
        // neutral before any strong script: left pending for backfill
    }

    scripts
}
