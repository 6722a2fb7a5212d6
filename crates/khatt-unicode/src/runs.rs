//! Splitting level runs at script boundaries
//!
//! A level run can still mix scripts ("abc مرحبا" inside one LTR
//! context, say), and the shaper needs script-pure input. The splitter
//! walks each level run in its own reading order - low to high for
//! LTR and vertical runs, high to low for RTL so the pieces come out in
//! visual order - and starts a new run whenever the resolved script
//! changes.

use icu_properties::props::Script;

use khatt_core::types::{BaseDirection, Direction, Run};

use crate::bidi::BidiRun;

/// Subdivides level runs into script-pure shaping-ready runs.
///
/// `scripts` is the fully resolved script array. The returned runs cover
/// the same indices as `bidi_runs`, in visual order: the order of level
/// runs is preserved, and within an RTL level run the rightmost script
/// segment comes first.
pub fn split_runs(scripts: &[Script], bidi_runs: &[BidiRun], base: BaseDirection) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();

    for bidi_run in bidi_runs {
        let direction = Direction::from_level(base, bidi_run.level);

        if direction.is_backward() {
            let start = bidi_run.pos + bidi_run.len - 1;
            let mut run = Run {
                pos: start,
                len: 0,
                script: scripts[start],
                direction,
            };
            for j in (0..bidi_run.len).rev() {
                let idx = bidi_run.pos + j;
                let script = scripts[idx];
                if script != run.script {
                    runs.push(run);
                    run = Run { pos: idx, len: 1, script, direction };
                } else {
                    // keep pos at the low end of the range while growing
                    // the run leftwards
                    run.len += 1;
                    run.pos = idx;
                }
            }
            runs.push(run);
        } else {
            let mut run = Run {
                pos: bidi_run.pos,
                len: 0,
                script: scripts[bidi_run.pos],
                direction,
            };
            for j in 0..bidi_run.len {
                let idx = bidi_run.pos + j;
                let script = scripts[idx];
                if script != run.script {
                    runs.push(run);
                    run = Run { pos: idx, len: 1, script, direction };
                } else {
                    run.len += 1;
                }
            }
            runs.push(run);
        }
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidi::level_runs;
    use crate::script::resolve_scripts;

    fn layout_runs(text: &str, base: BaseDirection) -> (Vec<char>, Vec<Run>) {
        let chars: Vec<char> = text.chars().collect();
        let scripts = resolve_scripts(&chars);
        let bidi_runs = level_runs(&chars, base);
        let runs = split_runs(&scripts, &bidi_runs, base);
        (chars, runs)
    }

    fn assert_coverage(runs: &[Run], len: usize) {
        let mut seen = vec![false; len];
        for run in runs {
            assert!(run.len >= 1);
            for i in run.range() {
                assert!(!seen[i], "index {i} appears in two runs");
                seen[i] = true;
            }
        }
        assert!(seen.into_iter().all(|covered| covered));
    }

    #[test]
    fn single_script_single_run() {
        let (chars, runs) = layout_runs("hello", BaseDirection::LeftToRight);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].pos, 0);
        assert_eq!(runs[0].len, 5);
        assert_eq!(runs[0].script, Script::Latin);
        assert_eq!(runs[0].direction, Direction::LeftToRight);
        assert_coverage(&runs, chars.len());
    }

    #[test]
    fn script_change_splits_within_a_level_run() {
        // Latin then Han, both LTR: one level run, two shaping runs
        let (chars, runs) = layout_runs("ab漢字", BaseDirection::LeftToRight);
        assert_eq!(runs.len(), 2);
        assert_eq!((runs[0].pos, runs[0].len, runs[0].script), (0, 2, Script::Latin));
        assert_eq!((runs[1].pos, runs[1].len, runs[1].script), (2, 2, Script::Han));
        assert_coverage(&runs, chars.len());
    }

    #[test]
    fn mixed_direction_paragraph() {
        // "abc " + three Arabic letters + " xyz": the space after the
        // Arabic segment resolves to Arabic, giving it its own LTR run
        let (chars, runs) =
            layout_runs("abc \u{627}\u{644}\u{639} xyz", BaseDirection::LeftToRight);
        assert_coverage(&runs, chars.len());
        assert_eq!(runs.len(), 4);

        assert_eq!((runs[0].pos, runs[0].len), (0, 4));
        assert_eq!(runs[0].script, Script::Latin);
        assert_eq!(runs[0].direction, Direction::LeftToRight);

        assert_eq!((runs[1].pos, runs[1].len), (4, 3));
        assert_eq!(runs[1].script, Script::Arabic);
        assert_eq!(runs[1].direction, Direction::RightToLeft);

        assert_eq!((runs[2].pos, runs[2].len), (7, 1));
        assert_eq!(runs[2].script, Script::Arabic);
        assert_eq!(runs[2].direction, Direction::LeftToRight);

        assert_eq!((runs[3].pos, runs[3].len), (8, 3));
        assert_eq!(runs[3].script, Script::Latin);
        assert_eq!(runs[3].direction, Direction::LeftToRight);
    }

    #[test]
    fn backward_walk_emits_rightmost_segment_first() {
        // Arabic then Hebrew inside one RTL level run. The logically
        // first Arabic text sits rightmost, so listing the pieces in
        // visual order means the Hebrew segment comes first.
        let (chars, runs) = layout_runs("\u{627}\u{628}אב", BaseDirection::RightToLeft);
        assert_coverage(&runs, chars.len());
        assert_eq!(runs.len(), 2);
        assert_eq!((runs[0].pos, runs[0].len), (2, 2));
        assert_eq!(runs[0].script, Script::Hebrew);
        assert_eq!((runs[1].pos, runs[1].len), (0, 2));
        assert_eq!(runs[1].script, Script::Arabic);

        for run in &runs {
            assert_eq!(run.direction, Direction::RightToLeft);
        }
    }

    #[test]
    fn pos_stays_at_the_low_end_when_walking_backward() {
        let (chars, runs) = layout_runs("\u{627}\u{644}\u{639}", BaseDirection::RightToLeft);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].pos, 0);
        assert_eq!(runs[0].len, 3);
        assert_coverage(&runs, chars.len());
    }

    #[test]
    fn vertical_runs_split_on_script_only() {
        let (chars, runs) = layout_runs("漢字ab", BaseDirection::TopToBottom);
        assert_eq!(runs.len(), 2);
        for run in &runs {
            assert_eq!(run.direction, Direction::TopToBottom);
        }
        assert_coverage(&runs, chars.len());
    }

    #[test]
    fn script_purity_holds_for_every_run() {
        let text = "abc \u{627}\u{644} (12) אב e\u{301} 漢";
        let chars: Vec<char> = text.chars().collect();
        let scripts = resolve_scripts(&chars);
        let bidi_runs = level_runs(&chars, BaseDirection::Default);
        let runs = split_runs(&scripts, &bidi_runs, BaseDirection::Default);

        assert_coverage(&runs, chars.len());
        for run in &runs {
            for i in run.range() {
                assert_eq!(scripts[i], run.script);
            }
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::bidi::level_runs;
    use crate::script::resolve_scripts;
    use proptest::prelude::*;

    // Mixed soup of Latin, Arabic, Hebrew, Han, digits, spaces, and
    // paired punctuation to push all the resolver and splitter branches.
    const SOUP: &str = "[a-zA-Z0-9 \\(\\)\\[\\]\u{ab}\u{bb}\u{201c}\u{201d}\u{5d0}-\u{5ea}\u{627}-\u{64a}\u{4e00}-\u{4e10}]{1,40}";

    fn base_directions() -> impl Strategy<Value = BaseDirection> {
        prop_oneof![
            Just(BaseDirection::Default),
            Just(BaseDirection::LeftToRight),
            Just(BaseDirection::RightToLeft),
            Just(BaseDirection::TopToBottom),
        ]
    }

    proptest! {
        // Every index of the paragraph lands in exactly one run.
        #[test]
        fn prop_runs_cover_every_index_once(text in SOUP, base in base_directions()) {
            let chars: Vec<char> = text.chars().collect();
            let scripts = resolve_scripts(&chars);
            let bidi_runs = level_runs(&chars, base);
            let runs = split_runs(&scripts, &bidi_runs, base);

            let mut seen = vec![false; chars.len()];
            for run in &runs {
                prop_assert!(run.len >= 1);
                for i in run.range() {
                    prop_assert!(!seen[i]);
                    seen[i] = true;
                }
            }
            prop_assert!(seen.into_iter().all(|covered| covered));
        }

        // Each run is script-pure and its direction matches the base.
        #[test]
        fn prop_runs_are_script_pure(text in SOUP, base in base_directions()) {
            let chars: Vec<char> = text.chars().collect();
            let scripts = resolve_scripts(&chars);
            let bidi_runs = level_runs(&chars, base);
            let runs = split_runs(&scripts, &bidi_runs, base);

            for run in &runs {
                for i in run.range() {
                    prop_assert_eq!(scripts[i], run.script);
                }
                if base == BaseDirection::TopToBottom {
                    prop_assert_eq!(run.direction, Direction::TopToBottom);
                } else {
                    prop_assert_ne!(run.direction, Direction::TopToBottom);
                }
            }
        }

        // Once any strong script exists, nothing stays Common/Inherited.
        #[test]
        fn prop_resolver_converges(text in SOUP) {
            let chars: Vec<char> = text.chars().collect();
            let scripts = resolve_scripts(&chars);

            let has_strong = scripts
                .iter()
                .any(|&s| s != Script::Common && s != Script::Inherited);
            if has_strong {
                for &script in &scripts {
                    prop_assert_ne!(script, Script::Common);
                    prop_assert_ne!(script, Script::Inherited);
                }
            }
        }
    }
}
