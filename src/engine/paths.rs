//! Root-to-leaf path reconstruction.
//!
//! A dump has no parent pointers: a line's parent is the nearest line above it
//! with a smaller indentation depth. For every leaf line we climb those
//! parents until a depth-0 line is reached and glue the lines together.
//!
//! ```text
//! line 0  outlook = sunny                      depth 0  <─┐
//! line 1  |   humidity <= 75                   depth 1  <─┤ ancestors
//! line 2  |   |   windy = TRUE: no (1.0)       depth 2  ──┘ leaf
//!
//! "outlook = sunny|   humidity <= 75|   |   windy = TRUE: no (1.0)"
//!   └─ indentation runs -> " && "
//! "outlook = sunny && humidity <= 75 && windy = TRUE: no (1.0)"
//! ```
//!
//! Lines at the same or a greater depth are skipped while climbing, which
//! steps over sibling subtrees.

use crate::grammars::Grammar;

/// Full paths of every rooted leaf in a dump.
#[derive(Debug, Clone, Default)]
pub(crate) struct LeafPaths {
    pub paths: Vec<String>,
    /// Lines containing the grammar's leaf marker.
    pub leaf_lines: usize,
    /// Leaf lines with no depth-0 ancestor.
    pub orphans: usize,
}

pub(crate) fn leaf_paths(dump: &str, grammar: &Grammar) -> LeafPaths {
    let lines: Vec<&str> = dump.lines().collect();
    let mut out = LeafPaths::default();

    for (j, line) in lines.iter().enumerate() {
        if !grammar.is_leaf(line) {
            continue;
        }
        out.leaf_lines += 1;

        let mut depth = grammar.depth(line);
        if depth == 0 {
            out.paths.push((*line).to_string());
            continue;
        }

        // Ancestors are collected leaf-first and joined root-first.
        let mut segments: Vec<&str> = vec![*line];
        for ancestor in lines[..j].iter().rev() {
            let ancestor_depth = grammar.depth(ancestor);
            if ancestor_depth < depth {
                depth = ancestor_depth;
                segments.push(*ancestor);
                if depth == 0 {
                    break;
                }
            }
        }

        if depth != 0 {
            out.orphans += 1;
            continue;
        }

        segments.reverse();
        let joined = segments.concat();
        out.paths.push(grammar.indent_run.replace_all(&joined, " && ").into_owned());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelKind;
    use crate::grammars::for_model;

    #[test]
    fn depth_zero_leaf_is_kept_verbatim() {
        let paths = leaf_paths("attr = v1: yes (10.0/2.0)", for_model(ModelKind::SysFor));
        assert_eq!(paths.paths, vec!["attr = v1: yes (10.0/2.0)"]);
        assert_eq!(paths.leaf_lines, 1);
    }

    #[test]
    fn nested_leaves_climb_to_root() {
        let dump = "\
a = 1
|   b = 2
|   |   c = 3: yes (2.0)
|   |   c = 4: no (3.0)
|   b = 5: no (1.0)
a = 2: yes (4.0)";
        let paths = leaf_paths(dump, for_model(ModelKind::SysFor));
        assert_eq!(
            paths.paths,
            vec![
                "a = 1 && b = 2 && c = 3: yes (2.0)",
                "a = 1 && b = 2 && c = 4: no (3.0)",
                "a = 1 && b = 5: no (1.0)",
                "a = 2: yes (4.0)",
            ]
        );
        assert_eq!(paths.orphans, 0);
    }

    #[test]
    fn sibling_subtrees_are_skipped_while_climbing() {
        let dump = "\
a = 1
|   b = 2
|   |   c = 3: yes (2.0)
|   b = 6
|   |   d = 1: no (5.0)";
        let paths = leaf_paths(dump, for_model(ModelKind::SysFor));
        assert_eq!(paths.paths[1], "a = 1 && b = 6 && d = 1: no (5.0)");
    }

    #[test]
    fn leaf_without_root_is_an_orphan() {
        let dump = "|   b = 2: yes (2.0)\na = 1: no (1.0)";
        let paths = leaf_paths(dump, for_model(ModelKind::SysFor));
        assert_eq!(paths.orphans, 1);
        assert_eq!(paths.paths, vec!["a = 1: no (1.0)"]);
    }

    #[test]
    fn forest_pa_uses_two_space_blocks() {
        let dump = "outlook = rainy\n|  windy = TRUE: no(2.0/0.0)";
        let paths = leaf_paths(dump, for_model(ModelKind::ForestPa));
        assert_eq!(paths.paths, vec!["outlook = rainy && windy = TRUE: no(2.0/0.0)"]);
    }
}
