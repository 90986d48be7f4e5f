/// Compile a regex literal once, on first use.
macro_rules! regex {
    ($pat:literal) => {{
        static RE: ::once_cell::sync::Lazy<::regex::Regex> =
            ::once_cell::sync::Lazy::new(|| ::regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Declare a dump grammar.
///
/// `indent` is the pattern for one run of indentation blocks and `terminal`
/// the full-path pattern; both are compiled once through `regex!`.
macro_rules! grammar {
    (
        kind: $kind:expr,
        leaf: $leaf:literal,
        depth: $depth:literal,
        indent: $indent:literal,
        terminal: $terminal:literal
        $(, length_offset: $offset:expr)?
        $(,)?
    ) => {{
        $crate::grammars::Grammar {
            kind: $kind,
            leaf_marker: $leaf,
            depth_marker: $depth,
            indent_run: regex!($indent),
            terminal: regex!($terminal),
            length_offset: { 0 $(+ $offset)? },
        }
    }};
}
