/// Property tests for enclosing-block resolution
///
/// Random brace structures are compared against a forward stack simulation,
/// and arbitrary text is resolved at arbitrary offsets to check that
/// resolution never panics.

use quickcheck::{QuickCheck, TestResult};

use ropey::Rope;

use alloy_language_server::completion::{
    enclosing_chain, innermost_block, resolve_completions, resolve_completions_in_rope,
};
use alloy_language_server::schema::SchemaRegistry;

const IDENTITIES: [&str; 5] = [
    "prometheus.scrape",
    "endpoint",
    "tls_config",
    "logging",
    "my.custom_block",
];

/// Renders `ops` as one statement per line and returns the text, the block
/// identities a forward reader would still have open at its end, and the number
/// of braces still open.
///
/// By `op % 5`: 0 and 1 open a block named after `IDENTITIES[op / 5 % len]`
/// (0 with a label), 2 closes one brace, 3 opens a map with `key = {` and 4
/// opens one with a bare `{` line. Maps pair with closers but never name a
/// block. Closers at depth zero are kept in the text and ignored by the
/// simulation.
fn render(ops: &[u8]) -> (String, Vec<String>, usize) {
    let mut text = String::new();
    let mut stack: Vec<Option<String>> = Vec::new();
    for op in ops {
        let indent = "  ".repeat(stack.len());
        let identity = IDENTITIES[(*op / 5) as usize % IDENTITIES.len()];
        match op % 5 {
            0 => {
                text.push_str(&format!("{}{} \"label_{}\" {{\n", indent, identity, op));
                stack.push(Some(identity.to_string()));
            }
            1 => {
                text.push_str(&format!("{}{} {{\n", indent, identity));
                stack.push(Some(identity.to_string()));
            }
            2 => {
                text.push_str(&format!("{}}}\n", indent));
                stack.pop();
            }
            3 => {
                text.push_str(&format!("{}key_{} = {{\n", indent, op));
                stack.push(None);
            }
            _ => {
                text.push_str(&format!("{}{{\n", indent));
                stack.push(None);
            }
        }
    }
    let depth = stack.len();
    (text, stack.into_iter().flatten().collect(), depth)
}

/// Floors `offset` into `text` onto a character boundary.
fn char_floor(text: &str, offset: usize) -> usize {
    let mut offset = offset % (text.len() + 1);
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[test]
fn test_chain_matches_forward_simulation() {
    fn prop(ops: Vec<u8>) -> TestResult {
        let (text, expected, _) = render(&ops);
        let chain = enclosing_chain(&text);
        if chain != expected {
            println!("text:\n{}\nexpected {:?}, got {:?}", text, expected, chain);
            return TestResult::failed();
        }
        TestResult::from_bool(innermost_block(&text) == expected.last().cloned())
    }

    QuickCheck::new()
        .tests(500)
        .max_tests(5000)
        .quickcheck(prop as fn(Vec<u8>) -> TestResult);
}

#[test]
fn test_resolution_follows_innermost_frame() {
    fn prop(ops: Vec<u8>) -> TestResult {
        let registry = SchemaRegistry::builtin().unwrap();
        let (text, open, _) = render(&ops);
        let items = match resolve_completions(&registry, &text, text.len()) {
            Ok(items) => items,
            Err(_) => return TestResult::failed(),
        };
        let expected = match open.last() {
            None => registry.top_level_items(),
            Some(identity) => registry.lookup(identity),
        };
        TestResult::from_bool(items == expected)
    }

    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(Vec<u8>) -> TestResult);
}

#[test]
fn test_arbitrary_text_never_panics() {
    fn prop(text: String, offset: usize) -> TestResult {
        let registry = SchemaRegistry::builtin().unwrap();
        let offset = char_floor(&text, offset);
        let first = resolve_completions(&registry, &text, offset);
        let second = resolve_completions(&registry, &text, offset);
        TestResult::from_bool(first.is_ok() && first == second)
    }

    QuickCheck::new()
        .tests(1000)
        .quickcheck(prop as fn(String, usize) -> TestResult);
}

#[test]
fn test_innermost_is_last_of_chain() {
    fn prop(text: String) -> bool {
        innermost_block(&text) == enclosing_chain(&text).last().cloned()
    }

    QuickCheck::new()
        .tests(1000)
        .quickcheck(prop as fn(String) -> bool);
}

#[test]
fn test_closed_prefix_is_top_level() {
    fn prop(ops: Vec<u8>, trailing: Vec<u8>) -> TestResult {
        let registry = SchemaRegistry::builtin().unwrap();
        let (mut text, _, depth) = render(&ops);
        // Close everything that is still open, maps included
        for _ in 0..depth {
            text.push_str("}\n");
        }
        // Blank lines and comments keep the cursor at top level
        for filler in trailing {
            text.push_str(match filler % 3 {
                0 => "\n",
                1 => "  ",
                _ => "// not a block {\n",
            });
        }
        match resolve_completions(&registry, &text, text.len()) {
            Ok(items) => TestResult::from_bool(items == registry.top_level_items()),
            Err(_) => TestResult::failed(),
        }
    }

    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(Vec<u8>, Vec<u8>) -> TestResult);
}

#[test]
fn test_rope_resolution_matches_text_resolution() {
    fn prop(ops: Vec<u8>, offset: usize) -> TestResult {
        let registry = SchemaRegistry::builtin().unwrap();
        let (text, _, _) = render(&ops);
        let offset = char_floor(&text, offset);
        let rope = Rope::from_str(&text);
        TestResult::from_bool(
            resolve_completions_in_rope(&registry, &rope, offset)
                == resolve_completions(&registry, &text, offset),
        )
    }

    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(Vec<u8>, usize) -> TestResult);
}
