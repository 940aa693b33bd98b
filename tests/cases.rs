use std::fs;

use exprule::interpreter::{evaluator::core::Context, parser::core::Parser};
use walkdir::WalkDir;

/// Runs every `.calc` file under `tests/cases`.
///
/// Each non-empty line that does not start with `#` has the form
/// `expression => expected`. Lines of one file share a parser and a context,
/// so assignments carry over to later lines.
#[test]
fn case_files_evaluate() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/cases").into_iter()
                                   .filter_map(Result::ok)
                                   .filter(|e| e.path().extension().is_some_and(|ext| ext == "calc"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        let mut parser = Parser::new();
        let mut context = Context::with_builtins();

        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (source, expected) =
                line.rsplit_once(" => ")
                    .unwrap_or_else(|| panic!("{path:?}:{} has no expected value", i + 1));

            count += 1;
            let result = parser.parse(source)
                               .map_err(|e| e.to_string())
                               .and_then(|tree| tree.evaluate(&mut context).map_err(|e| e.to_string()))
                               .unwrap_or_else(|e| panic!("{path:?}:{} failed: {source}\nError: {e}", i + 1));

            assert_eq!(result.to_string(),
                       expected.trim(),
                       "{path:?}:{} evaluated {source}",
                       i + 1);
        }
    }

    assert!(count > 0, "No cases found in tests/cases");
}
