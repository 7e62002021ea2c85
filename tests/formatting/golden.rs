#[cfg(test)]
mod examples {
    use std::fs;
    use std::path::{Path, PathBuf};

    use htmlfmt::config::Configuration;
    use htmlfmt::formatting::*;
    use htmlfmt::parsing;

    /// Golden test for the format command
    ///
    /// This test:
    /// 1. Reads all .html files from tests/golden/
    /// 2. Runs the equivalent of the `format` command on each file
    /// 3. Compares the result with the companion `_after.html` file if there
    ///    is one, or with the original input if there isn't
    /// 4. Shows clear diffs when differences are found
    ///
    /// Files without a companion are expected to be in their canonical
    /// formatted form already. If they fail this test either the formatter
    /// is wrong or the file is (perhaps because of a deliberate style
    /// change, and it thus might need reformatting).

    /// Simple diff function to show line-by-line differences
    fn show_diff(expected: &str, formatted: &str, file_path: &Path) {
        let expected_lines: Vec<&str> = expected
            .lines()
            .collect();
        let formatted_lines: Vec<&str> = formatted
            .lines()
            .collect();

        let max_lines = expected_lines
            .len()
            .max(formatted_lines.len());

        println!("\nDifferences found in file: {:?}", file_path);
        println!("--- Expected");
        println!("+++ Formatted");

        for i in 0..max_lines {
            let expected_line = expected_lines
                .get(i)
                .unwrap_or(&"");
            let formatted_line = formatted_lines
                .get(i)
                .unwrap_or(&"");

            if expected_line != formatted_line {
                println!("@@ Line {} @@", i + 1);
                println!("- {}", expected_line);
                println!("+ {}", formatted_line);
            }
        }
    }

    fn companion(path: &Path) -> Option<PathBuf> {
        let stem = path
            .file_stem()?
            .to_str()?;
        let after = path.with_file_name(format!("{}_after.html", stem));
        after
            .exists()
            .then_some(after)
    }

    #[test]
    fn ensure_expected_output() {
        let dir = Path::new("tests/golden");

        assert!(dir.exists(), "golden directory missing");

        let entries = fs::read_dir(dir).expect("Failed to read golden directory");

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.expect("Failed to read directory entry");
            let path = entry.path();

            let name = path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("");

            if name.ends_with(".html") && !name.ends_with("_after.html") {
                files.push(path);
            }
        }

        assert!(!files.is_empty(), "No .html files found in golden directory");

        let config = Configuration::default();
        let mut failures = Vec::new();

        for file in &files {
            let original = parsing::load(&file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            let expected = match companion(file) {
                Some(after) => parsing::load(&after)
                    .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", after, e)),
                None => original.clone(),
            };

            let result = format_with_renderer(&Identity, &original, &config, None)
                .unwrap_or_else(|e| panic!("Failed to format file {:?}: {:?}", file, e));

            if result != expected {
                show_diff(&expected, &result, file);
                failures.push(file.clone());
                continue;
            }

            // the expected output is itself canonical
            let again = format(&expected, &config).unwrap();
            if again != expected {
                show_diff(&expected, &again, file);
                failures.push(file.clone());
            }
        }

        if !failures.is_empty() {
            panic!(
                "All golden files must format as expected; {} did not",
                failures.len()
            );
        }
    }
}
