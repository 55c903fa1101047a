//! Placeholder files for a newly inserted exercise.

use crate::catalog::folder_name;
use crate::error::{ManagerError, Result};

/// A file to create inside a new exercise folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// File name, relative to the exercise folder.
    pub name: String,
    /// Initial contents.
    pub contents: String,
}

/// Checks that `slug` can follow `NNN-` in a folder name.
///
/// # Errors
///
/// Returns [`ManagerError::InvalidSlug`] describing the first problem found.
pub fn validate_slug(slug: &str) -> Result<()> {
    let problem = if slug.is_empty() {
        Some("must not be empty")
    } else if slug.contains(['/', '\\']) {
        Some("must not contain path separators")
    } else if slug.chars().any(char::is_whitespace) {
        Some("must not contain whitespace")
    } else if crate::catalog::parse_name(slug).is_some() {
        Some("must not itself start with a number and '-'")
    } else {
        None
    };
    match problem {
        Some(reason) => Err(ManagerError::InvalidSlug(slug.to_string(), reason)),
        None => Ok(()),
    }
}

/// `new-topic` becomes `New Topic`.
fn title_case(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Implementation stub, test suite, README and package manifest for exercise `number`.
#[must_use]
pub fn exercise_files(number: u32, slug: &str) -> Vec<TemplateFile> {
    let token = folder_name(number, slug);
    let title = title_case(slug);

    let implementation = format!(
        "/**\n * Exercise {number}: {title}\n */\nexport function solve(input) {{\n  throw new Error('Not implemented yet');\n}}\n"
    );
    let test = format!(
        "import {{ solve }} from './{token}.js';\n\ndescribe('{title}', () => {{\n  test('solve is defined', () => {{\n    expect(typeof solve).toBe('function');\n  }});\n}});\n"
    );
    let readme = format!("# Exercise {number}: {title}\n\nDescribe the task here.\n\n## Run the tests\n\n```\nnpm test -- {token}\n```\n");
    let package = format!(
        "{{\n  \"name\": \"exercise-{slug}\",\n  \"private\": true,\n  \"type\": \"module\"\n}}\n"
    );

    vec![
        TemplateFile { name: format!("{token}.js"), contents: implementation },
        TemplateFile { name: format!("{token}.test.js"), contents: test },
        TemplateFile { name: "README.md".to_string(), contents: readme },
        TemplateFile { name: "package.json".to_string(), contents: package },
    ]
}
