use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::grid_config::GridConfig;

/// Character marking a fillable cell in a structure file. Anything else is a block.
pub const FILLABLE_CELL: char = '_';

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("the structure contains no rows")]
    EmptyStructure,
}

/// Parse a structure template into an occupancy matrix. Trailing blank lines are ignored, but
/// blank lines inside the grid are kept as fully blocked rows.
pub fn parse_structure(template: &str) -> Result<Vec<Vec<bool>>, ParseError> {
    let mut rows: Vec<Vec<bool>> = template
        .lines()
        .map(|line| line.trim_end_matches('\r').chars().map(|c| c == FILLABLE_CELL).collect())
        .collect();

    while rows.last().map_or(false, |row| row.is_empty()) {
        rows.pop();
    }

    if rows.is_empty() {
        return Err(ParseError::EmptyStructure);
    }

    Ok(rows)
}

/// Parse a word list: one word per line, trimmed and upper-cased, blank lines skipped.
pub fn parse_word_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_uppercase)
        .collect()
}

/// Generate a grid config from a string template, with `_` representing fillable cells and
/// anything else representing blocks.
pub fn generate_grid_config_from_template_string<I, S>(
    template: &str,
    words: I,
) -> Result<GridConfig, ParseError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Ok(GridConfig::new(parse_structure(template)?, words))
}

/// Load a structure file and a word list file from disk.
pub fn load_grid_config(
    structure_path: impl AsRef<Path>,
    words_path: impl AsRef<Path>,
) -> Result<GridConfig, ParseError> {
    let template = read(structure_path.as_ref())?;
    let words = parse_word_list(&read(words_path.as_ref())?);

    let config = generate_grid_config_from_template_string(&template, words)?;
    debug!(
        "Loaded {}x{} grid with {} variables and {} words",
        config.height,
        config.width,
        config.variables.len(),
        config.words.len()
    );

    Ok(config)
}

fn read(path: &Path) -> Result<String, ParseError> {
    fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{load_grid_config, parse_structure, parse_word_list, ParseError};
    use crate::grid_config::{Direction, Variable};

    #[test]
    fn test_parse_structure() {
        let rows = parse_structure("#___#\n#_##_\n\n").unwrap();

        assert_eq!(
            rows,
            vec![
                vec![false, true, true, true, false],
                vec![false, true, false, false, true],
            ]
        );
    }

    #[test]
    fn test_parse_structure_handles_crlf() {
        let rows = parse_structure("__\r\n_#\r\n").unwrap();

        assert_eq!(rows, vec![vec![true, true], vec![true, false]]);
    }

    #[test]
    fn test_empty_structure_is_an_error() {
        assert!(matches!(parse_structure("\n\n"), Err(ParseError::EmptyStructure)));
    }

    #[test]
    fn test_parse_word_list() {
        let words = parse_word_list("cat\n  Dog \n\nbird\n");

        assert_eq!(words, vec!["CAT", "DOG", "BIRD"]);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_grid_config("does/not/exist.txt", "words.txt").unwrap_err();

        assert!(matches!(&err, ParseError::Io { path, .. } if path == Path::new("does/not/exist.txt")));
        assert_eq!(err.to_string(), "failed to read does/not/exist.txt");
    }

    #[test]
    fn test_load_fixture() {
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let config = load_grid_config(data.join("structure0.txt"), data.join("words0.txt")).unwrap();

        assert_eq!((config.height, config.width), (5, 6));
        assert_eq!(config.variables.len(), 4);
        assert_eq!(config.variables[0], Variable::new(0, 1, Direction::Across, 4));
        assert!(config.words.iter().all(|word| word.string == word.string.to_uppercase()));
    }
}
