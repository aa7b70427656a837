use crate::assignment::Assignment;
use crate::grid_config::GridConfig;

/// Character drawn for blocked cells.
pub const BLOCK: char = '█';

/// Lay the assigned words out on a `height × width` grid. Cells no assigned word passes through
/// are None.
pub fn letter_grid(config: &GridConfig, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; config.width]; config.height];

    for (variable_id, word_id) in assignment.iter() {
        let variable = &config.variables[variable_id];
        for ((row, col), &glyph) in variable.cells().zip(&config.words[word_id].glyphs) {
            letters[row][col] = Some(glyph);
        }
    }

    letters
}

/// Turn the given grid config and assignment into a rendered string, one line per row.
pub fn render_grid(config: &GridConfig, assignment: &Assignment) -> String {
    letter_grid(config, assignment)
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, letter)| {
                    if config.is_fillable((row, col)) {
                        letter.unwrap_or(' ')
                    } else {
                        BLOCK
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
