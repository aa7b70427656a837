use std::collections::{HashMap, HashSet};
use std::fmt::{Debug, Formatter};

use smallvec::SmallVec;

use crate::MAX_SLOT_LENGTH;

/// An identifier for a given variable, based on its index in the GridConfig's `variables` field.
pub type VariableId = usize;

/// An identifier for a given word, based on its index in the GridConfig's `words` field.
pub type WordId = usize;

/// The positions within two crossing variables that share a cell: `(index_in_x, index_in_y)`.
pub type Overlap = (usize, usize);

/// Zero-indexed row and column for a cell in the grid, where row 0 is the top row.
pub type GridCoord = (usize, usize);

/// The variables crossing a given variable. Each cell of a variable is crossed by at most one
/// other variable, so a slot's length bounds its neighbor count, the same way it bounds its
/// crossings.
pub type Neighbors = SmallVec<[VariableId; MAX_SLOT_LENGTH]>;

/// Direction that a variable is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

/// A single word slot in the grid. Two variables are equal iff they start at the same cell, face
/// the same way and have the same length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    pub i: usize,
    pub j: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    pub fn new(i: usize, j: usize, direction: Direction, length: usize) -> Variable {
        Variable { i, j, direction, length }
    }

    /// Generate the coords for each cell of this variable.
    pub fn cells(&self) -> impl Iterator<Item = GridCoord> + '_ {
        (0..self.length).map(move |k| match self.direction {
            Direction::Across => (self.i, self.j + k),
            Direction::Down => (self.i + k, self.j),
        })
    }
}

/// A dictionary entry that can be chosen for a variable.
#[derive(Debug, Clone)]
pub struct Word {
    pub string: String,
    pub glyphs: SmallVec<[char; MAX_SLOT_LENGTH]>,
}

impl Word {
    fn new(string: String) -> Word {
        let glyphs = string.chars().collect();
        Word { string, glyphs }
    }

    /// Length in characters, which is what a variable's length is measured against.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyph(&self, cell_idx: usize) -> Option<char> {
        self.glyphs.get(cell_idx).copied()
    }
}

/// The static description of a puzzle: the grid geometry, the variables it induces, how they
/// cross, and the dictionary they are filled from. Nothing here changes while solving.
pub struct GridConfig {
    pub height: usize,
    pub width: usize,
    pub structure: Vec<Vec<bool>>,
    pub variables: Vec<Variable>,
    pub words: Vec<Word>,
    overlaps: HashMap<(VariableId, VariableId), Overlap>,
    neighbors: Vec<Neighbors>,
}

impl Debug for GridConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridConfig")
            .field("height", &self.height)
            .field("width", &self.width)
            .field("variables", &self.variables)
            .field("words", &(["(", &self.words.len().to_string(), " entries)"].join("")))
            .finish()
    }
}

impl GridConfig {
    /// Build a GridConfig from an occupancy matrix (`true` marks a fillable cell) and a word list.
    /// Rows shorter than the widest row are treated as blocked past their end. Duplicate words
    /// are collapsed, keeping the first occurrence.
    pub fn new<I, S>(structure: Vec<Vec<bool>>, words: I) -> GridConfig
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let height = structure.len();
        let width = structure.iter().map(|row| row.len()).max().unwrap_or(0);
        let structure: Vec<Vec<bool>> = structure
            .into_iter()
            .map(|mut row| {
                row.resize(width, false);
                row
            })
            .collect();

        let mut seen: HashSet<String> = HashSet::new();
        let words: Vec<Word> = words
            .into_iter()
            .map(Into::into)
            .filter(|word| seen.insert(word.clone()))
            .map(Word::new)
            .collect();

        let variables = build_variables(&structure, height, width);

        // Map each cell to the variables passing through it, which gives us the crossings.
        let mut entries_by_cell: HashMap<GridCoord, SmallVec<[(VariableId, usize); 2]>> =
            HashMap::new();
        for (variable_id, variable) in variables.iter().enumerate() {
            for (cell_idx, cell) in variable.cells().enumerate() {
                entries_by_cell.entry(cell).or_default().push((variable_id, cell_idx));
            }
        }

        let mut overlaps = HashMap::new();
        let mut neighbors: Vec<Neighbors> = variables.iter().map(|_| Neighbors::new()).collect();

        // Iterate in variable order so that neighbor lists come out deterministic.
        for (variable_id, variable) in variables.iter().enumerate() {
            for (cell_idx, cell) in variable.cells().enumerate() {
                for &(other_id, other_cell_idx) in &entries_by_cell[&cell] {
                    if other_id == variable_id || overlaps.contains_key(&(variable_id, other_id)) {
                        continue;
                    }
                    overlaps.insert((variable_id, other_id), (cell_idx, other_cell_idx));
                    neighbors[variable_id].push(other_id);
                }
            }
        }

        GridConfig {
            height,
            width,
            structure,
            variables,
            words,
            overlaps,
            neighbors,
        }
    }

    /// Where `x` and `y` cross, as `(index_in_x, index_in_y)`, or None if they don't.
    pub fn overlap(&self, x: VariableId, y: VariableId) -> Option<Overlap> {
        self.overlaps.get(&(x, y)).copied()
    }

    /// The variables crossing `variable_id`, in variable order.
    pub fn neighbors(&self, variable_id: VariableId) -> &[VariableId] {
        &self.neighbors[variable_id]
    }

    /// Every directed arc `(x, y)` between crossing variables.
    pub fn arcs(&self) -> Vec<(VariableId, VariableId)> {
        (0..self.variables.len())
            .flat_map(|x| self.neighbors(x).iter().map(move |&y| (x, y)))
            .collect()
    }

    pub fn word_id(&self, word: &str) -> Option<WordId> {
        self.words.iter().position(|candidate| candidate.string == word)
    }

    pub fn is_fillable(&self, (row, col): GridCoord) -> bool {
        self.structure
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(false)
    }
}

/// Find every maximal run of fillable cells longer than one cell: across runs first in row-major
/// order, then down runs in column-major order.
fn build_variables(structure: &[Vec<bool>], height: usize, width: usize) -> Vec<Variable> {
    let mut result = vec![];

    for i in 0..height {
        let mut j = 0;
        while j < width {
            if !structure[i][j] {
                j += 1;
                continue;
            }
            let start = j;
            while j < width && structure[i][j] {
                j += 1;
            }
            if j - start > 1 {
                result.push(Variable::new(i, start, Direction::Across, j - start));
            }
        }
    }

    for j in 0..width {
        let mut i = 0;
        while i < height {
            if !structure[i][j] {
                i += 1;
                continue;
            }
            let start = i;
            while i < height && structure[i][j] {
                i += 1;
            }
            if i - start > 1 {
                result.push(Variable::new(start, j, Direction::Down, i - start));
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::{Direction, GridConfig, Variable};
    use crate::MAX_SLOT_LENGTH;

    fn structure(rows: &[&str]) -> Vec<Vec<bool>> {
        rows.iter().map(|row| row.chars().map(|c| c == '_').collect()).collect()
    }

    /// ___
    /// #_#
    /// #_#
    #[test]
    fn test_variables_and_overlaps_for_t_shape() {
        let config = GridConfig::new(structure(&["___", "#_#", "#_#"]), ["CAT"]);

        assert_eq!(
            config.variables,
            vec![
                Variable::new(0, 0, Direction::Across, 3),
                Variable::new(0, 1, Direction::Down, 3),
            ]
        );
        assert_eq!(config.overlap(0, 1), Some((1, 0)));
        assert_eq!(config.overlap(1, 0), Some((0, 1)));
        assert_eq!(config.neighbors(0), &[1]);
        assert_eq!(config.neighbors(1), &[0]);
        assert_eq!(config.arcs(), vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_neighbor_lists_are_bounded_by_slot_length() {
        let row = "_".repeat(MAX_SLOT_LENGTH);
        let config = GridConfig::new(structure(&[row.as_str(); MAX_SLOT_LENGTH]), ["A"]);

        assert_eq!(config.variables.len(), 2 * MAX_SLOT_LENGTH);
        for (variable_id, variable) in config.variables.iter().enumerate() {
            assert_eq!(config.neighbors(variable_id).len(), variable.length);
            assert!(!config.neighbors[variable_id].spilled());
        }
    }

    #[test]
    fn test_single_cells_are_not_variables() {
        let config = GridConfig::new(structure(&["_#_", "###", "__#"]), Vec::<String>::new());

        assert_eq!(config.variables, vec![Variable::new(2, 0, Direction::Across, 2)]);
        assert!(config.neighbors(0).is_empty());
    }

    #[test]
    fn test_parallel_variables_do_not_overlap() {
        let config = GridConfig::new(structure(&["___", "###", "___"]), ["ABC"]);

        assert_eq!(config.variables.len(), 2);
        assert_eq!(config.overlap(0, 1), None);
        assert!(config.arcs().is_empty());
    }

    #[test]
    fn test_ragged_rows_are_padded_with_blocks() {
        let config = GridConfig::new(structure(&["____", "_"]), ["ABCD"]);

        assert_eq!(config.width, 4);
        assert!(!config.is_fillable((1, 3)));
        assert_eq!(
            config.variables,
            vec![
                Variable::new(0, 0, Direction::Across, 4),
                Variable::new(0, 0, Direction::Down, 2),
            ]
        );
        assert_eq!(config.overlap(0, 1), Some((0, 0)));
    }

    #[test]
    fn test_duplicate_words_are_collapsed() {
        let config = GridConfig::new(structure(&["__"]), ["AB", "CD", "AB"]);

        assert_eq!(config.words.len(), 2);
        assert_eq!(config.word_id("CD"), Some(1));
        assert_eq!(config.words[1].len(), 2);
    }

    #[test]
    fn test_variable_equality_uses_all_attributes() {
        let across = Variable::new(0, 0, Direction::Across, 3);

        assert_eq!(across, Variable::new(0, 0, Direction::Across, 3));
        assert_ne!(across, Variable::new(0, 0, Direction::Down, 3));
        assert_ne!(across, Variable::new(0, 0, Direction::Across, 4));
        assert_ne!(across, Variable::new(1, 0, Direction::Across, 3));
    }
}
