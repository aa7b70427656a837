use std::collections::{BTreeMap, HashSet};

use crate::grid_config::{GridConfig, Variable, VariableId, WordId};

/// A (possibly partial) mapping from variables to the words chosen for them.
///
/// Search extends assignments by copying them (`with_choice`), so a branch that fails never has
/// to undo anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    choices: BTreeMap<VariableId, WordId>,
}

impl Assignment {
    pub fn new() -> Assignment {
        Assignment::default()
    }

    /// A copy of this assignment with `variable_id` set to `word_id`.
    pub fn with_choice(&self, variable_id: VariableId, word_id: WordId) -> Assignment {
        let mut result = self.clone();
        result.choices.insert(variable_id, word_id);
        result
    }

    pub fn get(&self, variable_id: VariableId) -> Option<WordId> {
        self.choices.get(&variable_id).copied()
    }

    pub fn contains(&self, variable_id: VariableId) -> bool {
        self.choices.contains_key(&variable_id)
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Is there a word for every variable in the grid?
    pub fn is_complete(&self, config: &GridConfig) -> bool {
        (0..config.variables.len()).all(|variable_id| self.contains(variable_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableId, WordId)> + '_ {
        self.choices.iter().map(|(&variable_id, &word_id)| (variable_id, word_id))
    }

    pub fn word<'a>(&self, config: &'a GridConfig, variable_id: VariableId) -> Option<&'a str> {
        self.get(variable_id).map(|word_id| config.words[word_id].string.as_str())
    }

    /// The assignment keyed by variable and word text rather than by id.
    pub fn to_words<'a>(&self, config: &'a GridConfig) -> BTreeMap<&'a Variable, &'a str> {
        self.iter()
            .map(|(variable_id, word_id)| {
                (&config.variables[variable_id], config.words[word_id].string.as_str())
            })
            .collect()
    }
}

impl FromIterator<(VariableId, WordId)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (VariableId, WordId)>>(iter: T) -> Assignment {
        Assignment {
            choices: iter.into_iter().collect(),
        }
    }
}

/// Check that an assignment (complete or not) breaks no constraint: every word fits its
/// variable's length, assigned crossing variables agree on the shared letter, and no word is used
/// twice.
pub fn consistent(config: &GridConfig, assignment: &Assignment) -> bool {
    let mut used: HashSet<WordId> = HashSet::with_capacity(assignment.len());

    for (variable_id, word_id) in assignment.iter() {
        let word = &config.words[word_id];

        if word.len() != config.variables[variable_id].length {
            return false;
        }

        if !used.insert(word_id) {
            return false;
        }

        for &neighbor_id in config.neighbors(variable_id) {
            let Some(neighbor_word_id) = assignment.get(neighbor_id) else {
                continue;
            };
            let Some((x_idx, y_idx)) = config.overlap(variable_id, neighbor_id) else {
                continue;
            };

            let neighbor_word = &config.words[neighbor_word_id];
            match (word.glyph(x_idx), neighbor_word.glyph(y_idx)) {
                (Some(a), Some(b)) if a == b => {}
                _ => return false,
            }
        }
    }

    true
}
