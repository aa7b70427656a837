use bit_set::BitSet;
use log::debug;

use crate::grid_config::{GridConfig, VariableId, WordId};

/// The candidate words still available for each variable, as a set of word ids per variable.
///
/// Domains only ever shrink. The search never mutates a shared `Domains`; when it wants to narrow
/// domains along a branch it clones them first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains {
    options: Vec<BitSet>,
}

impl Domains {
    /// Start every variable off with the full word list.
    pub fn new(config: &GridConfig) -> Domains {
        let all_words: BitSet = (0..config.words.len()).collect();

        Domains {
            options: config.variables.iter().map(|_| all_words.clone()).collect(),
        }
    }

    pub fn len(&self, variable_id: VariableId) -> usize {
        self.options[variable_id].len()
    }

    pub fn is_empty(&self, variable_id: VariableId) -> bool {
        self.options[variable_id].is_empty()
    }

    pub fn contains(&self, variable_id: VariableId, word_id: WordId) -> bool {
        self.options[variable_id].contains(word_id)
    }

    /// Word ids remaining for this variable, in ascending order.
    pub fn iter(&self, variable_id: VariableId) -> DomainIter<'_> {
        DomainIter(self.options[variable_id].iter())
    }

    pub fn remove(&mut self, variable_id: VariableId, word_id: WordId) -> bool {
        self.options[variable_id].remove(word_id)
    }

    /// Narrow a domain down to a single word.
    pub fn restrict_to(&mut self, variable_id: VariableId, word_id: WordId) {
        let mut single = BitSet::with_capacity(word_id + 1);
        single.insert(word_id);
        self.options[variable_id].intersect_with(&single);
    }

    /// Keep only the words matching `predicate`, returning how many were removed.
    pub fn retain<F>(&mut self, variable_id: VariableId, mut predicate: F) -> usize
    where
        F: FnMut(WordId) -> bool,
    {
        let removed: Vec<WordId> =
            self.options[variable_id].iter().filter(|&word_id| !predicate(word_id)).collect();

        for &word_id in &removed {
            self.options[variable_id].remove(word_id);
        }

        removed.len()
    }

    /// Does any variable have no options left?
    pub fn any_empty(&self) -> bool {
        self.options.iter().any(BitSet::is_empty)
    }

    /// The actual strings remaining for a variable, mostly useful for inspection and tests.
    pub fn words<'a>(&'a self, config: &'a GridConfig, variable_id: VariableId) -> Vec<&'a str> {
        self.iter(variable_id).map(|word_id| config.words[word_id].string.as_str()).collect()
    }
}

/// Iterator over the word ids left in one domain.
///
/// `bit_set::Iter` can report an upper size bound below the number of ids it still yields, which
/// breaks adapters that trust it (`filter(..).count()` underflows). Only `next` is forwarded, so
/// the size hint stays at the default `(0, None)`.
pub struct DomainIter<'a>(bit_set::Iter<'a, u32>);

impl Iterator for DomainIter<'_> {
    type Item = WordId;

    fn next(&mut self) -> Option<WordId> {
        self.0.next()
    }
}

/// Make every variable node-consistent: its domain becomes exactly the words whose length matches
/// the variable's length.
pub fn enforce_node_consistency(config: &GridConfig, domains: &mut Domains) {
    for (variable_id, variable) in config.variables.iter().enumerate() {
        domains.options[variable_id] = config
            .words
            .iter()
            .enumerate()
            .filter(|(_, word)| word.len() == variable.length)
            .map(|(word_id, _)| word_id)
            .collect();

        debug!(
            "Node consistency left {} options for {:?}",
            domains.len(variable_id),
            variable
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{enforce_node_consistency, Domains};
    use crate::parse::generate_grid_config_from_template_string;

    #[test]
    fn test_domains_start_with_every_word() {
        let config =
            generate_grid_config_from_template_string("___\n_##\n_##", ["CAT", "TO", "DOGS"]).unwrap();
        let domains = Domains::new(&config);

        for variable_id in 0..config.variables.len() {
            assert_eq!(domains.len(variable_id), 3);
        }
    }

    #[test]
    fn test_node_consistency_keeps_only_matching_lengths() {
        let config = generate_grid_config_from_template_string(
            "____\n_###\n_###",
            ["CAT", "TO", "DOGS", "EMU", "BIRD"],
        )
        .unwrap();
        let mut domains = Domains::new(&config);

        enforce_node_consistency(&config, &mut domains);

        for (variable_id, variable) in config.variables.iter().enumerate() {
            for word_id in domains.iter(variable_id) {
                assert_eq!(config.words[word_id].len(), variable.length);
            }
        }
        assert_eq!(domains.words(&config, 0), vec!["DOGS", "BIRD"]);
        assert_eq!(domains.words(&config, 1), vec!["CAT", "EMU"]);
    }

    #[test]
    fn test_node_consistency_is_idempotent() {
        let config =
            generate_grid_config_from_template_string("___\n_##", ["CAT", "TO", "DOGS", "AB"]).unwrap();
        let mut domains = Domains::new(&config);

        enforce_node_consistency(&config, &mut domains);
        let once = domains.clone();
        enforce_node_consistency(&config, &mut domains);

        assert_eq!(once, domains);
    }

    #[test]
    fn test_node_consistency_can_empty_a_domain() {
        let config = generate_grid_config_from_template_string("____\n_###\n_###", ["CAT"]).unwrap();
        let mut domains = Domains::new(&config);

        enforce_node_consistency(&config, &mut domains);

        assert!(domains.is_empty(0));
        assert!(domains.any_empty());
    }

    #[test]
    fn test_restrict_and_retain() {
        let config = generate_grid_config_from_template_string("___", ["CAT", "CAR", "COT"]).unwrap();
        let mut domains = Domains::new(&config);

        assert_eq!(domains.retain(0, |word_id| word_id != 1), 1);
        assert!(!domains.contains(0, 1));

        domains.restrict_to(0, 2);
        assert_eq!(domains.words(&config, 0), vec!["COT"]);
    }

    #[test]
    fn test_counting_filtered_options_spans_blocks() {
        // Enough words that the domain spills past the first 32-bit block.
        let words: Vec<String> = (b'A'..=b'Z')
            .flat_map(|first| [format!("{}AT", first as char), format!("{}OT", first as char)])
            .collect();
        let config = generate_grid_config_from_template_string("___", words).unwrap();
        let domains = Domains::new(&config);

        assert_eq!(domains.len(0), 52);
        assert_eq!(domains.iter(0).count(), 52);
        assert_eq!(domains.iter(0).filter(|&word_id| word_id % 2 == 1).count(), 26);
        assert_eq!(domains.iter(0).skip(3).filter(|&word_id| word_id < 40).count(), 37);
    }
}
