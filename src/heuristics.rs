use crate::assignment::Assignment;
use crate::domains::Domains;
use crate::grid_config::{GridConfig, VariableId, WordId};

/// Choose the next variable to fill: the unassigned variable with the fewest remaining options,
/// then the one crossing the most other variables. Any remaining tie goes to the lowest variable
/// id. Returns None once every variable is assigned.
pub fn select_unassigned_variable(
    config: &GridConfig,
    domains: &Domains,
    assignment: &Assignment,
) -> Option<VariableId> {
    (0..config.variables.len())
        .filter(|&variable_id| !assignment.contains(variable_id))
        .min_by_key(|&variable_id| {
            (
                domains.len(variable_id),
                std::cmp::Reverse(config.neighbors(variable_id).len()),
                variable_id,
            )
        })
}

/// Count how many options of `variable_id`'s unassigned neighbors would be ruled out by putting
/// `word_id` in it, because they disagree on the shared letter.
pub fn count_ruled_out(
    config: &GridConfig,
    domains: &Domains,
    variable_id: VariableId,
    word_id: WordId,
    assignment: &Assignment,
) -> usize {
    let word = &config.words[word_id];

    config
        .neighbors(variable_id)
        .iter()
        .filter(|&&neighbor_id| !assignment.contains(neighbor_id))
        .filter_map(|&neighbor_id| {
            config
                .overlap(variable_id, neighbor_id)
                .map(|overlap| (neighbor_id, overlap))
        })
        .map(|(neighbor_id, (x_idx, y_idx))| {
            let glyph = word.glyph(x_idx);
            domains
                .iter(neighbor_id)
                .filter(|&option| {
                    let other = config.words[option].glyph(y_idx);
                    other.is_none() || other != glyph
                })
                .count()
        })
        .sum()
}

/// Return the options for `variable_id` ordered so that the word ruling out the fewest options
/// among its unassigned neighbors comes first. Ties keep word list order. Domains are only read.
pub fn order_domain_values(
    config: &GridConfig,
    domains: &Domains,
    variable_id: VariableId,
    assignment: &Assignment,
) -> Vec<WordId> {
    let mut options: Vec<WordId> = domains.iter(variable_id).collect();

    options.sort_by_cached_key(|&word_id| {
        count_ruled_out(config, domains, variable_id, word_id, assignment)
    });

    options
}
