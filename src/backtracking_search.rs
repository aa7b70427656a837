use instant::{Duration, Instant};
use log::{debug, info};

use crate::arc_consistency::{ac3, Arc};
use crate::assignment::{consistent, Assignment};
use crate::domains::{enforce_node_consistency, Domains};
use crate::grid_config::GridConfig;
use crate::heuristics::{order_domain_values, select_unassigned_variable};

/// Knobs for a fill attempt. The default is plain backtracking with no time limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    /// After each choice, re-run arc consistency on a copy of the branch's domains and prune the
    /// choice if any crossing variable runs out of options.
    pub maintain_arc_consistency: bool,

    /// Give up once this much time has passed.
    pub time_limit: Option<Duration>,
}

/// A struct tracking statistics about the filling process.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub states: u64,
    pub backtracks: u64,
    pub duration: Duration,
}

/// A struct representing the results of a fill operation.
#[derive(Debug)]
pub struct FillSuccess {
    pub statistics: Statistics,
    pub assignment: Assignment,
}

#[derive(Debug)]
pub enum FillFailure {
    /// There is no fill for this grid and word list.
    HardFailure(Statistics),

    /// The time limit ran out before the search finished.
    TimedOut(Statistics),
}

impl FillFailure {
    pub fn statistics(&self) -> &Statistics {
        match self {
            FillFailure::HardFailure(statistics) | FillFailure::TimedOut(statistics) => statistics,
        }
    }
}

/// Raised from deep inside the recursion when the deadline passes.
#[derive(Debug)]
struct Interrupted;

/// Live state of one fill attempt.
struct Search<'a> {
    config: &'a GridConfig,
    options: SearchOptions,
    deadline: Option<Instant>,
    statistics: Statistics,
}

impl<'a> Search<'a> {
    /// Extend `assignment` until it is complete, trying each candidate for the chosen variable in
    /// least-constraining order. Returns None if no extension of `assignment` works.
    fn backtrack(
        &mut self,
        assignment: &Assignment,
        domains: &Domains,
    ) -> Result<Option<Assignment>, Interrupted> {
        if assignment.is_complete(self.config) {
            return Ok(Some(assignment.clone()));
        }

        self.statistics.states += 1;

        if self.deadline.map_or(false, |deadline| Instant::now() >= deadline) {
            return Err(Interrupted);
        }

        let Some(variable_id) = select_unassigned_variable(self.config, domains, assignment) else {
            return Ok(Some(assignment.clone()));
        };

        for word_id in order_domain_values(self.config, domains, variable_id, assignment) {
            let candidate = assignment.with_choice(variable_id, word_id);
            if !consistent(self.config, &candidate) {
                continue;
            }

            let result = if self.options.maintain_arc_consistency {
                let mut narrowed = domains.clone();
                narrowed.restrict_to(variable_id, word_id);

                let arcs: Vec<Arc> = self
                    .config
                    .neighbors(variable_id)
                    .iter()
                    .map(|&neighbor_id| (neighbor_id, variable_id))
                    .collect();

                if !ac3(self.config, &mut narrowed, Some(&arcs)) {
                    debug!(
                        "Choosing {} for {:?} empties a crossing domain",
                        self.config.words[word_id].string, self.config.variables[variable_id]
                    );
                    self.statistics.backtracks += 1;
                    continue;
                }

                self.backtrack(&candidate, &narrowed)?
            } else {
                self.backtrack(&candidate, domains)?
            };

            if result.is_some() {
                return Ok(result);
            }

            self.statistics.backtracks += 1;
        }

        Ok(None)
    }
}

/// Search for a valid fill for the given grid: enforce node consistency, then arc consistency,
/// then backtrack over the remaining options.
pub fn find_fill(config: &GridConfig, options: &SearchOptions) -> Result<FillSuccess, FillFailure> {
    let start = Instant::now();
    let mut statistics = Statistics::default();

    let mut domains = Domains::new(config);
    enforce_node_consistency(config, &mut domains);

    if domains.any_empty() {
        info!("Some variable has no word of the right length");
        statistics.duration = start.elapsed();
        return Err(FillFailure::HardFailure(statistics));
    }

    if !ac3(config, &mut domains, None) {
        info!("Arc consistency ruled out every fill");
        statistics.duration = start.elapsed();
        return Err(FillFailure::HardFailure(statistics));
    }

    let mut search = Search {
        config,
        options: *options,
        // A limit too large to represent as an instant is no limit at all.
        deadline: options.time_limit.and_then(|limit| start.checked_add(limit)),
        statistics,
    };

    let result = search.backtrack(&Assignment::new(), &domains);

    let mut statistics = search.statistics;
    statistics.duration = start.elapsed();
    info!("Search finished: {:?}", statistics);

    match result {
        Ok(Some(assignment)) => Ok(FillSuccess {
            statistics,
            assignment,
        }),
        Ok(None) => Err(FillFailure::HardFailure(statistics)),
        Err(Interrupted) => Err(FillFailure::TimedOut(statistics)),
    }
}

/// Fill the grid with the default options, returning None if it can't be done.
pub fn solve(config: &GridConfig) -> Option<Assignment> {
    find_fill(config, &SearchOptions::default())
        .ok()
        .map(|success| success.assignment)
}
