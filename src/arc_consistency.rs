//! AC-3 over the crossing constraints of a crossword. Two variables are arc-consistent when every
//! word left for one of them has at least one word left in the other that puts the same letter in
//! the shared cell.

use std::collections::VecDeque;

use bit_set::BitSet;
use log::debug;
use smallvec::SmallVec;

use crate::domains::Domains;
use crate::grid_config::{GridConfig, VariableId};
use crate::MAX_GLYPH_COUNT;

/// A directed arc `(x, y)`: revising it makes `x` consistent with `y`.
pub type Arc = (VariableId, VariableId);

/// Worklist of arcs still to revise. An arc is only ever in the queue once at a time.
#[derive(Debug)]
struct ConsistencyQueue {
    queue: VecDeque<Arc>,
    queued: BitSet,
    variable_count: usize,
}

impl ConsistencyQueue {
    fn with_initial_queue<Items>(variable_count: usize, items: Items) -> ConsistencyQueue
    where
        Items: IntoIterator<Item = Arc>,
    {
        let mut queue = ConsistencyQueue {
            queue: VecDeque::new(),
            queued: BitSet::with_capacity(variable_count * variable_count),
            variable_count,
        };
        for arc in items {
            queue.enqueue(arc);
        }
        queue
    }

    fn key(&self, (x, y): Arc) -> usize {
        x * self.variable_count + y
    }

    fn pop_front(&mut self) -> Option<Arc> {
        let arc = self.queue.pop_front()?;
        let key = self.key(arc);
        self.queued.remove(key);
        Some(arc)
    }

    fn enqueue(&mut self, arc: Arc) {
        let key = self.key(arc);
        if self.queued.insert(key) {
            self.queue.push_back(arc);
        }
    }
}

/// Make `x` arc-consistent with `y` by removing every word from `x`'s domain that has no partner
/// in `y`'s domain at their shared cell. Returns whether anything was removed.
pub fn revise(config: &GridConfig, domains: &mut Domains, x: VariableId, y: VariableId) -> bool {
    let Some((x_idx, y_idx)) = config.overlap(x, y) else {
        return false;
    };

    // The letters `y` can still put in the shared cell.
    let supported: SmallVec<[char; MAX_GLYPH_COUNT]> = {
        let mut glyphs: SmallVec<[char; MAX_GLYPH_COUNT]> = domains
            .iter(y)
            .filter_map(|word_id| config.words[word_id].glyph(y_idx))
            .collect();
        glyphs.sort_unstable();
        glyphs.dedup();
        glyphs
    };

    let removed = domains.retain(x, |word_id| {
        config.words[word_id]
            .glyph(x_idx)
            .map_or(false, |glyph| supported.binary_search(&glyph).is_ok())
    });

    if removed > 0 {
        debug!("Revising {} against {} removed {} options", x, y, removed);
    }

    removed > 0
}

/// Run AC-3 starting from `arcs`, or from every arc in the grid if `arcs` is None. Returns false
/// as soon as any revised domain becomes empty, meaning no fill exists under these domains.
pub fn ac3(config: &GridConfig, domains: &mut Domains, arcs: Option<&[Arc]>) -> bool {
    let variable_count = config.variables.len();
    let mut queue = match arcs {
        Some(arcs) => ConsistencyQueue::with_initial_queue(variable_count, arcs.iter().copied()),
        None => ConsistencyQueue::with_initial_queue(variable_count, config.arcs()),
    };

    while let Some((x, y)) = queue.pop_front() {
        if !revise(config, domains, x, y) {
            continue;
        }

        if domains.is_empty(x) {
            debug!("Arc consistency emptied the domain of {:?}", config.variables[x]);
            return false;
        }

        // Shrinking `x` can leave options in its other neighbors without support.
        for &z in config.neighbors(x) {
            if z != y {
                queue.enqueue((z, x));
            }
        }
    }

    true
}
