//! Crossword generation as a constraint satisfaction problem. Each word slot in the grid is a
//! variable whose domain starts as the whole word list; node consistency trims domains to the
//! right length, AC-3 trims them to words that can cross their neighbors, and backtracking search
//! (minimum remaining values, then degree, then least constraining value) picks the fill.

/// The expected maximum number of distinct characters a single cell can take.
pub const MAX_GLYPH_COUNT: usize = 256;

/// The expected maximum length for a single slot.
pub const MAX_SLOT_LENGTH: usize = 21;

pub mod arc_consistency;
pub mod assignment;
pub mod backtracking_search;
pub mod domains;
pub mod grid_config;
pub mod heuristics;
pub mod parse;
pub mod render;

pub use assignment::{consistent, Assignment};
pub use backtracking_search::{find_fill, solve, FillFailure, FillSuccess, SearchOptions, Statistics};
pub use domains::{enforce_node_consistency, Domains};
pub use grid_config::{Direction, GridConfig, Variable, VariableId, WordId};
pub use parse::{generate_grid_config_from_template_string, load_grid_config, ParseError};
pub use render::render_grid;
