//! Object index store, working-set session and mutators for the bisection harness.

mod generate;
mod hash;
mod mutate;
mod selection;
mod session;
pub mod store;

pub use generate::{generate_session, initial_items};
pub use hash::{objects_hash, stable_hash_string};
pub use mutate::{switch_tmp, switch_to_bad, switch_to_good};
pub use selection::Selection;
pub use session::Session;
pub use store::{read_int_lines, write_int_lines, FileStore};
