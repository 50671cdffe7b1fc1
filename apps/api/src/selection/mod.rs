// Review selection: the set of review ids published on the public property page.
// This is the only state the service owns.

pub mod handlers;
pub mod store;

pub use store::{PgSelectionStore, SelectionStore};
