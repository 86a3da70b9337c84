mod bar;
mod entry;

pub use bar::{WorkspaceBar, WorkspaceBarView};
pub use entry::WorkspaceEntry;
