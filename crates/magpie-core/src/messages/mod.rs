mod events;

pub use events::PanelEvent;
