pub mod hotkeys;
pub mod paths;
pub mod settings;
pub mod taxonomy;
pub mod templater;
pub mod vault;
