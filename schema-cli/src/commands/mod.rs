mod info;
mod render;
mod run;

// Run commands
pub use run::run_pipeline;

// Render commands
pub use render::run_render;

// Info commands
pub use info::{show_connection_info, show_tables};
