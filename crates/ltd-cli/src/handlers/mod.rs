pub mod help;
pub mod link;
pub mod setup;

pub use help::HelpHandler;
pub use link::LinkHandler;
pub use setup::SetupHandler;
