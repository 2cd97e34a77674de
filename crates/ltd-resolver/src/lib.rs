pub mod declarations;
pub mod ignore;
pub mod root;

pub use declarations::{declaration_entries, declaration_files, is_declaration_file};
pub use ignore::IgnoreMatcher;
pub use root::resolve_declaration_root;
