pub mod archive;
pub mod file_linker;
pub mod scratch;

pub use archive::extract_archive;
pub use file_linker::FileLinker;
pub use scratch::ScratchPaths;
