pub mod assembler;
pub mod sink;

pub use assembler::DocumentAssembler;
pub use sink::{sanitize_filename, save_as, DirectorySink, FileSink, DEFAULT_FILENAME};
