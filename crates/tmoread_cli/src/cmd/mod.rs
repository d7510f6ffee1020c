/// Domain table listing command.
pub mod domains;
/// Container-level information command.
pub mod info;
/// Sample streaming command.
pub mod samples;
/// Time index listing command.
pub mod times;
/// Shared CLI helpers.
pub(crate) mod util;
