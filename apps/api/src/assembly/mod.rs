// Resume assembly path: tag filtering, the declarative YAML document,
// per-section markdown rendering, and the deterministic assembler.
// ODT/PDF conversion goes through convert — no pandoc invocations here.

pub mod document;
pub mod handlers;
pub mod render;
pub mod resume_data;
pub mod tag_filter;
