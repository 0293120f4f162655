// Cover-letter path: persistence lookups behind a trait seam, block-level
// composition, handlers. Conversion to ODT/PDF goes through convert.

pub mod composer;
pub mod handlers;
pub mod source;
