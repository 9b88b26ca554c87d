//! Visual and tabular forms derived from prediction results.
//!
//! Everything here is a pure function of the settled results: the map
//! viewport and path geometry, the anomaly colour scale, map overlays and
//! table rows. The presentation adapters only render what these produce.

pub mod anomaly;
pub mod geometry;
pub mod overlay;
pub mod table;
