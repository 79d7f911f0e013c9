pub mod quality_selection;

pub use quality_selection::QualitySelection;
