// Application layer: use cases and the ports they depend on

pub mod analyze_sheet_use_case;
pub mod ports;

pub use analyze_sheet_use_case::AnalyzeSheetUseCase;
