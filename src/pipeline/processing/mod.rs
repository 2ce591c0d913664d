// Pipeline processing: quality analysis of decoded sheets

pub mod quality;
