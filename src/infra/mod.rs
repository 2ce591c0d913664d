// Infrastructure adapters behind the application ports

pub mod google_sheets_source;
