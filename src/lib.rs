pub mod api;
pub mod fs_json_util;
pub mod scanner;
pub mod schema;
pub mod sync;
