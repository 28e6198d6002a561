pub mod cv;
pub mod de;
pub mod draft;
pub mod records;
