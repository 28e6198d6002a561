// Server-side rendering of the CV page, its sections and the builder form.

pub mod dates;
pub mod form;
pub mod node;
pub mod page;
pub mod sections;

pub use form::render_form;
pub use page::{render_page, PageContext};
